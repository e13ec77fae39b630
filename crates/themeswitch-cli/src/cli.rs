//! Command-line arguments.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use themeswitch::DEFAULT_STORAGE_KEY;

use crate::output::OutputMode;

#[derive(Debug, Parser)]
#[command(
    name = "themeswitch",
    version,
    about = "Show and cycle the light/dark/system theme preference"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Preference file (JSON object of strings)
    #[arg(long, global = true, env = "THEMESWITCH_STORE", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Key the preference is stored under
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_KEY)]
    pub key: String,

    /// Output mode
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the stored preference, device scheme and effective mode
    Status,
    /// Advance light -> dark -> system -> light and print the new status
    Cycle,
    /// Follow the operating system scheme and print every mode change
    Watch {
        /// Polling interval in milliseconds
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(50..))]
        interval_ms: u64,
    },
}

impl Cli {
    /// Resolves the preference file, defaulting to the user's config directory.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.store {
            return Ok(path.clone());
        }
        let base = dirs::config_dir()
            .context("no configuration directory on this platform; pass --store")?;
        Ok(base.join("themeswitch").join("preferences.json"))
    }
}

impl Command {
    pub fn poll_interval(&self) -> Option<Duration> {
        match self {
            Command::Watch { interval_ms } => Some(Duration::from_millis(*interval_ms)),
            _ => None,
        }
    }
}
