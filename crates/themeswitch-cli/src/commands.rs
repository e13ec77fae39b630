//! Subcommand implementations.

use anyhow::Context;
use std::path::Path;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use themeswitch::{FileStore, OsScheme, ThemeController};

use crate::cli::{Cli, Command};
use crate::render::{Renderer, StatusReport};
use crate::surface::TermSurface;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let store = cli.store_path()?;
    let renderer = Rc::new(Renderer::new(cli.output).context("failed to prepare output templates")?);
    tracing::debug!(store = %store.display(), key = %cli.key, "using preference store");

    match &cli.command {
        Command::Status => println!("{}", status(&store, &cli.key, &renderer)?),
        Command::Cycle => println!("{}", cycle(&store, &cli.key, &renderer)?),
        Command::Watch { .. } => {
            let interval = cli
                .command
                .poll_interval()
                .unwrap_or(Duration::from_secs(1));
            watch(&store, &cli.key, renderer, interval)?;
        }
    }
    Ok(())
}

fn open(
    store: &Path,
    key: &str,
    device: OsScheme,
    surface: TermSurface,
) -> anyhow::Result<ThemeController> {
    let mut controller = ThemeController::builder()
        .storage_key(key)
        .store(FileStore::new(store))
        .device(device)
        .surface(surface)
        .build()
        .context("failed to set up theme controller")?;
    controller.initialize();
    Ok(controller)
}

fn status(store: &Path, key: &str, renderer: &Renderer) -> anyhow::Result<String> {
    let controller = open(store, key, OsScheme::new(), TermSurface::quiet())?;
    renderer.status(&StatusReport::capture(&controller))
}

fn cycle(store: &Path, key: &str, renderer: &Renderer) -> anyhow::Result<String> {
    let controller = open(store, key, OsScheme::new(), TermSurface::quiet())?;
    controller.cycle();
    renderer.status(&StatusReport::capture(&controller))
}

fn watch(store: &Path, key: &str, renderer: Rc<Renderer>, interval: Duration) -> anyhow::Result<()> {
    let device = OsScheme::new();
    let controller = open(
        store,
        key,
        device.clone(),
        TermSurface::announcing(renderer.clone()),
    )?;
    println!("{}", renderer.status(&StatusReport::capture(&controller))?);

    if !controller.preference().follows_device() {
        tracing::info!(
            preference = %controller.preference(),
            "explicit preference set, device changes will not affect the theme"
        );
    }

    loop {
        thread::sleep(interval);
        device.poll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputMode;
    use serial_test::serial;
    use tempfile::TempDir;
    use themeswitch::{reset_scheme_detector, set_scheme_detector, ColorMode};

    fn text_renderer() -> Renderer {
        Renderer::new(OutputMode::Text).unwrap()
    }

    #[test]
    #[serial]
    fn test_status_on_fresh_store() {
        set_scheme_detector(|| ColorMode::Dark);
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("prefs.json");

        let output = status(&store, "theme", &text_renderer()).unwrap();
        assert!(output.contains("preference  system"));
        assert!(output.contains("device      dark"));
        assert!(output.contains("effective   dark"));
        assert!(!store.exists());

        reset_scheme_detector();
    }

    #[test]
    #[serial]
    fn test_cycle_walks_the_full_loop() {
        set_scheme_detector(|| ColorMode::Light);
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("prefs.json");
        let renderer = text_renderer();

        let first = cycle(&store, "theme", &renderer).unwrap();
        assert!(first.contains("preference  light"));

        let second = cycle(&store, "theme", &renderer).unwrap();
        assert!(second.contains("preference  dark"));
        assert!(second.contains("effective   dark"));

        let third = cycle(&store, "theme", &renderer).unwrap();
        assert!(third.contains("preference  system"));
        assert!(third.contains("effective   light"));

        let raw = std::fs::read_to_string(&store).unwrap();
        assert!(raw.contains("\"theme\": \"system\""));

        reset_scheme_detector();
    }

    #[test]
    #[serial]
    fn test_cycle_json_output() {
        set_scheme_detector(|| ColorMode::Light);
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("prefs.json");
        std::fs::write(&store, r#"{"site": "dark"}"#).unwrap();

        let renderer = Renderer::new(OutputMode::Json).unwrap();
        let output = cycle(&store, "site", &renderer).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["preference"], "system");
        assert_eq!(parsed["effective"], "light");

        reset_scheme_detector();
    }

    #[test]
    #[serial]
    fn test_cycle_recovers_from_corrupt_store() {
        set_scheme_detector(|| ColorMode::Light);
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("prefs.json");
        std::fs::write(&store, "{ not json").unwrap();
        let renderer = text_renderer();

        let first = cycle(&store, "theme", &renderer).unwrap();
        assert!(first.contains("preference  light"));

        let second = cycle(&store, "theme", &renderer).unwrap();
        assert!(second.contains("preference  dark"));

        let raw = std::fs::read_to_string(&store).unwrap();
        assert!(raw.contains("\"theme\": \"dark\""));

        reset_scheme_detector();
    }
}
