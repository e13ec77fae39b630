//! Output mode selection.

use clap::ValueEnum;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Styled when stdout supports color, plain otherwise
    #[default]
    Auto,
    /// Always styled
    Term,
    /// Never styled
    Text,
    /// JSON, one document per line
    Json,
}

impl OutputMode {
    pub fn should_use_color(self) -> bool {
        match self {
            OutputMode::Auto => console::colors_enabled(),
            OutputMode::Term => true,
            OutputMode::Text | OutputMode::Json => false,
        }
    }

    pub fn is_structured(self) -> bool {
        self == OutputMode::Json
    }
}
