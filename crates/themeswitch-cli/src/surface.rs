//! Terminal surface for the theme controller.

use std::rc::Rc;

use themeswitch::{ColorMode, Indicator, ThemeSurface};

use crate::render::{ModeChange, Renderer};

/// Tracks the applied mode and, when announcing, prints each change.
///
/// A terminal has no document-wide flag to flip, so "applying" a mode means
/// reporting it.
pub struct TermSurface {
    announcer: Option<Rc<Renderer>>,
    mode: Option<ColorMode>,
}

impl TermSurface {
    /// A surface that prints nothing; the caller reports status itself.
    pub fn quiet() -> Self {
        Self {
            announcer: None,
            mode: None,
        }
    }

    /// A surface that prints a line whenever the applied mode changes.
    pub fn announcing(renderer: Rc<Renderer>) -> Self {
        Self {
            announcer: Some(renderer),
            mode: None,
        }
    }
}

impl ThemeSurface for TermSurface {
    fn apply_mode(&mut self, mode: ColorMode) {
        let previous = self.mode.replace(mode);
        let (Some(from), Some(renderer)) = (previous, &self.announcer) else {
            return;
        };
        if from == mode {
            return;
        }
        match renderer.change(&ModeChange { from, to: mode }) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "could not render mode change"),
        }
    }

    fn show_indicator(&mut self, indicator: Indicator) {
        tracing::debug!(icon = indicator.icon, label = indicator.label, "indicator updated");
    }
}
