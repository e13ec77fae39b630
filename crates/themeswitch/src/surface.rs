//! Rendering targets for the effective mode and the toggle indicator.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::preference::{ColorMode, Indicator};

/// Where the controller renders its state.
///
/// All page (or terminal) styling keys off the single mode passed to
/// [`apply_mode`](Self::apply_mode); the indicator is the toggle control's
/// content.
pub trait ThemeSurface {
    /// Switches the document-wide dark flag on or off.
    fn apply_mode(&mut self, mode: ColorMode);

    /// Updates the toggle control's icon and accessible label.
    fn show_indicator(&mut self, indicator: Indicator);

    /// Plays a short, self-reverting acknowledgment after a toggle.
    ///
    /// Purely cosmetic; surfaces without animation can ignore it.
    fn acknowledge(&mut self, _duration: Duration) {}
}

/// One call observed by a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Mode(ColorMode),
    Indicator(Indicator),
    Acknowledged(Duration),
}

#[derive(Debug, Default)]
struct Record {
    mode: Option<ColorMode>,
    indicator: Option<Indicator>,
    events: Vec<SurfaceEvent>,
}

/// A surface that remembers what was rendered.
///
/// Clones share the record. Useful in tests, and for hosts that read the
/// state back and render it themselves.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    record: Rc<RefCell<Record>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently applied mode, if any.
    pub fn mode(&self) -> Option<ColorMode> {
        self.record.borrow().mode
    }

    /// Whether dark mode is currently applied.
    pub fn is_dark(&self) -> bool {
        self.mode().is_some_and(ColorMode::is_dark)
    }

    /// The most recently shown indicator, if any.
    pub fn indicator(&self) -> Option<Indicator> {
        self.record.borrow().indicator
    }

    /// Every call received, oldest first.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.record.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.record.borrow_mut().events.clear();
    }
}

impl ThemeSurface for RecordingSurface {
    fn apply_mode(&mut self, mode: ColorMode) {
        let mut record = self.record.borrow_mut();
        record.mode = Some(mode);
        record.events.push(SurfaceEvent::Mode(mode));
    }

    fn show_indicator(&mut self, indicator: Indicator) {
        let mut record = self.record.borrow_mut();
        record.indicator = Some(indicator);
        record.events.push(SurfaceEvent::Indicator(indicator));
    }

    fn acknowledge(&mut self, duration: Duration) {
        self.record
            .borrow_mut()
            .events
            .push(SurfaceEvent::Acknowledged(duration));
    }
}
