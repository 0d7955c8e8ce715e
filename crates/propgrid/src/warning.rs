//! Transient warning messages anchored to widgets.
//!
//! A warning is shown through the configured [`MessageDisplay`] and dismissed
//! once its display window has elapsed. Triggering a warning for an element
//! that is already showing one re-arms the same window; nothing is cancelled.
//!
//! Time is advanced explicitly with [`TransientWarnings::update`], the same
//! way animations are ticked with a frame delta.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::capability::MessageDisplay;
use crate::id::ElementId;

/// A warning currently on screen.
#[derive(Debug, Clone)]
struct ActiveWarning {
    message: String,
    /// Seconds until dismissal.
    remaining: f32,
}

/// Shows and auto-dismisses warnings for one grid.
pub struct TransientWarnings {
    display: Option<Arc<dyn MessageDisplay>>,
    duration: f32,
    active: IndexMap<ElementId, ActiveWarning>,
    shown: usize,
}

impl TransientWarnings {
    pub fn new(display: Option<Arc<dyn MessageDisplay>>, duration: Duration) -> Self {
        Self {
            display,
            duration: duration.as_secs_f32(),
            active: IndexMap::new(),
            shown: 0,
        }
    }

    /// Show `message` next to `element` and arm its dismissal.
    pub fn trigger(&mut self, element: &ElementId, message: &str) {
        match &self.display {
            Some(display) => display.show(element, message),
            None => tracing::warn!("{}: {}", element, message),
        }
        self.shown += 1;
        self.active.insert(
            element.clone(),
            ActiveWarning {
                message: message.to_string(),
                remaining: self.duration,
            },
        );
    }

    /// Advance time by `delta_time` seconds, hiding expired warnings.
    pub fn update(&mut self, delta_time: f32) {
        let display = self.display.clone();
        self.active.retain(|element, warning| {
            warning.remaining -= delta_time;
            if warning.remaining > 0.0 {
                return true;
            }
            if let Some(display) = &display {
                display.hide(element);
            }
            false
        });
    }

    pub fn is_showing(&self, element: &ElementId) -> bool {
        self.active.contains_key(element)
    }

    /// Message currently shown for `element`.
    pub fn message(&self, element: &ElementId) -> Option<&str> {
        self.active.get(element).map(|w| w.message.as_str())
    }

    /// Total number of warnings triggered so far.
    pub fn shown_count(&self) -> usize {
        self.shown
    }
}
