//! Recording mock implementations of the provider traits.
//!
//! Every mock records the calls it receives so tests can assert on which
//! widgets were initialized and which messages were shown.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use propgrid::{
    ColorPickerProvider, ElementId, MessageDisplay, SpinnerOptions, SpinnerProvider,
    TagEditorProvider, Value,
};

/// A provider call recorded for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    AttachSpinner {
        element: String,
        options: SpinnerOptions,
    },
    AttachColorPicker {
        element: String,
        initial: Option<String>,
        settings: Vec<(String, Value)>,
    },
    AttachTagEditor {
        element: String,
        initial: Vec<String>,
        suggestions: Vec<String>,
    },
}

impl ProviderCall {
    /// Element the call targeted.
    pub fn element(&self) -> &str {
        match self {
            Self::AttachSpinner { element, .. }
            | Self::AttachColorPicker { element, .. }
            | Self::AttachTagEditor { element, .. } => element,
        }
    }
}

/// A message display call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageCall {
    Show { element: String, message: String },
    Hide { element: String },
}

/// Provider call log. Mocks built with `with_log` share one log, which
/// records the order of attachments across providers.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<Vec<ProviderCall>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().push(call);
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().clone()
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn count_matching(&self, pred: impl Fn(&ProviderCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| pred(call)).count()
    }

    /// Elements in the order they were attached.
    pub fn attached_elements(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|call| call.element().to_string())
            .collect()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

/// Mock spinner that records attachments and parses with the default rules.
#[derive(Debug, Default)]
pub struct MockSpinner {
    log: Arc<CallLog>,
}

impl MockSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: Arc<CallLog>) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Count spinner attachments.
    pub fn count_attaches(&self) -> usize {
        self.log
            .count_matching(|call| matches!(call, ProviderCall::AttachSpinner { .. }))
    }

    /// Options passed for `element`, if it was attached.
    pub fn options_for(&self, element: &str) -> Option<SpinnerOptions> {
        self.log.calls().into_iter().find_map(|call| match call {
            ProviderCall::AttachSpinner { element: e, options } if e == element => Some(options),
            _ => None,
        })
    }
}

impl SpinnerProvider for MockSpinner {
    fn attach(&self, element: &ElementId, options: &SpinnerOptions) {
        self.log.record(ProviderCall::AttachSpinner {
            element: element.to_string(),
            options: *options,
        });
    }
}

/// Mock color picker.
///
/// Serializes `#rrggbb` and `#rgb` hex colors as `rgb(r, g, b)`; anything
/// else is returned unchanged.
#[derive(Debug, Default)]
pub struct MockColorPicker {
    log: Arc<CallLog>,
}

impl MockColorPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: Arc<CallLog>) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Count color picker attachments.
    pub fn count_attaches(&self) -> usize {
        self.log
            .count_matching(|call| matches!(call, ProviderCall::AttachColorPicker { .. }))
    }

    /// Seed color passed for `element`.
    pub fn initial_for(&self, element: &str) -> Option<String> {
        self.log.calls().into_iter().find_map(|call| match call {
            ProviderCall::AttachColorPicker {
                element: e,
                initial,
                ..
            } if e == element => initial,
            _ => None,
        })
    }
}

impl ColorPickerProvider for MockColorPicker {
    fn attach(
        &self,
        element: &ElementId,
        initial: Option<&str>,
        settings: &IndexMap<String, Value>,
    ) {
        self.log.record(ProviderCall::AttachColorPicker {
            element: element.to_string(),
            initial: initial.map(str::to_string),
            settings: settings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        });
    }

    fn to_rgb_string(&self, raw: &str) -> String {
        match parse_hex(raw) {
            Some((r, g, b)) => format!("rgb({}, {}, {})", r, g, b),
            None => raw.to_string(),
        }
    }
}

fn parse_hex(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 17);
            Some((digit(0).ok()?, digit(1).ok()?, digit(2).ok()?))
        }
        _ => None,
    }
}

/// Mock tag editor.
#[derive(Debug, Default)]
pub struct MockTagEditor {
    log: Arc<CallLog>,
}

impl MockTagEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log(log: Arc<CallLog>) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Count tag editor attachments.
    pub fn count_attaches(&self) -> usize {
        self.log
            .count_matching(|call| matches!(call, ProviderCall::AttachTagEditor { .. }))
    }
}

impl TagEditorProvider for MockTagEditor {
    fn attach(&self, element: &ElementId, initial: &[String], suggestions: &[String]) {
        self.log.record(ProviderCall::AttachTagEditor {
            element: element.to_string(),
            initial: initial.to_vec(),
            suggestions: suggestions.to_vec(),
        });
    }
}

/// Message display that records every show and hide.
#[derive(Debug, Default)]
pub struct RecordingMessageDisplay {
    calls: Mutex<Vec<MessageCall>>,
}

impl RecordingMessageDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<MessageCall> {
        self.calls.lock().clone()
    }

    /// Count messages shown.
    pub fn count_shows(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, MessageCall::Show { .. }))
            .count()
    }

    /// Count messages hidden.
    pub fn count_hides(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, MessageCall::Hide { .. }))
            .count()
    }

    /// Messages shown for `element`, in order.
    pub fn messages_for(&self, element: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                MessageCall::Show { element: e, message } if e == element => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl MessageDisplay for RecordingMessageDisplay {
    fn show(&self, element: &ElementId, message: &str) {
        self.calls.lock().push(MessageCall::Show {
            element: element.to_string(),
            message: message.to_string(),
        });
    }

    fn hide(&self, element: &ElementId) {
        self.calls.lock().push(MessageCall::Hide {
            element: element.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        let picker = MockColorPicker::new();
        assert_eq!(picker.to_rgb_string("#ff0000"), "rgb(255, 0, 0)");
        assert_eq!(picker.to_rgb_string("#0f0"), "rgb(0, 255, 0)");
        assert_eq!(picker.to_rgb_string("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(picker.to_rgb_string(""), "");
    }

    #[test]
    fn test_shared_log_counts_per_provider() {
        let log = Arc::new(CallLog::new());
        let spinner = MockSpinner::with_log(log.clone());
        let picker = MockColorPicker::with_log(log.clone());
        let tags = MockTagEditor::with_log(log.clone());
        let grid = propgrid::id::IdAllocator::default().allocate();

        spinner.attach(&ElementId::new(&grid, "n"), &SpinnerOptions::default());
        tags.attach(&ElementId::new(&grid, "t"), &[], &[]);

        assert_eq!(log.call_count(), 2);
        assert_eq!(spinner.count_attaches(), 1);
        assert_eq!(tags.count_attaches(), 1);
        assert_eq!(picker.count_attaches(), 0);
        assert_eq!(log.attached_elements(), vec!["pg0n", "pg0t"]);
    }

    #[test]
    fn test_message_counts() {
        let display = RecordingMessageDisplay::new();
        let element = ElementId::new(&propgrid::id::IdAllocator::default().allocate(), "a");
        display.show(&element, "too long");
        display.hide(&element);
        display.hide(&element);

        assert_eq!(display.count_shows(), 1);
        assert_eq!(display.count_hides(), 2);
        assert_eq!(display.messages_for("pg0a"), vec!["too long"]);
        display.clear_calls();
        assert!(display.calls().is_empty());
    }
}
