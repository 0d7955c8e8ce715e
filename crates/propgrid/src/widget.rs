//! Widget handles: one per rendered property.
//!
//! A [`WidgetHandle`] owns the element identity, the live widget content and
//! the change-tracking flags of a property. Value retrieval goes through
//! [`WidgetHandle::value`] rather than a captured element reference.

use std::fmt;
use std::sync::{Arc, Weak};

use bitflags::bitflags;
use parking_lot::Mutex;
use propgrid_core::Value;

use crate::capability::{ColorPickerProvider, SpinnerOptions, SpinnerProvider};
use crate::error::{GridError, GridResult};
use crate::id::ElementId;
use crate::meta::Choice;

/// The editing widget selected for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Checkbox,
    Dropdown,
    NumberSpinner,
    ColorPicker,
    TextArea,
    TagsEditor,
    TextInput,
}

impl WidgetKind {
    /// Whether the widget is edited as free text.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::NumberSpinner | Self::ColorPicker | Self::TextArea | Self::TextInput
        )
    }
}

bitflags! {
    /// Change-tracking flags of a widget.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u8 {
        /// Edited since the last acknowledged commit.
        const MODIFIED = 1 << 0;
        /// The validator rejected the current text.
        const INVALID  = 1 << 1;
    }
}

/// Observable widget state derived from [`StateFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetState {
    Clean,
    Modified,
    Invalid,
}

impl StateFlags {
    pub fn state(&self) -> WidgetState {
        if self.contains(Self::INVALID) {
            WidgetState::Invalid
        } else if self.contains(Self::MODIFIED) {
            WidgetState::Modified
        } else {
            WidgetState::Clean
        }
    }
}

/// Handed to a change callback; invoking it returns the committed widget
/// (and its dependency target, if any) from Modified to Clean.
///
/// Holds weak references only, so a stored callback does not keep a
/// discarded grid alive.
#[derive(Clone)]
pub struct ClearModified {
    targets: Vec<Weak<Mutex<StateFlags>>>,
}

impl ClearModified {
    pub(crate) fn new(targets: Vec<Weak<Mutex<StateFlags>>>) -> Self {
        Self { targets }
    }

    pub fn clear(&self) {
        for flags in self.targets.iter().filter_map(Weak::upgrade) {
            flags.lock().remove(StateFlags::MODIFIED);
        }
    }
}

impl fmt::Debug for ClearModified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearModified")
            .field("targets", &self.targets.len())
            .finish()
    }
}

/// What happened to a tag in a tag editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagAction {
    Added,
    Removed,
}

/// Ordered tag labels of a tag editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<String>);

impl TagList {
    /// Split a comma-separated value, dropping empty segments.
    pub fn from_csv(csv: &str) -> Self {
        Self(
            csv.split(',')
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Append `tag` unless already present.
    pub fn add(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.is_empty() || self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Deferred initialization of a provider-backed widget, run once after mount.
pub type PostCreateInit = Box<dyn FnOnce() + Send>;

/// Live content of a widget.
pub(crate) enum WidgetContent {
    Checked(bool),
    Choice {
        choices: Vec<Choice>,
        selected: Option<usize>,
    },
    Number {
        text: String,
        spinner: Arc<dyn SpinnerProvider>,
        options: SpinnerOptions,
    },
    Color {
        raw: String,
        picker: Arc<dyn ColorPickerProvider>,
    },
    /// Text inputs and text areas. `numeric` marks a number that fell back
    /// to a text input, so the collected value stays a number.
    Text { text: String, numeric: bool },
    Tags(TagList),
}

/// The editing widget bound to one property.
pub struct WidgetHandle {
    kind: WidgetKind,
    name: String,
    element_id: ElementId,
    content: WidgetContent,
    flags: Arc<Mutex<StateFlags>>,
}

impl WidgetHandle {
    pub(crate) fn new(
        kind: WidgetKind,
        name: impl Into<String>,
        element_id: ElementId,
        content: WidgetContent,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            element_id,
            content,
            flags: Arc::new(Mutex::new(StateFlags::empty())),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    pub fn flags(&self) -> StateFlags {
        *self.flags.lock()
    }

    pub fn state(&self) -> WidgetState {
        self.flags().state()
    }

    pub(crate) fn insert_flags(&self, flags: StateFlags) {
        self.flags.lock().insert(flags);
    }

    pub(crate) fn remove_flags(&self, flags: StateFlags) {
        self.flags.lock().remove(flags);
    }

    pub(crate) fn flags_handle(&self) -> Weak<Mutex<StateFlags>> {
        Arc::downgrade(&self.flags)
    }

    /// Current value, read from the live widget.
    pub fn value(&self) -> Value {
        match &self.content {
            WidgetContent::Checked(checked) => Value::Bool(*checked),
            WidgetContent::Choice { choices, selected } => selected
                .and_then(|i| choices.get(i))
                .map_or(Value::Null, |c| c.value.clone()),
            WidgetContent::Number { text, spinner, .. } => {
                spinner.parse(text).map_or(Value::Null, Value::Number)
            }
            WidgetContent::Color { raw, picker } => Value::String(picker.to_rgb_string(raw)),
            WidgetContent::Text { text, numeric } => {
                if *numeric {
                    if let Ok(n) = text.trim().parse::<f64>() {
                        return Value::Number(n);
                    }
                }
                Value::String(text.clone())
            }
            WidgetContent::Tags(tags) => Value::String(tags.to_csv()),
        }
    }

    /// The element's raw text value; `None` when nothing is selected.
    pub fn raw_text(&self) -> Option<String> {
        match &self.content {
            WidgetContent::Checked(checked) => Some(checked.to_string()),
            WidgetContent::Choice { choices, selected } => selected
                .and_then(|i| choices.get(i))
                .map(|c| c.value.to_string()),
            WidgetContent::Number { text, .. } => Some(text.clone()),
            WidgetContent::Color { raw, .. } => Some(raw.clone()),
            WidgetContent::Text { text, .. } => Some(text.clone()),
            WidgetContent::Tags(tags) => Some(tags.to_csv()),
        }
    }

    /// Write text into the widget the way setting an element's value would.
    ///
    /// Checkboxes read `"true"`, dropdowns select the option whose value text
    /// matches (clearing the selection otherwise) and tag editors split on `,`.
    pub fn set_text(&mut self, text: &str) {
        match &mut self.content {
            WidgetContent::Checked(checked) => *checked = text == "true",
            WidgetContent::Choice { choices, selected } => {
                *selected = choices.iter().position(|c| c.value.to_string() == text);
            }
            WidgetContent::Number { text: t, .. }
            | WidgetContent::Color { raw: t, .. }
            | WidgetContent::Text { text: t, .. } => {
                t.clear();
                t.push_str(text);
            }
            WidgetContent::Tags(tags) => *tags = TagList::from_csv(text),
        }
    }

    /// Edit the text of a free-text widget in place.
    pub fn edit_text(&mut self, edit: impl FnOnce(&mut String)) -> GridResult<()> {
        match &mut self.content {
            WidgetContent::Number { text, .. }
            | WidgetContent::Color { raw: text, .. }
            | WidgetContent::Text { text, .. } => {
                edit(text);
                Ok(())
            }
            _ => Err(self.mismatch()),
        }
    }

    pub fn set_checked(&mut self, value: bool) -> GridResult<()> {
        match &mut self.content {
            WidgetContent::Checked(checked) => {
                *checked = value;
                Ok(())
            }
            _ => Err(self.mismatch()),
        }
    }

    /// Select the dropdown option whose value equals `value`.
    ///
    /// Returns `false` and keeps the current selection when no option matches.
    pub fn select(&mut self, value: &Value) -> GridResult<bool> {
        match &mut self.content {
            WidgetContent::Choice { choices, selected } => {
                match choices.iter().position(|c| &c.value == value) {
                    Some(i) => {
                        *selected = Some(i);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            _ => Err(self.mismatch()),
        }
    }

    pub fn tags(&self) -> Option<&TagList> {
        match &self.content {
            WidgetContent::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    pub fn tags_mut(&mut self) -> Option<&mut TagList> {
        match &mut self.content {
            WidgetContent::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    /// Options of a dropdown, in display order.
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.content {
            WidgetContent::Choice { choices, .. } => Some(choices),
            _ => None,
        }
    }

    /// Apply the spinner's change rules: unparsable text is emptied and the
    /// value is clamped into the configured range.
    pub(crate) fn normalize_spinner(&mut self) {
        if let WidgetContent::Number {
            text,
            spinner,
            options,
        } = &mut self.content
        {
            match spinner.parse(text) {
                None => text.clear(),
                Some(n) => {
                    let clamped = options.clamp(n);
                    if clamped != n {
                        *text = Value::Number(clamped).to_string();
                    }
                }
            }
        }
    }

    fn mismatch(&self) -> GridError {
        GridError::KindMismatch {
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

impl fmt::Debug for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetHandle")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("element_id", &self.element_id)
            .field("state", &self.state())
            .finish()
    }
}
