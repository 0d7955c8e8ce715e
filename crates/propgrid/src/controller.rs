//! Change tracking, validation and dependency propagation.
//!
//! Widgets report normalized [`WidgetEvent`]s; the [`ChangeController`]
//! applies the same state machine to every kind:
//!
//! ```text
//! Clean --keystroke--> Modified --validator rejects--> Invalid
//! Invalid --validator accepts--> Modified --commit + clear--> Clean
//! ```
//!
//! Only widgets whose metadata carries a change callback are bound. Tag
//! editors are the exception: their tag notifications are always handled so
//! the tag list stays in sync, with the callback invoked when present.

use indexmap::IndexMap;
use propgrid_core::Value;

use crate::id::ElementId;
use crate::meta::{ChangeCallback, PropertyMeta, TagValidator, TransformFn, Validator};
use crate::warning::TransientWarnings;
use crate::widget::{ClearModified, StateFlags, TagAction, WidgetHandle, WidgetKind};

/// A key reported by a keystroke event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Backspace,
    Tab,
    Enter,
    Shift,
    Control,
    Alt,
    Pause,
    CapsLock,
    Escape,
    PageUp,
    PageDown,
    End,
    Home,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    PrintScreen,
    Insert,
    Delete,
    Function(u8),
}

impl Key {
    /// Navigation and control keys never mark a widget as modified.
    pub fn is_navigation(&self) -> bool {
        !matches!(self, Key::Char(_) | Key::Backspace | Key::Function(_))
    }
}

/// Normalized widget event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The widget's value was finalized (blur, selection commit).
    Commit,
    /// A key was released; the widget already holds the resulting text.
    KeyInput(Key),
    /// A character is about to be admitted; the widget still holds the
    /// text before insertion.
    KeyPress(char),
    /// The tag editor's tag list changed.
    TagsChanged { tag: String, action: TagAction },
}

/// Text length used for max-length checks: characters plus one extra unit
/// per line-break sequence (`\r\n`, `\n` or `\r`).
pub fn effective_length(text: &str) -> usize {
    let mut breaks = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                breaks += 1;
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' => breaks += 1,
            _ => {}
        }
    }
    text.chars().count() + breaks
}

/// Per-widget wiring derived from its metadata.
struct Binding {
    element_id: ElementId,
    kind: WidgetKind,
    callback: Option<ChangeCallback>,
    validator: Option<Validator>,
    max_length: Option<usize>,
    id_dependency: Option<String>,
    transform: Option<TransformFn>,
    tag_validator: Option<TagValidator>,
    /// The first tag notification echoes initialization and is skipped.
    tags_initialized: bool,
}

/// Dispatches widget events to change tracking, validation and propagation.
#[derive(Default)]
pub struct ChangeController {
    bindings: IndexMap<String, Binding>,
}

impl ChangeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire `widget` according to `meta`. Returns whether a binding was made.
    pub fn bind(&mut self, widget: &WidgetHandle, meta: &PropertyMeta) -> bool {
        if meta.change_callback.is_none() && widget.kind() != WidgetKind::TagsEditor {
            return false;
        }
        let settings = meta.field_settings();
        self.bindings.insert(
            widget.name().to_string(),
            Binding {
                element_id: widget.element_id().clone(),
                kind: widget.kind(),
                callback: meta.change_callback.clone(),
                validator: settings.and_then(|s| s.validator.clone()),
                max_length: settings.and_then(|s| s.effective_max_length()),
                id_dependency: settings.and_then(|s| s.id_dependency.clone()),
                transform: meta.transform_value.clone(),
                tag_validator: meta.tag_validator.clone(),
                tags_initialized: false,
            },
        );
        true
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Handle `event` on the widget of property `name`.
    pub fn handle(
        &mut self,
        name: &str,
        event: &WidgetEvent,
        widgets: &mut IndexMap<String, WidgetHandle>,
        warnings: &mut TransientWarnings,
    ) {
        if *event == WidgetEvent::Commit {
            if let Some(widget) = widgets.get_mut(name) {
                widget.normalize_spinner();
            }
        }

        let Some(binding) = self.bindings.get_mut(name) else {
            return;
        };
        tracing::trace!("{}: {:?}", binding.element_id, event);

        match event {
            WidgetEvent::Commit => commit(name, binding, widgets),
            WidgetEvent::KeyInput(key) => key_input(name, *key, binding, widgets, warnings),
            WidgetEvent::KeyPress(_) => key_press(name, binding, widgets, warnings),
            WidgetEvent::TagsChanged { tag, action } => {
                tags_changed(name, tag, *action, binding, widgets)
            }
        }
    }
}

fn commit(name: &str, binding: &Binding, widgets: &IndexMap<String, WidgetHandle>) {
    let Some(callback) = &binding.callback else {
        return;
    };
    let Some(widget) = widgets.get(name) else {
        return;
    };

    let mut targets = vec![widget.flags_handle()];
    if let Some(target) = binding
        .id_dependency
        .as_deref()
        .and_then(|selector| find_dependency(widgets, selector))
        .and_then(|dep| widgets.get(&dep))
    {
        targets.push(target.flags_handle());
    }

    let value = widget.value();
    callback(
        widget.element_id(),
        name,
        &value,
        ClearModified::new(targets),
    );
}

fn key_input(
    name: &str,
    key: Key,
    binding: &Binding,
    widgets: &mut IndexMap<String, WidgetHandle>,
    warnings: &mut TransientWarnings,
) {
    if binding.callback.is_none() || key.is_navigation() {
        return;
    }
    let Some(widget) = widgets.get(name) else {
        return;
    };
    widget.insert_flags(StateFlags::MODIFIED);
    let text = widget.raw_text().unwrap_or_default();

    if let Some(max) = binding.max_length {
        check_max_length(&text, max, &binding.element_id, warnings);
    }

    if let Some(validator) = &binding.validator {
        match validator(&text) {
            Some(message) => {
                widget.insert_flags(StateFlags::INVALID);
                warnings.trigger(&binding.element_id, &message);
                return;
            }
            None => widget.remove_flags(StateFlags::INVALID),
        }
    }

    let Some(selector) = &binding.id_dependency else {
        return;
    };
    let Some(dep) = find_dependency(widgets, selector) else {
        tracing::debug!("dependency '{}' of '{}' is not in this grid", selector, name);
        return;
    };
    if dep == name {
        return;
    }
    let Some(target) = widgets.get_mut(&dep) else {
        return;
    };
    if target.raw_text().is_none() {
        return;
    }
    let Some(transform) = &binding.transform else {
        return;
    };
    let propagated = transform(&text);
    if propagated.is_empty() {
        return;
    }
    target.set_text(&propagated);
    target.insert_flags(StateFlags::MODIFIED);
}

fn key_press(
    name: &str,
    binding: &Binding,
    widgets: &IndexMap<String, WidgetHandle>,
    warnings: &mut TransientWarnings,
) {
    if binding.callback.is_none() {
        return;
    }
    let Some(widget) = widgets.get(name) else {
        return;
    };
    if let Some(max) = binding.max_length {
        let text = widget.raw_text().unwrap_or_default();
        check_max_length(&text, max, &binding.element_id, warnings);
    }
    widget.insert_flags(StateFlags::MODIFIED);
}

fn tags_changed(
    name: &str,
    tag: &str,
    action: TagAction,
    binding: &mut Binding,
    widgets: &mut IndexMap<String, WidgetHandle>,
) {
    if binding.kind != WidgetKind::TagsEditor {
        return;
    }
    if !binding.tags_initialized {
        binding.tags_initialized = true;
        return;
    }
    let Some(widget) = widgets.get_mut(name) else {
        return;
    };
    let Some(tags) = widget.tags_mut() else {
        return;
    };
    match action {
        TagAction::Added => {
            tags.add(tag);
        }
        TagAction::Removed => {
            tags.remove(tag);
        }
    }
    if let Some(validator) = &binding.tag_validator {
        validator(tag, tags, action);
    }
    let csv = tags.to_csv();
    widget.insert_flags(StateFlags::MODIFIED);

    if let Some(callback) = &binding.callback {
        callback(
            widget.element_id(),
            name,
            &Value::String(csv),
            ClearModified::new(vec![widget.flags_handle()]),
        );
    }
}

fn check_max_length(text: &str, max: usize, element: &ElementId, warnings: &mut TransientWarnings) {
    if effective_length(text) >= max {
        warnings.trigger(element, &format!("Maximum {} characters allowed", max));
    }
}

/// Resolve a dependency selector to a property name: `#id`, a bare element
/// id, or a property name.
fn find_dependency(widgets: &IndexMap<String, WidgetHandle>, selector: &str) -> Option<String> {
    widgets
        .values()
        .find(|w| w.element_id().matches(selector) || w.name() == selector)
        .map(|w| w.name().to_string())
}
