//! A mounted grid instance.

use indexmap::IndexMap;
use propgrid_core::Value;

use crate::assembler::{AssembledGrid, Group};
use crate::controller::{ChangeController, Key, WidgetEvent};
use crate::error::{GridError, GridResult};
use crate::id::GridId;
use crate::values::{ValueCollector, ValueMap};
use crate::warning::TransientWarnings;
use crate::widget::{TagAction, WidgetHandle, WidgetKind, WidgetState};

/// A rendered grid: its markup, its widgets and their change wiring.
///
/// Created on every render and owned by the host container; replaced by the
/// next render of the same container.
pub struct GridInstance {
    id: GridId,
    markup: String,
    groups: Vec<Group>,
    widgets: IndexMap<String, WidgetHandle>,
    controller: ChangeController,
    warnings: TransientWarnings,
}

impl GridInstance {
    /// Mount an assembled grid.
    ///
    /// Provider initializers run first, each exactly once and in emission
    /// order, then change wiring is bound, so provider widgets are live
    /// before any event handling.
    pub(crate) fn mount(assembled: AssembledGrid, warnings: TransientWarnings) -> Self {
        let AssembledGrid {
            id,
            markup,
            groups,
            widgets,
            post_create,
            bindings,
        } = assembled;

        for init in post_create {
            init();
        }

        let mut controller = ChangeController::new();
        for pending in &bindings {
            if let Some(widget) = widgets.get(&pending.name) {
                controller.bind(widget, &pending.meta);
            }
        }

        Self {
            id,
            markup,
            groups,
            widgets,
            controller,
            warnings,
        }
    }

    pub fn id(&self) -> &GridId {
        &self.id
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn widget(&self, name: &str) -> Option<&WidgetHandle> {
        self.widgets.get(name)
    }

    pub fn widgets(&self) -> impl Iterator<Item = &WidgetHandle> {
        self.widgets.values()
    }

    pub fn state(&self, name: &str) -> Option<WidgetState> {
        self.widgets.get(name).map(WidgetHandle::state)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.controller.is_bound(name)
    }

    pub fn warnings(&self) -> &TransientWarnings {
        &self.warnings
    }

    /// Current values of every widget.
    pub fn get_values(&self) -> ValueMap {
        ValueCollector::collect(&self.widgets)
    }

    /// Deliver an event to the widget of property `name`.
    pub fn dispatch(&mut self, name: &str, event: WidgetEvent) -> GridResult<()> {
        if !self.widgets.contains_key(name) {
            return Err(GridError::UnknownProperty(name.to_string()));
        }
        self.controller
            .handle(name, &event, &mut self.widgets, &mut self.warnings);
        Ok(())
    }

    pub fn commit(&mut self, name: &str) -> GridResult<()> {
        self.dispatch(name, WidgetEvent::Commit)
    }

    /// Simulate one keystroke: key press, text edit, key release.
    ///
    /// Characters are inserted at the end of the text, backspace removes the
    /// last character and enter inserts a line break into text areas.
    pub fn type_key(&mut self, name: &str, key: Key) -> GridResult<()> {
        let kind = self.widget_mut(name)?.kind();
        if !kind.is_textual() {
            return Err(GridError::KindMismatch {
                name: name.to_string(),
                kind,
            });
        }
        let inserted = match key {
            Key::Char(c) => Some(c),
            Key::Enter if kind == WidgetKind::TextArea => Some('\n'),
            _ => None,
        };

        if let Some(c) = inserted {
            self.dispatch(name, WidgetEvent::KeyPress(c))?;
            self.widget_mut(name)?.edit_text(|text| text.push(c))?;
        } else if key == Key::Backspace {
            self.widget_mut(name)?.edit_text(|text| {
                text.pop();
            })?;
        }
        self.dispatch(name, WidgetEvent::KeyInput(key))
    }

    /// Type `text` one keystroke at a time; `\n` is typed as enter.
    pub fn type_text(&mut self, name: &str, text: &str) -> GridResult<()> {
        for c in text.chars() {
            let key = if c == '\n' { Key::Enter } else { Key::Char(c) };
            self.type_key(name, key)?;
        }
        Ok(())
    }

    /// Replace the widget's text without raising events.
    pub fn set_text(&mut self, name: &str, text: &str) -> GridResult<()> {
        self.widget_mut(name)?.set_text(text);
        Ok(())
    }

    /// Toggle a checkbox and commit it.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> GridResult<()> {
        self.widget_mut(name)?.set_checked(checked)?;
        self.commit(name)
    }

    /// Select a dropdown option and commit it. Returns `false` (without
    /// committing) when no option has that value.
    pub fn select(&mut self, name: &str, value: &Value) -> GridResult<bool> {
        if !self.widget_mut(name)?.select(value)? {
            return Ok(false);
        }
        self.commit(name)?;
        Ok(true)
    }

    /// Report a tag editor change.
    pub fn tags_changed(&mut self, name: &str, tag: &str, action: TagAction) -> GridResult<()> {
        self.dispatch(
            name,
            WidgetEvent::TagsChanged {
                tag: tag.to_string(),
                action,
            },
        )
    }

    /// Advance transient warnings by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) {
        self.warnings.update(delta_time);
    }

    fn widget_mut(&mut self, name: &str) -> GridResult<&mut WidgetHandle> {
        self.widgets
            .get_mut(name)
            .ok_or_else(|| GridError::UnknownProperty(name.to_string()))
    }
}

impl std::fmt::Debug for GridInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridInstance")
            .field("id", &self.id)
            .field("groups", &self.groups.len())
            .field("widgets", &self.widgets.len())
            .finish()
    }
}
