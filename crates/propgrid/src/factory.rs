//! Widget dispatch: declared or inferred type to widget kind.
//!
//! Dispatch is evaluated in a fixed precedence (checkbox, dropdown, spinner,
//! color picker, text area, tag editor, text input). Provider-backed kinds are
//! only chosen when [`CapabilityRegistry::is_available`] says so; otherwise
//! the property falls through to the next rule and ends up as a text input.

use std::sync::Arc;

use propgrid_core::Value;

use crate::capability::{
    CapabilityRegistry, ColorPickerProvider, SpinnerOptions, SpinnerProvider, TagEditorProvider,
};
use crate::id::{ElementId, GridId};
use crate::markup;
use crate::meta::{Choice, FieldStyle, PropertyType};
use crate::resolver::PropertyDescriptor;
use crate::widget::{PostCreateInit, TagList, WidgetContent, WidgetHandle, WidgetKind};

/// A freshly created widget: its handle, its markup and an optional
/// initializer that must run once the markup is mounted.
pub struct BuiltWidget {
    pub handle: WidgetHandle,
    pub markup: String,
    pub post_create: Option<PostCreateInit>,
}

/// Dispatch outcome, carrying whatever the chosen kind needs to be built.
enum Dispatch<'a> {
    Checkbox,
    Dropdown(&'a [Choice]),
    Spinner(&'a Arc<dyn SpinnerProvider>),
    Color(&'a Arc<dyn ColorPickerProvider>),
    TextArea,
    Tags(&'a Arc<dyn TagEditorProvider>),
    TextInput,
}

impl Dispatch<'_> {
    fn kind(&self) -> WidgetKind {
        match self {
            Self::Checkbox => WidgetKind::Checkbox,
            Self::Dropdown(_) => WidgetKind::Dropdown,
            Self::Spinner(_) => WidgetKind::NumberSpinner,
            Self::Color(_) => WidgetKind::ColorPicker,
            Self::TextArea => WidgetKind::TextArea,
            Self::Tags(_) => WidgetKind::TagsEditor,
            Self::TextInput => WidgetKind::TextInput,
        }
    }
}

fn dispatch<'a>(
    descriptor: &'a PropertyDescriptor,
    capabilities: &'a CapabilityRegistry,
) -> Dispatch<'a> {
    let ty = descriptor.meta.ty;
    let value = &descriptor.value;
    let inferred = ty.is_none();

    if ty == Some(PropertyType::Boolean) || (inferred && matches!(value, Value::Bool(_))) {
        return Dispatch::Checkbox;
    }
    if ty == Some(PropertyType::Options) {
        if let Some(choices) = descriptor.meta.options.as_ref().and_then(|o| o.choices()) {
            return Dispatch::Dropdown(choices);
        }
    }
    if ty == Some(PropertyType::Number) || (inferred && matches!(value, Value::Number(_))) {
        if let Some(spinner) = capabilities.spinner() {
            return Dispatch::Spinner(spinner);
        }
        tracing::debug!(
            "no spinner provider, '{}' falls back to a text input",
            descriptor.name
        );
    }
    if ty == Some(PropertyType::Color) {
        if let Some(picker) = capabilities.color_picker() {
            return Dispatch::Color(picker);
        }
        tracing::debug!("no color picker, '{}' falls back", descriptor.name);
    }
    if ty == Some(PropertyType::TextArea) {
        return Dispatch::TextArea;
    }
    if ty == Some(PropertyType::Tags) {
        if let Some(editor) = capabilities.tag_editor() {
            return Dispatch::Tags(editor);
        }
        tracing::debug!("no tag editor, '{}' falls back", descriptor.name);
    }
    Dispatch::TextInput
}

/// Pick the widget kind for a property.
pub fn select_kind(
    descriptor: &PropertyDescriptor,
    capabilities: &CapabilityRegistry,
) -> WidgetKind {
    dispatch(descriptor, capabilities).kind()
}

/// Creates widget handles and markup for resolved properties.
pub struct WidgetFactory<'a> {
    capabilities: &'a CapabilityRegistry,
}

impl<'a> WidgetFactory<'a> {
    pub fn new(capabilities: &'a CapabilityRegistry) -> Self {
        Self { capabilities }
    }

    pub fn create(&self, grid: &GridId, descriptor: &PropertyDescriptor) -> BuiltWidget {
        let dispatched = dispatch(descriptor, self.capabilities);
        let kind = dispatched.kind();
        let id = ElementId::new(grid, &descriptor.name);
        let value = &descriptor.value;
        let meta = &descriptor.meta;
        let settings = meta.field_settings();
        let mut post_create: Option<PostCreateInit> = None;

        let (content, html) = match dispatched {
            Dispatch::Checkbox => {
                let checked = value.is_truthy();
                (
                    WidgetContent::Checked(checked),
                    markup::checkbox(&id, &descriptor.name, checked),
                )
            }
            Dispatch::Dropdown(choices) => {
                let matched = choices.iter().position(|c| &c.value == value);
                let html = markup::select(&id, choices, matched);
                // Without a match the first option is the effective selection.
                let selected = matched.or(if choices.is_empty() { None } else { Some(0) });
                (
                    WidgetContent::Choice {
                        choices: choices.to_vec(),
                        selected,
                    },
                    html,
                )
            }
            Dispatch::Spinner(spinner) => {
                let text = value.to_string();
                let options = SpinnerOptions::from_settings(settings);
                let provider = spinner.clone();
                let target = id.clone();
                post_create = Some(Box::new(move || provider.attach(&target, &options)));
                let html = markup::spinner_input(&id, &text);
                (
                    WidgetContent::Number {
                        text,
                        spinner: spinner.clone(),
                        options,
                    },
                    html,
                )
            }
            Dispatch::Color(picker) => {
                let initial = value.as_str().map(str::to_string);
                let extra = settings.map(|s| s.extra.clone()).unwrap_or_default();
                let provider = picker.clone();
                let target = id.clone();
                let seed = initial.clone();
                post_create = Some(Box::new(move || {
                    provider.attach(&target, seed.as_deref(), &extra)
                }));
                (
                    WidgetContent::Color {
                        raw: initial.unwrap_or_default(),
                        picker: picker.clone(),
                    },
                    markup::color_input(&id),
                )
            }
            Dispatch::TextArea => {
                let text = value.to_string();
                let html = markup::textarea(
                    &id,
                    &text,
                    settings.and_then(|s| s.effective_max_length()),
                );
                (
                    WidgetContent::Text {
                        text,
                        numeric: false,
                    },
                    html,
                )
            }
            Dispatch::Tags(editor) => {
                let tags = TagList::from_csv(&value.to_string());
                let initial = tags.labels().to_vec();
                let suggestions = meta.standard_tags.clone();
                let provider = editor.clone();
                let target = id.clone();
                post_create = Some(Box::new(move || {
                    provider.attach(&target, &initial, &suggestions)
                }));
                (WidgetContent::Tags(tags), markup::tags_list(&id))
            }
            Dispatch::TextInput => {
                let text = value.to_string();
                let numeric = matches!(value, Value::Number(_))
                    && matches!(meta.ty, None | Some(PropertyType::Number));
                let read_only = settings.is_some_and(|s| s.read_only);
                let style = settings.map_or(FieldStyle::Normal, |s| s.style);
                let html = markup::text_input(&id, &text, read_only, style);
                (WidgetContent::Text { text, numeric }, html)
            }
        };

        BuiltWidget {
            handle: WidgetHandle::new(kind, descriptor.name.clone(), id, content),
            markup: html,
            post_create,
        }
    }
}
