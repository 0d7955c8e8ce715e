//! Per-property metadata.
//!
//! Metadata is optional for every property; absent fields fall back to
//! inference from the runtime value. Shapes that do not fit the declared type
//! (for example an `Options` property whose options are not a choice list)
//! are treated as absent rather than rejected.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use propgrid_core::Value;

use crate::id::ElementId;
use crate::widget::{ClearModified, TagAction, TagList};

/// Receives committed values: `(element_id, property_name, new_value, clear_modified)`.
pub type ChangeCallback = Arc<dyn Fn(&ElementId, &str, &Value, ClearModified) + Send + Sync>;

/// Returns a message when the current text is rejected.
pub type Validator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Maps a source field's text to the text pushed into its dependent field.
pub type TransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Inspects (and may edit) the tag list after a tag was added or removed.
pub type TagValidator = Arc<dyn Fn(&str, &mut TagList, TagAction) + Send + Sync>;

/// Declared property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Boolean,
    Options,
    Number,
    Color,
    TextArea,
    Tags,
}

impl PropertyType {
    /// Parse a lowercase type name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "options" => Some(Self::Options),
            "number" => Some(Self::Number),
            "color" => Some(Self::Color),
            "textarea" => Some(Self::TextArea),
            "tags" => Some(Self::Tags),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Options => "options",
            Self::Number => "number",
            Self::Color => "color",
            Self::TextArea => "textarea",
            Self::Tags => "tags",
        }
    }
}

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: Value,
    pub text: String,
}

impl Choice {
    pub fn new(value: impl Into<Value>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }

    /// A scalar choice whose text is its own value.
    pub fn scalar(value: impl Into<Value>) -> Self {
        let value = value.into();
        let text = value.to_string();
        Self { value, text }
    }
}

impl From<&str> for Choice {
    fn from(s: &str) -> Self {
        Choice::scalar(s)
    }
}

/// Visual width of a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStyle {
    #[default]
    Normal,
    Large,
}

/// Object-form options.
#[derive(Clone, Default)]
pub struct FieldSettings {
    /// Maximum text length; `0` means unconstrained.
    pub max_length: Option<usize>,
    pub validator: Option<Validator>,
    /// Element id (or `#id` selector, or property name) of the dependent field.
    pub id_dependency: Option<String>,
    pub read_only: bool,
    pub style: FieldStyle,
    /// Provider-specific configuration (spinner `min`/`max`/`step`, color picker settings).
    pub extra: IndexMap<String, Value>,
}

impl FieldSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn validator(mut self, f: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(f));
        self
    }

    pub fn id_dependency(mut self, target: impl Into<String>) -> Self {
        self.id_dependency = Some(target.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn style(mut self, style: FieldStyle) -> Self {
        self.style = style;
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The configured maximum, ignoring a zero limit.
    pub fn effective_max_length(&self) -> Option<usize> {
        self.max_length.filter(|max| *max > 0)
    }

    pub fn extra_f64(&self, key: &str) -> Option<f64> {
        self.extra.get(key).and_then(Value::as_f64)
    }
}

impl fmt::Debug for FieldSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSettings")
            .field("max_length", &self.max_length)
            .field("validator", &self.validator.is_some())
            .field("id_dependency", &self.id_dependency)
            .field("read_only", &self.read_only)
            .field("style", &self.style)
            .field("extra", &self.extra)
            .finish()
    }
}

/// The `options` entry of a property's metadata.
#[derive(Debug, Clone)]
pub enum PropertyOptions {
    /// Array form, used by `Options` properties.
    Choices(Vec<Choice>),
    /// Object form, used by text-like and provider-backed properties.
    Settings(FieldSettings),
}

impl PropertyOptions {
    pub fn choices(&self) -> Option<&[Choice]> {
        match self {
            Self::Choices(choices) => Some(choices),
            Self::Settings(_) => None,
        }
    }

    pub fn settings(&self) -> Option<&FieldSettings> {
        match self {
            Self::Settings(settings) => Some(settings),
            Self::Choices(_) => None,
        }
    }
}

/// Metadata describing how one property is displayed and edited.
#[derive(Clone)]
pub struct PropertyMeta {
    /// Display name override.
    pub name: Option<String>,
    pub ty: Option<PropertyType>,
    pub group: Option<String>,
    pub browsable: bool,
    pub options: Option<PropertyOptions>,
    pub description: Option<String>,
    pub change_callback: Option<ChangeCallback>,
    pub transform_value: Option<TransformFn>,
    pub standard_tags: Vec<String>,
    pub tag_validator: Option<TagValidator>,
}

impl Default for PropertyMeta {
    fn default() -> Self {
        Self {
            name: None,
            ty: None,
            group: None,
            browsable: true,
            options: None,
            description: None,
            change_callback: None,
            transform_value: None,
            standard_tags: Vec::new(),
            tag_validator: None,
        }
    }
}

impl PropertyMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn of_type(mut self, ty: PropertyType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Set the type from its name; unknown names leave the type unset.
    pub fn type_name(mut self, name: &str) -> Self {
        self.ty = PropertyType::from_name(name);
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn browsable(mut self, browsable: bool) -> Self {
        self.browsable = browsable;
        self
    }

    pub fn choices<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        self.options = Some(PropertyOptions::Choices(
            choices.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn settings(mut self, settings: FieldSettings) -> Self {
        self.options = Some(PropertyOptions::Settings(settings));
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn on_change(
        mut self,
        f: impl Fn(&ElementId, &str, &Value, ClearModified) + Send + Sync + 'static,
    ) -> Self {
        self.change_callback = Some(Arc::new(f));
        self
    }

    pub fn transform(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.transform_value = Some(Arc::new(f));
        self
    }

    pub fn standard_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.standard_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn tag_validator(
        mut self,
        f: impl Fn(&str, &mut TagList, TagAction) + Send + Sync + 'static,
    ) -> Self {
        self.tag_validator = Some(Arc::new(f));
        self
    }

    /// Object-form options, if any.
    pub fn field_settings(&self) -> Option<&FieldSettings> {
        self.options.as_ref().and_then(PropertyOptions::settings)
    }

    /// Non-empty description text.
    pub fn help_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

impl fmt::Debug for PropertyMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMeta")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("group", &self.group)
            .field("browsable", &self.browsable)
            .field("options", &self.options)
            .field("description", &self.description)
            .field("change_callback", &self.change_callback.is_some())
            .field("transform_value", &self.transform_value.is_some())
            .field("standard_tags", &self.standard_tags)
            .field("tag_validator", &self.tag_validator.is_some())
            .finish()
    }
}

/// Metadata for a whole source object, keyed by property name.
#[derive(Debug, Clone, Default)]
pub struct Metadata(IndexMap<String, PropertyMeta>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, meta: PropertyMeta) -> Self {
        self.0.insert(name.into(), meta);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, meta: PropertyMeta) {
        self.0.insert(name.into(), meta);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyMeta> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
