//! Optional rendering providers.
//!
//! Spinner, color picker and tag editor widgets depend on external providers.
//! Providers are injected through a [`CapabilityRegistry`] instead of being
//! queried globally; an absent provider is a normal configuration and the
//! widget factory degrades to a plain text widget.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use propgrid_core::Value;

use crate::id::ElementId;
use crate::meta::FieldSettings;

/// Capabilities that may or may not be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    NumberSpinner,
    ColorPicker,
    TagsEditor,
    MessageDisplay,
}

/// Range configuration handed to the spinner provider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpinnerOptions {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl SpinnerOptions {
    /// Read `min`/`max`/`step` from the provider-specific option entries.
    pub fn from_settings(settings: Option<&FieldSettings>) -> Self {
        match settings {
            Some(s) => Self {
                min: s.extra_f64("min"),
                max: s.extra_f64("max"),
                step: s.extra_f64("step"),
            },
            None => Self::default(),
        }
    }

    /// Clamp into `[min, max]` where bounds are set.
    pub fn clamp(&self, value: f64) -> f64 {
        if let Some(min) = self.min {
            if value < min {
                return min;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return max;
            }
        }
        value
    }
}

/// Numeric spinner provider.
pub trait SpinnerProvider: Send + Sync {
    /// Turn the element into a spinner. Called once after the grid is mounted.
    fn attach(&self, element: &ElementId, options: &SpinnerOptions);

    /// Parse spinner text into a number; `None` when the text is not numeric.
    fn parse(&self, text: &str) -> Option<f64> {
        text.trim().parse().ok()
    }
}

/// Color picker provider.
pub trait ColorPickerProvider: Send + Sync {
    /// Turn the element into a color picker seeded with `initial`.
    fn attach(
        &self,
        element: &ElementId,
        initial: Option<&str>,
        settings: &IndexMap<String, Value>,
    );

    /// Serialize the picker's raw color into its `rgb(...)` form.
    fn to_rgb_string(&self, raw: &str) -> String;
}

/// Tag editor provider.
pub trait TagEditorProvider: Send + Sync {
    /// Turn the element into a tag editor holding `initial` and suggesting `suggestions`.
    fn attach(&self, element: &ElementId, initial: &[String], suggestions: &[String]);
}

/// Transient message display (popover) anchored to an element.
pub trait MessageDisplay: Send + Sync {
    fn show(&self, element: &ElementId, message: &str);
    fn hide(&self, element: &ElementId);
}

/// The set of providers available to a rendering session.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    spinner: Option<Arc<dyn SpinnerProvider>>,
    color_picker: Option<Arc<dyn ColorPickerProvider>>,
    tag_editor: Option<Arc<dyn TagEditorProvider>>,
    messages: Option<Arc<dyn MessageDisplay>>,
}

impl CapabilityRegistry {
    /// A registry with no providers: every gated widget degrades.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spinner(mut self, provider: Arc<dyn SpinnerProvider>) -> Self {
        self.spinner = Some(provider);
        self
    }

    pub fn with_color_picker(mut self, provider: Arc<dyn ColorPickerProvider>) -> Self {
        self.color_picker = Some(provider);
        self
    }

    pub fn with_tag_editor(mut self, provider: Arc<dyn TagEditorProvider>) -> Self {
        self.tag_editor = Some(provider);
        self
    }

    pub fn with_message_display(mut self, provider: Arc<dyn MessageDisplay>) -> Self {
        self.messages = Some(provider);
        self
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        match capability {
            Capability::NumberSpinner => self.spinner.is_some(),
            Capability::ColorPicker => self.color_picker.is_some(),
            Capability::TagsEditor => self.tag_editor.is_some(),
            Capability::MessageDisplay => self.messages.is_some(),
        }
    }

    pub fn spinner(&self) -> Option<&Arc<dyn SpinnerProvider>> {
        self.spinner.as_ref()
    }

    pub fn color_picker(&self) -> Option<&Arc<dyn ColorPickerProvider>> {
        self.color_picker.as_ref()
    }

    pub fn tag_editor(&self) -> Option<&Arc<dyn TagEditorProvider>> {
        self.tag_editor.as_ref()
    }

    pub fn message_display(&self) -> Option<&Arc<dyn MessageDisplay>> {
        self.messages.as_ref()
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("spinner", &self.spinner.is_some())
            .field("color_picker", &self.color_picker.is_some())
            .field("tag_editor", &self.tag_editor.is_some())
            .field("messages", &self.messages.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopSpinner;

    impl SpinnerProvider for NoopSpinner {
        fn attach(&self, _element: &ElementId, _options: &SpinnerOptions) {}
    }

    #[test]
    fn test_empty_registry_has_nothing() {
        let caps = CapabilityRegistry::new();
        assert!(!caps.is_available(Capability::NumberSpinner));
        assert!(!caps.is_available(Capability::ColorPicker));
        assert!(!caps.is_available(Capability::TagsEditor));
        assert!(!caps.is_available(Capability::MessageDisplay));
    }

    #[test]
    fn test_spinner_registration() {
        let caps = CapabilityRegistry::new().with_spinner(Arc::new(NoopSpinner));
        assert!(caps.is_available(Capability::NumberSpinner));
        assert_eq!(caps.spinner().unwrap().parse(" 4.5 "), Some(4.5));
        assert_eq!(caps.spinner().unwrap().parse("abc"), None);
    }

    #[test]
    fn test_spinner_options_clamp() {
        let settings = FieldSettings::new().extra("min", 0).extra("max", 10);
        let options = SpinnerOptions::from_settings(Some(&settings));
        assert_eq!(options.clamp(-3.0), 0.0);
        assert_eq!(options.clamp(12.0), 10.0);
        assert_eq!(options.clamp(4.0), 4.0);
        assert_eq!(SpinnerOptions::from_settings(None).clamp(-3.0), -3.0);
    }
}
