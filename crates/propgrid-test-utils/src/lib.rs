//! Test utilities for propgrid.
//!
//! # Overview
//!
//! - Recording mock providers (`MockSpinner`, `MockColorPicker`,
//!   `MockTagEditor`, `RecordingMessageDisplay`)
//! - [`MockProviders`] - all of them wired into one [`CapabilityRegistry`]
//! - [`render`] - render a source into a fresh container
//!
//! # Example
//!
//! ```rust
//! use propgrid::{PropertyBag, Value};
//! use propgrid_test_utils::MockProviders;
//!
//! let mocks = MockProviders::new();
//! let mut grid = mocks.property_grid();
//! let source = Value::from(PropertyBag::new().with("count", 3));
//! let container = propgrid_test_utils::render(&mut grid, &source, None, None);
//!
//! assert_eq!(mocks.spinner.count_attaches(), 1);
//! assert!(container.grid().is_some());
//! ```

pub mod mock_providers;

use std::sync::Arc;

use propgrid::{CapabilityRegistry, GridConfig, HostContainer, Metadata, PropertyGrid, Value};

pub use mock_providers::{
    CallLog, MessageCall, MockColorPicker, MockSpinner, MockTagEditor, ProviderCall,
    RecordingMessageDisplay,
};

/// Every mock provider, sharing one attachment log.
pub struct MockProviders {
    pub log: Arc<CallLog>,
    pub spinner: Arc<MockSpinner>,
    pub color_picker: Arc<MockColorPicker>,
    pub tag_editor: Arc<MockTagEditor>,
    pub messages: Arc<RecordingMessageDisplay>,
}

impl MockProviders {
    pub fn new() -> Self {
        let log = Arc::new(CallLog::new());
        Self {
            spinner: Arc::new(MockSpinner::with_log(log.clone())),
            color_picker: Arc::new(MockColorPicker::with_log(log.clone())),
            tag_editor: Arc::new(MockTagEditor::with_log(log.clone())),
            messages: Arc::new(RecordingMessageDisplay::new()),
            log,
        }
    }

    /// A registry with every provider configured.
    pub fn registry(&self) -> CapabilityRegistry {
        CapabilityRegistry::new()
            .with_spinner(self.spinner.clone())
            .with_color_picker(self.color_picker.clone())
            .with_tag_editor(self.tag_editor.clone())
            .with_message_display(self.messages.clone())
    }

    /// A registry with only the message display configured.
    pub fn messages_only(&self) -> CapabilityRegistry {
        CapabilityRegistry::new().with_message_display(self.messages.clone())
    }

    pub fn property_grid(&self) -> PropertyGrid {
        PropertyGrid::new(self.registry())
    }

    pub fn property_grid_with_config(&self, config: GridConfig) -> PropertyGrid {
        PropertyGrid::with_config(self.registry(), config)
    }
}

impl Default for MockProviders {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `source` into a new container.
pub fn render(
    grid: &mut PropertyGrid,
    source: &Value,
    metadata: Option<&Metadata>,
    order: Option<&[&str]>,
) -> HostContainer {
    let mut container = HostContainer::new();
    grid.render(&mut container, source, metadata, order);
    container
}
