//! Propgrid - metadata-driven property grid
//!
//! Renders an editable grid for the own properties of an object:
//! - Per-property metadata selects widgets, groups and labels
//! - Optional spinner, color picker and tag editor providers
//! - Change tracking with validation and dependent-field propagation
//! - Value collection back into a name-to-value map
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # use propgrid::{CapabilityRegistry, HostContainer, Metadata, PropertyGrid, PropertyMeta};
//! # use propgrid::{PropertyBag, Value};
//! let source = Value::from(PropertyBag::new().with("name", "Bob").with("active", true));
//! let metadata = Metadata::new().with("name", PropertyMeta::new().display_name("Name"));
//!
//! let mut grid = PropertyGrid::new(CapabilityRegistry::new());
//! let mut container = HostContainer::new();
//! grid.render(&mut container, &source, Some(&metadata), None);
//!
//! // Later:
//! // container.grid_mut().unwrap().type_text("name", "by")?;
//! // container.grid_mut().unwrap().update(delta_time);
//! let values = container.get_values();
//! ```

pub mod assembler;
pub mod capability;
pub mod controller;
pub mod error;
pub mod factory;
pub mod grid;
pub mod host;
pub mod id;
pub mod markup;
pub mod meta;
pub mod resolver;
pub mod values;
pub mod warning;
pub mod widget;

pub use capability::{
    Capability, CapabilityRegistry, ColorPickerProvider, MessageDisplay, SpinnerOptions,
    SpinnerProvider, TagEditorProvider,
};
pub use controller::{Key, WidgetEvent};
pub use error::{GridError, GridResult};
pub use grid::GridInstance;
pub use host::{GET_VALUES, HostContainer, PropertyGrid, get_values};
pub use id::{ElementId, GridId};
pub use meta::{Choice, FieldSettings, FieldStyle, Metadata, PropertyMeta, PropertyType};
pub use values::ValueMap;
pub use widget::{ClearModified, TagAction, TagList, WidgetKind, WidgetState};

pub use propgrid_core::{GridConfig, NativeFn, PropertyBag, Value};
