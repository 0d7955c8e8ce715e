//! Propgrid Core
//!
//! Dynamic value model, collection aliases, configuration and logging
//! shared by the propgrid crates.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod value;

pub use config::GridConfig;
pub use value::{NativeFn, PropertyBag, Value};
