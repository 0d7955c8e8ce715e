//! Hash collections used across propgrid.
//!
//! Ordered maps come from `indexmap`; unordered lookups use AHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
pub use indexmap::{IndexMap, IndexSet};
