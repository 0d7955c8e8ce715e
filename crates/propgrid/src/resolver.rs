//! Property filtering, ordering and group resolution.

use propgrid_core::alloc::HashSet;
use propgrid_core::{PropertyBag, Value};

use crate::meta::{Metadata, PropertyMeta};

/// A property selected for display, read once at render time.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub name: String,
    pub value: Value,
    pub meta: PropertyMeta,
}

impl PropertyDescriptor {
    /// Label shown in the name cell.
    pub fn display_name(&self) -> &str {
        self.meta.name.as_deref().unwrap_or(&self.name)
    }
}

/// A descriptor together with the group it renders under.
#[derive(Debug, Clone)]
pub struct ResolvedProperty {
    pub group: String,
    pub descriptor: PropertyDescriptor,
}

/// Selects the properties of a source object that get a widget.
pub struct PropertyResolver<'a> {
    default_group: &'a str,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(default_group: &'a str) -> Self {
        Self { default_group }
    }

    /// Walk `order` (or the object's own keys) and keep every name that is an
    /// own, non-function property not marked `browsable: false`.
    ///
    /// A name listed twice is only resolved at its first occurrence.
    pub fn resolve(
        &self,
        source: &PropertyBag,
        metadata: &Metadata,
        order: Option<&[&str]>,
    ) -> Vec<ResolvedProperty> {
        let names: Vec<&str> = match order {
            Some(order) => order.to_vec(),
            None => source.keys().collect(),
        };

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let Some(value) = source.get_own(name) else {
                tracing::trace!("skipping '{}': not an own property", name);
                continue;
            };
            if value.is_function() {
                continue;
            }
            let meta = metadata.get(name).cloned().unwrap_or_default();
            if !meta.browsable {
                continue;
            }
            if !seen.insert(name) {
                tracing::trace!("skipping duplicate property '{}'", name);
                continue;
            }

            let group = meta
                .group
                .as_deref()
                .filter(|g| !g.is_empty())
                .unwrap_or(self.default_group)
                .to_string();
            resolved.push(ResolvedProperty {
                group,
                descriptor: PropertyDescriptor {
                    name: name.to_string(),
                    value: value.clone(),
                    meta,
                },
            });
        }
        resolved
    }
}
