//! Grid assembly: grouping, ordering and markup composition.

use indexmap::IndexMap;

use crate::factory::WidgetFactory;
use crate::id::GridId;
use crate::markup;
use crate::meta::PropertyMeta;
use crate::resolver::{PropertyDescriptor, ResolvedProperty};
use crate::widget::{PostCreateInit, WidgetHandle};

/// A named bucket of properties rendered together.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
}

/// Change wiring to apply to a widget once the grid is mounted.
#[derive(Debug, Clone)]
pub struct PendingBinding {
    pub name: String,
    pub meta: PropertyMeta,
}

/// Everything produced for one grid before it is mounted.
pub struct AssembledGrid {
    pub id: GridId,
    pub markup: String,
    /// Groups in display order; the default group, if present, is last.
    pub groups: Vec<Group>,
    pub widgets: IndexMap<String, WidgetHandle>,
    /// Provider initializers in encounter order.
    pub post_create: Vec<PostCreateInit>,
    /// Change wiring in encounter order.
    pub bindings: Vec<PendingBinding>,
}

#[derive(Default)]
struct GroupRows {
    properties: Vec<PropertyDescriptor>,
    rows: String,
}

/// Composes rows into a grid table.
pub struct GridAssembler<'a> {
    default_group: &'a str,
    factory: WidgetFactory<'a>,
}

impl<'a> GridAssembler<'a> {
    pub fn new(default_group: &'a str, factory: WidgetFactory<'a>) -> Self {
        Self {
            default_group,
            factory,
        }
    }

    /// Build widgets and markup for `resolved`, keeping its order within
    /// each group. Named groups follow first-seen order and the default
    /// group comes last, only when it holds at least one property.
    pub fn assemble(&self, id: GridId, resolved: Vec<ResolvedProperty>) -> AssembledGrid {
        let mut buckets: IndexMap<String, GroupRows> = IndexMap::new();
        let mut widgets = IndexMap::with_capacity(resolved.len());
        let mut post_create = Vec::new();
        let mut bindings = Vec::with_capacity(resolved.len());

        for ResolvedProperty { group, descriptor } in resolved {
            let built = self.factory.create(&id, &descriptor);
            let label = markup::label(descriptor.display_name(), descriptor.meta.help_text());

            let bucket = buckets.entry(group).or_default();
            bucket.rows.push_str(&markup::row(&label, &built.markup));

            post_create.extend(built.post_create);
            bindings.push(PendingBinding {
                name: descriptor.name.clone(),
                meta: descriptor.meta.clone(),
            });
            widgets.insert(descriptor.name.clone(), built.handle);
            bucket.properties.push(descriptor);
        }

        let default_bucket = buckets.shift_remove(self.default_group);
        let named = buckets.into_iter();
        let default = default_bucket
            .filter(|b| !b.properties.is_empty())
            .map(|b| (self.default_group.to_string(), b));

        let mut rows = String::new();
        let mut groups = Vec::new();
        for (name, bucket) in named.chain(default) {
            rows.push_str(&markup::group_header(&name));
            rows.push_str(&bucket.rows);
            groups.push(Group {
                name,
                properties: bucket.properties,
            });
        }

        tracing::debug!(
            "assembled grid {} with {} properties in {} groups",
            id,
            widgets.len(),
            groups.len()
        );

        AssembledGrid {
            id,
            markup: markup::table(&rows),
            groups,
            widgets,
            post_create,
            bindings,
        }
    }
}
