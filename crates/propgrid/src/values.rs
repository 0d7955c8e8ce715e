//! Value collection from live widgets.

use indexmap::IndexMap;
use propgrid_core::Value;

use crate::widget::WidgetHandle;

/// Property name to current value, in render order.
pub type ValueMap = IndexMap<String, Value>;

/// Pulls the current value out of every widget of a grid.
///
/// Nothing is cached: each call reads the widgets as they are now.
pub struct ValueCollector;

impl ValueCollector {
    pub fn collect(widgets: &IndexMap<String, WidgetHandle>) -> ValueMap {
        widgets
            .iter()
            .map(|(name, widget)| (name.clone(), widget.value()))
            .collect()
    }
}
