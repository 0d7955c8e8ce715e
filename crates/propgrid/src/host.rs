//! Host-facing surface: render into a container, read values back.

use propgrid_core::{GridConfig, PropertyBag, Value};

use crate::assembler::GridAssembler;
use crate::capability::CapabilityRegistry;
use crate::error::{GridError, GridResult};
use crate::factory::WidgetFactory;
use crate::grid::GridInstance;
use crate::id::IdAllocator;
use crate::meta::Metadata;
use crate::resolver::PropertyResolver;
use crate::values::ValueMap;
use crate::warning::TransientWarnings;

/// String argument of [`PropertyGrid::invoke`] that queries values.
pub const GET_VALUES: &str = "get";

/// A container a grid is rendered into.
///
/// Holds the rendered markup and the grid instance that backs it. A new
/// render replaces both.
#[derive(Debug, Default)]
pub struct HostContainer {
    html: String,
    grid: Option<GridInstance>,
}

impl HostContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn grid(&self) -> Option<&GridInstance> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut GridInstance> {
        self.grid.as_mut()
    }

    /// Current values, or `None` if nothing was rendered here.
    pub fn get_values(&self) -> Option<ValueMap> {
        self.grid.as_ref().map(GridInstance::get_values)
    }
}

/// A rendering session: providers, configuration and the grid id sequence.
#[derive(Debug)]
pub struct PropertyGrid {
    capabilities: CapabilityRegistry,
    config: GridConfig,
    ids: IdAllocator,
}

impl PropertyGrid {
    pub fn new(capabilities: CapabilityRegistry) -> Self {
        Self::with_config(capabilities, GridConfig::default())
    }

    pub fn with_config(capabilities: CapabilityRegistry, config: GridConfig) -> Self {
        let ids = IdAllocator::new(config.id_prefix.clone());
        Self {
            capabilities,
            config,
            ids,
        }
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Render `source` into `container`, replacing any previous grid.
    ///
    /// A source that is not an object is logged and ignored.
    pub fn render(
        &mut self,
        container: &mut HostContainer,
        source: &Value,
        metadata: Option<&Metadata>,
        order: Option<&[&str]>,
    ) {
        if let Err(err) = self.try_render(container, source, metadata, order) {
            tracing::error!("{}", err);
        }
    }

    /// Fallible form of [`render`](Self::render).
    pub fn try_render<'c>(
        &mut self,
        container: &'c mut HostContainer,
        source: &Value,
        metadata: Option<&Metadata>,
        order: Option<&[&str]>,
    ) -> GridResult<&'c mut GridInstance> {
        let indexed;
        let bag = match source {
            Value::Object(bag) => bag,
            // Arrays render their indices as property names.
            Value::Array(items) => {
                indexed = items
                    .iter()
                    .enumerate()
                    .fold(PropertyBag::new(), |bag, (i, item)| {
                        bag.with(i.to_string(), item.clone())
                    });
                &indexed
            }
            _ => {
                return Err(GridError::InvalidSource {
                    found: source.type_name(),
                });
            }
        };
        let grid = self.build(bag, metadata, order);
        container.html = grid.markup().to_string();
        Ok(container.grid.insert(grid))
    }

    /// Script-style entry point: the string `"get"` returns the container's
    /// values, any other string is rejected, and an object is rendered.
    ///
    /// Never fails; invalid arguments are logged and yield `None`.
    pub fn invoke(
        &mut self,
        container: &mut HostContainer,
        arg: &Value,
        metadata: Option<&Metadata>,
        order: Option<&[&str]>,
    ) -> Option<ValueMap> {
        match arg {
            Value::String(mode) if mode == GET_VALUES => container.get_values(),
            Value::String(mode) => {
                tracing::error!("{}", GridError::InvalidMode(mode.clone()));
                None
            }
            _ => {
                self.render(container, arg, metadata, order);
                None
            }
        }
    }

    fn build(
        &mut self,
        source: &PropertyBag,
        metadata: Option<&Metadata>,
        order: Option<&[&str]>,
    ) -> GridInstance {
        let empty = Metadata::new();
        let metadata = metadata.unwrap_or(&empty);
        let id = self.ids.allocate();

        let resolved =
            PropertyResolver::new(&self.config.default_group).resolve(source, metadata, order);
        let assembler = GridAssembler::new(
            &self.config.default_group,
            WidgetFactory::new(&self.capabilities),
        );
        let assembled = assembler.assemble(id, resolved);
        let warnings = TransientWarnings::new(
            self.capabilities.message_display().cloned(),
            self.config.warning_duration,
        );
        GridInstance::mount(assembled, warnings)
    }
}

/// Values of the grid rendered into `container`, or `None` if it never was.
pub fn get_values(container: &HostContainer) -> Option<ValueMap> {
    container.get_values()
}
