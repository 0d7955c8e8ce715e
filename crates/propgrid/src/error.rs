use crate::widget::WidgetKind;

/// Errors surfaced by the fallible grid APIs.
///
/// The host-facing [`PropertyGrid::render`](crate::PropertyGrid::render) and
/// [`PropertyGrid::invoke`](crate::PropertyGrid::invoke) never return these;
/// they log and no-op instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The render source was not a non-null object.
    #[error("property grid needs an object to render, got {found}")]
    InvalidSource { found: &'static str },

    /// A string invocation other than the `get` query.
    #[error("invalid property grid option: {0}")]
    InvalidMode(String),

    /// No widget is registered for the property.
    #[error("no widget for property '{0}'")]
    UnknownProperty(String),

    /// The operation does not apply to the widget kind.
    #[error("property '{name}' is a {kind:?} widget")]
    KindMismatch { name: String, kind: WidgetKind },
}

pub type GridResult<T> = Result<T, GridError>;
