//! Composable, serializable web forms.
//!
//! Forms are assembled from widgets, each with its own model, messages, view and validation. The state of a
//! whole form is a single serializable [`FormState`] value, updated by a single message type, [`FormMsg`],
//! regardless of the number and kinds of widgets it contains. This makes it possible to persist the state of
//! a form, or to send it over the wire, at any point.
//!
//! # Overview
//! * [`Widget`]: the interface of form widgets. See [`widgets`] for a few ready-made ones, and [`WidgetExt`] to
//!   attach validation rules or post-process the rendered markup.
//! * [`FormBuilder`]: registers widgets as fields. Each registration returns a typed [`Field`] accessor, used in
//!   the [`Layout`] of the form to read values and render the fields.
//! * [`Form`]: a finished definition. Initializes, updates, validates and renders a [`FormState`]. Forms are
//!   widgets themselves and can be nested.
//! * [`Node`]: the virtual markup produced by views, with event listeners that produce messages.
//! * [`Decorator`]: the markup around fields and forms (error lists, list controls).
//!
//! # Logging
//! The crate logs with `tracing`: form definitions and dispatched messages at the `trace` and `debug` levels,
//! dropped messages (unknown fields, out-of-range removals) at the `warn` level.

// public modules
pub mod widgets;

// internal modules
mod decorate;
mod environment;
mod error;
mod field;
mod form;
mod ids;
mod msg;
mod node;
mod state;
mod status;
mod tuple;
mod variant;
mod widget;
mod widget_ext;

#[cfg(test)]
mod test_util;

// public exports
pub use decorate::{error_text, Decorator, DefaultDecorator, ListDecoration, Undecorated};
pub use environment::{keys, EnvValue, Environment, Strings};
pub use error::{FieldError, StateError};
pub use field::{Field, MAX_LIST_LEN};
pub use form::{Form, FormBuilder, Layout, DEFAULT_DOM_ID};
pub use ids::{FieldId, SubfieldId};
pub use msg::{FieldOperation, FormMsg};
pub use node::{find, map_nodes, text_content, Element, Handler, Listener, Node};
pub use state::FormState;
pub use status::{Effect, FieldStatus};
pub use tuple::Append;
pub use variant::{VariantModel, VariantMsg, Variants};
pub use widget::{AnyWidget, BoxedWidget, Update, Widget};
pub use widget_ext::{non_empty, not_blank, validate, wrap, MapValue, Validated, Validator, WidgetExt, Wrapped};
