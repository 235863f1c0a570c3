//! Widget trait and type-erased widgets.
use crate::{
    error::FieldError,
    node::{map_nodes, Node},
    status::Effect,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as Json;
use std::rc::Rc;
use tracing::{debug, warn};

/// Result of a widget update.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Update<M> {
    /// The new model.
    pub model: M,
    /// How the update affects the status of the field.
    pub effect: Effect,
}

impl<M> Update<M> {
    pub fn new(model: M, effect: Effect) -> Update<M> {
        Update { model, effect }
    }

    /// An update without observable effect.
    pub fn none(model: M) -> Update<M> {
        Update::new(model, Effect::NoEffect)
    }

    /// An update that changed the value.
    pub fn changed(model: M) -> Update<M> {
        Update::new(model, Effect::WasChanged)
    }

    /// An update signalling that the user has left the widget.
    pub fn blurred(model: M) -> Update<M> {
        Update::new(model, Effect::WasBlurred)
    }

    pub fn map<N>(self, f: impl FnOnce(M) -> N) -> Update<N> {
        Update {
            model: f(self.model),
            effect: self.effect,
        }
    }
}

/// A self-contained piece of form UI: state, rendering, update, validation and serialization.
///
/// Widgets are combined into forms, which keep their models serialized in a single `FormState`. Because of
/// this, models and messages must round-trip through serialization: `decode(encode(m))` must be equal to `m`.
pub trait Widget {
    /// Internal state of the widget.
    type Model: Clone + Serialize + DeserializeOwned;
    /// Messages produced by the view of the widget.
    type Msg: Clone + Serialize + DeserializeOwned + 'static;
    /// Committed output of the widget.
    type Value;
    /// Application-defined validation errors.
    type Error;

    /// Default model.
    fn init(&self) -> Self::Model;

    /// Projects the model to the output value.
    fn value(&self, model: &Self::Model) -> Self::Value;

    /// Validates the model.
    fn validate(&self, _model: &Self::Model) -> Vec<FieldError<Self::Error>> {
        Vec::new()
    }

    /// Whether the view of the widget already shows its validation errors, in which case the form doesn't
    /// decorate the field with them again. This is the case of nested forms.
    fn reports_own_errors(&self) -> bool {
        false
    }

    /// Renders the widget. `dom_id` is the id of the main element of the widget.
    fn view(&self, dom_id: &str, model: &Self::Model) -> Vec<Node<Self::Msg>>;

    /// Applies a message to the model.
    fn update(&self, msg: Self::Msg, model: Self::Model) -> Update<Self::Model>;

    /// Marks the widget and everything it contains as visited.
    fn blur(&self, model: Self::Model) -> Self::Model {
        model
    }

    fn encode_model(&self, model: &Self::Model) -> Json {
        encode(model)
    }

    /// Reads a serialized model, falling back to `init` if it can't be decoded.
    fn decode_model(&self, value: &Json) -> Self::Model {
        decode(value).unwrap_or_else(|| self.init())
    }

    fn encode_msg(msg: &Self::Msg) -> Json {
        encode(msg)
    }

    /// Reads a serialized message. Messages that can't be decoded are ignored.
    fn decode_msg(value: &Json) -> Option<Self::Msg> {
        decode(value)
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Json {
    serde_json::to_value(value).unwrap_or_else(|err| {
        warn!("failed to serialize: {err}");
        Json::Null
    })
}

pub(crate) fn decode<T: DeserializeOwned>(value: &Json) -> Option<T> {
    match T::deserialize(value) {
        Ok(v) => Some(v),
        Err(err) => {
            debug!("decode failed, falling back to default: {err}");
            None
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Type-erased widget.
///
/// Models and messages cross this interface in serialized form, so widgets with different model and message
/// types can be stored side by side as long as they produce the same value and error types.
pub trait AnyWidget<V, E> {
    /// Serialized default model.
    fn init_model(&self) -> Json;

    fn value_of(&self, model: &Json) -> V;

    fn errors_of(&self, model: &Json) -> Vec<FieldError<E>>;

    fn reports_errors(&self) -> bool;

    /// Renders the widget. Messages are serialized.
    fn view_model(&self, dom_id: &str, model: &Json) -> Vec<Node<Json>>;

    /// Decodes a message and applies it to a serialized model.
    ///
    /// Undecodable messages leave the model untouched.
    fn update_model(&self, msg: &Json, model: &Json) -> Update<Json>;

    fn blur_model(&self, model: &Json) -> Json;
}

impl<W> AnyWidget<W::Value, W::Error> for W
where
    W: Widget + 'static,
{
    fn init_model(&self) -> Json {
        self.encode_model(&self.init())
    }

    fn value_of(&self, model: &Json) -> W::Value {
        self.value(&self.decode_model(model))
    }

    fn errors_of(&self, model: &Json) -> Vec<FieldError<W::Error>> {
        self.validate(&self.decode_model(model))
    }

    fn reports_errors(&self) -> bool {
        self.reports_own_errors()
    }

    fn view_model(&self, dom_id: &str, model: &Json) -> Vec<Node<Json>> {
        let nodes = self.view(dom_id, &self.decode_model(model));
        map_nodes(nodes, |msg: W::Msg| W::encode_msg(&msg))
    }

    fn update_model(&self, msg: &Json, model: &Json) -> Update<Json> {
        let Some(msg) = W::decode_msg(msg) else {
            return Update::none(model.clone());
        };
        let model = self.decode_model(model);
        self.update(msg, model).map(|model| self.encode_model(&model))
    }

    fn blur_model(&self, model: &Json) -> Json {
        self.encode_model(&self.blur(self.decode_model(model)))
    }
}

/// A widget behind a pointer, with serialized model and messages.
pub struct BoxedWidget<V, E>(Rc<dyn AnyWidget<V, E>>);

impl<V, E> Clone for BoxedWidget<V, E> {
    fn clone(&self) -> Self {
        BoxedWidget(self.0.clone())
    }
}

impl<V, E> BoxedWidget<V, E> {
    pub fn new<W>(widget: W) -> BoxedWidget<V, E>
    where
        W: Widget<Value = V, Error = E> + 'static,
    {
        BoxedWidget(Rc::new(widget))
    }
}

impl<V, E> Widget for BoxedWidget<V, E> {
    type Model = Json;
    type Msg = Json;
    type Value = V;
    type Error = E;

    fn init(&self) -> Json {
        self.0.init_model()
    }

    fn value(&self, model: &Json) -> V {
        self.0.value_of(model)
    }

    fn validate(&self, model: &Json) -> Vec<FieldError<E>> {
        self.0.errors_of(model)
    }

    fn reports_own_errors(&self) -> bool {
        self.0.reports_errors()
    }

    fn view(&self, dom_id: &str, model: &Json) -> Vec<Node<Json>> {
        self.0.view_model(dom_id, model)
    }

    fn update(&self, msg: Json, model: Json) -> Update<Json> {
        self.0.update_model(&msg, &model)
    }

    fn blur(&self, model: Json) -> Json {
        self.0.blur_model(&model)
    }

    fn encode_model(&self, model: &Json) -> Json {
        model.clone()
    }

    fn decode_model(&self, value: &Json) -> Json {
        value.clone()
    }
}
