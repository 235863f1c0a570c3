use crate::{
    error::FieldError,
    node::Node,
    widget::{BoxedWidget, Update, Widget},
};
use serde_json::Value as Json;
use std::{marker::PhantomData, rc::Rc};

/// A pure validation rule over the value of a widget.
pub type Validator<V, E> = Rc<dyn Fn(&V) -> Option<FieldError<E>>>;

/// Rejects blank (empty or whitespace-only) text values.
pub fn not_blank<V, E>() -> Validator<V, E>
where
    V: AsRef<str> + 'static,
    E: 'static,
{
    Rc::new(|value: &V| value.as_ref().trim().is_empty().then_some(FieldError::MustNotBeBlank))
}

/// Rejects blank values of a text widget.
pub fn non_empty<W>(widget: W) -> Validated<W>
where
    W: Widget,
    W::Value: AsRef<str> + 'static,
    W::Error: 'static,
{
    validate([not_blank()], widget)
}

/// Attaches validators to a widget.
pub fn validate<W: Widget>(
    validators: impl IntoIterator<Item = Validator<W::Value, W::Error>>,
    widget: W,
) -> Validated<W> {
    Validated {
        inner: widget,
        validators: validators.into_iter().collect(),
    }
}

/// Post-processes the rendered output of a widget.
pub fn wrap<W, F>(widget: W, decorator: F) -> Wrapped<W, F>
where
    W: Widget,
    F: Fn(&str, Vec<Node<W::Msg>>) -> Vec<Node<W::Msg>>,
{
    Wrapped { inner: widget, decorator }
}

/// Extension methods on widgets.
pub trait WidgetExt: Widget + Sized {
    /// Adds a validation rule.
    #[must_use]
    fn validate_with(
        self,
        validator: impl Fn(&Self::Value) -> Option<FieldError<Self::Error>> + 'static,
    ) -> Validated<Self> {
        validate([Rc::new(validator) as Validator<_, _>], self)
    }

    /// Rejects blank values.
    #[must_use]
    fn non_blank(self) -> Validated<Self>
    where
        Self::Value: AsRef<str> + 'static,
        Self::Error: 'static,
    {
        non_empty(self)
    }

    /// Post-processes the rendered output.
    #[must_use]
    fn wrap<F>(self, decorator: F) -> Wrapped<Self, F>
    where
        F: Fn(&str, Vec<Node<Self::Msg>>) -> Vec<Node<Self::Msg>>,
    {
        wrap(self, decorator)
    }

    /// Transforms the output value.
    #[must_use]
    fn map_value<U, F>(self, f: F) -> MapValue<Self, F, U>
    where
        F: Fn(Self::Value) -> U,
    {
        MapValue {
            inner: self,
            f,
            _phantom: PhantomData,
        }
    }

    /// Erases the model and message types.
    #[must_use]
    fn boxed(self) -> BoxedWidget<Self::Value, Self::Error>
    where
        Self: 'static,
    {
        BoxedWidget::new(self)
    }
}

impl<W: Widget> WidgetExt for W {}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A widget with additional validation rules. See [`validate`].
pub struct Validated<W: Widget> {
    inner: W,
    validators: Vec<Validator<W::Value, W::Error>>,
}

impl<W: Widget> Validated<W> {
    /// Adds another rule.
    #[must_use]
    pub fn with(mut self, validator: impl Fn(&W::Value) -> Option<FieldError<W::Error>> + 'static) -> Self {
        self.validators.push(Rc::new(validator));
        self
    }
}

impl<W: Widget> Widget for Validated<W> {
    type Model = W::Model;
    type Msg = W::Msg;
    type Value = W::Value;
    type Error = W::Error;

    fn init(&self) -> W::Model {
        self.inner.init()
    }

    fn value(&self, model: &W::Model) -> W::Value {
        self.inner.value(model)
    }

    fn validate(&self, model: &W::Model) -> Vec<FieldError<W::Error>> {
        let mut errors = self.inner.validate(model);
        if !self.validators.is_empty() {
            let value = self.inner.value(model);
            errors.extend(self.validators.iter().filter_map(|validator| validator(&value)));
        }
        errors
    }

    fn reports_own_errors(&self) -> bool {
        self.inner.reports_own_errors()
    }

    fn view(&self, dom_id: &str, model: &W::Model) -> Vec<Node<W::Msg>> {
        self.inner.view(dom_id, model)
    }

    fn update(&self, msg: W::Msg, model: W::Model) -> Update<W::Model> {
        self.inner.update(msg, model)
    }

    fn blur(&self, model: W::Model) -> W::Model {
        self.inner.blur(model)
    }

    fn encode_model(&self, model: &W::Model) -> Json {
        self.inner.encode_model(model)
    }

    fn decode_model(&self, value: &Json) -> W::Model {
        self.inner.decode_model(value)
    }

    fn encode_msg(msg: &W::Msg) -> Json {
        W::encode_msg(msg)
    }

    fn decode_msg(value: &Json) -> Option<W::Msg> {
        W::decode_msg(value)
    }
}

/// A widget whose rendered output is post-processed. See [`wrap`].
pub struct Wrapped<W, F> {
    inner: W,
    decorator: F,
}

impl<W, F> Widget for Wrapped<W, F>
where
    W: Widget,
    F: Fn(&str, Vec<Node<W::Msg>>) -> Vec<Node<W::Msg>>,
{
    type Model = W::Model;
    type Msg = W::Msg;
    type Value = W::Value;
    type Error = W::Error;

    fn init(&self) -> W::Model {
        self.inner.init()
    }

    fn value(&self, model: &W::Model) -> W::Value {
        self.inner.value(model)
    }

    fn validate(&self, model: &W::Model) -> Vec<FieldError<W::Error>> {
        self.inner.validate(model)
    }

    fn reports_own_errors(&self) -> bool {
        self.inner.reports_own_errors()
    }

    fn view(&self, dom_id: &str, model: &W::Model) -> Vec<Node<W::Msg>> {
        (self.decorator)(dom_id, self.inner.view(dom_id, model))
    }

    fn update(&self, msg: W::Msg, model: W::Model) -> Update<W::Model> {
        self.inner.update(msg, model)
    }

    fn blur(&self, model: W::Model) -> W::Model {
        self.inner.blur(model)
    }

    fn encode_model(&self, model: &W::Model) -> Json {
        self.inner.encode_model(model)
    }

    fn decode_model(&self, value: &Json) -> W::Model {
        self.inner.decode_model(value)
    }

    fn encode_msg(msg: &W::Msg) -> Json {
        W::encode_msg(msg)
    }

    fn decode_msg(value: &Json) -> Option<W::Msg> {
        W::decode_msg(value)
    }
}

/// A widget with a transformed output value. See [`WidgetExt::map_value`].
pub struct MapValue<W, F, U> {
    inner: W,
    f: F,
    _phantom: PhantomData<fn() -> U>,
}

impl<W, F, U> Widget for MapValue<W, F, U>
where
    W: Widget,
    F: Fn(W::Value) -> U,
{
    type Model = W::Model;
    type Msg = W::Msg;
    type Value = U;
    type Error = W::Error;

    fn init(&self) -> W::Model {
        self.inner.init()
    }

    fn value(&self, model: &W::Model) -> U {
        (self.f)(self.inner.value(model))
    }

    fn validate(&self, model: &W::Model) -> Vec<FieldError<W::Error>> {
        self.inner.validate(model)
    }

    fn reports_own_errors(&self) -> bool {
        self.inner.reports_own_errors()
    }

    fn view(&self, dom_id: &str, model: &W::Model) -> Vec<Node<W::Msg>> {
        self.inner.view(dom_id, model)
    }

    fn update(&self, msg: W::Msg, model: W::Model) -> Update<W::Model> {
        self.inner.update(msg, model)
    }

    fn blur(&self, model: W::Model) -> W::Model {
        self.inner.blur(model)
    }

    fn encode_model(&self, model: &W::Model) -> Json {
        self.inner.encode_model(model)
    }

    fn decode_model(&self, value: &Json) -> W::Model {
        self.inner.decode_model(value)
    }

    fn encode_msg(msg: &W::Msg) -> Json {
        W::encode_msg(msg)
    }

    fn decode_msg(value: &Json) -> Option<W::Msg> {
        W::decode_msg(value)
    }
}
