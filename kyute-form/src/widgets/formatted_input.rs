use crate::{
    error::FieldError,
    node::{Element, Node},
    widget::{Update, Widget},
    widgets::formatter::{Formatter, ValidationResult},
};
use serde::{Deserialize, Serialize};
use std::{marker::PhantomData, rc::Rc};

/// A text input that parses its contents with a [`Formatter`].
///
/// The model is the text being edited. The value is `None` while the text is empty or doesn't parse; text that
/// doesn't parse is reported as an error built by the `invalid` function. When the input loses focus, valid
/// text is reformatted.
pub struct FormattedInput<T, F, E> {
    formatter: F,
    initial: Option<T>,
    invalid: Rc<dyn Fn(&str) -> E>,
    _phantom: PhantomData<fn() -> T>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormattedInputMsg {
    Input(String),
    Blur,
}

impl<T, F, E> FormattedInput<T, F, E>
where
    F: Formatter<T>,
{
    pub fn new(formatter: F, invalid: impl Fn(&str) -> E + 'static) -> FormattedInput<T, F, E> {
        FormattedInput {
            formatter,
            initial: None,
            invalid: Rc::new(invalid),
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn initial(mut self, value: T) -> Self {
        self.initial = Some(value);
        self
    }
}

impl<T, F, E> Widget for FormattedInput<T, F, E>
where
    F: Formatter<T>,
{
    type Model = String;
    type Msg = FormattedInputMsg;
    type Value = Option<T>;
    type Error = E;

    fn init(&self) -> String {
        self.initial
            .as_ref()
            .map(|value| self.formatter.format(value))
            .unwrap_or_default()
    }

    fn value(&self, model: &String) -> Option<T> {
        if model.trim().is_empty() {
            return None;
        }
        self.formatter.parse(model).ok()
    }

    fn validate(&self, model: &String) -> Vec<FieldError<E>> {
        if model.trim().is_empty() {
            return Vec::new();
        }
        match self.formatter.parse(model) {
            Ok(_) => Vec::new(),
            Err(_) => vec![FieldError::Custom((self.invalid)(model))],
        }
    }

    fn view(&self, dom_id: &str, model: &String) -> Vec<Node<FormattedInputMsg>> {
        let mut input = Element::new("input")
            .id(dom_id)
            .attr("type", "text")
            .attr("value", model.as_str());
        if !model.is_empty() && self.formatter.validate_partial_input(model) == ValidationResult::Invalid {
            input = input.class("invalid");
        }
        vec![input
            .on_input("input", |text| FormattedInputMsg::Input(text.to_owned()))
            .on("blur", FormattedInputMsg::Blur)
            .into()]
    }

    fn update(&self, msg: FormattedInputMsg, model: String) -> Update<String> {
        match msg {
            FormattedInputMsg::Input(text) if text != model => Update::changed(text),
            FormattedInputMsg::Input(_) => Update::none(model),
            FormattedInputMsg::Blur => match self.formatter.parse(&model) {
                Ok(value) => Update::blurred(self.formatter.format(&value)),
                Err(_) => Update::blurred(model),
            },
        }
    }
}
