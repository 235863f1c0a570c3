use crate::{
    node::{Element, Node},
    widget::{Update, Widget},
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Single-line text input.
pub struct TextInput<E> {
    initial: String,
    placeholder: Option<String>,
    _phantom: PhantomData<fn() -> E>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextInputMsg {
    /// The text was edited.
    Input(String),
    /// The input lost focus.
    Blur,
}

impl<E> TextInput<E> {
    pub fn new() -> TextInput<E> {
        TextInput {
            initial: String::new(),
            placeholder: None,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn initial(mut self, text: impl Into<String>) -> Self {
        self.initial = text.into();
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl<E> Default for TextInput<E> {
    fn default() -> Self {
        TextInput::new()
    }
}

impl<E> Widget for TextInput<E> {
    type Model = String;
    type Msg = TextInputMsg;
    type Value = String;
    type Error = E;

    fn init(&self) -> String {
        self.initial.clone()
    }

    fn value(&self, model: &String) -> String {
        model.clone()
    }

    fn view(&self, dom_id: &str, model: &String) -> Vec<Node<TextInputMsg>> {
        let mut input = Element::new("input")
            .id(dom_id)
            .attr("type", "text")
            .attr("value", model.as_str());
        if let Some(ref placeholder) = self.placeholder {
            input = input.attr("placeholder", placeholder.as_str());
        }
        vec![input
            .on_input("input", |text| TextInputMsg::Input(text.to_owned()))
            .on("blur", TextInputMsg::Blur)
            .into()]
    }

    fn update(&self, msg: TextInputMsg, model: String) -> Update<String> {
        match msg {
            TextInputMsg::Input(text) if text != model => Update::changed(text),
            TextInputMsg::Input(_) => Update::none(model),
            TextInputMsg::Blur => Update::blurred(model),
        }
    }
}
