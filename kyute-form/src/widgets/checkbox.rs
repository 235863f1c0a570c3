use crate::{
    node::{Element, Node},
    widget::{Update, Widget},
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A checkbox.
pub struct Checkbox<E> {
    initial: bool,
    _phantom: PhantomData<fn() -> E>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckboxMsg {
    Toggle,
    Blur,
}

impl<E> Checkbox<E> {
    pub fn new() -> Checkbox<E> {
        Checkbox {
            initial: false,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.initial = checked;
        self
    }
}

impl<E> Default for Checkbox<E> {
    fn default() -> Self {
        Checkbox::new()
    }
}

impl<E> Widget for Checkbox<E> {
    type Model = bool;
    type Msg = CheckboxMsg;
    type Value = bool;
    type Error = E;

    fn init(&self) -> bool {
        self.initial
    }

    fn value(&self, model: &bool) -> bool {
        *model
    }

    fn view(&self, dom_id: &str, model: &bool) -> Vec<Node<CheckboxMsg>> {
        let mut input = Element::new("input").id(dom_id).attr("type", "checkbox");
        if *model {
            input = input.attr("checked", "checked");
        }
        vec![input.on("change", CheckboxMsg::Toggle).on("blur", CheckboxMsg::Blur).into()]
    }

    fn update(&self, msg: CheckboxMsg, model: bool) -> Update<bool> {
        match msg {
            CheckboxMsg::Toggle => Update::changed(!model),
            CheckboxMsg::Blur => Update::blurred(model),
        }
    }
}
