//! Helpers shared by unit tests.
use crate::{
    error::FieldError,
    ids::{FieldId, SubfieldId},
    msg::FormMsg,
    node::{Element, Node},
    widget::{Update, Widget},
};
use serde::{Deserialize, Serialize};

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Integer counter with increment and decrement buttons. Negative values are invalid.
pub(crate) struct Counter {
    start: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum CounterMsg {
    Increment,
    Decrement,
    Blur,
}

impl Counter {
    pub(crate) fn starting_at(start: i64) -> Counter {
        Counter { start }
    }
}

impl Widget for Counter {
    type Model = i64;
    type Msg = CounterMsg;
    type Value = i64;
    type Error = String;

    fn init(&self) -> i64 {
        self.start
    }

    fn value(&self, model: &i64) -> i64 {
        *model
    }

    fn validate(&self, model: &i64) -> Vec<FieldError<String>> {
        if *model < 0 {
            vec![FieldError::Custom("negative".to_string())]
        } else {
            Vec::new()
        }
    }

    fn view(&self, dom_id: &str, model: &i64) -> Vec<Node<CounterMsg>> {
        vec![Element::new("div")
            .id(dom_id)
            .child(Element::new("button").id(format!("{dom_id}-dec")).on("click", CounterMsg::Decrement))
            .text(model.to_string())
            .child(Element::new("button").id(format!("{dom_id}-inc")).on("click", CounterMsg::Increment))
            .into()]
    }

    fn update(&self, msg: CounterMsg, model: i64) -> Update<i64> {
        match msg {
            CounterMsg::Increment => Update::changed(model + 1),
            CounterMsg::Decrement => Update::changed(model - 1),
            CounterMsg::Blur => Update::blurred(model),
        }
    }
}

/// Message addressing a counter registered as a scalar field.
pub(crate) fn counter_msg(field: FieldId, msg: CounterMsg) -> FormMsg {
    FormMsg::update(field, SubfieldId::SingleValue, Counter::encode_msg(&msg))
}
