use crate::{
    node::{Element, Node},
    widget::{Update, Widget},
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::debug;

/// Drop-down list of options. The value is the key of the selected option.
pub struct Select<E> {
    options: Vec<(String, String)>,
    _phantom: PhantomData<fn() -> E>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectMsg {
    Select(String),
    Blur,
}

impl<E> Select<E> {
    /// Creates a select from `(key, label)` pairs. The first option is initially selected.
    pub fn new(options: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Select<E> {
        Select {
            options: options
                .into_iter()
                .map(|(key, label)| (key.into(), label.into()))
                .collect(),
            _phantom: PhantomData,
        }
    }

    fn has_option(&self, key: &str) -> bool {
        self.options.iter().any(|(k, _)| k == key)
    }
}

impl<E> Widget for Select<E> {
    type Model = String;
    type Msg = SelectMsg;
    type Value = String;
    type Error = E;

    fn init(&self) -> String {
        self.options.first().map(|(key, _)| key.clone()).unwrap_or_default()
    }

    fn value(&self, model: &String) -> String {
        model.clone()
    }

    fn view(&self, dom_id: &str, model: &String) -> Vec<Node<SelectMsg>> {
        let options = self.options.iter().map(|(key, label)| {
            let mut option = Element::new("option").attr("value", key.as_str());
            if key == model {
                option = option.attr("selected", "selected");
            }
            option.text(label.as_str()).into()
        });
        vec![Element::new("select")
            .id(dom_id)
            .on_input("change", |key| SelectMsg::Select(key.to_owned()))
            .on("blur", SelectMsg::Blur)
            .children(options)
            .into()]
    }

    fn update(&self, msg: SelectMsg, model: String) -> Update<String> {
        match msg {
            SelectMsg::Select(key) if key == model => Update::none(model),
            SelectMsg::Select(key) if self.has_option(&key) => Update::changed(key),
            SelectMsg::Select(key) => {
                debug!("ignoring selection of unknown option {key:?}");
                Update::none(model)
            }
            SelectMsg::Blur => Update::blurred(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::text_content;

    #[test]
    fn select_known_options_only() {
        let select = Select::<()>::new([("a", "Apple"), ("b", "Banana")]);
        let model = select.init();
        assert_eq!(model, "a");
        assert_eq!(select.update(SelectMsg::Select("b".into()), model.clone()), Update::changed("b".to_string()));
        assert_eq!(select.update(SelectMsg::Select("z".into()), model.clone()), Update::none("a".to_string()));
        assert_eq!(text_content(&select.view("s", &model)), "AppleBanana");
    }

    #[test]
    fn empty_select() {
        let select = Select::<()>::new(Vec::<(String, String)>::new());
        assert_eq!(select.init(), "");
    }
}
