//! Fields whose shape depends on a choice of the user.
use crate::{
    error::FieldError,
    form::Form,
    msg::FormMsg,
    node::{map_nodes, Node},
    state::FormState,
    widget::{Update, Widget},
};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Model of a [`Variants`] widget.
///
/// The states of all variants are kept, so that switching back to a variant restores what the user entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantModel {
    /// Serialized model of the selector.
    pub selector: Json,
    /// State of each variant, by name.
    pub variants: BTreeMap<String, FormState>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VariantMsg {
    /// Serialized message for the selector.
    Select(Json),
    /// Message for the form of the named variant.
    Variant(String, FormMsg),
}

/// A field that delegates to one of several sub-forms, all producing the same output type.
///
/// A selector widget, whose value is the name of a variant, decides which sub-form is active. Only the active
/// sub-form is rendered, validated and read. If the selector names no known variant, the first one is used.
///
/// Sub-forms render their own errors, so the field itself isn't decorated with errors. As a consequence,
/// errors of the selector are reported by [`Form::errors`] but never displayed.
pub struct Variants<S, D, E> {
    selector: S,
    variants: Vec<(String, Form<D, E>)>,
}

impl<S, D, E> Variants<S, D, E>
where
    S: Widget<Value = String, Error = E>,
{
    /// Creates the widget. There is always at least one variant.
    pub fn new(
        selector: S,
        first: (impl Into<String>, Form<D, E>),
        rest: impl IntoIterator<Item = (String, Form<D, E>)>,
    ) -> Variants<S, D, E> {
        let (name, form) = first;
        let mut variants = vec![(name.into(), form)];
        variants.extend(rest);
        Variants { selector, variants }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variants.iter().map(|(name, _)| name.as_str())
    }

    fn selector_model(&self, model: &VariantModel) -> S::Model {
        self.selector.decode_model(&model.selector)
    }

    fn form(&self, name: &str) -> Option<&Form<D, E>> {
        self.variants.iter().find(|(n, _)| n == name).map(|(_, form)| form)
    }

    /// Index, name and form of the active variant.
    fn active(&self, model: &VariantModel) -> (usize, &str, &Form<D, E>) {
        let selected = self.selector.value(&self.selector_model(model));
        let index = self
            .variants
            .iter()
            .position(|(name, _)| *name == selected)
            .unwrap_or_else(|| {
                debug!("no variant named {selected:?}, using the first one");
                0
            });
        let (name, form) = &self.variants[index];
        (index, name, form)
    }

    fn state_of(&self, name: &str, form: &Form<D, E>, model: &VariantModel) -> FormState {
        model.variants.get(name).cloned().unwrap_or_else(|| form.init())
    }
}

impl<S, D, E> Widget for Variants<S, D, E>
where
    S: Widget<Value = String, Error = E> + 'static,
    D: 'static,
    E: 'static,
{
    type Model = VariantModel;
    type Msg = VariantMsg;
    type Value = D;
    type Error = E;

    fn init(&self) -> VariantModel {
        VariantModel {
            selector: self.selector.encode_model(&self.selector.init()),
            variants: self
                .variants
                .iter()
                .map(|(name, form)| (name.clone(), form.init()))
                .collect(),
        }
    }

    fn value(&self, model: &VariantModel) -> D {
        let (_, name, form) = self.active(model);
        form.extract(&self.state_of(name, form, model))
    }

    fn validate(&self, model: &VariantModel) -> Vec<FieldError<E>> {
        let mut errors = self.selector.validate(&self.selector_model(model));
        let (_, name, form) = self.active(model);
        errors.extend(form.errors(&self.state_of(name, form, model)));
        errors
    }

    fn reports_own_errors(&self) -> bool {
        true
    }

    fn view(&self, dom_id: &str, model: &VariantModel) -> Vec<Node<VariantMsg>> {
        let mut nodes = map_nodes(
            self.selector.view(dom_id, &self.selector_model(model)),
            |msg: S::Msg| VariantMsg::Select(S::encode_msg(&msg)),
        );
        let (index, name, form) = self.active(model);
        let state = self
            .state_of(name, form, model)
            .with_parent_dom_id(format!("{dom_id}-v{index}"));
        let name = name.to_owned();
        nodes.extend(map_nodes(form.view_nodes(&state), move |msg| {
            VariantMsg::Variant(name.clone(), msg)
        }));
        nodes
    }

    fn update(&self, msg: VariantMsg, mut model: VariantModel) -> Update<VariantModel> {
        match msg {
            VariantMsg::Select(payload) => {
                let Some(msg) = S::decode_msg(&payload) else {
                    return Update::none(model);
                };
                let Update { model: selector, effect } = self.selector.update(msg, self.selector_model(&model));
                model.selector = self.selector.encode_model(&selector);
                Update::new(model, effect)
            }
            VariantMsg::Variant(name, msg) => {
                let Some(form) = self.form(&name) else {
                    warn!("message for unknown variant {name:?} dropped");
                    return Update::none(model);
                };
                let Update { model: state, effect } = form.dispatch(msg, self.state_of(&name, form, &model));
                model.variants.insert(name, state);
                Update::new(model, effect)
            }
        }
    }

    fn blur(&self, model: VariantModel) -> VariantModel {
        VariantModel {
            selector: self
                .selector
                .encode_model(&self.selector.blur(self.selector_model(&model))),
            variants: self
                .variants
                .iter()
                .map(|(name, form)| (name.clone(), form.blur_all(self.state_of(name, form, &model))))
                .collect(),
        }
    }

    /// Reads each part of the model on its own, so that a stale variant doesn't reset the others.
    fn decode_model(&self, value: &Json) -> VariantModel {
        let selector = self.selector.decode_model(value.get("selector").unwrap_or(&Json::Null));
        let selector = self.selector.encode_model(&selector);
        let variants = self
            .variants
            .iter()
            .map(|(name, form)| {
                let state = match value.get("variants").and_then(|variants| variants.get(name)) {
                    Some(state) => form.decode_state(state),
                    None => form.init(),
                };
                (name.clone(), state)
            })
            .collect();
        VariantModel { selector, variants }
    }
}
