//! Registered fields.
//!
//! A field is a widget registered in a form under a [`FieldId`]. Each registration produces a *slot*, which
//! knows how to decode, update, validate and render the field's entry in a `FormState`, and a typed [`Field`]
//! accessor handed to the author of the form.
use crate::{
    decorate::{ListDecoration, ViewCtx},
    error::FieldError,
    ids::{FieldId, SubfieldId},
    msg::{FieldOperation, FormMsg},
    node::{map_nodes, Node},
    state::FormState,
    status::FieldStatus,
    widget::{AnyWidget, Update, Widget},
};
use serde_json::Value as Json;
use std::{fmt, rc::Rc};
use tracing::{debug, warn};

/// Untyped side of a registered field: what the dispatch engine needs.
pub(crate) trait Slot<E> {
    /// Serialized default value of the field.
    fn default_value(&self) -> Json;

    /// Applies an operation to the serialized value of the field.
    fn update(&self, subfield: SubfieldId, op: &FieldOperation, current: &Json) -> Update<Json>;

    fn errors(&self, current: &Json) -> Vec<FieldError<E>>;

    fn blur(&self, current: &Json) -> Json;

    /// Whether the rendered widget shows its own errors.
    fn reports_errors(&self) -> bool {
        false
    }
}

/// Typed side of a registered field.
pub(crate) trait TypedSlot<V, E>: Slot<E> {
    fn value(&self, current: &Json) -> V;

    /// Renders the field, without decoration.
    fn view(&self, field: FieldId, dom_id: &str, current: &Json, cx: &ViewCtx<E>) -> Vec<Node<FormMsg>>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A field holding a single widget model.
pub(crate) struct ScalarSlot<W> {
    widget: W,
}

impl<W> ScalarSlot<W> {
    pub(crate) fn new(widget: W) -> ScalarSlot<W> {
        ScalarSlot { widget }
    }
}

impl<W: Widget + 'static> Slot<W::Error> for ScalarSlot<W> {
    fn default_value(&self) -> Json {
        self.widget.init_model()
    }

    fn update(&self, subfield: SubfieldId, op: &FieldOperation, current: &Json) -> Update<Json> {
        match (subfield, op) {
            (SubfieldId::SingleValue, FieldOperation::Update(msg)) => self.widget.update_model(msg, current),
            _ => {
                debug!("{} on {:?} is not valid for a scalar field", op.kind(), subfield);
                Update::none(current.clone())
            }
        }
    }

    fn errors(&self, current: &Json) -> Vec<FieldError<W::Error>> {
        self.widget.errors_of(current)
    }

    fn blur(&self, current: &Json) -> Json {
        self.widget.blur_model(current)
    }

    fn reports_errors(&self) -> bool {
        self.widget.reports_errors()
    }
}

impl<W: Widget + 'static> TypedSlot<W::Value, W::Error> for ScalarSlot<W> {
    fn value(&self, current: &Json) -> W::Value {
        self.widget.value_of(current)
    }

    fn view(&self, field: FieldId, dom_id: &str, current: &Json, _cx: &ViewCtx<W::Error>) -> Vec<Node<FormMsg>> {
        map_nodes(self.widget.view_model(dom_id, current), move |payload| {
            FormMsg::update(field, SubfieldId::SingleValue, payload)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Maximum number of elements of a list field. Updates addressing elements past this bound are dropped.
pub const MAX_LIST_LEN: usize = 4096;

/// A field holding a list of widget models.
pub(crate) struct ListSlot<W> {
    widget: W,
    decoration: ListDecoration,
    initial_len: usize,
}

impl<W: Widget + 'static> ListSlot<W> {
    pub(crate) fn new(widget: W, decoration: ListDecoration, initial_len: usize) -> ListSlot<W> {
        ListSlot {
            widget,
            decoration,
            initial_len,
        }
    }

    /// Serialized elements of the list. Anything that isn't an array reads as an empty list.
    fn items(current: &Json) -> Vec<Json> {
        match current {
            Json::Array(items) => items.clone(),
            Json::Null => Vec::new(),
            other => {
                debug!("list field holds a non-array value, reading as empty: {other}");
                Vec::new()
            }
        }
    }

    fn items_ref(current: &Json) -> &[Json] {
        current.as_array().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<W: Widget + 'static> Slot<W::Error> for ListSlot<W> {
    fn default_value(&self) -> Json {
        Json::Array(vec![self.widget.init_model(); self.initial_len])
    }

    fn update(&self, subfield: SubfieldId, op: &FieldOperation, current: &Json) -> Update<Json> {
        let SubfieldId::ArrayElement(index) = subfield else {
            debug!("{} on a single value is not valid for a list field", op.kind());
            return Update::none(current.clone());
        };
        let mut items = Self::items(current);
        match op {
            FieldOperation::Update(msg) => {
                let Some(msg) = W::decode_msg(msg) else {
                    return Update::none(current.clone());
                };
                let Some(len) = index.checked_add(1).filter(|len| *len <= MAX_LIST_LEN) else {
                    warn!("cannot update element {index} of a list, lists hold at most {MAX_LIST_LEN} elements");
                    return Update::none(current.clone());
                };
                if items.len() < len {
                    items.resize(len, self.widget.init_model());
                }
                let model = self.widget.decode_model(&items[index]);
                let Update { model, effect } = self.widget.update(msg, model);
                items[index] = self.widget.encode_model(&model);
                Update::new(Json::Array(items), effect)
            }
            FieldOperation::Add => {
                items.push(self.widget.init_model());
                Update::changed(Json::Array(items))
            }
            FieldOperation::Remove => {
                if index < items.len() {
                    items.remove(index);
                    Update::changed(Json::Array(items))
                } else {
                    warn!("cannot remove element {index} of a list of {} elements", items.len());
                    Update::none(current.clone())
                }
            }
        }
    }

    fn errors(&self, current: &Json) -> Vec<FieldError<W::Error>> {
        Self::items_ref(current)
            .iter()
            .flat_map(|item| self.widget.errors_of(item))
            .collect()
    }

    fn blur(&self, current: &Json) -> Json {
        Json::Array(
            Self::items_ref(current)
                .iter()
                .map(|item| self.widget.blur_model(item))
                .collect(),
        )
    }

    fn reports_errors(&self) -> bool {
        self.widget.reports_errors()
    }
}

impl<W: Widget + 'static> TypedSlot<Vec<W::Value>, W::Error> for ListSlot<W> {
    fn value(&self, current: &Json) -> Vec<W::Value> {
        Self::items_ref(current)
            .iter()
            .map(|item| self.widget.value_of(item))
            .collect()
    }

    fn view(&self, field: FieldId, dom_id: &str, current: &Json, cx: &ViewCtx<W::Error>) -> Vec<Node<FormMsg>> {
        let items = Self::items_ref(current);
        let mut rendered = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let subfield = SubfieldId::ArrayElement(index);
            let item_dom_id = subfield.dom_id(dom_id);
            let content = map_nodes(self.widget.view_model(&item_dom_id, item), move |payload| {
                FormMsg::update(field, subfield, payload)
            });
            rendered.extend((self.decoration.remove)(
                &cx.env,
                &item_dom_id,
                FormMsg::remove(field, index),
                content,
            ));
        }
        (self.decoration.add)(&cx.env, dom_id, FormMsg::add(field, items.len()), rendered)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Typed accessor to a field of a form.
///
/// Fields don't hold any state: every accessor decodes the field's entry of the `FormState` it is given.
pub struct Field<V, E> {
    id: FieldId,
    multiple: bool,
    slot: Rc<dyn TypedSlot<V, E>>,
    cx: Rc<ViewCtx<E>>,
}

impl<V, E> Clone for Field<V, E> {
    fn clone(&self) -> Self {
        Field {
            id: self.id,
            multiple: self.multiple,
            slot: self.slot.clone(),
            cx: self.cx.clone(),
        }
    }
}

impl<V, E> fmt::Debug for Field<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("multiple", &self.multiple)
            .finish_non_exhaustive()
    }
}

impl<V, E> Field<V, E> {
    pub(crate) fn new(id: FieldId, multiple: bool, slot: Rc<dyn TypedSlot<V, E>>, cx: Rc<ViewCtx<E>>) -> Field<V, E> {
        Field { id, multiple, slot, cx }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Whether this is a list field.
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// DOM id of the field.
    pub fn dom_id(&self, state: &FormState) -> String {
        self.id.dom_id(state.parent_dom_id())
    }

    pub fn status(&self, state: &FormState) -> FieldStatus {
        state.status(self.id)
    }

    /// Current value of the field.
    pub fn value(&self, state: &FormState) -> V {
        self.slot.value(state.raw(self.id))
    }

    /// Validation errors of the field, whether or not the user has visited it.
    pub fn errors(&self, state: &FormState) -> Vec<FieldError<E>> {
        self.slot.errors(state.raw(self.id))
    }

    /// Validation errors that should be shown next to the field: none until the field has been blurred, and none
    /// for fields that render their errors themselves (nested forms).
    pub fn visible_errors(&self, state: &FormState) -> Vec<FieldError<E>> {
        if self.status(state).shows_errors() && !self.slot.reports_errors() {
            self.errors(state)
        } else {
            Vec::new()
        }
    }

    /// Renders the field without decoration.
    pub fn view_content(&self, state: &FormState) -> Vec<Node<FormMsg>> {
        self.slot
            .view(self.id, &self.dom_id(state), state.raw(self.id), &self.cx)
    }

    /// Renders the field, decorated with its visible errors.
    pub fn view(&self, state: &FormState) -> Vec<Node<FormMsg>> {
        let dom_id = self.dom_id(state);
        let content = self.slot.view(self.id, &dom_id, state.raw(self.id), &self.cx);
        let errors = self.visible_errors(state);
        self.cx.decorator.field(&self.cx.env, &dom_id, content, &errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{Counter, CounterMsg};
    use serde_json::json;

    fn increment() -> FieldOperation {
        FieldOperation::Update(Counter::encode_msg(&CounterMsg::Increment))
    }

    #[test]
    fn scalar_rejects_list_operations() {
        let slot = ScalarSlot::new(Counter::starting_at(0));
        let current = json!(4);
        assert_eq!(slot.update(SubfieldId::SingleValue, &FieldOperation::Add, &current), Update::none(json!(4)));
        assert_eq!(
            slot.update(SubfieldId::ArrayElement(0), &increment(), &current),
            Update::none(json!(4))
        );
        assert_eq!(slot.update(SubfieldId::SingleValue, &increment(), &current), Update::changed(json!(5)));
    }

    #[test]
    fn list_update_pads_short_lists() {
        let slot = ListSlot::new(Counter::starting_at(1), ListDecoration::default(), 0);
        let update = slot.update(SubfieldId::ArrayElement(2), &increment(), &json!([7]));
        assert_eq!(update, Update::changed(json!([7, 1, 2])));
        // undecodable list
        let update = slot.update(SubfieldId::ArrayElement(0), &increment(), &json!("garbage"));
        assert_eq!(update, Update::changed(json!([2])));
    }

    #[test]
    fn list_update_ignores_undecodable_messages() {
        let slot = ListSlot::new(Counter::starting_at(1), ListDecoration::default(), 0);
        let garbage = FieldOperation::Update(json!({"garbage": 1}));
        assert_eq!(slot.update(SubfieldId::ArrayElement(3), &garbage, &json!([])), Update::none(json!([])));
        assert_eq!(slot.update(SubfieldId::ArrayElement(0), &garbage, &json!([5])), Update::none(json!([5])));
    }

    #[test]
    fn list_update_rejects_huge_indices() {
        let slot = ListSlot::new(Counter::starting_at(1), ListDecoration::default(), 0);
        for index in [usize::MAX, 1_000_000_000, MAX_LIST_LEN] {
            let update = slot.update(SubfieldId::ArrayElement(index), &increment(), &json!([7]));
            assert_eq!(update, Update::none(json!([7])));
        }
        let last = slot.update(SubfieldId::ArrayElement(MAX_LIST_LEN - 1), &increment(), &json!([]));
        assert_eq!(last.model.as_array().map(Vec::len), Some(MAX_LIST_LEN));
    }

    #[test]
    fn list_add_remove() {
        let slot = ListSlot::new(Counter::starting_at(1), ListDecoration::default(), 1);
        let current = slot.default_value();
        assert_eq!(current, json!([1]));
        let current = slot.update(SubfieldId::ArrayElement(1), &FieldOperation::Add, &current).model;
        assert_eq!(current, json!([1, 1]));
        let removed = slot.update(SubfieldId::ArrayElement(0), &FieldOperation::Remove, &current);
        assert_eq!(removed, Update::changed(json!([1])));
        let out_of_range = slot.update(SubfieldId::ArrayElement(5), &FieldOperation::Remove, &current);
        assert_eq!(out_of_range, Update::none(json!([1, 1])));
        let single = slot.update(SubfieldId::SingleValue, &FieldOperation::Add, &current);
        assert_eq!(single, Update::none(json!([1, 1])));
    }

    #[test]
    fn list_values_and_errors() {
        let slot = ListSlot::new(Counter::starting_at(0), ListDecoration::default(), 0);
        let current = json!([3, -1, "stale", -2]);
        assert_eq!(slot.value(&current), vec![3, -1, 0, -2]);
        assert_eq!(slot.errors(&current).len(), 2);
    }
}
