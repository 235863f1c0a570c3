//! Serialized form state.
use crate::{
    error::StateError,
    ids::FieldId,
    status::FieldStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use tracing::{debug, warn};

static NULL: Json = Json::Null;

/// State of a form.
///
/// This is the only piece of state that the host application needs to keep for a form. It maps each field to its
/// serialized widget model and its interaction status, and carries the DOM id prefix of the form.
///
/// The state is never modified by widgets: every update produces a new value through the form's dispatch table
/// (see `Form::update`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormState {
    parent_dom_id: String,
    values: BTreeMap<FieldId, Json>,
    field_status: BTreeMap<FieldId, FieldStatus>,
}

impl FormState {
    /// Creates an empty state for a form rooted at the given DOM id.
    pub fn new(parent_dom_id: impl Into<String>) -> FormState {
        FormState {
            parent_dom_id: parent_dom_id.into(),
            ..Default::default()
        }
    }

    /// DOM id of the root of the form.
    pub fn parent_dom_id(&self) -> &str {
        &self.parent_dom_id
    }

    pub fn set_parent_dom_id(&mut self, parent_dom_id: impl Into<String>) {
        self.parent_dom_id = parent_dom_id.into();
    }

    #[must_use]
    pub fn with_parent_dom_id(mut self, parent_dom_id: impl Into<String>) -> FormState {
        self.set_parent_dom_id(parent_dom_id);
        self
    }

    /// Returns the serialized model of a field, or `null` if the state has no entry for it.
    pub fn raw(&self, field: FieldId) -> &Json {
        self.values.get(&field).unwrap_or(&NULL)
    }

    /// Returns whether the state has an entry for the field.
    pub fn contains(&self, field: FieldId) -> bool {
        self.values.contains_key(&field)
    }

    /// Returns the status of a field.
    pub fn status(&self, field: FieldId) -> FieldStatus {
        self.field_status.get(&field).copied().unwrap_or_default()
    }

    /// IDs of the fields that have a value in this state.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.values.keys().copied()
    }

    /// Whether any field has been changed or visited.
    pub fn is_changed(&self) -> bool {
        self.field_status.values().any(|status| *status > FieldStatus::NotVisited)
    }

    pub(crate) fn insert_default(&mut self, field: FieldId, value: Json) {
        self.values.insert(field, value);
    }

    pub(crate) fn set(&mut self, field: FieldId, value: Json, status: FieldStatus) {
        self.values.insert(field, value);
        if status == FieldStatus::NotVisited {
            self.field_status.remove(&field);
        } else {
            self.field_status.insert(field, status);
        }
    }

    /// Serializes the state to a JSON value.
    pub fn encode(&self) -> Json {
        serde_json::to_value(self).unwrap_or_else(|err| {
            warn!("failed to encode form state: {err}");
            Json::Null
        })
    }

    /// Reads a state from a JSON value.
    ///
    /// This never fails: missing, unknown or malformed entries are skipped, and anything that is not an object
    /// produces an empty state.
    pub fn decode(value: &Json) -> FormState {
        let Some(object) = value.as_object() else {
            debug!("form state is not an object ({}), using an empty state", json_kind(value));
            return FormState::default();
        };

        let parent_dom_id = object
            .get("parentDomId")
            .and_then(Json::as_str)
            .unwrap_or_default()
            .to_owned();

        let values = object
            .get("values")
            .and_then(Json::as_object)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|(key, value)| Some((key.parse::<FieldId>().ok()?, value.clone())))
                    .collect()
            })
            .unwrap_or_default();

        let field_status = object
            .get("fieldStatus")
            .and_then(Json::as_object)
            .map(|statuses| {
                statuses
                    .iter()
                    .filter_map(|(key, value)| {
                        let field = key.parse::<FieldId>().ok()?;
                        match FieldStatus::deserialize(value) {
                            Ok(status) => Some((field, status)),
                            Err(err) => {
                                debug!("ignoring status of field {key}: {err}");
                                None
                            }
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        FormState {
            parent_dom_id,
            values,
            field_status,
        }
    }

    /// Serializes the state to JSON text.
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a state from JSON text.
    ///
    /// Fails only if the text isn't a JSON object; the contents of the object are read leniently as in
    /// [`FormState::decode`].
    pub fn from_json(text: &str) -> Result<FormState, StateError> {
        let value: Json = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(StateError::NotAnObject(json_kind(&value)));
        }
        Ok(FormState::decode(&value))
    }

    /// Parses a state from JSON text, falling back to an empty state.
    pub fn from_json_lossy(text: &str) -> FormState {
        FormState::from_json(text).unwrap_or_else(|err| {
            debug!("{err}");
            FormState::default()
        })
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> FormState {
        let mut state = FormState::new("signup");
        state.insert_default(FieldId::from_u32(0), json!("alice"));
        state.set(FieldId::from_u32(1), json!([true, false]), FieldStatus::Blurred);
        state
    }

    #[test]
    fn encode_layout() {
        assert_eq!(
            sample().encode(),
            json!({
                "parentDomId": "signup",
                "values": { "0": "alice", "1": [true, false] },
                "fieldStatus": { "1": "Blurred" },
            })
        );
    }

    #[test]
    fn decode_encode() {
        let state = sample();
        assert_eq!(FormState::decode(&state.encode()), state);
        assert_eq!(FormState::from_json(&state.to_json().unwrap()).unwrap(), state);
    }

    #[test]
    fn decode_skips_garbage() {
        let decoded = FormState::decode(&json!({
            "parentDomId": 42,
            "values": { "0": "kept", "zero": "dropped" },
            "fieldStatus": { "0": "Changed", "1": "Exploded" },
            "somethingElse": true,
        }));
        assert_eq!(decoded.parent_dom_id(), "");
        assert_eq!(decoded.raw(FieldId::from_u32(0)), &json!("kept"));
        assert_eq!(decoded.fields().count(), 1);
        assert_eq!(decoded.status(FieldId::from_u32(0)), FieldStatus::Changed);
        assert_eq!(decoded.status(FieldId::from_u32(1)), FieldStatus::NotVisited);
    }

    #[test]
    fn decode_non_object() {
        assert_eq!(FormState::decode(&json!([1, 2, 3])), FormState::default());
        assert_eq!(FormState::decode(&Json::Null), FormState::default());
    }

    #[test]
    fn from_json_errors() {
        assert!(matches!(FormState::from_json("{"), Err(StateError::Json(_))));
        assert!(matches!(FormState::from_json("[]"), Err(StateError::NotAnObject("an array"))));
        assert_eq!(FormState::from_json_lossy("nonsense"), FormState::default());
    }

    #[test]
    fn missing_entries() {
        let state = FormState::new("f");
        assert_eq!(state.raw(FieldId::from_u32(7)), &Json::Null);
        assert_eq!(state.status(FieldId::from_u32(7)), FieldStatus::NotVisited);
        assert!(!state.is_changed());
        assert!(sample().is_changed());
    }
}
