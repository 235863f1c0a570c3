use crate::ids::{FieldId, SubfieldId};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// Operation carried by a form message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldOperation {
    /// Appends a default element to a list field.
    Add,
    /// Removes an element from a list field.
    Remove,
    /// Serialized message for the field's widget.
    Update(Json),
}

impl FieldOperation {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FieldOperation::Add => "add",
            FieldOperation::Remove => "remove",
            FieldOperation::Update(_) => "update",
        }
    }
}

/// Message of a form.
///
/// Every form, whatever the number and kind of its fields, uses this single message type: widget messages
/// are serialized and addressed by field and subfield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormMsg {
    pub field: FieldId,
    pub subfield: SubfieldId,
    pub op: FieldOperation,
}

impl FormMsg {
    pub fn new(field: FieldId, subfield: SubfieldId, op: FieldOperation) -> FormMsg {
        FormMsg { field, subfield, op }
    }

    /// Forwards a serialized widget message to a field.
    pub fn update(field: FieldId, subfield: SubfieldId, payload: Json) -> FormMsg {
        FormMsg::new(field, subfield, FieldOperation::Update(payload))
    }

    /// Appends an element to a list field currently holding `len` elements.
    pub fn add(field: FieldId, len: usize) -> FormMsg {
        FormMsg::new(field, SubfieldId::ArrayElement(len), FieldOperation::Add)
    }

    /// Removes the element at `index` from a list field.
    pub fn remove(field: FieldId, index: usize) -> FormMsg {
        FormMsg::new(field, SubfieldId::ArrayElement(index), FieldOperation::Remove)
    }
}
