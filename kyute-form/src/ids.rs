use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// Field ID.
///
/// Identifies a field among the fields of a form. IDs are handed out in registration order, starting at zero,
/// so they are only meaningful for the form definition that produced them.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct FieldId(u32);

impl FieldId {
    /// ID of the first field registered in a form.
    pub const FIRST: FieldId = FieldId(0);

    pub const fn from_u32(value: u32) -> FieldId {
        FieldId(value)
    }

    /// Converts the ID to a `u32` value.
    pub fn to_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn next(self) -> FieldId {
        FieldId(self.0 + 1)
    }

    /// Returns the DOM id of this field inside a form whose root DOM id is `parent`.
    pub fn dom_id(self, parent: &str) -> String {
        format!("{parent}-f{}", self.0)
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FieldId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldId(s.parse()?))
    }
}

/// Locates a value inside a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubfieldId {
    /// The whole value of a scalar field.
    SingleValue,
    /// One element of a list field.
    ArrayElement(usize),
}

impl SubfieldId {
    /// Returns the DOM id of the subfield, given the DOM id of its field.
    pub fn dom_id(self, field_dom_id: &str) -> String {
        match self {
            SubfieldId::SingleValue => field_dom_id.to_owned(),
            SubfieldId::ArrayElement(index) => format!("{field_dom_id}-{index}"),
        }
    }
}
