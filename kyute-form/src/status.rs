use serde::{Deserialize, Serialize};

/// Interaction status of a field.
///
/// Statuses form a chain `NotVisited < Changed < Blurred`. A field's status only ever moves up the chain:
/// updates are folded in with [`FieldStatus::join`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldStatus {
    /// The user hasn't interacted with the field yet.
    #[default]
    NotVisited,
    /// The value was edited, but the user hasn't left the field yet.
    Changed,
    /// The user has left the field at least once.
    Blurred,
}

impl FieldStatus {
    /// Least upper bound of two statuses.
    #[must_use]
    pub fn join(self, other: FieldStatus) -> FieldStatus {
        self.max(other)
    }

    /// Folds the effect of an update into this status.
    #[must_use]
    pub fn apply(self, effect: Effect) -> FieldStatus {
        match effect.status() {
            Some(status) => self.join(status),
            None => self,
        }
    }

    /// Whether validation errors of the field should be shown to the user.
    pub fn shows_errors(self) -> bool {
        self >= FieldStatus::Blurred
    }
}

/// Effect of a widget update on the status of its field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Effect {
    /// Nothing observable happened.
    #[default]
    NoEffect,
    /// The value has changed.
    WasChanged,
    /// The user has left the widget.
    WasBlurred,
}

impl Effect {
    /// The status that this effect raises its field to, if any.
    pub fn status(self) -> Option<FieldStatus> {
        match self {
            Effect::NoEffect => None,
            Effect::WasChanged => Some(FieldStatus::Changed),
            Effect::WasBlurred => Some(FieldStatus::Blurred),
        }
    }

    /// Combines the effects of two updates.
    #[must_use]
    pub fn merge(self, other: Effect) -> Effect {
        self.max(other)
    }
}
