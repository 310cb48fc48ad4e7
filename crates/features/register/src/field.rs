//! Field state store: value and touched status of every registration field.

use strum::{Display, EnumIter, EnumString};

/// Registration fields in their declared order.
///
/// The order is the dependency chain used by the validator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum FieldId {
    Name,
    Username,
    Password,
    #[strum(to_string = "passwordConfirm", serialize = "password-confirm", serialize = "confirm")]
    PasswordConfirm,
}

impl FieldId {
    /// Every field, first to last.
    pub const ALL: [Self; 4] = [Self::Name, Self::Username, Self::Password, Self::PasswordConfirm];
    pub const COUNT: usize = Self::ALL.len();

    /// Position in the chain, `0` for [`FieldId::Name`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: FieldId,
    value: String,
    touched: bool,
}

impl Field {
    const fn new(id: FieldId) -> Self {
        Self { id, value: String::new(), touched: false }
    }

    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the field ever received input.
    #[must_use]
    pub const fn touched(&self) -> bool {
        self.touched
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// The whole form: the ordered fields plus the field flagged by a failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: [Field; FieldId::COUNT],
    conflict: Option<FieldId>,
}

impl Default for FormState {
    fn default() -> Self {
        Self { fields: FieldId::ALL.map(Field::new), conflict: None }
    }
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    #[must_use]
    pub fn value(&self, id: FieldId) -> &str {
        self.field(id).value()
    }

    /// Fields in chain order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> + DoubleEndedIterator {
        self.fields.iter()
    }

    /// Stores a new value and marks the field touched. Returns whether the value changed.
    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) -> bool {
        let value = value.into();
        let field = &mut self.fields[id.index()];
        field.touched = true;
        if field.value == value {
            return false;
        }
        field.value = value;
        true
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(|f| !f.is_empty())
    }

    #[must_use]
    pub const fn conflict_field(&self) -> Option<FieldId> {
        self.conflict
    }

    pub const fn set_conflict(&mut self, id: FieldId) {
        self.conflict = Some(id);
    }

    pub const fn clear_conflict(&mut self) -> Option<FieldId> {
        self.conflict.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn order_matches_declaration() {
        let iterated: Vec<_> = FieldId::iter().collect();
        assert_eq!(iterated, FieldId::ALL);
        assert_eq!(FieldId::PasswordConfirm.index(), 3);
    }

    #[test]
    fn ids_render_and_parse() {
        assert_eq!(FieldId::PasswordConfirm.to_string(), "passwordConfirm");
        assert_eq!(FieldId::Username.to_string(), "username");
        assert_eq!("password-confirm".parse::<FieldId>().unwrap(), FieldId::PasswordConfirm);
        assert_eq!("passwordConfirm".parse::<FieldId>().unwrap(), FieldId::PasswordConfirm);
        assert_eq!("name".parse::<FieldId>().unwrap(), FieldId::Name);
        assert_eq!("UserName".parse::<FieldId>().unwrap(), FieldId::Username);
        assert!("email".parse::<FieldId>().is_err());
    }

    #[test]
    fn new_state_is_empty_and_untouched() {
        let state = FormState::new();
        assert!(state.fields().all(|f| f.is_empty() && !f.touched()));
        assert!(!state.is_complete());
        assert_eq!(state.conflict_field(), None);
    }

    #[test]
    fn set_value_touches_even_without_change() {
        let mut state = FormState::new();
        assert!(!state.set_value(FieldId::Name, ""));
        assert!(state.field(FieldId::Name).touched());

        assert!(state.set_value(FieldId::Name, "Fides"));
        assert!(!state.set_value(FieldId::Name, "Fides"));
        assert_eq!(state.value(FieldId::Name), "Fides");
    }

    #[test]
    fn conflict_round_trip() {
        let mut state = FormState::new();
        state.set_conflict(FieldId::Username);
        assert_eq!(state.conflict_field(), Some(FieldId::Username));
        assert_eq!(state.clear_conflict(), Some(FieldId::Username));
        assert_eq!(state.conflict_field(), None);
    }
}
