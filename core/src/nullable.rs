//! Nullable wrappers: a payload plus an explicit validity flag.
//!
//! These model database-style nullable columns, where "no value" is carried
//! next to a zero payload instead of through `Option`. The copy engine only
//! unwraps them into plain fields when the destination field is tagged
//! `force`.

use chrono::{DateTime, Utc};

use crate::bridge::{Bridge, ScalarBridge};
use crate::types::Ty;
use crate::values::Value;

/// A scalar payload with a validity flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null<T> {
    pub value: T,
    pub valid: bool,
}

pub type NullString = Null<String>;
pub type NullInt64 = Null<i64>;
pub type NullInt32 = Null<i32>;
pub type NullFloat64 = Null<f64>;
pub type NullBool = Null<bool>;
pub type NullTime = Null<DateTime<Utc>>;

impl<T> Null<T> {
    /// A valid wrapper around `value`.
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Default> Null<T> {
    /// An invalid wrapper with a zero payload.
    pub fn null() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }

    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::null(),
        }
    }
}

impl<T: Default> From<Option<T>> for Null<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T: ScalarBridge> Bridge for Null<T> {
    fn ty() -> Ty {
        Ty::Nullable(T::SCALAR)
    }

    fn into_value(self) -> Value {
        Value::Nullable {
            valid: self.valid,
            payload: Box::new(self.value.into_value()),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Nullable { valid, payload } => Some(Self {
                value: T::from_value(*payload)?,
                valid,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;

    #[test]
    fn test_null_has_zero_payload() {
        let null = NullString::null();
        assert!(!null.is_valid());
        assert_eq!(null.value, "");
        assert_eq!(null.as_option(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(NullInt64::from(Some(4)).into_option(), Some(4));
        assert_eq!(NullInt64::from(None).into_option(), None);
    }

    #[test]
    fn test_invalid_payload_is_preserved_through_value() {
        let wrapper = NullString {
            value: "stale".to_string(),
            valid: false,
        };
        let value = wrapper.clone().into_value();
        assert_eq!(value.ty(), Ty::Nullable(Scalar::Str));
        assert_eq!(NullString::from_value(value), Some(wrapper));
    }

    #[test]
    fn test_rejects_plain_payload() {
        assert_eq!(NullBool::from_value(Value::Bool(true)), None);
    }
}
