//! Value coercion: turn a source value into one a destination field accepts.
//!
//! Rules are tried in order, first match wins:
//!
//! 1. An absent `Option` source is a no-op.
//! 2. A present `Option` source is unwrapped and coerced further.
//! 3. Sequences and maps copy when their element types match.
//! 4. Records copy when they are the same struct.
//! 5. A nullable wrapper unwraps into its bare payload (or an `Option` of
//!    it) only with `force`; an invalid wrapper is then a no-op.
//! 6. Numbers convert between any widths with `as` semantics.
//! 7. Identical types assign as-is; a `Value` destination accepts anything.
//! 8. Anything else is a mismatch and the field is left untouched.
//!
//! A plain value headed for an `Option<T>` destination is coerced to `T` and
//! wrapped in `Some`.

use crate::error::CoercionError;
use crate::types::{Scalar, Ty};
use crate::values::Value;

/// Coerce `value` into the `target` type.
///
/// `Ok(None)` means "nothing to assign": the destination keeps what it
/// has. `force` comes from the tagged field's `force` option.
pub fn coerce(value: Value, target: &Ty, force: bool) -> Result<Option<Value>, CoercionError> {
    match (value, target) {
        (value, Ty::Any) => Ok(coerce_any(value, force)),

        // Rule 1
        (Value::Optional(None), _) => Ok(None),

        (Value::Optional(Some(inner)), Ty::Optional(inner_target)) => {
            Ok(coerce(*inner, inner_target, force)?.map(Value::some))
        }

        // Rule 2
        (Value::Optional(Some(inner)), target) => coerce(*inner, target, force),

        // Rule 3
        (Value::Seq { element, items }, Ty::Seq(target_element)) => {
            if element == **target_element {
                Ok(Some(Value::Seq { element, items }))
            } else {
                Err(CoercionError::Mismatch {
                    expected: target.clone(),
                    found: Ty::seq(element),
                })
            }
        }
        (Value::Map { element, entries }, Ty::Map(target_element)) => {
            if element == **target_element {
                Ok(Some(Value::Map { element, entries }))
            } else {
                Err(CoercionError::Mismatch {
                    expected: target.clone(),
                    found: Ty::map(element),
                })
            }
        }

        // Rule 4
        (Value::Record(record), Ty::Record { .. }) if record.ty() == *target => {
            Ok(Some(Value::Record(record)))
        }

        // Same wrapper type on both sides is a plain assignment.
        (value @ Value::Nullable { .. }, Ty::Nullable(_)) if value.ty() == *target => Ok(Some(value)),

        // Rule 5
        (value @ Value::Nullable { .. }, target) if !force => Err(CoercionError::Unforced {
            expected: target.clone(),
            found: value.ty(),
        }),
        (Value::Nullable { valid, payload }, target) => {
            if !valid {
                return Ok(None);
            }
            coerce(*payload, target, force)
        }

        (value, Ty::Optional(inner_target)) => {
            Ok(coerce(value, inner_target, force)?.map(Value::some))
        }

        (value, Ty::Scalar(scalar)) => match value.scalar() {
            // Rule 6
            Some(found) if found.is_numeric() && scalar.is_numeric() => {
                Ok(Some(cast_number(&value, *scalar)))
            }
            // Rule 7
            Some(found) if found == *scalar => Ok(Some(value)),
            _ => Err(mismatch(&value, target)),
        },

        // Rule 8
        (value, target) => Err(mismatch(&value, target)),
    }
}

/// A `Value` destination takes anything. Without `force` an `Option` is
/// unwrapped first, and an absent one is a no-op.
fn coerce_any(value: Value, force: bool) -> Option<Value> {
    match value {
        value @ Value::Optional(_) if force => Some(value),
        Value::Optional(None) => None,
        Value::Optional(Some(inner)) => coerce_any(*inner, force),
        value => Some(value),
    }
}

fn mismatch(value: &Value, target: &Ty) -> CoercionError {
    CoercionError::Mismatch {
        expected: target.clone(),
        found: value.ty(),
    }
}

macro_rules! cast_to {
    ($v:expr, $target:expr) => {
        match $target {
            Scalar::I8 => Value::I8($v as i8),
            Scalar::I16 => Value::I16($v as i16),
            Scalar::I32 => Value::I32($v as i32),
            Scalar::I64 => Value::I64($v as i64),
            Scalar::Isize => Value::Isize($v as isize),
            Scalar::U8 => Value::U8($v as u8),
            Scalar::U16 => Value::U16($v as u16),
            Scalar::U32 => Value::U32($v as u32),
            Scalar::U64 => Value::U64($v as u64),
            Scalar::Usize => Value::Usize($v as usize),
            Scalar::F32 => Value::F32($v as f32),
            Scalar::F64 => Value::F64($v as f64),
            Scalar::Bool | Scalar::Str | Scalar::Time => {
                unreachable!("cast_number called with non-numeric target {:?}", $target)
            }
        }
    };
}

/// Convert between numeric scalars.
///
/// Integers truncate or extend using two's complement, floats saturate
/// when converted to integers, and integer to float rounds to nearest.
fn cast_number(value: &Value, target: Scalar) -> Value {
    match *value {
        Value::I8(v) => cast_to!(v, target),
        Value::I16(v) => cast_to!(v, target),
        Value::I32(v) => cast_to!(v, target),
        Value::I64(v) => cast_to!(v, target),
        Value::Isize(v) => cast_to!(v, target),
        Value::U8(v) => cast_to!(v, target),
        Value::U16(v) => cast_to!(v, target),
        Value::U32(v) => cast_to!(v, target),
        Value::U64(v) => cast_to!(v, target),
        Value::Usize(v) => cast_to!(v, target),
        Value::F32(v) => cast_to!(v, target),
        Value::F64(v) => cast_to!(v, target),
        _ => unreachable!("cast_number called with non-numeric value {:?}", value),
    }
}

#[cfg(test)]
#[path = "coerce_test.rs"]
mod coerce_test;
