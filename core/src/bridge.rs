//! Conversions between Rust field types and dynamic [`Value`]s.
//!
//! Every field type that takes part in a copy implements [`Bridge`]. The
//! derive macro calls `ty()` to fill the descriptor table, `into_value` for
//! getters and `from_value` for setters. Structs deriving `Reflect` get an
//! implementation as well, so they can be nested inside other records.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use chrono::{DateTime, Utc};

use crate::types::{Scalar, Ty};
use crate::values::Value;

/// Bridge between a Rust type and the engine's dynamic representation.
pub trait Bridge: Sized {
    /// The declared type as seen by the engine.
    fn ty() -> Ty;

    /// Move `self` into a dynamic value.
    fn into_value(self) -> Value;

    /// Take a value of exactly [`Bridge::ty`] back out.
    ///
    /// Returns `None` if the value has a different shape. The coercion
    /// engine converts values before calling this, so a `None` here means a
    /// coercion rule produced the wrong shape.
    fn from_value(value: Value) -> Option<Self>;
}

/// Scalars that can be carried by a nullable wrapper.
pub trait ScalarBridge: Bridge + Default {
    const SCALAR: Scalar;
}

macro_rules! scalar_bridge {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Bridge for $ty {
                fn ty() -> Ty {
                    Ty::Scalar(Scalar::$variant)
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl ScalarBridge for $ty {
                const SCALAR: Scalar = Scalar::$variant;
            }
        )*
    };
}

scalar_bridge! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Str,
    DateTime<Utc> => Time,
}

impl<T: Bridge> Bridge for Option<T> {
    fn ty() -> Ty {
        Ty::optional(T::ty())
    }

    fn into_value(self) -> Value {
        Value::Optional(self.map(|v| Box::new(v.into_value())))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Optional(None) => Some(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            _ => None,
        }
    }
}

impl<T: Bridge> Bridge for Vec<T> {
    fn ty() -> Ty {
        Ty::seq(T::ty())
    }

    fn into_value(self) -> Value {
        Value::Seq {
            element: T::ty(),
            items: self.into_iter().map(Bridge::into_value).collect(),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Seq { items, .. } => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: Bridge> Bridge for BTreeMap<String, T> {
    fn ty() -> Ty {
        Ty::map(T::ty())
    }

    fn into_value(self) -> Value {
        Value::Map {
            element: T::ty(),
            entries: self.into_iter().map(|(k, v)| (k, v.into_value())).collect(),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Map { entries, .. } => entries
                .into_iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
                .collect(),
            _ => None,
        }
    }
}

impl<T: Bridge, S: BuildHasher + Default> Bridge for HashMap<String, T, S> {
    fn ty() -> Ty {
        Ty::map(T::ty())
    }

    fn into_value(self) -> Value {
        Value::Map {
            element: T::ty(),
            entries: self.into_iter().map(|(k, v)| (k, v.into_value())).collect(),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Map { entries, .. } => entries
                .into_iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
                .collect(),
            _ => None,
        }
    }
}

/// A `Value` field accepts anything, like an untyped slot.
impl Bridge for Value {
    fn ty() -> Ty {
        Ty::Any
    }

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}
