//! Dynamic values moved between source and destination.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::types::{Scalar, Ty};

/// A dynamically typed value read from a field or returned by a method.
///
/// Sequences and maps carry their element type, so containers can be
/// checked against a destination without looking at their elements (and
/// empty containers still know what they hold).
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(String),
    Time(DateTime<Utc>),
    Optional(Option<Box<Value>>),
    Seq { element: Ty, items: Vec<Value> },
    Map { element: Ty, entries: BTreeMap<String, Value> },
    Nullable { valid: bool, payload: Box<Value> },
    Record(RecordValue),
}

impl Value {
    pub fn some(value: Value) -> Self {
        Value::Optional(Some(Box::new(value)))
    }

    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// The type this value would be declared with.
    ///
    /// An absent optional does not know its payload type and reports
    /// `Option<Value>`.
    pub fn ty(&self) -> Ty {
        match self {
            Value::Optional(Some(inner)) => Ty::optional(inner.ty()),
            Value::Optional(None) => Ty::optional(Ty::Any),
            Value::Seq { element, .. } => Ty::seq(element.clone()),
            Value::Map { element, .. } => Ty::map(element.clone()),
            Value::Nullable { payload, .. } => match payload.scalar() {
                Some(scalar) => Ty::Nullable(scalar),
                None => Ty::Any,
            },
            Value::Record(record) => record.ty(),
            other => match other.scalar() {
                Some(scalar) => Ty::Scalar(scalar),
                None => Ty::Any,
            },
        }
    }

    /// The scalar kind of this value, if it is a scalar.
    pub fn scalar(&self) -> Option<Scalar> {
        let scalar = match self {
            Value::Bool(_) => Scalar::Bool,
            Value::I8(_) => Scalar::I8,
            Value::I16(_) => Scalar::I16,
            Value::I32(_) => Scalar::I32,
            Value::I64(_) => Scalar::I64,
            Value::Isize(_) => Scalar::Isize,
            Value::U8(_) => Scalar::U8,
            Value::U16(_) => Scalar::U16,
            Value::U32(_) => Scalar::U32,
            Value::U64(_) => Scalar::U64,
            Value::Usize(_) => Scalar::Usize,
            Value::F32(_) => Scalar::F32,
            Value::F64(_) => Scalar::F64,
            Value::Str(_) => Scalar::Str,
            Value::Time(_) => Scalar::Time,
            _ => return None,
        };
        Some(scalar)
    }

    pub fn is_numeric(&self) -> bool {
        self.scalar().is_some_and(Scalar::is_numeric)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload widened to `i64`, for any integer width that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(v.into()),
            Value::I16(v) => Some(v.into()),
            Value::I32(v) => Some(v.into()),
            Value::I64(v) => Some(v),
            Value::Isize(v) => i64::try_from(v).ok(),
            Value::U8(v) => Some(v.into()),
            Value::U16(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::U64(v) => i64::try_from(v).ok(),
            Value::Usize(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(v) => Some(v.into()),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Time(value)
    }
}

/// A whole struct carried by value, used for nested record fields.
///
/// The payload is shared until it is written into a destination, where it
/// is unwrapped (or cloned if still shared).
#[derive(Clone)]
pub struct RecordValue {
    name: &'static str,
    id: TypeId,
    inner: Arc<dyn Any + Send + Sync>,
}

impl RecordValue {
    pub fn new<T: Any + Send + Sync>(name: &'static str, value: T) -> Self {
        Self {
            name,
            id: TypeId::of::<T>(),
            inner: Arc::new(value),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> Ty {
        Ty::Record {
            name: self.name,
            id: self.id,
        }
    }

    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Take the payload out as `T`, cloning only if it is still shared.
    pub fn downcast<T: Any + Send + Sync + Clone>(self) -> Option<T> {
        let inner = self.inner.downcast::<T>().ok()?;
        Some(Arc::unwrap_or_clone(inner))
    }
}

impl fmt::Debug for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordValue").field(&self.name).finish()
    }
}
