//! Type descriptors for reflected fields and method results.

use std::any::TypeId;
use std::fmt;

/// Declared type of a field, as seen by the copy engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// Primitive types (bool, numbers, strings, timestamps)
    Scalar(Scalar),

    /// `Option<T>`: may be absent.
    Optional(Box<Ty>),

    /// `Vec<T>`
    Seq(Box<Ty>),

    /// String-keyed map (`HashMap<String, T>` or `BTreeMap<String, T>`).
    Map(Box<Ty>),

    /// Nullable wrapper: a scalar payload plus a validity flag.
    Nullable(Scalar),

    /// A struct deriving `Reflect`, identified by its `TypeId`.
    Record { name: &'static str, id: TypeId },

    /// A field typed as the dynamic `Value`; accepts anything.
    Any,
}

impl Ty {
    pub fn optional(inner: Ty) -> Self {
        Ty::Optional(Box::new(inner))
    }

    pub fn seq(element: Ty) -> Self {
        Ty::Seq(Box::new(element))
    }

    pub fn map(value: Ty) -> Self {
        Ty::Map(Box::new(value))
    }

    pub fn record<T: 'static>(name: &'static str) -> Self {
        Ty::Record {
            name,
            id: TypeId::of::<T>(),
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Ty::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_scalar().is_some_and(Scalar::is_numeric)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Scalar(scalar) => write!(f, "{}", scalar),
            Ty::Optional(inner) => write!(f, "Option<{}>", inner),
            Ty::Seq(element) => write!(f, "Vec<{}>", element),
            Ty::Map(value) => write!(f, "Map<String, {}>", value),
            Ty::Nullable(scalar) => write!(f, "Null<{}>", scalar),
            Ty::Record { name, .. } => f.write_str(name),
            Ty::Any => f.write_str("Value"),
        }
    }
}

/// Scalar type variants
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scalar {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    /// UTC timestamp (`chrono::DateTime<Utc>`)
    Time,
}

impl Scalar {
    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Scalar::I8
                | Scalar::I16
                | Scalar::I32
                | Scalar::I64
                | Scalar::Isize
                | Scalar::U8
                | Scalar::U16
                | Scalar::U32
                | Scalar::U64
                | Scalar::Usize
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Scalar::F32 | Scalar::F64)
    }

    pub fn name(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::I8 => "i8",
            Scalar::I16 => "i16",
            Scalar::I32 => "i32",
            Scalar::I64 => "i64",
            Scalar::Isize => "isize",
            Scalar::U8 => "u8",
            Scalar::U16 => "u16",
            Scalar::U32 => "u32",
            Scalar::U64 => "u64",
            Scalar::Usize => "usize",
            Scalar::F32 => "f32",
            Scalar::F64 => "f64",
            Scalar::Str => "String",
            Scalar::Time => "DateTime<Utc>",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn test_scalar_classes() {
        assert!(Scalar::U8.is_integer());
        assert!(Scalar::F32.is_float());
        assert!(!Scalar::Str.is_numeric());
    }

    #[test]
    fn test_display() {
        let ty = Ty::optional(Ty::seq(Ty::Scalar(Scalar::I32)));
        assert_eq!(ty.to_string(), "Option<Vec<i32>>");
        assert_eq!(Ty::map(Ty::Any).to_string(), "Map<String, Value>");
        assert_eq!(Ty::Nullable(Scalar::Str).to_string(), "Null<String>");
        assert_eq!(Ty::record::<Marker>("Marker").to_string(), "Marker");
    }

    #[test]
    fn test_record_identity() {
        struct Other;
        assert_eq!(Ty::record::<Marker>("Marker"), Ty::record::<Marker>("Marker"));
        assert_ne!(Ty::record::<Marker>("Marker"), Ty::record::<Other>("Marker"));
    }
}
