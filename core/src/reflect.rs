//! Descriptor tables and the object safe reflection surface.
//!
//! Implementations are generated: `#[derive(Reflect)]` writes the field
//! table and accessors, `#[deepcopier::methods]` writes the method table.
//! Hand-written implementations are possible but must keep `fields`,
//! `field` and `set_field` in agreement.

use crate::context::Context;
use crate::error::{CoercionError, MethodError};
use crate::tag::{TagOptions, parse_tag_options};
use crate::types::Ty;
use crate::values::Value;

/// Declared shape of one struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub ty: Ty,
    pub tag: TagOptions,
    /// Embedded fields are flattened into their parent during a copy.
    pub embedded: bool,
}

impl FieldDescriptor {
    /// Build a descriptor, parsing the raw tag string.
    pub fn new(name: &'static str, ty: Ty, raw_tag: &str) -> Self {
        Self {
            name,
            ty,
            tag: parse_tag_options(raw_tag),
            embedded: false,
        }
    }

    pub fn embedded(name: &'static str, ty: Ty, raw_tag: &str) -> Self {
        Self {
            embedded: true,
            ..Self::new(name, ty, raw_tag)
        }
    }
}

/// A computed field: a `&self` method with no argument or a `&Context`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub takes_context: bool,
    pub ret: Ty,
}

impl MethodDescriptor {
    pub fn new(name: &'static str, takes_context: bool, ret: Ty) -> Self {
        Self {
            name,
            takes_context,
            ret,
        }
    }
}

/// Runtime view of a struct's fields and methods.
///
/// Descriptors are rebuilt on every call to [`Reflect::fields`] and
/// [`Reflect::methods`]; nothing is cached between copies.
pub trait Reflect {
    /// The struct's name, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Declared fields in declaration order, embedded fields included as-is.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Read a direct field by name.
    fn field(&self, name: &str) -> Option<Value>;

    /// Store `value` into a direct field. The value must already have the
    /// field's declared type.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), CoercionError>;

    /// Borrow an embedded field as a record.
    fn embedded(&self, name: &str) -> Option<&dyn Reflect>;

    fn embedded_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Methods usable as computed fields.
    fn methods(&self) -> Vec<MethodDescriptor> {
        Vec::new()
    }

    /// Call a method by name. `None` means there is no such method.
    fn call_method(&self, name: &str, context: &Context) -> Option<Result<Value, MethodError>> {
        let _ = (name, context);
        None
    }
}

/// Method table for a type, generated by `#[deepcopier::methods]`.
///
/// Types opt in from their derive with `#[deepcopier(methods)]`, which makes
/// [`Reflect::methods`] and [`Reflect::call_method`] delegate here.
pub trait Methods {
    fn method_descriptors() -> Vec<MethodDescriptor>
    where
        Self: Sized;

    fn call_method(&self, name: &str, context: &Context) -> Option<Result<Value, MethodError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;

    #[test]
    fn test_descriptor_parses_tag() {
        let descriptor = FieldDescriptor::new("my_int", Ty::Scalar(Scalar::I64), "field:int; force");
        assert_eq!(descriptor.tag.field(), Some("int"));
        assert!(descriptor.tag.is_force());
        assert!(!descriptor.embedded);
    }

    #[test]
    fn test_embedded_descriptor() {
        let descriptor = FieldDescriptor::embedded("base", Ty::Any, "");
        assert!(descriptor.embedded);
        assert!(descriptor.tag.is_empty());
    }
}
