//! Field and method resolution.
//!
//! Embedded fields are promoted: a field declared on an embedded record is
//! found by its own name, as if declared on the parent. Paths record how to
//! reach it again (`["base", "name"]`).

use crate::error::CoercionError;
use crate::reflect::{FieldDescriptor, MethodDescriptor, Reflect};
use crate::values::Value;

/// A field reached through zero or more embedded records.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPath {
    /// Embedded field names followed by the field's own name.
    pub path: Vec<&'static str>,
    pub descriptor: FieldDescriptor,
}

impl FieldPath {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Dotted form for diagnostics.
    pub fn display(&self) -> String {
        self.path.join(".")
    }
}

/// A method found on a record or one of its embedded records.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodPath {
    pub path: Vec<&'static str>,
    pub descriptor: MethodDescriptor,
}

/// List every non-embedded field, depth first, embedded records flattened
/// in place of the embedding field. An embedded field tagged `skip` drops
/// its whole record.
pub fn flatten(record: &dyn Reflect) -> Vec<FieldPath> {
    let mut out = Vec::new();
    flatten_into(record, &mut Vec::new(), &mut out);
    out
}

fn flatten_into(record: &dyn Reflect, prefix: &mut Vec<&'static str>, out: &mut Vec<FieldPath>) {
    for descriptor in record.fields() {
        if descriptor.embedded {
            if descriptor.tag.is_skip() {
                continue;
            }
            if let Some(inner) = record.embedded(descriptor.name) {
                prefix.push(descriptor.name);
                flatten_into(inner, prefix, out);
                prefix.pop();
                continue;
            }
        }

        let mut path = prefix.clone();
        path.push(descriptor.name);
        out.push(FieldPath { path, descriptor });
    }
}

/// Find the field on `record` that answers to `lookup`.
///
/// A field whose `field:` rename equals `lookup` wins; otherwise the first
/// field declared as `lookup` is taken. Each search visits fields in
/// declaration order and descends into embedded records depth first, except
/// those tagged `skip`.
pub fn resolve_counterpart(record: &dyn Reflect, lookup: &str) -> Option<FieldPath> {
    resolve_in(record, lookup, Match::Rename, &mut Vec::new())
        .or_else(|| resolve_in(record, lookup, Match::Name, &mut Vec::new()))
}

#[derive(Debug, Clone, Copy)]
enum Match {
    Rename,
    Name,
}

fn resolve_in(
    record: &dyn Reflect,
    lookup: &str,
    by: Match,
    prefix: &mut Vec<&'static str>,
) -> Option<FieldPath> {
    for descriptor in record.fields() {
        if descriptor.embedded {
            if descriptor.tag.is_skip() {
                continue;
            }
            if let Some(inner) = record.embedded(descriptor.name) {
                prefix.push(descriptor.name);
                let found = resolve_in(inner, lookup, by, prefix);
                prefix.pop();
                if found.is_some() {
                    return found;
                }
                continue;
            }
        }

        let matched = match by {
            Match::Rename => descriptor.tag.field() == Some(lookup),
            Match::Name => descriptor.name == lookup,
        };
        if matched {
            let mut path = prefix.clone();
            path.push(descriptor.name);
            return Some(FieldPath { path, descriptor });
        }
    }
    None
}

/// Find a method named `name` on `record`, then on its embedded records.
pub fn resolve_method(record: &dyn Reflect, name: &str) -> Option<MethodPath> {
    if let Some(descriptor) = record.methods().into_iter().find(|m| m.name == name) {
        return Some(MethodPath {
            path: Vec::new(),
            descriptor,
        });
    }

    for field in record
        .fields()
        .into_iter()
        .filter(|f| f.embedded && !f.tag.is_skip())
    {
        let Some(inner) = record.embedded(field.name) else {
            continue;
        };
        if let Some(mut found) = resolve_method(inner, name) {
            found.path.insert(0, field.name);
            return Some(found);
        }
    }
    None
}

/// Follow the embedded part of `path` (everything but the last segment).
pub fn navigate<'r>(record: &'r dyn Reflect, path: &[&'static str]) -> Option<&'r dyn Reflect> {
    path.iter()
        .try_fold(record, |current, name| current.embedded(name))
}

pub fn navigate_mut<'r>(
    record: &'r mut dyn Reflect,
    path: &[&'static str],
) -> Option<&'r mut dyn Reflect> {
    let mut current = record;
    for name in path {
        current = current.embedded_mut(name)?;
    }
    Some(current)
}

/// Read the field at `path`.
pub fn read(record: &dyn Reflect, path: &[&'static str]) -> Option<Value> {
    let (name, parents) = path.split_last()?;
    navigate(record, parents)?.field(name)
}

/// Write `value` into the field at `path`.
pub fn write(
    record: &mut dyn Reflect,
    path: &[&'static str],
    value: Value,
) -> Result<(), CoercionError> {
    let unknown = || CoercionError::UnknownField {
        field: path.join("."),
    };
    let (name, parents) = path.split_last().ok_or_else(unknown)?;
    navigate_mut(record, parents)
        .ok_or_else(unknown)?
        .set_field(name, value)
}
