//! Field tag parsing.
//!
//! A tag is the string carried by `#[deepcopier("...")]` on a struct field:
//!
//! ```text
//! "keyword1; key2:value2; key3 : value3 "
//! ```
//!
//! Options are separated by `;`. Each option is either a bare flag or a
//! `key:value` pair. Whitespace around keys and values is ignored.

use std::collections::BTreeMap;
use std::fmt;

/// Attribute name used on struct fields.
pub const TAG_NAME: &str = "deepcopier";

/// Names the counterpart field or method to resolve against.
pub const FIELD_OPTION: &str = "field";

/// Passes the active context payload to the matched method.
pub const CONTEXT_OPTION: &str = "context";

/// Excludes the field from every copy direction.
pub const SKIP_OPTION: &str = "skip";

/// Allows unwrapping nullable wrappers and storing raw options into `Value` fields.
pub const FORCE_OPTION: &str = "force";

/// Parsed tag options: option key to option value.
///
/// A flag is stored with an empty value. An absent or empty tag yields an
/// empty map, which means "same name, no special handling".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    options: BTreeMap<String, String>,
}

impl TagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored for `key`, `Some("")` for a flag.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The rename target from `field:Name`, if one was given.
    ///
    /// `field` without a value (or with an empty one) is not a rename.
    pub fn field(&self) -> Option<&str> {
        self.get(FIELD_OPTION).filter(|name| !name.is_empty())
    }

    pub fn has_context(&self) -> bool {
        self.contains(CONTEXT_OPTION)
    }

    pub fn is_skip(&self) -> bool {
        self.contains(SKIP_OPTION)
    }

    pub fn is_force(&self) -> bool {
        self.contains(FORCE_OPTION)
    }
}

impl fmt::Display for TagOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.options {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            if value.is_empty() {
                f.write_str(key)?;
            } else {
                write!(f, "{}:{}", key, value)?;
            }
        }
        Ok(())
    }
}

/// Parse a raw tag string into [`TagOptions`].
///
/// Never fails. Segments are split on the first `:` only, so a value may
/// itself contain colons (`"field:a:b"` renames to `a:b`). Empty segments,
/// such as the one after a trailing `;`, are dropped, as are segments with an
/// empty key.
pub fn parse_tag_options(raw: &str) -> TagOptions {
    let mut options = TagOptions::new();

    for segment in raw.split(';') {
        let (key, value) = match segment.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (segment.trim(), ""),
        };

        if key.is_empty() {
            continue;
        }
        options.insert(key, value);
    }

    options
}
