//! Error types for the copy engine.
//!
//! Only two things abort a copy: handing over a destination that cannot be
//! written, and a fallible source method returning an error. Everything
//! else is a per-field miss that leaves the destination field untouched and
//! is only reported back in strict mode.

use std::fmt;

use thiserror::Error;

use crate::types::Ty;

/// Errors returned by `to` and `from`.
#[derive(Debug, Error)]
pub enum Error {
    /// The destination was passed by shared reference.
    #[error("destination is not addressable; pass it as `&mut`")]
    UnaddressableDestination,

    /// A source method returned an error.
    #[error("method `{method}` failed: {message}")]
    MethodFailed { method: String, message: String },

    /// Strict mode only: some fields could not be copied.
    #[error("{} field(s) could not be copied: {}", .diagnostics.len(), DiagnosticList(.diagnostics))]
    Unresolved { diagnostics: Vec<Diagnostic> },
}

impl From<MethodError> for Error {
    fn from(err: MethodError) -> Self {
        Error::MethodFailed {
            method: err.method,
            message: err.message,
        }
    }
}

/// Why a value could not be stored into a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// No rule converts `found` into `expected`.
    #[error("cannot assign {found} to {expected}")]
    Mismatch { expected: Ty, found: Ty },

    /// Unwrapping a nullable wrapper needs the `force` tag option.
    #[error("cannot unwrap {found} into {expected} without `force`")]
    Unforced { expected: Ty, found: Ty },

    /// The field refused a value of the shape it declared.
    #[error("field `{field}` rejected a value of type {found}")]
    Rejected { field: String, found: Ty },

    /// The record has no field with this name.
    #[error("no field named `{field}`")]
    UnknownField { field: String },
}

/// Error produced by a fallible source method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("method `{method}` failed: {message}")]
pub struct MethodError {
    pub method: String,
    pub message: String,
}

impl MethodError {
    pub fn new(method: impl Into<String>, err: impl fmt::Display) -> Self {
        Self {
            method: method.into(),
            message: err.to_string(),
        }
    }
}

/// A per-field miss absorbed during a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Field on the side being written, with embedded parents joined by `.`.
    pub field: String,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Neither a field nor a method matched the candidate name.
    MissingMethod { candidate: String },

    /// A counterpart was found but its value could not be stored.
    Coercion(CoercionError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingMethod { candidate } => write!(
                f,
                "`{}`: no field or method named `{}`",
                self.field, candidate
            ),
            DiagnosticKind::Coercion(err) => write!(f, "`{}`: {}", self.field, err),
        }
    }
}

struct DiagnosticList<'a>(&'a [Diagnostic]);

impl fmt::Display for DiagnosticList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;
    use expect_test::expect;

    #[test]
    fn test_unaddressable_message() {
        expect!["destination is not addressable; pass it as `&mut`"]
            .assert_eq(&Error::UnaddressableDestination.to_string());
    }

    #[test]
    fn test_method_error_converts() {
        let err: Error = MethodError::new("total", "overflow").into();
        expect!["method `total` failed: overflow"].assert_eq(&err.to_string());
    }

    #[test]
    fn test_unresolved_lists_fields() {
        let err = Error::Unresolved {
            diagnostics: vec![
                Diagnostic {
                    field: "base.name".to_string(),
                    kind: DiagnosticKind::MissingMethod {
                        candidate: "Name".to_string(),
                    },
                },
                Diagnostic {
                    field: "age".to_string(),
                    kind: DiagnosticKind::Coercion(CoercionError::Mismatch {
                        expected: Ty::Scalar(Scalar::I32),
                        found: Ty::Scalar(Scalar::Str),
                    }),
                },
            ],
        };
        expect![[r#"2 field(s) could not be copied: `base.name`: no field or method named `Name`, `age`: cannot assign String to i32"#]]
            .assert_eq(&err.to_string());
    }
}
