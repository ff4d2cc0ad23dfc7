//! The copy orchestrator and its builder.
//!
//! ```ignore
//! copy(&user).to(&mut resource)?;                      // user -> resource
//! copy(&user).with_context(ctx).to(&mut resource)?;    // pass a context to methods
//! copy(&mut user).from(&resource)?;                    // resource -> user
//! ```
//!
//! A forward copy (`to`) walks the destination's fields and pulls each one
//! from the source: a method named by the field (or its `field:` rename)
//! first, then a field, then a `get_<name>` method. A reversed copy (`from`)
//! walks the fields of the value passed to `from`, reading tags from it, and
//! pushes each into the matching field of the builder's own value. Methods
//! are not called in reverse.
//!
//! Per-field misses never abort a copy; the field just keeps its value. They
//! are collected as [`Diagnostic`]s and returned only in strict mode.

use tracing::{debug, trace};

use crate::coerce::coerce;
use crate::context::Context;
use crate::error::{Diagnostic, DiagnosticKind, Error};
use crate::reflect::{FieldDescriptor, Reflect};
use crate::resolve::{self, FieldPath, MethodPath};
use crate::values::Value;

/// A value handed to the copier, either side of the copy.
///
/// Only an exclusively borrowed value can be written to. Passing a shared
/// reference where a destination is needed fails the whole copy with
/// [`Error::UnaddressableDestination`] before any field is touched.
pub enum Subject<'a> {
    Shared(&'a dyn Reflect),
    Exclusive(&'a mut dyn Reflect),
}

impl<'a> Subject<'a> {
    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            Subject::Shared(record) => *record,
            Subject::Exclusive(record) => &**record,
        }
    }

    pub fn as_reflect_mut(&mut self) -> Option<&mut dyn Reflect> {
        match self {
            Subject::Shared(_) => None,
            Subject::Exclusive(record) => Some(&mut **record),
        }
    }

    pub fn is_addressable(&self) -> bool {
        matches!(self, Subject::Exclusive(_))
    }
}

impl<'a, T: Reflect> From<&'a T> for Subject<'a> {
    fn from(record: &'a T) -> Self {
        Subject::Shared(record)
    }
}

impl<'a, T: Reflect> From<&'a mut T> for Subject<'a> {
    fn from(record: &'a mut T) -> Self {
        Subject::Exclusive(record)
    }
}

/// Copy configuration.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Passed to methods whose destination field is tagged `context`.
    pub context: Context,

    /// Return [`Error::Unresolved`] when any field could not be copied.
    /// Fields that were copied stay copied.
    pub strict: bool,
}

/// Which way values flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `copy(src).to(dst)`: tags live on the destination.
    Forward,
    /// `copy(dst).from(src)`: tags live on the source.
    Reversed,
}

/// Start a copy from `source`.
pub fn copy<'a>(source: impl Into<Subject<'a>>) -> Copier<'a> {
    Copier {
        subject: source.into(),
        options: Options::default(),
    }
}

/// Forward copy with explicit options, without the builder.
pub fn copier<'d, 's>(
    destination: impl Into<Subject<'d>>,
    source: impl Into<Subject<'s>>,
    options: Options,
) -> Result<(), Error> {
    copy(source).with_options(options).to(destination)
}

/// Builder returned by [`copy`].
///
/// Holds no state from one call to the next: `to` can be called repeatedly
/// with different destinations.
pub struct Copier<'a> {
    subject: Subject<'a>,
    options: Options,
}

impl<'a> Copier<'a> {
    pub fn with_context(mut self, context: Context) -> Self {
        self.options.context = context;
        self
    }

    /// Fail with [`Error::Unresolved`] if any field could not be copied.
    pub fn strict(mut self) -> Self {
        self.options.strict = true;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Copy the builder's value into `destination`.
    pub fn to<'d>(&self, destination: impl Into<Subject<'d>>) -> Result<(), Error> {
        let mut destination = destination.into();
        let Some(destination) = destination.as_reflect_mut() else {
            return Err(Error::UnaddressableDestination);
        };

        let mut pass = Pass::new(&self.options, Direction::Forward);
        pass.forward(self.subject.as_reflect(), destination)?;
        pass.finish()
    }

    /// Copy `source` into the builder's value, reading tags from `source`.
    pub fn from<'s>(&mut self, source: impl Into<Subject<'s>>) -> Result<(), Error> {
        let Some(destination) = self.subject.as_reflect_mut() else {
            return Err(Error::UnaddressableDestination);
        };
        let source = source.into();

        let mut pass = Pass::new(&self.options, Direction::Reversed);
        pass.reversed(source.as_reflect(), destination);
        pass.finish()
    }
}

/// One pass over the tagged side's fields.
struct Pass<'o> {
    options: &'o Options,
    direction: Direction,
    empty_context: Context,
    diagnostics: Vec<Diagnostic>,
}

impl<'o> Pass<'o> {
    fn new(options: &'o Options, direction: Direction) -> Self {
        Self {
            options,
            direction,
            empty_context: Context::new(),
            diagnostics: Vec::new(),
        }
    }

    fn forward(&mut self, source: &dyn Reflect, destination: &mut dyn Reflect) -> Result<(), Error> {
        let _span = tracing::trace_span!(
            "copy",
            direction = ?self.direction,
            source = source.type_name(),
            destination = destination.type_name(),
        )
        .entered();

        for field in resolve::flatten(destination) {
            let tag = &field.descriptor.tag;
            if tag.is_skip() {
                trace!(field = %field.display(), "skipped");
                continue;
            }

            let candidate = tag.field().unwrap_or(field.name());

            if let Some(method) = resolve::resolve_method(source, candidate) {
                self.invoke(source, &method, destination, &field)?;
                continue;
            }

            if let Some(counterpart) = resolve::resolve_counterpart(source, candidate) {
                if let Some(value) = resolve::read(source, &counterpart.path) {
                    self.assign(destination, &field, value);
                }
                continue;
            }

            let getter = format!("get_{}", candidate);
            if let Some(method) = resolve::resolve_method(source, &getter) {
                self.invoke(source, &method, destination, &field)?;
                continue;
            }

            debug!(
                field = %field.display(),
                candidate,
                "no field or method to copy from; left untouched"
            );
            self.diagnostics.push(Diagnostic {
                field: field.display(),
                kind: DiagnosticKind::MissingMethod {
                    candidate: candidate.to_string(),
                },
            });
        }
        Ok(())
    }

    fn reversed(&mut self, source: &dyn Reflect, destination: &mut dyn Reflect) {
        let _span = tracing::trace_span!(
            "copy",
            direction = ?self.direction,
            source = source.type_name(),
            destination = destination.type_name(),
        )
        .entered();

        for field in resolve::flatten(source) {
            let tag = &field.descriptor.tag;
            if tag.is_skip() {
                trace!(field = %field.display(), "skipped");
                continue;
            }

            let wanted = tag.field().unwrap_or(field.name());
            let Some(counterpart) = resolve::resolve_counterpart(destination, wanted) else {
                trace!(field = %field.display(), wanted, "destination has no such field");
                continue;
            };
            let Some(value) = resolve::read(source, &field.path) else {
                continue;
            };

            // Tag options come from the field being read.
            let target_field = FieldPath {
                descriptor: FieldDescriptor {
                    tag: tag.clone(),
                    ..counterpart.descriptor
                },
                path: counterpart.path,
            };
            self.assign(destination, &target_field, value);
        }
    }

    fn invoke(
        &mut self,
        source: &dyn Reflect,
        method: &MethodPath,
        destination: &mut dyn Reflect,
        field: &FieldPath,
    ) -> Result<(), Error> {
        let name = method.descriptor.name;
        let context = if method.descriptor.takes_context && field.descriptor.tag.has_context() {
            &self.options.context
        } else {
            &self.empty_context
        };

        let result = resolve::navigate(source, &method.path)
            .and_then(|owner| owner.call_method(name, context));

        match result {
            Some(Ok(value)) => {
                trace!(field = %field.display(), method = name, "method called");
                self.assign(destination, field, value);
            }
            Some(Err(err)) => return Err(err.into()),
            None => {
                debug!(field = %field.display(), method = name, "method vanished; left untouched");
                self.diagnostics.push(Diagnostic {
                    field: field.display(),
                    kind: DiagnosticKind::MissingMethod {
                        candidate: name.to_string(),
                    },
                });
            }
        }
        Ok(())
    }

    /// Coerce `value` into `field` and store it. Misses are recorded, not
    /// returned.
    fn assign(&mut self, destination: &mut dyn Reflect, field: &FieldPath, value: Value) {
        let force = field.descriptor.tag.is_force();
        let stored = coerce(value, &field.descriptor.ty, force)
            .and_then(|coerced| match coerced {
                Some(value) => resolve::write(destination, &field.path, value).map(|()| true),
                None => Ok(false),
            });

        match stored {
            Ok(true) => trace!(field = %field.display(), "assigned"),
            Ok(false) => trace!(field = %field.display(), "nothing to assign"),
            Err(err) => {
                debug!(field = %field.display(), error = %err, "cannot assign; left untouched");
                self.diagnostics.push(Diagnostic {
                    field: field.display(),
                    kind: DiagnosticKind::Coercion(err),
                });
            }
        }
    }

    fn finish(self) -> Result<(), Error> {
        if self.options.strict && !self.diagnostics.is_empty() {
            return Err(Error::Unresolved {
                diagnostics: self.diagnostics,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "copier_test.rs"]
mod copier_test;
