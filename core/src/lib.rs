//! Core copy engine for deepcopier.
//!
//! Copies matching fields and method results between two structs, guided by
//! per-field tags. Rust has no runtime reflection over structs, so every
//! participating type carries a descriptor table generated by
//! `#[derive(Reflect)]` (and optionally `#[deepcopier::methods]` for computed
//! fields). The engine works on those tables through the object safe
//! [`Reflect`] trait and moves data around as dynamic [`Value`]s.
//!
//! The pieces, leaf first:
//!
//! - [`tag`]: parses `"field:Name; context; skip; force"` tag strings.
//! - [`types`] and [`values`]: type descriptors and dynamic values.
//! - [`bridge`]: conversions between Rust types and [`Value`].
//! - [`resolve`]: finds the counterpart field or method on the other side.
//! - [`coerce`]: turns a source value into something the destination accepts.
//! - [`copier`]: the orchestrator and the `copy(src).to(dst)` builder.

// Needed so that macros can uniformly refer to `::deepcopier_core` and still
// work from within this crate or a different one.
extern crate self as deepcopier_core;

pub mod bridge;
pub mod coerce;
pub mod context;
pub mod copier;
pub mod error;
pub mod nullable;
pub mod reflect;
pub mod resolve;
pub mod tag;
pub mod types;
pub mod values;

pub use bridge::Bridge;
pub use context::Context;
pub use copier::{Copier, Options, Subject, copier, copy};
pub use error::{CoercionError, Diagnostic, DiagnosticKind, Error, MethodError};
pub use nullable::{Null, NullBool, NullFloat64, NullInt32, NullInt64, NullString, NullTime};
pub use reflect::{FieldDescriptor, MethodDescriptor, Methods, Reflect};
pub use tag::{TagOptions, parse_tag_options};
pub use types::{Scalar, Ty};
pub use values::Value;

pub use deepcopier_macros::{Reflect, methods};
