//! Deepcopier - copy fields and computed values between Rust structs
//!
//! # Overview
//!
//! Deepcopier copies matching fields from one struct into another, guided by
//! small per-field tags. It is meant for mapping between models and their
//! API resources, where most fields line up by name and a few need renaming,
//! computing, or skipping.
//!
//! - Fields match by name, or by a `field:` rename on the tagged side.
//! - Public `&self` methods on the source act as computed fields.
//! - Methods can receive a [`Context`] for request-scoped input.
//! - Embedded structs have their fields promoted into the parent.
//! - Numbers convert between widths; `Option`s and nullable wrappers unwrap.
//!
//! Anything that cannot be matched or converted is skipped and the
//! destination field keeps its value.
//!
//! # Quick Start
//!
//! ```
//! use deepcopier::{Context, NullString, Reflect, copy};
//!
//! #[derive(Debug, Clone, Default, Reflect)]
//! #[deepcopier(methods)]
//! struct User {
//!     first_name: String,
//!     last_name: String,
//!     age: i64,
//!     email: NullString,
//! }
//!
//! #[deepcopier::methods]
//! impl User {
//!     pub fn full_name(&self) -> String {
//!         format!("{} {}", self.first_name, self.last_name)
//!     }
//!
//!     pub fn greeting(&self, context: &Context) -> String {
//!         let salutation = context.get_as::<String>("salutation").unwrap_or_default();
//!         format!("{} {}", salutation, self.first_name)
//!     }
//! }
//!
//! #[derive(Debug, Clone, Default, Reflect)]
//! struct UserResource {
//!     #[deepcopier("field:first_name")]
//!     name: String,
//!     age: u8,
//!     full_name: String,
//!     #[deepcopier("context")]
//!     greeting: String,
//!     #[deepcopier("force")]
//!     email: String,
//!     #[deepcopier("skip")]
//!     password: String,
//! }
//!
//! let user = User {
//!     first_name: "Chuck".to_string(),
//!     last_name: "Norris".to_string(),
//!     age: 80,
//!     email: NullString::new("chuck@example.com".to_string()),
//! };
//!
//! let mut resource = UserResource::default();
//! copy(&user)
//!     .with_context(Context::new().with("salutation", "Howdy"))
//!     .to(&mut resource)?;
//!
//! assert_eq!(resource.name, "Chuck");
//! assert_eq!(resource.age, 80);
//! assert_eq!(resource.full_name, "Chuck Norris");
//! assert_eq!(resource.greeting, "Howdy Chuck");
//! assert_eq!(resource.email, "chuck@example.com");
//! assert_eq!(resource.password, "");
//! # Ok::<(), deepcopier::Error>(())
//! ```
//!
//! # Copying Back
//!
//! [`Copier::from`] copies the other way, reading tags from the value passed
//! in. Only fields are copied; methods are never called in this direction.
//!
//! ```
//! use deepcopier::{Reflect, copy};
//!
//! #[derive(Debug, Clone, Default, Reflect)]
//! struct User {
//!     first_name: String,
//! }
//!
//! #[derive(Debug, Clone, Default, Reflect)]
//! struct UserResource {
//!     #[deepcopier("field:first_name")]
//!     name: String,
//! }
//!
//! let resource = UserResource { name: "Carlos".to_string() };
//! let mut user = User::default();
//! copy(&mut user).from(&resource)?;
//! assert_eq!(user.first_name, "Carlos");
//! # Ok::<(), deepcopier::Error>(())
//! ```
//!
//! # Tags
//!
//! Tags are written as `#[deepcopier("...")]` with `;` separated options:
//!
//! - `field:Name` - match against `Name` instead of this field's name
//! - `context` - pass the copy's [`Context`] to the source method
//! - `skip` - never copy this field
//! - `force` - unwrap nullable wrappers such as [`NullString`]
//!
//! # Errors
//!
//! A copy only fails as a whole when the destination is not passed as
//! `&mut`, or when a fallible source method returns an error. Call
//! [`Copier::strict`] to also fail with [`Error::Unresolved`] when any
//! field was left uncopied.
//!
//! Generated code refers to `deepcopier_core`, so depend on it alongside
//! this crate.

// Re-export the engine
pub use deepcopier_core::{
    Bridge, CoercionError, Context, Copier, Diagnostic, DiagnosticKind, Error, FieldDescriptor,
    MethodDescriptor, MethodError, Methods, Null, NullBool, NullFloat64, NullInt32, NullInt64,
    NullString, NullTime, Options, Scalar, Subject, TagOptions, Ty, Value, copier, copy,
    parse_tag_options,
};

// Re-export the reflection trait and its derive under one name
pub use deepcopier_core::Reflect;

pub use deepcopier_macros::methods;

// Lower-level modules, for hand-written `Reflect` impls
pub use deepcopier_core::{bridge, coerce, reflect, resolve, tag, types, values};
