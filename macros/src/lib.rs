//! Procedural macros for deepcopier.
//!
//! This crate generates the descriptor tables the copy engine works from:
//!
//! - `#[derive(Reflect)]` - field table, getters, setters and embedded access
//! - `#[methods]` - method table for computed fields

extern crate proc_macro;

use proc_macro::TokenStream;

mod common;
mod methods;
mod reflect;

/// Derive `Reflect` (and `Bridge`) for a struct with named fields.
///
/// # Example
///
/// ```ignore
/// use deepcopier_core::Reflect;
///
/// #[derive(Clone, Default, Reflect)]
/// struct UserResource {
///     #[deepcopier("field:name")]
///     display_name: String,
///     #[deepcopier("skip")]
///     skip_me: String,
/// }
/// ```
///
/// # Field Attributes
///
/// - `#[deepcopier("...")]` - the tag string, e.g. `"field:Name; context"`.
///   It is parsed when a copy runs, so unknown options are ignored.
/// - `#[deepcopier(embed)]` - the field is itself a `Reflect` struct whose
///   fields are promoted into this one. Combine with a tag as
///   `#[deepcopier(embed, "skip")]`.
///
/// # Struct Attributes
///
/// - `#[deepcopier(methods)]` - the type has a `#[methods]` impl block whose
///   methods act as computed fields.
///
/// # Restrictions
///
/// - Only structs with named fields
/// - No generic parameters
/// - The struct and every field must be `Clone`; the struct must also be
///   `Send + Sync + 'static` so it can be nested in other records
#[proc_macro_derive(Reflect, attributes(deepcopier))]
pub fn derive_reflect(item: TokenStream) -> TokenStream {
    reflect::derive_reflect_impl(item)
}

/// Register the methods of an inherent impl block as computed fields.
///
/// Every `pub` method taking `&self` (and optionally a `&Context`) and
/// returning an owned value is registered under its own name. Methods
/// returning `Result<T, E>` are fallible: an `Err` aborts the copy.
///
/// ```ignore
/// #[deepcopier_core::methods]
/// impl User {
///     pub fn full_name(&self) -> String {
///         format!("{} {}", self.first, self.last)
///     }
///
///     pub fn greeting(&self, ctx: &Context) -> String {
///         format!("{} {}", ctx.get_as::<String>("salutation").unwrap_or_default(), self.first)
///     }
///
///     #[deepcopier(skip)]
///     pub fn internal(&self) -> u64 { 0 }
/// }
/// ```
///
/// Methods that borrow from `self` (`-> &str`), return nothing, are generic,
/// or take other arguments are left out. The struct must opt in with
/// `#[deepcopier(methods)]` on its derive.
#[proc_macro_attribute]
pub fn methods(attr: TokenStream, item: TokenStream) -> TokenStream {
    methods::methods_impl(attr, item)
}
