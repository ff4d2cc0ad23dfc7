//! Shared utilities for deepcopier procedural macros.

use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, GenericArgument, Ident, LitStr, Meta, PathArguments, Token, Type};

/// Name of the helper attribute on structs, fields and methods.
pub(crate) const ATTR: &str = "deepcopier";

/// One argument inside `#[deepcopier(...)]`.
pub(crate) enum AttrArg {
    /// A raw tag string: `"field:Name; context"`.
    Tag(LitStr),
    /// A bare keyword: `embed`, `methods`, `skip`.
    Flag(Ident),
}

impl Parse for AttrArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            Ok(AttrArg::Tag(input.parse()?))
        } else {
            Ok(AttrArg::Flag(input.parse()?))
        }
    }
}

/// Collect the arguments of every `#[deepcopier(...)]` attribute in `attrs`.
///
/// # Returns
/// - `Ok(args)` with the arguments in source order (empty if absent).
/// - `Err(...)` if an attribute is not of the `#[deepcopier(...)]` form.
pub(crate) fn attr_args(attrs: &[Attribute]) -> syn::Result<Vec<AttrArg>> {
    let mut args = Vec::new();

    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
        match &attr.meta {
            Meta::List(_) => {
                let parsed =
                    attr.parse_args_with(Punctuated::<AttrArg, Token![,]>::parse_terminated)?;
                args.extend(parsed);
            }
            Meta::Path(_) | Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "[deepcopier] expected `#[deepcopier(...)]`",
                ));
            }
        }
    }

    Ok(args)
}

/// Check if a type is `Result<T, E>` and extract the Ok type `T`.
pub(crate) fn extract_result_ok_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let last_segment = type_path.path.segments.last()?;
    if last_segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last_segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(ok_type)) => Some(ok_type),
        _ => None,
    }
}

/// Check if a type looks like `&Context` (last path segment is `Context`).
pub(crate) fn is_context_type(ty: &Type) -> bool {
    if let Type::Reference(type_ref) = ty {
        if type_ref.mutability.is_none() {
            if let Type::Path(type_path) = &*type_ref.elem {
                return type_path
                    .path
                    .segments
                    .last()
                    .is_some_and(|s| s.ident == "Context");
            }
        }
    }
    false
}
