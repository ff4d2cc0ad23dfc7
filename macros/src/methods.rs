//! Implementation of the `#[methods]` attribute
//!
//! Scans an inherent impl block for `pub` methods that can act as computed
//! fields and generates a `Methods` impl dispatching to them by name.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, ReturnType, Type, Visibility, parse_macro_input};

use crate::common::{ATTR, AttrArg, attr_args, extract_result_ok_type, is_context_type};

/// Entry point for `#[methods]`.
pub fn methods_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = TokenStream2::from(attr);
    let mut input = parse_macro_input!(item as ItemImpl);

    if !attr.is_empty() {
        return syn::Error::new_spanned(attr, "[deepcopier] #[methods] takes no arguments")
            .to_compile_error()
            .into();
    }

    match parse_impl(&mut input) {
        Ok(methods) => {
            let generated = generate_methods_impl(&input.self_ty, &methods);
            quote! {
                #input
                #generated
            }
            .into()
        }
        Err(err) => err.to_compile_error().into(),
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A method registered as a computed field
struct ParsedMethod {
    ident: syn::Ident,
    /// Name the engine sees (raw identifiers unescaped)
    name: String,
    takes_context: bool,
    /// For fallible methods, the `T` of `Result<T, E>`
    value_ty: Type,
    is_fallible: bool,
}

// ============================================================================
// Parsing
// ============================================================================

/// Validate the impl block, strip our helper attributes and collect the
/// registered methods.
fn parse_impl(input: &mut ItemImpl) -> syn::Result<Vec<ParsedMethod>> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "[deepcopier] #[methods] only applies to inherent impl blocks",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "[deepcopier] generic impl blocks are not supported",
        ));
    }

    let mut methods = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        let skip = take_skip(method)?;
        if skip {
            continue;
        }
        if let Some(parsed) = parse_method(method) {
            methods.push(parsed);
        }
    }
    Ok(methods)
}

/// Remove `#[deepcopier(...)]` from a method and report whether it said
/// `skip`. The attribute is not registered with the compiler, so it must
/// not survive expansion.
fn take_skip(method: &mut ImplItemFn) -> syn::Result<bool> {
    let mut skip = false;
    for arg in attr_args(&method.attrs)? {
        match arg {
            AttrArg::Flag(flag) if flag == "skip" => skip = true,
            AttrArg::Flag(flag) => {
                return Err(syn::Error::new_spanned(
                    &flag,
                    format!("[deepcopier] unknown method option `{}`", flag),
                ));
            }
            AttrArg::Tag(lit) => {
                return Err(syn::Error::new_spanned(
                    lit,
                    "[deepcopier] tag strings belong on fields",
                ));
            }
        }
    }
    method.attrs.retain(|a| !a.path().is_ident(ATTR));
    Ok(skip)
}

/// Check whether a method has a usable shape; `None` leaves it out.
fn parse_method(method: &ImplItemFn) -> Option<ParsedMethod> {
    let sig = &method.sig;

    if !matches!(method.vis, Visibility::Public(_))
        || !sig.generics.params.is_empty()
        || sig.asyncness.is_some()
        || sig.unsafety.is_some()
        || sig.variadic.is_some()
    {
        return None;
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => return None,
    }

    let takes_context = match inputs.next() {
        None => false,
        Some(FnArg::Typed(pat_type)) if is_context_type(&pat_type.ty) => true,
        Some(_) => return None,
    };
    if inputs.next().is_some() {
        return None;
    }

    let ReturnType::Type(_, return_ty) = &sig.output else {
        return None;
    };
    let (value_ty, is_fallible) = match extract_result_ok_type(return_ty) {
        Some(ok_ty) => (ok_ty, true),
        None => (&**return_ty, false),
    };
    if !is_owned_value(value_ty) {
        return None;
    }

    Some(ParsedMethod {
        ident: sig.ident.clone(),
        name: sig.ident.unraw().to_string(),
        takes_context,
        value_ty: value_ty.clone(),
        is_fallible,
    })
}

/// Owned, nameable, non-unit return types only.
fn is_owned_value(ty: &Type) -> bool {
    match ty {
        Type::Reference(_) | Type::ImplTrait(_) | Type::Never(_) | Type::Infer(_) => false,
        Type::Tuple(tuple) => !tuple.elems.is_empty(),
        Type::Paren(inner) => is_owned_value(&inner.elem),
        _ => true,
    }
}

// ============================================================================
// Code Generation
// ============================================================================

fn generate_methods_impl(self_ty: &Type, methods: &[ParsedMethod]) -> TokenStream2 {
    let descriptors = methods.iter().map(|m| {
        let name = &m.name;
        let takes_context = m.takes_context;
        let value_ty = &m.value_ty;
        quote! {
            ::deepcopier_core::reflect::MethodDescriptor::new(
                #name,
                #takes_context,
                <#value_ty as ::deepcopier_core::bridge::Bridge>::ty(),
            )
        }
    });

    let arms = methods.iter().map(|m| {
        let name = &m.name;
        let ident = &m.ident;
        let call = if m.takes_context {
            quote! { self.#ident(__context) }
        } else {
            quote! { self.#ident() }
        };

        let result = if m.is_fallible {
            quote! {
                #call
                    .map(|__value| ::deepcopier_core::bridge::Bridge::into_value(__value))
                    .map_err(|__err| ::deepcopier_core::error::MethodError::new(#name, __err))
            }
        } else {
            quote! {
                ::core::result::Result::Ok(::deepcopier_core::bridge::Bridge::into_value(#call))
            }
        };

        quote! {
            #name => ::core::option::Option::Some(#result),
        }
    });

    quote! {
        impl ::deepcopier_core::reflect::Methods for #self_ty {
            fn method_descriptors() -> ::std::vec::Vec<::deepcopier_core::reflect::MethodDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            #[allow(unused_variables)]
            fn call_method(
                &self,
                __name: &str,
                __context: &::deepcopier_core::context::Context,
            ) -> ::core::option::Option<
                ::core::result::Result<
                    ::deepcopier_core::values::Value,
                    ::deepcopier_core::error::MethodError,
                >,
            > {
                match __name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
