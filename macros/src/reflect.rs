//! Implementation of `#[derive(Reflect)]`
//!
//! Parses the struct's named fields and their `#[deepcopier(...)]`
//! attributes, then generates the `Reflect` and `Bridge` impls: a field
//! descriptor table, a getter and setter per field, and access to embedded
//! records.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, parse_macro_input};

use crate::common::{AttrArg, attr_args};

/// Entry point for `#[derive(Reflect)]`.
pub fn derive_reflect_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    match parse_struct(&input) {
        Ok(parsed) => generate_output(&parsed).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// Parsed struct information
struct ParsedStruct {
    ident: Ident,
    /// Whether `#[deepcopier(methods)]` links a `#[methods]` impl block
    has_methods: bool,
    fields: Vec<ParsedField>,
}

/// Parsed field information
struct ParsedField {
    ident: Ident,
    /// Name the engine sees (raw identifiers unescaped)
    name: String,
    ty: Type,
    /// Raw tag string, empty if none was given
    tag: String,
    embedded: bool,
}

// ============================================================================
// Parsing
// ============================================================================

fn parse_struct(input: &DeriveInput) -> syn::Result<ParsedStruct> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "[deepcopier] generic structs are not supported",
        ));
    }

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "[deepcopier] Reflect requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "[deepcopier] Reflect can only be derived for structs",
            ));
        }
    };

    let mut has_methods = false;
    for arg in attr_args(&input.attrs)? {
        match arg {
            AttrArg::Flag(ident) if ident == "methods" => has_methods = true,
            AttrArg::Flag(ident) => {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("[deepcopier] unknown struct option `{}`", ident),
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

    let fields = named
        .named
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(ParsedStruct {
        ident: input.ident.clone(),
        has_methods,
        fields,
    })
}

fn parse_field(field: &syn::Field) -> syn::Result<ParsedField> {
    // Named fields always have an ident
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "[deepcopier] unnamed field"))?;

    let mut tag: Option<LitStr> = None;
    let mut embedded = false;

    for arg in attr_args(&field.attrs)? {
        match arg {
            AttrArg::Tag(lit) => {
                if tag.is_some() {
                    return Err(syn::Error::new_spanned(
                        lit,
                        "[deepcopier] only one tag string per field; join options with `;`",
                    ));
                }
                tag = Some(lit);
            }
            AttrArg::Flag(flag) if flag == "embed" => embedded = true,
            AttrArg::Flag(flag) => {
                return Err(syn::Error::new_spanned(
                    &flag,
                    format!(
                        "[deepcopier] unknown field option `{}`; tag options go in a string, e.g. `#[deepcopier(\"{}\")]`",
                        flag, flag
                    ),
                ));
            }
        }
    }

    Ok(ParsedField {
        name: ident.unraw().to_string(),
        ident,
        ty: field.ty.clone(),
        tag: tag.map(|lit| lit.value()).unwrap_or_default(),
        embedded,
    })
}

// ============================================================================
// Code Generation
// ============================================================================

fn generate_output(parsed: &ParsedStruct) -> TokenStream2 {
    let ident = &parsed.ident;
    let type_name = ident.unraw().to_string();

    let descriptors = parsed.fields.iter().map(|f| {
        let name = &f.name;
        let ty = &f.ty;
        let tag = &f.tag;
        let constructor = if f.embedded {
            quote! { embedded }
        } else {
            quote! { new }
        };
        quote! {
            ::deepcopier_core::reflect::FieldDescriptor::#constructor(
                #name,
                <#ty as ::deepcopier_core::bridge::Bridge>::ty(),
                #tag,
            )
        }
    });

    let getters = parsed.fields.iter().map(|f| {
        let name = &f.name;
        let field = &f.ident;
        quote! {
            #name => ::core::option::Option::Some(::deepcopier_core::bridge::Bridge::into_value(
                ::core::clone::Clone::clone(&self.#field),
            )),
        }
    });

    let setters = parsed.fields.iter().map(|f| {
        let name = &f.name;
        let field = &f.ident;
        let ty = &f.ty;
        quote! {
            #name => {
                let __found = __value.ty();
                self.#field = <#ty as ::deepcopier_core::bridge::Bridge>::from_value(__value)
                    .ok_or_else(|| ::deepcopier_core::error::CoercionError::Rejected {
                        field: #name.to_string(),
                        found: __found,
                    })?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let embedded: Vec<_> = parsed.fields.iter().filter(|f| f.embedded).collect();
    let embedded_refs = embedded.iter().map(|f| {
        let name = &f.name;
        let field = &f.ident;
        quote! {
            #name => ::core::option::Option::Some(&self.#field),
        }
    });
    let embedded_muts = embedded.iter().map(|f| {
        let name = &f.name;
        let field = &f.ident;
        quote! {
            #name => ::core::option::Option::Some(&mut self.#field),
        }
    });

    let method_hooks = if parsed.has_methods {
        quote! {
            fn methods(&self) -> ::std::vec::Vec<::deepcopier_core::reflect::MethodDescriptor> {
                <Self as ::deepcopier_core::reflect::Methods>::method_descriptors()
            }

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
                <Self as ::deepcopier_core::reflect::Methods>::call_method(self, __name, __context)
            }
        }
    } else {
        quote! {}
    };

    quote! {
        impl ::deepcopier_core::reflect::Reflect for #ident {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::deepcopier_core::reflect::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn field(&self, __name: &str) -> ::core::option::Option<::deepcopier_core::values::Value> {
                match __name {
                    #(#getters)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                __name: &str,
                __value: ::deepcopier_core::values::Value,
            ) -> ::core::result::Result<(), ::deepcopier_core::error::CoercionError> {
                match __name {
                    #(#setters)*
                    _ => ::core::result::Result::Err(::deepcopier_core::error::CoercionError::UnknownField {
                        field: __name.to_string(),
                    }),
                }
            }

            fn embedded(&self, __name: &str) -> ::core::option::Option<&dyn ::deepcopier_core::reflect::Reflect> {
                match __name {
                    #(#embedded_refs)*
                    _ => ::core::option::Option::None,
                }
            }

            fn embedded_mut(
                &mut self,
                __name: &str,
            ) -> ::core::option::Option<&mut dyn ::deepcopier_core::reflect::Reflect> {
                match __name {
                    #(#embedded_muts)*
                    _ => ::core::option::Option::None,
                }
            }

            #method_hooks
        }

        impl ::deepcopier_core::bridge::Bridge for #ident {
            fn ty() -> ::deepcopier_core::types::Ty {
                ::deepcopier_core::types::Ty::record::<Self>(#type_name)
            }

            fn into_value(self) -> ::deepcopier_core::values::Value {
                ::deepcopier_core::values::Value::Record(
                    ::deepcopier_core::values::RecordValue::new(#type_name, self),
                )
            }

            fn from_value(__value: ::deepcopier_core::values::Value) -> ::core::option::Option<Self> {
                match __value {
                    ::deepcopier_core::values::Value::Record(__record) => __record.downcast::<Self>(),
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
