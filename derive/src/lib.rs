//! Derive macros for `app_settings`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Meta, Visibility};

/// Derive `app_settings::AppSettings` from `#[app_setting]` markers.
#[proc_macro_derive(AppSettings, attributes(app_setting))]
pub fn derive_app_settings(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_app_settings(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `app_settings::Setting` for a fieldless enum.
#[proc_macro_derive(Setting)]
pub fn derive_setting(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_setting(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_app_settings(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    reject_generics(input, "AppSettings")?;
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "AppSettings can only be derived for structs",
        ));
    };

    let fields = match &struct_data.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &struct_data.fields,
                "AppSettings requires named fields",
            ));
        }
    };

    let name = &input.ident;
    let marked = parse_container_marker(&input.attrs)?;

    let mut members = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if matches!(field.vis, Visibility::Inherited) {
            if options.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "#[app_setting] fields must be public",
                ));
            }
            continue;
        }
        members.push(expand_member(name, ident, &field.ty, options.as_ref()));
    }

    let type_name = LitStr::new(&name.to_string(), name.span());
    let marked = marked.then(|| quote! { .marked() });
    Ok(quote! {
        impl ::app_settings::AppSettings for #name {
            fn schema() -> ::app_settings::bind::Schema<Self> {
                ::app_settings::bind::Schema::new(#type_name)
                    #marked
                    #(.member(#members))*
            }
        }
    })
}

#[derive(Debug, Default)]
struct FieldOptions {
    key: Option<LitStr>,
    connection_string: bool,
    read_only: bool,
}

fn expand_member(
    owner: &Ident,
    ident: &Ident,
    ty: &syn::Type,
    options: Option<&FieldOptions>,
) -> proc_macro2::TokenStream {
    let member_name = LitStr::new(&ident.to_string(), ident.span());
    let mut member = quote! {
        ::app_settings::bind::Member::new(#member_name, {
            fn access(target: &mut #owner) -> &mut #ty {
                &mut target.#ident
            }
            access
        })
    };

    if let Some(options) = options {
        let key = match &options.key {
            Some(key) => quote! { ::core::option::Option::Some(#key) },
            None => quote! { ::core::option::Option::None },
        };
        let connection_string = options.connection_string;
        member = quote! {
            #member.marked(::app_settings::bind::FieldMarker {
                key: #key,
                connection_string: #connection_string,
            })
        };
        if options.read_only {
            member = quote! { #member.read_only() };
        }
    }

    member
}

fn is_marker(attr: &Attribute) -> bool {
    attr.path().is_ident("app_setting")
}

fn parse_container_marker(attrs: &[Attribute]) -> Result<bool, syn::Error> {
    let mut marked = false;
    for attr in attrs.iter().filter(|attr| is_marker(attr)) {
        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(_) => attr.parse_nested_meta(|meta| {
                Err(meta.error("unsupported app_setting attribute on struct"))
            })?,
            Meta::NameValue(meta) => {
                return Err(syn::Error::new_spanned(
                    meta,
                    "expected #[app_setting] on struct",
                ));
            }
        }
        marked = true;
    }
    Ok(marked)
}

fn parse_field_options(attrs: &[Attribute]) -> Result<Option<FieldOptions>, syn::Error> {
    let mut options: Option<FieldOptions> = None;
    for attr in attrs.iter().filter(|attr| is_marker(attr)) {
        let current = options.get_or_insert_with(FieldOptions::default);
        match &attr.meta {
            Meta::Path(_) => continue,
            Meta::NameValue(meta) => {
                return Err(syn::Error::new_spanned(
                    meta,
                    "expected #[app_setting] or #[app_setting(...)]",
                ));
            }
            Meta::List(_) => {}
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                let value: LitStr = meta.value()?.parse()?;
                if current.key.is_some() {
                    return Err(meta.error("duplicate app_setting(key = ...)"));
                }
                current.key = Some(value);
                return Ok(());
            }
            if meta.path.is_ident("connection_string") {
                current.connection_string = true;
                return Ok(());
            }
            if meta.path.is_ident("read_only") {
                current.read_only = true;
                return Ok(());
            }
            Err(meta.error("unsupported app_setting attribute on field"))
        })?;
    }
    Ok(options)
}

fn expand_setting(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    reject_generics(input, "Setting")?;
    let Data::Enum(enum_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Setting can only be derived for enums",
        ));
    };

    let mut variants = Vec::new();
    for variant in &enum_data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Setting requires fieldless variants",
            ));
        }
        variants.push(&variant.ident);
    }

    let name = &input.ident;
    let type_name = LitStr::new(&name.to_string(), name.span());
    let variant_names: Vec<LitStr> = variants
        .iter()
        .map(|ident| LitStr::new(&ident.to_string(), ident.span()))
        .collect();

    Ok(quote! {
        impl ::app_settings::Setting for #name {
            fn setting_type() -> ::app_settings::convert::SettingType {
                static DESCRIPTOR: ::app_settings::convert::EnumDescriptor =
                    ::app_settings::convert::EnumDescriptor {
                        name: #type_name,
                        variants: &[
                            #(::app_settings::convert::EnumVariant {
                                name: #variant_names,
                                discriminant: #name::#variants as i64,
                            }),*
                        ],
                    };
                ::app_settings::convert::SettingType::Enum(&DESCRIPTOR)
            }

            fn from_value(
                value: ::app_settings::convert::SettingValue,
            ) -> ::core::result::Result<Self, ::app_settings::ConvertError> {
                let expected = <Self as ::app_settings::Setting>::setting_type();
                let found = value.setting_type();
                if let ::app_settings::convert::SettingValue::Enum { discriminant, .. } = value {
                    if found == expected {
                        #(
                            if discriminant == #name::#variants as i64 {
                                return ::core::result::Result::Ok(#name::#variants);
                            }
                        )*
                    }
                }
                ::core::result::Result::Err(::app_settings::ConvertError::Mismatch {
                    expected,
                    found,
                })
            }
        }
    })
}

fn reject_generics(input: &DeriveInput, derive: &str) -> Result<(), syn::Error> {
    if input.generics.params.is_empty() {
        return Ok(());
    }
    Err(syn::Error::new_spanned(
        &input.generics,
        format!("{derive} cannot be derived for generic types"),
    ))
}
