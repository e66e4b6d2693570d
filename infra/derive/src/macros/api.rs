use super::derived_trait_names;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, ItemFn, ItemStruct, Lit, LitStr, MetaNameValue, Token};

/// Options accepted by `#[api_model(...)]`.
#[derive(Default)]
struct ModelOptions {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

/// Serde settings the struct already carries.
#[derive(Default)]
struct ExistingSerde {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match api_model(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn api_model(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let options = ModelOptions::parse(args)?;
    let existing = ExistingSerde::read(&input.attrs)?;
    let derives = derived_trait_names(&input.attrs);

    let mut missing = Vec::new();
    if !derives.contains("Debug") {
        missing.push(quote! { Debug });
    }
    if !derives.contains("Serialize") {
        missing.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        missing.push(quote! { ::serde::Deserialize });
    }
    let derive = if missing.is_empty() { quote! {} } else { quote! { #[derive(#(#missing),*)] } };

    let schema = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let wanted = options.rename_all.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));
    let rename = match &existing.rename_all {
        Some(current) if current.value() != wanted.value() => {
            return Err(syn::Error::new_spanned(
                current,
                "serde(rename_all) conflicts with api_model(rename_all); keep only one",
            ));
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #wanted)] },
    };

    let deny = match (options.deny_unknown_fields.unwrap_or(true), existing.deny_unknown_fields) {
        (false, true) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "serde(deny_unknown_fields) is set; remove it before disabling it here",
            ));
        },
        (true, false) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    Ok(quote! {
        #derive
        #schema
        #rename
        #deny
        #input
    })
}

/// Wraps a handler with `utoipa::path` when the `server` feature is on.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

impl ModelOptions {
    fn parse(args: TokenStream) -> syn::Result<Self> {
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse2(args)?;
        let mut options = Self::default();

        for pair in pairs {
            if pair.path.is_ident("rename_all") {
                let Some(lit) = literal(&pair.value).and_then(|l| match l {
                    Lit::Str(s) => Some(s.clone()),
                    _ => None,
                }) else {
                    return Err(syn::Error::new_spanned(&pair.value, "rename_all expects a string"));
                };
                if options.rename_all.replace(lit).is_some() {
                    return Err(syn::Error::new_spanned(&pair, "Duplicate argument"));
                }
            } else if pair.path.is_ident("deny_unknown_fields") {
                let Some(Lit::Bool(flag)) = literal(&pair.value) else {
                    return Err(syn::Error::new_spanned(
                        &pair.value,
                        "deny_unknown_fields expects a boolean",
                    ));
                };
                if options.deny_unknown_fields.replace(flag.value).is_some() {
                    return Err(syn::Error::new_spanned(&pair, "Duplicate argument"));
                }
            } else {
                return Err(syn::Error::new_spanned(
                    &pair.path,
                    "Unsupported argument; expected rename_all or deny_unknown_fields",
                ));
            }
        }

        Ok(options)
    }
}

impl ExistingSerde {
    fn read(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut found = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    found.rename_all = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("deny_unknown_fields") {
                    found.deny_unknown_fields = true;
                } else if meta.input.peek(Token![=]) {
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            })?;
        }

        Ok(found)
    }
}

fn literal(expr: &Expr) -> Option<&Lit> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => Some(lit),
        _ => None,
    }
}
