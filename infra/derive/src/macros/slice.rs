use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

pub fn expand_slice(input: ItemStruct) -> TokenStream {
    let ItemStruct { attrs, vis, ident, generics, fields, .. } = &input;

    if !generics.params.is_empty() {
        return syn::Error::new_spanned(generics, "rsvp_slice does not support generic slices")
            .to_compile_error();
    }

    let inner = format_ident!("{ident}Inner");
    let label = ident.to_string();
    let semi = matches!(fields, syn::Fields::Unnamed(_) | syn::Fields::Unit).then(|| quote! { ; });

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner #fields #semi

        /// Cheaply cloneable handle to the slice state.
        #[derive(Debug, Clone)]
        #vis struct #ident {
            inner: ::std::sync::Arc<#inner>,
        }

        impl #ident {
            #[must_use]
            pub fn new(inner: #inner) -> Self {
                Self { inner: ::std::sync::Arc::new(inner) }
            }
        }

        impl ::std::ops::Deref for #ident {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::rsvp_kernel::registry::FeatureSlice for #ident {
            fn name(&self) -> &'static str {
                #label
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    }
}
