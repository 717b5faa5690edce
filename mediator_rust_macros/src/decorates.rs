use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Type};

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let target = syn::parse_macro_input!(attr as Type);
    let input = syn::parse_macro_input!(item as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::mediator_rust::Decorates for #name #ty_generics #where_clause {
            type Target = #target;
        }
    };

    TokenStream::from(expanded)
}
