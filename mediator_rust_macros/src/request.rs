use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr, Type};

pub enum RequestShape {
    Command,
    Query,
}

struct RequestArgs {
    response: Option<Type>,
    name: Option<LitStr>,
}

pub fn derive_request(input: TokenStream, shape: RequestShape) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let args = match parse_request_args(&input) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let response = args.response.unwrap_or_else(|| syn::parse_quote!(()));
    let name = args
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| to_snake_case(&ident.to_string()));
    let kind = match shape {
        RequestShape::Command => quote! { ::mediator_rust::RequestKind::Command },
        RequestShape::Query => quote! { ::mediator_rust::RequestKind::Query },
    };

    let expanded = quote! {
        impl #impl_generics ::mediator_rust::Request for #ident #ty_generics #where_clause {
            type Response = #response;

            const KIND: ::mediator_rust::RequestKind = #kind;

            fn name() -> &'static str {
                #name
            }
        }
    };

    TokenStream::from(expanded)
}

/// Collect `#[request(response = T, name = "...")]` from struct-level
/// attributes. Later attributes override earlier ones.
fn parse_request_args(input: &DeriveInput) -> syn::Result<RequestArgs> {
    let mut args = RequestArgs {
        response: None,
        name: None,
    };

    for attr in &input.attrs {
        if !attr.path().is_ident("request") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("response") {
                args.response = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("name") {
                args.name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `response` or `name`"))
            }
        })?;
    }

    Ok(args)
}

/// `CreateCounter` -> `create_counter`, `HTTPPing` -> `http_ping`.
fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            // Word boundary: after a lowercase letter or digit, or at the
            // last capital of an acronym run.
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }
    result
}
