mod decorates;
mod request;

use proc_macro::TokenStream;

use request::RequestShape;

// ============================================================================
// #[derive(Command)] / #[derive(Query)] derive macros
// ============================================================================

/// Derive macro implementing `Request` for a command.
///
/// # Usage
///
/// ```ignore
/// #[derive(Command)]
/// #[request(response = String, name = "counter.create")]
/// struct CreateCounter {
///     pub id: String,
/// }
/// ```
///
/// - `#[request(response = T)]` sets the response type. Defaults to `()`.
/// - `#[request(name = "...")]` sets the request name used in diagnostics and
///   by the gateway. Defaults to the snake_case struct name.
#[proc_macro_derive(Command, attributes(request))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    request::derive_request(input, RequestShape::Command)
}

/// Derive macro implementing `Request` for a query.
///
/// Accepts the same `#[request(...)]` attributes as `#[derive(Command)]`.
///
/// ```ignore
/// #[derive(Query)]
/// #[request(response = Option<i64>)]
/// struct GetCounter {
///     pub id: String,
/// }
/// ```
#[proc_macro_derive(Query, attributes(request))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    request::derive_request(input, RequestShape::Query)
}

// ============================================================================
// #[decorates] attribute macro
// ============================================================================

/// Attribute macro marking a handler as the decorator for a request type.
///
/// # Usage
///
/// ```ignore
/// #[decorates(GetCounter)]
/// pub struct CachedGetCounter {
///     cache: Arc<Cache>,
/// }
///
/// #[async_trait]
/// impl Handler for CachedGetCounter {
///     type Request = GetCounter;
///     // ...
/// }
/// ```
///
/// The item is kept as written and a `Decorates` impl naming the target is
/// added. Registering the handler with `RegistryBuilder::decorator` then
/// makes dispatch of the target prefer it over the primary handler.
#[proc_macro_attribute]
pub fn decorates(attr: TokenStream, item: TokenStream) -> TokenStream {
    decorates::expand(attr, item)
}
