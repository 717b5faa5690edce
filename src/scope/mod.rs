//! Resource scopes: where handler instances come from.
//!
//! The dispatcher never constructs handlers. It asks a `Resolver` for an
//! instance of the selected handler type. Hosts can plug in their own
//! container by implementing `Resolver`, or use `Scope`, a small type-map
//! container with factories and parent fallback.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mediator_rust::{Scope, ResolverExt};
//!
//! let app = Arc::new(
//!     Scope::new()
//!         .with(CounterStore::default())
//!         .with_handler::<CreateCounterHandler>(),
//! );
//!
//! // Per-call scope layered over the process-wide one.
//! let call = Scope::child(&app).with(Session::for_user("user-42"));
//! let handler = call.resolve::<CreateCounterHandler>()?;
//! ```

mod error;
mod resolver;
mod scope;

pub use error::ResolveError;
pub use resolver::{FromScope, Resolver, ResolverExt};
pub use scope::Scope;
