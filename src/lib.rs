//! mediator_rust: in-process request/handler dispatch.
//!
//! Requests are typed commands and queries. Handlers are registered once at
//! startup into an immutable `Registry`; a `Dispatcher` routes each request
//! to its handler (or to a `#[decorates]` override), resolving the handler
//! instance from a caller-supplied scope.
//!
//! ## Architecture
//!
//! ```text
//! caller ──dispatch(request, scope, cancel)──▶ Dispatcher
//!                                                 │
//!                     ┌───────────────────────────┤
//!                     ▼                           ▼
//!              DecoratorTable ──miss──▶ HandlerRegistry      (startup-built)
//!                     │                           │
//!                     └────────── Route<Q> ───────┘
//!                                   │
//!                                   ▼
//!                 HandlerFactory: scope.resolve::<H>() ─▶ steps
//!                                   │
//!                                   ▼
//!                      handler.handle(request, cancel)
//! ```

extern crate self as mediator_rust;

mod config;
mod dispatcher;
mod error;
mod factory;
mod handler;
mod key;
mod registry;
mod request;
mod scope;

#[cfg(feature = "gateway")]
pub mod gateway;

pub use config::DispatchConfig;
pub use dispatcher::{Dispatcher, RouteSource, SelectedRoute};
pub use error::HandlerError;
pub use factory::{HandlerFactory, ResolveStep, TracedStep};
pub use handler::{Decorates, Handler, SharedHandler};
pub use key::TypeKey;
pub use registry::{
    DecoratorTable, HandlerRegistry, Registry, RegistryBuilder, RegistryError, Route,
};
pub use request::{Request, RequestInfo, RequestKind, Response};
pub use scope::{FromScope, ResolveError, Resolver, ResolverExt, Scope};

// Derive and attribute macros for requests and decorators
pub use mediator_rust_macros::{decorates, Command, Query};

// Re-exported so handler crates need no direct dependency
pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;
