//! Handlers: the unit of logic bound to one request type.
//!
//! ## Example
//!
//! ```ignore
//! use async_trait::async_trait;
//! use mediator_rust::{Handler, HandlerError, CancellationToken};
//!
//! pub struct CreateCounterHandler {
//!     store: Arc<CounterStore>,
//! }
//!
//! #[async_trait]
//! impl Handler for CreateCounterHandler {
//!     type Request = CreateCounter;
//!
//!     async fn handle(
//!         &self,
//!         request: CreateCounter,
//!         _cancel: &CancellationToken,
//!     ) -> Result<String, HandlerError> {
//!         self.store.create(&request.id)?;
//!         Ok(request.id)
//!     }
//! }
//! ```

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::HandlerError;
use crate::request::{Request, Response};

/// Processes one request type.
///
/// The associated `Request` type binds a handler to exactly one request
/// type. Cancellation is cooperative: the token is passed through from the
/// caller and it is up to the handler to observe it.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    type Request: Request;

    async fn handle(
        &self,
        request: Self::Request,
        cancel: &CancellationToken,
    ) -> Result<Response<Self::Request>, HandlerError>;
}

/// Metadata declaring that a handler overrides dispatch for `Target`.
///
/// Generated by the `#[decorates(Target)]` attribute. A decorator is still a
/// `Handler` for `Target`; registering it with
/// `RegistryBuilder::decorator` makes the dispatcher prefer it over the
/// primary handler.
pub trait Decorates {
    type Target: Request;
}

/// A type-erased handler for `Q`, as produced by a scope.
pub type SharedHandler<Q> = std::sync::Arc<dyn Handler<Request = Q>>;
