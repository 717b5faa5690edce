//! Handler factory: turns a route and a scope into a callable handler.
//!
//! Resolution is an ordered pipeline. The route's own step asks the scope
//! for the handler instance; each registered `ResolveStep` then receives the
//! previous step's handler, the target handler type and the scope, and
//! returns the handler the next step (or the dispatcher) will see.
//!
//! ## Example
//!
//! ```ignore
//! let registry = Registry::builder()
//!     .handler::<CreateCounterHandler>()
//!     .step::<CreateCounter, _>(TracedStep)
//!     .step::<CreateCounter, _>(|handler, _target, scope: &dyn Resolver| {
//!         let audit = scope.resolve::<AuditLog>()?;
//!         Ok(Arc::new(Audited::new(handler, audit)) as SharedHandler<CreateCounter>)
//!     })
//!     .build()?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::error::HandlerError;
use crate::handler::{Handler, SharedHandler};
use crate::key::TypeKey;
use crate::registry::Route;
use crate::request::{Request, Response};
use crate::scope::{ResolveError, Resolver};

/// One step of handler resolution for request type `Q`.
pub trait ResolveStep<Q: Request>: Send + Sync {
    fn apply(
        &self,
        handler: SharedHandler<Q>,
        target: TypeKey,
        scope: &dyn Resolver,
    ) -> Result<SharedHandler<Q>, ResolveError>;
}

impl<Q, F> ResolveStep<Q> for F
where
    Q: Request,
    F: Fn(SharedHandler<Q>, TypeKey, &dyn Resolver) -> Result<SharedHandler<Q>, ResolveError>
        + Send
        + Sync,
{
    fn apply(
        &self,
        handler: SharedHandler<Q>,
        target: TypeKey,
        scope: &dyn Resolver,
    ) -> Result<SharedHandler<Q>, ResolveError> {
        self(handler, target, scope)
    }
}

/// Ordered resolution steps for one request type.
pub(crate) type Steps<Q> = Vec<Arc<dyn ResolveStep<Q>>>;

/// A route bound to its resolution steps.
pub struct HandlerFactory<'a, Q: Request> {
    route: &'a Route<Q>,
    steps: &'a [Arc<dyn ResolveStep<Q>>],
}

impl<'a, Q: Request> HandlerFactory<'a, Q> {
    pub fn new(route: &'a Route<Q>, steps: &'a [Arc<dyn ResolveStep<Q>>]) -> Self {
        Self { route, steps }
    }

    /// The handler type at the root of the pipeline.
    pub fn target(&self) -> TypeKey {
        self.route.handler()
    }

    /// Resolve the handler from `scope` and run it through every step.
    pub fn build(&self, scope: &dyn Resolver) -> Result<SharedHandler<Q>, ResolveError> {
        let target = self.target();
        self.steps
            .iter()
            .try_fold(self.route.resolve(scope)?, |handler, step| {
                step.apply(handler, target, scope)
            })
    }
}

/// A step that runs the handler inside a `tracing` span named after the
/// request and handler types.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracedStep;

impl<Q: Request> ResolveStep<Q> for TracedStep {
    fn apply(
        &self,
        handler: SharedHandler<Q>,
        target: TypeKey,
        _scope: &dyn Resolver,
    ) -> Result<SharedHandler<Q>, ResolveError> {
        Ok(Arc::new(Traced {
            inner: handler,
            target,
        }))
    }
}

struct Traced<Q: Request> {
    inner: SharedHandler<Q>,
    target: TypeKey,
}

#[async_trait]
impl<Q: Request> Handler for Traced<Q> {
    type Request = Q;

    async fn handle(
        &self,
        request: Q,
        cancel: &CancellationToken,
    ) -> Result<Response<Q>, HandlerError> {
        let span = tracing::info_span!(
            "handle",
            request = Q::name(),
            handler = self.target.name()
        );
        self.inner.handle(request, cancel).instrument(span).await
    }
}
