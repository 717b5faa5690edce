//! Routes: the typed link from a request type to its handler type.

use std::any::Any;
use std::sync::Arc;

use crate::handler::{Handler, SharedHandler};
use crate::key::TypeKey;
use crate::request::{Request, RequestInfo};
use crate::scope::{ResolveError, Resolver, ResolverExt};

type ResolveFn<Q> =
    dyn Fn(&dyn Resolver) -> Result<SharedHandler<Q>, ResolveError> + Send + Sync;

/// A registered handler for request type `Q`.
///
/// Holds the handler's identity and the typed step that asks a scope for
/// an instance of it.
pub struct Route<Q: Request> {
    handler: TypeKey,
    resolve: Box<ResolveFn<Q>>,
}

impl<Q: Request> Route<Q> {
    pub(crate) fn to<H>() -> Self
    where
        H: Handler<Request = Q>,
    {
        Self {
            handler: TypeKey::of::<H>(),
            resolve: Box::new(|scope: &dyn Resolver| {
                let handler: Arc<H> = scope.resolve::<H>()?;
                Ok(handler as SharedHandler<Q>)
            }),
        }
    }

    /// The handler type this route resolves.
    pub fn handler(&self) -> TypeKey {
        self.handler
    }

    /// Ask `scope` for the handler instance.
    pub fn resolve(&self, scope: &dyn Resolver) -> Result<SharedHandler<Q>, ResolveError> {
        (self.resolve)(scope)
    }
}

/// A route with its request type erased, as stored in the tables.
pub(crate) struct Entry {
    request: RequestInfo,
    handler: TypeKey,
    route: Box<dyn Any + Send + Sync>,
}

impl Entry {
    pub(crate) fn new<H: Handler>() -> Self {
        Self {
            request: RequestInfo::of::<H::Request>(),
            handler: TypeKey::of::<H>(),
            route: Box::new(Route::<H::Request>::to::<H>()),
        }
    }

    pub(crate) fn request(&self) -> RequestInfo {
        self.request
    }

    pub(crate) fn handler(&self) -> TypeKey {
        self.handler
    }

    /// The typed route. `None` only if `Q` is not the entry's request type.
    pub(crate) fn route<Q: Request>(&self) -> Option<&Route<Q>> {
        self.route.downcast_ref::<Route<Q>>()
    }
}
