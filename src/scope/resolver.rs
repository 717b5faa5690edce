use std::any::Any;
use std::sync::Arc;

use super::error::ResolveError;
use crate::key::TypeKey;

/// Produces instances of arbitrary types on demand.
///
/// This is the seam to the host's dependency container. Implementations
/// must be safe to share across concurrent dispatches.
pub trait Resolver: Send + Sync {
    /// Produce an instance for `key`. The returned value must downcast to
    /// the type `key` was built from.
    fn resolve_any(&self, key: TypeKey) -> Result<Arc<dyn Any + Send + Sync>, ResolveError>;
}

/// Typed resolution on top of `Resolver`.
pub trait ResolverExt: Resolver {
    fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        let key = TypeKey::of::<T>();
        self.resolve_any(key)?
            .downcast::<T>()
            .map_err(|_| ResolveError::TypeMismatch {
                type_name: key.name(),
            })
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn resolve_any(&self, key: TypeKey) -> Result<Arc<dyn Any + Send + Sync>, ResolveError> {
        (**self).resolve_any(key)
    }
}

/// Types that know how to build themselves from a scope.
///
/// Handlers usually implement this by resolving their collaborators:
///
/// ```ignore
/// impl FromScope for CreateCounterHandler {
///     fn from_scope(scope: &dyn Resolver) -> Result<Self, ResolveError> {
///         Ok(Self { store: scope.resolve()? })
///     }
/// }
/// ```
pub trait FromScope: Sized {
    fn from_scope(scope: &dyn Resolver) -> Result<Self, ResolveError>;
}
