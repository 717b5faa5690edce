//! Scope: a type-map container implementing `Resolver`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use super::error::ResolveError;
use super::resolver::{FromScope, Resolver};
use crate::key::TypeKey;

type Instance = Arc<dyn Any + Send + Sync>;
type Provider = Arc<dyn Fn(&dyn Resolver) -> Result<Instance, ResolveError> + Send + Sync>;

enum Binding {
    /// Shared value handed out on every resolution.
    Instance(Instance),
    /// Called on every resolution with the scope the lookup started from.
    Factory(Provider),
}

/// A container of instances and factories keyed by type.
///
/// Built once with the `with*` builder methods, then read-only. A child
/// scope created with `Scope::child` sees its own bindings first and falls
/// back to its parent; factories found in the parent still resolve their
/// dependencies through the child, so per-call values are visible to
/// process-wide factories.
#[derive(Default)]
pub struct Scope {
    bindings: HashMap<TypeId, Binding>,
    parent: Option<Arc<Scope>>,
}

impl Scope {
    /// Create an empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scope that falls back to `parent`.
    pub fn child(parent: &Arc<Scope>) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(Arc::clone(parent)),
        }
    }

    /// Bind a shared value.
    pub fn with<T: Send + Sync + 'static>(self, value: T) -> Self {
        self.with_arc(Arc::new(value))
    }

    /// Bind an already shared value.
    pub fn with_arc<T: Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
        self.bindings
            .insert(TypeId::of::<T>(), Binding::Instance(value));
        self
    }

    /// Bind a factory, called on every resolution of `T`.
    pub fn with_factory<T, F>(mut self, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> Result<T, ResolveError> + Send + Sync + 'static,
    {
        let provider: Provider = Arc::new(move |scope: &dyn Resolver| {
            let value = factory(scope)?;
            Ok(Arc::new(value) as Instance)
        });
        self.bindings
            .insert(TypeId::of::<T>(), Binding::Factory(provider));
        self
    }

    /// Bind `T` to its `FromScope` constructor.
    pub fn with_handler<T>(self) -> Self
    where
        T: FromScope + Send + Sync + 'static,
    {
        self.with_factory::<T, _>(T::from_scope)
    }

    /// Whether `T` is bound here or in a parent.
    pub fn contains<T: 'static>(&self) -> bool {
        let id = TypeId::of::<T>();
        self.bindings.contains_key(&id)
            || self.parent.as_ref().is_some_and(|p| p.contains::<T>())
    }

    fn lookup(&self, key: TypeKey, origin: &dyn Resolver) -> Option<Result<Instance, ResolveError>> {
        match self.bindings.get(&key.id()) {
            Some(Binding::Instance(value)) => Some(Ok(Arc::clone(value))),
            Some(Binding::Factory(provider)) => Some(provider(origin)),
            None => self
                .parent
                .as_ref()
                .and_then(|parent| parent.lookup(key, origin)),
        }
    }
}

impl Resolver for Scope {
    fn resolve_any(&self, key: TypeKey) -> Result<Instance, ResolveError> {
        self.lookup(key, self).unwrap_or(Err(ResolveError::Missing {
            type_name: key.name(),
        }))
    }
}
