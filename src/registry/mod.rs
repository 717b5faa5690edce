//! Registry: the startup-built handler and decorator tables.
//!
//! A `Registry` is built once by a `RegistryBuilder` before any dispatch
//! traffic, then shared read-only (usually behind an `Arc`) by every
//! `Dispatcher`. Registration is explicit: each handler type is named once,
//! and trait bounds reject handlers that are not bound to a request type or
//! decorators whose target does not match the request they handle.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mediator_rust::{Registry, TracedStep};
//!
//! let registry = Registry::builder()
//!     .handler::<CreateCounterHandler>()
//!     .handler::<GetCounterHandler>()
//!     .decorator::<CachedGetCounter>()
//!     .step::<CreateCounter, _>(TracedStep)
//!     .require::<CreateCounter>()
//!     .build()?;
//! ```
//!
//! ## Handler Convention
//!
//! Handler modules expose their handler type as `Handler`, so whole sets of
//! modules can be registered with one macro call:
//!
//! ```ignore
//! // src/handlers/counter_create.rs
//! pub type Handler = CreateCounterHandler;
//!
//! let builder = mediator_rust::register_handlers!(
//!     Registry::builder(),
//!     handlers::counter_create,
//!     handlers::counter_increment,
//! );
//! ```

mod decorators;
mod error;
mod handlers;
mod route;

pub use decorators::DecoratorTable;
pub use error::RegistryError;
pub use handlers::HandlerRegistry;
pub use route::Route;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::factory::{ResolveStep, Steps};
use crate::handler::{Decorates, Handler};
use crate::request::{Request, RequestInfo};
use route::Entry;

/// The immutable result of a successful build.
pub struct Registry {
    handlers: HandlerRegistry,
    decorators: DecoratorTable,
    steps: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The primary table.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// The decorator table.
    pub fn decorators(&self) -> &DecoratorTable {
        &self.decorators
    }

    /// Resolution steps registered for `Q`, in registration order.
    pub fn steps<Q: Request>(&self) -> &[Arc<dyn ResolveStep<Q>>] {
        self.steps
            .get(&TypeId::of::<Q>())
            .and_then(|steps| steps.downcast_ref::<Steps<Q>>())
            .map(|steps| steps.as_slice())
            .unwrap_or(&[])
    }
}

/// Collects registrations and validates them into a `Registry`.
///
/// Registration methods chain. The first rejected registration is kept and
/// returned by `build`, so a misconfigured process never starts dispatching.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HandlerRegistry,
    decorators: DecoratorTable,
    steps: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    required: Vec<RequestInfo>,
    error: Option<RegistryError>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `H` as the primary handler for `H::Request`.
    pub fn handler<H: Handler>(mut self) -> Self {
        if let Err(err) = self.handlers.insert(Entry::new::<H>()) {
            self.reject(err);
        }
        self
    }

    /// Register `H` as the decorator for its `#[decorates(..)]` target.
    pub fn decorator<H>(mut self) -> Self
    where
        H: Decorates + Handler<Request = <H as Decorates>::Target>,
    {
        if let Err(err) = self.decorators.insert(Entry::new::<H>()) {
            self.reject(err);
        }
        self
    }

    /// Append a resolution step for `Q`.
    pub fn step<Q, S>(mut self, step: S) -> Self
    where
        Q: Request,
        S: ResolveStep<Q> + 'static,
    {
        let steps = self
            .steps
            .entry(TypeId::of::<Q>())
            .or_insert_with(|| Box::new(Steps::<Q>::new()));
        if let Some(steps) = steps.downcast_mut::<Steps<Q>>() {
            steps.push(Arc::new(step));
        }
        self
    }

    /// Require a primary handler for `Q` at build time.
    pub fn require<Q: Request>(mut self) -> Self {
        self.required.push(RequestInfo::of::<Q>());
        self
    }

    /// Apply a registration function, typically one per handler module.
    pub fn module<F>(self, register: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        register(self)
    }

    fn reject(&mut self, err: RegistryError) {
        tracing::error!(error = %err, "handler registration rejected");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Validate and freeze the registrations.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let registered: Vec<TypeId> = self
            .handlers
            .requests()
            .into_iter()
            .map(|request| RequestInfo::type_id(&request))
            .collect();
        if let Some(missing) = self
            .required
            .iter()
            .copied()
            .find(|request| !registered.contains(&RequestInfo::type_id(request)))
        {
            tracing::error!(request = missing.name(), "required request has no handler");
            return Err(RegistryError::Missing {
                request: missing.name(),
            });
        }

        tracing::info!(
            handlers = self.handlers.len(),
            decorators = self.decorators.len(),
            "handler registry built"
        );

        Ok(Registry {
            handlers: self.handlers,
            decorators: self.decorators,
            steps: self.steps,
        })
    }
}

/// Register handler modules with a builder using the convention pattern.
///
/// Each module must export `type Handler`, a type implementing `Handler`.
///
/// # Example
/// ```ignore
/// let registry = mediator_rust::register_handlers!(
///     Registry::builder(),
///     handlers::counter_create,
///     handlers::counter_get,
/// )
/// .build()?;
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($builder:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $builder
        $(
            .handler::<$($seg)::+::Handler>()
        )+
    };
}

/// Register decorator modules with a builder.
///
/// Each module must export `type Handler`, a type carrying
/// `#[decorates(..)]`.
#[macro_export]
macro_rules! register_decorators {
    ($builder:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $builder
        $(
            .decorator::<$($seg)::+::Handler>()
        )+
    };
}
