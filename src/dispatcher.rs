//! Dispatcher: routes a request to its handler and returns the result.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mediator_rust::{CancellationToken, Dispatcher, Registry, Scope};
//!
//! let registry = Arc::new(
//!     Registry::builder()
//!         .handler::<CreateCounterHandler>()
//!         .build()?,
//! );
//! let dispatcher = Dispatcher::new(registry);
//!
//! let scope = Scope::new()
//!     .with(CounterStore::default())
//!     .with_handler::<CreateCounterHandler>();
//!
//! let id = dispatcher
//!     .dispatch(CreateCounter { id: "c1".into() }, &scope, &CancellationToken::new())
//!     .await?;
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::config::DispatchConfig;
use crate::error::HandlerError;
use crate::factory::HandlerFactory;
use crate::key::TypeKey;
use crate::registry::{Registry, Route};
use crate::request::{Request, Response};
use crate::scope::Resolver;

/// Which table a route came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    Decorated,
    Primary,
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSource::Decorated => f.write_str("decorated"),
            RouteSource::Primary => f.write_str("primary"),
        }
    }
}

/// The route the dispatcher picked for a request type.
pub struct SelectedRoute<'a, Q: Request> {
    source: RouteSource,
    route: &'a Route<Q>,
}

impl<'a, Q: Request> SelectedRoute<'a, Q> {
    pub fn source(&self) -> RouteSource {
        self.source
    }

    pub fn handler(&self) -> TypeKey {
        self.route.handler()
    }

    pub fn route(&self) -> &'a Route<Q> {
        self.route
    }
}

/// The runtime entry point.
///
/// Holds no per-call state: one dispatcher serves any number of concurrent
/// calls. Each call resolves a fresh handler from the caller's scope and
/// invokes it exactly once.
pub struct Dispatcher {
    registry: Arc<Registry>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            config: DispatchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Pick the route for `Q`: its decorator if one is registered (and
    /// decorators are enabled), otherwise its primary handler.
    pub fn route<Q: Request>(&self) -> Result<SelectedRoute<'_, Q>, HandlerError> {
        let decorated = self
            .config
            .decorators
            .then(|| self.registry.decorators().get::<Q>())
            .flatten()
            .map(|route| SelectedRoute {
                source: RouteSource::Decorated,
                route,
            });

        decorated
            .or_else(|| {
                self.registry
                    .handlers()
                    .get::<Q>()
                    .map(|route| SelectedRoute {
                        source: RouteSource::Primary,
                        route,
                    })
            })
            .ok_or_else(|| {
                tracing::warn!(request = Q::name(), "no handler registered");
                HandlerError::HandlerNotFound { request: Q::name() }
            })
    }

    /// Dispatch `request` to its handler.
    ///
    /// The handler is resolved from `scope` through the request type's
    /// resolution steps, then invoked once with `request` and `cancel`.
    /// Whatever the handler returns, value or error, is returned as is.
    pub async fn dispatch<Q: Request>(
        &self,
        request: Q,
        scope: &dyn Resolver,
        cancel: &CancellationToken,
    ) -> Result<Response<Q>, HandlerError> {
        let selected = self.route::<Q>()?;
        let target = selected.handler();

        let handler = HandlerFactory::new(selected.route(), self.registry.steps::<Q>())
            .build(scope)
            .map_err(|source| {
                tracing::warn!(
                    request = Q::name(),
                    handler = target.name(),
                    error = %source,
                    "handler resolution failed"
                );
                HandlerError::Resolution {
                    handler: target.name(),
                    source,
                }
            })?;

        tracing::debug!(
            request = Q::name(),
            handler = target.name(),
            route = %selected.source(),
            "dispatching request"
        );

        let started = Instant::now();
        let result = handler.handle(request, cancel).await;

        if let Some(threshold) = self.config.slow_dispatch() {
            let elapsed = started.elapsed();
            if elapsed > threshold {
                tracing::warn!(
                    request = Q::name(),
                    handler = target.name(),
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    "slow dispatch"
                );
            }
        }

        result
    }
}
