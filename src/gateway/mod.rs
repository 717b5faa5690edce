//! Gateway: named, JSON-in / JSON-out dispatch for boundary layers.
//!
//! Transports (HTTP controllers, queue consumers) usually see a request name
//! and a JSON payload rather than a typed value. A `Gateway` maps names to
//! request types, decodes the payload, dispatches through a `Dispatcher`, and
//! encodes the response.
//!
//! ## Example
//!
//! ```ignore
//! use mediator_rust::gateway::{DispatchRequest, Gateway};
//! use serde_json::json;
//!
//! let gateway = Gateway::new(dispatcher)
//!     .route::<CreateCounter>()?
//!     .route::<GetCounter>()?;
//!
//! let value = gateway
//!     .dispatch("counter.create", json!({ "id": "c1" }), &scope, &cancel)
//!     .await?;
//!
//! let response = gateway
//!     .dispatch_request(&DispatchRequest::new("counter.get", json!({ "id": "c1" })), &scope, &cancel)
//!     .await;
//! assert_eq!(response.status, 200);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::dispatcher::Dispatcher;
use crate::error::HandlerError;
use crate::registry::RegistryError;
use crate::request::Request;
use crate::scope::Resolver;

type Invoke = Box<
    dyn for<'a> Fn(
            &'a Dispatcher,
            Value,
            &'a dyn Resolver,
            &'a CancellationToken,
        ) -> BoxFuture<'a, Result<Value, HandlerError>>
        + Send
        + Sync,
>;

fn invoke<'a, Q>(
    dispatcher: &'a Dispatcher,
    input: Value,
    scope: &'a dyn Resolver,
    cancel: &'a CancellationToken,
) -> BoxFuture<'a, Result<Value, HandlerError>>
where
    Q: Request + DeserializeOwned,
    Q::Response: Serialize,
{
    Box::pin(async move {
        let request: Q = serde_json::from_value(input)?;
        let response = dispatcher.dispatch(request, scope, cancel).await?;
        serde_json::to_value(response).map_err(HandlerError::other)
    })
}

/// Name-addressed dispatch over a shared `Dispatcher`.
pub struct Gateway {
    dispatcher: Arc<Dispatcher>,
    routes: HashMap<&'static str, Invoke>,
}

impl Gateway {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            routes: HashMap::new(),
        }
    }

    /// Route `Q::name()` to `Q`.
    ///
    /// Fails if the name is taken or if the dispatcher has no route for `Q`
    /// under its current configuration.
    pub fn route<Q>(mut self) -> Result<Self, RegistryError>
    where
        Q: Request + DeserializeOwned,
        Q::Response: Serialize,
    {
        let name = Q::name();
        if self.routes.contains_key(name) {
            return Err(RegistryError::DuplicateName { name });
        }

        if self.dispatcher.route::<Q>().is_err() {
            return Err(RegistryError::Unrouted { request: name });
        }

        self.routes.insert(name, Box::new(invoke::<Q>));
        Ok(self)
    }

    /// Dispatch the request routed under `name` with a JSON input.
    pub async fn dispatch(
        &self,
        name: &str,
        input: Value,
        scope: &dyn Resolver,
        cancel: &CancellationToken,
    ) -> Result<Value, HandlerError> {
        let route = self.routes.get(name).ok_or_else(|| {
            tracing::warn!(request = name, "unknown request name");
            HandlerError::UnknownRequest(name.to_string())
        })?;
        route(self.dispatcher.as_ref(), input, scope, cancel).await
    }

    /// Dispatch a `DispatchRequest`, returning a `DispatchResponse`.
    pub async fn dispatch_request(
        &self,
        request: &DispatchRequest,
        scope: &dyn Resolver,
        cancel: &CancellationToken,
    ) -> DispatchResponse {
        match self
            .dispatch(&request.request, request.input.clone(), scope, cancel)
            .await
        {
            Ok(body) => DispatchResponse { status: 200, body },
            Err(e) => DispatchResponse {
                status: e.status_code(),
                body: serde_json::json!({ "error": e.to_string() }),
            },
        }
    }

    /// List routed request names.
    pub fn names(&self) -> Vec<&str> {
        self.routes.keys().copied().collect()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// An inbound named request.
///
/// ```json
/// { "request": "counter.create", "input": { "id": "c1" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Request name, as routed with `Gateway::route`.
    pub request: String,
    /// JSON input decoded into the request type.
    #[serde(default)]
    pub input: Value,
}

impl DispatchRequest {
    pub fn new(request: impl Into<String>, input: Value) -> Self {
        Self {
            request: request.into(),
            input,
        }
    }
}

/// Response from dispatching a named request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body (handler result or error).
    pub body: Value,
}
