//! Requests: typed commands and queries.
//!
//! A request is a plain value describing what to do. Its response type is
//! fixed by the `Request` impl, so a dispatcher can never hand back a
//! result of the wrong type.
//!
//! ## Example
//!
//! ```ignore
//! use mediator_rust::{Command, Query};
//!
//! #[derive(Command)]
//! #[request(response = String, name = "counter.create")]
//! pub struct CreateCounter {
//!     pub id: String,
//! }
//!
//! #[derive(Query)]
//! #[request(response = Option<i64>)]
//! pub struct GetCounter {
//!     pub id: String,
//! }
//! ```

use std::any::TypeId;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a request mutates state or reads it.
///
/// Both kinds dispatch identically. The kind only selects which decorator
/// table a decorator for the request lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Command,
    Query,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Command => f.write_str("command"),
            RequestKind::Query => f.write_str("query"),
        }
    }
}

/// A dispatchable request carrying its declared response type.
///
/// Usually derived with `#[derive(Command)]` or `#[derive(Query)]`, but a
/// manual impl only needs the response type:
///
/// ```ignore
/// struct Ping;
///
/// impl Request for Ping {
///     type Response = &'static str;
///     const KIND: RequestKind = RequestKind::Query;
/// }
/// ```
pub trait Request: Send + 'static {
    /// The value a handler produces for this request.
    type Response: Send + 'static;

    /// Command or query. Defaults to command.
    const KIND: RequestKind = RequestKind::Command;

    /// Name used in diagnostics and by the named gateway.
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shorthand for a request's response type.
pub type Response<Q> = <Q as Request>::Response;

/// Runtime description of a request type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestInfo {
    type_id: TypeId,
    name: &'static str,
    kind: RequestKind,
}

impl RequestInfo {
    pub fn of<Q: Request>() -> Self {
        Self {
            type_id: TypeId::of::<Q>(),
            name: Q::name(),
            kind: Q::KIND,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}
