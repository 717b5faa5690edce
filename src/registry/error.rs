//! Error type for building registries.

use thiserror::Error;

use crate::request::RequestKind;

/// A registration was rejected. Any of these aborts startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two primary handlers claim the same request type.
    #[error("request {request} already handled by {existing}, cannot also register {duplicate}")]
    Conflict {
        request: &'static str,
        existing: &'static str,
        duplicate: &'static str,
    },
    /// Two decorators claim the same request type.
    #[error("{kind} {request} already decorated by {existing}, cannot also register {duplicate}")]
    DecoratorConflict {
        request: &'static str,
        kind: RequestKind,
        existing: &'static str,
        duplicate: &'static str,
    },
    /// A required request type has no primary handler.
    #[error("required request {request} has no handler")]
    Missing { request: &'static str },
    /// Two gateway routes share a name.
    #[error("request name {name} is already routed")]
    DuplicateName { name: &'static str },
    /// A gateway route points at a request type nothing handles.
    #[error("cannot route {request}: no handler registered")]
    Unrouted { request: &'static str },
}
