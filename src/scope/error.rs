//! Error type for scope resolution.

use thiserror::Error;

/// A scope could not produce an instance of a type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Nothing is bound for the type in the scope or any parent.
    #[error("no binding for {type_name}")]
    Missing { type_name: &'static str },
    /// A binding exists but produced a value of a different type.
    #[error("binding for {type_name} produced a value of another type")]
    TypeMismatch { type_name: &'static str },
    /// A factory ran and failed.
    #[error("failed to construct {type_name}: {reason}")]
    Construction {
        type_name: &'static str,
        reason: String,
    },
}

impl ResolveError {
    /// A construction failure for `T`.
    pub fn construction<T: ?Sized + 'static>(reason: impl Into<String>) -> Self {
        ResolveError::Construction {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// The type the failed resolution was for.
    pub fn type_name(&self) -> &'static str {
        match self {
            ResolveError::Missing { type_name }
            | ResolveError::TypeMismatch { type_name }
            | ResolveError::Construction { type_name, .. } => type_name,
        }
    }
}
