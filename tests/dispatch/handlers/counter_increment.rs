//! Handler: counter.increment

use std::sync::Arc;

use mediator_rust::{
    async_trait, CancellationToken, FromScope, HandlerError, ResolveError, Resolver, ResolverExt,
};

use crate::support::{CounterStore, IncrementCounter};

pub type Handler = IncrementCounterHandler;

pub struct IncrementCounterHandler {
    store: Arc<CounterStore>,
}

impl FromScope for IncrementCounterHandler {
    fn from_scope(scope: &dyn Resolver) -> Result<Self, ResolveError> {
        Ok(Self {
            store: scope.resolve()?,
        })
    }
}

#[async_trait]
impl mediator_rust::Handler for IncrementCounterHandler {
    type Request = IncrementCounter;

    async fn handle(
        &self,
        request: IncrementCounter,
        _cancel: &CancellationToken,
    ) -> Result<i64, HandlerError> {
        if request.amount <= 0 {
            return Err(HandlerError::Rejected(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }
        self.store.add(&request.id, request.amount)
    }
}
