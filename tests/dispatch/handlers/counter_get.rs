//! Handler: counter.get

use std::sync::Arc;

use mediator_rust::{
    async_trait, CancellationToken, FromScope, HandlerError, ResolveError, Resolver, ResolverExt,
};

use crate::support::{CounterStore, GetCounter};

pub type Handler = GetCounterHandler;

pub struct GetCounterHandler {
    store: Arc<CounterStore>,
}

impl FromScope for GetCounterHandler {
    fn from_scope(scope: &dyn Resolver) -> Result<Self, ResolveError> {
        Ok(Self {
            store: scope.resolve()?,
        })
    }
}

#[async_trait]
impl mediator_rust::Handler for GetCounterHandler {
    type Request = GetCounter;

    async fn handle(
        &self,
        request: GetCounter,
        _cancel: &CancellationToken,
    ) -> Result<Option<i64>, HandlerError> {
        Ok(self.store.get(&request.id))
    }
}
