//! Concurrent dispatch over one shared registry.

use std::sync::Arc;

use mediator_rust::{CancellationToken, Dispatcher, Registry, Scope};

use crate::handlers::counter_create::CreateCounterHandler;
use crate::handlers::counter_increment::IncrementCounterHandler;
use crate::support::{
    CounterStore, CreateCounter, Echo, EchoHandler, EchoReply, IncrementCounter,
};

const REQUESTS: u64 = 256;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_dispatches_stay_correlated() {
    let registry = Arc::new(Registry::builder().handler::<EchoHandler>().build().unwrap());
    let dispatcher = Arc::new(Dispatcher::new(registry));
    let scope = Arc::new(Scope::new().with(EchoHandler));

    let tasks: Vec<_> = (0..REQUESTS)
        .map(|id| {
            let dispatcher = Arc::clone(&dispatcher);
            let scope = Arc::clone(&scope);
            tokio::spawn(async move {
                let request = Echo {
                    correlation_id: id,
                    payload: format!("payload-{}", id),
                };
                let reply = dispatcher
                    .dispatch(request, scope.as_ref(), &CancellationToken::new())
                    .await;
                (id, reply)
            })
        })
        .collect();

    for task in tasks {
        let (id, reply) = task.await.unwrap();
        assert_eq!(
            reply.unwrap(),
            EchoReply {
                correlation_id: id,
                payload: format!("payload-{}", id),
            }
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_increments_share_the_scope() {
    let registry = Arc::new(
        Registry::builder()
            .handler::<CreateCounterHandler>()
            .handler::<IncrementCounterHandler>()
            .build()
            .unwrap(),
    );
    let dispatcher = Arc::new(Dispatcher::new(registry));
    let store = Arc::new(CounterStore::default());
    let scope = Arc::new(
        Scope::new()
            .with_arc(Arc::clone(&store))
            .with_handler::<CreateCounterHandler>()
            .with_handler::<IncrementCounterHandler>(),
    );

    dispatcher
        .dispatch(CreateCounter { id: "hits".into() }, scope.as_ref(), &CancellationToken::new())
        .await
        .unwrap();

    let tasks: Vec<_> = (0..REQUESTS)
        .map(|_| {
            let dispatcher = Arc::clone(&dispatcher);
            let scope = Arc::clone(&scope);
            tokio::spawn(async move {
                let request = IncrementCounter {
                    id: "hits".into(),
                    amount: 1,
                };
                dispatcher
                    .dispatch(request, scope.as_ref(), &CancellationToken::new())
                    .await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(store.get("hits"), Some(REQUESTS as i64));
}
