//! Basic dispatch: one handler per request, resolved from a scope.

use std::sync::Arc;

use mediator_rust::{
    CancellationToken, Dispatcher, Registry, RequestKind, Request, RouteSource, Scope,
};

use crate::handlers::counter_create::CreateCounterHandler;
use crate::handlers::counter_get::GetCounterHandler;
use crate::handlers::counter_increment::IncrementCounterHandler;
use crate::support::{
    Calls, CounterStore, CreateCounter, DoubleFoo, Foo, GetCounter, IncrementCounter,
};

fn counter_dispatcher() -> Dispatcher {
    let registry = Registry::builder()
        .handler::<CreateCounterHandler>()
        .handler::<IncrementCounterHandler>()
        .handler::<GetCounterHandler>()
        .build()
        .unwrap();
    Dispatcher::new(Arc::new(registry))
}

fn counter_scope() -> Scope {
    Scope::new()
        .with(CounterStore::default())
        .with_handler::<CreateCounterHandler>()
        .with_handler::<IncrementCounterHandler>()
        .with_handler::<GetCounterHandler>()
}

#[tokio::test]
async fn full_lifecycle() {
    let dispatcher = counter_dispatcher();
    let scope = counter_scope();
    let cancel = CancellationToken::new();

    let id = dispatcher
        .dispatch(CreateCounter { id: "c1".into() }, &scope, &cancel)
        .await
        .unwrap();
    assert_eq!(id, "c1");

    let value = dispatcher
        .dispatch(IncrementCounter { id: "c1".into(), amount: 5 }, &scope, &cancel)
        .await
        .unwrap();
    assert_eq!(value, 5);

    dispatcher
        .dispatch(IncrementCounter { id: "c1".into(), amount: 3 }, &scope, &cancel)
        .await
        .unwrap();

    let value = dispatcher
        .dispatch(GetCounter { id: "c1".into() }, &scope, &cancel)
        .await
        .unwrap();
    assert_eq!(value, Some(8));

    let missing = dispatcher
        .dispatch(GetCounter { id: "nope".into() }, &scope, &cancel)
        .await
        .unwrap();
    assert_eq!(missing, None);
}

#[tokio::test]
async fn handler_runs_exactly_once_per_dispatch() {
    let calls = Arc::new(Calls::default());
    let registry = Registry::builder().handler::<DoubleFoo>().build().unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));
    let scope = Scope::new()
        .with_arc(Arc::clone(&calls))
        .with_handler::<DoubleFoo>();

    let result = dispatcher
        .dispatch(Foo { value: 5 }, &scope, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result, 10);
    assert_eq!(calls.count(), 1);

    dispatcher
        .dispatch(Foo { value: 1 }, &scope, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(calls.count(), 2);
}

#[tokio::test]
async fn per_call_scopes_layer_over_the_root() {
    let dispatcher = counter_dispatcher();
    let root = Arc::new(counter_scope());
    let cancel = CancellationToken::new();

    dispatcher
        .dispatch(CreateCounter { id: "shared".into() }, &root, &cancel)
        .await
        .unwrap();

    // A call scope with its own store sees nothing from the root store.
    let isolated = Scope::child(&root).with(CounterStore::default());
    let value = dispatcher
        .dispatch(GetCounter { id: "shared".into() }, &isolated, &cancel)
        .await
        .unwrap();
    assert_eq!(value, None);

    // A call scope without a store falls back to the root one.
    let layered = Scope::child(&root);
    let value = dispatcher
        .dispatch(GetCounter { id: "shared".into() }, &layered, &cancel)
        .await
        .unwrap();
    assert_eq!(value, Some(0));
}

#[test]
fn derived_requests_carry_kind_and_name() {
    assert_eq!(CreateCounter::KIND, RequestKind::Command);
    assert_eq!(CreateCounter::name(), "counter.create");
    assert_eq!(GetCounter::KIND, RequestKind::Query);
    assert_eq!(Foo::name(), "foo");
}

#[derive(mediator_rust::Query)]
struct HTTPPing;

#[derive(mediator_rust::Command)]
struct ResetUserID;

#[test]
fn derived_names_keep_acronyms_together() {
    assert_eq!(HTTPPing::name(), "http_ping");
    assert_eq!(ResetUserID::name(), "reset_user_id");
}

#[test]
fn primary_route_is_selected_without_decorators() {
    let dispatcher = counter_dispatcher();
    let selected = dispatcher.route::<GetCounter>().unwrap();
    assert_eq!(selected.source(), RouteSource::Primary);
    assert!(selected.handler().name().ends_with("GetCounterHandler"));
}
