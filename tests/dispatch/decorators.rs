//! Decorator precedence over primary handlers.

use std::sync::Arc;

use mediator_rust::{
    CancellationToken, Decorates, DispatchConfig, Dispatcher, Registry, RequestKind, RouteSource,
    Scope, TypeKey,
};

use crate::support::{Calls, DoubleFoo, Foo, TripleFoo};

fn scope(calls: &Arc<Calls>) -> Scope {
    Scope::new()
        .with_arc(Arc::clone(calls))
        .with_handler::<DoubleFoo>()
        .with(TripleFoo)
}

#[tokio::test]
async fn decorator_overrides_primary_handler() {
    let calls = Arc::new(Calls::default());
    let scope = scope(&calls);
    let cancel = CancellationToken::new();

    let primary_only = Dispatcher::new(Arc::new(
        Registry::builder().handler::<DoubleFoo>().build().unwrap(),
    ));
    let doubled = primary_only
        .dispatch(Foo { value: 5 }, &scope, &cancel)
        .await
        .unwrap();
    assert_eq!(doubled, 10);

    let decorated = Dispatcher::new(Arc::new(
        Registry::builder()
            .handler::<DoubleFoo>()
            .decorator::<TripleFoo>()
            .build()
            .unwrap(),
    ));
    let tripled = decorated
        .dispatch(Foo { value: 5 }, &scope, &cancel)
        .await
        .unwrap();
    assert_eq!(tripled, 15);

    // The primary handler ran once, for the undecorated dispatcher only.
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn decorator_without_primary_still_dispatches() {
    let dispatcher = Dispatcher::new(Arc::new(
        Registry::builder().decorator::<TripleFoo>().build().unwrap(),
    ));
    let result = dispatcher
        .dispatch(Foo { value: 2 }, &Scope::new().with(TripleFoo), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result, 6);
}

#[tokio::test]
async fn config_can_bypass_decorators() {
    let calls = Arc::new(Calls::default());
    let registry = Arc::new(
        Registry::builder()
            .handler::<DoubleFoo>()
            .decorator::<TripleFoo>()
            .build()
            .unwrap(),
    );
    let config = DispatchConfig::from_json(r#"{ "decorators": false }"#).unwrap();
    let dispatcher = Dispatcher::new(registry).with_config(config);

    assert_eq!(dispatcher.route::<Foo>().unwrap().source(), RouteSource::Primary);
    let result = dispatcher
        .dispatch(Foo { value: 5 }, &scope(&calls), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result, 10);
}

#[test]
fn attribute_declares_the_target() {
    fn target_of<D: Decorates>() -> TypeKey {
        TypeKey::of::<D::Target>()
    }

    assert_eq!(target_of::<TripleFoo>(), TypeKey::of::<Foo>());

    let registry = Registry::builder().decorator::<TripleFoo>().build().unwrap();
    assert_eq!(registry.decorators().count(RequestKind::Command), 1);
    assert_eq!(registry.decorators().count(RequestKind::Query), 0);
    assert!(!registry.handlers().contains::<Foo>());
}
