// lakay-shop/tests/cart_view.rs

mod common;

use std::sync::atomic::Ordering;

use common::{Backend, cart_view, session};
use lakay_shop::{CartStore, MemorySessionStorage, SessionProvider, ShopError};
use rust_decimal::Decimal;
use shared::{CartLineItem, OrderType};

#[tokio::test]
async fn test_mount_replaces_local_cart_with_server_cart() {
    let backend = Backend::new();
    let session = session();
    backend.seed(session.session_id(), 1, 2);
    backend.seed(session.session_id(), 6, 1);

    let cart = CartStore::new();
    // stale local line the server no longer knows about
    cart.add_item(CartLineItem::new(3, "Soup Joumou", Decimal::new(899, 2), 1));

    let mut view = cart_view(&backend, &cart, &session);
    view.mount().await.unwrap();

    let items = view.items();
    assert_eq!(items.len(), 2);
    assert_eq!((items[0].dish_id, items[0].quantity), (1, 2));
    assert_eq!((items[1].dish_id, items[1].quantity), (6, 1));

    let totals = view.totals();
    assert_eq!(totals.total_items, 3);
    assert_eq!(totals.total_price, Decimal::new(3197, 2));
    assert_eq!(totals.summary(), "Total: $31.97 (3 items)");
}

#[tokio::test]
async fn test_session_id_stable_across_fetches() {
    let backend = Backend::new();
    let storage = MemorySessionStorage::new();
    let cart = CartStore::new();

    let first = SessionProvider::load(&storage).unwrap();
    let mut view = cart_view(&backend, &cart, &first);
    view.mount().await.unwrap();

    // a later page load in the same tab
    let second = SessionProvider::load(&storage).unwrap();
    view.set_session(second).await.unwrap();
    view.sync().await.unwrap();

    let fetches = backend.cart_fetches.lock().unwrap().clone();
    assert_eq!(fetches.len(), 2);
    assert_eq!(fetches[0], fetches[1]);
    assert_eq!(fetches[0], first.session_id());
}

#[tokio::test]
async fn test_set_session_resyncs_on_change() {
    let backend = Backend::new();
    let cart = CartStore::new();
    let tab_a = session();
    let tab_b = session();
    assert_ne!(tab_a, tab_b);
    backend.seed(tab_b.session_id(), 5, 4);

    let mut view = cart_view(&backend, &cart, &tab_a);
    view.mount().await.unwrap();
    assert!(view.items().is_empty());

    view.set_session(tab_b.clone()).await.unwrap();
    assert_eq!(view.session(), &tab_b);
    assert_eq!(cart.get(5).map(|i| i.quantity), Some(4));
}

#[tokio::test]
async fn test_update_quantity_then_resync() {
    let backend = Backend::new();
    let session = session();
    backend.seed(session.session_id(), 2, 1);
    let cart = CartStore::new();
    let mut view = cart_view(&backend, &cart, &session);
    view.mount().await.unwrap();

    view.update_quantity(2, 5).await.unwrap();
    assert_eq!(cart.get(2).map(|i| i.quantity), Some(5));

    // zero is clamped to one before it is sent
    view.update_quantity(2, 0).await.unwrap();
    assert_eq!(backend.server_cart(session.session_id()).get(&2), Some(&1));
    assert_eq!(cart.get(2).map(|i| i.quantity), Some(1));

    // mount + (put, get) twice
    assert_eq!(backend.requests(), 5);
}

#[tokio::test]
async fn test_remove_then_resync() {
    let backend = Backend::new();
    let session = session();
    backend.seed(session.session_id(), 1, 1);
    backend.seed(session.session_id(), 4, 2);
    let cart = CartStore::new();
    let mut view = cart_view(&backend, &cart, &session);
    view.mount().await.unwrap();

    view.remove(1).await.unwrap();
    assert!(cart.get(1).is_none());
    assert_eq!(cart.len(), 1);

    // removing again is harmless
    view.remove(1).await.unwrap();
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn test_fetch_failure_leaves_local_cart() {
    let backend = Backend::new();
    let session = session();
    backend.seed(session.session_id(), 1, 2);
    let cart = CartStore::new();
    let mut view = cart_view(&backend, &cart, &session);
    view.mount().await.unwrap();
    cart.add_item(CartLineItem::new(4, "Legim", Decimal::new(999, 2), 1));
    let before = cart.items();

    backend.fail_cart.store(true, Ordering::SeqCst);
    let err = view.sync().await.unwrap_err();

    assert!(matches!(err, ShopError::Client(_)));
    assert_eq!(
        view.error(),
        Some("Failed to load your cart. Please refresh the page.")
    );
    assert_eq!(cart.items(), before);
    // no retry
    assert_eq!(backend.requests(), 2);
}

#[tokio::test]
async fn test_write_failure_leaves_local_state() {
    let backend = Backend::new();
    let session = session();
    backend.seed(session.session_id(), 1, 2);
    let cart = CartStore::new();
    let mut view = cart_view(&backend, &cart, &session);
    view.mount().await.unwrap();

    backend.fail_writes.store(true, Ordering::SeqCst);
    let before = backend.requests();
    let err = view.update_quantity(1, 7).await.unwrap_err();
    assert!(matches!(err, ShopError::Client(_)));
    assert_eq!(view.error(), Some("Kitchen is offline"));
    assert_eq!(cart.get(1).map(|i| i.quantity), Some(2));
    // no resync after a failed write
    assert_eq!(backend.requests(), before + 1);

    assert!(view.remove(1).await.is_err());
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn test_update_missing_line_surfaces_backend_text() {
    let backend = Backend::new();
    let cart = CartStore::new();
    let mut view = cart_view(&backend, &cart, &session());
    view.mount().await.unwrap();

    assert!(view.update_quantity(9, 2).await.is_err());
    assert_eq!(view.error(), Some("Dish not in cart"));

    // a successful sync clears the error
    view.sync().await.unwrap();
    assert!(view.error().is_none());
}

#[tokio::test]
async fn test_order_type_lives_in_store() {
    let backend = Backend::new();
    let cart = CartStore::new();
    let view = cart_view(&backend, &cart, &session());

    assert_eq!(view.order_type(), OrderType::Regular);
    view.set_order_type(OrderType::Catering);
    assert_eq!(cart.order_type(), OrderType::Catering);
}

#[tokio::test]
async fn test_teardown_cancels_sync() {
    let backend = Backend::new();
    let cart = CartStore::new();
    let mut view = cart_view(&backend, &cart, &session());
    view.teardown();

    let err = view.sync().await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(view.error().is_none());
    assert_eq!(backend.requests(), 0);
}
