// lakay-shop/tests/common/mod.rs
// In-process storefront backend and payment provider doubles

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use lakay_client::{OneshotHttpClient, StorefrontApi};
use lakay_shop::{
    BillingDetails, CartStore, CartView, MemorySessionStorage, MenuView, PaymentConfirmation,
    PaymentConfirmer, PaymentError, SessionProvider, ViewScope,
};
use serde::Deserialize;
use serde_json::{Value, json};

pub const MENU: [(i64, &str, f64); 6] = [
    (1, "Griot", 12.99),
    (2, "Diri ak Djon Djon", 10.99),
    (3, "Soup Joumou", 8.99),
    (4, "Legim", 9.99),
    (5, "Poulet en Sauce", 11.99),
    (6, "Bannan Peze", 5.99),
];

/// Backend double; every handler counts the request
#[derive(Default)]
pub struct Backend {
    // session -> dish_id -> quantity
    pub carts: Mutex<BTreeMap<String, BTreeMap<i64, u32>>>,
    pub orders: Mutex<Vec<(String, Value)>>,
    pub intents: Mutex<Vec<Value>>,
    pub cart_fetches: Mutex<Vec<String>>,
    pub requests: AtomicUsize,
    pub fail_menu: AtomicBool,
    pub fail_cart: AtomicBool,
    pub fail_writes: AtomicBool,
    pub reject_orders: Mutex<Option<String>>,
}

impl Backend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn seed(&self, session_id: &str, dish_id: i64, quantity: u32) {
        self.carts
            .lock()
            .unwrap()
            .entry(session_id.to_string())
            .or_default()
            .insert(dish_id, quantity);
    }

    pub fn server_cart(&self, session_id: &str) -> BTreeMap<i64, u32> {
        self.carts
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn writes_failing(&self) -> bool {
        self.fail_writes.load(Ordering::SeqCst)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartQuery {
    dish_id: i64,
    quantity: Option<u32>,
}

fn dish_json(id: i64) -> Value {
    let (id, name, price) = MENU
        .iter()
        .copied()
        .find(|(d, _, _)| *d == id)
        .unwrap_or((id, "Unknown", 0.0));
    json!({"id": id, "name": name, "price": price})
}

fn unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"message": "Kitchen is offline"})),
    )
        .into_response()
}

async fn list_dishes(State(s): State<Arc<Backend>>) -> Response {
    s.hit();
    if s.fail_menu.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let dishes: Vec<Value> = MENU
        .iter()
        .map(|(id, name, price)| {
            json!({
                "id": id,
                "name": name,
                "description": format!("{} the way grandmother made it", name),
                "price": price,
                "imageUrl": format!("/images/{}.jpg", id),
            })
        })
        .collect();
    Json(dishes).into_response()
}

async fn get_cart(State(s): State<Arc<Backend>>, Path(sid): Path<String>) -> Response {
    s.hit();
    s.cart_fetches.lock().unwrap().push(sid.clone());
    if s.fail_cart.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let entries: Vec<Value> = s
        .server_cart(&sid)
        .iter()
        .map(|(id, qty)| json!({"dish": dish_json(*id), "quantity": qty}))
        .collect();
    Json(entries).into_response()
}

async fn add(
    State(s): State<Arc<Backend>>,
    Path(sid): Path<String>,
    Query(q): Query<CartQuery>,
) -> Response {
    s.hit();
    if s.writes_failing() {
        return unavailable();
    }
    let mut carts = s.carts.lock().unwrap();
    *carts.entry(sid).or_default().entry(q.dish_id).or_default() += q.quantity.unwrap_or(1);
    StatusCode::OK.into_response()
}

async fn update(
    State(s): State<Arc<Backend>>,
    Path(sid): Path<String>,
    Query(q): Query<CartQuery>,
) -> Response {
    s.hit();
    if s.writes_failing() {
        return unavailable();
    }
    let mut carts = s.carts.lock().unwrap();
    match carts.get_mut(&sid).and_then(|c| c.get_mut(&q.dish_id)) {
        Some(qty) => {
            *qty = q.quantity.unwrap_or(1);
            StatusCode::OK.into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Dish not in cart"})),
        )
            .into_response(),
    }
}

async fn remove(
    State(s): State<Arc<Backend>>,
    Path(sid): Path<String>,
    Query(q): Query<CartQuery>,
) -> Response {
    s.hit();
    if s.writes_failing() {
        return unavailable();
    }
    if let Some(cart) = s.carts.lock().unwrap().get_mut(&sid) {
        cart.remove(&q.dish_id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create_payment_intent(State(s): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    s.hit();
    let amount = body["amount"].as_i64().unwrap_or_default();
    s.intents.lock().unwrap().push(body);
    Json(json!({"clientSecret": format!("pi_{}_secret_test", amount)})).into_response()
}

async fn submit_order(
    State(s): State<Arc<Backend>>,
    Path(sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    s.hit();
    if let Some(message) = s.reject_orders.lock().unwrap().clone() {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": message}))).into_response();
    }
    s.carts.lock().unwrap().remove(&sid);
    s.orders.lock().unwrap().push((sid, body));
    (StatusCode::CREATED, Json(json!({"id": 42}))).into_response()
}

pub fn router(state: Arc<Backend>) -> Router {
    Router::new()
        .route("/api/dishes", get(list_dishes))
        .route("/api/cart/{session_id}", get(get_cart))
        .route("/api/cart/{session_id}/add", post(add))
        .route("/api/cart/{session_id}/update", put(update))
        .route("/api/cart/{session_id}/remove", delete(remove))
        .route("/api/create-payment-intent", post(create_payment_intent))
        .route("/api/orders/{session_id}", post(submit_order))
        .with_state(state)
}

pub fn api(state: &Arc<Backend>) -> StorefrontApi<OneshotHttpClient> {
    StorefrontApi::new(OneshotHttpClient::new(router(state.clone())))
}

pub fn session() -> SessionProvider {
    SessionProvider::load(&MemorySessionStorage::new()).unwrap()
}

pub fn menu_view(state: &Arc<Backend>, cart: &CartStore, session: &SessionProvider) -> MenuView<OneshotHttpClient> {
    MenuView::new(api(state), cart.clone(), session.clone(), ViewScope::new())
}

pub fn cart_view(state: &Arc<Backend>, cart: &CartStore, session: &SessionProvider) -> CartView<OneshotHttpClient> {
    CartView::new(api(state), cart.clone(), session.clone(), ViewScope::new())
}

/// Payment provider double
#[derive(Default)]
pub struct FakeConfirmer {
    pub decline: Mutex<Option<String>>,
    pub calls: AtomicUsize,
    pub last_billing: Mutex<Option<BillingDetails>>,
}

impl FakeConfirmer {
    pub fn approving() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn declining(message: &str) -> Arc<Self> {
        let confirmer = Self::default();
        *confirmer.decline.lock().unwrap() = Some(message.to_string());
        Arc::new(confirmer)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentConfirmer for FakeConfirmer {
    async fn confirm(
        &self,
        client_secret: &str,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation, PaymentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_billing.lock().unwrap() = Some(billing.clone());
        if let Some(message) = self.decline.lock().unwrap().clone() {
            return Err(PaymentError::Declined(message));
        }
        let id = lakay_shop::payment::payment_intent_id(client_secret)?;
        Ok(PaymentConfirmation {
            payment_intent_id: id.to_string(),
        })
    }
}
