#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use jwt_simple::prelude::*;
use serde_json::Value;
use tower::ServiceExt;

use storefront::config::Config;
use storefront::error::Result;
use storefront::handlers;
use storefront::identity::IdentityProvider;
use storefront::models::{Address, Customer, Order, Product};
use storefront::payments::{CheckoutSession, PaymentProcessor, SessionLineItem};
use storefront::state::AppState;
use storefront::store::{CustomerStore, MemoryStore, OrderStore, StoreError, StoreResult};

pub const TEST_AUTH_SECRET: &str = "test-token-secret";
pub const TEST_WEBHOOK_SECRET: &str = "whsec_test";
pub const TEST_CHECKOUT_URL: &str = "https://pay.example.com/session/cs_test";

/// Payment-processor fake. Checkout sessions always resolve to
/// `TEST_CHECKOUT_URL`; line-item listings return whatever the test seeded.
pub struct FakeProcessor {
    pub line_items: Mutex<Vec<SessionLineItem>>,
}

impl FakeProcessor {
    pub fn new() -> Self {
        Self {
            line_items: Mutex::new(Vec::new()),
        }
    }

    pub fn set_line_items(&self, items: Vec<SessionLineItem>) {
        *self.line_items.lock().unwrap() = items;
    }
}

#[async_trait]
impl PaymentProcessor for FakeProcessor {
    async fn create_checkout_session(
        &self,
        _price_id: &str,
        _quantity: i64,
        _success_url: &str,
        _cancel_url: &str,
    ) -> Result<CheckoutSession> {
        Ok(CheckoutSession {
            id: "cs_test".to_string(),
            url: TEST_CHECKOUT_URL.to_string(),
        })
    }

    async fn list_line_items(&self, _session_id: &str) -> Result<Vec<SessionLineItem>> {
        Ok(self.line_items.lock().unwrap().clone())
    }
}

/// Identity-provider fake that records every attribute update.
pub struct RecordingIdentity {
    pub calls: Mutex<Vec<(String, Option<String>, Option<String>)>>,
}

impl RecordingIdentity {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IdentityProvider for RecordingIdentity {
    async fn update_user_attributes(
        &self,
        username: &str,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<()> {
        self.calls.lock().unwrap().push((
            username.to_string(),
            name.map(str::to_string),
            phone.map(str::to_string),
        ));
        Ok(())
    }
}

/// Customer store whose every call errors, for upstream-failure tests.
pub struct FailingCustomerStore;

#[async_trait]
impl CustomerStore for FailingCustomerStore {
    async fn find_by_email(&self, _email: &str) -> StoreResult<Vec<Customer>> {
        Err(StoreError::Unavailable("injected failure".to_string()))
    }

    async fn get(&self, _customer_id: &str) -> StoreResult<Option<Customer>> {
        Err(StoreError::Unavailable("injected failure".to_string()))
    }

    async fn put(&self, _customer: Customer) -> StoreResult<()> {
        Err(StoreError::Unavailable("injected failure".to_string()))
    }

    async fn update_addresses(
        &self,
        _customer_id: &str,
        _addresses: Vec<Address>,
    ) -> StoreResult<Option<Customer>> {
        Err(StoreError::Unavailable("injected failure".to_string()))
    }
}

/// Order store whose writes fail, for persistence-failure tests.
pub struct FailingOrderStore;

#[async_trait]
impl OrderStore for FailingOrderStore {
    async fn put(&self, _order: Order) -> StoreResult<()> {
        Err(StoreError::Unavailable("injected failure".to_string()))
    }

    async fn get(&self, _order_id: &str) -> StoreResult<Option<Order>> {
        Ok(None)
    }

    async fn list_by_owner(&self, _owner_id: &str) -> StoreResult<Vec<Order>> {
        Ok(Vec::new())
    }
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub processor: Arc<FakeProcessor>,
    pub identity: Arc<RecordingIdentity>,
    pub state: AppState,
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        stripe_secret_key: "sk_test".to_string(),
        stripe_webhook_secret: None,
        auth_token_secret: TEST_AUTH_SECRET.to_string(),
        dev_mode: true,
    }
}

pub fn test_context() -> TestContext {
    test_context_with_config(test_config())
}

pub fn test_context_with_config(config: Config) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let processor = Arc::new(FakeProcessor::new());
    let identity = Arc::new(RecordingIdentity::new());
    let state = AppState::new(
        config,
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        processor.clone(),
        identity.clone(),
    );
    TestContext {
        store,
        processor,
        identity,
        state,
    }
}

pub fn app(ctx: &TestContext) -> Router {
    handlers::app(ctx.state.clone())
}

pub fn auth_token(sub: &str) -> String {
    let key = HS256Key::from_bytes(TEST_AUTH_SECRET.as_bytes());
    let claims = Claims::create(Duration::from_hours(1)).with_subject(sub);
    key.authenticate(claims).unwrap()
}

pub fn test_customer(id: &str, name: &str, email: &str) -> Customer {
    Customer {
        customer_id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        addresses: vec![],
        created_at: None,
        updated_at: None,
    }
}

pub fn test_product(id: &str, name: &str, price: i64, price_id: Option<&str>) -> Product {
    Product {
        product_id: id.to_string(),
        product_name: name.to_string(),
        price,
        description: None,
        stock: None,
        image_urls: vec![],
        stripe_price_id: price_id.map(str::to_string),
        created_at: None,
    }
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request_auth(method: &str, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}
