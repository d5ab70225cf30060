//! Document-store collaborator interfaces.
//!
//! The backing store is external to this service; handlers and the order
//! reconciler only ever see these traits. Implementations are constructed
//! once per process and injected through [`crate::state::AppState`].
//! Multi-match lookups (`find_by_email`, `find_by_price_id`) return every
//! match; callers take the first result, and the ordering ties are broken
//! by whatever order the implementation scans in.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Address, Category, Customer, Order, Product};

/// A collaborator call failed (network, throttling, backend outage).
/// Not-found is expressed in the return types, never as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Exact email match, as delivered (case-sensitive).
    async fn find_by_email(&self, email: &str) -> StoreResult<Vec<Customer>>;
    async fn get(&self, customer_id: &str) -> StoreResult<Option<Customer>>;
    async fn put(&self, customer: Customer) -> StoreResult<()>;
    /// Replace the address book of an existing customer. Returns the
    /// updated record, or `None` when the customer does not exist.
    async fn update_addresses(
        &self,
        customer_id: &str,
        addresses: Vec<Address>,
    ) -> StoreResult<Option<Customer>>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Product>>;
    async fn get(&self, product_id: &str) -> StoreResult<Option<Product>>;
    async fn find_by_price_id(&self, stripe_price_id: &str) -> StoreResult<Vec<Product>>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Category>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Unconditional upsert keyed by `order_id`: last write wins, no
    /// conditional check on prior state.
    async fn put(&self, order: Order) -> StoreResult<()>;
    async fn get(&self, order_id: &str) -> StoreResult<Option<Order>>;
    async fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Order>>;
}
