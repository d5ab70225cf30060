use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{Address, Category, Customer, Order, Product};
use crate::store::{
    CategoryStore, CustomerStore, OrderStore, ProductStore, StoreError, StoreResult,
};

/// In-memory store backing tests and dev mode. Scans iterate in key order,
/// so multi-match lookups are deterministic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    customers: BTreeMap<String, Customer>,
    products: BTreeMap<String, Product>,
    categories: Vec<Category>,
    orders: BTreeMap<String, Order>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_customer(&self, customer: Customer) {
        let mut tables = self.tables.write().unwrap();
        tables
            .customers
            .insert(customer.customer_id.clone(), customer);
    }

    pub fn add_product(&self, product: Product) {
        let mut tables = self.tables.write().unwrap();
        tables.products.insert(product.product_id.clone(), product);
    }

    pub fn add_category(&self, category: Category) {
        let mut tables = self.tables.write().unwrap();
        tables.categories.push(category);
    }

    pub fn order_count(&self) -> usize {
        self.tables.read().unwrap().orders.len()
    }

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.tables.read().unwrap().orders.get(order_id).cloned()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Vec<Customer>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .customers
            .values()
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }

    async fn get(&self, customer_id: &str) -> StoreResult<Option<Customer>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.customers.get(customer_id).cloned())
    }

    async fn put(&self, customer: Customer) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        tables
            .customers
            .insert(customer.customer_id.clone(), customer);
        Ok(())
    }

    async fn update_addresses(
        &self,
        customer_id: &str,
        addresses: Vec<Address>,
    ) -> StoreResult<Option<Customer>> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        Ok(tables.customers.get_mut(customer_id).map(|customer| {
            customer.addresses = addresses;
            customer.clone()
        }))
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.products.values().cloned().collect())
    }

    async fn get(&self, product_id: &str) -> StoreResult<Option<Product>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.products.get(product_id).cloned())
    }

    async fn find_by_price_id(&self, stripe_price_id: &str) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .products
            .values()
            .filter(|p| p.stripe_price_id.as_deref() == Some(stripe_price_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Category>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.categories.clone())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn put(&self, order: Order) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        tables.orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    async fn get(&self, order_id: &str) -> StoreResult<Option<Order>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.orders.get(order_id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}
