use std::sync::Arc;

use crate::config::Config;
use crate::identity::IdentityProvider;
use crate::payments::PaymentProcessor;
use crate::reconcile::Reconciler;
use crate::store::{CategoryStore, CustomerStore, OrderStore, ProductStore};

/// Shared application state: config plus the collaborator handles,
/// constructed once per process and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub customers: Arc<dyn CustomerStore>,
    pub products: Arc<dyn ProductStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub orders: Arc<dyn OrderStore>,
    pub processor: Arc<dyn PaymentProcessor>,
    pub identity: Arc<dyn IdentityProvider>,
    pub reconciler: Arc<Reconciler>,
}

impl AppState {
    pub fn new(
        config: Config,
        customers: Arc<dyn CustomerStore>,
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryStore>,
        orders: Arc<dyn OrderStore>,
        processor: Arc<dyn PaymentProcessor>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let reconciler = Arc::new(Reconciler::new(
            customers.clone(),
            products.clone(),
            orders.clone(),
            processor.clone(),
        ));

        Self {
            config: Arc::new(config),
            customers,
            products,
            categories,
            orders,
            processor,
            identity,
            reconciler,
        }
    }
}
