//! Order reconciliation: turn a completed-payment event into a persisted
//! order record.
//!
//! One invocation per inbound event, share-nothing across invocations. The
//! customer lookup runs first; the per-line-item product lookups are
//! independent and issued concurrently, joined in input order. There are no
//! retries anywhere in this path: the processor redelivers on non-2xx, and
//! redelivery safety rests entirely on the order store's overwrite-on-
//! same-key behavior.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::{Order, OrderedItem, OrderedProduct, Product};
use crate::payments::{PaymentEvent, PaymentObject, PaymentProcessor};
use crate::store::{CustomerStore, OrderStore, ProductStore, StoreError};

/// What to do when a single line item's product lookup fails or finds
/// nothing. `Drop` matches the observed upstream behavior: the entry is
/// removed from the persisted product list and the event is still
/// acknowledged, so an order record can silently under-report what was
/// purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemFailurePolicy {
    #[default]
    Drop,
    Abort,
    Collect,
}

/// Result of a reconciliation that did not error. `Ignored` is returned for
/// unrecognized event types without any side effect.
#[derive(Debug)]
pub enum ReconcileOutcome {
    Ignored,
    Recorded {
        order: Order,
        /// Line items dropped from the order. Only populated under
        /// `ItemFailurePolicy::Collect`; under `Drop` they are logged and
        /// discarded.
        dropped: Vec<OrderedItem>,
    },
}

pub struct Reconciler {
    customers: Arc<dyn CustomerStore>,
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    processor: Arc<dyn PaymentProcessor>,
    policy: ItemFailurePolicy,
}

impl Reconciler {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            customers,
            products,
            orders,
            processor,
            policy: ItemFailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ItemFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the reconciliation workflow for one payment event.
    ///
    /// Sequential, no rollback: resolve the customer, resolve line items,
    /// fan out over product lookups, assemble the denormalized order, write
    /// it unconditionally. Customer resolution failure, malformed line
    /// items, and a failed write abort; individual product lookups do not
    /// (under the default policy).
    pub async fn reconcile(&self, event: &PaymentEvent) -> Result<ReconcileOutcome> {
        if !event.is_completion() {
            tracing::debug!(event_type = %event.event_type, "ignoring event");
            return Ok(ReconcileOutcome::Ignored);
        }

        let object = &event.data.object;
        let email = object
            .payer_email()
            .ok_or_else(|| AppError::BadRequest("payment event has no payer email".to_string()))?;

        let customer = self
            .customers
            .find_by_email(email)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::CustomerNotFound(format!("no customer with email {}", email))
            })?;

        let items = self.line_items(object).await?;

        // Concurrent fan-out; join_all preserves input order regardless of
        // completion order.
        let lookups = items.iter().map(|item| self.resolve_product(item));
        let resolved = join_all(lookups).await;

        let mut products = Vec::with_capacity(items.len());
        let mut dropped = Vec::new();
        for (item, result) in items.iter().zip(resolved) {
            match result {
                Ok(Some(product)) => products.push(ordered_product(product, item)),
                Ok(None) => {
                    if self.policy == ItemFailurePolicy::Abort {
                        return Err(AppError::ProductNotFound(format!(
                            "no product for line item {:?}",
                            item
                        )));
                    }
                    tracing::warn!(?item, "line item resolved to no product, dropping");
                    dropped.push(item.clone());
                }
                Err(err) => {
                    if self.policy == ItemFailurePolicy::Abort {
                        return Err(err.into());
                    }
                    tracing::warn!(?item, error = %err, "product lookup failed, dropping line item");
                    dropped.push(item.clone());
                }
            }
        }

        let order = Order {
            order_id: object.id.clone(),
            customer_id: customer.customer_id.clone(),
            customer_name: Some(customer.name.clone()),
            customer_email: email.to_string(),
            currency: object.currency.clone(),
            payment_status: object.payment_status().map(str::to_string),
            amount_total: object.amount_total(),
            owner_id: customer.customer_id,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            products,
            shipping: object.shipping.clone(),
        };

        self.orders
            .put(order.clone())
            .await
            .map_err(|e| AppError::Persistence(e.to_string()))?;

        tracing::info!(
            order_id = %order.order_id,
            customer_id = %order.customer_id,
            lines = order.products.len(),
            dropped = dropped.len(),
            "order recorded"
        );

        if self.policy != ItemFailurePolicy::Collect {
            dropped.clear();
        }
        Ok(ReconcileOutcome::Recorded { order, dropped })
    }

    /// Ordered items come from the serialized `orderItems` metadata field
    /// when present, otherwise from the processor's line-item listing for
    /// the session.
    async fn line_items(&self, object: &PaymentObject) -> Result<Vec<OrderedItem>> {
        if let Some(raw) = &object.metadata.order_items {
            return serde_json::from_str(raw).map_err(|e| {
                AppError::MalformedLineItems(format!("orderItems is not valid JSON: {}", e))
            });
        }

        let lines = self.processor.list_line_items(&object.id).await?;
        Ok(lines
            .into_iter()
            .map(|line| OrderedItem {
                product_id: None,
                quantity: line.quantity,
                stripe_price_id: Some(line.price_id),
            })
            .collect())
    }

    /// Look up by internal product id when the entry carries one, otherwise
    /// by the processor's price id (first match wins).
    async fn resolve_product(
        &self,
        item: &OrderedItem,
    ) -> std::result::Result<Option<Product>, StoreError> {
        if let Some(product_id) = &item.product_id {
            return self.products.get(product_id).await;
        }
        if let Some(price_id) = &item.stripe_price_id {
            return Ok(self
                .products
                .find_by_price_id(price_id)
                .await?
                .into_iter()
                .next());
        }
        Ok(None)
    }
}

fn ordered_product(product: Product, item: &OrderedItem) -> OrderedProduct {
    OrderedProduct {
        product_id: product.product_id,
        product_name: product.product_name,
        product_price: product.price,
        quantity: item.quantity,
        price_id: item
            .stripe_price_id
            .clone()
            .or(product.stripe_price_id),
        product_image: product.image_urls,
    }
}
