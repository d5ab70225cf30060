mod event;
mod stripe;

pub use event::*;
pub use stripe::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A checkout session created on the processor's side; the client is
/// redirected to `url` to pay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// One purchased line as reported by the processor's line-item listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLineItem {
    pub price_id: String,
    pub quantity: i64,
}

/// The payment processor's REST surface, as far as this service consumes
/// it. Behind a trait so tests can substitute a fake.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn create_checkout_session(
        &self,
        price_id: &str,
        quantity: i64,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession>;

    async fn list_line_items(&self, session_id: &str) -> Result<Vec<SessionLineItem>>;
}
