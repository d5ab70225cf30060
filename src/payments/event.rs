use serde::Deserialize;

use crate::models::Shipping;

/// A webhook event as delivered by the payment processor, received
/// verbatim. Only completion types are acted on; everything else is
/// acknowledged without side effect.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: PaymentEventData,
}

impl PaymentEvent {
    /// Whether this event signals a completed payment.
    pub fn is_completion(&self) -> bool {
        matches!(
            self.event_type.as_str(),
            "payment_intent.succeeded" | "checkout.session.completed"
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEventData {
    pub object: PaymentObject,
}

/// The payment intent / checkout session carried inside the event. Field
/// names follow the processor's wire format; the two event variants
/// populate different subsets (`amount` vs `amount_total`, `status` vs
/// `payment_status`, `receipt_email` vs `customer_details.email`).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentObject {
    pub id: String,
    #[serde(default)]
    pub receipt_email: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub shipping: Option<Shipping>,
    #[serde(default)]
    pub metadata: PaymentMetadata,
}

impl PaymentObject {
    pub fn payer_email(&self) -> Option<&str> {
        self.receipt_email.as_deref().or_else(|| {
            self.customer_details
                .as_ref()
                .and_then(|d| d.email.as_deref())
        })
    }

    pub fn payment_status(&self) -> Option<&str> {
        self.payment_status.as_deref().or(self.status.as_deref())
    }

    pub fn amount_total(&self) -> Option<i64> {
        self.amount_total.or(self.amount)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Metadata bag attached to the payment. `orderItems` carries a serialized
/// JSON array of ordered-item entries when the storefront initiated the
/// payment with one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentMetadata {
    #[serde(rename = "orderItems", default)]
    pub order_items: Option<String>,
}
