use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::payments::{CheckoutSession, PaymentProcessor, SessionLineItem};

type HmacSha256 = Hmac<Sha256>;

const API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            secret_key: secret_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct LineItemListResponse {
    data: Vec<LineItemResponse>,
}

#[derive(Debug, Deserialize)]
struct LineItemResponse {
    quantity: Option<i64>,
    price: Option<PriceResponse>,
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    id: String,
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_checkout_session(
        &self,
        price_id: &str,
        quantity: i64,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession> {
        let quantity = quantity.to_string();
        let params = [
            ("mode", "payment"),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
            ("line_items[0][price]", price_id),
            ("line_items[0][quantity]", quantity.as_str()),
        ];

        let response = self
            .client
            .post(format!("{}/checkout/sessions", API_BASE))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("stripe checkout session: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "stripe checkout session: {}",
                body
            )));
        }

        let session: CheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("stripe checkout session: {}", e)))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }

    async fn list_line_items(&self, session_id: &str) -> Result<Vec<SessionLineItem>> {
        let response = self
            .client
            .get(format!(
                "{}/checkout/sessions/{}/line_items",
                API_BASE, session_id
            ))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("stripe line items: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("stripe line items: {}", body)));
        }

        let list: LineItemListResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("stripe line items: {}", e)))?;

        Ok(list
            .data
            .into_iter()
            .filter_map(|item| {
                item.price.map(|price| SessionLineItem {
                    price_id: price.id,
                    quantity: item.quantity.unwrap_or(1),
                })
            })
            .collect())
    }
}

/// Verify a `stripe-signature` header (`t=...,v1=...`) against the raw
/// request body. Accepts any one matching `v1` signature; comparison is
/// constant-time.
pub fn verify_webhook_signature(secret: &str, payload: &[u8], header: &str) -> Result<bool> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| AppError::BadRequest("malformed stripe-signature header".to_string()))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Internal("invalid webhook secret".to_string()))?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    for signature in signatures {
        if let Ok(bytes) = hex::decode(signature) {
            if bytes.ct_eq(expected.as_slice()).into() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_valid_signature() {
        let payload = br#"{"type":"payment_intent.succeeded"}"#;
        let header = format!("t=12345,v1={}", sign("whsec_test", "12345", payload));
        assert!(verify_webhook_signature("whsec_test", payload, &header).unwrap());
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = br#"{"type":"payment_intent.succeeded"}"#;
        let header = format!("t=12345,v1={}", sign("whsec_other", "12345", payload));
        assert!(!verify_webhook_signature("whsec_test", payload, &header).unwrap());
    }

    #[test]
    fn rejects_tampered_payload() {
        let payload = br#"{"amount":100}"#;
        let header = format!("t=12345,v1={}", sign("whsec_test", "12345", payload));
        assert!(!verify_webhook_signature("whsec_test", br#"{"amount":999}"#, &header).unwrap());
    }

    #[test]
    fn header_without_timestamp_is_an_error() {
        assert!(verify_webhook_signature("whsec_test", b"{}", "v1=deadbeef").is_err());
    }
}
