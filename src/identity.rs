//! Identity-provider collaborator. Profile updates propagate name/phone to
//! the external auth provider so its user pool stays in sync with the
//! customer record.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn update_user_attributes(
        &self,
        username: &str,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<()>;
}

/// Stand-in used in dev mode and when no provider is configured; logs the
/// call and succeeds.
pub struct NullIdentityProvider;

#[async_trait]
impl IdentityProvider for NullIdentityProvider {
    async fn update_user_attributes(
        &self,
        username: &str,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<()> {
        tracing::debug!(username, ?name, ?phone, "identity attribute update (no-op)");
        Ok(())
    }
}
