//! Subscription repository port.

use async_trait::async_trait;

use crate::domain::billing::Subscription;
use crate::domain::foundation::{DomainError, MerchantId, SubscriptionId};

/// Persistence contract for Subscription aggregates.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new subscription.
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Update an existing subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Find a subscription by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// The merchant's current subscription, if any. A merchant holds at
    /// most one open subscription at a time.
    async fn find_by_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Option<Subscription>, DomainError>;
}
