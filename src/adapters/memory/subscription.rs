use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::billing::Subscription;
use crate::domain::foundation::{DomainError, ErrorCode, MerchantId, SubscriptionId};
use crate::ports::SubscriptionRepository;

/// In-memory subscription store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<HashMap<SubscriptionId, Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut store = self.subscriptions.write().await;
        store.insert(subscription.id, subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut store = self.subscriptions.write().await;
        match store.get_mut(&subscription.id) {
            Some(existing) => {
                *existing = subscription.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::SubscriptionNotFound,
                subscription.id,
            )),
        }
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.subscriptions.read().await.get(id).cloned())
    }

    async fn find_by_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .read()
            .await
            .values()
            .find(|s| s.merchant_id == *merchant_id)
            .cloned())
    }
}
