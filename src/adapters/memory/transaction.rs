use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, TransactionId};
use crate::domain::payments::Transaction;
use crate::ports::TransactionRepository;

/// In-memory transaction store enforcing provider-reference uniqueness.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<HashMap<TransactionId, Transaction>>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError> {
        let mut store = self.transactions.write().await;
        if let Some(reference) = &transaction.provider_reference {
            let duplicate = store
                .values()
                .any(|t| t.id != transaction.id && t.provider_reference.as_ref() == Some(reference));
            if duplicate {
                return Err(DomainError::duplicate_provider_reference(reference));
            }
        }
        store.insert(transaction.id, transaction.clone());
        Ok(())
    }

    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError> {
        let mut store = self.transactions.write().await;
        match store.get_mut(&transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::TransactionNotFound,
                transaction.id,
            )),
        }
    }

    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError> {
        Ok(self.transactions.read().await.get(id).cloned())
    }

    async fn find_by_provider_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Transaction>, DomainError> {
        Ok(self
            .transactions
            .read()
            .await
            .values()
            .find(|t| t.provider_reference.as_deref() == Some(reference))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MerchantId, Money, UserId};
    use crate::domain::payments::TransactionType;

    fn transaction(reference: Option<&str>) -> Transaction {
        let mut tx = Transaction::new(
            MerchantId::new(),
            UserId::new("user-1").unwrap(),
            TransactionType::OneTime,
            Money::from_major(100),
        );
        tx.provider_reference = reference.map(String::from);
        tx
    }

    #[tokio::test]
    async fn duplicate_provider_reference_is_rejected() {
        let repo = InMemoryTransactionRepository::new();
        repo.save(&transaction(Some("prov-1"))).await.unwrap();

        let err = repo.save(&transaction(Some("prov-1"))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateProviderReference);
    }

    #[tokio::test]
    async fn resaving_the_same_transaction_is_allowed() {
        let repo = InMemoryTransactionRepository::new();
        let tx = transaction(Some("prov-2"));
        repo.save(&tx).await.unwrap();
        repo.save(&tx).await.unwrap();
    }

    #[tokio::test]
    async fn lookup_by_provider_reference() {
        let repo = InMemoryTransactionRepository::new();
        let tx = transaction(Some("prov-3"));
        repo.save(&tx).await.unwrap();

        let found = repo
            .find_by_provider_reference("prov-3")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, tx.id);
        assert!(repo
            .find_by_provider_reference("prov-9")
            .await
            .unwrap()
            .is_none());
    }
}
