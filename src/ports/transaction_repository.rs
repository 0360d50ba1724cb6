//! Transaction repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TransactionId};
use crate::domain::payments::Transaction;

/// Persistence contract for Transaction aggregates.
///
/// The provider reference is unique across the store; webhook handlers
/// look transactions up by it.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Save a new transaction.
    ///
    /// # Errors
    ///
    /// - `DuplicateProviderReference` if another transaction already
    ///   carries the same provider reference
    async fn save(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Update an existing transaction.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound` if the transaction doesn't exist
    async fn update(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Find a transaction by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, DomainError>;

    /// Find a transaction by its provider-side reference. Returns `None`
    /// if not found.
    async fn find_by_provider_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Transaction>, DomainError>;
}
