//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::LunchMoneyClient;
use crate::error::Result;

/// Update an existing entity.
///
/// Implement this trait for entity types that can be modified
/// after creation.
///
/// # Example
///
/// ```ignore
/// use lunchmoney::{LunchMoneyClient, Transaction, TransactionUpdate, Update};
///
/// let client = LunchMoneyClient::from_env()?;
/// let updated = Transaction::update(
///     &client,
///     2112,
///     TransactionUpdate {
///         payee: Some("Corner Store".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id;

    /// Parameters for the update.
    type Params;

    /// Update the entity and return the updated version.
    ///
    /// # Arguments
    ///
    /// * `client` - The Lunch Money API client
    /// * `id` - The entity identifier
    /// * `params` - Update parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &LunchMoneyClient, id: Self::Id, params: Self::Params)
        -> Result<Self>;
}
