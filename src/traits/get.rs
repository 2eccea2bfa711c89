//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::LunchMoneyClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier.
///
/// # Example
///
/// ```ignore
/// use lunchmoney::{LunchMoneyClient, Transaction, Get};
///
/// let client = LunchMoneyClient::from_env()?;
/// let transaction = Transaction::get(&client, 2112).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Lunch Money API client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &LunchMoneyClient, id: Self::Id) -> Result<Self>;
}
