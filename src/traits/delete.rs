//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::LunchMoneyClient;
use crate::error::Result;

/// Delete an entity by ID.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id: Send;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns [`LunchMoneyError::NotFound`] if no entity has this ID.
    ///
    /// [`LunchMoneyError::NotFound`]: crate::LunchMoneyError::NotFound
    async fn delete(client: &LunchMoneyClient, id: Self::Id) -> Result<()>;
}
