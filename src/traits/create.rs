//! Create trait for inserting new entities.

use async_trait::async_trait;

use crate::client::LunchMoneyClient;
use crate::error::Result;

/// Create new entities.
///
/// Some endpoints echo the created entity back, others return a summary
/// (for example the ids inserted in a batch), so the result type is chosen
/// per implementation.
#[async_trait]
pub trait Create: Sized {
    /// Parameters describing what to create.
    type Params: Send;

    /// What the endpoint returns on success.
    type Output;

    /// Create the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the payload or the request fails.
    async fn create(client: &LunchMoneyClient, params: Self::Params) -> Result<Self::Output>;
}
