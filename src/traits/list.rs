//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::pagination::Page;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List/filter entities with pagination support.
///
/// Implement this trait for entity types that can be listed with
/// optional filtering. Endpoints that return the whole collection at once
/// report a single complete page.
///
/// # Example
///
/// ```ignore
/// use lunchmoney::{LunchMoneyClient, Transaction, List};
///
/// let client = LunchMoneyClient::from_env()?;
///
/// // Fetch a single page
/// let page = Transaction::list_page(&client, &Default::default(), 0, 50).await?;
///
/// // Fetch all pages
/// let all = Transaction::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Lunch Money API client
    /// * `query` - Query parameters for filtering
    /// * `offset` - Number of items to skip
    /// * `limit` - Maximum number of items on the page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &LunchMoneyClient,
        query: &Self::Query,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// Pages are requested one after another until the server reports no
    /// more items.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &LunchMoneyClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        loop {
            let result = Self::list_page(client, query, offset, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more && !result.is_empty();
            offset = result.next_offset();
            all_items.extend(result.items);

            if !has_more {
                break;
            }

            pages += 1;
            if pages >= MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }
        }

        Ok(all_items)
    }
}
