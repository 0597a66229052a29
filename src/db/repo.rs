use async_trait::async_trait;

use super::model::*;

/// Read-only access to the per-site movie collections.
#[async_trait]
pub trait MovieRepo: Send + Sync {
    /// Find all documents in `collection` matching `query`, fully
    /// materialized. Order is the requested sort, or the store's natural
    /// order when no sort is given.
    async fn find_movies(&self, collection: &str, query: &FindQuery) -> DbResult<Vec<Document>>;
}
