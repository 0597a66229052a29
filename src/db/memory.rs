use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::model::*;
use super::query::apply_query;
use super::repo::MovieRepo;

/// Volatile movie store for development and tests, selected with the
/// `memory:` store URI. Collections are plain vectors, so natural order is
/// insertion order.
#[derive(Default)]
pub struct MemoryRepository {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    next_id: AtomicI64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document to a collection, assigning a sequential identifier
    /// when the document does not already carry one.
    pub async fn insert(&self, collection: &str, mut movie: Document) {
        if !movie.contains_key(ID_FIELD) {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            movie.insert(ID_FIELD.to_string(), Value::from(id));
        }

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(movie);
    }
}

#[async_trait]
impl MovieRepo for MemoryRepository {
    async fn find_movies(&self, collection: &str, query: &FindQuery) -> DbResult<Vec<Document>> {
        debug!(
            collection,
            filter = ?query.filter,
            sort = ?query.sort,
            "find_movies (memory)"
        );

        let movies = self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default();

        apply_query(movies, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = MemoryRepository::new();
        repo.insert("amazon", doc(json!({"title": "Alien"}))).await;
        repo.insert("amazon", doc(json!({"title": "Stalker"}))).await;

        let movies = repo
            .find_movies("amazon", &FindQuery::default())
            .await
            .unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0][ID_FIELD], json!(1));
        assert_eq!(movies[1][ID_FIELD], json!(2));
    }

    #[tokio::test]
    async fn test_insert_keeps_existing_id() {
        let repo = MemoryRepository::new();
        repo.insert("amazon", doc(json!({"_id": "abc123", "title": "Alien"})))
            .await;

        let movies = repo
            .find_movies("amazon", &FindQuery::default())
            .await
            .unwrap();

        assert_eq!(movies[0][ID_FIELD], json!("abc123"));
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let repo = MemoryRepository::new();

        let movies = repo
            .find_movies("versatil", &FindQuery::default())
            .await
            .unwrap();

        assert!(movies.is_empty());
    }
}
