use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};

use super::model::*;
use super::query::apply_query;
use super::repo::MovieRepo;

/// Movie store backed by a single SQLite database. Every document is one
/// row holding the raw JSON body; the row id doubles as the document
/// identifier, so natural order is insertion order.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn connect(url: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.init_schema().await?;

        info!("Movie store initialized at {}", url);

        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn find_movies(&self, collection: &str, query: &FindQuery) -> DbResult<Vec<Document>> {
        debug!(
            collection,
            filter = ?query.filter,
            sort = ?query.sort,
            "find_movies"
        );

        let rows = sqlx::query("SELECT id, body FROM movies WHERE collection = ? ORDER BY id")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        let mut movies = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let body: String = row.try_get("body")?;

            let mut movie: Document = serde_json::from_str(&body)?;
            movie.insert(ID_FIELD.to_string(), Value::from(id));
            movies.push(movie);
        }

        apply_query(movies, query)
    }
}
