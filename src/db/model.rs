/// A schema-less movie record. Field order is preserved end to end
/// (serde_json is built with `preserve_order`).
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Store-internal identifier field carried by every stored document.
pub const ID_FIELD: &str = "_id";

/// Case-insensitive pattern filter on one document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

/// Sort by one field; positive direction ascending, negative descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: i64,
}

/// Optional filter and sort applied by the store when finding movies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindQuery {
    pub filter: Option<FieldFilter>,
    pub sort: Option<SortSpec>,
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type DbResult<T> = Result<T, DbError>;
