use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Equality filter on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Select {
        order: Option<Order>,
        limit: Option<usize>,
    },
    Insert {
        rows: Vec<Value>,
    },
    Update {
        patch: Value,
    },
    Delete,
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Select { .. } => "select",
            Operation::Insert { .. } => "insert",
            Operation::Update { .. } => "update",
            Operation::Delete => "delete",
        }
    }
}

/// One call against a table of the content store.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRequest {
    pub table: String,
    pub operation: Operation,
    pub filters: Vec<Filter>,
    /// Session token of the signed-in admin; anonymous when absent.
    pub token: Option<String>,
}

impl RowRequest {
    pub fn filter_value(&self, column: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }
}

/// Row-level access to the hosted content tables.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Run a request and return the affected (or selected) rows.
    async fn execute(&self, request: RowRequest) -> Result<Vec<Value>, StoreError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Backend rejected request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unauthorized(msg) => AppError::Unauthorized(msg),
            StoreError::InvalidRequest(msg) => AppError::BadRequest(msg),
            other => AppError::Backend(other.to_string()),
        }
    }
}
