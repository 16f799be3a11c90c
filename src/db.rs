use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::store::{Direction, Filter, Operation, Order, RowRequest, RowStore};

/// Handle to the content store shared by every service.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn RowStore>,
}

impl Database {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Database { store }
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await?;
        Ok(())
    }

    /// Starts a request against `table`, in the style of the hosted client.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            db: self,
            table: table.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
            token: None,
        }
    }
}

pub struct TableQuery<'a> {
    db: &'a Database,
    table: String,
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
    token: Option<String>,
}

impl<'a> TableQuery<'a> {
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Runs the request on behalf of a signed-in session.
    pub fn auth(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    async fn run(self, operation: Operation) -> AppResult<Vec<Value>> {
        if matches!(operation, Operation::Update { .. } | Operation::Delete) && self.filters.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Refusing unfiltered {} on {}",
                operation.kind(),
                self.table
            )));
        }

        let request = RowRequest {
            table: self.table,
            operation,
            filters: self.filters,
            token: self.token,
        };

        Ok(self.db.store.execute(request).await?)
    }

    pub async fn select<T: DeserializeOwned>(self) -> AppResult<Vec<T>> {
        let operation = Operation::Select {
            order: self.order.clone(),
            limit: self.limit,
        };
        let rows = self.run(operation).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppError::from))
            .collect()
    }

    pub async fn insert<T: Serialize>(self, rows: &[T]) -> AppResult<Vec<Value>> {
        let rows = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.run(Operation::Insert { rows }).await
    }

    pub async fn update<T: Serialize>(self, patch: &T) -> AppResult<Vec<Value>> {
        let patch = serde_json::to_value(patch)?;
        self.run(Operation::Update { patch }).await
    }

    pub async fn delete(self) -> AppResult<usize> {
        Ok(self.run(Operation::Delete).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::RecordingStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_builder_produces_request() {
        let store = Arc::new(RecordingStore::new());
        let db = Database::new(store.clone());

        let _: Vec<Value> = db
            .from("timeline")
            .eq("type", "experience")
            .order("start_date", Direction::Desc)
            .limit(5)
            .select()
            .await
            .unwrap();

        let requests = store.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].table, "timeline");
        assert_eq!(requests[0].filter_value("type"), Some("experience"));
        assert_eq!(
            requests[0].operation,
            Operation::Select {
                order: Some(Order {
                    column: "start_date".to_string(),
                    direction: Direction::Desc
                }),
                limit: Some(5)
            }
        );
    }

    #[tokio::test]
    async fn test_unfiltered_writes_are_refused() {
        let store = Arc::new(RecordingStore::new());
        let db = Database::new(store.clone());

        assert!(db.from("projects").update(&json!({"title": "x"})).await.is_err());
        assert!(db.from("projects").delete().await.is_err());
        assert!(store.requests().is_empty());
    }
}
