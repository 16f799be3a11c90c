use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::{Direction, Filter, Operation, RowRequest, RowStore, StoreError};
use crate::utils::misc::generate_uuid;
use crate::utils::time::now_rfc3339;

/// In-process row store for local development and tests.
///
/// Mirrors the backend's behaviour where it matters to callers: ids and
/// `created_at` are assigned on insert, and writes return the affected rows.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn column_text(row: &Value, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| column_text(row, &f.column).as_deref() == Some(f.value.as_str()))
}

/// Orders JSON column values; nulls sort first, as in a descending PostgREST select.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn prepare_insert(row: Value) -> Result<Value, StoreError> {
    let mut object: Map<String, Value> = match row {
        Value::Object(object) => object,
        other => {
            return Err(StoreError::InvalidRequest(format!(
                "Rows must be JSON objects, got {}",
                other
            )))
        }
    };

    if object.get("id").map_or(true, Value::is_null) {
        object.insert("id".to_string(), Value::String(generate_uuid()));
    }
    if object.get("created_at").map_or(true, Value::is_null) {
        object.insert("created_at".to_string(), Value::String(now_rfc3339()));
    }

    Ok(Value::Object(object))
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn execute(&self, request: RowRequest) -> Result<Vec<Value>, StoreError> {
        debug!(
            "Memory store {} on {}",
            request.operation.kind(),
            request.table
        );

        match request.operation {
            Operation::Select { order, limit } => {
                let tables = self.tables.read().await;
                let mut rows: Vec<Value> = tables
                    .get(&request.table)
                    .map(|rows| {
                        rows.iter()
                            .filter(|row| matches(row, &request.filters))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();

                if let Some(order) = order {
                    rows.sort_by(|a, b| {
                        let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                        match order.direction {
                            Direction::Asc => ordering,
                            Direction::Desc => ordering.reverse(),
                        }
                    });
                }
                if let Some(limit) = limit {
                    rows.truncate(limit);
                }
                Ok(rows)
            }
            Operation::Insert { rows } => {
                let prepared = rows
                    .into_iter()
                    .map(prepare_insert)
                    .collect::<Result<Vec<_>, _>>()?;

                let mut tables = self.tables.write().await;
                tables
                    .entry(request.table)
                    .or_default()
                    .extend(prepared.iter().cloned());
                Ok(prepared)
            }
            Operation::Update { patch } => {
                let patch = patch.as_object().cloned().ok_or_else(|| {
                    StoreError::InvalidRequest("Update patch must be a JSON object".to_string())
                })?;

                let mut tables = self.tables.write().await;
                let mut updated = Vec::new();
                if let Some(rows) = tables.get_mut(&request.table) {
                    for row in rows.iter_mut().filter(|row| matches(row, &request.filters)) {
                        if let Some(object) = row.as_object_mut() {
                            for (key, value) in &patch {
                                object.insert(key.clone(), value.clone());
                            }
                        }
                        updated.push(row.clone());
                    }
                }
                Ok(updated)
            }
            Operation::Delete => {
                let mut tables = self.tables.write().await;
                let mut deleted = Vec::new();
                if let Some(rows) = tables.get_mut(&request.table) {
                    let (removed, kept): (Vec<Value>, Vec<Value>) = rows
                        .drain(..)
                        .partition(|row| matches(row, &request.filters));
                    *rows = kept;
                    deleted = removed;
                }
                Ok(deleted)
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::Order;
    use serde_json::json;

    fn select(table: &str, order: Option<Order>, limit: Option<usize>, filters: Vec<Filter>) -> RowRequest {
        RowRequest {
            table: table.to_string(),
            operation: Operation::Select { order, limit },
            filters,
            token: None,
        }
    }

    fn id_filter(id: &str) -> Vec<Filter> {
        vec![Filter {
            column: "id".to_string(),
            value: id.to_string(),
        }]
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let store = MemoryStore::new();
        let rows = store
            .execute(RowRequest {
                table: "projects".to_string(),
                operation: Operation::Insert {
                    rows: vec![json!({"title": "Site"})],
                },
                filters: vec![],
                token: None,
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0]["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(rows[0]["created_at"].is_string());
        assert_eq!(store.row_count("projects").await, 1);
    }

    #[tokio::test]
    async fn test_select_orders_limits_and_filters() {
        let store = MemoryStore::new();
        store
            .execute(RowRequest {
                table: "timeline".to_string(),
                operation: Operation::Insert {
                    rows: vec![
                        json!({"id": "a", "type": "experience", "start_date": "2021-01"}),
                        json!({"id": "b", "type": "organization", "start_date": "2023-05"}),
                        json!({"id": "c", "type": "experience", "start_date": "2022-07"}),
                    ],
                },
                filters: vec![],
                token: None,
            })
            .await
            .unwrap();

        let order = Order {
            column: "start_date".to_string(),
            direction: Direction::Desc,
        };

        let all = store
            .execute(select("timeline", Some(order.clone()), None, vec![]))
            .await
            .unwrap();
        let ids: Vec<_> = all.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let experiences = store
            .execute(select(
                "timeline",
                Some(order.clone()),
                Some(1),
                vec![Filter {
                    column: "type".to_string(),
                    value: "experience".to_string(),
                }],
            ))
            .await
            .unwrap();
        assert_eq!(experiences.len(), 1);
        assert_eq!(experiences[0]["id"], "c");
    }

    #[tokio::test]
    async fn test_update_and_delete_are_keyed() {
        let store = MemoryStore::new();
        store
            .execute(RowRequest {
                table: "projects".to_string(),
                operation: Operation::Insert {
                    rows: vec![json!({"id": "1", "title": "One"}), json!({"id": "2", "title": "Two"})],
                },
                filters: vec![],
                token: None,
            })
            .await
            .unwrap();

        let updated = store
            .execute(RowRequest {
                table: "projects".to_string(),
                operation: Operation::Update {
                    patch: json!({"title": "Uno"}),
                },
                filters: id_filter("1"),
                token: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["title"], "Uno");

        let deleted = store
            .execute(RowRequest {
                table: "projects".to_string(),
                operation: Operation::Delete,
                filters: id_filter("2"),
                token: None,
            })
            .await
            .unwrap();
        assert_eq!(deleted.len(), 1);

        let remaining = store
            .execute(select("projects", None, None, vec![]))
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], "1");
        assert_eq!(remaining[0]["title"], "Uno");
    }

    #[test]
    fn test_compare_values_nulls_first() {
        assert_eq!(compare_values(None, Some(&json!("x"))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(2)), Some(&json!(10))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!("b")), Some(&json!("a"))), Ordering::Greater);
    }
}
