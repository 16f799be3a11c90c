use tracing::{error, info, warn};

use crate::db::{Database, TableQuery};
use crate::error::{AppError, AppResult};
use crate::models::{LoadState, SaveStatus, SingletonDocument};
use crate::store::Direction;

/// Loads and saves the single-document tables (home, about).
pub struct ContentService<'a> {
    db: &'a Database,
    token: Option<&'a str>,
}

impl<'a> ContentService<'a> {
    pub fn new(db: &'a Database) -> Self {
        ContentService { db, token: None }
    }

    /// Writes go out under the admin's session instead of the anonymous key.
    pub fn with_token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    fn table(&self, table: &str) -> TableQuery<'a> {
        let query = self.db.from(table);
        match self.token {
            Some(token) => query.auth(token),
            None => query,
        }
    }

    /// Most recently created row, or `None` when the table is empty.
    pub async fn latest<T: SingletonDocument>(&self) -> AppResult<Option<T>> {
        let rows: Vec<T> = self
            .table(T::TABLE)
            .order("created_at", Direction::Desc)
            .limit(1)
            .select()
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Page-facing load: an empty table yields default fields, a failure stays loading.
    pub async fn load<T: SingletonDocument>(&self) -> LoadState<T> {
        match self.latest::<T>().await {
            Ok(doc) => LoadState::Loaded(doc.unwrap_or_default()),
            Err(e) => {
                warn!("Failed to load {}: {}", T::TABLE, e);
                LoadState::Loading
            }
        }
    }

    /// Update keyed on the id when one is known, otherwise insert a fresh row.
    pub async fn save<T: SingletonDocument>(&self, doc: &T) -> AppResult<T> {
        let rows = match doc.id() {
            Some(id) => {
                let rows = self
                    .table(T::TABLE)
                    .eq("id", id)
                    .update(&doc.editable_fields())
                    .await?;
                if rows.is_empty() {
                    return Err(AppError::NotFound(format!(
                        "No {} row with id {}",
                        T::TABLE,
                        id
                    )));
                }
                info!("Updated {} row {}", T::TABLE, id);
                rows
            }
            // Key and timestamps are left to the backend
            None => {
                let rows = self
                    .table(T::TABLE)
                    .insert(&[doc.editable_fields()])
                    .await?;
                info!("Inserted first {} row", T::TABLE);
                rows
            }
        };

        match rows.into_iter().next() {
            Some(row) => Ok(serde_json::from_value(row)?),
            // Backend returned no representation; keep what was sent
            None => Ok(doc.clone()),
        }
    }

    /// Save outcome for the admin forms; failures are logged, never raised.
    pub async fn save_status<T: SingletonDocument>(&self, doc: &T) -> SaveStatus {
        match self.save(doc).await {
            Ok(_) => SaveStatus::Saved,
            Err(e) => {
                error!("Failed to save {}: {}", T::TABLE, e);
                SaveStatus::Error
            }
        }
    }
}
