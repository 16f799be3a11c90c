use tracing::info;
use validator::Validate;

use crate::db::{Database, TableQuery};
use crate::error::AppResult;
use crate::models::{partition_by_kind, TimelineForm, TimelineItem, TimelineKind};
use crate::store::Direction;

const TABLE: &str = "timeline";

pub struct TimelineService<'a> {
    db: &'a Database,
    token: Option<&'a str>,
}

impl<'a> TimelineService<'a> {
    pub fn new(db: &'a Database) -> Self {
        TimelineService { db, token: None }
    }

    pub fn with_token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    fn table(&self) -> TableQuery<'a> {
        let query = self.db.from(TABLE);
        match self.token {
            Some(token) => query.auth(token),
            None => query,
        }
    }

    /// Full timeline, most recent start date first.
    pub async fn list(&self) -> AppResult<Vec<TimelineItem>> {
        self.table()
            .order("start_date", Direction::Desc)
            .select()
            .await
    }

    pub async fn list_kind(&self, kind: TimelineKind) -> AppResult<Vec<TimelineItem>> {
        self.table()
            .eq("type", kind.as_str())
            .order("start_date", Direction::Desc)
            .select()
            .await
    }

    /// The list split into (experiences, organizations).
    pub async fn grouped(&self) -> AppResult<(Vec<TimelineItem>, Vec<TimelineItem>)> {
        Ok(partition_by_kind(self.list().await?))
    }

    pub async fn add(&self, form: TimelineForm) -> AppResult<Vec<TimelineItem>> {
        let form = form.normalized();
        form.validate()?;

        self.table().insert(std::slice::from_ref(&form)).await?;
        info!("Added {} entry at {}", form.kind.as_str(), form.company);

        self.list().await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Vec<TimelineItem>> {
        let removed = self.table().eq("id", id).delete().await?;
        info!("Deleted timeline entry {} ({} rows)", id, removed);
        self.list().await
    }
}
