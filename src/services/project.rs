use tracing::info;
use validator::Validate;

use crate::db::{Database, TableQuery};
use crate::error::{AppError, AppResult};
use crate::models::{Project, ProjectForm};
use crate::store::Direction;

const TABLE: &str = "projects";

pub struct ProjectService<'a> {
    db: &'a Database,
    token: Option<&'a str>,
}

impl<'a> ProjectService<'a> {
    pub fn new(db: &'a Database) -> Self {
        ProjectService { db, token: None }
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

    /// Every project, newest first.
    pub async fn list(&self) -> AppResult<Vec<Project>> {
        self.table()
            .order("created_at", Direction::Desc)
            .select()
            .await
    }

    pub async fn get(&self, id: &str) -> AppResult<Project> {
        let rows: Vec<Project> = self.table().eq("id", id).limit(1).select().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Inserts or updates (when the form carries an id), then re-fetches the list.
    pub async fn save(&self, form: ProjectForm) -> AppResult<Vec<Project>> {
        let form = form.normalized();
        form.validate()?;

        match form.id() {
            Some(id) => {
                self.table()
                    .eq("id", id)
                    .update(&form.editable_fields())
                    .await?;
                info!("Updated project {}", id);
            }
            None => {
                self.table().insert(std::slice::from_ref(&form)).await?;
                info!("Created project {}", form.title);
            }
        }

        self.list().await
    }

    pub async fn delete(&self, id: &str) -> AppResult<Vec<Project>> {
        let removed = self.table().eq("id", id).delete().await?;
        info!("Deleted project {} ({} rows)", id, removed);
        self.list().await
    }
}
