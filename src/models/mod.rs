pub mod about;
pub mod auth;
pub mod home;
pub mod project;
pub mod status;
pub mod timeline;
pub mod ui;

pub use about::AboutContent;
pub use auth::{Claims, Session, SessionUser, SigninRequest};
pub use home::{HomeContent, PageLink};
#[cfg(test)]
pub use project::PROJECT_REQUIRED_MESSAGE;
pub use project::{Project, ProjectForm, ProjectFormInput};
pub use status::{LoadState, SaveStatus};
pub use timeline::{partition_by_kind, TimelineForm, TimelineItem, TimelineKind};
pub use ui::UiSettings;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A table that holds one logical document; the most recently created row wins.
pub trait SingletonDocument: Serialize + DeserializeOwned + Default + Clone + Send + Sync {
    const TABLE: &'static str;

    /// Backend id of the loaded row, if the document has been persisted.
    fn id(&self) -> Option<&str>;

    /// Columns written by an update keyed on the id.
    fn editable_fields(&self) -> Value;
}
