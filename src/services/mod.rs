pub mod content;
pub mod github;
pub mod project;
pub mod timeline;

pub use content::ContentService;
pub use github::GithubService;
pub use project::ProjectService;
pub use timeline::TimelineService;
