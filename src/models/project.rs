use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::utils::misc::{empty_to_none, null_as_default, split_comma_list};

// Mirrors the validator messages on ProjectForm
#[cfg(test)]
pub const PROJECT_REQUIRED_MESSAGE: &str = "Title and Image URL are required.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub demo_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create/edit payload; an id selects update over insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProjectForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Title and Image URL are required."))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "Title and Image URL are required."))]
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub demo_url: String,
    #[serde(default)]
    pub source_url: String,
}

impl ProjectForm {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Trims text input so whitespace-only titles fail validation.
    pub fn normalized(mut self) -> Self {
        self.id = empty_to_none(self.id);
        self.title = self.title.trim().to_string();
        self.image_url = self.image_url.trim().to_string();
        self.demo_url = self.demo_url.trim().to_string();
        self.source_url = self.source_url.trim().to_string();
        self.tech_stack = self
            .tech_stack
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn editable_fields(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "image_url": self.image_url,
            "tech_stack": self.tech_stack,
            "demo_url": self.demo_url,
            "source_url": self.source_url,
        })
    }
}

impl From<Project> for ProjectForm {
    fn from(project: Project) -> Self {
        ProjectForm {
            id: Some(project.id),
            title: project.title,
            description: project.description,
            image_url: project.image_url,
            tech_stack: project.tech_stack,
            demo_url: project.demo_url,
            source_url: project.source_url,
        }
    }
}

/// Flat shape posted by the admin HTML form; the stack arrives comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFormInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tech_stack: String,
    #[serde(default)]
    pub demo_url: String,
    #[serde(default)]
    pub source_url: String,
}

impl From<ProjectFormInput> for ProjectForm {
    fn from(input: ProjectFormInput) -> Self {
        ProjectForm {
            id: input.id,
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            tech_stack: split_comma_list(&input.tech_stack),
            demo_url: input.demo_url,
            source_url: input.source_url,
        }
        .normalized()
    }
}
