use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::SingletonDocument;
use crate::utils::misc::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SingletonDocument for AboutContent {
    const TABLE: &'static str = "about_content";

    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn editable_fields(&self) -> Value {
        json!({
            "name": self.name,
            "role": self.role,
            "location": self.location,
            "company": self.company,
            "description": self.description,
            "image_url": self.image_url,
        })
    }
}
