use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::SingletonDocument;
use crate::utils::misc::null_as_default;
use crate::utils::time::now_rfc3339;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

impl PageLink {
    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty() && self.slug.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intro_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<PageLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl HomeContent {
    /// Drops rows the editor left completely empty.
    pub fn without_blank_pages(mut self) -> Self {
        self.pages.retain(|page| !page.is_blank());
        self
    }
}

impl SingletonDocument for HomeContent {
    const TABLE: &'static str = "home_content";

    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    // Every update stamps updated_at
    fn editable_fields(&self) -> Value {
        json!({
            "intro_text": self.intro_text,
            "pages": self.pages,
            "updated_at": now_rfc3339(),
        })
    }
}
