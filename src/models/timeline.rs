use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::utils::misc::{empty_to_none, null_as_default};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    #[default]
    Experience,
    Organization,
}

impl TimelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineKind::Experience => "experience",
            TimelineKind::Organization => "organization",
        }
    }
}

impl FromStr for TimelineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "experience" => Ok(TimelineKind::Experience),
            "organization" => Ok(TimelineKind::Organization),
            other => Err(format!("Unknown timeline type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TimelineItem {
    pub fn end_label(&self) -> &str {
        self.end_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("Present")
    }
}

/// Splits a fetched timeline into (experiences, organizations).
pub fn partition_by_kind(items: Vec<TimelineItem>) -> (Vec<TimelineItem>, Vec<TimelineItem>) {
    items
        .into_iter()
        .partition(|item| item.kind == TimelineKind::Experience)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TimelineForm {
    #[serde(rename = "type", default)]
    pub kind: TimelineKind,
    #[validate(length(min = 1, message = "Role is required."))]
    #[serde(default)]
    pub role: String,
    #[validate(length(min = 1, message = "Company is required."))]
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "Start date is required."))]
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl TimelineForm {
    /// Blank optional fields are stored as null.
    pub fn normalized(mut self) -> Self {
        self.role = self.role.trim().to_string();
        self.company = self.company.trim().to_string();
        self.start_date = self.start_date.trim().to_string();
        self.location = empty_to_none(self.location);
        self.end_date = empty_to_none(self.end_date);
        self
    }
}
