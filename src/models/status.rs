use serde::{Deserialize, Serialize};

/// Outcome of the last save on an admin form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    #[default]
    Idle,
    Saved,
    Error,
}

impl SaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveStatus::Idle => "idle",
            SaveStatus::Saved => "saved",
            SaveStatus::Error => "error",
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            SaveStatus::Idle => None,
            SaveStatus::Saved => Some("Content saved successfully."),
            SaveStatus::Error => Some("Failed to save content."),
        }
    }

    /// Reads the `status` query value set by the post/redirect/get cycle.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("saved") => SaveStatus::Saved,
            Some("error") => SaveStatus::Error,
            _ => SaveStatus::Idle,
        }
    }
}

/// A page document that is either still loading or has arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(self) -> Option<T> {
        match self {
            LoadState::Loading => None,
            LoadState::Loaded(value) => Some(value),
        }
    }
}

impl<T: Default> LoadState<T> {
    /// Form state for an editor: the loaded document, or empty fields.
    pub fn unwrap_or_default(self) -> T {
        self.loaded().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_status_round_trips_through_query() {
        for status in [SaveStatus::Idle, SaveStatus::Saved, SaveStatus::Error] {
            assert_eq!(SaveStatus::from_query(Some(status.as_str())), status);
        }
        assert_eq!(SaveStatus::from_query(Some("bogus")), SaveStatus::Idle);
        assert_eq!(SaveStatus::Error.message(), Some("Failed to save content."));
    }

    #[test]
    fn test_load_state() {
        let state: LoadState<String> = LoadState::Loading;
        assert!(state.is_loading());
        assert_eq!(state.unwrap_or_default(), "");
        assert_eq!(LoadState::Loaded(3).loaded(), Some(3));
    }
}
