use super::memory::MemoryStore;
use super::postgrest::PostgrestStore;
use super::types::{RowStore, StoreError};
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Supported content store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    Postgrest,
    Memory,
}

impl StoreType {
    /// Parse store type from string
    pub fn from_str(s: &str) -> Result<Self, StoreError> {
        match s.trim().to_lowercase().as_str() {
            "postgrest" | "supabase" => Ok(StoreType::Postgrest),
            "memory" => Ok(StoreType::Memory),
            _ => Err(StoreError::Config(format!(
                "Unsupported CONTENT_STORE: {}. Supported types: postgrest, memory",
                s
            ))),
        }
    }
}

pub struct StoreFactory;

impl StoreFactory {
    pub fn create(config: &Config, client: reqwest::Client) -> Result<Arc<dyn RowStore>, StoreError> {
        info!("Creating content store: {:?}", config.content_store);

        match config.content_store {
            StoreType::Postgrest => {
                let url = config
                    .supabase_url
                    .as_deref()
                    .ok_or_else(|| StoreError::Config("SUPABASE_URL is not set".to_string()))?;
                let key = config
                    .supabase_anon_key
                    .as_deref()
                    .ok_or_else(|| StoreError::Config("SUPABASE_ANON_KEY is not set".to_string()))?;
                Ok(Arc::new(PostgrestStore::new(client, url, key)))
            }
            StoreType::Memory => {
                warn!("Using the in-memory content store; content is lost on restart");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
