use async_trait::async_trait;
use reqwest::{header, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{Operation, RowRequest, RowStore, StoreError};

/// Row store backed by a hosted PostgREST endpoint (`{url}/rest/v1`).
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl PostgrestStore {
    pub fn new(client: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, url: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let bearer = token.unwrap_or(&self.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    async fn read_error(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<PostgrestErrorBody>(&body) {
            Ok(err) => {
                let mut message = err.message.unwrap_or_else(|| status.to_string());
                if let Some(code) = err.code {
                    message = format!("{} [{}]", message, code);
                }
                if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                    message = format!("{} ({})", message, details);
                }
                if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                    debug!("Backend hint: {}", hint);
                }
                message
            }
            Err(_) if body.is_empty() => status.to_string(),
            Err(_) => body,
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized(message),
            _ => StoreError::Backend {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Query string for a request in the PostgREST dialect.
pub fn query_pairs(request: &RowRequest) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    if let Operation::Select { order, limit } = &request.operation {
        pairs.push(("select".to_string(), "*".to_string()));
        if let Some(order) = order {
            pairs.push((
                "order".to_string(),
                format!("{}.{}", order.column, order.direction.as_str()),
            ));
        }
        if let Some(limit) = limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
    }

    for filter in &request.filters {
        pairs.push((filter.column.clone(), format!("eq.{}", filter.value)));
    }

    pairs
}

#[async_trait]
impl RowStore for PostgrestStore {
    async fn execute(&self, request: RowRequest) -> Result<Vec<Value>, StoreError> {
        let url = self.table_url(&request.table);
        let pairs = query_pairs(&request);
        let token = request.token.as_deref();

        debug!(
            "PostgREST {} on {} ({} filters)",
            request.operation.kind(),
            request.table,
            request.filters.len()
        );

        let builder = match &request.operation {
            Operation::Select { .. } => self.request(Method::GET, &url, token),
            Operation::Insert { rows } => self
                .request(Method::POST, &url, token)
                .header("Prefer", "return=representation")
                .json(rows),
            Operation::Update { patch } => self
                .request(Method::PATCH, &url, token)
                .header("Prefer", "return=representation")
                .json(patch),
            Operation::Delete => self
                .request(Method::DELETE, &url, token)
                .header("Prefer", "return=representation"),
        };

        let response = builder.query(&pairs).send().await?;

        if !response.status().is_success() {
            let err = Self::read_error(response).await;
            warn!("PostgREST {} on {} failed: {}", request.operation.kind(), request.table, err);
            return Err(err);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&body)
            .map_err(|e| StoreError::Serialization(e.to_string()))?
        {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/", self.base_url);
        let response = self.request(Method::GET, &url, None).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::read_error(response).await)
        }
    }

    fn name(&self) -> &'static str {
        "postgrest"
    }
}
