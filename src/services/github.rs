use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

const CONTRIBUTIONS_API: &str = "https://github-contributions-api.deno.dev";

/// Public contribution counts for the configured GitHub account.
pub struct GithubService<'a> {
    client: &'a reqwest::Client,
    username: &'a str,
}

impl<'a> GithubService<'a> {
    pub fn new(client: &'a reqwest::Client, username: &'a str) -> Self {
        GithubService { client, username }
    }

    pub fn contributions_url(&self) -> String {
        format!(
            "{}/{}.json",
            CONTRIBUTIONS_API,
            urlencoding::encode(self.username)
        )
    }

    pub async fn total_contributions(&self) -> AppResult<u64> {
        let response = self.client.get(self.contributions_url()).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "Contributions API returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let total = total_contributions(&body);
        debug!("{} has {} contributions", self.username, total);
        Ok(total)
    }

    /// Like `total_contributions`, but logs failures and yields `None`.
    pub async fn try_total_contributions(&self) -> Option<u64> {
        match self.total_contributions().await {
            Ok(total) => Some(total),
            Err(e) => {
                warn!("Failed to fetch contributions for {}: {}", self.username, e);
                None
            }
        }
    }
}

/// Sums `contributionCount` over the weeks-of-days `contributions` array.
pub fn total_contributions(body: &Value) -> u64 {
    body.get("contributions")
        .and_then(Value::as_array)
        .map(|weeks| {
            weeks
                .iter()
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(|day| day.get("contributionCount").and_then(Value::as_u64))
                .sum::<u64>()
        })
        .unwrap_or(0)
}
