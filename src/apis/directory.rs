use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::DirectoryConfig;
use crate::constants::DIRECTORY_SOURCE;
use crate::error::{MeetupError, Result};
use crate::metrics;
use crate::types::{GroupSource, RawGroupData};

/// Client for the directory's group search endpoint.
///
/// Holds one pooled `reqwest::Client`; cloning shares the pool.
#[derive(Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
    search_url: String,
    api_key: String,
    results_key: String,
}

impl DirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url(),
            api_key: config.api_key.clone(),
            results_key: config.results_key.clone(),
        })
    }

    /// Pulls the group array out of a response body: either the whole
    /// document or the array under the results key.
    fn extract_groups(&self, document: Value) -> Result<Vec<RawGroupData>> {
        match document {
            Value::Array(groups) => Ok(groups),
            Value::Object(mut fields) => match fields.remove(&self.results_key) {
                Some(Value::Array(groups)) => Ok(groups),
                _ => Err(MeetupError::Payload(format!(
                    "expected a group array under '{}'",
                    self.results_key
                ))),
            },
            other => Err(MeetupError::Payload(format!(
                "expected a group array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl GroupSource for DirectoryClient {
    fn source_name(&self) -> &'static str {
        DIRECTORY_SOURCE
    }

    #[instrument(skip(self))]
    async fn search_groups(&self, location: &str, radius: u32) -> Result<Vec<RawGroupData>> {
        debug!("Searching {} for groups", self.search_url);
        let _timing = metrics::directory::time_request();

        let radius = radius.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("zip", location),
                ("radius", radius.as_str()),
                ("format", "json"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key
                let e = e.without_url();
                warn!("Directory request failed: {}", e);
                metrics::directory::request_failed("network");
                MeetupError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Directory answered with HTTP {}", status.as_u16());
            metrics::directory::request_failed("remote");
            return Err(MeetupError::Remote {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            metrics::directory::request_failed("network");
            MeetupError::Network(e.without_url())
        })?;
        let document: Value = serde_json::from_str(&body).map_err(|e| {
            metrics::directory::request_failed("payload");
            MeetupError::Payload(format!("response is not JSON: {e}"))
        })?;
        let groups = self.extract_groups(document).map_err(|e| {
            metrics::directory::request_failed("payload");
            e
        })?;

        metrics::directory::request_succeeded();
        info!("Directory returned {} groups", groups.len());
        Ok(groups)
    }
}
