//! REST adapter.

use std::time::Duration;

use serde_json::Value;

use crate::config::RestConfig;
use crate::error::AdapterError;
use crate::log::ExecutionLog;
use crate::result::AdapterOutcome;

/// Default outbound call timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Adapter issuing one outbound HTTP request per workitem.
pub struct RestAdapter {
    client: reqwest::Client,
}

impl RestAdapter {
    /// Create an adapter with the default 30s call timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Create an adapter with a custom call timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Create an adapter over a pre-built client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Execute the configured request, appending to the log trail.
    ///
    /// Never fails past this boundary: transport errors become a failed
    /// outcome with an ERROR log entry and no captured response.
    pub async fn execute(&self, config: &RestConfig, logs: &mut Vec<ExecutionLog>) -> AdapterOutcome {
        logs.push(ExecutionLog::info(format!(
            "Sending {} request to {}",
            config.method, config.url
        )));

        match self.send(config).await {
            Ok((status_code, body)) => {
                logs.push(
                    ExecutionLog::info(format!("Received response with status {}", status_code))
                        .with_payload(body.clone()),
                );

                if status_passed(status_code) {
                    AdapterOutcome::passed(body)
                } else {
                    AdapterOutcome::failed_with(body)
                }
            }
            Err(e) => {
                tracing::warn!(url = %config.url, error = %e, "HTTP request failed");
                logs.push(ExecutionLog::error(format!("HTTP request failed: {}", e)));
                AdapterOutcome::failed()
            }
        }
    }

    async fn send(&self, config: &RestConfig) -> Result<(u16, Value), AdapterError> {
        let mut request = self.client.request(config.method.into(), &config.url);

        if !config.query_params.is_empty() {
            request = request.query(&config.query_params);
        }

        for (key, value) in &config.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if let Some(ref body) = config.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status_code = response.status().as_u16();
        // A transport failure while reading the body fails the call too;
        // a truncated 2xx must not pass.
        let text = response.text().await?;

        Ok((status_code, decode_body(&text)))
    }
}

impl Default for RestAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP status rule: 2xx passes, everything else fails.
pub(crate) fn status_passed(status_code: u16) -> bool {
    (200..300).contains(&status_code)
}

/// Parse a response body as JSON; on parse failure wrap the raw text
/// instead of failing the run.
pub(crate) fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}
