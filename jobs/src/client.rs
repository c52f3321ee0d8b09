//! HTTP client for the CRM operation endpoint
//!
//! One POST per call, `{"operationName", "variables"}` in, `{"data"}` or
//! `{"errors"}` out. No retries; the caller decides what a failure means.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Error entries returned by the API, messages only
    #[error("{}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// HTTP client for the CRM API
#[derive(Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    endpoint: String,
}

impl CrmClient {
    /// Create a client whose every request gives up after `timeout`
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Run one operation and decode `data.<operation>` into `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        variables: Value,
    ) -> Result<T, ClientError> {
        let data = self.send(operation, variables).await?;
        let field = data
            .get(operation)
            .cloned()
            .ok_or_else(|| ClientError::Malformed(format!("missing data.{}", operation)))?;

        serde_json::from_value(field).map_err(|e| ClientError::Malformed(e.to_string()))
    }

    async fn send(&self, operation: &str, variables: Value) -> Result<Value, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&OperationRequest {
                operation_name: operation,
                variables,
            })
            .send()
            .await?;

        handle_response(response).await
    }
}

async fn handle_response(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    // Error payloads come with 4xx/5xx statuses, so look for them first
    let parsed: Option<OperationResponse> = serde_json::from_str(&body).ok();
    if let Some(errors) = parsed.as_ref().and_then(|p| p.errors.as_ref()) {
        if !errors.is_empty() {
            return Err(ClientError::GraphQl(
                errors.iter().map(|e| e.message.clone()).collect(),
            ));
        }
    }

    if !status.is_success() {
        return Err(ClientError::Status { status, body });
    }

    match parsed {
        Some(OperationResponse {
            data: Some(data), ..
        }) if data.is_object() => Ok(data),
        Some(_) => Err(ClientError::Malformed("response has no data".to_string())),
        None => Err(ClientError::Malformed(format!("not JSON: {}", body))),
    }
}

// --- Wire Types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationRequest<'a> {
    operation_name: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct OperationResponse {
    data: Option<Value>,
    errors: Option<Vec<ErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}
