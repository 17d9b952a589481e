//! `reqwest`-backed `ControlPlane`, every call wrapped in the shared
//! retry policy (spec §5).

use crate::control_plane::ControlPlane;
use crate::model::{ExecutionSummary, WorkflowSummary};
use async_trait::async_trait;
use flowctl_core::error::FlowError;
use flowctl_core::lifecycle::CancellationToken;
use flowctl_core::retry::{with_retry, RetryPolicy};
use flowctl_core::types::WorkflowId;
use flowctl_model::workflow::Workflow;
use reqwest::{Client, StatusCode};
use serde_json::Value;

pub struct HttpControlPlane {
    client: Client,
    base_url: String,
    retry_policy: RetryPolicy,
    cancel: CancellationToken,
}

impl HttpControlPlane {
    pub fn new(base_url: impl Into<String>, cancel: CancellationToken) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            retry_policy: RetryPolicy::default(),
            cancel,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn run<T, F, Fut>(&self, op: F) -> Result<T, FlowError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, FlowError>>,
    {
        with_retry(self.retry_policy, &self.cancel, || 0.5, op).await
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn get_workflow(&self, id: &WorkflowId) -> Result<Workflow, FlowError> {
        let url = self.url(&format!("/workflows/{id}"));
        self.run(|| async {
            let response = self.client.get(&url).send().await.map_err(classify_transport)?;
            decode(response).await
        })
        .await
    }

    async fn update_workflow(&self, id: &WorkflowId, workflow: &Workflow) -> Result<(), FlowError> {
        let url = self.url(&format!("/workflows/{id}"));
        self.run(|| async {
            let response = self.client.put(&url).json(workflow).send().await.map_err(classify_transport)?;
            decode::<Value>(response).await.map(|_| ())
        })
        .await
    }

    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>, FlowError> {
        let url = self.url("/workflows");
        self.run(|| async {
            let response = self.client.get(&url).send().await.map_err(classify_transport)?;
            decode(response).await
        })
        .await
    }

    async fn create_workflow(&self, workflow: &Workflow) -> Result<WorkflowId, FlowError> {
        let url = self.url("/workflows");
        self.run(|| async {
            let response = self.client.post(&url).json(workflow).send().await.map_err(classify_transport)?;
            let summary: WorkflowSummary = decode(response).await?;
            Ok(summary.id)
        })
        .await
    }

    async fn delete_workflow(&self, id: &WorkflowId) -> Result<(), FlowError> {
        let url = self.url(&format!("/workflows/{id}"));
        self.run(|| async {
            let response = self.client.delete(&url).send().await.map_err(classify_transport)?;
            decode::<Value>(response).await.map(|_| ())
        })
        .await
    }

    async fn activate(&self, id: &WorkflowId) -> Result<(), FlowError> {
        let url = self.url(&format!("/workflows/{id}/activate"));
        self.run(|| async {
            let response = self.client.post(&url).send().await.map_err(classify_transport)?;
            decode::<Value>(response).await.map(|_| ())
        })
        .await
    }

    async fn deactivate(&self, id: &WorkflowId) -> Result<(), FlowError> {
        let url = self.url(&format!("/workflows/{id}/deactivate"));
        self.run(|| async {
            let response = self.client.post(&url).send().await.map_err(classify_transport)?;
            decode::<Value>(response).await.map(|_| ())
        })
        .await
    }

    async fn get_executions(&self, id: &WorkflowId, limit: Option<u32>) -> Result<Vec<ExecutionSummary>, FlowError> {
        let mut url = self.url(&format!("/workflows/{id}/executions"));
        if let Some(limit) = limit {
            url = format!("{url}?limit={limit}");
        }
        self.run(|| async {
            let response = self.client.get(&url).send().await.map_err(classify_transport)?;
            decode(response).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_regardless_of_trailing_slash() {
        let a = HttpControlPlane::new("https://example.test/", CancellationToken::new());
        let b = HttpControlPlane::new("https://example.test", CancellationToken::new());
        assert_eq!(a.url("/workflows"), "https://example.test/workflows");
        assert_eq!(b.url("/workflows"), "https://example.test/workflows");
    }
}

fn classify_transport(err: reqwest::Error) -> FlowError {
    if err.is_timeout() {
        FlowError::NoResponse
    } else {
        FlowError::Connection(err.to_string())
    }
}

/// Maps an HTTP response to either the decoded body or the matching
/// `FlowError`, per spec §5/§7's retry-eligibility split: only 429 and
/// 5xx are retryable, auth and other 4xx are terminal.
async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, FlowError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| FlowError::Protocol(e.to_string()));
    }
    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FlowError::Auth(body),
        StatusCode::TOO_MANY_REQUESTS => FlowError::RateLimited(body),
        s if s.is_server_error() => FlowError::NoResponse,
        s if s.is_client_error() => FlowError::ValidationRejected { message: body },
        s => FlowError::Protocol(format!("unexpected status {s}: {body}")),
    })
}
