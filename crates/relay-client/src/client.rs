use relay_core::TaskState;
use relay_core::wire::{RawStatusResponse, SendPromptRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use tokio::time::{Instant, sleep, timeout_at};
use tracing::{debug, info};

use crate::{ClientError, DEFAULT_BASE_URL, PollPolicy};

/// 1 リクエストあたりの上限（send_prompt を含む）
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the relay's producer side.
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    http: reqwest::Client,
    policy: PollPolicy,
    request_timeout: Duration,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            policy: PollPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request limit; a server that accepts but never answers fails with a timeout error.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Enqueue a prompt and return its task id.
    pub async fn send_prompt(&self, text: &str) -> Result<String, ClientError> {
        let body: Value = self
            .post(
                "/send_prompt",
                &SendPromptRequest {
                    text: text.to_string(),
                },
            )
            .await?;

        // 応答の形が崩れていても「ID が取れなかった」として扱う
        match body.get("task_id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                info!(task_id = id, "prompt accepted");
                Ok(id.to_string())
            }
            _ => Err(ClientError::MissingTaskId),
        }
    }

    /// Poll `get_response` until the task completes or `max_wait` runs out.
    ///
    /// The deadline covers the in-flight request too, not only the sleeps between polls.
    pub async fn wait_for_response(&self, task_id: &str) -> Result<String, ClientError> {
        let started = Instant::now();
        // 巨大な max_wait でも Instant の加算で panic しないように
        let deadline = started
            .checked_add(self.policy.max_wait)
            .unwrap_or_else(|| started + Duration::from_secs(30 * 365 * 24 * 60 * 60));
        let timed_out = || ClientError::Timeout {
            task_id: task_id.to_string(),
            waited: started.elapsed(),
        };
        let mut polls = 0u32;

        loop {
            let path = format!("/get_response/{task_id}");
            let raw: RawStatusResponse = timeout_at(deadline, self.get(&path))
                .await
                .map_err(|_| timed_out())??;
            polls += 1;

            match raw.status.parse::<TaskState>() {
                Ok(TaskState::Completed) => return Ok(raw.response.unwrap_or_default()),
                Ok(state) => debug!(task_id, %state, polls, "still waiting"),
                Err(other) => return Err(ClientError::UnexpectedStatus(other)),
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(timed_out());
            }
            sleep(self.policy.next_delay(polls).min(remaining)).await;
        }
    }

    /// `send_prompt` followed by `wait_for_response`.
    pub async fn ask(&self, text: &str) -> Result<(String, String), ClientError> {
        let task_id = self.send_prompt(text).await?;
        let response = self.wait_for_response(&task_id).await?;
        Ok((task_id, response))
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
