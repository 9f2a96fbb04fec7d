//! Live message sink backed by the Slack Web API.
//!
//! Every render is a full overwrite via `chat.update`. Rate-limited calls
//! are retried after the server's `Retry-After` delay.

use super::error::{Result, SlackError};
use async_trait::async_trait;
use reply_application::{LiveMessageSink, MessageUpdate, SinkError};
use reply_domain::util::truncate_str;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Longest text Slack accepts in a single message, in bytes
pub const SLACK_MAX_MESSAGE_LEN: usize = 39000;

const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Per-request deadline for Web API calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Slack Web API client that renders live messages.
pub struct SlackMessageSink {
    client: Client,
    api_base: String,
    bot_token: String,
    max_retries: u32,
    request_timeout: Duration,
}

impl SlackMessageSink {
    pub fn new(api_base: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            max_retries: 2,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Post a new message and return its timestamp (the message id).
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<String> {
        let body = json!({
            "channel": channel,
            "text": truncate_str(text, SLACK_MAX_MESSAGE_LEN),
        });
        let result = self.call("chat.postMessage", &body).await?;
        result["ts"]
            .as_str()
            .map(str::to_string)
            .ok_or(SlackError::MissingField("ts"))
    }

    /// Overwrite the text of an existing message.
    pub async fn update_message(&self, channel: &str, ts: &str, text: &str) -> Result<()> {
        let body = json!({
            "channel": channel,
            "ts": ts,
            "text": truncate_str(text, SLACK_MAX_MESSAGE_LEN),
        });
        self.call("chat.update", &body).await.map(|_| ())
    }

    async fn call(&self, method: &str, body: &Value) -> Result<Value> {
        let url = format!("{}/{}", self.api_base, method);
        let mut attempt = 0;

        loop {
            let resp = self
                .client
                .post(&url)
                .timeout(self.request_timeout)
                .header("Authorization", format!("Bearer {}", self.bot_token))
                .json(body)
                .send()
                .await?;

            if resp.status() == StatusCode::TOO_MANY_REQUESTS {
                if attempt >= self.max_retries {
                    return Err(SlackError::RateLimited { retries: attempt });
                }
                let delay = retry_after(&resp);
                attempt += 1;
                warn!(
                    "Slack {} rate limited, retrying in {:?} ({}/{})",
                    method, delay, attempt, self.max_retries
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if !resp.status().is_success() {
                return Err(SlackError::Status(resp.status().as_u16()));
            }

            let result: Value = resp.json().await?;
            if result["ok"].as_bool() != Some(true) {
                let err = result["error"].as_str().unwrap_or("unknown");
                return Err(SlackError::Api(err.to_string()));
            }
            debug!("Slack {} succeeded", method);
            return Ok(result);
        }
    }
}

fn retry_after(resp: &reqwest::Response) -> Duration {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

#[async_trait]
impl LiveMessageSink for SlackMessageSink {
    async fn push(&self, update: &MessageUpdate) -> std::result::Result<(), SinkError> {
        self.update_message(&update.conversation_id, &update.message_id, &update.text)
            .await
            .map_err(SinkError::from)
    }
}
