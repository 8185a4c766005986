//! OpenAI-compatible chat-completions judge.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{JudgeClient, JudgeError};
use crate::config::JudgeConfig;
use crate::error::{PairJudgeError, Result};

pub struct OpenAiJudge {
    pub model: String,
    pub api_base: String,
    pub temperature: f64,
    pub max_tokens: u32,
    api_key: String,
    client: Client,
}

impl OpenAiJudge {
    pub fn new(
        model: String,
        api_base: String,
        api_key: String,
        temperature: f64,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PairJudgeError::Other(format!("failed to build judge HTTP client: {}", e))
        })?;

        Ok(Self {
            model,
            api_base,
            temperature,
            max_tokens,
            api_key,
            client,
        })
    }

    pub fn from_config(config: &JudgeConfig, api_key: String) -> Result<Self> {
        Self::new(
            config.model.clone(),
            config.api_base.clone(),
            api_key,
            config.temperature,
            config.max_tokens,
            config.timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.api_base.trim_end_matches('/')
        )
    }
}

fn transport_error(err: reqwest::Error) -> JudgeError {
    if err.is_timeout() {
        JudgeError::Timeout(err.to_string())
    } else if err.is_decode() {
        JudgeError::MalformedResponse(err.to_string())
    } else {
        JudgeError::Transport(err.to_string())
    }
}

#[async_trait]
impl JudgeClient for OpenAiJudge {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
    ) -> std::result::Result<String, JudgeError> {
        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::Status { status, body });
        }

        let response_json: serde_json::Value =
            response.json().await.map_err(transport_error)?;

        response_json
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                JudgeError::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
