use crate::Config;
use crate::prompt;
use common::models::{AnalysisRequest, AnalysisResult};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to render prompt: {0}")]
    Prompt(#[from] askama::Error),
    #[error("error while sending llm request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected code {0} from llm: {1}")]
    UpstreamStatus(StatusCode, String),
    #[error("malformed llm response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Sends student submissions to an OpenAI compatible chat completion API.
///
/// Holds no mutable state, a single instance is shared by all requests.
#[derive(Debug)]
pub struct AnalysisService {
    client: Client,
    completions_url: String,
    api_key: String,
    model: String,
}

impl AnalysisService {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(AnalysisService {
            client: Client::builder()
                .timeout(Duration::from_millis(config.upstream_timeout))
                .build()?,
            completions_url: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            api_key: config.groq_api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Explains the submission with exactly one completion request. Nothing is
    /// retried, any failure fails the whole analysis.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = prompt::render(request)?;

        debug!(
            "Requesting completion from {} using {}",
            self.completions_url, self.model
        );
        let res = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&ChatCompletionRequest {
                model: &self.model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: &prompt,
                }],
            })
            .send()
            .await?;

        match res.error_for_status_ref() {
            Ok(_) => extract_analysis(&res.text().await?),
            Err(_) => Err(AnalysisError::UpstreamStatus(res.status(), res.text().await?)),
        }
    }
}

fn extract_analysis(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| AnalysisResult {
            analysis: choice.message.content,
        })
        .ok_or_else(|| AnalysisError::MalformedResponse("choices is empty".to_string()))
}
