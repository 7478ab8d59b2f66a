use crate::config::Config;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gemini `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateRequest {
    fn new(prompt: &str, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
        }
    }
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("Failed to generate translation: no text in response")]
    EmptyResponse,
}

impl GeminiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            GeminiError::Request(e) => e.status(),
            GeminiError::EmptyResponse => None,
        }
    }
}

/// Send one prompt to `generateContent` and return the reply text, trimmed.
pub async fn generate_content(
    client: &reqwest::Client,
    config: &Config,
    prompt: &str,
) -> Result<String, GeminiError> {
    let request = GenerateRequest::new(prompt, config.temperature, config.max_output_tokens);
    send(client, config, &request).await
}

async fn send(
    client: &reqwest::Client,
    config: &Config,
    request: &GenerateRequest,
) -> Result<String, GeminiError> {
    let response = client
        .post(config.generate_content_url())
        .query(&[("key", config.api_key.as_str())])
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(GeminiError::Api { status, body });
    }

    let parsed: GenerateResponse = response.json().await?;

    parsed
        .first_text()
        .map(|text| text.trim().to_string())
        .ok_or(GeminiError::EmptyResponse)
}

/// Outcome of probing the API with a freshly entered key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCheck {
    Valid,
    /// The API answered 400, which it does for malformed or unknown keys
    Invalid,
    /// The probe failed for another reason; the key was not judged
    Inconclusive(String),
}

/// Probe the API with a tiny request to check that `config.api_key` works.
pub async fn verify_api_key(client: &reqwest::Client, config: &Config) -> KeyCheck {
    let request = GenerateRequest::new("Hello, how are you?", 0.5, 100);

    match send(client, config, &request).await {
        Ok(_) | Err(GeminiError::EmptyResponse) => KeyCheck::Valid,
        Err(e) if e.status() == Some(StatusCode::BAD_REQUEST) => KeyCheck::Invalid,
        Err(e) => KeyCheck::Inconclusive(e.to_string()),
    }
}
