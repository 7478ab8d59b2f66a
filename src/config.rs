use std::time::Duration;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "LANGSOURCE_API_KEY";

/// Older variable name written by earlier releases, still honored on read.
pub const LEGACY_API_KEY_VAR: &str = "LLM_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    // Gemini
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,

    // Generation
    pub temperature: f32,
    pub max_output_tokens: u32,

    // Retries
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Config {
    /// Load every setting except the API key from the environment.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: std::env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),

            temperature: std::env::var("TRANSLATION_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.4),
            max_output_tokens: std::env::var("TRANSLATION_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            max_retries: std::env::var("TRANSLATION_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_delay: std::env::var("TRANSLATION_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(3)),
        }
    }

    /// Full `generateContent` endpoint for the configured model.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Probe target for the connectivity check. Needed before any key exists.
pub fn connectivity_url_from_env() -> String {
    std::env::var("CONNECTIVITY_CHECK_URL").unwrap_or_else(|_| "https://www.google.com".to_string())
}

/// Read the API key, preferring the current variable over the legacy one.
/// Blank values count as unset.
pub fn api_key_from_env() -> Option<String> {
    [API_KEY_VAR, LEGACY_API_KEY_VAR]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
