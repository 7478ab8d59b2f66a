use crate::config::Config;
use crate::extract::{extract_json, ExtractError};
use crate::gemini::{self, GeminiError};
use crate::i18n::{Language, MetricsReport, TranslationMetrics, TranslationValidator};
use crate::prompt::build_translation_prompt;
use crate::retry::{with_retry, RetryConfig};
use anyhow::Context;
use futures::future::join_all;
use serde_json::Value;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a single translation attempt failed.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    Gemini(#[from] GeminiError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a finished translation job did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Translation written to this path
    Written(PathBuf),
    /// Target file would be the base file itself; nothing was requested or written
    Skipped,
}

/// Results of one generation run, in the order languages were requested.
#[derive(Debug)]
pub struct GenerationReport {
    pub results: Vec<(Language, Result<JobOutcome, TranslateError>)>,
    pub metrics: MetricsReport,
}

impl GenerationReport {
    pub fn written(&self) -> Vec<(Language, &Path)> {
        self.results
            .iter()
            .filter_map(|(lang, result)| match result {
                Ok(JobOutcome::Written(path)) => Some((*lang, path.as_path())),
                _ => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> Vec<Language> {
        self.results
            .iter()
            .filter(|(_, result)| matches!(result, Ok(JobOutcome::Skipped)))
            .map(|(lang, _)| *lang)
            .collect()
    }

    pub fn failures(&self) -> Vec<(Language, &TranslateError)> {
        self.results
            .iter()
            .filter_map(|(lang, result)| result.as_ref().err().map(|e| (*lang, e)))
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    /// Process exit status for this run: 0 when every language succeeded.
    pub fn exit_status(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Translates one base document into any number of target languages.
///
/// The base document is parsed once and shared read-only between jobs.
pub struct Translator {
    client: reqwest::Client,
    config: Config,
    base_path: PathBuf,
    base: Arc<Value>,
    metrics: TranslationMetrics,
}

impl Translator {
    /// Read and parse the base file. A missing or malformed file is fatal.
    pub fn load(config: Config, base_path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let base_path = base_path.into();
        let content = std::fs::read_to_string(&base_path)
            .with_context(|| format!("Failed to read ({})", base_path.display()))?;
        let base: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse ({})", base_path.display()))?;

        Ok(Self::from_document(config, base_path, base))
    }

    /// Build a translator around an already parsed base document.
    pub fn from_document(config: Config, base_path: impl Into<PathBuf>, base: Value) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_path: base_path.into(),
            base: Arc::new(base),
            metrics: TranslationMetrics::new(),
        }
    }

    /// Use a preconfigured HTTP client (connection pool, timeouts).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Where `language` is written: `<code>.json` beside the base file.
    ///
    /// Returns `None` when that name is the base file's own name.
    pub fn output_path(&self, language: Language) -> Option<PathBuf> {
        let file_name = language.file_name();
        if self.base_path.file_name() == Some(OsStr::new(&file_name)) {
            return None;
        }

        let directory = self.base_path.parent().unwrap_or_else(|| Path::new(""));
        Some(directory.join(file_name))
    }

    /// Translate every language concurrently and wait for all of them.
    ///
    /// Duplicate languages are translated once. A failing language never
    /// affects the others; its error is kept in the report.
    pub async fn generate(&self, languages: &[Language]) -> GenerationReport {
        let mut unique: Vec<Language> = Vec::with_capacity(languages.len());
        for language in languages {
            if !unique.contains(language) {
                unique.push(*language);
            }
        }

        info!(
            "Starting translation generation from ({}) for {} language(s)",
            self.base_path.display(),
            unique.len()
        );

        let jobs = unique
            .iter()
            .map(|&language| async move { (language, self.translate_language(language).await) });
        let results = join_all(jobs).await;

        let report = GenerationReport {
            results,
            metrics: self.metrics.report(),
        };

        if report.is_success() {
            info!("Translation complete.");
        } else {
            info!(
                "Translation finished with {} failed language(s)",
                report.failures().len()
            );
        }
        debug!("Generation metrics: {:?}", report.metrics);

        report
    }

    /// Run one translation job: request, extract, write, with retries.
    pub async fn translate_language(&self, language: Language) -> Result<JobOutcome, TranslateError> {
        let file_name = language.file_name();

        let Some(output_path) = self.output_path(language) else {
            info!(
                "Skipping translation for {} as it is the same as the base file.",
                file_name
            );
            self.metrics.record_skipped();
            return Ok(JobOutcome::Skipped);
        };

        let prompt = build_translation_prompt(&self.base, language).map_err(TranslateError::Encode)?;
        let retry = RetryConfig::fixed(self.config.max_retries, self.config.retry_delay);

        let result = with_retry(&retry, &file_name, || {
            self.attempt(language, &prompt, &output_path)
        })
        .await;

        match result {
            Ok(()) => {
                info!("{} generated successfully.", file_name);
                Ok(JobOutcome::Written(output_path))
            }
            Err(e) => {
                error!(
                    "Failed to generate {} after {} attempts: {}",
                    file_name, retry.max_attempts, e
                );
                self.metrics.record_language_failed();
                Err(e)
            }
        }
    }

    async fn attempt(
        &self,
        language: Language,
        prompt: &str,
        output_path: &Path,
    ) -> Result<(), TranslateError> {
        self.metrics.record_api_call();

        let result = self.request_and_write(language, prompt, output_path).await;
        if result.is_err() {
            self.metrics.record_attempt_failure();
        }
        result
    }

    async fn request_and_write(
        &self,
        language: Language,
        prompt: &str,
        output_path: &Path,
    ) -> Result<(), TranslateError> {
        let text = gemini::generate_content(&self.client, &self.config, prompt).await?;
        let translated = extract_json(&text)?;

        let validation = TranslationValidator::validate(&self.base, &translated);
        if validation.is_clean() {
            debug!("{} keeps the base structure", language);
        }
        if validation.has_warnings() {
            warn!(
                "Translation validation warnings for {}: {:?}",
                language, validation.warnings
            );
        }
        if validation.has_errors() {
            warn!(
                "Translation validation errors for {}: {:?}",
                language, validation.errors
            );
        }

        let contents = serde_json::to_string_pretty(&translated).map_err(TranslateError::Encode)?;
        tokio::fs::write(output_path, contents)
            .await
            .map_err(|source| TranslateError::Write {
                path: output_path.to_path_buf(),
                source,
            })?;

        self.metrics.record_file_written();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_test_config(api_url: &str) -> Config {
        Config {
            api_key: "test-gemini-key".to_string(),
            api_base_url: api_url.to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.4,
            max_output_tokens: 3000,
            max_retries: 3,
            retry_delay: Duration::from_millis(10),
        }
    }

    fn lang(code: &str) -> Language {
        Language::from_code(code).unwrap()
    }

    fn gemini_reply(text: &str) -> serde_json::Value {
        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
    }

    // ==================== output_path Tests ====================

    #[test]
    fn test_output_path_is_sibling_of_base() {
        let translator = Translator::from_document(
            create_test_config("http://unused"),
            "/project/locales/en.json",
            json!({}),
        );

        assert_eq!(
            translator.output_path(lang("ja")),
            Some(PathBuf::from("/project/locales/ja.json"))
        );
    }

    #[test]
    fn test_output_path_skips_base_file_name() {
        let translator = Translator::from_document(
            create_test_config("http://unused"),
            "/project/locales/en.json",
            json!({}),
        );

        assert_eq!(translator.output_path(lang("en")), None);
    }

    #[test]
    fn test_output_path_for_base_without_directory() {
        let translator =
            Translator::from_document(create_test_config("http://unused"), "base.json", json!({}));

        assert_eq!(
            translator.output_path(lang("fr")),
            Some(PathBuf::from("fr.json"))
        );
    }

    #[test]
    fn test_output_path_base_name_not_a_language() {
        let translator = Translator::from_document(
            create_test_config("http://unused"),
            "/tmp/strings.json",
            json!({}),
        );

        for language in Language::all() {
            assert!(translator.output_path(language).is_some());
        }
    }

    // ==================== load Tests ====================

    #[test]
    fn test_load_parses_base_file() {
        let dir = TempDir::new().unwrap();
        let base_path = dir.path().join("en.json");
        std::fs::write(&base_path, r#"{"hello": "Hello"}"#).unwrap();

        let translator = Translator::load(create_test_config("http://unused"), &base_path)
            .expect("Should load");
        assert_eq!(*translator.base, json!({"hello": "Hello"}));
        assert_eq!(translator.base_path, base_path);
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let dir = TempDir::new().unwrap();
        let base_path = dir.path().join("en.json");
        std::fs::write(&base_path, r#"{"hello": "Hello",}"#).unwrap();

        let err = Translator::load(create_test_config("http://unused"), &base_path)
            .err()
            .expect("Should fail");
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = Translator::load(
            create_test_config("http://unused"),
            dir.path().join("missing.json"),
        );
        assert!(result.is_err());
    }

    // ==================== translate_language Tests ====================

    #[tokio::test]
    async fn test_translate_language_writes_pretty_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(
                "```json\n{\"hello\": \"Hola\", \"nested\": {\"bye\": \"Adiós\"}}\n```",
            )))
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let translator = Translator::from_document(
            create_test_config(&mock_server.uri()),
            dir.path().join("en.json"),
            json!({"hello": "Hello", "nested": {"bye": "Goodbye"}}),
        );

        let outcome = translator.translate_language(lang("es")).await.unwrap();
        let expected_path = dir.path().join("es.json");
        assert_eq!(outcome, JobOutcome::Written(expected_path.clone()));

        let written = std::fs::read_to_string(&expected_path).unwrap();
        assert_eq!(
            written,
            "{\n  \"hello\": \"Hola\",\n  \"nested\": {\n    \"bye\": \"Adiós\"\n  }\n}"
        );
    }

    #[tokio::test]
    async fn test_translate_language_skip_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{}")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let translator = Translator::from_document(
            create_test_config(&mock_server.uri()),
            dir.path().join("ja.json"),
            json!({"a": "b"}),
        );

        let outcome = translator.translate_language(lang("ja")).await.unwrap();
        assert_eq!(outcome, JobOutcome::Skipped);
        assert_eq!(translator.metrics.report().skipped, 1);
        assert_eq!(translator.metrics.report().api_calls, 0);
    }

    #[tokio::test]
    async fn test_translate_language_unparseable_reply_is_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(gemini_reply("Sorry, I can't do that.")),
            )
            .expect(4)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let translator = Translator::from_document(
            create_test_config(&mock_server.uri()),
            dir.path().join("en.json"),
            json!({"a": "b"}),
        );

        let err = translator.translate_language(lang("de")).await.unwrap_err();
        assert!(matches!(err, TranslateError::Extract(ExtractError::NoJsonObject)));
        assert!(!dir.path().join("de.json").exists());

        let metrics = translator.metrics.report();
        assert_eq!(metrics.api_calls, 4);
        assert_eq!(metrics.attempt_failures, 4);
        assert_eq!(metrics.languages_failed, 1);
    }

    #[tokio::test]
    async fn test_translate_language_write_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{\"a\": \"c\"}")))
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let mut config = create_test_config(&mock_server.uri());
        config.max_retries = 0;
        let translator = Translator::from_document(
            config,
            dir.path().join("no-such-dir").join("en.json"),
            json!({"a": "b"}),
        );

        let err = translator.translate_language(lang("it")).await.unwrap_err();
        assert!(matches!(err, TranslateError::Write { .. }));
        assert!(err.to_string().contains("it.json"));
    }

    // ==================== generate Tests ====================

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines_at(&self, level: &str) -> usize {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| line.contains(level))
                .count()
        }
    }

    #[tokio::test]
    async fn test_generate_logs_one_error_per_failed_language() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .expect(4)
            .mount(&mock_server)
            .await;

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = TempDir::new().unwrap();
        let translator = Translator::from_document(
            create_test_config(&mock_server.uri()),
            dir.path().join("en.json"),
            json!({"a": "b"}),
        );

        let report = translator.generate(&[lang("ko")]).await;
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.exit_status(), 1);

        // One retry warning per retry, one error for the language
        assert_eq!(logs.lines_at("ERROR"), 1);
        assert_eq!(logs.lines_at("WARN"), 3);
    }

    #[tokio::test]
    async fn test_generate_deduplicates_languages() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{\"a\": \"x\"}")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = TempDir::new().unwrap();
        let translator = Translator::from_document(
            create_test_config(&mock_server.uri()),
            dir.path().join("en.json"),
            json!({"a": "b"}),
        );

        let report = translator.generate(&[lang("fr"), lang("fr")]).await;
        assert_eq!(report.results.len(), 1);
        assert!(report.is_success());
        assert_eq!(report.metrics.files_written, 1);
    }

    #[tokio::test]
    async fn test_generate_empty_language_list() {
        let translator = Translator::from_document(
            create_test_config("http://unused"),
            "en.json",
            json!({"a": "b"}),
        );

        let report = translator.generate(&[]).await;
        assert!(report.results.is_empty());
        assert!(report.is_success());
        assert_eq!(report.exit_status(), 0);
    }
}
