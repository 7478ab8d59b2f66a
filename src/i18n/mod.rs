//! Language support for translation generation.
//!
//! - `registry`: the fixed table of supported target languages
//! - `language`: validated `Language` handle over the registry
//! - `validator`: structure and URL checks on translated documents
//! - `metrics`: counters for a generation run
//!
//! # Example
//!
//! ```rust,ignore
//! use langsource::i18n::{Language, LanguageRegistry};
//!
//! let japanese = Language::from_code("ja")?;
//! assert_eq!(japanese.file_name(), "ja.json");
//!
//! let codes = LanguageRegistry::get().codes();
//! ```

mod language;
mod metrics;
mod registry;
mod validator;

pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
