//! Language type: a target language validated against the registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A supported target language.
///
/// Can only be constructed from a code present in the registry, so every
/// accessor is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    config: &'static LanguageConfig,
}

impl Language {
    /// Create a Language from a code string (e.g. "ja").
    ///
    /// Returns an error for codes that are not in the registry.
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { config }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Parse a list of codes, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Language>> {
        codes.iter().map(|c| Language::from_code(c.as_ref())).collect()
    }

    /// Every supported language, in menu order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Language { config })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.config.code
    }

    /// English name, as used in prompts.
    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn native_name(&self) -> &'static str {
        self.config.native_name
    }

    /// Name of the file this language's translation is written to.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.config.code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
