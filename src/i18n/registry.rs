//! Language registry: the fixed table of target languages.
//!
//! The registry is built once on first access (`OnceLock`) and never changes
//! afterwards. Its order is the order languages are offered in the CLI.

use std::sync::OnceLock;

/// Metadata for a supported target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageConfig {
    /// Short language code, also the output file stem (e.g. "ja" -> ja.json)
    pub code: &'static str,

    /// English name, used in prompts and menus (e.g. "Japanese")
    pub name: &'static str,

    /// Native name (e.g. "日本語")
    pub native_name: &'static str,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry, initializing it on first call.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by code. Codes are matched exactly.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages, in menu order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// All supported codes, in menu order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.languages.iter().map(|lang| lang.code).collect()
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
        },
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
        },
        LanguageConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
        },
        LanguageConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
        },
        LanguageConfig {
            code: "pt",
            name: "Portuguese",
            native_name: "Português",
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
        },
        LanguageConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
        },
        LanguageConfig {
            code: "ur",
            name: "Urdu",
            native_name: "اردو",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_registry_has_twelve_languages() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.list_all().len(), 12);
    }

    #[test]
    fn test_codes_are_unique() {
        let codes = LanguageRegistry::get().codes();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len());
    }

    #[test]
    fn test_menu_order() {
        let codes = LanguageRegistry::get().codes();
        assert_eq!(
            codes,
            vec!["en", "ja", "ko", "ru", "pt", "ar", "de", "fr", "es", "it", "zh", "ur"]
        );
    }

    #[test]
    fn test_get_by_code_japanese() {
        let config = LanguageRegistry::get()
            .get_by_code("ja")
            .expect("ja should be registered");

        assert_eq!(config.name, "Japanese");
        assert_eq!(config.native_name, "日本語");
    }

    #[test]
    fn test_get_by_code_is_case_sensitive() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("JA").is_none());
        assert!(registry.get_by_code("EN").is_none());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("nl").is_none());
        assert!(registry.get_by_code("").is_none());
    }

    #[test]
    fn test_list_all_matches_codes() {
        let registry = LanguageRegistry::get();
        let all = registry.list_all();

        assert_eq!(all.len(), registry.codes().len());
        assert!(all.iter().any(|lang| lang.code == "ur" && lang.name == "Urdu"));
    }
}
