//! Translation quality validation.
//!
//! Checks that a translated document kept the shape of the base document
//! (same key paths, same value kinds) and left URLs untouched. Findings are
//! reported, never enforced: the caller decides whether to log them.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Structural problems (missing keys, changed value kinds)
    pub errors: Vec<String>,

    /// Softer findings (extra keys, altered URLs)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translated JSON documents.
pub struct TranslationValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Coarse JSON value kind, used to detect structural drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }
}

impl TranslationValidator {
    /// Compare a translated document against its base document.
    ///
    /// Errors:
    /// - a key path present in the base is missing from the translation
    /// - a value changed kind (e.g. object became string)
    ///
    /// Warnings:
    /// - a key path was added by the translation
    /// - a string value lost or changed one of its URLs
    pub fn validate(base: &Value, translated: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();

        let base_paths = Self::flatten(base);
        let translated_paths = Self::flatten(translated);

        for (path, base_value) in &base_paths {
            match translated_paths.get(path) {
                None => report.errors.push(format!("Missing key: {}", path)),
                Some(value) if Kind::of(value) != Kind::of(base_value) => {
                    report.errors.push(format!(
                        "Type mismatch at {}: expected {:?}, found {:?}",
                        path,
                        Kind::of(base_value),
                        Kind::of(value)
                    ));
                }
                Some(Value::String(text)) => {
                    if let Value::String(original) = base_value {
                        let orig_urls = Self::extract_urls(original);
                        let trans_urls = Self::extract_urls(text);
                        if orig_urls != trans_urls {
                            report.warnings.push(format!(
                                "URL mismatch at {}: original has {:?}, translation has {:?}",
                                path, orig_urls, trans_urls
                            ));
                        }
                    }
                }
                Some(_) => {}
            }
        }

        for path in translated_paths.keys() {
            if !base_paths.contains_key(path) {
                report.warnings.push(format!("Unexpected key: {}", path));
            }
        }

        report
    }

    /// Flatten a document into `path -> value` for every node below the root.
    /// Object keys are joined with '.', array indices written as `[i]`.
    fn flatten(value: &Value) -> BTreeMap<String, &Value> {
        let mut out = BTreeMap::new();
        Self::flatten_into(value, String::new(), &mut out);
        out
    }

    fn flatten_into<'a>(value: &'a Value, prefix: String, out: &mut BTreeMap<String, &'a Value>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    out.insert(path.clone(), child);
                    Self::flatten_into(child, path, out);
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    let path = format!("{}[{}]", prefix, i);
                    out.insert(path.clone(), child);
                    Self::flatten_into(child, path, out);
                }
            }
            _ => {}
        }
    }

    /// Extract all URLs from text
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| {
            Regex::new(r#"https?://[^\s)\]"'<>]+"#).expect("URL regex is valid")
        });

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
