//! Persisting the API key to a local `.env` file.
//!
//! The file is rewritten line by line: any existing key assignment (current
//! or legacy variable name) is replaced, every other line is kept as is.

use crate::config::{API_KEY_VAR, LEGACY_API_KEY_VAR};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// `.env` in the current working directory.
pub fn default_env_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(".env"))
}

/// Write `api_key` into the env file at `path`, creating the file if needed.
pub fn persist_api_key(path: &Path, api_key: &str) -> Result<()> {
    let existing = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    let updated = upsert_api_key(&existing, api_key);
    std::fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Return `contents` with exactly one `LANGSOURCE_API_KEY=` line, set to `api_key`.
fn upsert_api_key(contents: &str, api_key: &str) -> String {
    let assignment = format!("{}={}", API_KEY_VAR, api_key);
    let mut lines: Vec<String> = Vec::new();
    let mut written = false;

    for line in contents.lines() {
        if assigns_api_key(line) {
            if !written {
                lines.push(assignment.clone());
                written = true;
            }
            continue;
        }
        lines.push(line.to_string());
    }

    if !written {
        lines.push(assignment);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn assigns_api_key(line: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();

    [API_KEY_VAR, LEGACY_API_KEY_VAR].iter().any(|var| {
        line.strip_prefix(var)
            .map(|rest| rest.trim_start().starts_with('='))
            .unwrap_or(false)
    })
}
