//! Preview prompt binary - prints the translation prompt for one or more
//! languages without calling the API
//!
//! Usage:
//!   cargo run --bin preview-prompt -- locales/en.json ja ko
//!
//! No API key or network access is needed.

use anyhow::{bail, Context, Result};
use langsource::i18n::{Language, LanguageRegistry};
use langsource::prompt::build_translation_prompt;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, codes) = match args.split_first() {
        Some((path, codes)) if !codes.is_empty() => (path, codes),
        _ => bail!(
            "Usage: preview-prompt <base.json> <language code>...\nSupported codes: {}",
            LanguageRegistry::get().codes().join(", ")
        ),
    };

    let languages = Language::parse_list(codes)?;
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read ({})", path))?;
    let base: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse ({})", path))?;

    for language in languages {
        let prompt = build_translation_prompt(&base, language)?;

        println!("─── Prompt for {} → {} ───", path, language.file_name());
        println!("{}", prompt);
        println!("─── {} characters ───\n", prompt.chars().count());
    }

    Ok(())
}
