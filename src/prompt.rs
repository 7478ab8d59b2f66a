use crate::i18n::Language;
use serde_json::Value;

/// Fence placed on its own line before and after the embedded document.
pub const DOCUMENT_FENCE: &str = "\"\"\"";

/// Build the translation instruction for one target language.
///
/// The base document is embedded pretty-printed (2-space indent) between two
/// `"""` lines. serde_json escapes every quote inside strings, so the fence
/// can never occur inside the embedded document.
pub fn build_translation_prompt(base: &Value, target: Language) -> serde_json::Result<String> {
    let document = serde_json::to_string_pretty(base)?;

    let lines = [
        "Translate the values of the JSON document below into the target language. \
         Keep the structure and every key exactly as they are. Follow these rules:",
        "1. If the values are already in the target language, return the document unchanged.",
        "2. Do not translate URLs, code, names, file or path names, identifiers, \
         or anything else that should stay as written.",
        "3. Reply with the JSON document only, with no extra text before or after it.",
        "4. Leave any value that cannot or should not be translated as it is.",
    ];

    let mut prompt = lines.join("\n");
    prompt.push('\n');
    prompt.push_str(&format!(
        "Translate this JSON document into {}:\n",
        target.name()
    ));
    prompt.push_str(DOCUMENT_FENCE);
    prompt.push('\n');
    prompt.push_str(&document);
    prompt.push('\n');
    prompt.push_str(DOCUMENT_FENCE);
    prompt.push('\n');
    prompt.push_str(OUTPUT_SHAPE);

    Ok(prompt)
}

const OUTPUT_SHAPE: &str = r#"Your reply must follow this shape, with no additional text:
{
  "key1": "translated_value1",
  "key2": "translated_value2",
  "key3": {
    "key4": "translated_value3"
  }
}"#;
