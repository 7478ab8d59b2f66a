//! Interactive `generate` flow with cliclack prompts.

use crate::config::{self, Config};
use crate::connectivity::check_connectivity;
use crate::env_file;
use crate::gemini::{self, KeyCheck};
use crate::i18n::Language;
use crate::translator::Translator;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

/// Run the interactive translation generation.
///
/// Fatal problems (offline, rejected key, unreadable base file) are returned
/// as errors. Languages that fail after retries are reported in the results
/// note and turn into a failing exit code.
pub async fn run_generate() -> Result<ExitCode> {
    cliclack::intro("langsource generate")?;

    let client = build_client()?;

    let spinner = cliclack::spinner();
    spinner.start("Checking internet connection...");
    if let Err(e) = check_connectivity(&client, &config::connectivity_url_from_env()).await {
        spinner.error("Offline");
        return Err(e);
    }
    spinner.stop("Internet connection ok");

    let env_path = env_file::default_env_path()?;
    let api_key = ensure_api_key(&client, &env_path).await?;
    let config = Config::with_api_key(api_key);

    let languages = select_languages()?;
    let base_path = prompt_base_path()?;

    let translator = Translator::load(config, &base_path)?.with_client(client);
    let report = translator.generate(&languages).await;

    let mut summary = Vec::new();
    for (language, path) in report.written() {
        summary.push(format!("✓ {} → {}", language.name(), path.display()));
    }
    for language in report.skipped() {
        summary.push(format!("- {} skipped (base file)", language.name()));
    }
    for (language, error) in report.failures() {
        summary.push(format!("✗ {}: {}", language.name(), error));
    }
    if !summary.is_empty() {
        cliclack::note("Results", summary.join("\n"))?;
    }

    if report.is_success() {
        cliclack::outro("Translation complete.")?;
    } else {
        let failed: Vec<_> = report
            .failures()
            .iter()
            .map(|(lang, _)| lang.file_name())
            .collect();
        cliclack::outro_cancel(format!(
            "Translation generation failed for: {}",
            failed.join(", ")
        ))?;
    }

    Ok(ExitCode::from(report.exit_status()))
}

fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")
}

/// Return a usable API key, asking for one if none is configured or the
/// user wants to replace it. New keys are verified, then saved to `env_path`.
async fn ensure_api_key(client: &reqwest::Client, env_path: &Path) -> Result<String> {
    if let Some(existing) = config::api_key_from_env() {
        let update: bool = cliclack::confirm("Do you want to update the API key?")
            .initial_value(false)
            .interact()?;
        if !update {
            return Ok(existing);
        }
    }

    let key: String = cliclack::password("Enter your Gemini API key")
        .mask('▪')
        .validate(|input: &String| {
            if input.trim().is_empty() {
                Err("Please enter a valid API key.")
            } else {
                Ok(())
            }
        })
        .interact()?;
    let key = key.trim().to_string();

    let spinner = cliclack::spinner();
    spinner.start("Verifying API key...");
    match gemini::verify_api_key(client, &Config::with_api_key(key.clone())).await {
        KeyCheck::Valid => spinner.stop("API key verified"),
        KeyCheck::Invalid => {
            spinner.error("API key rejected");
            bail!("Invalid API key.");
        }
        KeyCheck::Inconclusive(reason) => {
            spinner.stop("API key not verified");
            cliclack::log::warning(format!("Could not verify the API key: {}", reason))?;
        }
    }

    env_file::persist_api_key(env_path, &key)?;
    info!("API key saved to {}", env_path.display());
    cliclack::log::success("API key added.")?;

    Ok(key)
}

fn select_languages() -> Result<Vec<Language>> {
    let all = Language::all();

    let mut prompt = cliclack::multiselect(
        "Select the languages you want to generate translations for:",
    )
    .initial_values(all.clone())
    .required(true);
    for language in &all {
        prompt = prompt.item(*language, language.name(), language.native_name());
    }

    Ok(prompt.interact()?)
}

fn prompt_base_path() -> Result<PathBuf> {
    let path: String =
        cliclack::input("Enter the path of the file containing the base translations:")
            .placeholder("./locales/en.json")
            .validate(|input: &String| validate_base_path(input))
            .interact()?;

    Ok(PathBuf::from(path.trim()))
}

fn validate_base_path(input: &str) -> Result<(), &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Please enter a valid path.");
    }
    let path = Path::new(input);
    if !path.exists() {
        return Err("The specified path does not exist.");
    }
    if !path.is_file() {
        return Err("The specified path is not a file.");
    }
    Ok(())
}
