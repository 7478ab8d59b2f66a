pub mod cli;
pub mod config;
pub mod connectivity;
pub mod env_file;
pub mod extract;
pub mod gemini;
pub mod i18n;
pub mod prompt;
pub mod retry;
pub mod translator;
