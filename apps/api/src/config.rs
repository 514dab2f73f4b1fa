use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// Where uploaded files are parked while an upload is processed.
    pub upload_dir: PathBuf,
    /// Where rendered `{id}_revised.pdf` files are written.
    pub output_dir: PathBuf,
    pub pdf_renderer_bin: String,
    pub pdf_renderer_args: Vec<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            upload_dir: env_or("UPLOAD_DIR", "./data/uploads").into(),
            output_dir: env_or("OUTPUT_DIR", "./data/output").into(),
            pdf_renderer_bin: env_or("PDF_RENDERER_BIN", "wkhtmltopdf"),
            pdf_renderer_args: split_args(&env_or("PDF_RENDERER_ARGS", "--quiet")),
            max_upload_bytes: parse_max_upload(std::env::var("MAX_UPLOAD_BYTES").ok())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(String::from).collect()
}

fn parse_max_upload(raw: Option<String>) -> Result<usize> {
    match raw {
        Some(v) => v
            .trim()
            .parse::<usize>()
            .context("MAX_UPLOAD_BYTES must be a positive integer"),
        None => Ok(DEFAULT_MAX_UPLOAD_BYTES),
    }
}
