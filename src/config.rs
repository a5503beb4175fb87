// src/config.rs
use crate::constants::{DEFAULT_FETCH_RETRIES, DEFAULT_FETCH_TIMEOUT_MS};
use crate::error::AppError;
use crate::paths::BasePath;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Validated content API base URL (e.g. `https://cms.example.org/wp-json/wp/v2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Parses and validates the base URL; only http(s) is accepted. A
    /// trailing slash is dropped so endpoint paths concatenate cleanly.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let parsed = Url::parse(input).map_err(|e| AppError::InvalidApiBase {
            url: input.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::InvalidApiBase {
                url: input.to_string(),
                reason: "only HTTP and HTTPS URLs are supported".to_string(),
            });
        }
        Ok(Self(input.trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Path to the parsed catalog JSON (sequence, colors, root links)
    pub catalog: String,

    /// Directory receiving the per-route view-model files
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Base path prefix for internal links (e.g. "/knowledge/app3")
    #[arg(long)]
    pub base_path: Option<String>,

    /// Content API base URL (e.g. "https://cms.example.org/wp-json/wp/v2")
    #[arg(long)]
    pub api_base: Option<String>,

    /// Per-attempt fetch timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Transport-failure retries after the first attempt
    #[arg(long)]
    pub retries: Option<u32>,

    /// Generate a single route: the content id to resolve
    #[arg(long)]
    pub id: Option<String>,

    /// Requested language for single-route generation (defaults to fallback order)
    #[arg(long)]
    pub lang: Option<String>,

    /// Pipe mode - print view-models to stdout instead of writing files
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved pipeline configuration — validated and fixed for the lifetime
/// of the process.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub catalog_path: PathBuf,
    pub out_dir: PathBuf,
    pub base_path: BasePath,
    pub api_base: ApiBase,
    pub timeout_ms: u64,
    pub retries: u32,
    pub single_id: Option<String>,
    pub requested_lang: Option<String>,
    pub pipe: bool,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and
    /// environment. Precedence per knob: flag, then environment variable,
    /// then built-in default.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_base_str = cli
            .api_base
            .or_else(|| std::env::var("WP_API_BASE").ok())
            .ok_or_else(|| {
                AppError::MissingConfiguration(
                    "content API base URL not set (use --api-base or WP_API_BASE)".to_string(),
                )
            })?;
        let api_base = ApiBase::parse(&api_base_str)?;

        let base_path = cli
            .base_path
            .or_else(|| std::env::var("BASE_PATH").ok())
            .map(BasePath::new)
            .unwrap_or_else(BasePath::root);

        let timeout_ms = cli
            .timeout_ms
            .or_else(|| env_number("WP_TIMEOUT_MS"))
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_MS);

        let retries = cli
            .retries
            .or_else(|| env_number("WP_RETRIES"))
            .unwrap_or(DEFAULT_FETCH_RETRIES);

        Ok(PipelineConfig {
            catalog_path: PathBuf::from(cli.catalog),
            out_dir: PathBuf::from(cli.out_dir),
            base_path,
            api_base,
            timeout_ms,
            retries,
            single_id: cli.id,
            requested_lang: cli.lang,
            pipe: cli.pipe,
            verbose: cli.verbose,
        })
    }
}

/// Numeric environment override; unset and unparseable both mean "absent".
fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
