use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

/// Hiring platforms the brand competes with; articles must never link to them.
const DEFAULT_COMPETITOR_DOMAINS: &[&str] = &[
    "toptal.com",
    "upwork.com",
    "fiverr.com",
    "arc.dev",
    "turing.com",
    "gun.io",
    "hired.com",
    "andela.com",
    "x-team.com",
    "codementor.io",
    "freelancer.com",
    "peopleperhour.com",
    "guru.com",
];

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Links containing this domain count as internal.
    pub own_site_domain: String,
    pub brand_name: String,
    pub competitor_domains: Vec<String>,
    /// Root for `terms/` and `templates/`.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            own_site_domain: std::env::var("OWN_SITE_DOMAIN")
                .unwrap_or_else(|_| "lemon.io".to_string()),
            brand_name: std::env::var("BRAND_NAME").unwrap_or_else(|_| "Lemon.io".to_string()),
            competitor_domains: competitor_domains(std::env::var("COMPETITOR_DOMAINS").ok()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

pub fn default_competitor_domains() -> Vec<String> {
    DEFAULT_COMPETITOR_DOMAINS
        .iter()
        .map(|d| d.to_string())
        .collect()
}

/// An unset or empty override keeps the default list; the denylist is never empty.
fn competitor_domains(raw: Option<String>) -> Vec<String> {
    let Some(raw) = raw else {
        return default_competitor_domains();
    };
    let domains = parse_domain_list(&raw);
    if domains.is_empty() {
        warn!("COMPETITOR_DOMAINS is set but lists no domains; using the defaults");
        return default_competitor_domains();
    }
    domains
}

/// Comma-separated domains; blanks are dropped so one can never match every URL.
fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}
