use anyhow::{bail, Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 3600;

/// Application configuration loaded from environment variables.
/// Fails at startup if an optional variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server-wide fallback credential. Sessions may bring their own.
    pub google_api_key: Option<String>,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_base_url: String,
    pub llm_timeout_secs: u64,
    /// Interviews untouched for this long are dropped from memory.
    pub session_idle_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: optional_env("GOOGLE_API_KEY"),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_temperature: parse_temperature(optional_env("LLM_TEMPERATURE").as_deref())?,
            llm_base_url: optional_env("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            session_idle_ttl_secs: parse_idle_ttl(optional_env("SESSION_IDLE_TTL_SECS").as_deref())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating blank values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_temperature(raw: Option<&str>) -> Result<f32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TEMPERATURE);
    };
    let value = raw
        .parse::<f32>()
        .with_context(|| format!("LLM_TEMPERATURE '{raw}' is not a number"))?;
    if !(0.0..=2.0).contains(&value) {
        bail!("LLM_TEMPERATURE must be between 0.0 and 2.0, got {value}");
    }
    Ok(value)
}

fn parse_idle_ttl(raw: Option<&str>) -> Result<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_IDLE_TTL_SECS);
    };
    let secs = raw
        .parse::<u64>()
        .with_context(|| format!("SESSION_IDLE_TTL_SECS '{raw}' is not a whole number of seconds"))?;
    if secs == 0 {
        bail!("SESSION_IDLE_TTL_SECS must be greater than zero");
    }
    Ok(secs)
}
