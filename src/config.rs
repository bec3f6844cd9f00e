use anyhow::{Context, Result};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// User-scoped refresh credential; app-only access when absent
    pub refresh_token: Option<String>,
    pub auth_url: String,
    pub api_url: String,
    pub timeout_secs: u64,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Build configuration from any key lookup, treating empty values as unset
pub fn config_from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let (client_id, client_secret) = match (
        get("SPOTIFY_CLIENT_ID"),
        get("SPOTIFY_CLIENT_SECRET"),
    ) {
        (Some(id), Some(secret)) => (id, secret),
        _ => anyhow::bail!(
            "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET environment variables are required"
        ),
    };

    let timeout_secs = match get("MOOD_ANALYST_TIMEOUT_SECS") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("MOOD_ANALYST_TIMEOUT_SECS is not a number: {raw}"))?,
        None => DEFAULT_TIMEOUT_SECS,
    };
    if timeout_secs == 0 {
        anyhow::bail!("MOOD_ANALYST_TIMEOUT_SECS must be at least 1");
    }

    Ok(Config {
        client_id,
        client_secret,
        refresh_token: get("SPOTIFY_REFRESH_TOKEN"),
        auth_url: get("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
        api_url: get("SPOTIFY_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        timeout_secs,
    })
}
