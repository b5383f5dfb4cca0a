use serde::Deserialize;
use std::path::PathBuf;

/// Default remote API base URL, matching the portal's development backend.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub leads_api_base_url: String,
    /// Endpoint of the externally hosted suggestion model, when configured.
    pub insights_api_url: Option<String>,
    /// Where the session credential obtained at sign-in is stored.
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            leads_api_base_url: std::env::var("LEADS_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
                .trim()
                .to_string(),
            insights_api_url: std::env::var("INSIGHTS_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            session_file: std::env::var("SESSION_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("session.json")),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a valid number"))?,
        };

        if config.leads_api_base_url.is_empty() {
            anyhow::bail!("LEADS_API_BASE_URL cannot be empty");
        }
        if !config.leads_api_base_url.starts_with("http://")
            && !config.leads_api_base_url.starts_with("https://")
        {
            anyhow::bail!("LEADS_API_BASE_URL must start with http:// or https://");
        }
        if let Some(ref url) = config.insights_api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("INSIGHTS_API_URL must start with http:// or https://");
            }
        }
        if config.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Leads API base URL: {}", config.leads_api_base_url);
        if let Some(ref url) = config.insights_api_url {
            tracing::debug!("Insights API URL configured: {}", url);
        }
        tracing::debug!("Session file: {}", config.session_file.display());

        Ok(config)
    }
}
