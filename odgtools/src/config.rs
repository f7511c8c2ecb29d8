use log::*;
use order_dispatch_engine::export::DEFAULT_EXPORT_PATH;

/// Environment configuration for the tools. The engine itself never reads the environment; everything it needs is
/// handed to the collaborators' constructors from here.
#[derive(Debug, Clone)]
pub struct OdgConfig {
    pub database_url: String,
    pub export_path: String,
    /// When set, type B orders are adjudicated by the HTTP decision service at this base URL instead of the
    /// in-process static service.
    pub decision_api_url: Option<String>,
    pub decision_timeout_secs: u64,
}

impl OdgConfig {
    pub fn from_env_or_default() -> Self {
        let database_url = order_dispatch_engine::db_url();
        let export_path = std::env::var("ODG_EXPORT_PATH").unwrap_or_else(|_| {
            info!("🪛️ ODG_EXPORT_PATH not set, using {DEFAULT_EXPORT_PATH}");
            DEFAULT_EXPORT_PATH.to_string()
        });
        let decision_api_url = std::env::var("ODG_DECISION_API_URL").ok();
        let decision_timeout_secs = std::env::var("ODG_DECISION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| {
                info!("🪛️ ODG_DECISION_TIMEOUT_SECS not set, using 10");
                10
            });
        Self { database_url, export_path, decision_api_url, decision_timeout_secs }
    }
}
