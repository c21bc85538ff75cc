use std::env;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    /// Upstream endpoint returning the work-hours policy JSON.
    /// Unset means the service runs on the configured defaults only.
    pub policy_api_url: Option<String>,
    pub policy_cache_ttl_secs: u64,

    // Fallback policy when the upstream fetch fails or is unset
    pub default_required_hours: u32,
    pub default_work_end: String,

    // Rate limiting
    pub rate_dtr_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),

            policy_api_url: env::var("POLICY_API_URL").ok(),
            policy_cache_ttl_secs: env::var("POLICY_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string()) // default 5 min
                .parse()
                .unwrap(),

            default_required_hours: env::var("DEFAULT_REQUIRED_HOURS")
                .unwrap_or_else(|_| "6".to_string())
                .parse()
                .unwrap(),
            default_work_end: env::var("DEFAULT_WORK_END")
                .unwrap_or_else(|_| "16:30".to_string()),

            rate_dtr_per_min: env::var("RATE_DTR_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }
}
