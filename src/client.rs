use std::time::Duration;

use anyhow::{Context, Result};
use moka::future::Cache;

use crate::config::Config;
use crate::model::policy::{EffectivePolicy, PolicySource, WorkHoursPolicyDto};

const POLICY_CACHE_KEY: &str = "work-hours";

/// Fetches the work-hours policy from the upstream attendance API, with a
/// short-TTL cache in front so each request does not re-fetch. Fetch
/// failures are returned to the caller; falling back to defaults is the
/// handler's decision, not this client's.
#[derive(Clone)]
pub struct PolicyClient {
    http: reqwest::Client,
    policy_api_url: Option<String>,
    cache: Cache<&'static str, EffectivePolicy>,
}

impl PolicyClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");

        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(config.policy_cache_ttl_secs))
            .build();

        Self {
            http,
            policy_api_url: config.policy_api_url.clone(),
            cache,
        }
    }

    /// The upstream policy, from cache when fresh. `Ok(None)` means no
    /// upstream is configured; `Err` means the configured upstream could
    /// not produce a usable policy.
    pub async fn effective_policy(&self) -> Result<Option<EffectivePolicy>> {
        let Some(url) = self.policy_api_url.as_deref() else {
            return Ok(None);
        };

        if let Some(policy) = self.cache.get(POLICY_CACHE_KEY).await {
            return Ok(Some(policy));
        }

        let policy = self.fetch(url).await?;
        self.cache.insert(POLICY_CACHE_KEY, policy).await;
        Ok(Some(policy))
    }

    async fn fetch(&self, url: &str) -> Result<EffectivePolicy> {
        let dto = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?
            .json::<WorkHoursPolicyDto>()
            .await
            .context("decoding work-hours policy body")?;

        let policy = EffectivePolicy::from_dto(&dto, PolicySource::Upstream)
            .context("validating work-hours policy")?;

        tracing::debug!(
            required_minutes = policy.required_minutes,
            work_end = %policy.work_end,
            "Fetched work-hours policy"
        );
        Ok(policy)
    }

    /// Warm the cache at startup so the first request does not pay the
    /// fetch latency. Failure is fine here; requests fall back per call.
    pub async fn warmup(&self) -> Result<()> {
        match self.effective_policy().await? {
            Some(_) => tracing::info!("Work-hours policy cache warmed"),
            None => tracing::info!("No POLICY_API_URL set, using default work-hours policy"),
        }
        Ok(())
    }
}
