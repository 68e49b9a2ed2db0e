use serde::Deserialize;
use std::{collections::HashMap, time::Duration};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_DEVICE_ID: &str = "4827E2E8B1AC";

/// Settings read once at startup and passed into the relay loop.
///
/// Field names map onto the environment keys the relay has always used
/// (`AWS_FUNCTION_URL`, `THINGSBOARD_ACCESS_TOKEN`, ...).
#[derive(Deserialize, Clone)]
pub struct RelayCfg {
    #[serde(rename = "aws_function_url")]
    pub source_url: String,
    #[serde(rename = "aws_auth_token")]
    pub source_token: String,
    #[serde(rename = "thingsboard_base_url")]
    pub destination_base_url: String,
    #[serde(rename = "thingsboard_access_token")]
    pub destination_token: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_device_id")]
    pub device_id: String,
}

// Tokens stay out of logs.
impl std::fmt::Debug for RelayCfg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayCfg")
            .field("source_url", &self.source_url)
            .field("source_token", &"<redacted>")
            .field("destination_base_url", &self.destination_base_url)
            .field("destination_token", &"<redacted>")
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("device_id", &self.device_id)
            .finish()
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_device_id() -> String {
    DEFAULT_DEVICE_ID.into()
}

impl RelayCfg {
    /// Reads the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_builder(build_config(None)?)
    }

    /// Reads an explicit key/value map instead of the process environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> anyhow::Result<Self> {
        Self::from_builder(build_config(Some(vars))?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.source_url.trim().is_empty(),
            "AWS_FUNCTION_URL cannot be empty"
        );
        anyhow::ensure!(
            !self.source_token.trim().is_empty(),
            "AWS_AUTH_TOKEN cannot be empty"
        );
        anyhow::ensure!(
            !self.destination_base_url.trim().is_empty(),
            "THINGSBOARD_BASE_URL cannot be empty"
        );
        anyhow::ensure!(
            !self.destination_token.trim().is_empty(),
            "THINGSBOARD_ACCESS_TOKEN cannot be empty"
        );
        anyhow::ensure!(self.poll_interval_ms > 0, "POLL_INTERVAL_MS must be > 0");
        anyhow::ensure!(!self.device_id.trim().is_empty(), "DEVICE_ID cannot be empty");
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn destination_url(&self) -> String {
        format!(
            "{}/api/v1/{}/telemetry",
            self.destination_base_url.trim_end_matches('/'),
            self.destination_token
        )
    }

    fn from_builder(cfg: config::Config) -> anyhow::Result<Self> {
        let cfg: Self = cfg.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn build_config(vars: Option<HashMap<String, String>>) -> anyhow::Result<config::Config> {
    use config::{Config, Environment};
    let env = Environment::default().ignore_empty(true).source(vars);
    Ok(Config::builder().add_source(env).build()?)
}
