use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay::config::RelayCfg;
use relay::poller::Poller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = match RelayCfg::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "missing required configuration");
            return Err(e.context("missing required configuration"));
        }
    };
    tracing::debug!(?cfg, "configuration loaded");

    let poller = Poller::from_cfg(&cfg).context("failed to build http client")?;
    poller.start_polling().await;
    Ok(())
}
