use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::config::RelayCfg;
use crate::domain::RelayPayload;
use crate::error::RelayError;
use crate::sink::{HttpSink, Sink};
use crate::source::{HttpSource, Source};

#[derive(Debug)]
pub enum CycleOutcome {
    Delivered,
    /// The reading lacked a truthy `temperature` or `humidity`.
    Skipped,
    Failed(RelayError),
}

/// Relays readings for one device from a [`Source`] to a [`Sink`].
#[derive(Clone)]
pub struct Poller {
    source: Arc<dyn Source>,
    sink: Arc<dyn Sink>,
    device_id: Arc<str>,
    interval: Duration,
}

impl Poller {
    pub fn new(
        source: Arc<dyn Source>,
        sink: Arc<dyn Sink>,
        device_id: impl Into<Arc<str>>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            device_id: device_id.into(),
            interval,
        }
    }

    /// Wires the HTTP source and sink described by `cfg` onto one shared client.
    pub fn from_cfg(cfg: &RelayCfg) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let source = HttpSource::new(client.clone(), &cfg.source_url, &cfg.source_token);
        let sink = HttpSink::new(client, cfg.destination_url());
        Ok(Self::new(
            Arc::new(source),
            Arc::new(sink),
            cfg.device_id.as_str(),
            cfg.poll_interval(),
        ))
    }

    /// Runs one fetch/validate/deliver cycle. Every outcome is logged here;
    /// errors never escape.
    pub async fn poll_device_telemetry(&self, device_id: &str) -> CycleOutcome {
        match self.relay_once(device_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                match &e {
                    RelayError::Status { status, body } => {
                        tracing::error!(device_id, status = status.as_u16(), %body, "relay failed")
                    }
                    RelayError::Transport(err) => {
                        tracing::error!(device_id, error = %err, "error polling telemetry")
                    }
                }
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn relay_once(&self, device_id: &str) -> Result<CycleOutcome, RelayError> {
        let reading = self.source.fetch(device_id).await?;

        let Some(payload) = RelayPayload::from_reading(&reading) else {
            tracing::warn!(device_id, body = %reading, "invalid telemetry data");
            return Ok(CycleOutcome::Skipped);
        };
        tracing::info!(device_id, body = %reading, "received telemetry");

        self.sink.send(&payload).await?;
        tracing::info!(device_id, "telemetry sent to destination");
        Ok(CycleOutcome::Delivered)
    }

    /// Polls forever. The first cycle starts one full interval after the call,
    /// then one per interval. Each cycle runs in its own task, so a slow cycle
    /// can overlap the next one.
    pub async fn start_polling(self) {
        tracing::info!(device_id = %self.device_id, "starting telemetry polling");

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            "polling source every interval"
        );

        loop {
            ticker.tick().await;
            let poller = self.clone();
            tokio::spawn(async move {
                let device_id = poller.device_id.clone();
                poller.poll_device_telemetry(&device_id).await;
            });
        }
    }
}
