pub mod telemetry;

pub use telemetry::{RelayPayload, TelemetryValues, is_truthy};
