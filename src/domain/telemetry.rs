use serde::Serialize;
use serde_json::Value;

/// Body accepted by the destination's device telemetry API.
///
/// Readings are relayed as the JSON values the source produced, so numbers
/// keep their original representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<Value>,
    pub values: TelemetryValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryValues {
    pub temperature: Value,
    pub humidity: Value,
}

impl RelayPayload {
    /// Builds the payload from a raw reading, or returns `None` when the
    /// reading lacks a truthy `temperature` or `humidity`.
    pub fn from_reading(reading: &Value) -> Option<Self> {
        let temperature = reading.get("temperature").filter(|v| is_truthy(v))?;
        let humidity = reading.get("humidity").filter(|v| is_truthy(v))?;

        Some(Self {
            ts: reading.get("timestamp").cloned(),
            values: TelemetryValues {
                temperature: temperature.clone(),
                humidity: humidity.clone(),
            },
        })
    }
}

/// Loose JSON truthiness: `null`, `false`, `0`, and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
