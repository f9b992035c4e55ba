use std::fmt;

/// Reserved identifier meaning "no valid reading". Never accepted.
pub const SENTINEL_ID: i64 = -1;

/// Chart label carried by an event, either preformatted text or a raw number.
#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum TimestampLabel {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for TimestampLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampLabel::Text(text) => f.write_str(text),
            TimestampLabel::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<String> for TimestampLabel {
    fn from(text: String) -> Self {
        TimestampLabel::Text(text)
    }
}

impl From<&str> for TimestampLabel {
    fn from(text: &str) -> Self {
        TimestampLabel::Text(text.to_string())
    }
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
pub struct TelemetryEvent {
    pub id: i64,
    pub mode: String,
    pub ax: f64,
    pub ay: f64,
    pub gforce: f64,
    pub alert: bool,
    pub timestamp: TimestampLabel,
    #[serde(default)]
    pub vibration: Option<u8>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl TelemetryEvent {
    #[cfg(test)]
    pub fn new(
        id: i64,
        mode: impl Into<String>,
        ax: f64,
        ay: f64,
        gforce: f64,
        alert: bool,
        timestamp: impl Into<TimestampLabel>,
    ) -> Self {
        Self {
            id,
            mode: mode.into(),
            ax,
            ay,
            gforce,
            alert,
            timestamp: timestamp.into(),
            vibration: None,
            lat: None,
            lon: None,
        }
    }

    #[cfg(test)]
    pub fn with_position(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }

    /// Both coordinates, or nothing when either is missing.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hardware_payload() {
        let json = r#"{
            "id": 42, "ax": 0.12, "ay": -0.3, "vibration": 1,
            "lat": -1.286389, "lon": 36.817223,
            "timestamp": "12:30:01:250", "mode": "HARDWARE",
            "gforce": 0.32, "alert": true
        }"#;
        let event: TelemetryEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, 42);
        assert_eq!(event.mode, "HARDWARE");
        assert_eq!(event.vibration, Some(1));
        assert_eq!(event.position(), Some((-1.286389, 36.817223)));
        assert_eq!(event.timestamp.to_string(), "12:30:01:250");
        assert!(event.alert);
    }

    #[test]
    fn decodes_numeric_timestamp_and_integer_axes() {
        let json = r#"{"id": -1, "mode": "OFFLINE", "ax": 0, "ay": 0,
                       "gforce": 0, "alert": false, "timestamp": 1700000000123}"#;
        let event: TelemetryEvent = serde_json::from_str(json).unwrap();

        assert!(event.is_sentinel());
        assert_eq!(event.ax, 0.0);
        assert_eq!(event.timestamp.to_string(), "1700000000123");
        assert_eq!(event.position(), None);
        assert_eq!(event.vibration, None);
    }

    #[test]
    fn half_a_position_is_no_position() {
        let mut event = TelemetryEvent::new(1, "HARDWARE", 0.0, 0.0, 0.0, false, "t");
        event.lat = Some(1.0);
        assert_eq!(event.position(), None);
    }

    #[test]
    fn missing_required_field_fails() {
        let json = r#"{"id": 3, "mode": "HARDWARE", "ax": 0.1}"#;
        assert!(serde_json::from_str::<TelemetryEvent>(json).is_err());
    }
}
