use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use dotenv::dotenv;
use log::{debug, error, info, warn};
use rumqttc::{Client, ClientError, Event, MqttOptions, Packet, QoS};

use crate::config::MqttConfig;
use crate::types::TelemetryEvent;

const RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid MQTT_PORT value '{0}'")]
    InvalidPort(String),
    #[error("Invalid QoS level: {0}")]
    InvalidQos(u8),
    #[error("MQTT client error: {0}")]
    Client(#[from] ClientError),
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broker settings after `.env` / environment overrides.
#[derive(Debug, Clone, PartialEq)]
struct BrokerSettings {
    host: String,
    port: u16,
    credentials: Option<(String, String)>,
}

fn broker_settings(config: &MqttConfig) -> Result<BrokerSettings, TransportError> {
    dotenv().ok(); // 加载 .env 文件

    let host = env::var("MQTT_HOST").unwrap_or_else(|_| config.broker.clone());
    let port = match env::var("MQTT_PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|_| TransportError::InvalidPort(raw))?,
        Err(_) => config.port,
    };
    let credentials = match (env::var("MQTT_USER"), env::var("MQTT_PASS")) {
        (Ok(user), Ok(pass)) => Some((user, pass)),
        _ => None,
    };

    Ok(BrokerSettings { host, port, credentials })
}

fn qos_level(level: u8) -> Result<QoS, TransportError> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(TransportError::InvalidQos(other)),
    }
}

/// Subscribes to the telemetry topic and forwards every decodable payload
/// until `shutdown_signal` is raised or the receiving side goes away.
pub fn run_mqtt_client(
    config: MqttConfig,
    request_capacity: usize,
    event_sender: Sender<TelemetryEvent>,
    shutdown_signal: Arc<AtomicBool>,
) -> Result<(), TransportError> {
    let settings = broker_settings(&config)?;
    let qos = qos_level(config.qos)?;

    let client_id = format!("{}-{:04x}", config.client_id_prefix, rand::random::<u16>());
    info!(
        "Connecting to MQTT broker {}:{} as {}",
        settings.host, settings.port, client_id
    );

    let mut mqtt_options = MqttOptions::new(client_id, settings.host, settings.port);
    if let Some((user, pass)) = settings.credentials {
        mqtt_options.set_credentials(user, pass);
    }
    mqtt_options.set_keep_alive(Duration::from_secs(config.keep_alive as u64));

    let (client, mut connection) = Client::new(mqtt_options, request_capacity);
    client.subscribe(config.topic.as_str(), qos)?;

    for event in connection.iter() {
        // 检查关闭信号
        if shutdown_signal.load(Ordering::Relaxed) {
            info!("MQTT thread received shutdown signal, exiting gracefully");
            break;
        }

        match event {
            Ok(Event::Incoming(Packet::Publish(publish))) if publish.topic == config.topic => {
                match parse_telemetry(&publish.payload) {
                    Ok(telemetry) => {
                        if event_sender.send(telemetry).is_err() {
                            // 通道断开表示GUI已关闭，优雅退出
                            info!("Telemetry channel disconnected, MQTT thread exiting");
                            break;
                        }
                    }
                    Err(e) => warn!("Invalid telemetry payload: {}", e),
                }
            }
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                info!("Connected, subscribed to '{}'", config.topic);
            }
            Ok(_) => {}
            Err(e) => {
                // The event loop reconnects on the next poll and replays the subscription.
                error!("MQTT connection error: {}", e);
                thread::sleep(RECONNECT_DELAY);
            }
        }
    }

    if let Err(e) = client.disconnect() {
        debug!("Disconnect request not delivered: {}", e);
    }
    Ok(())
}

pub fn parse_telemetry(payload: &[u8]) -> Result<TelemetryEvent, PayloadError> {
    let payload_str = std::str::from_utf8(payload)?;
    Ok(serde_json::from_str::<TelemetryEvent>(payload_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_payload() {
        let payload = br#"{"id": 5, "mode": "HARDWARE", "ax": 0.05, "ay": 0.9,
                           "gforce": 0.9, "alert": false, "timestamp": "08:15:00:042"}"#;
        let event = parse_telemetry(payload).unwrap();
        assert_eq!(event.id, 5);
        assert_eq!(event.ay, 0.9);
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = parse_telemetry(&[0x7b, 0xff, 0xfe, 0x7d]).unwrap_err();
        assert!(matches!(err, PayloadError::Utf8(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_telemetry(b"offline").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
        assert!(err.to_string().starts_with("JSON parsing error"));
    }

    #[test]
    fn maps_qos_levels() {
        assert_eq!(qos_level(0).unwrap(), QoS::AtMostOnce);
        assert_eq!(qos_level(2).unwrap(), QoS::ExactlyOnce);
        assert!(matches!(qos_level(3), Err(TransportError::InvalidQos(3))));
    }
}
