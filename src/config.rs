use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值和配置验证

/// 主配置结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub mqtt: MqttConfig,
    pub dashboard: DashboardConfig,
    pub map: MapConfig,
    pub chart: ChartConfig,
    pub channels: ChannelConfig,
}

/// 窗口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
    pub hardware_acceleration: bool,
}

/// MQTT配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub broker: String,
    pub port: u16,
    pub client_id_prefix: String,
    pub topic: String,
    pub qos: u8,
    pub keep_alive: u16,
}

/// Core session limits and the 3D view response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dedup_capacity: usize,
    pub trend_capacity: usize,
    /// Radians of rotation for a 1.0 tilt reading.
    pub rotation_scale: f32,
    /// Fraction of the remaining distance covered per frame.
    pub rotation_smoothing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    /// Half-width of the visible area in degrees.
    pub span_degrees: f64,
    pub marker_radius: f32,
    pub marker_color: [u8; 3],
    pub height: f32,
}

/// 绘图配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub y_min: f64,
    pub y_max: f64,
    pub height: f32,
    pub colors: ChartColors,
}

/// 绘图颜色配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    pub x_axis: [u8; 3],
    pub y_axis: [u8; 3],
}

/// 通道配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub telemetry_channel_capacity: usize,
    pub mqtt_request_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            mqtt: MqttConfig::default(),
            dashboard: DashboardConfig::default(),
            map: MapConfig::default(),
            chart: ChartConfig::default(),
            channels: ChannelConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 820.0,
            title: "TiltWatch - Telemetry Dashboard".to_string(),
            resizable: true,
            vsync: true,
            hardware_acceleration: true,
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker: "localhost".to_string(),
            port: 1883,
            client_id_prefix: "tiltwatch".to_string(),
            topic: "sensor_data".to_string(),
            qos: 1,
            keep_alive: 5,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dedup_capacity: 50,
            trend_capacity: 10,
            rotation_scale: std::f32::consts::FRAC_PI_2,
            rotation_smoothing: 0.1,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: -1.286389,
            center_lon: 36.817223,
            span_degrees: 0.05,
            marker_radius: 10.0,
            marker_color: [0x00, 0xff, 0x88],
            height: 260.0,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            y_min: -2.0,
            y_max: 2.0,
            height: 220.0,
            colors: ChartColors::default(),
        }
    }
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            x_axis: [0x00, 0xff, 0x88],
            y_axis: [0x00, 0xa3, 0x5c],
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            telemetry_channel_capacity: 1000,
            mqtt_request_capacity: 10,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.dashboard.dedup_capacity == 0 {
            return Err(ConfigError::ValidationError("Dedup capacity must be positive".to_string()));
        }

        if self.dashboard.trend_capacity == 0 {
            return Err(ConfigError::ValidationError("Trend capacity must be positive".to_string()));
        }

        if !(self.dashboard.rotation_smoothing > 0.0 && self.dashboard.rotation_smoothing <= 1.0) {
            return Err(ConfigError::ValidationError("Rotation smoothing must be in (0, 1]".to_string()));
        }

        if self.chart.y_min >= self.chart.y_max {
            return Err(ConfigError::ValidationError("Chart y_min must be below y_max".to_string()));
        }

        if self.mqtt.qos > 2 {
            return Err(ConfigError::ValidationError(format!("Invalid MQTT QoS level: {}", self.mqtt.qos)));
        }

        if self.mqtt.topic.is_empty() {
            return Err(ConfigError::ValidationError("MQTT topic must not be empty".to_string()));
        }

        if self.channels.telemetry_channel_capacity == 0 || self.channels.mqtt_request_capacity == 0 {
            return Err(ConfigError::ValidationError("Channel capacities must be positive".to_string()));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
pub struct ConfigManager {
    config: AppConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建配置管理器
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            config_path: None,
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self {
            config,
            config_path: Some(path.as_ref().to_path_buf()),
        })
    }

    /// Loads `path` when it exists, otherwise falls back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::new())
        }
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
