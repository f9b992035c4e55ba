use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::app::theme::Theme;
use crate::app::ui::device_view::DeviceView;
use crate::config::AppConfig;
use crate::session::SessionState;
use crate::types::TelemetryEvent;

/// How long after the last accepted event the stream counts as stale.
pub const STALE_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Waiting,
    Live,
    Stale,
}

/// 连接状态
#[derive(Debug, Clone, Default)]
pub struct LinkState {
    pub last_accepted_at: Option<Instant>,
    pub broker: String,
    pub topic: String,
}

impl LinkState {
    pub fn status_at(&self, now: Instant) -> LinkStatus {
        match self.last_accepted_at {
            None => LinkStatus::Waiting,
            Some(at) if now.saturating_duration_since(at) > STALE_AFTER => LinkStatus::Stale,
            Some(_) => LinkStatus::Live,
        }
    }
}

/// 数据通道状态
#[derive(Debug)]
pub struct DataChannels {
    pub telemetry_receiver: Receiver<TelemetryEvent>,
}

/// 统一的应用状态管理
pub struct AppState {
    pub session: SessionState,
    pub device_view: DeviceView,
    pub theme: Theme,
    pub link: LinkState,
    pub channels: DataChannels,
}

impl AppState {
    pub fn new(telemetry_receiver: Receiver<TelemetryEvent>, config: &AppConfig) -> Self {
        let session = SessionState::new(&config.dashboard);
        let device_view = DeviceView::new(session.orientation(), config.dashboard.rotation_smoothing);

        Self {
            session,
            device_view,
            theme: Theme::default(),
            link: LinkState {
                last_accepted_at: None,
                broker: format!("{}:{}", config.mqtt.broker, config.mqtt.port),
                topic: config.mqtt.topic.clone(),
            },
            channels: DataChannels { telemetry_receiver },
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn link_status(&self) -> LinkStatus {
        self.link.status_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_goes_stale_without_accepted_events() {
        let now = Instant::now();
        let mut link = LinkState::default();
        assert_eq!(link.status_at(now), LinkStatus::Waiting);

        link.last_accepted_at = Some(now);
        assert_eq!(link.status_at(now + Duration::from_secs(1)), LinkStatus::Live);
        assert_eq!(link.status_at(now + STALE_AFTER + Duration::from_millis(1)), LinkStatus::Stale);
    }

    #[test]
    fn theme_toggle_flips_state() {
        let (_tx, rx) = crossbeam_channel::bounded(1);
        let mut state = AppState::new(rx, &AppConfig::default());
        assert_eq!(state.theme, Theme::Dark);
        state.toggle_theme();
        assert_eq!(state.theme, Theme::Light);
    }
}
