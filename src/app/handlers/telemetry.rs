use std::time::Instant;

use crate::app::sensor_app::DashboardApp;

pub struct TelemetryHandler;

impl TelemetryHandler {
    /// Drains everything the transport queued since the last frame, in arrival order.
    /// Returns how many events were accepted.
    pub fn handle_incoming(app: &mut DashboardApp) -> usize {
        let mut accepted = 0;
        while let Ok(event) = app.state.channels.telemetry_receiver.try_recv() {
            if app.state.session.dispatch(&event) {
                accepted += 1;
            }
        }
        if accepted > 0 {
            app.state.link.last_accepted_at = Some(Instant::now());
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::types::TelemetryEvent;

    #[test]
    fn drains_channel_and_skips_rejected_events() {
        let (tx, rx) = crossbeam_channel::bounded(16);
        let mut app = DashboardApp::new(rx, ConfigManager::new());

        for id in [1, 2, -1, 3, 2] {
            tx.send(TelemetryEvent::new(id, "HARDWARE", 0.0, 0.0, 0.0, false, "t")).unwrap();
        }

        assert_eq!(TelemetryHandler::handle_incoming(&mut app), 3);
        assert!(app.state.channels.telemetry_receiver.is_empty());
        assert_eq!(app.state.session.trend().len(), 3);
        assert!(app.state.link.last_accepted_at.is_some());
    }

    #[test]
    fn only_rejected_events_leave_link_untouched() {
        let (tx, rx) = crossbeam_channel::bounded(4);
        let mut app = DashboardApp::new(rx, ConfigManager::new());
        tx.send(TelemetryEvent::new(-1, "OFFLINE", 0.0, 0.0, 0.0, false, "t")).unwrap();

        assert_eq!(TelemetryHandler::handle_incoming(&mut app), 0);
        assert!(app.state.link.last_accepted_at.is_none());
    }
}
