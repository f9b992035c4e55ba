pub mod dedup;
pub mod orientation;
pub mod trend;

pub use dedup::{Admission, EventDeduplicator};
pub use orientation::{Orientation, OrientationTarget};
pub use trend::TrendBuffer;

use std::sync::Arc;

use log::{debug, trace};

use crate::config::DashboardConfig;
use crate::types::TelemetryEvent;

/// Values shown by the numeric readouts and the alert indicator.
/// Every accepted event overwrites them; the position carries over when the
/// event reports none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readout {
    pub mode: String,
    pub ax: f64,
    pub ay: f64,
    pub gforce: f64,
    pub alert: bool,
    pub vibration: Option<u8>,
    pub position: Option<(f64, f64)>,
    pub last_label: String,
}

impl Readout {
    /// Readout text for a numeric field, exactly as received.
    pub fn display_value(value: f64) -> String {
        value.to_string()
    }

    pub fn ax_text(&self) -> String {
        Self::display_value(self.ax)
    }

    pub fn ay_text(&self) -> String {
        Self::display_value(self.ay)
    }

    pub fn gforce_text(&self) -> String {
        Self::display_value(self.gforce)
    }

    pub fn alert_text(&self) -> &'static str {
        if self.alert {
            "STATUS: ALERT"
        } else {
            "STATUS: SECURE"
        }
    }
}

/// Dispatch outcome counters, with discards split by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub accepted: u64,
    pub sentinels: u64,
    pub duplicates: u64,
}

/// Everything the dashboard remembers about the current telemetry stream.
pub struct SessionState {
    dedup: EventDeduplicator,
    trend: TrendBuffer,
    orientation: Arc<OrientationTarget>,
    rotation_scale: f32,
    readout: Option<Readout>,
    stats: DispatchStats,
}

impl SessionState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dedup: EventDeduplicator::new(config.dedup_capacity),
            trend: TrendBuffer::new(config.trend_capacity),
            orientation: Arc::new(OrientationTarget::new()),
            rotation_scale: config.rotation_scale,
            readout: None,
            stats: DispatchStats::default(),
        }
    }

    /// Applies one inbound event. Returns false when the event was discarded,
    /// in which case nothing but the rejection counter changed.
    pub fn dispatch(&mut self, event: &TelemetryEvent) -> bool {
        match self.dedup.admit(event) {
            Admission::Accepted => {}
            Admission::Sentinel => {
                self.stats.sentinels += 1;
                trace!("Discarded sentinel event (mode {})", event.mode);
                return false;
            }
            Admission::Duplicate => {
                self.stats.duplicates += 1;
                trace!("Discarded duplicate event {}", event.id);
                return false;
            }
        }
        self.stats.accepted += 1;

        self.orientation
            .store(Orientation::from_tilt(event.ax, event.ay, self.rotation_scale));

        let label = event.timestamp.to_string();
        let position = event
            .position()
            .or_else(|| self.readout.as_ref().and_then(|r| r.position));
        self.readout = Some(Readout {
            mode: event.mode.clone(),
            ax: event.ax,
            ay: event.ay,
            gforce: event.gforce,
            alert: event.alert,
            vibration: event.vibration,
            position,
            last_label: label.clone(),
        });

        self.trend.push(label, event.ax, event.ay);

        debug!(
            "Event {} accepted - ax: {:.2}, ay: {:.2}, g: {:.2}, alert: {}",
            event.id, event.ax, event.ay, event.gforce, event.alert
        );
        true
    }

    pub fn dedup(&self) -> &EventDeduplicator {
        &self.dedup
    }

    pub fn trend(&self) -> &TrendBuffer {
        &self.trend
    }

    /// Shared handle for the renderer side.
    pub fn orientation(&self) -> Arc<OrientationTarget> {
        Arc::clone(&self.orientation)
    }

    /// `None` until the first event is accepted.
    pub fn readout(&self) -> Option<&Readout> {
        self.readout.as_ref()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }
}
