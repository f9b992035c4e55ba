pub mod telemetry_event;

pub use telemetry_event::TelemetryEvent;
