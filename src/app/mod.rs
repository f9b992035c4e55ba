pub mod handlers;
pub mod sensor_app;
pub mod state;
pub mod theme;
pub mod ui;

pub use sensor_app::DashboardApp;
