use std::time::Duration;

use crossbeam_channel::Receiver;
use eframe::{egui, Frame};
use log::info;

use super::handlers::TelemetryHandler;
use super::state::AppState;
use crate::config::ConfigManager;
use crate::types::TelemetryEvent;

pub struct DashboardApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: ConfigManager,
}

impl DashboardApp {
    pub fn new(telemetry_receiver: Receiver<TelemetryEvent>, config: ConfigManager) -> Self {
        let state = AppState::new(telemetry_receiver, config.get_config());

        info!("Dashboard ready, waiting for telemetry on '{}'", state.link.topic);

        DashboardApp { state, config }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        // 先处理数据，再渲染
        TelemetryHandler::handle_incoming(self);

        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_bottom_status_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);

        ctx.request_repaint_after(Duration::from_millis(150));
    }
}
