use eframe::egui;
use log::info;

use crate::app::sensor_app::DashboardApp;
use crate::app::state::LinkStatus;

pub fn render_status_bar(app: &mut DashboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Status:");

                let palette = app.state.theme.palette();
                let (status_text, status_color) = match app.state.link_status() {
                    LinkStatus::Waiting => ("Waiting", egui::Color32::from_rgb(255, 165, 0)), // 橙色
                    LinkStatus::Live => ("Live", palette.success),
                    LinkStatus::Stale => ("Stale", palette.danger),
                };
                ui.colored_label(status_color, status_text);

                ui.separator();

                if let Some(readout) = app.state.session.readout() {
                    ui.label(format!("Mode: {}", readout.mode));
                } else {
                    ui.label("waiting for data...");
                }

                ui.separator();

                let stats = app.state.session.stats();
                ui.label(format!(
                    "Accepted: {}  Sentinel: {}  Duplicate: {}",
                    stats.accepted, stats.sentinels, stats.duplicates
                ));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(app.state.theme.toggle_label()).clicked() {
                        app.state.toggle_theme();
                        info!("Theme switched to {}", app.state.theme.name());
                    }
                });
            });
            ui.add_space(5.0);
        });
}

pub fn render_bottom_status_bar(app: &DashboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("bottom_status_bar")
        .min_height(25.0)
        .show(ctx, |ui| {
            ui.add_space(3.0);
            ui.horizontal(|ui| {
                ui.label(format!("Broker: {}  Topic: {}", app.state.link.broker, app.state.link.topic));
                ui.separator();

                let dedup = app.state.session.dedup();
                ui.label(format!("Seen IDs: {}/{}", dedup.len(), dedup.capacity()));
                ui.separator();

                let trend = app.state.session.trend();
                ui.label(format!("Trend: {}/{}", trend.len(), trend.capacity()));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(readout) = app.state.session.readout() {
                        ui.label(format!("Last sample: {}", readout.last_label));
                    }
                });
            });
            ui.add_space(3.0);
        });
}
