use eframe::egui::{self, RichText};

use crate::app::sensor_app::DashboardApp;

pub fn render_readout_panel(app: &DashboardApp, ui: &mut egui::Ui) {
    let palette = app.state.theme.palette();
    let readout = app.state.session.readout();

    ui.group(|ui| {
        egui::Grid::new("readouts")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                ui.label("Mode");
                ui.label(RichText::new(readout.map_or("--", |r| r.mode.as_str())).strong());
                ui.end_row();

                ui.label("Tilt X");
                ui.monospace(readout.map_or("--".to_string(), |r| r.ax_text()));
                ui.end_row();

                ui.label("Tilt Y");
                ui.monospace(readout.map_or("--".to_string(), |r| r.ay_text()));
                ui.end_row();

                ui.label("G-Force");
                ui.monospace(readout.map_or("--".to_string(), |r| r.gforce_text()));
                ui.end_row();

                ui.label("Vibration");
                ui.monospace(match readout.and_then(|r| r.vibration) {
                    Some(0) => "idle",
                    Some(_) => "detected",
                    None => "--",
                });
                ui.end_row();
            });

        ui.add_space(8.0);

        // 告警状态只取决于最新一条事件
        match readout {
            Some(r) => {
                let color = if r.alert { palette.danger } else { palette.success };
                ui.label(RichText::new(r.alert_text()).size(20.0).strong().color(color));
            }
            None => {
                ui.label(RichText::new("STATUS: WAITING").size(20.0).strong());
            }
        }
    });
}
