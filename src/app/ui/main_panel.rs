use eframe::egui;

use crate::app::sensor_app::DashboardApp;
use crate::app::ui::map_view::render_map;
use crate::app::ui::readout_panel::render_readout_panel;
use crate::plotter::TrendPlot;

const DEVICE_VIEW_HEIGHT: f32 = 320.0;

pub fn render_main_panel(app: &mut DashboardApp, ctx: &egui::Context) {
    let config = app.config.get_config().clone();
    let palette = app.state.theme.palette();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.columns(2, |columns| {
            columns[0].heading("Orientation");
            app.state.device_view.ui(&mut columns[0], &palette, DEVICE_VIEW_HEIGHT);
            columns[0].add_space(10.0);
            render_readout_panel(app, &mut columns[0]);

            columns[1].heading("Position");
            let position = app.state.session.readout().and_then(|r| r.position);
            render_map(&mut columns[1], position, &config.map);
            columns[1].add_space(10.0);

            columns[1].heading("Tilt Trend");
            TrendPlot::ui(&mut columns[1], app.state.session.trend(), &config.chart);
        });
    });
}
