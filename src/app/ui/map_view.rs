use eframe::egui::{self, Color32};
use egui_plot::{MarkerShape, Plot, PlotBounds, Points};

use crate::config::MapConfig;

/// Visible (lon, lat) bounds centered on `position`.
pub fn map_bounds(position: (f64, f64), span_degrees: f64) -> ([f64; 2], [f64; 2]) {
    let (lat, lon) = position;
    (
        [lon - span_degrees, lat - span_degrees],
        [lon + span_degrees, lat + span_degrees],
    )
}

/// Where the marker goes: the reported position, or the configured center
/// until one arrives.
pub fn marker_position(position: Option<(f64, f64)>, config: &MapConfig) -> (f64, f64) {
    position.unwrap_or((config.center_lat, config.center_lon))
}

/// Device position marker. The view follows the marker.
pub fn render_map(ui: &mut egui::Ui, position: Option<(f64, f64)>, config: &MapConfig) {
    let marker = marker_position(position, config);
    let (min, max) = map_bounds(marker, config.span_degrees);
    let [r, g, b] = config.marker_color;

    Plot::new("position_map")
        .height(config.height)
        .data_aspect(1.0)
        .x_axis_formatter(|mark, _| format!("{:.3}°", mark.value))
        .y_axis_formatter(|mark, _| format!("{:.3}°", mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
            plot_ui.points(
                Points::new("device", vec![[marker.1, marker.0]])
                    .shape(MarkerShape::Circle)
                    .radius(config.marker_radius)
                    .filled(false)
                    .color(Color32::from_rgb(r, g, b)),
            );
        });

    ui.label(format!("Lat {:.6}, Lon {:.6}", marker.0, marker.1));
}
