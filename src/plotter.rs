use egui::Color32;
use egui_plot::{GridInput, GridMark, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::config::ChartConfig;
use crate::session::TrendBuffer;

/// 格式化数字为固定宽度的 y 轴标签
pub fn format_fixed_width_y_label(value: f64) -> String {
    let abs_value = value.abs();
    if abs_value >= 1000.0 {
        format!("{:-6.1e}", value)
    } else if abs_value >= 100.0 {
        format!("{:-6.0}", value)
    } else if abs_value >= 10.0 {
        format!("{:-6.1}", value)
    } else {
        format!("{:-6.2}", value)
    }
}

/// Tick text for chart position `x`: the sample label at whole indices, blank elsewhere.
pub fn label_for_position(labels: &[String], x: f64) -> String {
    if x < 0.0 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

fn index_grid(input: GridInput) -> Vec<GridMark> {
    let (min, max) = input.bounds;
    let first = min.ceil().max(0.0) as i64;
    let last = max.floor() as i64;
    (first..=last)
        .map(|i| GridMark { value: i as f64, step_size: 1.0 })
        .collect()
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Scrolling two-series line chart over the trend window.
pub struct TrendPlot;

impl TrendPlot {
    pub fn ui(ui: &mut egui::Ui, trend: &TrendBuffer, config: &ChartConfig) {
        let labels: Vec<String> = trend.labels().iter().cloned().collect();
        // 窗口未填满时也保持固定的x轴宽度
        let x_max = (trend.capacity().max(2) - 1) as f64;

        Plot::new("trend_chart")
            .height(config.height)
            .legend(Legend::default())
            .x_grid_spacer(index_grid)
            .x_axis_formatter(move |mark, _| label_for_position(&labels, mark.value))
            .y_axis_formatter(|mark, _| format_fixed_width_y_label(mark.value))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [0.0, config.y_min],
                    [x_max, config.y_max],
                ));

                if trend.is_empty() {
                    return;
                }
                plot_ui.line(
                    Line::new("X", PlotPoints::from(trend.points_ax()))
                        .color(rgb(config.colors.x_axis))
                        .width(2.0),
                );
                plot_ui.line(
                    Line::new("Y", PlotPoints::from(trend.points_ay()))
                        .color(rgb(config.colors.y_axis))
                        .width(2.0),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_labels_have_fixed_width() {
        for value in [-2.0, -0.5, 0.0, 1.25, 42.0, 512.0, 12345.0] {
            assert!(format_fixed_width_y_label(value).len() >= 6, "{}", value);
        }
        assert_eq!(format_fixed_width_y_label(1.5), "  1.50");
        assert_eq!(format_fixed_width_y_label(-0.5), " -0.50");
    }

    #[test]
    fn labels_only_at_whole_indices() {
        let labels = vec!["12:00:01".to_string(), "12:00:02".to_string()];
        assert_eq!(label_for_position(&labels, 1.0), "12:00:02");
        assert_eq!(label_for_position(&labels, 0.5), "");
        assert_eq!(label_for_position(&labels, 2.0), "");
        assert_eq!(label_for_position(&labels, -1.0), "");
    }
}
