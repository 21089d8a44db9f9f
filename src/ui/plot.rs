use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints, Points};

use crate::data::model::YearMonth;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Forecast plot (central panel)
// ---------------------------------------------------------------------------

const SKETCH_COLOR: Color32 = Color32::RED;
const ACTUAL_COLOR: Color32 = Color32::from_rgb(0, 140, 0);

/// Render the chart and feed clicks into the sketch.
pub fn forecast_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(split) = &state.split else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.dataset.is_some() {
                "Nothing to chart for this series"
            } else {
                "Open an incident table to start  (File → Open…)"
            };
            ui.heading(hint);
        });
        return;
    };

    // Copy everything the plot closure needs so the click below can borrow
    // the state mutably.
    let class = split.class.clone();
    let class_color = state.colors.color_for(&class);
    let recorded: Vec<[f64; 2]> = split.recorded.iter().map(|p| p.coords()).collect();
    let hidden: Vec<[f64; 2]> = split.hidden.iter().map(|p| p.coords()).collect();
    let sketched: Vec<[f64; 2]> = state.sketch.points().iter().map(|p| p.coords()).collect();
    let (x_min, x_max) = split.x_range;
    let y_max = split.y_max;
    let revealed = state.revealed;

    let plot = Plot::new("forecast_plot")
        .legend(Legend::default())
        .x_axis_label("Time")
        .y_axis_label("Number of incident calls")
        .x_axis_formatter(|mark, _range| YearMonth::from_index(mark.value).to_string())
        // The chart is a drawing surface: clicks place points, so navigation
        // stays off and the bounds are pinned below.
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false);

    let response = plot.show(ui, |plot_ui| {
        // Axes span the whole series, hidden months included, leaving room
        // to sketch into the future region before it is revealed.
        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
            [x_min - 0.5, 0.0],
            [x_max + 0.5, y_max * 1.05],
        ));

        let recorded_points: PlotPoints = recorded.into_iter().collect();
        plot_ui.line(
            Line::new(recorded_points)
                .name(&class)
                .color(class_color)
                .width(2.0),
        );

        if revealed {
            let hidden_points: PlotPoints = hidden.into_iter().collect();
            plot_ui.line(
                Line::new(hidden_points)
                    .name("actual")
                    .color(ACTUAL_COLOR)
                    .width(2.0),
            );
        }

        if !sketched.is_empty() {
            let vertices = Points::new(sketched.clone())
                .color(SKETCH_COLOR)
                .radius(3.0);
            let sketch_points: PlotPoints = sketched.into_iter().collect();
            plot_ui.line(
                Line::new(sketch_points)
                    .name("your forecast")
                    .color(SKETCH_COLOR)
                    .width(2.0),
            );
            plot_ui.points(vertices);
        }
    });

    if response.response.clicked() {
        if let Some(screen_pos) = response.response.interact_pointer_pos() {
            let plot_pos = response.transform.value_from_position(screen_pos);
            state.handle_click(plot_pos.x, plot_pos.y);
        }
    }
}
