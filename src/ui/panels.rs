use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series selection and sketch controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Animal class");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let classes = dataset.classes.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- One radio button per animal class ----
            for class in &classes {
                let selected = state.selected_class.as_deref() == Some(class.as_str());
                let swatch = state.colors.color_for(class);
                let label = RichText::new(class).color(swatch);
                if ui.radio(selected, label).clicked() {
                    state.select_class(class.clone());
                }
            }

            ui.separator();

            // ---- Sketch controls ----
            ui.strong("Your forecast");
            if state.sketch.is_empty() {
                ui.label("Click the chart to sketch where the line goes next.");
            } else {
                let months = state.sketch.points().len().saturating_sub(1);
                ui.label(format!("{months} month(s) sketched"));
            }

            ui.add_space(4.0);

            if ui
                .add_enabled(!state.sketch.is_empty(), egui::Button::new("Clear sketch"))
                .clicked()
            {
                state.clear_sketch();
            }

            if state.can_reveal() {
                if ui.button("Reveal actual counts").clicked() {
                    state.reveal();
                }
            } else if state.revealed {
                ui.label(RichText::new("Actual counts shown").italics());
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open URL…").clicked() {
                state.url_dialog_open = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows, {} animal classes",
                ds.len(),
                ds.classes.len()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading entry points
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open incident table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows across classes {:?}",
                    dataset.len(),
                    dataset.classes
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn fetch_url(state: &mut AppState) {
    let url = state.url_input.trim().to_string();
    if url.is_empty() {
        state.status_message = Some("Enter a URL first".to_string());
        return;
    }
    match loader::load_url(&url) {
        Ok(dataset) => {
            log::info!(
                "Fetched {} rows across classes {:?} from {url}",
                dataset.len(),
                dataset.classes
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to fetch {url}: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
