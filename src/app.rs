use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PawcastApp {
    pub state: AppState,
}

impl eframe::App for PawcastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series selection + sketch controls ----
        egui::SidePanel::left("class_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- URL dialog ----
        self.url_window(ctx);

        // ---- Central panel: the chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::forecast_plot(ui, &mut self.state);
        });
    }
}

impl PawcastApp {
    fn url_window(&mut self, ctx: &egui::Context) {
        if !self.state.url_dialog_open {
            return;
        }

        let mut open = true;
        let mut fetch = false;
        let mut cancel = false;

        egui::Window::new("Open URL")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Address of a CSV incident table:");
                ui.text_edit_singleline(&mut self.state.url_input);
                ui.horizontal(|ui| {
                    if ui.button("Fetch").clicked() {
                        fetch = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if fetch {
            panels::fetch_url(&mut self.state);
        }
        if fetch || cancel || !open {
            self.state.url_dialog_open = false;
        }
    }
}
