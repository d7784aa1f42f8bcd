use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, metrics, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TitanicDashApp {
    pub state: AppState,
}

impl eframe::App for TitanicDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a passenger file to explore survival  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut egui::Ui| {
                    ui.columns(3, |cols: &mut [egui::Ui]| {
                        metrics::overview_column(&mut cols[0], &self.state);

                        charts::survival_heatmap(&mut cols[1], &self.state);
                        cols[1].separator();
                        charts::port_bars(&mut cols[1], &self.state);
                        cols[1].separator();
                        charts::age_histogram(&mut cols[1], &self.state);

                        metrics::top_groups_column(&mut cols[2], &self.state);
                        cols[2].separator();
                        charts::fare_boxplot(&mut cols[2], &self.state);
                    });
                });
        });
    }
}
