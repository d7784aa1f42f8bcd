use eframe::egui::{self, Margin, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot};

use crate::color::ColorTheme;
use crate::data::model::AgeGroup;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Class × age-group survival heatmap
// ---------------------------------------------------------------------------

/// Painted cell grid: one row per class, one column per age bucket.
/// Cells with no passengers are left blank.
pub fn survival_heatmap(ui: &mut Ui, state: &AppState) {
    ui.strong("Survival by class and age group");
    ui.add_space(4.0);

    if state.summary.heatmap.is_empty() {
        ui.label(RichText::new("No aged passengers to cross-tabulate.").weak());
        return;
    }

    let theme = state.theme;
    egui::Grid::new("survival_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for group in AgeGroup::ALL {
                ui.strong(group.label());
            }
            ui.end_row();

            for class in 1..=3u8 {
                ui.strong(format!("Class {class}"));
                for group in AgeGroup::ALL {
                    let cell = state
                        .summary
                        .heatmap
                        .iter()
                        .find(|c| c.class == class && c.age_group == group);
                    match cell {
                        Some(cell) => heat_cell(ui, theme, cell.rate_pct),
                        None => {
                            ui.label(RichText::new("–").weak());
                        }
                    }
                }
                ui.end_row();
            }
        });
}

fn heat_cell(ui: &mut Ui, theme: ColorTheme, rate_pct: f64) {
    let t = rate_pct / 100.0;
    egui::Frame::default()
        .fill(theme.sample(t))
        .inner_margin(Margin::symmetric(8, 4))
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(format!("{rate_pct:.0}%")).color(theme.text_on(t)));
        });
}

// ---------------------------------------------------------------------------
// Survival by embarkation port (bar chart)
// ---------------------------------------------------------------------------

pub fn port_bars(ui: &mut Ui, state: &AppState) {
    ui.strong("Survival by embarkation port");
    ui.add_space(4.0);

    let data = &state.summary.by_port;
    if data.is_empty() {
        ui.label(RichText::new("No passengers with a known port.").weak());
        return;
    }

    let bars: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(i, (port, rate))| {
            Bar::new(i as f64, *rate)
                .width(0.6)
                .fill(state.theme.accent())
                .name(port.to_string())
        })
        .collect();
    let labels: Vec<String> = data.iter().map(|(port, _)| port.to_string()).collect();

    Plot::new("port_bars")
        .height(180.0)
        .include_y(0.0)
        .include_y(100.0)
        .y_axis_label("Survival (%)")
        .x_axis_formatter(move |mark, _range| {
            let value = mark.value;
            if value.fract().abs() > 1e-6 || value < 0.0 {
                return String::new();
            }
            labels.get(value as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Age distribution split by outcome (histogram)
// ---------------------------------------------------------------------------

pub fn age_histogram(ui: &mut Ui, state: &AppState) {
    ui.strong("Age distribution by outcome");
    ui.add_space(4.0);

    let hist = &state.summary.age_by_outcome;
    if hist.is_empty() {
        ui.label(RichText::new("No aged passengers to plot.").weak());
        return;
    }

    let bars_for = |counts: &[usize]| -> Vec<Bar> {
        hist.bin_starts
            .iter()
            .zip(counts)
            .filter(|(_, &count)| count > 0)
            .map(|(&start, &count)| {
                Bar::new(start + hist.bin_width / 2.0, count as f64).width(hist.bin_width * 0.95)
            })
            .collect()
    };

    // Overlaid semi-transparent series, as in an overlay histogram.
    let survived = BarChart::new(bars_for(&hist.survived_counts))
        .color(state.theme.accent().gamma_multiply(0.6))
        .name("Survived");
    let died = BarChart::new(bars_for(&hist.died_counts))
        .color(state.theme.muted().gamma_multiply(0.6))
        .name("Died");

    Plot::new("age_histogram")
        .height(200.0)
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label("Passengers")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(survived);
            plot_ui.bar_chart(died);
        });
}

// ---------------------------------------------------------------------------
// Fare distribution by outcome (boxplot)
// ---------------------------------------------------------------------------

pub fn fare_boxplot(ui: &mut Ui, state: &AppState) {
    ui.strong("Fare by outcome");
    ui.add_space(4.0);

    let data = &state.summary.fare_by_outcome;
    if data.is_empty() {
        ui.label(RichText::new("No passengers match the filters.").weak());
        return;
    }

    let boxes: Vec<BoxElem> = data
        .iter()
        .enumerate()
        .map(|(i, (outcome, s))| {
            BoxElem::new(i as f64, BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max))
                .box_width(0.5)
                .fill(state.theme.sample(0.3))
                .stroke(Stroke::new(1.5, state.theme.accent()))
                .name(outcome.to_string())
        })
        .collect();
    let labels: Vec<String> = data.iter().map(|(o, _)| o.to_string()).collect();

    Plot::new("fare_boxplot")
        .height(200.0)
        .y_axis_label("Fare")
        .x_axis_formatter(move |mark, _range| {
            let value = mark.value;
            if value.fract().abs() > 1e-6 || value < 0.0 {
                return String::new();
            }
            labels.get(value as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}
