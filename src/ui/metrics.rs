use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Metric cards (survival overview column)
// ---------------------------------------------------------------------------

/// One framed metric card: label, headline value, optional sub-line.
pub fn metric_card(ui: &mut Ui, label: &str, value: &str, delta: Option<&str>) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(label).strong());
                ui.label(RichText::new(value).heading());
                if let Some(delta) = delta {
                    ui.label(RichText::new(delta).weak());
                }
            });
        });
}

/// Render the survival-overview metric column.
pub fn overview_column(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;

    ui.strong("Survival overview");
    ui.add_space(4.0);

    let overview = summary.overview;
    metric_card(
        ui,
        "Overall survival",
        &format!("{:.1}%", overview.rate_pct),
        Some(&format!("{} / {}", overview.survived, overview.total)),
    );
    if overview.total == 0 {
        ui.label(RichText::new("No passengers match the filters.").weak());
    }
    ui.separator();

    ui.strong("By sex");
    for (sex, rate) in &summary.by_sex {
        metric_card(ui, &sex.to_string(), &format!("{rate:.1}%"), None);
    }
    ui.separator();

    ui.strong("By class");
    for (class, rate) in &summary.by_class {
        metric_card(ui, &format!("Class {class}"), &format!("{rate:.1}%"), None);
    }
    ui.separator();

    ui.strong("Family aboard");
    for (family, rate) in &summary.by_family {
        let label = if *family { "With family" } else { "Alone" };
        metric_card(ui, label, &format!("{rate:.1}%"), None);
    }
}

/// Render the top-5 survival groups as metric cards.
pub fn top_groups_column(ui: &mut Ui, state: &AppState) {
    ui.strong("Top survival groups");
    ui.add_space(4.0);

    if state.summary.top_groups.is_empty() {
        ui.label(RichText::new("No groups to rank.").weak());
        return;
    }
    for group in &state.summary.top_groups {
        metric_card(
            ui,
            &format!("{}, class {}, {}", group.sex, group.class, group.age_group),
            &format!("{:.1}%", group.rate_pct),
            None,
        );
    }
}
