use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::color::ColorTheme;
use crate::data::filter::{AgeMissingPolicy, FamilyMode};
use crate::data::model::{Port, Sex};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Widgets mutate `state.criteria` in place;
/// the subset and summary are recomputed once at the end.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Titanic Survival");
    ui.label("Narrow the passengers with the filters below.");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let total = dataset.len();
    let age_bounds = dataset.age_bounds;
    let fare_bounds = dataset.fare_bounds;

    ui.label(format!("Total passengers: {total}"));
    ui.separator();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Class ----
            ui.strong("Class");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_classes();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_classes();
                }
                for class in 1..=3u8 {
                    let mut checked = state.criteria.classes.contains(&class);
                    if ui.checkbox(&mut checked, format!("{class}")).changed() {
                        if checked {
                            state.criteria.classes.insert(class);
                        } else {
                            state.criteria.classes.remove(&class);
                        }
                        changed = true;
                    }
                }
            });
            ui.add_space(4.0);

            // ---- Sex ----
            ui.strong("Sex");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_sexes();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_sexes();
                }
                for sex in Sex::ALL {
                    let mut checked = state.criteria.sexes.contains(&sex);
                    if ui.checkbox(&mut checked, sex.to_string()).changed() {
                        if checked {
                            state.criteria.sexes.insert(sex);
                        } else {
                            state.criteria.sexes.remove(&sex);
                        }
                        changed = true;
                    }
                }
            });
            ui.add_space(4.0);

            // ---- Embarkation port ----
            ui.strong("Embarkation port");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_ports();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_ports();
                }
            });
            for port in Port::ALL {
                let mut checked = state.criteria.ports.contains(&port);
                if ui.checkbox(&mut checked, port.to_string()).changed() {
                    if checked {
                        state.criteria.ports.insert(port);
                    } else {
                        state.criteria.ports.remove(&port);
                    }
                    changed = true;
                }
            }
            if ui
                .checkbox(
                    &mut state.criteria.include_missing_port,
                    "Include missing port",
                )
                .changed()
            {
                changed = true;
            }
            ui.add_space(4.0);

            // ---- Age / fare ranges ----
            ui.strong("Age range");
            changed |= range_sliders(ui, "age", &mut state.criteria.age_range, age_bounds, 0);
            ui.strong("Fare range");
            changed |= range_sliders(ui, "fare", &mut state.criteria.fare_range, fare_bounds, 2);
            ui.add_space(4.0);

            // ---- Family aboard ----
            ui.strong("Family aboard");
            ui.horizontal(|ui: &mut Ui| {
                for mode in FamilyMode::ALL {
                    if ui
                        .radio_value(&mut state.criteria.family_mode, mode, mode.label())
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
            ui.add_space(4.0);

            // ---- Missing ages ----
            ui.strong("Missing ages");
            egui::ComboBox::from_id_salt("age_policy")
                .selected_text(state.criteria.age_policy.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for policy in AgeMissingPolicy::ALL {
                        if ui
                            .selectable_value(&mut state.criteria.age_policy, policy, policy.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });
            ui.add_space(4.0);

            // ---- Theme ----
            ui.strong("Color theme");
            egui::ComboBox::from_id_salt("color_theme")
                .selected_text(state.theme.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for theme in ColorTheme::ALL {
                        ui.selectable_value(&mut state.theme, theme, theme.label());
                    }
                });
            ui.add_space(8.0);

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            ui.separator();
            ui.label(format!(
                "Passengers after filters: {}",
                state.filtered.len()
            ));
        });

    if changed {
        state.refilter();
    }
}

/// Min/max sliders over an inclusive range, clamped to the observed dataset
/// bounds. Keeps min ≤ max by dragging the other bound along.
fn range_sliders(
    ui: &mut Ui,
    id: &str,
    range: &mut (f64, f64),
    bounds: (f64, f64),
    decimals: usize,
) -> bool {
    let mut changed = false;
    ui.push_id(id, |ui: &mut Ui| {
        if ui
            .add(
                Slider::new(&mut range.0, bounds.0..=bounds.1)
                    .text("min")
                    .fixed_decimals(decimals),
            )
            .changed()
        {
            range.1 = range.1.max(range.0);
            changed = true;
        }
        if ui
            .add(
                Slider::new(&mut range.1, bounds.0..=bounds.1)
                    .text("max")
                    .fixed_decimals(decimals),
            )
            .changed()
        {
            range.0 = range.0.min(range.1);
            changed = true;
        }
    });
    changed
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} passengers loaded, {} after filters",
                ds.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open passenger data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} passengers from {}",
                    dataset.len(),
                    path.display()
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
