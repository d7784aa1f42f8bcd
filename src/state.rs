use crate::color::ColorTheme;
use crate::data::aggregate::{summarize, DashboardSummary};
use crate::data::filter::{apply_filters, FilterCriteria};
use crate::data::model::{Passenger, PassengerDataset, Port, Sex};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is the only long-lived data; the criteria, the filtered
/// subset, and the summary are recomputed in full on every widget change.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<PassengerDataset>,

    /// Current sidebar selections.
    pub criteria: FilterCriteria,

    /// Rows passing the current criteria (cached between interactions).
    pub filtered: Vec<Passenger>,

    /// Aggregates over `filtered`, as rendered by the main panel.
    pub summary: DashboardSummary,

    /// Active chart colour theme.
    pub theme: ColorTheme,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::for_dataset(&PassengerDataset::from_passengers(Vec::new())),
            filtered: Vec::new(),
            summary: DashboardSummary::default(),
            theme: ColorTheme::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset filters to their defaults.
    pub fn set_dataset(&mut self, dataset: PassengerDataset) {
        self.criteria = FilterCriteria::for_dataset(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered subset and its aggregates after any
    /// criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filtered = apply_filters(ds, &self.criteria);
        } else {
            self.filtered.clear();
        }
        self.summary = summarize(&self.filtered);
    }

    /// Reset all filters to the dataset defaults.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::for_dataset(ds);
        }
        self.refilter();
    }

    // -- Sidebar All/None buttons, one pair per checkbox group --

    /// Select all classes.
    pub fn select_all_classes(&mut self) {
        self.criteria.classes = (1..=3).collect();
        self.refilter();
    }

    /// Deselect all classes. Per the documented convention an empty
    /// class selection means "no restriction".
    pub fn select_no_classes(&mut self) {
        self.criteria.classes.clear();
        self.refilter();
    }

    /// Select both sexes.
    pub fn select_all_sexes(&mut self) {
        self.criteria.sexes = Sex::ALL.into_iter().collect();
        self.refilter();
    }

    /// Deselect both sexes. Empty sex selection also means "no restriction".
    pub fn select_no_sexes(&mut self) {
        self.criteria.sexes.clear();
        self.refilter();
    }

    /// Select all embarkation ports.
    pub fn select_all_ports(&mut self) {
        self.criteria.ports = Port::ALL.into_iter().collect();
        self.refilter();
    }

    /// Deselect all ports. Unlike class/sex, an empty port selection
    /// genuinely selects nothing: only missing-port rows can still pass,
    /// and only while the missing-port flag is set.
    pub fn select_no_ports(&mut self) {
        self.criteria.ports.clear();
        self.refilter();
    }
}
