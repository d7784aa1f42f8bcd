use std::collections::BTreeSet;

use super::model::{Passenger, PassengerDataset, Port, Sex};

// ---------------------------------------------------------------------------
// Filter criteria: the full set of user-selected constraints
// ---------------------------------------------------------------------------

/// Family-aboard filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyMode {
    #[default]
    Any,
    WithFamily,
    Alone,
}

impl FamilyMode {
    pub const ALL: [FamilyMode; 3] = [FamilyMode::Any, FamilyMode::WithFamily, FamilyMode::Alone];

    pub fn label(&self) -> &'static str {
        match self {
            FamilyMode::Any => "Any",
            FamilyMode::WithFamily => "With family",
            FamilyMode::Alone => "Alone",
        }
    }
}

/// How null ages are treated before range filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeMissingPolicy {
    /// Leave nulls in place. They still fail the age-range test, so they
    /// end up excluded from the subset without erroring.
    #[default]
    Keep,
    /// Remove rows with a null age.
    Drop,
    /// Replace null ages with the median age of the full, pre-filter dataset.
    ImputeMedian,
}

impl AgeMissingPolicy {
    pub const ALL: [AgeMissingPolicy; 3] = [
        AgeMissingPolicy::Keep,
        AgeMissingPolicy::Drop,
        AgeMissingPolicy::ImputeMedian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeMissingPolicy::Keep => "Keep",
            AgeMissingPolicy::Drop => "Drop",
            AgeMissingPolicy::ImputeMedian => "Impute median",
        }
    }
}

/// The full set of user-selected constraints. Rebuilt from widget state on
/// every interaction; it has no identity beyond the current request.
///
/// Convention: an empty `classes` or `sexes` selection means "no
/// restriction". The sidebar defaults both to all-selected, so an empty set
/// only arises when the user deselects everything on purpose. The port set
/// is different: an empty `ports` set genuinely selects nothing, and with
/// `include_missing_port` unset it excludes every row (see `apply_filters`).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub classes: BTreeSet<u8>,
    pub sexes: BTreeSet<Sex>,
    pub ports: BTreeSet<Port>,
    pub include_missing_port: bool,
    /// Inclusive on both bounds.
    pub age_range: (f64, f64),
    /// Inclusive on both bounds.
    pub fare_range: (f64, f64),
    pub family_mode: FamilyMode,
    pub age_policy: AgeMissingPolicy,
}

impl FilterCriteria {
    /// Default criteria for a dataset: everything selected, full observed
    /// ranges, no family restriction, nulls kept.
    pub fn for_dataset(dataset: &PassengerDataset) -> Self {
        FilterCriteria {
            classes: [1, 2, 3].into_iter().collect(),
            sexes: Sex::ALL.into_iter().collect(),
            ports: Port::ALL.into_iter().collect(),
            include_missing_port: false,
            age_range: dataset.age_bounds,
            fare_range: dataset.fare_bounds,
            family_mode: FamilyMode::Any,
            age_policy: AgeMissingPolicy::Keep,
        }
    }
}

// ---------------------------------------------------------------------------
// The filter pipeline
// ---------------------------------------------------------------------------

/// Apply all active criteria to the dataset, producing an independent subset.
///
/// The age policy runs first because it may rewrite ages before the range
/// test. All remaining criteria are a conjunction of row predicates, so
/// their order is irrelevant. An empty result is valid output, never an
/// error.
pub fn apply_filters(dataset: &PassengerDataset, criteria: &FilterCriteria) -> Vec<Passenger> {
    let median_age = dataset.median_age;

    dataset
        .passengers
        .iter()
        .filter_map(|p| {
            let mut row = p.clone();

            match criteria.age_policy {
                AgeMissingPolicy::Keep => {}
                AgeMissingPolicy::Drop => {
                    if row.age.is_none() {
                        return None;
                    }
                }
                AgeMissingPolicy::ImputeMedian => {
                    if row.age.is_none() {
                        // No-op when the whole dataset has no ages.
                        row.age = median_age;
                    }
                }
            }

            if !criteria.classes.is_empty() && !criteria.classes.contains(&row.class) {
                return None;
            }
            if !criteria.sexes.is_empty() && !criteria.sexes.contains(&row.sex) {
                return None;
            }

            if !port_passes(&row, criteria) {
                return None;
            }

            // Null ages at this point fail the range test.
            match row.age {
                Some(age) if age >= criteria.age_range.0 && age <= criteria.age_range.1 => {}
                _ => return None,
            }
            if row.fare < criteria.fare_range.0 || row.fare > criteria.fare_range.1 {
                return None;
            }

            match criteria.family_mode {
                FamilyMode::Any => {}
                FamilyMode::WithFamily => {
                    if !row.family_aboard() {
                        return None;
                    }
                }
                FamilyMode::Alone => {
                    if row.family_aboard() {
                        return None;
                    }
                }
            }

            Some(row)
        })
        .collect()
}

/// Port predicate.
///
/// With a non-empty selection a row passes when its port is selected, or
/// when the port is null and the missing-port flag is set. With an empty
/// selection only null-port rows can pass, and only if the flag is set;
/// empty selection with the flag unset excludes everything. That total
/// exclusion is deliberate, mirrored from the observed behavior.
fn port_passes(row: &Passenger, criteria: &FilterCriteria) -> bool {
    match row.port {
        Some(port) => criteria.ports.contains(&port),
        None => criteria.include_missing_port,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        class: u8,
        sex: Sex,
        age: Option<f64>,
        fare: f64,
        sibsp: u32,
        parch: u32,
        port: Option<Port>,
        survived: bool,
    ) -> Passenger {
        Passenger {
            class,
            sex,
            age,
            fare,
            siblings_spouses: sibsp,
            parents_children: parch,
            port,
            survived,
        }
    }

    fn sample_dataset() -> PassengerDataset {
        PassengerDataset::from_passengers(vec![
            row(1, Sex::Female, Some(30.0), 50.0, 0, 0, Some(Port::Southampton), true),
            row(3, Sex::Male, Some(22.0), 7.0, 1, 0, Some(Port::Cherbourg), false),
            row(1, Sex::Female, Some(40.0), 80.0, 0, 2, Some(Port::Queenstown), true),
            row(2, Sex::Male, None, 13.0, 0, 0, None, false),
            row(3, Sex::Female, Some(4.0), 16.7, 1, 1, Some(Port::Southampton), true),
        ])
    }

    #[test]
    fn subset_never_exceeds_source() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::for_dataset(&ds);
        assert!(apply_filters(&ds, &criteria).len() <= ds.len());
    }

    #[test]
    fn default_criteria_drop_only_null_rows() {
        // Null age fails the range test, null port fails the port test.
        let ds = sample_dataset();
        let criteria = FilterCriteria::for_dataset(&ds);
        assert_eq!(apply_filters(&ds, &criteria).len(), 4);
    }

    #[test]
    fn class_and_sex_selection_from_spec_example() {
        let ds = PassengerDataset::from_passengers(vec![
            row(1, Sex::Female, Some(30.0), 50.0, 0, 0, Some(Port::Southampton), true),
            row(3, Sex::Male, Some(22.0), 7.0, 0, 0, Some(Port::Southampton), false),
            row(1, Sex::Female, Some(40.0), 80.0, 0, 0, Some(Port::Southampton), true),
        ]);
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.classes = [1].into_iter().collect();
        criteria.sexes = [Sex::Female].into_iter().collect();

        let subset = apply_filters(&ds, &criteria);
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|p| p.survived));
    }

    #[test]
    fn empty_categorical_selection_means_no_restriction() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.classes.clear();
        criteria.sexes.clear();
        let baseline = apply_filters(&ds, &FilterCriteria::for_dataset(&ds));
        assert_eq!(apply_filters(&ds, &criteria), baseline);
    }

    #[test]
    fn empty_port_set_without_missing_flag_excludes_everything() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.ports.clear();
        criteria.include_missing_port = false;
        assert!(apply_filters(&ds, &criteria).is_empty());
    }

    #[test]
    fn empty_port_set_with_missing_flag_keeps_only_null_ports() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.ports.clear();
        criteria.include_missing_port = true;
        // The only null-port row also has a null age, so give it one.
        criteria.age_policy = AgeMissingPolicy::ImputeMedian;

        let subset = apply_filters(&ds, &criteria);
        assert_eq!(subset.len(), 1);
        assert!(subset[0].port.is_none());
    }

    #[test]
    fn missing_port_flag_extends_a_nonempty_selection() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.age_policy = AgeMissingPolicy::ImputeMedian;

        criteria.include_missing_port = false;
        assert_eq!(apply_filters(&ds, &criteria).len(), 4);
        criteria.include_missing_port = true;
        assert_eq!(apply_filters(&ds, &criteria).len(), 5);
    }

    #[test]
    fn drop_policy_removes_null_ages() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.age_policy = AgeMissingPolicy::Drop;
        criteria.include_missing_port = true;
        let subset = apply_filters(&ds, &criteria);
        assert_eq!(subset.len(), 4);
        assert!(subset.iter().all(|p| p.age.is_some()));
    }

    #[test]
    fn impute_policy_leaves_no_null_ages() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.age_policy = AgeMissingPolicy::ImputeMedian;
        criteria.include_missing_port = true;

        let subset = apply_filters(&ds, &criteria);
        assert!(subset.iter().all(|p| p.age.is_some()));
        // Median of 30, 22, 40, 4 is 26.
        let imputed = subset.iter().find(|p| p.port.is_none()).unwrap();
        assert_eq!(imputed.age, Some(26.0));
    }

    #[test]
    fn age_range_is_inclusive_and_idempotent() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.age_range = (22.0, 40.0);

        let once = apply_filters(&ds, &criteria);
        assert_eq!(once.len(), 3);

        let refiltered = apply_filters(&PassengerDataset::from_passengers(once.clone()), &criteria);
        assert_eq!(once, refiltered);
    }

    #[test]
    fn family_modes_partition_the_any_subset() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);

        criteria.family_mode = FamilyMode::Any;
        let any = apply_filters(&ds, &criteria);
        criteria.family_mode = FamilyMode::WithFamily;
        let with_family = apply_filters(&ds, &criteria);
        criteria.family_mode = FamilyMode::Alone;
        let alone = apply_filters(&ds, &criteria);

        assert_eq!(with_family.len() + alone.len(), any.len());
        for p in &with_family {
            assert!(!alone.contains(p));
        }
        let mut union = with_family.clone();
        union.extend(alone.clone());
        for p in &any {
            assert!(union.contains(p));
        }
    }

    #[test]
    fn empty_result_is_valid_output() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.fare_range = (1000.0, 2000.0);
        assert!(apply_filters(&ds, &criteria).is_empty());
    }

    #[test]
    fn source_dataset_is_never_mutated() {
        let ds = sample_dataset();
        let before = ds.passengers.clone();
        let mut criteria = FilterCriteria::for_dataset(&ds);
        criteria.age_policy = AgeMissingPolicy::ImputeMedian;
        let _ = apply_filters(&ds, &criteria);
        assert_eq!(ds.passengers, before);
    }
}
