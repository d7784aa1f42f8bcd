use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Sex / Port – categorical columns
// ---------------------------------------------------------------------------

/// Passenger sex. Fixed two-value categorical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "Female"),
            Sex::Male => write!(f, "Male"),
        }
    }
}

/// Embarkation port (the C/Q/S column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Port {
    #[serde(rename = "C")]
    Cherbourg,
    #[serde(rename = "Q")]
    Queenstown,
    #[serde(rename = "S")]
    Southampton,
}

impl Port {
    pub const ALL: [Port; 3] = [Port::Cherbourg, Port::Queenstown, Port::Southampton];

    /// Single-letter code as it appears in the source data.
    pub fn code(&self) -> &'static str {
        match self {
            Port::Cherbourg => "C",
            Port::Queenstown => "Q",
            Port::Southampton => "S",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Cherbourg => write!(f, "Cherbourg (C)"),
            Port::Queenstown => write!(f, "Queenstown (Q)"),
            Port::Southampton => write!(f, "Southampton (S)"),
        }
    }
}

// ---------------------------------------------------------------------------
// AgeGroup – fixed buckets for cross-tabulation
// ---------------------------------------------------------------------------

/// Fixed half-open age buckets: [0,12) [12,18) [18,30) [30,45) [45,60) [60,∞).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Child,
    Teen,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::Child,
        AgeGroup::Teen,
        AgeGroup::YoungAdult,
        AgeGroup::Adult,
        AgeGroup::MiddleAged,
        AgeGroup::Senior,
    ];

    /// Bucket an age. Ages below 0 land in the first bucket.
    pub fn from_age(age: f64) -> AgeGroup {
        if age < 12.0 {
            AgeGroup::Child
        } else if age < 18.0 {
            AgeGroup::Teen
        } else if age < 30.0 {
            AgeGroup::YoungAdult
        } else if age < 45.0 {
            AgeGroup::Adult
        } else if age < 60.0 {
            AgeGroup::MiddleAged
        } else {
            AgeGroup::Senior
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Child => "0-11",
            AgeGroup::Teen => "12-17",
            AgeGroup::YoungAdult => "18-29",
            AgeGroup::Adult => "30-44",
            AgeGroup::MiddleAged => "45-59",
            AgeGroup::Senior => "60+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Passenger – one row of the source table
// ---------------------------------------------------------------------------

/// A single passenger record. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    /// Cabin class, ordinal 1–3.
    pub class: u8,
    pub sex: Sex,
    /// Nullable in the source data.
    pub age: Option<f64>,
    pub fare: f64,
    /// Siblings / spouses aboard (SibSp).
    pub siblings_spouses: u32,
    /// Parents / children aboard (Parch).
    pub parents_children: u32,
    /// Nullable in the source data.
    pub port: Option<Port>,
    pub survived: bool,
}

impl Passenger {
    /// True when the passenger travelled with any family member.
    pub fn family_aboard(&self) -> bool {
        self.siblings_spouses + self.parents_children > 0
    }

    /// Age bucket, None while the age is null.
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.map(AgeGroup::from_age)
    }
}

// ---------------------------------------------------------------------------
// PassengerDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column statistics.
///
/// Loaded once per session and treated as read-only afterwards; filtering
/// produces independent subsets, never views into this struct.
#[derive(Debug, Clone)]
pub struct PassengerDataset {
    /// All passengers in source order.
    pub passengers: Vec<Passenger>,
    /// Observed (min, max) of the non-null ages. (0, 0) when none exist.
    pub age_bounds: (f64, f64),
    /// Observed (min, max) fare. (0, 0) when the dataset is empty.
    pub fare_bounds: (f64, f64),
    /// Median of the non-null ages of the full dataset. Imputation source,
    /// fixed at load time.
    pub median_age: Option<f64>,
}

impl PassengerDataset {
    /// Build the dataset and its column statistics from loaded rows.
    pub fn from_passengers(passengers: Vec<Passenger>) -> Self {
        let ages: Vec<f64> = passengers.iter().filter_map(|p| p.age).collect();
        let fares: Vec<f64> = passengers.iter().map(|p| p.fare).collect();
        let median_age = median(&ages);

        PassengerDataset {
            age_bounds: observed_bounds(&ages),
            fare_bounds: observed_bounds(&fares),
            median_age,
            passengers,
        }
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

fn observed_bounds(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Median of a sample; None when empty. Midpoint of the two central values
/// for even-sized samples.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}
