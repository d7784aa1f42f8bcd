use std::fmt;

use super::model::{median, AgeGroup, Passenger, Port, Sex};

// ---------------------------------------------------------------------------
// Result types handed to the presentation layer
// ---------------------------------------------------------------------------

/// Survived / died outcome label for split views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Survived,
    Died,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Outcome::Survived, Outcome::Died];

    pub fn of(passenger: &Passenger) -> Outcome {
        if passenger.survived {
            Outcome::Survived
        } else {
            Outcome::Died
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Survived => write!(f, "Survived"),
            Outcome::Died => write!(f, "Died"),
        }
    }
}

/// Headline numbers for the overview metric card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overview {
    pub survived: usize,
    pub total: usize,
    /// Percentage in 0–100; 0 when `total` is 0.
    pub rate_pct: f64,
}

/// One cell of the class × age-group survival cross-tabulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapCell {
    pub class: u8,
    pub age_group: AgeGroup,
    pub rate_pct: f64,
}

/// One (sex, class, age-group) group with its mean survival.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupRate {
    pub sex: Sex,
    pub class: u8,
    pub age_group: AgeGroup,
    pub rate_pct: f64,
}

/// Equal-width age histogram split by outcome.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgeHistogram {
    /// Left edge of each bin; bins share `bin_width`.
    pub bin_starts: Vec<f64>,
    pub bin_width: f64,
    pub survived_counts: Vec<usize>,
    pub died_counts: Vec<usize>,
}

impl AgeHistogram {
    pub fn is_empty(&self) -> bool {
        self.bin_starts.is_empty()
    }
}

/// Five-number summary of a sample, for boxplot rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Everything the dashboard panels render, computed in one pass over the
/// filtered subset. All rates are zero-denominator safe: groups with no
/// members are skipped, and an empty subset yields an all-zero / all-empty
/// summary rather than a fault.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub overview: Overview,
    /// Mean survival (%) per sex, in the fixed Female/Male order.
    pub by_sex: Vec<(Sex, f64)>,
    /// Mean survival (%) per class 1–3.
    pub by_class: Vec<(u8, f64)>,
    /// Mean survival (%) for family-aboard = true / false.
    pub by_family: Vec<(bool, f64)>,
    /// Class × age-group cells; rows with a null age are excluded here only.
    pub heatmap: Vec<HeatmapCell>,
    /// Mean survival (%) per port. Null ports are always excluded from this
    /// view, independent of the sidebar's missing-port flag.
    pub by_port: Vec<(Port, f64)>,
    pub age_by_outcome: AgeHistogram,
    /// Top (sex, class, age-group) groups by survival, at most five, stable
    /// order on ties.
    pub top_groups: Vec<GroupRate>,
    pub fare_by_outcome: Vec<(Outcome, FiveNumber)>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Number of equal-width bins in the age histogram. Display parameter.
pub const AGE_HIST_BINS: usize = 30;

/// Number of groups shown in the top-groups card.
pub const TOP_GROUPS: usize = 5;

/// Compute every dashboard aggregate over an already-filtered subset.
pub fn summarize(rows: &[Passenger]) -> DashboardSummary {
    DashboardSummary {
        overview: overview(rows),
        by_sex: survival_by_sex(rows),
        by_class: survival_by_class(rows),
        by_family: survival_by_family(rows),
        heatmap: survival_heatmap(rows),
        by_port: survival_by_port(rows),
        age_by_outcome: age_histogram(rows),
        top_groups: top_groups(rows),
        fare_by_outcome: fare_summaries(rows),
    }
}

fn overview(rows: &[Passenger]) -> Overview {
    let total = rows.len();
    let survived = rows.iter().filter(|p| p.survived).count();
    Overview {
        survived,
        total,
        rate_pct: rate_pct(survived, total),
    }
}

/// count/total as a percentage, 0 when the denominator is 0.
fn rate_pct(survived: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        survived as f64 / total as f64 * 100.0
    }
}

/// Group size and mean survival over the rows matching `pred`; None for an
/// empty group.
fn group_stats<F: Fn(&Passenger) -> bool>(rows: &[Passenger], pred: F) -> Option<(usize, f64)> {
    let mut total = 0;
    let mut survived = 0;
    for p in rows.iter().filter(|p| pred(p)) {
        total += 1;
        if p.survived {
            survived += 1;
        }
    }
    (total > 0).then(|| (total, rate_pct(survived, total)))
}

/// Mean survival over the rows matching `pred`; None for an empty group.
fn group_rate<F: Fn(&Passenger) -> bool>(rows: &[Passenger], pred: F) -> Option<f64> {
    group_stats(rows, pred).map(|(_, rate)| rate)
}

fn survival_by_sex(rows: &[Passenger]) -> Vec<(Sex, f64)> {
    Sex::ALL
        .into_iter()
        .filter_map(|sex| group_rate(rows, |p| p.sex == sex).map(|r| (sex, r)))
        .collect()
}

fn survival_by_class(rows: &[Passenger]) -> Vec<(u8, f64)> {
    (1..=3)
        .filter_map(|class| group_rate(rows, |p| p.class == class).map(|r| (class, r)))
        .collect()
}

fn survival_by_family(rows: &[Passenger]) -> Vec<(bool, f64)> {
    [true, false]
        .into_iter()
        .filter_map(|fam| group_rate(rows, |p| p.family_aboard() == fam).map(|r| (fam, r)))
        .collect()
}

fn survival_heatmap(rows: &[Passenger]) -> Vec<HeatmapCell> {
    let mut cells = Vec::new();
    for class in 1..=3 {
        for age_group in AgeGroup::ALL {
            let rate = group_rate(rows, |p| {
                p.class == class && p.age_group() == Some(age_group)
            });
            if let Some(rate_pct) = rate {
                cells.push(HeatmapCell {
                    class,
                    age_group,
                    rate_pct,
                });
            }
        }
    }
    cells
}

fn survival_by_port(rows: &[Passenger]) -> Vec<(Port, f64)> {
    Port::ALL
        .into_iter()
        .filter_map(|port| group_rate(rows, |p| p.port == Some(port)).map(|r| (port, r)))
        .collect()
}

/// Two empirical age distributions (survived vs died) over equal-width bins
/// spanning the observed age range of the subset. Null ages are excluded.
/// Ages equal to the range maximum land in the last bin.
fn age_histogram(rows: &[Passenger]) -> AgeHistogram {
    let aged: Vec<(f64, bool)> = rows
        .iter()
        .filter_map(|p| p.age.map(|a| (a, p.survived)))
        .collect();
    if aged.is_empty() {
        return AgeHistogram::default();
    }

    let min = aged.iter().map(|(a, _)| *a).fold(f64::INFINITY, f64::min);
    let max = aged
        .iter()
        .map(|(a, _)| *a)
        .fold(f64::NEG_INFINITY, f64::max);

    // Degenerate single-value range: one bin of nominal width.
    let span = max - min;
    let (bins, width) = if span <= 0.0 {
        (1, 1.0)
    } else {
        (AGE_HIST_BINS, span / AGE_HIST_BINS as f64)
    };

    let mut survived_counts = vec![0usize; bins];
    let mut died_counts = vec![0usize; bins];
    for (age, survived) in &aged {
        let idx = (((age - min) / width) as usize).min(bins - 1);
        if *survived {
            survived_counts[idx] += 1;
        } else {
            died_counts[idx] += 1;
        }
    }

    AgeHistogram {
        bin_starts: (0..bins).map(|i| min + i as f64 * width).collect(),
        bin_width: width,
        survived_counts,
        died_counts,
    }
}

/// Group by (sex, class, age-group) in encounter order, stable-sort by mean
/// survival descending, keep the best five. Null-age rows have no age group
/// and are excluded.
fn top_groups(rows: &[Passenger]) -> Vec<GroupRate> {
    let mut keys: Vec<(Sex, u8, AgeGroup)> = Vec::new();
    let mut counts: Vec<(usize, usize)> = Vec::new(); // (survived, total)

    for p in rows {
        let Some(age_group) = p.age_group() else {
            continue;
        };
        let key = (p.sex, p.class, age_group);
        let idx = match keys.iter().position(|k| *k == key) {
            Some(i) => i,
            None => {
                keys.push(key);
                counts.push((0, 0));
                keys.len() - 1
            }
        };
        counts[idx].1 += 1;
        if p.survived {
            counts[idx].0 += 1;
        }
    }

    let mut groups: Vec<GroupRate> = keys
        .into_iter()
        .zip(counts)
        .map(|((sex, class, age_group), (survived, total))| GroupRate {
            sex,
            class,
            age_group,
            rate_pct: rate_pct(survived, total),
        })
        .collect();

    // Stable sort keeps encounter order on ties.
    groups.sort_by(|a, b| b.rate_pct.total_cmp(&a.rate_pct));
    groups.truncate(TOP_GROUPS);
    groups
}

fn fare_summaries(rows: &[Passenger]) -> Vec<(Outcome, FiveNumber)> {
    Outcome::ALL
        .into_iter()
        .filter_map(|outcome| {
            let fares: Vec<f64> = rows
                .iter()
                .filter(|p| Outcome::of(p) == outcome)
                .map(|p| p.fare)
                .collect();
            five_number(&fares).map(|s| (outcome, s))
        })
        .collect()
}

/// Five-number summary; None for an empty sample. Quartiles by linear
/// interpolation over the sorted sample.
pub fn five_number(values: &[f64]) -> Option<FiveNumber> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(FiveNumber {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: median(&sorted).unwrap_or(sorted[0]),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Linear-interpolated quantile of an already-sorted sample.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        class: u8,
        sex: Sex,
        age: Option<f64>,
        fare: f64,
        port: Option<Port>,
        survived: bool,
    ) -> Passenger {
        Passenger {
            class,
            sex,
            age,
            fare,
            siblings_spouses: 0,
            parents_children: 0,
            port,
            survived,
        }
    }

    fn sample_rows() -> Vec<Passenger> {
        vec![
            row(1, Sex::Female, Some(30.0), 50.0, Some(Port::Southampton), true),
            row(3, Sex::Male, Some(22.0), 7.0, Some(Port::Cherbourg), false),
            row(1, Sex::Female, Some(40.0), 80.0, Some(Port::Queenstown), true),
            row(2, Sex::Male, None, 13.0, None, false),
            row(3, Sex::Female, Some(4.0), 16.7, Some(Port::Southampton), true),
        ]
    }

    #[test]
    fn empty_subset_yields_zero_aggregates_without_panicking() {
        let summary = summarize(&[]);
        assert_eq!(summary.overview, Overview::default());
        assert!(summary.by_sex.is_empty());
        assert!(summary.by_class.is_empty());
        assert!(summary.by_family.is_empty());
        assert!(summary.heatmap.is_empty());
        assert!(summary.by_port.is_empty());
        assert!(summary.age_by_outcome.is_empty());
        assert!(summary.top_groups.is_empty());
        assert!(summary.fare_by_outcome.is_empty());
    }

    #[test]
    fn overview_counts_and_rate() {
        let summary = summarize(&sample_rows());
        assert_eq!(summary.overview.total, 5);
        assert_eq!(summary.overview.survived, 3);
        assert!((summary.overview.rate_pct - 60.0).abs() < 1e-9);
    }

    #[test]
    fn spec_example_all_female_first_class_survive() {
        let rows = vec![
            row(1, Sex::Female, Some(30.0), 50.0, Some(Port::Southampton), true),
            row(1, Sex::Female, Some(40.0), 80.0, Some(Port::Southampton), true),
        ];
        let summary = summarize(&rows);
        assert!((summary.overview.rate_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn per_sex_group_counts_cover_every_row() {
        let rows = sample_rows();

        // The group sizes behind by_sex must partition the subset.
        let counted: usize = Sex::ALL
            .into_iter()
            .filter_map(|sex| group_stats(&rows, |p| p.sex == sex))
            .map(|(total, _)| total)
            .sum();
        assert_eq!(counted, rows.len());

        let summary = summarize(&rows);
        assert_eq!(summary.by_sex.len(), 2);
        assert!((summary.by_sex[0].1 - 100.0).abs() < 1e-9); // all 3 women survive
        assert!((summary.by_sex[1].1 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn empty_groups_are_skipped_silently() {
        let rows = vec![row(1, Sex::Female, Some(30.0), 50.0, None, true)];
        let summary = summarize(&rows);
        assert_eq!(summary.by_sex, vec![(Sex::Female, 100.0)]);
        assert_eq!(summary.by_class, vec![(1, 100.0)]);
        // The only row has a null port: the port view drops it entirely.
        assert!(summary.by_port.is_empty());
    }

    #[test]
    fn heatmap_excludes_null_ages() {
        let summary = summarize(&sample_rows());
        // The class-2 row is the only one without an age.
        assert!(summary.heatmap.iter().all(|c| c.class != 2));
        // Class 1 collapses to one Adult cell; class 3 has two cells.
        assert_eq!(summary.heatmap.len(), 3);
    }

    #[test]
    fn port_view_always_drops_null_ports() {
        let summary = summarize(&sample_rows());
        let rated: Vec<Port> = summary.by_port.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            rated,
            vec![Port::Cherbourg, Port::Queenstown, Port::Southampton]
        );
        // Southampton: one survivor + one survivor = 100%.
        let southampton = summary
            .by_port
            .iter()
            .find(|(p, _)| *p == Port::Southampton)
            .unwrap();
        assert!((southampton.1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn age_histogram_spans_the_observed_range() {
        let summary = summarize(&sample_rows());
        let hist = &summary.age_by_outcome;
        assert_eq!(hist.bin_starts.len(), AGE_HIST_BINS);
        assert!((hist.bin_starts[0] - 4.0).abs() < 1e-9);
        let total: usize = hist.survived_counts.iter().sum::<usize>()
            + hist.died_counts.iter().sum::<usize>();
        assert_eq!(total, 4); // null age excluded
    }

    #[test]
    fn age_histogram_handles_single_value_range() {
        let rows = vec![
            row(1, Sex::Female, Some(30.0), 50.0, None, true),
            row(2, Sex::Male, Some(30.0), 10.0, None, false),
        ];
        let hist = summarize(&rows).age_by_outcome;
        assert_eq!(hist.bin_starts.len(), 1);
        assert_eq!(hist.survived_counts[0], 1);
        assert_eq!(hist.died_counts[0], 1);
    }

    #[test]
    fn top_groups_sorted_and_capped() {
        let summary = summarize(&sample_rows());
        assert!(summary.top_groups.len() <= TOP_GROUPS);
        for pair in summary.top_groups.windows(2) {
            assert!(pair[0].rate_pct >= pair[1].rate_pct);
        }
    }

    #[test]
    fn top_groups_break_ties_by_encounter_order() {
        let rows = vec![
            row(2, Sex::Male, Some(25.0), 10.0, None, true),
            row(1, Sex::Female, Some(35.0), 60.0, None, true),
        ];
        let groups = summarize(&rows).top_groups;
        assert_eq!(groups.len(), 2);
        // Both rates are 100%; the male group was encountered first.
        assert_eq!(groups[0].sex, Sex::Male);
        assert_eq!(groups[1].sex, Sex::Female);
    }

    #[test]
    fn fare_summary_per_outcome() {
        let summary = summarize(&sample_rows());
        assert_eq!(summary.fare_by_outcome.len(), 2);
        let (outcome, survived) = summary.fare_by_outcome[0];
        assert_eq!(outcome, Outcome::Survived);
        assert!((survived.min - 16.7).abs() < 1e-9);
        assert!((survived.median - 50.0).abs() < 1e-9);
        assert!((survived.max - 80.0).abs() < 1e-9);
    }

    #[test]
    fn five_number_interpolates_quartiles() {
        let summary = five_number(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((summary.q1 - 2.0).abs() < 1e-9);
        assert!((summary.median - 3.0).abs() < 1e-9);
        assert!((summary.q3 - 4.0).abs() < 1e-9);

        let single = five_number(&[7.0]).unwrap();
        assert_eq!(single.min, 7.0);
        assert_eq!(single.q3, 7.0);
        assert!(five_number(&[]).is_none());
    }
}
