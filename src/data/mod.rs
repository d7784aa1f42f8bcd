/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  titanic.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PassengerDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ PassengerDataset  │  Vec<Passenger>, column statistics
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → filtered subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  summarize subset → DashboardSummary
///   └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
