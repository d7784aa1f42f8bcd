//! Presentation layer: sidebar widgets, metric cards, and charts.
//!
//! Everything here renders values produced by the data layer; no
//! aggregation logic lives in this module.

pub mod charts;
pub mod metrics;
pub mod panels;
