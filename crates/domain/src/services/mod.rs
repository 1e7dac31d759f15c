//! Domain services.

pub mod dashboard;

pub use dashboard::{DataAccessError, PeriodWindow, StatsAggregator, StatsSource};
