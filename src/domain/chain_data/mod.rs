//! Day aggregates and blocks as loaded from the chain data feeds.

pub mod dataset;
pub mod entities;

pub use dataset::{Dataset, MetricDomain, MetricDomains};
pub use entities::{BlockRecord, DayRecord};
