//! Dashboard state container.
//!
//! State is an immutable value: every change is expressed as an action fed
//! through [`reduce`], which returns the next state.

pub mod fixtures;
pub mod source;
pub mod state;

pub use source::{load_initial_state, BusinessDataSource, SampleData, LOAD_FAILURE_MESSAGE};
pub use state::{
    reduce, try_reduce, BusinessAction, BusinessMetrics, BusinessProfile, BusinessSize,
    BusinessState, CompetitorBenchmark, CostBreakdown, Location, MarketingMetrics,
};
