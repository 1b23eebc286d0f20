use tracing::{debug, warn};

use super::fixtures;
use super::state::{
    reduce, BusinessAction, BusinessMetrics, BusinessProfile, BusinessState, CompetitorBenchmark,
    MarketingMetrics,
};
use crate::transactions::Transaction;
use crate::BizDashResult;

/// Error shown on the dashboard when the initial load fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load initial data. Please try again later.";

/// Where the dashboard's initial data comes from.
pub trait BusinessDataSource {
    fn profile(&self) -> BizDashResult<BusinessProfile>;
    fn metrics(&self) -> BizDashResult<BusinessMetrics>;
    fn marketing(&self) -> BizDashResult<MarketingMetrics>;
    fn benchmarks(&self) -> BizDashResult<CompetitorBenchmark>;
    fn transactions(&self) -> BizDashResult<Vec<Transaction>>;
}

/// Fixed in-memory sample data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl BusinessDataSource for SampleData {
    fn profile(&self) -> BizDashResult<BusinessProfile> {
        Ok(fixtures::sample_profile())
    }

    fn metrics(&self) -> BizDashResult<BusinessMetrics> {
        Ok(fixtures::sample_metrics())
    }

    fn marketing(&self) -> BizDashResult<MarketingMetrics> {
        Ok(fixtures::sample_marketing())
    }

    fn benchmarks(&self) -> BizDashResult<CompetitorBenchmark> {
        Ok(fixtures::sample_benchmarks())
    }

    fn transactions(&self) -> BizDashResult<Vec<Transaction>> {
        Ok(fixtures::sample_transactions())
    }
}

fn fetch_all(source: &impl BusinessDataSource) -> BizDashResult<Vec<BusinessAction>> {
    Ok(vec![
        BusinessAction::SetProfile(source.profile()?),
        BusinessAction::SetMetrics(source.metrics()?),
        BusinessAction::SetMarketing(source.marketing()?),
        BusinessAction::SetBenchmarks(source.benchmarks()?),
        BusinessAction::SetTransactions(source.transactions()?),
        BusinessAction::SetError(None),
    ])
}

/// Build the dashboard's starting state from `source`.
///
/// All five fetches must succeed for any of them to be applied. On failure
/// the state carries [`LOAD_FAILURE_MESSAGE`]. Loading is cleared either way.
pub fn load_initial_state(source: &impl BusinessDataSource) -> BusinessState {
    let state = reduce(BusinessState::default(), BusinessAction::SetLoading(true));

    let state = match fetch_all(source) {
        Ok(actions) => {
            debug!(actions = actions.len(), "initial data loaded");
            actions.into_iter().fold(state, reduce)
        }
        Err(e) => {
            warn!(error = %e, "initial data load failed");
            reduce(
                state,
                BusinessAction::SetError(Some(LOAD_FAILURE_MESSAGE.to_string())),
            )
        }
    };

    reduce(state, BusinessAction::SetLoading(false))
}
