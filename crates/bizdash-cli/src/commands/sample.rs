use clap::Args;
use serde_json::Value;

use bizdash_core::dashboard::{self, SampleData};

/// Arguments for printing the sample data set
#[derive(Args)]
pub struct SampleArgs {
    /// Print the whole dashboard state instead of just the transactions
    #[arg(long)]
    pub state: bool,
}

pub fn run_sample(args: SampleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let state = dashboard::load_initial_state(&SampleData);
    if let Some(ref error) = state.error {
        return Err(error.clone().into());
    }
    if args.state {
        Ok(serde_json::to_value(state)?)
    } else {
        Ok(serde_json::to_value(state.transactions)?)
    }
}
