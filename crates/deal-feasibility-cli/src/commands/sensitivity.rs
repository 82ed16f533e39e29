use clap::Args;
use serde_json::Value;

use deal_feasibility_core::scenarios::sensitivity::{analyse_deal_sensitivity, DealSensitivityInput};

use crate::input;

/// Arguments for a sale-price by renovation-budget profit grid
#[derive(Args)]
pub struct DealSensitivityArgs {
    /// Path to JSON file with the base deal and both sweep ranges
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_deal_sensitivity(args: DealSensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sens_input: DealSensitivityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input file or stdin JSON required for deal-sensitivity".into());
    };

    let result = analyse_deal_sensitivity(&sens_input)?;
    Ok(serde_json::to_value(result)?)
}
