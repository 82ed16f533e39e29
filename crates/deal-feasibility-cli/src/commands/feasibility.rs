use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use deal_feasibility_core::cost_model::CostModelDefaults;
use deal_feasibility_core::feasibility::{
    analyse_deal, resolve_sale_price, DealInputs, FeasibilityInput, SalePriceSource,
    ValuationContext,
};
use deal_feasibility_core::narrative::annotate;
use deal_feasibility_core::with_metadata;

use crate::commands::narrative::{self, NarrativeArgs};
use crate::input;
use crate::output::artifact;

/// Deal inputs shared by the feasibility and max-purchase commands
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DealArgs {
    /// Path to JSON input file (deal flags may not be combined with it)
    #[arg(long)]
    pub input: Option<String>,

    /// Asking price or guide (defaults to the purchase price)
    #[arg(long)]
    pub asking_price: Option<i64>,

    /// Intended purchase price
    #[arg(long)]
    pub purchase_price: Option<i64>,

    /// Renovation budget before contingency (defaults to 0)
    #[arg(long)]
    pub reno_budget: Option<i64>,

    /// Estimated post-renovation sale price
    #[arg(long, conflicts_with = "sale_price_from_valuation")]
    pub sale_price: Option<i64>,

    /// Use the valuation high bound as the sale price
    #[arg(long, requires = "value_high")]
    pub sale_price_from_valuation: bool,

    /// Hold period in months (defaults to the cost model's default)
    #[arg(long)]
    pub hold_months: Option<i64>,

    /// State code
    #[arg(long)]
    pub state: Option<String>,

    /// Cost-model template (JSON or YAML)
    #[arg(long)]
    pub defaults: Option<String>,

    /// Valuation range low bound
    #[arg(long)]
    pub value_low: Option<i64>,

    /// Valuation range high bound
    #[arg(long)]
    pub value_high: Option<i64>,
}

/// Arguments for a full feasibility run
#[derive(Args)]
pub struct FeasibilityArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    #[command(flatten)]
    pub narrative: NarrativeArgs,

    /// Save the numeric result here before any commentary is requested
    #[arg(long)]
    pub save_calcs: Option<String>,

    /// Save the final (possibly annotated) result here
    #[arg(long)]
    pub save_result: Option<String>,
}

/// Arguments for the max-purchase solver
#[derive(Args)]
pub struct MaxPurchaseArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    /// Target net profit (overrides the cost model's target_profit_min)
    #[arg(long)]
    pub target_profit: Option<Decimal>,
}

/// Arguments for printing a resolved cost model
#[derive(Args)]
pub struct DefaultsArgs {
    /// Cost-model template (JSON or YAML); fallbacks apply when omitted
    #[arg(long)]
    pub defaults: Option<String>,
}

fn load_defaults(path: Option<&str>) -> Result<CostModelDefaults, Box<dyn std::error::Error>> {
    match path {
        Some(path) => input::file::read_structured(path),
        None => Ok(CostModelDefaults::default()),
    }
}

/// Deal flags that were set, for rejecting them alongside a JSON document.
fn deal_flags_given(args: &DealArgs) -> Vec<&'static str> {
    [
        ("--asking-price", args.asking_price.is_some()),
        ("--purchase-price", args.purchase_price.is_some()),
        ("--reno-budget", args.reno_budget.is_some()),
        ("--sale-price", args.sale_price.is_some()),
        ("--sale-price-from-valuation", args.sale_price_from_valuation),
        ("--hold-months", args.hold_months.is_some()),
        ("--state", args.state.is_some()),
        ("--value-low", args.value_low.is_some()),
        ("--value-high", args.value_high.is_some()),
    ]
    .into_iter()
    .filter_map(|(flag, given)| given.then_some(flag))
    .collect()
}

/// Assemble a `FeasibilityInput` from a file, stdin, or individual flags.
pub fn build_input(args: &DealArgs) -> Result<FeasibilityInput, Box<dyn std::error::Error>> {
    let document: Option<FeasibilityInput> = if let Some(ref path) = args.input {
        Some(input::file::read_json(path)?)
    } else {
        input::stdin::read_stdin()?
    };
    assemble_input(args, document)
}

/// A JSON document takes only `--defaults` from the flags; any deal flag
/// next to it is an error.
fn assemble_input(
    args: &DealArgs,
    document: Option<FeasibilityInput>,
) -> Result<FeasibilityInput, Box<dyn std::error::Error>> {
    if let Some(mut document) = document {
        let conflicting = deal_flags_given(args);
        if !conflicting.is_empty() {
            return Err(format!(
                "{} cannot be combined with --input or piped JSON",
                conflicting.join(", ")
            )
            .into());
        }
        if args.defaults.is_some() {
            document.cost_model_defaults = load_defaults(args.defaults.as_deref())?;
        }
        return Ok(document);
    }

    let cost_model_defaults = load_defaults(args.defaults.as_deref())?;
    let valuation_context = ValuationContext {
        value_range_low: args.value_low,
        value_range_high: args.value_high,
    };

    let purchase_price = args
        .purchase_price
        .ok_or("--purchase-price is required (or provide --input)")?;
    let sale_source = if args.sale_price_from_valuation {
        SalePriceSource::ValuationHigh
    } else {
        SalePriceSource::Explicit(
            args.sale_price
                .ok_or("--sale-price or --sale-price-from-valuation is required (or provide --input)")?,
        )
    };
    let post_reno_sale_price = resolve_sale_price(sale_source, &valuation_context)?;
    let hold_period_months = args.hold_months.unwrap_or_else(|| {
        cost_model_defaults
            .resolve()
            .deal_parameters
            .default_hold_period_months
    });

    Ok(FeasibilityInput {
        deal_inputs: DealInputs {
            asking_price: args.asking_price.unwrap_or(purchase_price),
            purchase_price,
            reno_budget: args.reno_budget.unwrap_or(0),
            post_reno_sale_price,
            hold_period_months,
            state: args.state.clone(),
        },
        cost_model_defaults,
        valuation_context,
    })
}

pub fn run_feasibility(args: FeasibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let feas_input = build_input(&args.deal)?;
    let mut output = analyse_deal(&feas_input)?;
    info!(
        net_profit = output.result.profitability.net_profit,
        "feasibility computed"
    );

    // The numeric result must be on disk before the collaborator is called
    if let Some(ref path) = args.save_calcs {
        artifact::write_artifact(path, &output.result)?;
    }

    if let Some(provider) = narrative::provider_from_args(&args.narrative) {
        let model = feas_input.cost_model_defaults.resolve();
        let merged = annotate(
            &mut output.result,
            &feas_input.deal_inputs,
            &model,
            &feas_input.valuation_context,
            Some(provider.as_ref()),
        );
        if !merged {
            output
                .warnings
                .push("Narrative commentary unavailable; numeric result only".into());
        }
    }

    if let Some(ref path) = args.save_result {
        artifact::write_artifact(path, &output.result)?;
    }

    Ok(serde_json::to_value(output)?)
}

pub fn run_max_purchase(args: MaxPurchaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut feas_input = build_input(&args.deal)?;
    if let Some(target) = args.target_profit {
        feas_input
            .cost_model_defaults
            .deal_parameters
            .target_profit_min = Some(target);
    }

    let output = analyse_deal(&feas_input)?;
    let result = with_metadata(
        "Max Purchase Price (Acquisition Stage Inversion)",
        &feas_input,
        output.warnings,
        output.metadata.computation_time_us,
        output.result.max_purchase_price,
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_defaults(args: DefaultsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let resolved = load_defaults(args.defaults.as_deref())?.resolve();
    Ok(serde_json::json!({ "result": resolved }))
}
