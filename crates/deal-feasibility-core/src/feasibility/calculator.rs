use std::time::Instant;

use tracing::debug;

use super::inputs::{validate_deal_inputs, DealInputs, FeasibilityInput, ValuationContext};
use super::profitability::profitability;
use super::result::{FeasibilityResult, MaxPurchaseSection};
use super::solver::max_purchase_price;
use super::stages;
use crate::cost_model::ResolvedCostModel;
use crate::types::{floor_whole, with_metadata, ComputationOutput};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full cost/profit breakdown for one deal.
///
/// Pure and total: no validation, no I/O, no clock. Identical inputs give
/// identical results.
pub fn compute_feasibility(
    deal: &DealInputs,
    model: &ResolvedCostModel,
    valuation: &ValuationContext,
) -> FeasibilityResult {
    let purchase_analysis = stages::acquisition(deal, valuation, &model.acquisition_costs);
    let renovation = stages::renovation(deal.reno_budget, &model.renovation);
    let holding_costs = stages::holding(
        deal.purchase_price,
        deal.hold_period_months,
        &model.holding_costs_monthly,
    );
    let selling = stages::selling(deal.post_reno_sale_price, &model.selling_costs);
    debug!(
        total_acquisition_cost = purchase_analysis.total_acquisition_cost,
        total_reno_cost = renovation.total_reno_cost,
        total_holding_cost = holding_costs.total_holding_cost,
        total_selling_cost = selling.total_selling_cost,
        "cost stages accumulated"
    );

    let profitability = profitability(&purchase_analysis, &renovation, &holding_costs, &selling);

    let params = &model.deal_parameters;
    let max_purchase_to_hit_target = max_purchase_price(
        deal.post_reno_sale_price,
        &renovation,
        &holding_costs,
        &selling,
        &model.acquisition_costs,
        params.target_profit_min,
    );
    debug!(
        net_profit = profitability.net_profit,
        max_purchase_to_hit_target, "profitability solved"
    );

    FeasibilityResult {
        purchase_analysis,
        renovation,
        holding_costs,
        selling,
        profitability,
        max_purchase_price: MaxPurchaseSection {
            target_profit: floor_whole(params.target_profit_min),
            target_roi_pct: params.target_roi_min_pct,
            max_purchase_to_hit_target,
        },
        sensitivity: None,
        deal_breakers: None,
        go_no_go: None,
        reasoning: None,
    }
}

/// Validate, resolve the cost model, and compute a feasibility result.
///
/// Returns a `ComputationOutput<FeasibilityResult>` with warnings for deals
/// that miss their targets.
pub fn analyse_deal(
    input: &FeasibilityInput,
) -> CalcResult<ComputationOutput<FeasibilityResult>> {
    let start = Instant::now();

    validate_deal_inputs(&input.deal_inputs)?;

    let model = input.cost_model_defaults.resolve();
    let result = compute_feasibility(&input.deal_inputs, &model, &input.valuation_context);
    let warnings = target_warnings(&result, &model, &input.valuation_context);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Purchase-Renovate-Resell Feasibility (Cost Accumulation)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn target_warnings(
    result: &FeasibilityResult,
    model: &ResolvedCostModel,
    valuation: &ValuationContext,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let pr = &result.profitability;
    let params = &model.deal_parameters;

    if result.is_loss_making() {
        warnings.push(format!(
            "Deal is loss-making: net profit {} on sale price {}",
            pr.net_profit, pr.estimated_sale_price
        ));
    } else if pr.net_profit < result.max_purchase_price.target_profit {
        warnings.push(format!(
            "Net profit {} is below target profit {}",
            pr.net_profit, result.max_purchase_price.target_profit
        ));
    }

    if pr.roi_pct < params.target_roi_min_pct {
        warnings.push(format!(
            "ROI {}% is below target minimum {}%",
            pr.roi_pct, params.target_roi_min_pct
        ));
    }

    if pr.margin_pct < params.target_margin_min_pct {
        warnings.push(format!(
            "Margin {}% is below target minimum {}%",
            pr.margin_pct, params.target_margin_min_pct
        ));
    }

    let max_purchase = result.max_purchase_price.max_purchase_to_hit_target;
    if max_purchase < 0 {
        warnings.push(format!(
            "No positive purchase price reaches target profit (max purchase {max_purchase})"
        ));
    } else if result.purchase_analysis.purchase_price > max_purchase {
        warnings.push(format!(
            "Purchase price {} exceeds max purchase {} for target profit",
            result.purchase_analysis.purchase_price, max_purchase
        ));
    }

    if let Some(high) = valuation.value_range_high {
        if result.purchase_analysis.purchase_price > high {
            warnings.push(format!(
                "Purchase price {} is above the valuation high bound {}",
                result.purchase_analysis.purchase_price, high
            ));
        }
        if pr.estimated_sale_price > high {
            warnings.push(format!(
                "Sale price {} assumes uplift beyond the valuation high bound {}",
                pr.estimated_sale_price, high
            ));
        }
    }

    warnings
}
