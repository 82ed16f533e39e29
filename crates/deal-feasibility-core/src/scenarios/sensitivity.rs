use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FeasibilityError;
use crate::feasibility::{compute_feasibility, validate_deal_inputs, FeasibilityInput};
use crate::types::*;
use crate::CalcResult;

const HUNDRED: Decimal = dec!(100);
const MAX_GRID_CELLS: usize = 10_000;

/// Sweep of percentage-point changes, e.g. -10 to 10 in steps of 5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: Pct,
    pub max: Pct,
    pub step: Pct,
}

/// Input for a 2-way net-profit sensitivity on a deal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealSensitivityInput {
    /// Base case the sweeps are applied to
    pub base: FeasibilityInput,
    /// Change applied to the post-renovation sale price (rows)
    pub sale_price_change_pct: SweepRange,
    /// Change applied to the renovation budget (columns)
    pub reno_budget_change_pct: SweepRange,
}

/// Output of a 2-way net-profit sensitivity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealSensitivityOutput {
    pub sale_price_changes: Vec<Pct>,
    pub reno_budget_changes: Vec<Pct>,
    /// net_profit[i][j] at sale_price_changes[i] and reno_budget_changes[j]
    pub net_profit: Vec<Vec<Whole>>,
    /// Net profit of the unchanged deal
    pub base_case_net_profit: Whole,
    /// Grid cell closest to no change (row, col)
    pub base_case_position: (usize, usize),
    pub target_profit: Whole,
    pub cells_meeting_target: usize,
    pub cells_total: usize,
}

/// Number of values in a sweep from min to max, max always included.
///
/// Counted arithmetically so an oversized sweep is rejected before anything
/// is allocated.
fn sweep_len(name: &str, range: &SweepRange) -> CalcResult<usize> {
    let invalid = |reason: String| FeasibilityError::InvalidInput {
        field: name.into(),
        reason,
    };
    if range.step <= Decimal::ZERO {
        return Err(invalid("Step must be positive".into()));
    }
    if range.min > range.max {
        return Err(invalid("Min must be <= max".into()));
    }

    let too_many = || invalid(format!("Sweep exceeds the {MAX_GRID_CELLS} value limit"));
    let steps = range
        .max
        .checked_sub(range.min)
        .and_then(|span| span.checked_div(range.step))
        .ok_or_else(too_many)?
        .floor();
    let count = steps
        .to_usize()
        .and_then(|n| n.checked_add(1))
        .filter(|&n| n <= MAX_GRID_CELLS)
        .ok_or_else(too_many)?;

    // Step does not land on max: max is appended as a final value
    let last = range.min + range.step * Decimal::from(count - 1);
    Ok(if last < range.max { count + 1 } else { count })
}

/// The `len` sweep values, the last one clamped to max.
fn sweep_values(range: &SweepRange, len: usize) -> Vec<Pct> {
    (0..len)
        .map(|i| (range.min + range.step * Decimal::from(i)).min(range.max))
        .collect()
}

/// Index of the value closest to zero change.
fn closest_to_zero(values: &[Pct]) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| v.abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Apply a percentage-point change to a whole amount, flooring the result.
fn adjust(amount: Whole, change_pct: Pct) -> Whole {
    floor_whole(Decimal::from(amount) * (Decimal::ONE + change_pct / HUNDRED))
}

/// Sweep sale price and renovation budget and report net profit per cell.
///
/// Every cell is a full re-run of the calculator, so holding and selling
/// costs follow the adjusted figures.
pub fn analyse_deal_sensitivity(
    input: &DealSensitivityInput,
) -> CalcResult<ComputationOutput<DealSensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_deal_inputs(&input.base.deal_inputs)?;

    let sale_len = sweep_len("sale_price_change_pct", &input.sale_price_change_pct)?;
    let reno_len = sweep_len("reno_budget_change_pct", &input.reno_budget_change_pct)?;

    let cells_total = sale_len * reno_len;
    if cells_total > MAX_GRID_CELLS {
        return Err(FeasibilityError::InvalidInput {
            field: "sale_price_change_pct".into(),
            reason: format!("Grid of {cells_total} cells exceeds the {MAX_GRID_CELLS} cell limit"),
        });
    }
    let sale_changes = sweep_values(&input.sale_price_change_pct, sale_len);
    let reno_changes = sweep_values(&input.reno_budget_change_pct, reno_len);

    let model = input.base.cost_model_defaults.resolve();
    let valuation = &input.base.valuation_context;
    let base_deal = &input.base.deal_inputs;
    let target_profit = floor_whole(model.deal_parameters.target_profit_min);

    let mut matrix = Vec::with_capacity(sale_changes.len());
    let mut cells_meeting_target = 0;

    for sale_change in &sale_changes {
        let mut row = Vec::with_capacity(reno_changes.len());
        for reno_change in &reno_changes {
            let mut deal = base_deal.clone();
            deal.post_reno_sale_price = adjust(base_deal.post_reno_sale_price, *sale_change);
            deal.reno_budget = adjust(base_deal.reno_budget, *reno_change);

            let net_profit = compute_feasibility(&deal, &model, valuation)
                .profitability
                .net_profit;
            if net_profit >= target_profit {
                cells_meeting_target += 1;
            }
            row.push(net_profit);
        }
        matrix.push(row);
    }

    let base_case_net_profit = compute_feasibility(base_deal, &model, valuation)
        .profitability
        .net_profit;
    let base_row = closest_to_zero(&sale_changes);
    let base_col = closest_to_zero(&reno_changes);

    if !sale_changes[base_row].is_zero() || !reno_changes[base_col].is_zero() {
        warnings.push(
            "Sweep ranges do not include a zero change; base case lies outside the grid".into(),
        );
    }
    if cells_meeting_target == 0 {
        warnings.push(format!(
            "No scenario in the grid reaches target profit {target_profit}"
        ));
    }

    let output = DealSensitivityOutput {
        sale_price_changes: sale_changes,
        reno_budget_changes: reno_changes,
        net_profit: matrix,
        base_case_net_profit,
        base_case_position: (base_row, base_col),
        target_profit,
        cells_meeting_target,
        cells_total,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "2-Way Deal Sensitivity (Sale Price x Renovation Budget)",
        &serde_json::json!({
            "sale_price_change_pct": input.sale_price_change_pct,
            "reno_budget_change_pct": input.reno_budget_change_pct,
            "output_metric": "net_profit",
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_model::CostModelDefaults;
    use crate::feasibility::{DealInputs, ValuationContext};

    fn sample_input() -> DealSensitivityInput {
        DealSensitivityInput {
            base: FeasibilityInput {
                deal_inputs: DealInputs {
                    asking_price: 0,
                    purchase_price: 500000,
                    reno_budget: 80000,
                    post_reno_sale_price: 750000,
                    hold_period_months: 6,
                    state: None,
                },
                cost_model_defaults: CostModelDefaults::default(),
                valuation_context: ValuationContext::default(),
            },
            sale_price_change_pct: SweepRange {
                min: dec!(-10),
                max: dec!(10),
                step: dec!(5),
            },
            reno_budget_change_pct: SweepRange {
                min: dec!(0),
                max: dec!(20),
                step: dec!(10),
            },
        }
    }

    #[test]
    fn test_grid_dimensions_and_base_case() {
        let result = analyse_deal_sensitivity(&sample_input()).unwrap();
        let out = &result.result;

        // Sale: -10, -5, 0, 5, 10; reno: 0, 10, 20
        assert_eq!(out.sale_price_changes.len(), 5);
        assert_eq!(out.reno_budget_changes.len(), 3);
        assert_eq!(out.cells_total, 15);
        assert_eq!(out.base_case_position, (2, 0));
        assert_eq!(out.base_case_net_profit, 89600);
        assert_eq!(out.net_profit[2][0], 89600);
    }

    #[test]
    fn test_profit_falls_with_lower_sale_and_higher_reno() {
        let result = analyse_deal_sensitivity(&sample_input()).unwrap();
        let m = &result.result.net_profit;

        for row in m {
            for pair in row.windows(2) {
                assert!(pair[1] < pair[0], "Higher reno budget should cut profit");
            }
        }
        for col in 0..m[0].len() {
            for i in 1..m.len() {
                assert!(m[i][col] > m[i - 1][col], "Higher sale price should lift profit");
            }
        }
    }

    #[test]
    fn test_sale_price_cell_value() {
        let result = analyse_deal_sensitivity(&sample_input()).unwrap();
        // Sale -10% = 675000: commission 13500, selling 23000
        // Cost = 525800 + 92000 + 18100 + 23000 = 658900; net = 16100
        assert_eq!(result.result.net_profit[0][0], 16100);
    }

    #[test]
    fn test_sweep_with_non_exact_step() {
        let range = SweepRange {
            min: dec!(0),
            max: dec!(10),
            step: dec!(3),
        };
        let len = sweep_len("test", &range).unwrap();
        assert_eq!(
            sweep_values(&range, len),
            vec![dec!(0), dec!(3), dec!(6), dec!(9), dec!(10)]
        );
    }

    #[test]
    fn test_sweep_landing_exactly_on_max() {
        let range = SweepRange {
            min: dec!(-10),
            max: dec!(10),
            step: dec!(5),
        };
        assert_eq!(sweep_len("test", &range).unwrap(), 5);
    }

    #[test]
    fn test_fine_sweep_rejected_before_allocation() {
        let mut input = sample_input();
        input.sale_price_change_pct = SweepRange {
            min: dec!(-100000),
            max: dec!(100000),
            step: dec!(0.001),
        };
        input.reno_budget_change_pct = SweepRange {
            min: dec!(0),
            max: dec!(0),
            step: dec!(1),
        };
        match analyse_deal_sensitivity(&input) {
            Err(FeasibilityError::InvalidInput { field, .. }) => {
                assert_eq!(field, "sale_price_change_pct")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_sweep_spanning_decimal_range_rejected() {
        let range = SweepRange {
            min: Decimal::MIN,
            max: Decimal::MAX,
            step: dec!(1),
        };
        assert!(sweep_len("test", &range).is_err());

        let near_max = SweepRange {
            min: Decimal::MAX - dec!(1),
            max: Decimal::MAX,
            step: dec!(1),
        };
        assert_eq!(sweep_values(&near_max, sweep_len("test", &near_max).unwrap()).len(), 2);
    }

    #[test]
    fn test_grid_product_over_limit_rejected() {
        let mut input = sample_input();
        input.sale_price_change_pct = SweepRange {
            min: dec!(0),
            max: dec!(200),
            step: dec!(1),
        };
        input.reno_budget_change_pct = SweepRange {
            min: dec!(0),
            max: dec!(100),
            step: dec!(1),
        };
        // 201 x 101 = 20301 cells
        assert!(analyse_deal_sensitivity(&input).is_err());
    }

    #[test]
    fn test_invalid_step() {
        let mut input = sample_input();
        input.reno_budget_change_pct.step = Decimal::ZERO;
        assert!(analyse_deal_sensitivity(&input).is_err());
    }

    #[test]
    fn test_missing_zero_change_warns() {
        let mut input = sample_input();
        input.sale_price_change_pct = SweepRange {
            min: dec!(2),
            max: dec!(6),
            step: dec!(2),
        };
        let result = analyse_deal_sensitivity(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("zero change")));
    }
}
