use deal_feasibility_core::cost_model::{
    AcquisitionCosts, CostModelDefaults, HoldingCostsMonthly, ResolvedCostModel,
};
use deal_feasibility_core::feasibility::solver::net_profit_at_purchase;
use deal_feasibility_core::feasibility::{
    analyse_deal, compute_feasibility, DealInputs, FeasibilityInput, ValuationContext,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;

fn reference_deal() -> DealInputs {
    DealInputs {
        asking_price: 520000,
        purchase_price: 500000,
        reno_budget: 80000,
        post_reno_sale_price: 750000,
        hold_period_months: 6,
        state: Some("NSW".into()),
    }
}

fn deal(purchase: i64, reno: i64, sale: i64, months: i64) -> DealInputs {
    DealInputs {
        asking_price: purchase,
        purchase_price: purchase,
        reno_budget: reno,
        post_reno_sale_price: sale,
        hold_period_months: months,
        state: None,
    }
}

// ===========================================================================
// Reference scenario
// ===========================================================================

#[test]
fn test_reference_scenario_published_numbers() {
    let valuation = ValuationContext {
        value_range_low: Some(690000),
        value_range_high: Some(760000),
    };
    let result = compute_feasibility(&reference_deal(), &ResolvedCostModel::default(), &valuation);
    let value = serde_json::to_value(&result).unwrap();

    let expected = json!({
        "purchase_analysis": {
            "asking_price": 520000,
            "purchase_price": 500000,
            "cma_value_low": 690000,
            "cma_value_high": 760000,
            "stamp_duty": 22500,
            "legal_conveyancing": 2500,
            "building_pest_inspection": 800,
            "other_acquisition": 0,
            "total_acquisition_cost": 525800
        },
        "renovation": {
            "reno_budget": 80000,
            "contingency_pct": 15.0,
            "contingency_amount": 12000,
            "total_reno_cost": 92000
        },
        "holding_costs": {
            "hold_period_months": 6,
            "loan_amount": 400000,
            "finance_cost_monthly": 2166,
            "council_rates_monthly": 350,
            "water_rates_monthly": 150,
            "insurance_monthly": 250,
            "land_tax_monthly": 0,
            "utilities_monthly": 100,
            "other_holding_monthly": 0,
            "total_monthly": 3016,
            "total_holding_cost": 18100
        },
        "selling": {
            "estimated_sale_price": 750000,
            "agent_commission_pct": 2.0,
            "agent_commission_amount": 15000,
            "marketing_cost": 5000,
            "legal_selling": 1500,
            "styling": 3000,
            "other_selling": 0,
            "total_selling_cost": 24500
        },
        "profitability": {
            "total_cost_in": 660400,
            "total_invested": 635900,
            "estimated_sale_price": 750000,
            "gross_profit": 250000,
            "net_profit": 89600,
            "roi_pct": 14.1,
            "margin_pct": 11.9,
            "profit_per_month": 14933,
            "annualised_roi_pct": 28.2
        },
        "max_purchase_price": {
            "target_profit": 50000,
            "target_roi_pct": 15.0,
            "max_purchase_to_hit_target": 537894
        }
    });

    assert_eq!(value, expected);
}

#[test]
fn test_net_profit_gap_equals_non_purchase_costs() {
    let result = compute_feasibility(
        &reference_deal(),
        &ResolvedCostModel::default(),
        &ValuationContext::default(),
    );
    let pa = &result.purchase_analysis;
    let non_purchase_costs = (pa.total_acquisition_cost - pa.purchase_price)
        + result.renovation.total_reno_cost
        + result.holding_costs.total_holding_cost
        + result.selling.total_selling_cost;

    assert!(result.profitability.net_profit < result.profitability.gross_profit);
    assert_eq!(
        result.profitability.gross_profit - result.profitability.net_profit,
        non_purchase_costs
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_total_cost_in_is_sum_of_stages() {
    let model = ResolvedCostModel::default();
    for purchase in [0, 150000, 433333, 1250000] {
        for reno in [0, 12345, 200000] {
            for months in [0, 1, 5, 18] {
                let d = deal(purchase, reno, purchase + 300000, months);
                let r = compute_feasibility(&d, &model, &ValuationContext::default());
                assert_eq!(
                    r.profitability.total_cost_in,
                    r.purchase_analysis.total_acquisition_cost
                        + r.renovation.total_reno_cost
                        + r.holding_costs.total_holding_cost
                        + r.selling.total_selling_cost
                );
                assert_eq!(
                    r.profitability.total_invested,
                    r.profitability.total_cost_in - r.selling.total_selling_cost
                );
            }
        }
    }
}

#[test]
fn test_zero_denominators_yield_zero() {
    let model = ResolvedCostModel::default();
    let r = compute_feasibility(&deal(400000, 50000, 0, 0), &model, &ValuationContext::default());

    assert_eq!(r.profitability.margin_pct, dec!(0));
    assert_eq!(r.profitability.profit_per_month, 0);
    assert_eq!(r.profitability.annualised_roi_pct, dec!(0));
    assert_eq!(r.holding_costs.total_holding_cost, 0);
}

#[test]
fn test_zero_invested_yields_zero_roi() {
    let zero_fees = CostModelDefaults {
        acquisition_costs: AcquisitionCosts {
            legal_conveyancing: Some(dec!(0)),
            building_pest_inspection: Some(dec!(0)),
            ..Default::default()
        },
        ..Default::default()
    };
    let r = compute_feasibility(
        &deal(0, 0, 250000, 0),
        &zero_fees.resolve(),
        &ValuationContext::default(),
    );
    assert_eq!(r.profitability.total_invested, 0);
    assert_eq!(r.profitability.roi_pct, dec!(0));
}

#[test]
fn test_net_profit_strictly_decreases_with_purchase_price() {
    let model = ResolvedCostModel::default();
    let mut previous: Option<i64> = None;
    for purchase in (300000..=700000).step_by(25000) {
        let r = compute_feasibility(
            &deal(purchase, 80000, 750000, 6),
            &model,
            &ValuationContext::default(),
        );
        if let Some(prev) = previous {
            assert!(
                r.profitability.net_profit < prev,
                "net profit did not fall at purchase {purchase}"
            );
        }
        previous = Some(r.profitability.net_profit);
    }
}

#[test]
fn test_max_purchase_self_consistency() {
    let model = ResolvedCostModel::default();
    let target = 50000;
    for (purchase, reno, sale, months) in [
        (500000, 80000, 750000, 6),
        (320000, 45000, 480000, 4),
        (910000, 150000, 1350000, 9),
        (650000, 0, 700000, 3),
    ] {
        let r = compute_feasibility(
            &deal(purchase, reno, sale, months),
            &model,
            &ValuationContext::default(),
        );
        let max_purchase = r.max_purchase_price.max_purchase_to_hit_target;
        let replayed = net_profit_at_purchase(&r, max_purchase, &model.acquisition_costs);

        assert!(
            (replayed - target).abs() <= 2,
            "max purchase {max_purchase} replays to net profit {replayed}, target {target}"
        );
    }
}

#[test]
fn test_calculation_is_idempotent() {
    let model = CostModelDefaults {
        holding_costs_monthly: HoldingCostsMonthly {
            finance_interest_rate_annual_pct: Some(dec!(7.15)),
            land_tax_monthly: Some(dec!(212.5)),
            ..Default::default()
        },
        ..Default::default()
    }
    .resolve();
    let d = deal(612345, 97531, 905000, 11);

    let first = serde_json::to_string(&compute_feasibility(&d, &model, &ValuationContext::default()))
        .unwrap();
    let second =
        serde_json::to_string(&compute_feasibility(&d, &model, &ValuationContext::default()))
            .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_percentages_carry_one_decimal() {
    let model = ResolvedCostModel::default();
    let r = compute_feasibility(
        &deal(612345, 97531, 905000, 11),
        &model,
        &ValuationContext::default(),
    );
    for pct in [
        r.profitability.roi_pct,
        r.profitability.margin_pct,
        r.profitability.annualised_roi_pct,
    ] {
        assert!(pct.scale() <= 1, "{pct} has more than one decimal place");
    }
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_analyse_deal_from_template_json() {
    let input: FeasibilityInput = serde_json::from_value(json!({
        "deal_inputs": {
            "asking_price": 0,
            "purchase_price": 500000,
            "reno_budget": 80000,
            "post_reno_sale_price": 750000,
            "hold_period_months": 6,
            "state": "QLD"
        },
        "template_defaults": {
            "acquisition_costs": { "stamp_duty_rate_pct": 3.5 },
            "deal_parameters": { "target_profit_min": 60000 }
        }
    }))
    .unwrap();

    let output = analyse_deal(&input).unwrap();
    let r = &output.result;

    // 500000 * 3.5% = 17500
    assert_eq!(r.purchase_analysis.stamp_duty, 17500);
    assert_eq!(r.purchase_analysis.total_acquisition_cost, 520800);
    assert_eq!(r.profitability.net_profit, 94600);
    assert_eq!(r.max_purchase_price.target_profit, 60000);
    // (750000 - 24500 - 92000 - 18100 - 3300 - 60000) / 1.035 = 552100 / 1.035
    assert_eq!(r.max_purchase_price.max_purchase_to_hit_target, 533429);
    assert_eq!(output.assumptions["deal_inputs"]["state"], json!("QLD"));
}
