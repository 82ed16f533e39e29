use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::result::{FeasibilityResult, HoldingSection, RenovationSection, SellingSection};
use super::stages;
use crate::cost_model::ResolvedAcquisition;
use crate::types::{floor_whole, Money, Whole};

const HUNDRED: Decimal = dec!(100);

/// Highest purchase price whose net profit meets `target_profit`.
///
/// Inverts the acquisition stage only: stamp duty is re-derived from the
/// unknown price, while renovation, holding and selling costs stay at the
/// values computed for the evaluated price (holding finance is therefore not
/// re-derived). `other_acquisition` is not part of the inversion. The
/// result may be negative. A stamp duty rate of -100% yields zero.
pub fn max_purchase_price(
    sale_price: Whole,
    renovation: &RenovationSection,
    holding: &HoldingSection,
    selling: &SellingSection,
    acq: &ResolvedAcquisition,
    target_profit: Money,
) -> Whole {
    let headroom = Decimal::from(sale_price)
        - Decimal::from(selling.total_selling_cost)
        - Decimal::from(renovation.total_reno_cost)
        - Decimal::from(holding.total_holding_cost)
        - acq.legal_conveyancing
        - acq.building_pest_inspection
        - target_profit;
    let denominator = Decimal::ONE + acq.stamp_duty_rate_pct / HUNDRED;

    headroom
        .checked_div(denominator)
        .map(floor_whole)
        .unwrap_or(0)
}

/// Net profit at a different purchase price, re-running only the
/// acquisition stage and holding every other stage at its computed value.
pub fn net_profit_at_purchase(
    result: &FeasibilityResult,
    purchase_price: Whole,
    acq: &ResolvedAcquisition,
) -> Whole {
    let total_cost_in = stages::total_acquisition_cost(purchase_price, acq)
        .saturating_add(result.renovation.total_reno_cost)
        .saturating_add(result.holding_costs.total_holding_cost)
        .saturating_add(result.selling.total_selling_cost);
    result.selling.estimated_sale_price.saturating_sub(total_cost_in)
}
