use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::result::{
    HoldingSection, ProfitabilitySection, PurchaseAnalysis, RenovationSection, SellingSection,
};
use crate::types::{floor_whole, round_pct, Pct, Whole};

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// `round(numerator / denominator * 100, 1)`, or zero for a zero denominator.
fn ratio_pct(numerator: Whole, denominator: Whole) -> Pct {
    if denominator == 0 {
        return Decimal::ZERO;
    }
    round_pct(Decimal::from(numerator) / Decimal::from(denominator) * HUNDRED)
}

/// Combine the four cost stages into profit and return metrics.
pub fn profitability(
    acquisition: &PurchaseAnalysis,
    renovation: &RenovationSection,
    holding: &HoldingSection,
    selling: &SellingSection,
) -> ProfitabilitySection {
    let sale_price = selling.estimated_sale_price;
    let months = holding.hold_period_months;

    // Saturating so out-of-range inputs clamp instead of panicking
    let total_invested = acquisition
        .total_acquisition_cost
        .saturating_add(renovation.total_reno_cost)
        .saturating_add(holding.total_holding_cost);
    let total_cost_in = total_invested.saturating_add(selling.total_selling_cost);

    let gross_profit = sale_price.saturating_sub(acquisition.purchase_price);
    let net_profit = sale_price.saturating_sub(total_cost_in);

    let roi_pct = ratio_pct(net_profit, total_invested);
    let margin_pct = ratio_pct(net_profit, sale_price);

    let (profit_per_month, annualised_roi_pct) = if months == 0 {
        (0, Decimal::ZERO)
    } else {
        let months = Decimal::from(months);
        (
            floor_whole(Decimal::from(net_profit) / months),
            round_pct(roi_pct * (MONTHS_PER_YEAR / months)),
        )
    };

    ProfitabilitySection {
        total_cost_in,
        total_invested,
        estimated_sale_price: sale_price,
        gross_profit,
        net_profit,
        roi_pct,
        margin_pct,
        profit_per_month,
        annualised_roi_pct,
    }
}
