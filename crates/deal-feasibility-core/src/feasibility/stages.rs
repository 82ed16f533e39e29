use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::inputs::{DealInputs, ValuationContext};
use super::result::{HoldingSection, PurchaseAnalysis, RenovationSection, SellingSection};
use crate::cost_model::{ResolvedAcquisition, ResolvedHolding, ResolvedRenovation, ResolvedSelling};
use crate::types::{floor_whole, Money, Pct, Whole};

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// `floor(amount * pct / 100)`
fn pct_of(amount: Whole, pct: Pct) -> Whole {
    floor_whole(Decimal::from(amount) * pct / HUNDRED)
}

// ---------------------------------------------------------------------------
// Acquisition
// ---------------------------------------------------------------------------

pub fn stamp_duty(purchase_price: Whole, acq: &ResolvedAcquisition) -> Whole {
    pct_of(purchase_price, acq.stamp_duty_rate_pct)
}

/// Purchase price plus stamp duty and the fixed acquisition fees.
pub fn total_acquisition_cost(purchase_price: Whole, acq: &ResolvedAcquisition) -> Whole {
    let total: Money = Decimal::from(purchase_price)
        + Decimal::from(stamp_duty(purchase_price, acq))
        + acq.legal_conveyancing
        + acq.building_pest_inspection
        + acq.other_acquisition;
    floor_whole(total)
}

pub fn acquisition(
    deal: &DealInputs,
    valuation: &ValuationContext,
    acq: &ResolvedAcquisition,
) -> PurchaseAnalysis {
    PurchaseAnalysis {
        asking_price: deal.asking_price,
        purchase_price: deal.purchase_price,
        cma_value_low: valuation.value_range_low,
        cma_value_high: valuation.value_range_high,
        stamp_duty: stamp_duty(deal.purchase_price, acq),
        legal_conveyancing: floor_whole(acq.legal_conveyancing),
        building_pest_inspection: floor_whole(acq.building_pest_inspection),
        other_acquisition: floor_whole(acq.other_acquisition),
        total_acquisition_cost: total_acquisition_cost(deal.purchase_price, acq),
    }
}

// ---------------------------------------------------------------------------
// Renovation
// ---------------------------------------------------------------------------

pub fn renovation(reno_budget: Whole, reno: &ResolvedRenovation) -> RenovationSection {
    let contingency_amount = pct_of(reno_budget, reno.contingency_pct);
    RenovationSection {
        reno_budget,
        contingency_pct: reno.contingency_pct,
        contingency_amount,
        total_reno_cost: reno_budget.saturating_add(contingency_amount),
    }
}

// ---------------------------------------------------------------------------
// Holding
// ---------------------------------------------------------------------------

/// Holding costs over the hold period.
///
/// Loan amount and monthly interest stay unrounded until the period total
/// is floored. A zero-month hold costs nothing.
pub fn holding(purchase_price: Whole, months: i64, hold: &ResolvedHolding) -> HoldingSection {
    let loan_amount = Decimal::from(purchase_price) * hold.finance_lvr_pct / HUNDRED;
    let monthly_interest =
        loan_amount * (hold.finance_interest_rate_annual_pct / HUNDRED) / MONTHS_PER_YEAR;
    let monthly_total = monthly_interest
        + hold.council_rates
        + hold.water_rates
        + hold.insurance
        + hold.land_tax_monthly
        + hold.utilities
        + hold.other_holding;
    let total_holding_cost = floor_whole(monthly_total * Decimal::from(months));

    HoldingSection {
        hold_period_months: months,
        loan_amount: floor_whole(loan_amount),
        finance_cost_monthly: floor_whole(monthly_interest),
        council_rates_monthly: floor_whole(hold.council_rates),
        water_rates_monthly: floor_whole(hold.water_rates),
        insurance_monthly: floor_whole(hold.insurance),
        land_tax_monthly: floor_whole(hold.land_tax_monthly),
        utilities_monthly: floor_whole(hold.utilities),
        other_holding_monthly: floor_whole(hold.other_holding),
        total_monthly: floor_whole(monthly_total),
        total_holding_cost,
    }
}

// ---------------------------------------------------------------------------
// Selling
// ---------------------------------------------------------------------------

pub fn selling(sale_price: Whole, sell: &ResolvedSelling) -> SellingSection {
    let agent_commission_amount = pct_of(sale_price, sell.agent_commission_pct);
    let total: Money = Decimal::from(agent_commission_amount)
        + sell.marketing
        + sell.legal_selling
        + sell.styling
        + sell.other_selling;

    SellingSection {
        estimated_sale_price: sale_price,
        agent_commission_pct: sell.agent_commission_pct,
        agent_commission_amount,
        marketing_cost: floor_whole(sell.marketing),
        legal_selling: floor_whole(sell.legal_selling),
        styling: floor_whole(sell.styling),
        other_selling: floor_whole(sell.other_selling),
        total_selling_cost: floor_whole(total),
    }
}
