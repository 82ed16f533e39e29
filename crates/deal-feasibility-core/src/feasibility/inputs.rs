use serde::{Deserialize, Serialize};

use crate::cost_model::CostModelDefaults;
use crate::error::FeasibilityError;
use crate::types::Whole;
use crate::CalcResult;

/// Largest accepted currency amount (one quadrillion units).
pub const MAX_CURRENCY_AMOUNT: Whole = 1_000_000_000_000_000;

/// Longest accepted hold period (100 years).
pub const MAX_HOLD_PERIOD_MONTHS: i64 = 1200;

/// Deal-specific inputs for one calculation run.
///
/// Currency fields are whole currency units. Negative values are accepted
/// by the formulas; callers reject them with [`validate_deal_inputs`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealInputs {
    /// Asking price or guide (informational only)
    #[serde(default)]
    pub asking_price: Whole,
    /// Intended purchase price
    pub purchase_price: Whole,
    /// Base renovation budget, before contingency
    pub reno_budget: Whole,
    /// Estimated sale price after renovation
    pub post_reno_sale_price: Whole,
    /// Expected hold period in months
    pub hold_period_months: i64,
    /// State code (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// External valuation range carried through for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_range_low: Option<Whole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_range_high: Option<Whole>,
}

/// Where the post-renovation sale price comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalePriceSource {
    /// Caller-supplied figure
    Explicit(Whole),
    /// Defer to the valuation range high bound
    ValuationHigh,
}

/// Complete input document for a feasibility run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityInput {
    pub deal_inputs: DealInputs,
    #[serde(default, alias = "template_defaults")]
    pub cost_model_defaults: CostModelDefaults,
    #[serde(default)]
    pub valuation_context: ValuationContext,
}

/// Resolve the sale price to use for a run.
pub fn resolve_sale_price(
    source: SalePriceSource,
    valuation: &ValuationContext,
) -> CalcResult<Whole> {
    match source {
        SalePriceSource::Explicit(price) => Ok(price),
        SalePriceSource::ValuationHigh => {
            valuation
                .value_range_high
                .ok_or_else(|| FeasibilityError::InvalidInput {
                    field: "valuation_context.value_range_high".into(),
                    reason: "Sale price deferred to valuation but no high bound supplied".into(),
                })
        }
    }
}

/// Reject negative or out-of-range currency amounts and hold periods.
pub fn validate_deal_inputs(deal: &DealInputs) -> CalcResult<()> {
    let currency_fields = [
        ("asking_price", deal.asking_price),
        ("purchase_price", deal.purchase_price),
        ("reno_budget", deal.reno_budget),
        ("post_reno_sale_price", deal.post_reno_sale_price),
    ];
    for (field, value) in currency_fields {
        if value < 0 {
            return Err(FeasibilityError::InvalidInput {
                field: field.into(),
                reason: "Currency amount must be non-negative".into(),
            });
        }
        if value > MAX_CURRENCY_AMOUNT {
            return Err(FeasibilityError::InvalidInput {
                field: field.into(),
                reason: format!("Currency amount must not exceed {MAX_CURRENCY_AMOUNT}"),
            });
        }
    }

    if deal.hold_period_months < 0 {
        return Err(FeasibilityError::InvalidInput {
            field: "hold_period_months".into(),
            reason: "Hold period must be non-negative".into(),
        });
    }
    if deal.hold_period_months > MAX_HOLD_PERIOD_MONTHS {
        return Err(FeasibilityError::InvalidInput {
            field: "hold_period_months".into(),
            reason: format!("Hold period must not exceed {MAX_HOLD_PERIOD_MONTHS} months"),
        });
    }

    Ok(())
}
