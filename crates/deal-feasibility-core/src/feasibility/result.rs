use serde::{Deserialize, Serialize};

use super::commentary::{Commentary, GoNoGo, SensitivityScenario};
use crate::types::{Pct, Whole};

/// Acquisition stage: purchase price plus transfer and due-diligence costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseAnalysis {
    pub asking_price: Whole,
    pub purchase_price: Whole,
    pub cma_value_low: Option<Whole>,
    pub cma_value_high: Option<Whole>,
    pub stamp_duty: Whole,
    pub legal_conveyancing: Whole,
    pub building_pest_inspection: Whole,
    pub other_acquisition: Whole,
    pub total_acquisition_cost: Whole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenovationSection {
    pub reno_budget: Whole,
    #[serde(with = "rust_decimal::serde::float")]
    pub contingency_pct: Pct,
    pub contingency_amount: Whole,
    pub total_reno_cost: Whole,
}

/// Holding stage. Monthly figures are display copies floored from the
/// unrounded values used to accumulate `total_holding_cost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingSection {
    pub hold_period_months: i64,
    pub loan_amount: Whole,
    pub finance_cost_monthly: Whole,
    pub council_rates_monthly: Whole,
    pub water_rates_monthly: Whole,
    pub insurance_monthly: Whole,
    pub land_tax_monthly: Whole,
    pub utilities_monthly: Whole,
    pub other_holding_monthly: Whole,
    pub total_monthly: Whole,
    pub total_holding_cost: Whole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellingSection {
    pub estimated_sale_price: Whole,
    #[serde(with = "rust_decimal::serde::float")]
    pub agent_commission_pct: Pct,
    pub agent_commission_amount: Whole,
    pub marketing_cost: Whole,
    pub legal_selling: Whole,
    pub styling: Whole,
    pub other_selling: Whole,
    pub total_selling_cost: Whole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitabilitySection {
    pub total_cost_in: Whole,
    /// Capital committed: excludes selling costs, which come out of proceeds
    pub total_invested: Whole,
    pub estimated_sale_price: Whole,
    pub gross_profit: Whole,
    pub net_profit: Whole,
    #[serde(with = "rust_decimal::serde::float")]
    pub roi_pct: Pct,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_pct: Pct,
    pub profit_per_month: Whole,
    #[serde(with = "rust_decimal::serde::float")]
    pub annualised_roi_pct: Pct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxPurchaseSection {
    pub target_profit: Whole,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_roi_pct: Pct,
    /// Negative when no positive price reaches the target
    pub max_purchase_to_hit_target: Whole,
}

/// Full cost/profit breakdown for one deal.
///
/// The commentary fields are only ever written by [`merge_commentary`].
///
/// [`merge_commentary`]: FeasibilityResult::merge_commentary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityResult {
    pub purchase_analysis: PurchaseAnalysis,
    pub renovation: RenovationSection,
    pub holding_costs: HoldingSection,
    pub selling: SellingSection,
    pub profitability: ProfitabilitySection,
    pub max_purchase_price: MaxPurchaseSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Vec<SensitivityScenario>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_breakers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_no_go: Option<GoNoGo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl FeasibilityResult {
    /// Assign all four commentary keys, overwriting earlier values.
    pub fn merge_commentary(&mut self, commentary: Commentary) {
        self.sensitivity = Some(commentary.sensitivity);
        self.deal_breakers = Some(commentary.deal_breakers);
        self.go_no_go = commentary.go_no_go;
        self.reasoning = Some(commentary.reasoning);
    }

    pub fn has_commentary(&self) -> bool {
        self.sensitivity.is_some()
            || self.deal_breakers.is_some()
            || self.go_no_go.is_some()
            || self.reasoning.is_some()
    }

    /// True when the deal loses money at the evaluated purchase price.
    pub fn is_loss_making(&self) -> bool {
        self.profitability.net_profit < 0
    }
}
