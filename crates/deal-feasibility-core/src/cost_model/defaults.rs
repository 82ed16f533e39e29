use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FeasibilityError;
use crate::types::{Money, Pct};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Fallback constants
// ---------------------------------------------------------------------------

const STAMP_DUTY_RATE_PCT: Pct = dec!(4.5);
const LEGAL_CONVEYANCING: Money = dec!(2500);
const BUILDING_PEST_INSPECTION: Money = dec!(800);

const FINANCE_INTEREST_RATE_ANNUAL_PCT: Pct = dec!(6.5);
const FINANCE_LVR_PCT: Pct = dec!(80);
const COUNCIL_RATES: Money = dec!(350);
const WATER_RATES: Money = dec!(150);
const INSURANCE: Money = dec!(250);
const UTILITIES: Money = dec!(100);

const CONTINGENCY_PCT: Pct = dec!(15);

const AGENT_COMMISSION_PCT: Pct = dec!(2.0);
const MARKETING: Money = dec!(5000);
const LEGAL_SELLING: Money = dec!(1500);
const STYLING: Money = dec!(3000);

const DEFAULT_HOLD_PERIOD_MONTHS: i64 = 6;
const TARGET_PROFIT_MIN: Money = dec!(50000);
const TARGET_ROI_MIN_PCT: Pct = dec!(15);
const TARGET_MARGIN_MIN_PCT: Pct = dec!(10);

// ---------------------------------------------------------------------------
// Caller-supplied configuration
// ---------------------------------------------------------------------------

/// Cost-model template as supplied by the caller.
///
/// Any subset of fields may be present. Missing groups and fields fall back
/// to the constants above when resolved; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostModelDefaults {
    #[serde(default, alias = "acquisition")]
    pub acquisition_costs: AcquisitionCosts,
    #[serde(default, alias = "holding")]
    pub holding_costs_monthly: HoldingCostsMonthly,
    #[serde(default)]
    pub renovation: RenovationCosts,
    #[serde(default, alias = "selling")]
    pub selling_costs: SellingCosts,
    #[serde(default)]
    pub deal_parameters: DealParameters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionCosts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamp_duty_rate_pct: Option<Pct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_conveyancing: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_pest_inspection: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_acquisition: Option<Money>,
}

/// Monthly holding costs while the property is owned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingCostsMonthly {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_interest_rate_annual_pct: Option<Pct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_lvr_pct: Option<Pct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub council_rates: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_rates: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_tax_monthly: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilities: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_holding: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenovationCosts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contingency_pct: Option<Pct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellingCosts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_commission_pct: Option<Pct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_selling: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styling: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_selling: Option<Money>,
}

/// Deal targets and the hold period offered when the caller gives none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_hold_period_months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_profit_min: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_roi_min_pct: Option<Pct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_margin_min_pct: Option<Pct>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully populated cost model consumed by every calculation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCostModel {
    pub acquisition_costs: ResolvedAcquisition,
    pub holding_costs_monthly: ResolvedHolding,
    pub renovation: ResolvedRenovation,
    pub selling_costs: ResolvedSelling,
    pub deal_parameters: ResolvedDealParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAcquisition {
    pub stamp_duty_rate_pct: Pct,
    pub legal_conveyancing: Money,
    pub building_pest_inspection: Money,
    pub other_acquisition: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedHolding {
    pub finance_interest_rate_annual_pct: Pct,
    pub finance_lvr_pct: Pct,
    pub council_rates: Money,
    pub water_rates: Money,
    pub insurance: Money,
    pub land_tax_monthly: Money,
    pub utilities: Money,
    pub other_holding: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRenovation {
    pub contingency_pct: Pct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSelling {
    pub agent_commission_pct: Pct,
    pub marketing: Money,
    pub legal_selling: Money,
    pub styling: Money,
    pub other_selling: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDealParameters {
    pub default_hold_period_months: i64,
    pub target_profit_min: Money,
    pub target_roi_min_pct: Pct,
    pub target_margin_min_pct: Pct,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl CostModelDefaults {
    /// Parse a cost-model template from JSON text.
    pub fn from_json(text: &str) -> CalcResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(FeasibilityError::InvalidInput {
                field: "cost_model_defaults".into(),
                reason: "Cost-model template must be a JSON object".into(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Resolve every field, substituting the fallback for anything absent.
    ///
    /// Total and side-effect free: `self` is only read.
    pub fn resolve(&self) -> ResolvedCostModel {
        let acq = &self.acquisition_costs;
        let hold = &self.holding_costs_monthly;
        let sell = &self.selling_costs;
        let params = &self.deal_parameters;

        ResolvedCostModel {
            acquisition_costs: ResolvedAcquisition {
                stamp_duty_rate_pct: acq.stamp_duty_rate_pct.unwrap_or(STAMP_DUTY_RATE_PCT),
                legal_conveyancing: acq.legal_conveyancing.unwrap_or(LEGAL_CONVEYANCING),
                building_pest_inspection: acq
                    .building_pest_inspection
                    .unwrap_or(BUILDING_PEST_INSPECTION),
                other_acquisition: acq.other_acquisition.unwrap_or(Decimal::ZERO),
            },
            holding_costs_monthly: ResolvedHolding {
                finance_interest_rate_annual_pct: hold
                    .finance_interest_rate_annual_pct
                    .unwrap_or(FINANCE_INTEREST_RATE_ANNUAL_PCT),
                finance_lvr_pct: hold.finance_lvr_pct.unwrap_or(FINANCE_LVR_PCT),
                council_rates: hold.council_rates.unwrap_or(COUNCIL_RATES),
                water_rates: hold.water_rates.unwrap_or(WATER_RATES),
                insurance: hold.insurance.unwrap_or(INSURANCE),
                land_tax_monthly: hold.land_tax_monthly.unwrap_or(Decimal::ZERO),
                utilities: hold.utilities.unwrap_or(UTILITIES),
                other_holding: hold.other_holding.unwrap_or(Decimal::ZERO),
            },
            renovation: ResolvedRenovation {
                contingency_pct: self.renovation.contingency_pct.unwrap_or(CONTINGENCY_PCT),
            },
            selling_costs: ResolvedSelling {
                agent_commission_pct: sell.agent_commission_pct.unwrap_or(AGENT_COMMISSION_PCT),
                marketing: sell.marketing.unwrap_or(MARKETING),
                legal_selling: sell.legal_selling.unwrap_or(LEGAL_SELLING),
                styling: sell.styling.unwrap_or(STYLING),
                other_selling: sell.other_selling.unwrap_or(Decimal::ZERO),
            },
            deal_parameters: ResolvedDealParameters {
                default_hold_period_months: params
                    .default_hold_period_months
                    .unwrap_or(DEFAULT_HOLD_PERIOD_MONTHS),
                target_profit_min: params.target_profit_min.unwrap_or(TARGET_PROFIT_MIN),
                target_roi_min_pct: params.target_roi_min_pct.unwrap_or(TARGET_ROI_MIN_PCT),
                target_margin_min_pct: params
                    .target_margin_min_pct
                    .unwrap_or(TARGET_MARGIN_MIN_PCT),
            },
        }
    }
}

impl Default for ResolvedCostModel {
    fn default() -> Self {
        CostModelDefaults::default().resolve()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_resolves_to_fallbacks() {
        let resolved = CostModelDefaults::default().resolve();

        assert_eq!(resolved.acquisition_costs.stamp_duty_rate_pct, dec!(4.5));
        assert_eq!(resolved.acquisition_costs.legal_conveyancing, dec!(2500));
        assert_eq!(resolved.acquisition_costs.building_pest_inspection, dec!(800));
        assert_eq!(resolved.acquisition_costs.other_acquisition, Decimal::ZERO);

        assert_eq!(resolved.holding_costs_monthly.finance_interest_rate_annual_pct, dec!(6.5));
        assert_eq!(resolved.holding_costs_monthly.finance_lvr_pct, dec!(80));
        assert_eq!(resolved.holding_costs_monthly.council_rates, dec!(350));
        assert_eq!(resolved.holding_costs_monthly.water_rates, dec!(150));
        assert_eq!(resolved.holding_costs_monthly.insurance, dec!(250));
        assert_eq!(resolved.holding_costs_monthly.utilities, dec!(100));
        assert_eq!(resolved.holding_costs_monthly.land_tax_monthly, Decimal::ZERO);
        assert_eq!(resolved.holding_costs_monthly.other_holding, Decimal::ZERO);

        assert_eq!(resolved.renovation.contingency_pct, dec!(15));

        assert_eq!(resolved.selling_costs.agent_commission_pct, dec!(2.0));
        assert_eq!(resolved.selling_costs.marketing, dec!(5000));
        assert_eq!(resolved.selling_costs.legal_selling, dec!(1500));
        assert_eq!(resolved.selling_costs.styling, dec!(3000));
        assert_eq!(resolved.selling_costs.other_selling, Decimal::ZERO);

        assert_eq!(resolved.deal_parameters.default_hold_period_months, 6);
        assert_eq!(resolved.deal_parameters.target_profit_min, dec!(50000));
        assert_eq!(resolved.deal_parameters.target_roi_min_pct, dec!(15));
        assert_eq!(resolved.deal_parameters.target_margin_min_pct, dec!(10));
    }

    #[test]
    fn test_partial_config_overrides_only_present_fields() {
        let config = CostModelDefaults::from_json(
            r#"{
                "acquisition_costs": { "stamp_duty_rate_pct": 5.5 },
                "selling_costs": { "marketing": 8000 }
            }"#,
        )
        .unwrap();
        let resolved = config.resolve();

        assert_eq!(resolved.acquisition_costs.stamp_duty_rate_pct, dec!(5.5));
        assert_eq!(resolved.acquisition_costs.legal_conveyancing, dec!(2500));
        assert_eq!(resolved.selling_costs.marketing, dec!(8000));
        assert_eq!(resolved.selling_costs.styling, dec!(3000));
    }

    #[test]
    fn test_short_group_names_and_unknown_keys() {
        let config = CostModelDefaults::from_json(
            r#"{
                "holding": { "council_rates": 400, "pool_maintenance": 90 },
                "selling": { "agent_commission_pct": 2.5 },
                "notes": "Sydney inner west template"
            }"#,
        )
        .unwrap();
        let resolved = config.resolve();

        assert_eq!(resolved.holding_costs_monthly.council_rates, dec!(400));
        assert_eq!(resolved.selling_costs.agent_commission_pct, dec!(2.5));
    }

    #[test]
    fn test_resolve_does_not_mutate_config() {
        let config = CostModelDefaults {
            renovation: RenovationCosts {
                contingency_pct: Some(dec!(20)),
            },
            ..Default::default()
        };
        let before = config.clone();
        let _ = config.resolve();
        let _ = config.resolve();
        assert_eq!(config, before);
        assert!(config.acquisition_costs.stamp_duty_rate_pct.is_none());
    }

    #[test]
    fn test_non_object_template_rejected() {
        let err = CostModelDefaults::from_json("[1, 2, 3]").unwrap_err();
        match err {
            FeasibilityError::InvalidInput { field, .. } => {
                assert_eq!(field, "cost_model_defaults");
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
