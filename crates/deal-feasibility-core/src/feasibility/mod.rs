//! Purchase-renovate-resell feasibility model.
//!
//! Four accumulation stages (acquisition, renovation, holding, selling) feed
//! a profitability stage, followed by a max-purchase-price solver. Every
//! function here is pure: the same inputs always produce the same record.

pub mod calculator;
pub mod commentary;
pub mod inputs;
pub mod profitability;
pub mod result;
pub mod solver;
pub mod stages;

pub use calculator::{analyse_deal, compute_feasibility};
pub use commentary::{Commentary, GoNoGo, SensitivityScenario};
pub use inputs::{
    resolve_sale_price, validate_deal_inputs, DealInputs, FeasibilityInput, SalePriceSource,
    ValuationContext,
};
pub use result::{
    FeasibilityResult, HoldingSection, MaxPurchaseSection, ProfitabilitySection,
    PurchaseAnalysis, RenovationSection, SellingSection,
};
