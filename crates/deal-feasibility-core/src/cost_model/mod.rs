pub mod defaults;

pub use defaults::{
    AcquisitionCosts, CostModelDefaults, DealParameters, HoldingCostsMonthly, RenovationCosts,
    ResolvedAcquisition, ResolvedCostModel, ResolvedDealParameters, ResolvedHolding,
    ResolvedRenovation, ResolvedSelling, SellingCosts,
};
