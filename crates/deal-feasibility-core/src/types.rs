use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Working currency amount. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Whole currency units as they appear in a result record.
pub type Whole = i64;

/// Percentage points (4.5 = 4.5%). Cost-model rates follow the template
/// convention, unlike a decimal fraction.
pub type Pct = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Floor a decimal amount to whole currency units.
///
/// Values beyond the i64 range saturate.
pub fn floor_whole(amount: Money) -> Whole {
    use rust_decimal::prelude::ToPrimitive;

    let floored = amount.floor();
    floored.to_i64().unwrap_or(if floored.is_sign_negative() {
        Whole::MIN
    } else {
        Whole::MAX
    })
}

/// Round a percentage to one decimal place (banker's rounding).
pub fn round_pct(value: Pct) -> Pct {
    value.round_dp(1)
}
