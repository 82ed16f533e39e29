//! Boundary to the external narrative-commentary collaborator.
//!
//! The calculator never depends on this module. A caller computes and
//! persists the numeric result first, then offers it to a
//! [`NarrativeProvider`]; whatever comes back is merged onto the result only
//! if it parses completely.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::cost_model::ResolvedCostModel;
use crate::feasibility::{Commentary, DealInputs, FeasibilityResult, ValuationContext};

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("Narrative service unavailable: {0}")]
    Unavailable(String),

    #[error("Narrative service timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Malformed narrative response: {0}")]
    Malformed(String),
}

/// Payload offered to the collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeRequest<'a> {
    pub feasibility_model: &'a FeasibilityResult,
    pub deal_inputs: &'a DealInputs,
    pub cost_model_defaults: &'a ResolvedCostModel,
    pub valuation_context: &'a ValuationContext,
}

/// A swappable source of qualitative commentary.
pub trait NarrativeProvider {
    fn request_commentary(
        &self,
        request: &NarrativeRequest<'_>,
    ) -> Result<serde_json::Value, NarrativeError>;
}

impl<F> NarrativeProvider for F
where
    F: Fn(&NarrativeRequest<'_>) -> Result<serde_json::Value, NarrativeError>,
{
    fn request_commentary(
        &self,
        request: &NarrativeRequest<'_>,
    ) -> Result<serde_json::Value, NarrativeError> {
        self(request)
    }
}

/// Ask the collaborator for commentary and merge it onto `result`.
///
/// Returns whether commentary was merged. Provider errors and unusable
/// responses leave `result` exactly as it was.
pub fn annotate(
    result: &mut FeasibilityResult,
    deal: &DealInputs,
    model: &ResolvedCostModel,
    valuation: &ValuationContext,
    provider: Option<&dyn NarrativeProvider>,
) -> bool {
    let Some(provider) = provider else {
        return false;
    };

    let response = {
        let request = NarrativeRequest {
            feasibility_model: result,
            deal_inputs: deal,
            cost_model_defaults: model,
            valuation_context: valuation,
        };
        provider.request_commentary(&request)
    };

    let commentary = match response {
        Ok(value) => match Commentary::from_response(value) {
            Some(commentary) => commentary,
            None => {
                warn!("narrative response discarded: unexpected shape");
                return false;
            }
        },
        Err(e) => {
            warn!(error = %e, "narrative commentary unavailable");
            return false;
        }
    };

    info!(
        go_no_go = ?commentary.go_no_go,
        scenarios = commentary.sensitivity.len(),
        "narrative commentary merged"
    );
    result.merge_commentary(commentary);
    true
}
