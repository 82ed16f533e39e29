use serde::{Deserialize, Serialize};

/// Qualitative verdict supplied by the narrative collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoNoGo {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "MARGINAL")]
    Marginal,
    #[serde(rename = "NO-GO")]
    NoGo,
}

/// One what-if scenario from the collaborator's sensitivity commentary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityScenario {
    pub scenario: String,
    /// Free-form impact description or amount, as returned
    #[serde(default)]
    pub impact_on_profit: serde_json::Value,
    #[serde(default)]
    pub still_viable: bool,
}

/// The four commentary keys merged onto a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    #[serde(default)]
    pub sensitivity: Vec<SensitivityScenario>,
    #[serde(default)]
    pub deal_breakers: Vec<String>,
    #[serde(default)]
    pub go_no_go: Option<GoNoGo>,
    #[serde(default)]
    pub reasoning: String,
}

impl Commentary {
    /// Interpret a collaborator response.
    ///
    /// Anything other than an object of the expected shape means no
    /// commentary is available.
    pub fn from_response(value: serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_response_parses() {
        let commentary = Commentary::from_response(json!({
            "sensitivity": [
                { "scenario": "Sale price -10%", "impact_on_profit": -75000, "still_viable": false },
                { "scenario": "Reno +20%", "impact_on_profit": "-$18,400", "still_viable": true }
            ],
            "deal_breakers": ["Flood overlay"],
            "go_no_go": "NO-GO",
            "reasoning": "Margin too thin for the hold period."
        }))
        .unwrap();

        assert_eq!(commentary.sensitivity.len(), 2);
        assert!(!commentary.sensitivity[0].still_viable);
        assert_eq!(commentary.deal_breakers, vec!["Flood overlay".to_string()]);
        assert_eq!(commentary.go_no_go, Some(GoNoGo::NoGo));
    }

    #[test]
    fn test_partial_response_fills_defaults() {
        let commentary = Commentary::from_response(json!({ "go_no_go": "MARGINAL" })).unwrap();
        assert!(commentary.sensitivity.is_empty());
        assert!(commentary.deal_breakers.is_empty());
        assert_eq!(commentary.go_no_go, Some(GoNoGo::Marginal));
        assert_eq!(commentary.reasoning, "");
    }

    #[test]
    fn test_non_object_is_no_commentary() {
        assert!(Commentary::from_response(json!("GO")).is_none());
        assert!(Commentary::from_response(json!([1, 2])).is_none());
        assert!(Commentary::from_response(serde_json::Value::Null).is_none());
    }

    #[test]
    fn test_misshapen_object_is_no_commentary() {
        assert!(Commentary::from_response(json!({ "go_no_go": "MAYBE" })).is_none());
        assert!(Commentary::from_response(json!({ "deal_breakers": "none" })).is_none());
    }
}
