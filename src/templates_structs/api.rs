use serde::{Deserialize, Serialize};

/// Error body for every non-2xx JSON answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    /// Records per collection, keyed by collection path.
    pub collections: std::collections::BTreeMap<String, usize>,
}
