use serde::{Deserialize, Serialize};

/// Outcome of a newsletter dispatch: how many emails the provider accepted
/// and how many it rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DispatchResult {
    pub sent: u64,
    pub failed: u64,
}

/// Body the dispatcher function answers a successful invocation with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DispatchResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: DispatchResult,
}

impl From<DispatchResult> for DispatchResponse {
    fn from(result: DispatchResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Body the dispatcher function answers a failed invocation with.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
