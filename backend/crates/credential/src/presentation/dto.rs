//! API DTOs (Data Transfer Objects)

use serde::Serialize;

/// Response for GET /
///
/// `workFactor` is the numeric result of the self-check: the cost embedded in
/// the freshly produced digest. The digest itself goes out as `digest`; earlier
/// revisions of this endpoint returned the same string under `test`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCheckResponse {
    pub message: String,
    pub digest: String,
    pub work_factor: u32,
    pub matched: bool,
    pub wrong_rejected: bool,
    pub elapsed_ms: u64,
}
