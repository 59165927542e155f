use sqlx::FromRow;

use crate::error::{Error, Result};
use crate::models::interview::{InterviewResult, InterviewResults};

/// Interview row as stored: the result payload is still raw JSON bytes.
#[derive(Debug, Clone, FromRow)]
pub struct StoredInterview {
    pub public_id: String,
    pub results: Option<Vec<u8>>,
    pub position_public_id: String,
}

pub fn decode_result(raw: &[u8]) -> Result<InterviewResult> {
    serde_json::from_slice(raw).map_err(|e| Error::MalformedStoredData(e.to_string()))
}

/// Decodes every row; the first malformed payload fails the whole batch.
pub fn decode_interviews(rows: Vec<StoredInterview>) -> Result<Vec<InterviewResults>> {
    rows.into_iter()
        .map(|row| {
            let result = match row.results.as_deref() {
                Some(raw) => Some(decode_result(raw).inspect_err(|e| {
                    tracing::error!(
                        interview = %row.public_id,
                        error = %e,
                        "Failed to decode stored interview result"
                    );
                })?),
                None => None,
            };
            Ok(InterviewResults {
                public_id: row.public_id,
                position_public_id: row.position_public_id,
                result,
            })
        })
        .collect()
}
