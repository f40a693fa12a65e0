pub mod records;
pub mod stats;

use uuid::Uuid;

use clubstats_common::StatsError;

use crate::error::ApiError;

fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| StatsError::Validation(format!("{what} id must be a UUID, got {raw:?}")).into())
}
