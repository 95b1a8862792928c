//! Record metadata shared by every persisted entity
//!
//! Every entity carries an identifier plus creation and update timestamps.
//! When an entity is rebuilt from storage (or from any other external
//! source) that metadata is untrusted and goes through [`validate_props`]
//! before the entity exists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Field label used in messages about the creation timestamp
pub const CREATION_DATE: &str = "Creation date";
/// Field label used in messages about the update timestamp
pub const UPDATE_DATE: &str = "Update date";

/// Validation failures on record metadata and date fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("ID must be a valid UUID.")]
    InvalidId,

    #[error("{0} must be a valid date.")]
    InvalidDate(&'static str),

    #[error("{0} cannot be in the future.")]
    FutureDate(&'static str),

    #[error("Update date cannot be before creation date.")]
    UpdatedBeforeCreated,
}

/// Externally supplied metadata for reconstructing an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProps {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordProps {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            updated_at,
        }
    }
}

/// Metadata that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMeta {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parses a canonical hyphenated UUID
///
/// Only the 36 character `8-4-4-4-12` form is accepted; braced, URN and
/// simple forms are rejected even though `uuid` could parse them.
pub fn parse_uuid(raw: &str) -> Result<Uuid, RecordError> {
    if raw.len() != 36 {
        return Err(RecordError::InvalidId);
    }
    Uuid::try_parse(raw).map_err(|_| RecordError::InvalidId)
}

/// Parses a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, RecordError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        .map_err(|_| RecordError::InvalidDate(field))
}

/// Rejects timestamps strictly after `now`
pub fn ensure_not_future(
    field: &'static str,
    value: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), RecordError> {
    if value > now {
        return Err(RecordError::FutureDate(field));
    }
    Ok(())
}

/// Rejects calendar dates after the current UTC day
pub fn ensure_date_not_future(
    field: &'static str,
    value: NaiveDate,
    now: DateTime<Utc>,
) -> Result<(), RecordError> {
    if value > now.date_naive() {
        return Err(RecordError::FutureDate(field));
    }
    Ok(())
}

/// Validates reconstructed metadata
///
/// Checks run in a fixed order: id format, creation date, update date and
/// finally the ordering between the two timestamps.
pub fn validate_props(props: &RecordProps, now: DateTime<Utc>) -> Result<RecordMeta, RecordError> {
    let id = parse_uuid(&props.id)?;
    ensure_not_future(CREATION_DATE, props.created_at, now)?;
    ensure_not_future(UPDATE_DATE, props.updated_at, now)?;
    if props.updated_at < props.created_at {
        return Err(RecordError::UpdatedBeforeCreated);
    }

    Ok(RecordMeta {
        id,
        created_at: props.created_at,
        updated_at: props.updated_at,
    })
}
