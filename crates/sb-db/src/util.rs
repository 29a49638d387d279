use chrono::{DateTime, Utc};
use rusqlite::ErrorCode;
use sb_core::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        StoreError::Failure {
            message: value.to_string(),
        }
    }
}

pub fn to_rfc3339(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub fn from_rfc3339(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Maps a driver error onto the gateway's error type, flagging access problems.
pub fn store_error(err: rusqlite::Error) -> StoreError {
    let denied = matches!(
        err.sqlite_error_code(),
        Some(
            ErrorCode::AuthorizationForStatementDenied
                | ErrorCode::PermissionDenied
                | ErrorCode::ReadOnly
        )
    );
    if denied {
        StoreError::Unauthorized {
            message: err.to_string(),
        }
    } else {
        StoreError::from_message(err.to_string())
    }
}
