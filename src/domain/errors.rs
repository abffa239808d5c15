//! Domain errors for the daytrip recommender.

use thiserror::Error;

/// Domain-level errors that can occur in the daytrip system.
///
/// The itinerary core itself never surfaces these to its callers; they are
/// produced by request validation, the state store adapters, and the upstream
/// client, and are resolved (logged, treated as empty) at the core boundary.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No coordinates were supplied.
    #[error("Location is required")]
    MissingLocation,

    /// Party size was zero.
    #[error("Party size must be at least 1")]
    EmptyParty,

    /// Budget per person is at or below the configured minimum.
    #[error("Per-person budget too low: {per_person} (must exceed {minimum})")]
    BudgetTooLow {
        /// Total budget divided by party size.
        per_person: u64,
        /// Configured floor.
        minimum: u64,
    },

    /// Category ratios do not add up to the whole budget.
    #[error("Invalid budget ratios: basis points sum to {0}, expected 10000")]
    InvalidRatios(u32),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Upstream could not be reached or its reply could not be read.
    #[error("Upstream request failed: {0}")]
    UpstreamUnavailable(String),

    /// State store read or write failed.
    #[error("State store error: {0}")]
    StorageError(String),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// HTTP status to relay for upstream failures, if one is known.
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_too_low_message() {
        let err = DomainError::BudgetTooLow {
            per_person: 40_000,
            minimum: 50_000,
        };
        assert_eq!(
            err.to_string(),
            "Per-person budget too low: 40000 (must exceed 50000)"
        );
    }

    #[test]
    fn test_upstream_status() {
        let err = DomainError::Upstream {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.upstream_status(), Some(404));
        assert_eq!(DomainError::MissingLocation.upstream_status(), None);
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: DomainError = parse_err.into();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}
