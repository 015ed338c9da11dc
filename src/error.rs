//! Error types for rust-gridsearch.
//!
//! Search and learning never fail on the happy path: "no move available" is
//! reported as `None`, not as an error. The variants here cover contract
//! violations (illegal moves), bad configuration, and snapshot decoding.

use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A move was applied that is not in the state's legal move list.
    #[error("invalid move: {action} is not legal in this position")]
    InvalidMove {
        /// Debug rendering of the rejected action.
        action: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Rendered value.
        value: String,
        /// Accepted range or constraint.
        reason: &'static str,
    },

    /// A board description could not be parsed.
    #[error("invalid board: {message}")]
    InvalidBoard {
        /// What was wrong with the input.
        message: String,
    },

    /// A player index outside the two seats.
    #[error("invalid player index {index}: only seats 0 and 1 exist")]
    InvalidPlayer {
        /// The rejected index.
        index: u8,
    },

    /// A match ran past its turn limit without reaching a terminal state.
    #[error("match exceeded {limit} turns without finishing")]
    TurnLimit {
        /// The configured limit.
        limit: u32,
    },

    /// A Q-table snapshot was written by an incompatible version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshot {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// A snapshot entry carries a state key that is not 16 hex digits.
    #[error("malformed state key '{key}' in snapshot")]
    MalformedStateKey {
        /// The offending key text.
        key: String,
    },

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed.
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl Error {
    /// Build an `InvalidMove` from any debuggable action.
    pub fn invalid_move<A: std::fmt::Debug>(action: &A) -> Self {
        Error::InvalidMove {
            action: format!("{:?}", action),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_message() {
        let err = Error::invalid_move(&3usize);
        assert_eq!(err.to_string(), "invalid move: 3 is not legal in this position");
    }

    #[test]
    fn test_invalid_config_message() {
        let err = Error::InvalidConfig {
            field: "epsilon",
            value: "1.5".to_string(),
            reason: "must be in [0, 1]",
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: epsilon = 1.5 (must be in [0, 1])"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
