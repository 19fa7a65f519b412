//! Error types.
//!
//! - `DotsError` is what the scoring engine returns (typed, matchable).
//! - `AppError` is what the binary reports: a message plus a process exit code.

use thiserror::Error;

use crate::domain::Sex;

/// Errors produced by the scoring / equivalence engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DotsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The quartic denominator is not positive for this bodyweight, so the
    /// formula has left its valid range.
    #[error(
        "DOTS formula undefined for a {bodyweight} bodyweight {sex} lifter (denominator {denominator:.4} <= 0)"
    )]
    DomainError {
        bodyweight: f64,
        sex: Sex,
        denominator: f64,
    },

    #[error("no equivalent lift: score {target_score:.4} is not reachable within [{lo}, {hi}]")]
    UnsolvableEquivalence { target_score: f64, lo: f64, hi: f64 },

    #[error("root finder did not converge after {iterations} iterations")]
    NumericNonConvergence { iterations: usize },
}

impl DotsError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DotsError::InvalidInput(message.into())
    }

    /// Exit code used when this error terminates the `dots` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            DotsError::InvalidInput(_) => 2,
            DotsError::DomainError { .. } | DotsError::UnsolvableEquivalence { .. } => 3,
            DotsError::NumericNonConvergence { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DotsError> for AppError {
    fn from(err: DotsError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(DotsError::invalid("step").exit_code(), 2);
        let domain = DotsError::DomainError {
            bodyweight: 20.0,
            sex: Sex::Male,
            denominator: -90.0,
        };
        assert_eq!(AppError::from(domain).exit_code(), 3);
        let stuck = DotsError::NumericNonConvergence { iterations: 100 };
        assert_eq!(AppError::from(stuck).exit_code(), 4);
    }

    #[test]
    fn unsolvable_message_names_bracket() {
        let err = DotsError::UnsolvableEquivalence {
            target_score: 9000.0,
            lo: 50.0,
            hi: 2000.0,
        };
        let msg = AppError::from(err).to_string();
        assert!(msg.contains("[50, 2000]"), "unexpected message: {msg}");
    }
}
