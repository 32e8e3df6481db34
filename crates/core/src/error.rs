//! Error types for core value handling
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

use crate::criteria::LogicOperator;

/// Errors raised while building or decoding search criteria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    /// A logic operator is not followed by two complete sub-expressions
    #[error("operator '{operator}' at position {position} is missing an operand")]
    MissingOperand {
        /// The operator lacking an operand
        operator: LogicOperator,
        /// Position of the operator in the flat sequence
        position: usize,
    },

    /// Unrecognized logic or comparison operator literal
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// A term is neither an operator string nor a 3-element triplet
    #[error("invalid term at position {position}: {reason}")]
    InvalidTerm {
        /// Position of the term in the flat sequence
        position: usize,
        /// What was wrong with it
        reason: String,
    },
}
