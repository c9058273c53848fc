//! Error type.

use thiserror::Error;
use tripleq_base::Type;

use crate::policy::Policy;

/// Equality core error type.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// Happens when a strict policy finds no subtype or conversion relation between the operand
    /// types.
    #[error("{policy} cannot compare values of type {left} with values of type {right}")]
    ConstraintNotDerivable {
        policy: Policy,
        left: Type,
        right: Type,
    },
    /// Happens when a tolerance is below zero.
    #[error("Tolerance must be zero or greater, but was {0}")]
    NegativeTolerance(f64),
    /// Happens when a contain-style check is given a value without a sequence view.
    #[error("{0} is not a sequence")]
    NotASequence(String),
    #[error(transparent)]
    Base(#[from] tripleq_base::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
