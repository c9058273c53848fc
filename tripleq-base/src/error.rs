//! Error type.

use thiserror::Error;

use crate::{ident::Ident, types::Type};

/// Base error type.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Happens when a type name, record tag or field name is not a valid identifier.
    #[error("String \"{0}\" is not a valid identifier")]
    InvalidIdent(String),
    /// Happens when a type constructor is applied to the wrong number of arguments.
    #[error("Type constructor {ctor} expects {expected} type argument(s) but got {actual}")]
    ArityMismatch {
        ctor: String,
        expected: usize,
        actual: usize,
    },
    /// Happens when declaring a supertype would make a named type its own ancestor.
    #[error("Declaring {supertype} as a supertype of {name} creates a cycle")]
    CyclicHierarchy { name: Ident, supertype: Type },
    /// Happens when constructing a non-empty container without elements.
    #[error("{0} requires at least one element")]
    EmptyContainer(&'static str),
    /// Happens when a record is asked for a field it does not declare.
    #[error("{record} has no field named '{field}'")]
    NoSuchField { record: Ident, field: String },
}

pub type Result<T> = std::result::Result<T, Error>;
