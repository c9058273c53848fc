#![doc = include_str!("../README.md")]

pub mod aggregating;
pub mod constraint;
pub mod equality;
pub mod error;
pub mod normalization;
pub mod policy;
pub mod recursive;
pub mod scope;
pub mod sequencing;
pub mod tolerance;
pub mod typed;

pub use aggregating::Aggregating;
pub use constraint::{Constraint, Conversion, EqualityConstraint, Evidence, Native};
pub use equality::{DefaultEquality, Equality, EqualityRef, default_equality, resolve_equality};
pub use error::{Error, Result};
pub use normalization::{Normalization, NormalizationRef, NormalizingEquality};
pub use policy::Policy;
pub use recursive::{ContainerFamily, ElementEqualities, lift_to_container};
pub use scope::{Scope, ScopeBuilder};
pub use sequencing::Sequencing;
pub use tolerance::{Spread, TolerantEquality};
pub use typed::Typed;

pub use tripleq_base::{Type, TypeHierarchy, Value};
