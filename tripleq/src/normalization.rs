//! Pre-comparison transforms and the equalities built from them.

use std::{fmt, sync::Arc};

use tripleq_base::Value;

use crate::equality::{Equality, EqualityRef, default_equality};

/// Transforms a value before it is compared.
pub trait Normalization: fmt::Debug + Send + Sync {
    fn normalized(&self, value: &Value) -> Value;

    /// Returns true if the normalization applies to the value.
    fn can_handle(&self, _value: &Value) -> bool {
        true
    }

    /// Normalizes the value if it can be handled and returns it unchanged otherwise.
    fn normalized_or_same(&self, value: &Value) -> Value {
        if self.can_handle(value) {
            self.normalized(value)
        } else {
            value.clone()
        }
    }
}

pub type NormalizationRef = Arc<dyn Normalization>;

/// Extension methods for composing normalizations.
pub trait NormalizationExt {
    /// Composes two normalizations. `self` is applied first.
    fn and(self, second: NormalizationRef) -> NormalizationRef;
}

impl NormalizationExt for NormalizationRef {
    fn and(self, second: NormalizationRef) -> NormalizationRef {
        Arc::new(AndThen {
            first: self,
            second,
        })
    }
}

#[derive(Debug)]
struct AndThen {
    first: NormalizationRef,
    second: NormalizationRef,
}

impl Normalization for AndThen {
    fn normalized(&self, value: &Value) -> Value {
        self.second
            .normalized_or_same(&self.first.normalized_or_same(value))
    }

    fn can_handle(&self, value: &Value) -> bool {
        self.first.can_handle(value) || self.second.can_handle(value)
    }
}

//===----------------------------------------------------------------------===//
// String normalizations
//===----------------------------------------------------------------------===//

#[derive(Clone, Copy, Debug)]
enum StrNormalization {
    LowerCased,
    UpperCased,
    Trimmed,
}

impl Normalization for StrNormalization {
    fn normalized(&self, value: &Value) -> Value {
        let Value::Str(s) = value else {
            return value.clone();
        };
        Value::Str(match self {
            StrNormalization::LowerCased => s.to_lowercase(),
            StrNormalization::UpperCased => s.to_uppercase(),
            StrNormalization::Trimmed => s.trim().to_owned(),
        })
    }

    fn can_handle(&self, value: &Value) -> bool {
        matches!(value, Value::Str(_))
    }
}

pub fn lower_cased() -> NormalizationRef {
    Arc::new(StrNormalization::LowerCased)
}

pub fn upper_cased() -> NormalizationRef {
    Arc::new(StrNormalization::UpperCased)
}

pub fn trimmed() -> NormalizationRef {
    Arc::new(StrNormalization::Trimmed)
}

//===----------------------------------------------------------------------===//
// Normalizing equality
//===----------------------------------------------------------------------===//

/// Normalizes both operands and then lets the base equality decide.
#[derive(Clone, Debug)]
pub struct NormalizingEquality {
    base: EqualityRef,
    normalization: NormalizationRef,
}

impl NormalizingEquality {
    pub fn new(base: EqualityRef, normalization: NormalizationRef) -> Self {
        Self {
            base,
            normalization,
        }
    }

    /// Adds a normalization applied after the current ones.
    pub fn and(self, normalization: NormalizationRef) -> Self {
        Self {
            base: self.base,
            normalization: self.normalization.and(normalization),
        }
    }

    pub fn normalization(&self) -> &NormalizationRef {
        &self.normalization
    }
}

impl Equality for NormalizingEquality {
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        let a = self.normalization.normalized_or_same(a);
        let b = self.normalization.normalized_or_same(b);
        log::trace!("Comparing normalized values {a} and {b}");
        self.base.are_equal(&a, &b)
    }
}

/// Default equality after applying the normalization to both operands.
pub fn after_being(normalization: NormalizationRef) -> EqualityRef {
    Arc::new(NormalizingEquality::new(default_equality(), normalization))
}

/// Extension methods for building normalizing equalities out of an existing one.
pub trait EqualityExt {
    fn after_being(self, normalization: NormalizationRef) -> EqualityRef;
}

impl EqualityExt for EqualityRef {
    fn after_being(self, normalization: NormalizationRef) -> EqualityRef {
        Arc::new(NormalizingEquality::new(self, normalization))
    }
}
