//! Equality within a tolerance for numeric values.

use std::{fmt, sync::Arc};

use tripleq_base::Value;

use crate::{
    equality::{DefaultEquality, Equality, EqualityRef},
    error::{Error, Result},
};

/// A range of numbers `pivot ± tolerance`, bounds included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spread {
    pivot: f64,
    tolerance: f64,
}

impl Spread {
    pub fn new(pivot: f64, tolerance: f64) -> Result<Self> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(Error::NegativeTolerance(tolerance));
        }
        Ok(Self { pivot, tolerance })
    }

    pub fn pivot(&self) -> f64 {
        self.pivot
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn is_within(&self, value: f64) -> bool {
        value >= self.pivot - self.tolerance && value <= self.pivot + self.tolerance
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} +- {:?}", self.pivot, self.tolerance)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(f64::from(*i)),
        Value::Long(l) => Some(*l as f64),
        Value::Double(d) => Some(*d),
        _ => None,
    }
}

/// Numbers are equal if the right one is within the tolerance of the left one. Everything else
/// uses the default equality.
#[derive(Clone, Copy, Debug)]
pub struct TolerantEquality {
    tolerance: f64,
}

impl TolerantEquality {
    pub fn new(tolerance: f64) -> Result<Self> {
        Spread::new(0.0, tolerance)?;
        Ok(Self { tolerance })
    }
}

impl Equality for TolerantEquality {
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        match (as_number(a), as_number(b)) {
            (Some(a), Some(b)) => Spread {
                pivot: a,
                tolerance: self.tolerance,
            }
            .is_within(b),
            _ => DefaultEquality.are_equal(a, b),
        }
    }
}

pub fn tolerant_equality(tolerance: f64) -> Result<EqualityRef> {
    Ok(Arc::new(TolerantEquality::new(tolerance)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, true)]
    #[case(0.75, true)]
    #[case(1.25, true)]
    #[case(1.26, false)]
    #[case(0.5, false)]
    #[case(f64::NAN, false)]
    fn spread_bounds(#[case] value: f64, #[case] expected: bool) {
        let spread = Spread::new(1.0, 0.25).unwrap();
        assert_eq!(spread.is_within(value), expected, "{value} in {spread}");
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        assert_eq!(Spread::new(1.0, -0.1), Err(Error::NegativeTolerance(-0.1)));
        assert!(tolerant_equality(-1.0).is_err());
        assert_eq!(
            Error::NegativeTolerance(-0.5).to_string(),
            "Tolerance must be zero or greater, but was -0.5"
        );
        assert!(Spread::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn tolerant_equality_on_numbers() {
        let eq = tolerant_equality(0.5).unwrap();
        assert!(eq.are_equal(&Value::Double(2.0), &Value::Double(2.4)));
        assert!(eq.are_equal(&Value::Int(2), &Value::Double(1.5)));
        assert!(eq.are_equal(&Value::Long(10), &Value::Int(10)));
        assert!(!eq.are_equal(&Value::Double(2.0), &Value::Double(2.6)));
        assert!(eq.are_equal(&Value::str("a"), &Value::str("a")));
        assert!(!eq.are_equal(&Value::str("1"), &Value::Int(1)));
    }
}
