//! Equality capabilities.

use std::{fmt, sync::Arc};

use tripleq_base::Value;

/// Decides whether two values are equal.
///
/// Only the equality of the left operand's type is ever consulted: `a` is a value of the
/// equality's subject type and `b` can be anything.
pub trait Equality: fmt::Debug + Send + Sync {
    fn are_equal(&self, a: &Value, b: &Value) -> bool;
}

pub type EqualityRef = Arc<dyn Equality>;

/// Native equality of the left operand, comparing arrays structurally.
///
/// If either operand is an array it is replaced by its sequence view before comparing, so an
/// array equals a sequence with the same elements from either side.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultEquality;

impl Equality for DefaultEquality {
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        match (a.is_array(), b.is_array()) {
            (false, false) => a.native_eq(b),
            (true, true) => a.deep().native_eq(&b.deep()),
            (true, false) => a.deep().native_eq(b),
            (false, true) => a.native_eq(&b.deep()),
        }
    }
}

pub fn default_equality() -> EqualityRef {
    Arc::new(DefaultEquality)
}

/// Picks the equality for a comparison site: the explicit one if given, the default otherwise.
pub fn resolve_equality(explicit: Option<EqualityRef>) -> EqualityRef {
    explicit.unwrap_or_else(default_equality)
}

/// Equality backed by a function.
pub struct FnEquality<F> {
    name: &'static str,
    f: F,
}

impl<F> FnEquality<F>
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> fmt::Debug for FnEquality<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnEquality({})", self.name)
    }
}

impl<F> Equality for FnEquality<F>
where
    F: Fn(&Value, &Value) -> bool + Send + Sync,
{
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        (self.f)(a, b)
    }
}

/// Wraps a function into a shareable equality.
pub fn equality_fn<F>(name: &'static str, f: F) -> EqualityRef
where
    F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
{
    Arc::new(FnEquality::new(name, f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    fn ints(xs: &[i32]) -> impl Iterator<Item = Value> + '_ {
        xs.iter().copied().map(Value::Int)
    }

    #[rstest]
    #[case(Value::array(ints(&[1, 2])), Value::array(ints(&[1, 2])), true)]
    #[case(Value::array(ints(&[1, 2])), Value::vector(ints(&[1, 2])), true)]
    #[case(Value::vector(ints(&[1, 2])), Value::array(ints(&[1, 2])), true)]
    #[case(Value::list(ints(&[1, 2])), Value::array(ints(&[1, 2])), true)]
    #[case(Value::array(ints(&[1, 2])), Value::list(ints(&[2, 1])), false)]
    #[case(Value::array(ints(&[1])), Value::java_list(ints(&[1])), false)]
    #[case(
        Value::array([Value::array(ints(&[1]))]),
        Value::array([Value::array(ints(&[1]))]),
        true
    )]
    #[case(
        Value::array([Value::array(ints(&[1]))]),
        Value::vector([Value::vector(ints(&[1]))]),
        true
    )]
    #[case(
        Value::list([Value::array(ints(&[1]))]),
        Value::list([Value::array(ints(&[1]))]),
        false
    )]
    #[case(Value::Int(1), Value::str("1"), false)]
    fn default_equality_views_arrays_structurally(
        #[case] a: Value,
        #[case] b: Value,
        #[case] expected: bool,
    ) {
        assert_eq!(DefaultEquality.are_equal(&a, &b), expected, "{a} == {b}");
    }

    #[test]
    fn explicit_equality_wins() {
        let always = equality_fn("always", |_, _| true);
        let resolved = resolve_equality(Some(always));
        assert!(resolved.are_equal(&Value::Int(1), &Value::Int(2)));
        let resolved = resolve_equality(None);
        assert!(!resolved.are_equal(&Value::Int(1), &Value::Int(2)));
        assert_eq!(format!("{:?}", equality_fn("named", |_, _| false)), "FnEquality(named)");
    }

    #[quickcheck]
    fn arrays_equal_sequences_in_both_directions(xs: Vec<i32>) -> bool {
        let array = Value::array(ints(&xs));
        let vector = Value::vector(ints(&xs));
        DefaultEquality.are_equal(&array, &vector) && DefaultEquality.are_equal(&vector, &array)
    }

    #[quickcheck]
    fn default_equality_is_reflexive(xs: Vec<String>) -> bool {
        let value = Value::array([Value::list(xs.into_iter().map(Value::Str))]);
        DefaultEquality.are_equal(&value, &value.clone())
    }
}
