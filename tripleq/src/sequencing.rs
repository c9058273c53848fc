//! Ordered contain checks.

use std::borrow::Cow;

use tripleq_base::Value;

use crate::{
    constraint::EqualityConstraint,
    error::{Error, Result},
};

/// Returns true if `seq` contains every element of `elems` in the same relative order.
///
/// Each element is matched at its last occurrence in what remains of `seq`, and the next element
/// is looked for strictly after it.
pub fn contains_in_order<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    let mut rest = seq;
    for elem in elems {
        let Some(idx) = rest.iter().rposition(|e| constraint.are_equal(e, elem)) else {
            return false;
        };
        rest = &rest[idx + 1..];
    }
    true
}

/// Returns true if `seq` consists of the elements of `elems`, in order, each possibly repeated
/// in a contiguous run.
pub fn contains_in_order_only<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    if seq.is_empty() || elems.is_empty() {
        return seq.is_empty() && elems.is_empty();
    }
    let mut lefts = seq.iter().peekable();
    for elem in elems {
        // Every right element needs at least one left element.
        match lefts.next() {
            Some(left) if constraint.are_equal(left, elem) => {}
            _ => return false,
        }
        while lefts
            .peek()
            .is_some_and(|left| constraint.are_equal(left, elem))
        {
            lefts.next();
        }
    }
    lefts.next().is_none()
}

/// Returns true if both sequences have the same length and are pairwise equal.
pub fn contains_the_same_elements_in_order_as<E, R, C>(
    lhs: &[E],
    rhs: &[R],
    constraint: &C,
) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    lhs.len() == rhs.len()
        && std::iter::zip(lhs, rhs).all(|(l, r)| constraint.are_equal(l, r))
}

/// The ordered view of a value: arrays and sequences yield their elements and strings their
/// characters. Unordered containers have no ordered view.
pub(crate) fn ordered_view(value: &Value) -> Result<Cow<'_, [Value]>> {
    let elements = match value {
        Value::Array(_) | Value::Seq(_, _) | Value::Str(_) => value.elements(),
        _ => None,
    };
    elements.ok_or_else(|| Error::NotASequence(value.to_string()))
}

/// Ordered contain checks over values, deciding element equality with a constraint.
#[derive(Clone, Debug, Default)]
pub struct Sequencing<C>(C);

impl<C: EqualityConstraint<Value>> Sequencing<C> {
    pub fn new(constraint: C) -> Self {
        Self(constraint)
    }

    pub fn constraint(&self) -> &C {
        &self.0
    }

    pub fn contains_in_order(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_in_order(&ordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_in_order_only(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_in_order_only(&ordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_the_same_elements_in_order_as(
        &self,
        lhs: &Value,
        rhs: &Value,
    ) -> Result<bool> {
        Ok(contains_the_same_elements_in_order_as(
            &ordered_view(lhs)?,
            &ordered_view(rhs)?,
            &self.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraint, Native, constraint_fn};
    use crate::normalization::{after_being, lower_cased};
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[rstest]
    #[case("aabc", "abc", true)]
    #[case("abc", "ac", true)]
    #[case("abcab", "ab", true)]
    #[case("aa", "aaa", false)]
    #[case("abc", "ca", false)]
    #[case("abc", "", true)]
    #[case("", "a", false)]
    fn in_order(#[case] seq: &str, #[case] elems: &str, #[case] expected: bool) {
        assert_eq!(
            contains_in_order(&chars(seq), &chars(elems), &Native),
            expected,
            "{seq:?} contains {elems:?} in order"
        );
    }

    #[test]
    fn in_order_matches_the_last_occurrence() {
        // Matching "x" at its first occurrence would leave room for "y".
        let seq = ["x1", "y", "x2"];
        let matches = constraint_fn(|l: &&str, r: &&str| l.starts_with(r));
        assert!(!contains_in_order(&seq, &["x", "y"], &matches));
        assert!(contains_in_order(&seq, &["y", "x"], &matches));
    }

    #[rstest]
    #[case("abcd", "abcd", true)]
    #[case("aabbbcd", "abcd", true)]
    #[case("abcdd", "abcd", true)]
    #[case("z", "abcd", false)]
    #[case("abd", "abcd", false)]
    #[case("abcde", "abcd", false)]
    #[case("abca", "abc", false)]
    #[case("bacd", "abcd", false)]
    #[case("", "", true)]
    #[case("a", "", false)]
    #[case("", "a", false)]
    fn in_order_only(#[case] seq: &str, #[case] elems: &str, #[case] expected: bool) {
        assert_eq!(
            contains_in_order_only(&chars(seq), &chars(elems), &Native),
            expected,
            "{seq:?} contains only {elems:?} in order"
        );
    }

    #[test]
    fn same_elements_in_order() {
        assert!(contains_the_same_elements_in_order_as(&[1, 2], &[1, 2], &Native));
        assert!(!contains_the_same_elements_in_order_as(&[1, 2], &[2, 1], &Native));
        assert!(!contains_the_same_elements_in_order_as(&[1, 2], &[1], &Native));
    }

    #[test]
    fn values_use_the_constraint() {
        let ci = Sequencing::new(Constraint::basic(after_being(lower_cased())));
        let seq = Value::list(["A", "b", "C"].map(Value::str));
        let elems = ["a", "c"].map(Value::str);
        assert_eq!(ci.contains_in_order(&seq, &elems), Ok(true));
        assert_eq!(
            Sequencing::new(Constraint::default()).contains_in_order(&seq, &elems),
            Ok(false)
        );
        assert_eq!(
            ci.contains_the_same_elements_in_order_as(
                &seq,
                &Value::array(["a", "B", "c"].map(Value::str))
            ),
            Ok(true)
        );
        let word = Value::str("aabc");
        let letters = ['a', 'b', 'c'].map(Value::Char);
        assert_eq!(ci.contains_in_order_only(&word, &letters), Ok(true));
    }

    #[test]
    fn unordered_values_are_not_sequences() {
        let seq = Sequencing::new(Constraint::default());
        let set = Value::set([1.into()]);
        assert_eq!(
            seq.contains_in_order(&set, &[]),
            Err(Error::NotASequence("Set(1)".into()))
        );
        assert!(seq.contains_in_order_only(&Value::Int(1), &[]).is_err());
    }

    #[quickcheck]
    fn a_sequence_contains_each_of_its_elements(xs: Vec<u8>) -> bool {
        contains_the_same_elements_in_order_as(&xs, &xs, &Native)
            && xs
                .iter()
                .all(|x| contains_in_order(&xs, std::slice::from_ref(x), &Native))
    }

    #[quickcheck]
    fn repeating_runs_keeps_in_order_only(xs: Vec<u8>) -> bool {
        let mut runs: Vec<u8> = vec![];
        for x in &xs {
            if runs.last() != Some(x) {
                runs.push(*x);
            }
        }
        let doubled: Vec<u8> = xs.iter().flat_map(|x| [*x, *x]).collect();
        contains_in_order_only(&doubled, &runs, &Native)
    }
}
