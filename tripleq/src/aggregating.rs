//! Unordered contain checks.

use std::borrow::Cow;

use tripleq_base::Value;

use crate::{
    constraint::EqualityConstraint,
    error::{Error, Result},
    recursive::has_perfect_matching,
};

pub fn contains<E, R, C>(seq: &[E], elem: &R, constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    seq.iter().any(|e| constraint.are_equal(e, elem))
}

fn found<'r, E, R, C>(seq: &[E], elems: &'r [R], constraint: &C) -> impl Iterator<Item = &'r R>
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    elems.iter().filter(move |elem| contains(seq, *elem, constraint))
}

pub fn contains_all_of<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    elems.iter().all(|elem| contains(seq, elem, constraint))
}

pub fn contains_at_least_one_of<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    found(seq, elems, constraint).next().is_some()
}

/// Returns true if exactly one of `elems` is contained in `seq`.
pub fn contains_one_of<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    found(seq, elems, constraint).take(2).count() == 1
}

pub fn contains_at_most_one_of<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    found(seq, elems, constraint).take(2).count() <= 1
}

pub fn contains_none_of<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    found(seq, elems, constraint).next().is_none()
}

/// Returns true if every element of `seq` is one of `elems` and every one of `elems` is in
/// `seq`.
pub fn contains_only<E, R, C>(seq: &[E], elems: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    seq.iter()
        .all(|e| elems.iter().any(|elem| constraint.are_equal(e, elem)))
        && contains_all_of(seq, elems, constraint)
}

/// Returns true if both collections hold the same elements the same number of times, in any
/// order.
///
/// Every left element is paired with a distinct right element it equals, so the check holds
/// even when the constraint is not transitive.
pub fn contains_the_same_elements_as<E, R, C>(lhs: &[E], rhs: &[R], constraint: &C) -> bool
where
    C: EqualityConstraint<E, R> + ?Sized,
{
    has_perfect_matching(lhs, rhs, |l, r| constraint.are_equal(l, r))
}

fn unordered_view(value: &Value) -> Result<Cow<'_, [Value]>> {
    value
        .elements()
        .ok_or_else(|| Error::NotASequence(value.to_string()))
}

/// Unordered contain checks over values, deciding element equality with a constraint.
#[derive(Clone, Debug, Default)]
pub struct Aggregating<C>(C);

impl<C: EqualityConstraint<Value>> Aggregating<C> {
    pub fn new(constraint: C) -> Self {
        Self(constraint)
    }

    pub fn constraint(&self) -> &C {
        &self.0
    }

    pub fn contains(&self, seq: &Value, elem: &Value) -> Result<bool> {
        Ok(contains(&unordered_view(seq)?, elem, &self.0))
    }

    pub fn contains_all_of(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_all_of(&unordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_at_least_one_of(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_at_least_one_of(&unordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_one_of(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_one_of(&unordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_at_most_one_of(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_at_most_one_of(&unordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_none_of(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_none_of(&unordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_only(&self, seq: &Value, elems: &[Value]) -> Result<bool> {
        Ok(contains_only(&unordered_view(seq)?, elems, &self.0))
    }

    pub fn contains_the_same_elements_as(&self, lhs: &Value, rhs: &Value) -> Result<bool> {
        Ok(contains_the_same_elements_as(
            &unordered_view(lhs)?,
            &unordered_view(rhs)?,
            &self.0,
        ))
    }
}
