//! Opt-in equalities for containers that apply a custom element equality at every level.
//!
//! By default a container compares its elements with their native equality, even when a custom
//! equality exists for the element type. Lifting an element equality into a container family
//! makes the container compare its elements with it instead.

use std::{collections::HashSet, fmt, sync::Arc};

use eqv::EqvRelation;
use tripleq_base::{Branch, MapKind, SeqKind, SetKind, SumKind, TypeCtor, Value};

use crate::equality::{DefaultEquality, Equality, EqualityRef, default_equality};

mod matching;

pub use matching::has_perfect_matching;

/// Container families that can opt into recursive equality.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContainerFamily {
    Chain,
    Every,
    Try,
    Either,
    Or,
    Choice,
    /// `List`, `Vector`, `Seq` and `Iterable`.
    List,
    Set,
    Map,
    Array,
    JavaList,
    JavaSet,
    JavaMap,
    Option,
}

impl ContainerFamily {
    pub const ALL: [ContainerFamily; 14] = [
        ContainerFamily::Chain,
        ContainerFamily::Every,
        ContainerFamily::Try,
        ContainerFamily::Either,
        ContainerFamily::Or,
        ContainerFamily::Choice,
        ContainerFamily::List,
        ContainerFamily::Set,
        ContainerFamily::Map,
        ContainerFamily::Array,
        ContainerFamily::JavaList,
        ContainerFamily::JavaSet,
        ContainerFamily::JavaMap,
        ContainerFamily::Option,
    ];

    /// The family a type constructor belongs to, if any.
    pub fn of(ctor: &TypeCtor) -> Option<Self> {
        Some(match ctor {
            TypeCtor::Chain => ContainerFamily::Chain,
            TypeCtor::Every | TypeCtor::One | TypeCtor::Many => ContainerFamily::Every,
            TypeCtor::Try | TypeCtor::Success | TypeCtor::Failure => ContainerFamily::Try,
            TypeCtor::Either | TypeCtor::Left | TypeCtor::Right => ContainerFamily::Either,
            TypeCtor::Or | TypeCtor::Good | TypeCtor::Bad => ContainerFamily::Or,
            TypeCtor::Choice | TypeCtor::West | TypeCtor::East => ContainerFamily::Choice,
            TypeCtor::List | TypeCtor::Vector | TypeCtor::Seq | TypeCtor::Iterable => {
                ContainerFamily::List
            }
            TypeCtor::Set => ContainerFamily::Set,
            TypeCtor::Map => ContainerFamily::Map,
            TypeCtor::Array => ContainerFamily::Array,
            TypeCtor::JavaList => ContainerFamily::JavaList,
            TypeCtor::JavaSet => ContainerFamily::JavaSet,
            TypeCtor::JavaMap => ContainerFamily::JavaMap,
            TypeCtor::Option | TypeCtor::Some | TypeCtor::None => ContainerFamily::Option,
            _ => return None,
        })
    }

    /// The family of a value's runtime constructor, if any.
    pub fn of_value(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Array(_) => ContainerFamily::Array,
            Value::Seq(SeqKind::List | SeqKind::Vector, _) => ContainerFamily::List,
            Value::Seq(SeqKind::Chain, _) => ContainerFamily::Chain,
            Value::Seq(SeqKind::Every, _) => ContainerFamily::Every,
            Value::Seq(SeqKind::JavaList, _) => ContainerFamily::JavaList,
            Value::Set(SetKind::Set, _) => ContainerFamily::Set,
            Value::Set(SetKind::JavaSet, _) => ContainerFamily::JavaSet,
            Value::Map(MapKind::Map, _) => ContainerFamily::Map,
            Value::Map(MapKind::JavaMap, _) => ContainerFamily::JavaMap,
            Value::Option(_) => ContainerFamily::Option,
            Value::Sum(SumKind::Or, _, _) => ContainerFamily::Or,
            Value::Sum(SumKind::Either, _, _) => ContainerFamily::Either,
            Value::Sum(SumKind::Try, _, _) => ContainerFamily::Try,
            Value::Sum(SumKind::Choice, _, _) => ContainerFamily::Choice,
            _ => return None,
        })
    }

    /// Number of element equalities the family needs.
    ///
    /// Maps need one for keys and one for values, sum types one per branch. `Try` compares its
    /// failures with the second equality.
    pub fn arity(&self) -> usize {
        match self {
            ContainerFamily::Map
            | ContainerFamily::JavaMap
            | ContainerFamily::Or
            | ContainerFamily::Either
            | ContainerFamily::Choice
            | ContainerFamily::Try => 2,
            _ => 1,
        }
    }

    fn is_ordered(&self) -> bool {
        matches!(
            self,
            ContainerFamily::List
                | ContainerFamily::Array
                | ContainerFamily::Chain
                | ContainerFamily::Every
                | ContainerFamily::JavaList
        )
    }

    /// Families whose values may be compared with each other. Arrays and Scala sequences
    /// compare equal by content.
    fn compatible(&self, other: &ContainerFamily) -> bool {
        let seq_like =
            |f: &ContainerFamily| matches!(f, ContainerFamily::List | ContainerFamily::Array);
        self == other || (seq_like(self) && seq_like(other))
    }
}

impl fmt::Display for ContainerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The element equalities handed to a container family.
#[derive(Clone, Debug)]
pub enum ElementEqualities {
    Single(EqualityRef),
    /// Keys and values for maps, first and second branch for sum types.
    Pair(EqualityRef, EqualityRef),
}

impl ElementEqualities {
    pub fn arity(&self) -> usize {
        match self {
            ElementEqualities::Single(_) => 1,
            ElementEqualities::Pair(_, _) => 2,
        }
    }
}

//===----------------------------------------------------------------------===//
// Shape
//===----------------------------------------------------------------------===//

/// Two values have the same shape if they belong to compatible container families, have the
/// same number of elements and, for options and sum types, the same branch.
pub struct SameShape;

fn size(value: &Value) -> Option<usize> {
    match value {
        Value::Array(array) => Some(array.len()),
        Value::Seq(_, elements) | Value::Set(_, elements) => Some(elements.len()),
        Value::Map(_, entries) => Some(entries.len()),
        _ => None,
    }
}

impl EqvRelation<Value> for SameShape {
    fn equivalent(lhs: &Value, rhs: &Value) -> bool {
        let (Some(lhs_family), Some(rhs_family)) =
            (ContainerFamily::of_value(lhs), ContainerFamily::of_value(rhs))
        else {
            return false;
        };
        if !lhs_family.compatible(&rhs_family) {
            return false;
        }
        match (lhs, rhs) {
            (Value::Option(lhs), Value::Option(rhs)) => lhs.is_some() == rhs.is_some(),
            (Value::Sum(_, lhs_branch, _), Value::Sum(_, rhs_branch, _)) => {
                lhs_branch == rhs_branch
            }
            _ => size(lhs) == size(rhs),
        }
    }
}

fn same_shape(lhs: &Value, rhs: &Value) -> bool {
    <SameShape as EqvRelation<Value>>::equivalent(lhs, rhs)
}

//===----------------------------------------------------------------------===//
// Element comparison
//===----------------------------------------------------------------------===//

/// Compares two values of the same shape element by element.
fn compare_elements(
    family: ContainerFamily,
    a: &Value,
    b: &Value,
    first: &dyn Equality,
    second: &dyn Equality,
) -> bool {
    if family.is_ordered() {
        let (Some(lhs), Some(rhs)) = (a.ordered_elements(), b.ordered_elements()) else {
            return false;
        };
        return std::iter::zip(lhs, rhs).all(|(l, r)| {
            let equal = first.are_equal(l, r);
            log::trace!("{family} element {l} == {r}: {equal}");
            equal
        });
    }
    match (a, b) {
        (Value::Set(_, lhs), Value::Set(_, rhs)) => {
            has_perfect_matching(lhs.as_slice(), rhs.as_slice(), |l, r| first.are_equal(l, r))
        }
        (Value::Map(_, lhs), Value::Map(_, rhs)) => {
            has_perfect_matching(lhs.as_slice(), rhs.as_slice(), |(lk, lv), (rk, rv)| {
                first.are_equal(lk, rk) && second.are_equal(lv, rv)
            })
        }
        (Value::Option(None), Value::Option(None)) => true,
        (Value::Option(Some(l)), Value::Option(Some(r))) => first.are_equal(l, r),
        (Value::Sum(_, branch, l), Value::Sum(_, _, r)) => match branch {
            Branch::First => first.are_equal(l, r),
            Branch::Second => second.are_equal(l, r),
        },
        _ => false,
    }
}

//===----------------------------------------------------------------------===//
// Recursive equalities
//===----------------------------------------------------------------------===//

/// Equality for one container family that compares elements with the given equalities.
#[derive(Clone, Debug)]
pub struct RecursiveEquality {
    family: ContainerFamily,
    first: EqualityRef,
    second: EqualityRef,
}

impl RecursiveEquality {
    /// Returns `None` if the number of element equalities does not fit the family.
    pub fn new(family: ContainerFamily, elements: ElementEqualities) -> Option<Self> {
        match (family.arity(), elements) {
            (1, ElementEqualities::Single(element)) => Some(Self {
                family,
                first: element.clone(),
                second: element,
            }),
            (2, ElementEqualities::Pair(first, second)) => Some(Self {
                family,
                first,
                second,
            }),
            _ => None,
        }
    }

    pub fn family(&self) -> ContainerFamily {
        self.family
    }
}

impl Equality for RecursiveEquality {
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        if ContainerFamily::of_value(a) != Some(self.family) {
            return DefaultEquality.are_equal(a, b);
        }
        if !same_shape(a, b) {
            log::trace!("{a} and {b} do not have the same shape");
            return false;
        }
        compare_elements(self.family, a, b, &*self.first, &*self.second)
    }
}

/// Lifts element equalities into an equality for a container family.
///
/// When `recursive` is false the native structural equality of the container is returned. A
/// configuration with the wrong number of element equalities also falls back to it.
pub fn lift_to_container(
    family: ContainerFamily,
    elements: ElementEqualities,
    recursive: bool,
) -> EqualityRef {
    if !recursive {
        return default_equality();
    }
    let arity = elements.arity();
    match RecursiveEquality::new(family, elements) {
        Some(equality) => Arc::new(equality),
        None => {
            log::warn!(
                "{family} needs {} element equalities but got {arity}, using the default equality",
                family.arity()
            );
            default_equality()
        }
    }
}

//===----------------------------------------------------------------------===//
// Factories
//===----------------------------------------------------------------------===//

pub fn list(element: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::List, ElementEqualities::Single(element), true)
}

pub fn array(element: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Array, ElementEqualities::Single(element), true)
}

pub fn chain(element: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Chain, ElementEqualities::Single(element), true)
}

pub fn every(element: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Every, ElementEqualities::Single(element), true)
}

pub fn set(element: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Set, ElementEqualities::Single(element), true)
}

pub fn option(element: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Option, ElementEqualities::Single(element), true)
}

pub fn map(key: EqualityRef, value: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Map, ElementEqualities::Pair(key, value), true)
}

pub fn or(good: EqualityRef, bad: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Or, ElementEqualities::Pair(good, bad), true)
}

pub fn either(left: EqualityRef, right: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Either, ElementEqualities::Pair(left, right), true)
}

pub fn r#try(success: EqualityRef, failure: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Try, ElementEqualities::Pair(success, failure), true)
}

pub fn choice(west: EqualityRef, east: EqualityRef) -> EqualityRef {
    lift_to_container(ContainerFamily::Choice, ElementEqualities::Pair(west, east), true)
}

//===----------------------------------------------------------------------===//
// Deep equality
//===----------------------------------------------------------------------===//

/// Recurses through every enabled family at any depth and compares everything else with the
/// leaf equality.
#[derive(Clone, Debug)]
pub struct DeepEquality {
    families: HashSet<ContainerFamily>,
    leaf: EqualityRef,
}

impl DeepEquality {
    pub fn new(families: impl IntoIterator<Item = ContainerFamily>, leaf: EqualityRef) -> Self {
        Self {
            families: families.into_iter().collect(),
            leaf,
        }
    }

    /// Recurses through every family.
    pub fn everywhere(leaf: EqualityRef) -> Self {
        Self::new(ContainerFamily::ALL, leaf)
    }
}

impl Equality for DeepEquality {
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        match ContainerFamily::of_value(a) {
            Some(family) if self.families.contains(&family) => {
                same_shape(a, b) && compare_elements(family, a, b, self, self)
            }
            _ => self.leaf.are_equal(a, b),
        }
    }
}
