//! Capabilities permitting comparison across two types.

use std::{fmt, marker::PhantomData, sync::Arc};

use tripleq_base::{Type, Value};

use crate::equality::{EqualityRef, default_equality};

/// Asserts that values of type `A` can be compared with values of type `B`.
pub trait EqualityConstraint<A: ?Sized, B: ?Sized = A> {
    fn are_equal(&self, a: &A, b: &B) -> bool;
}

/// Rust's `==` with the left operand as receiver.
#[derive(Clone, Copy, Debug, Default)]
pub struct Native;

impl<A, B> EqualityConstraint<A, B> for Native
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    fn are_equal(&self, a: &A, b: &B) -> bool {
        a == b
    }
}

/// A constraint backed by a closure.
pub struct FnConstraint<F, A: ?Sized, B: ?Sized> {
    f: F,
    _marker: PhantomData<fn(&A, &B)>,
}

impl<F, A: ?Sized, B: ?Sized> fmt::Debug for FnConstraint<F, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnConstraint")
    }
}

impl<F, A, B> EqualityConstraint<A, B> for FnConstraint<F, A, B>
where
    F: Fn(&A, &B) -> bool,
    A: ?Sized,
    B: ?Sized,
{
    fn are_equal(&self, a: &A, b: &B) -> bool {
        (self.f)(a, b)
    }
}

pub fn constraint_fn<A: ?Sized, B: ?Sized, F>(f: F) -> FnConstraint<F, A, B>
where
    F: Fn(&A, &B) -> bool,
{
    FnConstraint {
        f,
        _marker: PhantomData,
    }
}

//===----------------------------------------------------------------------===//
// Conversions
//===----------------------------------------------------------------------===//

type ConvertFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A conversion between values of two types.
#[derive(Clone)]
pub struct Conversion {
    name: String,
    from: Type,
    to: Type,
    f: ConvertFn,
}

impl Conversion {
    pub fn new<F>(name: impl Into<String>, from: Type, to: Type, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            from,
            to,
            f: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from(&self) -> &Type {
        &self.from
    }

    pub fn to(&self) -> &Type {
        &self.to
    }

    pub fn apply(&self, value: &Value) -> Value {
        (self.f)(value)
    }

    /// Numeric widenings available in every scope.
    pub fn builtin() -> Vec<Conversion> {
        vec![
            Conversion::new("char2int", Type::char(), Type::int(), |v| match v {
                Value::Char(c) => Value::Int(u32::from(*c) as i32),
                other => other.clone(),
            }),
            Conversion::new("char2long", Type::char(), Type::long(), |v| match v {
                Value::Char(c) => Value::Long(i64::from(u32::from(*c))),
                other => other.clone(),
            }),
            Conversion::new("char2double", Type::char(), Type::double(), |v| match v {
                Value::Char(c) => Value::Double(f64::from(u32::from(*c))),
                other => other.clone(),
            }),
            Conversion::new("int2long", Type::int(), Type::long(), |v| match v {
                Value::Int(i) => Value::Long(i64::from(*i)),
                other => other.clone(),
            }),
            Conversion::new("int2double", Type::int(), Type::double(), |v| match v {
                Value::Int(i) => Value::Double(f64::from(*i)),
                other => other.clone(),
            }),
            Conversion::new("long2double", Type::long(), Type::double(), |v| match v {
                Value::Long(l) => Value::Double(*l as f64),
                other => other.clone(),
            }),
        ]
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conversion({}: {} => {})", self.name, self.from, self.to)
    }
}

impl PartialEq for Conversion {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.from == other.from && self.to == other.to
    }
}

//===----------------------------------------------------------------------===//
// Derived constraints
//===----------------------------------------------------------------------===//

/// How a constraint between two types was justified.
#[derive(Clone, Debug, PartialEq)]
pub enum Evidence {
    /// No relation between the types was required.
    Unconstrained,
    SameType,
    /// The left type is a subtype of the right type. The right type's equality decides.
    LeftSubtype,
    /// The right type is a subtype of the left type. The left type's equality decides.
    RightSubtype,
    /// The left operand is converted to the right type before comparing.
    LeftConversion(Conversion),
    /// The right operand is converted to the left type before comparing.
    RightConversion(Conversion),
    /// Only the right type has a custom equality. It decides, still given the left operand
    /// first.
    RightAuthority,
    /// A pair equality registered for both types decides.
    Registered,
}

/// A constraint over values derived by a policy for a pair of static types.
#[derive(Clone, Debug)]
pub struct Constraint {
    left: Type,
    right: Type,
    equality: EqualityRef,
    evidence: Evidence,
}

impl Constraint {
    pub fn new(left: Type, right: Type, equality: EqualityRef, evidence: Evidence) -> Self {
        Self {
            left,
            right,
            equality,
            evidence,
        }
    }

    /// An unconstrained comparison between any two values using the given equality.
    pub fn basic(equality: EqualityRef) -> Self {
        Self::new(Type::any(), Type::any(), equality, Evidence::Unconstrained)
    }

    pub fn left(&self) -> &Type {
        &self.left
    }

    pub fn right(&self) -> &Type {
        &self.right
    }

    pub fn equality(&self) -> &EqualityRef {
        &self.equality
    }

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::basic(default_equality())
    }
}

impl EqualityConstraint<Value> for Constraint {
    fn are_equal(&self, a: &Value, b: &Value) -> bool {
        match &self.evidence {
            Evidence::LeftConversion(conversion) => {
                self.equality.are_equal(&conversion.apply(a), b)
            }
            Evidence::RightConversion(conversion) => {
                self.equality.are_equal(a, &conversion.apply(b))
            }
            _ => self.equality.are_equal(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::equality_fn;
    use std::sync::Mutex;

    #[test]
    fn native_uses_partial_eq() {
        assert!(Native.are_equal("a", "a"));
        assert!(Native.are_equal(&String::from("a"), "a"));
        assert!(!EqualityConstraint::<i32>::are_equal(&Native, &1, &2));
        assert!(Native.are_equal(&Value::Int(1), &Value::Long(1)));
    }

    #[test]
    fn closures_are_constraints() {
        let c = constraint_fn(|a: &str, b: &usize| a.len() == *b);
        assert!(c.are_equal("abc", &3));
        assert!(!c.are_equal("abc", &2));
    }

    #[test]
    fn builtin_conversions_widen_numbers() {
        let convert = |from: Type, to: Type, value: Value| {
            Conversion::builtin()
                .into_iter()
                .find(|c| c.from() == &from && c.to() == &to)
                .map(|c| c.apply(&value))
        };
        assert!(matches!(
            convert(Type::char(), Type::int(), 'a'.into()),
            Some(Value::Int(97))
        ));
        assert!(matches!(
            convert(Type::int(), Type::long(), 3.into()),
            Some(Value::Long(3))
        ));
        assert!(matches!(
            convert(Type::long(), Type::double(), 3i64.into()),
            Some(Value::Double(d)) if d == 3.0
        ));
        assert!(convert(Type::double(), Type::int(), 3.0.into()).is_none());
        assert!(matches!(
            convert(Type::int(), Type::long(), "x".into()),
            Some(Value::Str(_))
        ));
    }

    #[test]
    fn evidence_picks_the_operand_order() {
        let seen = Arc::new(Mutex::new(vec![]));
        let recorder = {
            let seen = seen.clone();
            equality_fn("recorder", move |a, b| {
                seen.lock().unwrap().push((a.clone(), b.clone()));
                true
            })
        };
        let to_long = Conversion::builtin().swap_remove(3);
        let cases = [
            (Evidence::SameType, (Value::Int(1), Value::Int(2))),
            (Evidence::RightAuthority, (Value::Int(1), Value::Int(2))),
            (
                Evidence::LeftConversion(to_long.clone()),
                (Value::Long(1), Value::Int(2)),
            ),
            (
                Evidence::RightConversion(to_long),
                (Value::Int(1), Value::Long(2)),
            ),
        ];
        for (evidence, expected) in cases {
            seen.lock().unwrap().clear();
            let c = Constraint::new(Type::int(), Type::int(), recorder.clone(), evidence);
            assert!(c.are_equal(&Value::Int(1), &Value::Int(2)));
            let calls = seen.lock().unwrap();
            assert_eq!(calls.len(), 1);
            let (a, b) = &calls[0];
            assert_eq!(
                (a.kind_name(), b.kind_name()),
                (expected.0.kind_name(), expected.1.kind_name()),
                "{:?}",
                c.evidence()
            );
            assert!(a == &expected.0 && b == &expected.1, "{:?}", c.evidence());
        }
    }
}
