//! Policies deciding which pairs of types may be compared.

#![allow(deprecated)]

use std::fmt;

use tripleq_base::Type;

use crate::{
    constraint::{Constraint, Evidence},
    equality::default_equality,
    error::{Error, Result},
    scope::Scope,
};

/// Strictness of the comparisons allowed in a scope.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Policy {
    /// Any two types can be compared.
    Unchecked,
    /// Only types where one is a subtype of the other can be compared.
    TypeChecked,
    /// Like [`Policy::TypeChecked`], and additionally types with a conversion between them.
    ConversionChecked,
    /// Unchecked comparisons that also honor equalities registered for a pair of types.
    #[default]
    Enabled,
    #[deprecated(note = "use Policy::Unchecked")]
    TripleEquals,
    #[deprecated(note = "use Policy::TypeChecked")]
    TypeCheckedTripleEquals,
    #[deprecated(note = "use Policy::ConversionChecked")]
    ConversionCheckedTripleEquals,
}

impl Policy {
    /// The policy this one behaves as. Deprecated policies map to their replacement.
    pub fn canonical(self) -> Self {
        match self {
            Policy::TripleEquals => Policy::Unchecked,
            Policy::TypeCheckedTripleEquals => Policy::TypeChecked,
            Policy::ConversionCheckedTripleEquals => Policy::ConversionChecked,
            other => other,
        }
    }

    pub fn is_deprecated(self) -> bool {
        self.canonical() != self
    }

    /// Returns true if the policy may refuse to compare two types.
    pub fn is_strict(self) -> bool {
        matches!(
            self.canonical(),
            Policy::TypeChecked | Policy::ConversionChecked
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Unchecked => "Unchecked",
            Policy::TypeChecked => "TypeChecked",
            Policy::ConversionChecked => "ConversionChecked",
            Policy::Enabled => "Enabled",
            Policy::TripleEquals => "TripleEquals",
            Policy::TypeCheckedTripleEquals => "TypeCheckedTripleEquals",
            Policy::ConversionCheckedTripleEquals => "ConversionCheckedTripleEquals",
        }
    }

    /// Derives the constraint for comparing values of type `left` with values of type `right`.
    pub fn derive(self, scope: &Scope, left: &Type, right: &Type) -> Result<Constraint> {
        let policy = self.canonical();
        if policy != self {
            log::warn!("{self} is deprecated, deriving as {policy}");
        }
        let constraint = match policy {
            Policy::Enabled => Some(
                enabled(scope, left, right).unwrap_or_else(|| unchecked(scope, left, right)),
            ),
            Policy::TypeChecked => type_checked(scope, left, right),
            Policy::ConversionChecked => {
                type_checked(scope, left, right).or_else(|| conversion_checked(scope, left, right))
            }
            _ => Some(unchecked(scope, left, right)),
        };
        let constraint = constraint.ok_or_else(|| Error::ConstraintNotDerivable {
            policy: self,
            left: left.clone(),
            right: right.clone(),
        })?;
        log::debug!(
            "{self} derived {left} === {right} with {:?} ({:?})",
            constraint.evidence(),
            constraint.equality()
        );
        Ok(constraint)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn unchecked(scope: &Scope, left: &Type, right: &Type) -> Constraint {
    let new = |equality, evidence| Constraint::new(left.clone(), right.clone(), equality, evidence);
    if let Some(equality) = scope.lookup_equality(left) {
        return new(equality, Evidence::Unconstrained);
    }
    if let Some(equality) = scope.lookup_equality(right) {
        return new(equality, Evidence::RightAuthority);
    }
    new(default_equality(), Evidence::Unconstrained)
}

fn enabled(scope: &Scope, left: &Type, right: &Type) -> Option<Constraint> {
    let equality = scope.pair_equality(left, right)?;
    Some(Constraint::new(
        left.clone(),
        right.clone(),
        equality,
        Evidence::Registered,
    ))
}

fn type_checked(scope: &Scope, left: &Type, right: &Type) -> Option<Constraint> {
    let hierarchy = scope.hierarchy();
    let (authority, evidence) = if left == right {
        (left, Evidence::SameType)
    } else if hierarchy.is_subtype(right, left) {
        (left, Evidence::RightSubtype)
    } else if hierarchy.is_subtype(left, right) {
        (right, Evidence::LeftSubtype)
    } else {
        return None;
    };
    Some(Constraint::new(
        left.clone(),
        right.clone(),
        scope.resolve_equality(authority),
        evidence,
    ))
}

fn conversion_checked(scope: &Scope, left: &Type, right: &Type) -> Option<Constraint> {
    if let Some(conversion) = scope.conversion(right, left) {
        return Some(Constraint::new(
            left.clone(),
            right.clone(),
            scope.resolve_equality(left),
            Evidence::RightConversion(conversion),
        ));
    }
    let conversion = scope.conversion(left, right)?;
    Some(Constraint::new(
        left.clone(),
        right.clone(),
        scope.resolve_equality(right),
        Evidence::LeftConversion(conversion),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constraint::EqualityConstraint,
        equality::equality_fn,
        normalization::{after_being, lower_cased},
    };
    use log::LevelFilter;
    use rstest::{fixture, rstest};
    use simplelog::{Config, TestLogger};
    use tripleq_base::{TypeHierarchy, Value};

    #[fixture]
    fn scope() -> Scope {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
        let mut hierarchy = TypeHierarchy::new();
        let fruit = hierarchy.declare("Fruit", []).unwrap();
        hierarchy.declare("Apple", [fruit.clone()]).unwrap();
        hierarchy.declare("Orange", [fruit]).unwrap();
        Scope::root(hierarchy)
    }

    fn named(name: &str) -> Type {
        Type::named(name).unwrap()
    }

    #[rstest]
    #[case(Policy::TypeChecked, Type::int(), Type::int(), Evidence::SameType)]
    #[case(Policy::TypeChecked, named("Fruit"), named("Apple"), Evidence::RightSubtype)]
    #[case(Policy::TypeChecked, named("Apple"), named("Fruit"), Evidence::LeftSubtype)]
    #[case(Policy::TypeChecked, Type::list(Type::int()), Type::seq(Type::int()), Evidence::LeftSubtype)]
    #[case(Policy::TypeChecked, Type::option(Type::string()), Type::none(), Evidence::RightSubtype)]
    #[case(Policy::ConversionChecked, Type::int(), Type::int(), Evidence::SameType)]
    #[case(Policy::Unchecked, Type::int(), Type::string(), Evidence::Unconstrained)]
    #[case(Policy::Enabled, named("Apple"), named("Orange"), Evidence::Unconstrained)]
    fn derivable(
        scope: Scope,
        #[case] policy: Policy,
        #[case] left: Type,
        #[case] right: Type,
        #[case] evidence: Evidence,
    ) {
        let constraint = policy.derive(&scope, &left, &right).unwrap();
        similar_asserts::assert_eq!(constraint.evidence(), &evidence);
        assert_eq!(constraint.left(), &left);
        assert_eq!(constraint.right(), &right);
    }

    #[rstest]
    #[case(Policy::TypeChecked, Type::int(), Type::long())]
    #[case(Policy::TypeChecked, named("Apple"), named("Orange"))]
    #[case(Policy::TypeChecked, Type::string(), Type::int())]
    #[case(Policy::TypeChecked, Type::set(named("Apple")), Type::set(named("Fruit")))]
    #[case(Policy::ConversionChecked, named("Apple"), named("Orange"))]
    #[case(Policy::ConversionChecked, Type::double(), Type::string())]
    #[case(Policy::TypeCheckedTripleEquals, Type::int(), Type::string())]
    fn not_derivable(
        scope: Scope,
        #[case] policy: Policy,
        #[case] left: Type,
        #[case] right: Type,
    ) {
        assert_eq!(
            policy.derive(&scope, &left, &right).unwrap_err(),
            Error::ConstraintNotDerivable {
                policy,
                left,
                right
            }
        );
    }

    #[rstest]
    fn not_derivable_message(scope: Scope) {
        let err = Policy::TypeChecked
            .derive(&scope, &Type::int(), &Type::string())
            .unwrap_err();
        similar_asserts::assert_eq!(
            err.to_string(),
            "TypeChecked cannot compare values of type Int with values of type String"
        );
    }

    #[rstest]
    fn conversions_prefer_converting_the_right_operand(scope: Scope) {
        let constraint = Policy::ConversionChecked
            .derive(&scope, &Type::long(), &Type::int())
            .unwrap();
        let Evidence::RightConversion(conversion) = constraint.evidence() else {
            panic!("unexpected evidence {:?}", constraint.evidence())
        };
        assert_eq!(conversion.name(), "int2long");
        assert!(constraint.are_equal(&Value::Long(3), &Value::Int(3)));

        let constraint = Policy::ConversionChecked
            .derive(&scope, &Type::int(), &Type::long())
            .unwrap();
        assert!(matches!(
            constraint.evidence(),
            Evidence::LeftConversion(_)
        ));
        assert!(constraint.are_equal(&Value::Int(3), &Value::Long(3)));
        assert!(!constraint.are_equal(&Value::Int(3), &Value::Long(4)));
    }

    #[rstest]
    fn unchecked_prefers_the_left_equality(scope: Scope) {
        let scope = scope
            .nested()
            .equality(Type::string(), after_being(lower_cased()))
            .build();
        let c = Policy::Unchecked
            .derive(&scope, &Type::string(), &Type::any())
            .unwrap();
        assert_eq!(c.evidence(), &Evidence::Unconstrained);
        assert!(c.are_equal(&Value::str("A"), &Value::str("a")));

        let c = Policy::Unchecked
            .derive(&scope, &Type::any(), &Type::string())
            .unwrap();
        assert_eq!(c.evidence(), &Evidence::RightAuthority);
        assert!(c.are_equal(&Value::str("A"), &Value::str("a")));

        let c = Policy::Unchecked
            .derive(&scope, &Type::int(), &Type::any())
            .unwrap();
        assert!(!c.are_equal(&Value::str("A"), &Value::str("a")));
    }

    #[rstest]
    fn enabled_honors_pair_equalities(scope: Scope) {
        let by_length = equality_fn("by length", |a, b| match (a, b) {
            (Value::Str(s), Value::Int(n)) => s.len() == *n as usize,
            _ => false,
        });
        let scope = scope
            .nested()
            .pair_equality(Type::string(), Type::int(), by_length)
            .build();
        let c = Policy::Enabled
            .derive(&scope, &Type::string(), &Type::int())
            .unwrap();
        assert_eq!(c.evidence(), &Evidence::Registered);
        assert!(c.are_equal(&Value::str("abc"), &Value::Int(3)));

        let c = Policy::Unchecked
            .derive(&scope, &Type::string(), &Type::int())
            .unwrap();
        assert!(!c.are_equal(&Value::str("abc"), &Value::Int(3)));
    }

    #[rstest]
    #[case(Policy::TripleEquals, Policy::Unchecked)]
    #[case(Policy::TypeCheckedTripleEquals, Policy::TypeChecked)]
    #[case(Policy::ConversionCheckedTripleEquals, Policy::ConversionChecked)]
    #[case(Policy::Enabled, Policy::Enabled)]
    fn deprecated_policies_behave_as_their_replacement(
        scope: Scope,
        #[case] policy: Policy,
        #[case] canonical: Policy,
    ) {
        assert_eq!(policy.canonical(), canonical);
        assert_eq!(policy.is_deprecated(), policy != canonical);
        for (left, right) in [
            (Type::int(), Type::long()),
            (Type::long(), Type::int()),
            (named("Apple"), named("Fruit")),
            (Type::int(), Type::string()),
        ] {
            let lhs = policy.derive(&scope, &left, &right).map(|c| c.evidence().clone());
            let rhs = canonical
                .derive(&scope, &left, &right)
                .map(|c| c.evidence().clone());
            assert_eq!(lhs.is_ok(), rhs.is_ok(), "{policy} {left} {right}");
            if let (Ok(lhs), Ok(rhs)) = (lhs, rhs) {
                assert_eq!(lhs, rhs);
            }
        }
    }

    #[test]
    fn default_policy() {
        assert_eq!(Policy::default(), Policy::Enabled);
        assert!(Policy::TypeChecked.is_strict());
        assert!(Policy::ConversionCheckedTripleEquals.is_strict());
        assert!(!Policy::Enabled.is_strict());
        assert_eq!(Policy::TripleEquals.to_string(), "TripleEquals");
    }
}
