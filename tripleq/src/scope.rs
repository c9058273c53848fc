//! Scopes carrying the active policy and the registered equalities and conversions.
//!
//! A scope is a persistent chain of frames. Nesting a scope never changes its parent, and the
//! innermost registration for a type shadows the outer ones.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tripleq_base::{Type, TypeCtor, TypeHierarchy, Value};

use crate::{
    constraint::{Constraint, Conversion, EqualityConstraint},
    equality::{EqualityRef, default_equality},
    error::Result,
    policy::Policy,
    recursive::{ContainerFamily, ElementEqualities, lift_to_container},
    typed::Typed,
};

#[derive(Debug)]
struct Frame {
    parent: Option<Arc<Frame>>,
    policy: Policy,
    hierarchy: Arc<TypeHierarchy>,
    equalities: HashMap<Type, EqualityRef>,
    pairs: HashMap<(Type, Type), EqualityRef>,
    conversions: HashMap<(Type, Type), Conversion>,
    recursive: HashSet<ContainerFamily>,
}

impl Frame {
    fn child_of(parent: &Arc<Frame>) -> Self {
        Self {
            parent: Some(parent.clone()),
            policy: parent.policy,
            hierarchy: parent.hierarchy.clone(),
            equalities: Default::default(),
            pairs: Default::default(),
            conversions: Default::default(),
            recursive: Default::default(),
        }
    }
}

/// The context of a comparison.
#[derive(Clone, Debug)]
pub struct Scope {
    inner: Arc<Frame>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// A root scope with the default policy, no user declared types and the built-in
    /// conversions.
    pub fn new() -> Self {
        Self::root(TypeHierarchy::default())
    }

    /// A root scope over the given type hierarchy.
    pub fn root(hierarchy: TypeHierarchy) -> Self {
        let conversions = Conversion::builtin()
            .into_iter()
            .map(|c| ((c.from().clone(), c.to().clone()), c))
            .collect();
        Self {
            inner: Arc::new(Frame {
                parent: None,
                policy: Policy::default(),
                hierarchy: Arc::new(hierarchy),
                equalities: Default::default(),
                pairs: Default::default(),
                conversions,
                recursive: Default::default(),
            }),
        }
    }

    /// Starts configuring a scope nested in this one.
    pub fn nested(&self) -> ScopeBuilder {
        ScopeBuilder(Frame::child_of(&self.inner))
    }

    /// Runs `body` in a nested scope configured by `configure`.
    pub fn scoped<T>(
        &self,
        configure: impl FnOnce(ScopeBuilder) -> ScopeBuilder,
        body: impl FnOnce(&Scope) -> T,
    ) -> T {
        body(&configure(self.nested()).build())
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(Some(self.inner.as_ref()), |frame| frame.parent.as_deref())
    }

    pub fn policy(&self) -> Policy {
        self.inner.policy
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.inner.hierarchy
    }

    /// Number of scopes between this one and the root.
    pub fn depth(&self) -> usize {
        self.frames().count() - 1
    }

    pub fn is_recursive(&self, family: ContainerFamily) -> bool {
        self.frames().any(|frame| frame.recursive.contains(&family))
    }

    /// The custom equality for the type, if it has one.
    ///
    /// Registered equalities are consulted first. Otherwise, if the type's container family was
    /// opted into recursive equality, the element equalities are resolved from the type
    /// arguments and lifted into the container.
    pub fn lookup_equality(&self, ty: &Type) -> Option<EqualityRef> {
        if let Some(equality) = self.frames().find_map(|frame| frame.equalities.get(ty)) {
            return Some(equality.clone());
        }
        let family = ContainerFamily::of(ty.ctor())?;
        if !self.is_recursive(family) {
            return None;
        }
        let elements = self.element_equalities(ty);
        log::debug!("Lifting element equalities {elements:?} into {ty}");
        Some(lift_to_container(family, elements, true))
    }

    fn element_equalities(&self, ty: &Type) -> ElementEqualities {
        let arg = |n| self.resolve_equality(&ty.arg(n));
        match ty.ctor() {
            TypeCtor::Map
            | TypeCtor::JavaMap
            | TypeCtor::Or
            | TypeCtor::Either
            | TypeCtor::Choice => ElementEqualities::Pair(arg(0), arg(1)),
            TypeCtor::Good | TypeCtor::Left | TypeCtor::West => {
                ElementEqualities::Pair(arg(0), default_equality())
            }
            TypeCtor::Bad | TypeCtor::Right | TypeCtor::East => {
                ElementEqualities::Pair(default_equality(), arg(0))
            }
            TypeCtor::Try | TypeCtor::Success | TypeCtor::Failure => {
                ElementEqualities::Pair(arg(0), self.resolve_equality(&Type::throwable()))
            }
            _ => ElementEqualities::Single(arg(0)),
        }
    }

    /// The equality deciding comparisons with a left operand of the type.
    pub fn resolve_equality(&self, ty: &Type) -> EqualityRef {
        self.lookup_equality(ty).unwrap_or_else(default_equality)
    }

    /// Like [`Scope::resolve_equality`] but an explicitly supplied equality wins.
    pub fn resolve_equality_with(&self, ty: &Type, explicit: Option<EqualityRef>) -> EqualityRef {
        explicit.unwrap_or_else(|| self.resolve_equality(ty))
    }

    /// The equality registered for comparing the two types, if any.
    pub fn pair_equality(&self, left: &Type, right: &Type) -> Option<EqualityRef> {
        let key = (left.clone(), right.clone());
        self.frames()
            .find_map(|frame| frame.pairs.get(&key))
            .cloned()
    }

    /// The conversion from one type to the other, if any.
    pub fn conversion(&self, from: &Type, to: &Type) -> Option<Conversion> {
        let key = (from.clone(), to.clone());
        self.frames()
            .find_map(|frame| frame.conversions.get(&key))
            .cloned()
    }

    /// Derives the constraint for the two types under the active policy.
    pub fn derive(&self, left: &Type, right: &Type) -> Result<Constraint> {
        self.policy().derive(self, left, right)
    }

    /// Compares two values given their static types.
    pub fn are_equal(&self, left: &Type, a: &Value, right: &Type, b: &Value) -> Result<bool> {
        Ok(self.derive(left, right)?.are_equal(a, b))
    }

    /// Compares two values using their runtime types as static types.
    pub fn are_equal_values(&self, a: &Value, b: &Value) -> Result<bool> {
        self.are_equal(&a.runtime_type(), a, &b.runtime_type(), b)
    }

    /// `a === b`.
    pub fn triple_eq<A, B>(&self, a: &A, b: &B) -> Result<bool>
    where
        A: Typed + ?Sized,
        B: Typed + ?Sized,
    {
        self.are_equal(&A::static_type(), &a.to_value(), &B::static_type(), &b.to_value())
    }

    /// `a !== b`.
    pub fn triple_ne<A, B>(&self, a: &A, b: &B) -> Result<bool>
    where
        A: Typed + ?Sized,
        B: Typed + ?Sized,
    {
        Ok(!self.triple_eq(a, b)?)
    }
}

/// Configures a nested [`Scope`].
#[derive(Debug)]
pub struct ScopeBuilder(Frame);

impl ScopeBuilder {
    pub fn policy(self, policy: Policy) -> Self {
        let mut f = self.0;
        f.policy = policy;
        Self(f)
    }

    /// Replaces the type hierarchy for this scope and the scopes nested in it.
    pub fn hierarchy(self, hierarchy: TypeHierarchy) -> Self {
        let mut f = self.0;
        f.hierarchy = Arc::new(hierarchy);
        Self(f)
    }

    /// Registers the equality for left operands of the type.
    pub fn equality(self, ty: Type, equality: EqualityRef) -> Self {
        let mut f = self.0;
        f.equalities.insert(ty, equality);
        Self(f)
    }

    /// Registers the equality for comparing values of `left` with values of `right`.
    pub fn pair_equality(self, left: Type, right: Type, equality: EqualityRef) -> Self {
        let mut f = self.0;
        f.pairs.insert((left, right), equality);
        Self(f)
    }

    pub fn conversion(self, conversion: Conversion) -> Self {
        let mut f = self.0;
        f.conversions
            .insert((conversion.from().clone(), conversion.to().clone()), conversion);
        Self(f)
    }

    /// Opts the container family into recursive equality.
    pub fn recursive(self, family: ContainerFamily) -> Self {
        let mut f = self.0;
        f.recursive.insert(family);
        Self(f)
    }

    pub fn build(self) -> Scope {
        self.into()
    }
}

impl From<ScopeBuilder> for Scope {
    fn from(builder: ScopeBuilder) -> Scope {
        Scope {
            inner: Arc::new(builder.0),
        }
    }
}
