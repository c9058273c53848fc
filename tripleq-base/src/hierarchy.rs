//! The subtype relation between [`Type`]s.

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    ident::Ident,
    types::{Type, TypeCtor, Variance},
};

/// Subtype relation over the built-in constructors plus the user declared nominal types.
#[derive(Clone, Debug, Default)]
pub struct TypeHierarchy {
    supertypes: HashMap<Ident, Vec<Type>>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a nominal type with the given direct supertypes and returns a reference to it.
    ///
    /// Declaring the same name again adds supertypes to it. Types without declared supertypes
    /// are direct subtypes of `AnyRef`.
    pub fn declare(
        &mut self,
        name: &str,
        supertypes: impl IntoIterator<Item = Type>,
    ) -> Result<Type> {
        let ident = Ident::try_from(name)?;
        let declared = Type::named(name)?;
        let supertypes: Vec<Type> = supertypes.into_iter().collect();
        for supertype in &supertypes {
            if self.is_subtype(supertype, &declared) {
                return Err(Error::CyclicHierarchy {
                    name: ident,
                    supertype: supertype.clone(),
                });
            }
        }
        log::debug!("Declaring type {declared} with supertypes {supertypes:?}");
        self.supertypes.entry(ident).or_default().extend(supertypes);
        Ok(declared)
    }

    /// Returns the direct supertypes of the type with its arguments substituted.
    pub fn direct_supertypes(&self, ty: &Type) -> Vec<Type> {
        let arg = |n| ty.arg(n);
        match ty.ctor() {
            TypeCtor::Any | TypeCtor::Nothing => vec![],
            TypeCtor::AnyVal | TypeCtor::AnyRef => vec![Type::any()],
            TypeCtor::Unit
            | TypeCtor::Bool
            | TypeCtor::Char
            | TypeCtor::Int
            | TypeCtor::Long
            | TypeCtor::Double => vec![Type::any_val()],
            TypeCtor::Seq | TypeCtor::Set => vec![Type::iterable(arg(0))],
            TypeCtor::List | TypeCtor::Vector => vec![Type::seq(arg(0))],
            TypeCtor::Some => vec![Type::option(arg(0))],
            TypeCtor::None => vec![Type::option(Type::nothing())],
            TypeCtor::Good => vec![Type::or(arg(0), Type::nothing())],
            TypeCtor::Bad => vec![Type::or(Type::nothing(), arg(0))],
            TypeCtor::Left => vec![Type::either(arg(0), Type::nothing())],
            TypeCtor::Right => vec![Type::either(Type::nothing(), arg(0))],
            TypeCtor::West => vec![Type::choice(arg(0), Type::nothing())],
            TypeCtor::East => vec![Type::choice(Type::nothing(), arg(0))],
            TypeCtor::Success | TypeCtor::Failure => vec![Type::r#try(arg(0))],
            TypeCtor::One | TypeCtor::Many => vec![Type::every(arg(0))],
            TypeCtor::Named(name) => match self.supertypes.get(name) {
                Some(declared) if !declared.is_empty() => declared.clone(),
                _ => vec![Type::any_ref()],
            },
            _ => vec![Type::any_ref()],
        }
    }

    /// Returns true if `sub` is a subtype of `sup`. The relation is reflexive.
    pub fn is_subtype(&self, sub: &Type, sup: &Type) -> bool {
        if sub == sup {
            return true;
        }
        match (sub.ctor(), sup.ctor()) {
            (_, TypeCtor::Any) | (TypeCtor::Nothing, _) => return true,
            (TypeCtor::Null, sup_ctor) => {
                return !sup_ctor.is_value_type() && *sup_ctor != TypeCtor::Nothing;
            }
            (sub_ctor, sup_ctor) if sub_ctor == sup_ctor => {
                return self.args_conform(sub, sup);
            }
            _ => {}
        }
        self.direct_supertypes(sub)
            .iter()
            .any(|parent| self.is_subtype(parent, sup))
    }

    /// Checks the arguments of two applications of the same constructor according to the
    /// constructor's variance.
    fn args_conform(&self, sub: &Type, sup: &Type) -> bool {
        std::iter::zip(sub.ctor().variances(), std::iter::zip(sub.args(), sup.args())).all(
            |(variance, (sub_arg, sup_arg))| match variance {
                Variance::Covariant => self.is_subtype(sub_arg, sup_arg),
                Variance::Invariant => sub_arg == sup_arg,
            },
        )
    }

    /// Returns true if either type is a subtype of the other.
    pub fn related(&self, lhs: &Type, rhs: &Type) -> bool {
        self.is_subtype(lhs, rhs) || self.is_subtype(rhs, lhs)
    }
}
