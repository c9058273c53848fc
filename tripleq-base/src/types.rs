//! Static type descriptors.
//!
//! A [`Type`] is what a comparison site knows about an operand before looking at its value. The
//! constraint layer uses it to decide whether two operands may be compared at all and which
//! equality is authoritative.

use std::fmt;

use crate::{
    error::{Error, Result},
    ident::Ident,
};

/// Variance of a type parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variance {
    Covariant,
    Invariant,
}

use Variance::{Covariant as Co, Invariant as Inv};

/// Type constructors known to the equality core.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeCtor {
    Any,
    AnyVal,
    AnyRef,
    Nothing,
    Null,
    Unit,
    Bool,
    Char,
    Int,
    Long,
    Double,
    String,
    Throwable,
    Array,
    Iterable,
    Seq,
    List,
    Vector,
    Set,
    Map,
    Option,
    Some,
    None,
    Or,
    Good,
    Bad,
    Either,
    Left,
    Right,
    Try,
    Success,
    Failure,
    Choice,
    West,
    East,
    Every,
    One,
    Many,
    Chain,
    JavaList,
    JavaSet,
    JavaMap,
    /// User declared nominal type. See [`crate::hierarchy::TypeHierarchy::declare`].
    Named(Ident),
}

impl TypeCtor {
    /// Variance of each type parameter. The length is the constructor's arity.
    pub fn variances(&self) -> &'static [Variance] {
        match self {
            TypeCtor::Array | TypeCtor::JavaList | TypeCtor::JavaSet | TypeCtor::Set => &[Inv],
            TypeCtor::JavaMap => &[Inv, Inv],
            TypeCtor::Map => &[Inv, Co],
            TypeCtor::Iterable
            | TypeCtor::Seq
            | TypeCtor::List
            | TypeCtor::Vector
            | TypeCtor::Option
            | TypeCtor::Some
            | TypeCtor::Good
            | TypeCtor::Bad
            | TypeCtor::Left
            | TypeCtor::Right
            | TypeCtor::Try
            | TypeCtor::Success
            | TypeCtor::Failure
            | TypeCtor::West
            | TypeCtor::East
            | TypeCtor::Every
            | TypeCtor::One
            | TypeCtor::Many
            | TypeCtor::Chain => &[Co],
            TypeCtor::Or | TypeCtor::Either | TypeCtor::Choice => &[Co, Co],
            _ => &[],
        }
    }

    pub fn arity(&self) -> usize {
        self.variances().len()
    }

    /// Primitive constructors, the ones living under `AnyVal`.
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            TypeCtor::AnyVal
                | TypeCtor::Unit
                | TypeCtor::Bool
                | TypeCtor::Char
                | TypeCtor::Int
                | TypeCtor::Long
                | TypeCtor::Double
        )
    }

    pub fn name(&self) -> &str {
        match self {
            TypeCtor::Any => "Any",
            TypeCtor::AnyVal => "AnyVal",
            TypeCtor::AnyRef => "AnyRef",
            TypeCtor::Nothing => "Nothing",
            TypeCtor::Null => "Null",
            TypeCtor::Unit => "Unit",
            TypeCtor::Bool => "Boolean",
            TypeCtor::Char => "Char",
            TypeCtor::Int => "Int",
            TypeCtor::Long => "Long",
            TypeCtor::Double => "Double",
            TypeCtor::String => "String",
            TypeCtor::Throwable => "Throwable",
            TypeCtor::Array => "Array",
            TypeCtor::Iterable => "Iterable",
            TypeCtor::Seq => "Seq",
            TypeCtor::List => "List",
            TypeCtor::Vector => "Vector",
            TypeCtor::Set => "Set",
            TypeCtor::Map => "Map",
            TypeCtor::Option => "Option",
            TypeCtor::Some => "Some",
            TypeCtor::None => "None",
            TypeCtor::Or => "Or",
            TypeCtor::Good => "Good",
            TypeCtor::Bad => "Bad",
            TypeCtor::Either => "Either",
            TypeCtor::Left => "Left",
            TypeCtor::Right => "Right",
            TypeCtor::Try => "Try",
            TypeCtor::Success => "Success",
            TypeCtor::Failure => "Failure",
            TypeCtor::Choice => "Choice",
            TypeCtor::West => "West",
            TypeCtor::East => "East",
            TypeCtor::Every => "Every",
            TypeCtor::One => "One",
            TypeCtor::Many => "Many",
            TypeCtor::Chain => "Chain",
            TypeCtor::JavaList => "java.util.List",
            TypeCtor::JavaSet => "java.util.Set",
            TypeCtor::JavaMap => "java.util.Map",
            TypeCtor::Named(ident) => ident.as_str(),
        }
    }
}

impl fmt::Display for TypeCtor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A type constructor applied to its type arguments.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Type {
    ctor: TypeCtor,
    args: Vec<Type>,
}

impl Type {
    /// Applies the constructor to the arguments, checking the arity.
    pub fn new(ctor: TypeCtor, args: Vec<Type>) -> Result<Self> {
        if ctor.arity() != args.len() {
            return Err(Error::ArityMismatch {
                ctor: ctor.name().to_owned(),
                expected: ctor.arity(),
                actual: args.len(),
            });
        }
        Ok(Self { ctor, args })
    }

    /// Creates a user declared nominal type reference.
    pub fn named(name: &str) -> Result<Self> {
        Ok(Self::leaf(TypeCtor::Named(name.try_into()?)))
    }

    fn leaf(ctor: TypeCtor) -> Self {
        debug_assert_eq!(ctor.arity(), 0);
        Self {
            ctor,
            args: vec![],
        }
    }

    fn unary(ctor: TypeCtor, arg: Type) -> Self {
        debug_assert_eq!(ctor.arity(), 1);
        Self {
            ctor,
            args: vec![arg],
        }
    }

    fn binary(ctor: TypeCtor, lhs: Type, rhs: Type) -> Self {
        debug_assert_eq!(ctor.arity(), 2);
        Self {
            ctor,
            args: vec![lhs, rhs],
        }
    }

    pub fn ctor(&self) -> &TypeCtor {
        &self.ctor
    }

    pub fn args(&self) -> &[Type] {
        &self.args
    }

    /// Returns the n-th type argument or `Nothing` if the constructor has fewer arguments.
    pub fn arg(&self, n: usize) -> Type {
        self.args.get(n).cloned().unwrap_or_else(Type::nothing)
    }

    pub fn is_value_type(&self) -> bool {
        self.ctor.is_value_type()
    }

    pub fn any() -> Self {
        Self::leaf(TypeCtor::Any)
    }

    pub fn any_val() -> Self {
        Self::leaf(TypeCtor::AnyVal)
    }

    pub fn any_ref() -> Self {
        Self::leaf(TypeCtor::AnyRef)
    }

    pub fn nothing() -> Self {
        Self::leaf(TypeCtor::Nothing)
    }

    pub fn null() -> Self {
        Self::leaf(TypeCtor::Null)
    }

    pub fn unit() -> Self {
        Self::leaf(TypeCtor::Unit)
    }

    pub fn bool() -> Self {
        Self::leaf(TypeCtor::Bool)
    }

    pub fn char() -> Self {
        Self::leaf(TypeCtor::Char)
    }

    pub fn int() -> Self {
        Self::leaf(TypeCtor::Int)
    }

    pub fn long() -> Self {
        Self::leaf(TypeCtor::Long)
    }

    pub fn double() -> Self {
        Self::leaf(TypeCtor::Double)
    }

    pub fn string() -> Self {
        Self::leaf(TypeCtor::String)
    }

    pub fn throwable() -> Self {
        Self::leaf(TypeCtor::Throwable)
    }

    pub fn array(elem: Type) -> Self {
        Self::unary(TypeCtor::Array, elem)
    }

    pub fn iterable(elem: Type) -> Self {
        Self::unary(TypeCtor::Iterable, elem)
    }

    pub fn seq(elem: Type) -> Self {
        Self::unary(TypeCtor::Seq, elem)
    }

    pub fn list(elem: Type) -> Self {
        Self::unary(TypeCtor::List, elem)
    }

    pub fn vector(elem: Type) -> Self {
        Self::unary(TypeCtor::Vector, elem)
    }

    pub fn set(elem: Type) -> Self {
        Self::unary(TypeCtor::Set, elem)
    }

    pub fn map(key: Type, value: Type) -> Self {
        Self::binary(TypeCtor::Map, key, value)
    }

    pub fn option(elem: Type) -> Self {
        Self::unary(TypeCtor::Option, elem)
    }

    pub fn some(elem: Type) -> Self {
        Self::unary(TypeCtor::Some, elem)
    }

    pub fn none() -> Self {
        Self::leaf(TypeCtor::None)
    }

    pub fn or(good: Type, bad: Type) -> Self {
        Self::binary(TypeCtor::Or, good, bad)
    }

    pub fn good(good: Type) -> Self {
        Self::unary(TypeCtor::Good, good)
    }

    pub fn bad(bad: Type) -> Self {
        Self::unary(TypeCtor::Bad, bad)
    }

    pub fn either(left: Type, right: Type) -> Self {
        Self::binary(TypeCtor::Either, left, right)
    }

    pub fn left(left: Type) -> Self {
        Self::unary(TypeCtor::Left, left)
    }

    pub fn right(right: Type) -> Self {
        Self::unary(TypeCtor::Right, right)
    }

    pub fn r#try(elem: Type) -> Self {
        Self::unary(TypeCtor::Try, elem)
    }

    pub fn success(elem: Type) -> Self {
        Self::unary(TypeCtor::Success, elem)
    }

    pub fn failure(elem: Type) -> Self {
        Self::unary(TypeCtor::Failure, elem)
    }

    pub fn choice(west: Type, east: Type) -> Self {
        Self::binary(TypeCtor::Choice, west, east)
    }

    pub fn west(west: Type) -> Self {
        Self::unary(TypeCtor::West, west)
    }

    pub fn east(east: Type) -> Self {
        Self::unary(TypeCtor::East, east)
    }

    pub fn every(elem: Type) -> Self {
        Self::unary(TypeCtor::Every, elem)
    }

    pub fn one(elem: Type) -> Self {
        Self::unary(TypeCtor::One, elem)
    }

    pub fn many(elem: Type) -> Self {
        Self::unary(TypeCtor::Many, elem)
    }

    pub fn chain(elem: Type) -> Self {
        Self::unary(TypeCtor::Chain, elem)
    }

    pub fn java_list(elem: Type) -> Self {
        Self::unary(TypeCtor::JavaList, elem)
    }

    pub fn java_set(elem: Type) -> Self {
        Self::unary(TypeCtor::JavaSet, elem)
    }

    pub fn java_map(key: Type, value: Type) -> Self {
        Self::binary(TypeCtor::JavaMap, key, value)
    }
}

impl From<TypeCtor> for Type {
    /// Only meant for nullary constructors; missing arguments are filled with `Nothing`.
    fn from(ctor: TypeCtor) -> Self {
        let args = (0..ctor.arity()).map(|_| Type::nothing()).collect();
        Self { ctor, args }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ctor)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "[{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
