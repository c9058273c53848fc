//! Static types and values for Rust types.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tripleq_base::{Type, Value};

/// A Rust type with a static [`Type`] that can be viewed as a [`Value`].
pub trait Typed {
    fn static_type() -> Type;

    fn to_value(&self) -> Value;
}

macro_rules! typed_primitive {
    ($($rust:ty => $ty:ident),* $(,)?) => {
        $(
            impl Typed for $rust {
                fn static_type() -> Type {
                    Type::$ty()
                }

                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

typed_primitive! {
    bool => bool,
    char => char,
    i32 => int,
    i64 => long,
    f64 => double,
    String => string,
}

impl Typed for str {
    fn static_type() -> Type {
        Type::string()
    }

    fn to_value(&self) -> Value {
        Value::str(self)
    }
}

impl Typed for () {
    fn static_type() -> Type {
        Type::unit()
    }

    fn to_value(&self) -> Value {
        Value::Unit
    }
}

/// Values are only known to be `Any`.
impl Typed for Value {
    fn static_type() -> Type {
        Type::any()
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: Typed + ?Sized> Typed for &T {
    fn static_type() -> Type {
        T::static_type()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn static_type() -> Type {
        Type::vector(T::static_type())
    }

    fn to_value(&self) -> Value {
        Value::vector(self.iter().map(Typed::to_value))
    }
}

/// Each call creates a new array instance.
impl<T: Typed, const N: usize> Typed for [T; N] {
    fn static_type() -> Type {
        Type::array(T::static_type())
    }

    fn to_value(&self) -> Value {
        Value::array(self.iter().map(Typed::to_value))
    }
}

impl<T: Typed> Typed for Option<T> {
    fn static_type() -> Type {
        Type::option(T::static_type())
    }

    fn to_value(&self) -> Value {
        match self {
            Some(value) => Value::some(value.to_value()),
            None => Value::none(),
        }
    }
}

/// `Ok` is `Good` and `Err` is `Bad`.
impl<T: Typed, E: Typed> Typed for Result<T, E> {
    fn static_type() -> Type {
        Type::or(T::static_type(), E::static_type())
    }

    fn to_value(&self) -> Value {
        match self {
            Ok(value) => Value::good(value.to_value()),
            Err(err) => Value::bad(err.to_value()),
        }
    }
}

impl<T: Typed> Typed for BTreeSet<T> {
    fn static_type() -> Type {
        Type::set(T::static_type())
    }

    fn to_value(&self) -> Value {
        Value::set(self.iter().map(Typed::to_value))
    }
}

impl<T: Typed, S> Typed for HashSet<T, S> {
    fn static_type() -> Type {
        Type::set(T::static_type())
    }

    fn to_value(&self) -> Value {
        Value::set(self.iter().map(Typed::to_value))
    }
}

impl<K: Typed, V: Typed> Typed for BTreeMap<K, V> {
    fn static_type() -> Type {
        Type::map(K::static_type(), V::static_type())
    }

    fn to_value(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())))
    }
}

impl<K: Typed, V: Typed, S> Typed for HashMap<K, V, S> {
    fn static_type() -> Type {
        Type::map(K::static_type(), V::static_type())
    }

    fn to_value(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())))
    }
}
