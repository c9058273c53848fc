//! The host language's `==`.

use crate::value::Value;

/// Numeric view used by cooperative equality between chars, ints, longs and doubles.
#[derive(Clone, Copy, Debug)]
enum Numeric {
    Integral(i64),
    Fractional(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(Numeric::Integral(i64::from(u32::from(*c)))),
            Value::Int(i) => Some(Numeric::Integral(i64::from(*i))),
            Value::Long(l) => Some(Numeric::Integral(*l)),
            Value::Double(d) => Some(Numeric::Fractional(*d)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Numeric::Integral(i) => i as f64,
            Numeric::Fractional(f) => f,
        }
    }

    fn eq(self, other: Numeric) -> bool {
        match (self, other) {
            (Numeric::Integral(lhs), Numeric::Integral(rhs)) => lhs == rhs,
            (lhs, rhs) => lhs.as_f64() == rhs.as_f64(),
        }
    }
}

impl Value {
    /// Native equality, dispatched on the left operand.
    ///
    /// Arrays compare by identity, containers compare their elements natively and objects
    /// decide with their own `native_equals`. The right operand's equality is never invoked.
    pub fn native_eq(&self, other: &Value) -> bool {
        if let (Some(lhs), Some(rhs)) = (Numeric::of(self), Numeric::of(other)) {
            return lhs.eq(rhs);
        }
        match (self, other) {
            (Value::Object(object), _) => object.native_equals(other),
            (Value::Null, Value::Null) | (Value::Unit, Value::Unit) => true,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            (Value::Str(lhs), Value::Str(rhs)) => lhs == rhs,
            (Value::Array(lhs), Value::Array(rhs)) => lhs.same_instance(rhs),
            (Value::Seq(lhs_kind, lhs), Value::Seq(rhs_kind, rhs)) => {
                lhs_kind.compatible(rhs_kind)
                    && lhs.len() == rhs.len()
                    && std::iter::zip(lhs, rhs).all(|(lhs, rhs)| lhs.native_eq(rhs))
            }
            (Value::Set(lhs_kind, lhs), Value::Set(rhs_kind, rhs)) => {
                lhs_kind == rhs_kind
                    && lhs.len() == rhs.len()
                    && lhs.iter().all(|l| rhs.iter().any(|r| l.native_eq(r)))
            }
            (Value::Map(lhs_kind, lhs), Value::Map(rhs_kind, rhs)) => {
                lhs_kind == rhs_kind
                    && lhs.len() == rhs.len()
                    && lhs.iter().all(|(lk, lv)| {
                        rhs.iter()
                            .any(|(rk, rv)| lk.native_eq(rk) && lv.native_eq(rv))
                    })
            }
            (Value::Option(lhs), Value::Option(rhs)) => match (lhs, rhs) {
                (Some(lhs), Some(rhs)) => lhs.native_eq(rhs),
                (None, None) => true,
                _ => false,
            },
            (Value::Sum(lhs_kind, lhs_branch, lhs), Value::Sum(rhs_kind, rhs_branch, rhs)) => {
                lhs_kind == rhs_kind && lhs_branch == rhs_branch && lhs.native_eq(rhs)
            }
            (Value::Record(lhs), Value::Record(rhs)) => {
                lhs.tag() == rhs.tag()
                    && lhs.fields().len() == rhs.fields().len()
                    && std::iter::zip(lhs.fields(), rhs.fields())
                        .all(|((ln, lv), (rn, rv))| ln == rn && lv.native_eq(rv))
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.native_eq(other)
    }
}
