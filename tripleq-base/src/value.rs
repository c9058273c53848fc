//! Dynamically typed values compared by the equality core.

use std::{any::Any, borrow::Cow, fmt, sync::Arc};

use crate::{
    error::{Error, Result},
    ident::Ident,
    types::Type,
};

/// Tag of the records standing for map entries.
const TUPLE2: &str = "Tuple2";

/// Kinds of ordered sequences.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SeqKind {
    List,
    Vector,
    Chain,
    Every,
    JavaList,
}

impl SeqKind {
    /// List and Vector are both Scala sequences and compare equal to each other.
    pub fn is_scala_seq(&self) -> bool {
        matches!(self, SeqKind::List | SeqKind::Vector)
    }

    /// Returns true if sequences of these kinds may be natively equal.
    pub fn compatible(&self, other: &SeqKind) -> bool {
        self == other || (self.is_scala_seq() && other.is_scala_seq())
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SetKind {
    Set,
    JavaSet,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum MapKind {
    Map,
    JavaMap,
}

/// Two-branch sum types.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SumKind {
    /// `Good` / `Bad`.
    Or,
    /// `Left` / `Right`.
    Either,
    /// `Success` / `Failure`.
    Try,
    /// `West` / `East`.
    Choice,
}

/// Branch of a sum value. The first branch is the one listed first in [`SumKind`]'s docs.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Branch {
    First,
    Second,
}

impl SumKind {
    pub fn branch_name(&self, branch: Branch) -> &'static str {
        match (self, branch) {
            (SumKind::Or, Branch::First) => "Good",
            (SumKind::Or, Branch::Second) => "Bad",
            (SumKind::Either, Branch::First) => "Left",
            (SumKind::Either, Branch::Second) => "Right",
            (SumKind::Try, Branch::First) => "Success",
            (SumKind::Try, Branch::Second) => "Failure",
            (SumKind::Choice, Branch::First) => "West",
            (SumKind::Choice, Branch::Second) => "East",
        }
    }
}

/// A mutable-in-spirit array. Arrays carry an identity and natively compare by it.
#[derive(Clone, Debug)]
pub struct ArrayRef(Arc<Vec<Value>>);

impl ArrayRef {
    pub fn new(elements: Vec<Value>) -> Self {
        Self(Arc::new(elements))
    }

    pub fn elements(&self) -> &[Value] {
        &self.0
    }

    /// Returns true if both handles point to the same array instance.
    pub fn same_instance(&self, other: &ArrayRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A case-class-like value: a tag and named fields.
#[derive(Clone, Debug)]
pub struct Record {
    tag: Ident,
    fields: Vec<(Ident, Value)>,
}

impl Record {
    pub fn new<'a>(tag: &str, fields: impl IntoIterator<Item = (&'a str, Value)>) -> Result<Self> {
        let tag = Ident::try_from(tag)?;
        let fields = fields
            .into_iter()
            .map(|(name, value)| Ok((Ident::try_from(name)?, value)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tag, fields })
    }

    pub fn tag(&self) -> &Ident {
        &self.tag
    }

    pub fn fields(&self) -> &[(Ident, Value)] {
        &self.fields
    }

    /// Returns the value of the named field.
    pub fn field(&self, name: &str) -> Result<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::NoSuchField {
                record: self.tag.clone(),
                field: name.to_owned(),
            })
    }
}

/// A user value that brings its own native equality.
pub trait NativeObject: fmt::Debug + Send + Sync {
    /// The host `equals`. Only ever invoked on the left operand of a comparison.
    fn native_equals(&self, other: &Value) -> bool;

    fn runtime_type(&self) -> Type {
        Type::any_ref()
    }

    fn as_any(&self) -> &dyn Any;
}

pub type ObjectRef = Arc<dyn NativeObject>;

/// A value of any type.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Unit,
    Bool(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Double(f64),
    Str(String),
    Array(ArrayRef),
    Seq(SeqKind, Vec<Value>),
    Set(SetKind, Vec<Value>),
    Map(MapKind, Vec<(Value, Value)>),
    Option(Option<Box<Value>>),
    Sum(SumKind, Branch, Box<Value>),
    Record(Record),
    Object(ObjectRef),
}

//===----------------------------------------------------------------------===//
// Factories
//===----------------------------------------------------------------------===//

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Creates a new array instance.
    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(ArrayRef::new(elements.into_iter().collect()))
    }

    pub fn list(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(SeqKind::List, elements.into_iter().collect())
    }

    pub fn vector(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(SeqKind::Vector, elements.into_iter().collect())
    }

    pub fn java_list(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(SeqKind::JavaList, elements.into_iter().collect())
    }

    /// Creates a non-empty chain.
    pub fn chain(elements: impl IntoIterator<Item = Value>) -> Result<Self> {
        Self::non_empty(SeqKind::Chain, "Chain", elements)
    }

    /// Creates a non-empty `Every` (`One` when it has a single element, `Many` otherwise).
    pub fn every(elements: impl IntoIterator<Item = Value>) -> Result<Self> {
        Self::non_empty(SeqKind::Every, "Every", elements)
    }

    fn non_empty(
        kind: SeqKind,
        name: &'static str,
        elements: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        let elements: Vec<Value> = elements.into_iter().collect();
        if elements.is_empty() {
            return Err(Error::EmptyContainer(name));
        }
        Ok(Value::Seq(kind, elements))
    }

    /// Creates a set. Natively equal elements are kept once.
    pub fn set(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(SetKind::Set, dedup(elements))
    }

    pub fn java_set(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(SetKind::JavaSet, dedup(elements))
    }

    /// Creates a map. A repeated key keeps its last value.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(MapKind::Map, dedup_keys(entries))
    }

    pub fn java_map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(MapKind::JavaMap, dedup_keys(entries))
    }

    pub fn some(value: Value) -> Self {
        Value::Option(Some(Box::new(value)))
    }

    pub fn none() -> Self {
        Value::Option(None)
    }

    pub fn good(value: Value) -> Self {
        Value::Sum(SumKind::Or, Branch::First, Box::new(value))
    }

    pub fn bad(value: Value) -> Self {
        Value::Sum(SumKind::Or, Branch::Second, Box::new(value))
    }

    pub fn left(value: Value) -> Self {
        Value::Sum(SumKind::Either, Branch::First, Box::new(value))
    }

    pub fn right(value: Value) -> Self {
        Value::Sum(SumKind::Either, Branch::Second, Box::new(value))
    }

    pub fn success(value: Value) -> Self {
        Value::Sum(SumKind::Try, Branch::First, Box::new(value))
    }

    pub fn failure(value: Value) -> Self {
        Value::Sum(SumKind::Try, Branch::Second, Box::new(value))
    }

    pub fn west(value: Value) -> Self {
        Value::Sum(SumKind::Choice, Branch::First, Box::new(value))
    }

    pub fn east(value: Value) -> Self {
        Value::Sum(SumKind::Choice, Branch::Second, Box::new(value))
    }

    pub fn record<'a>(
        tag: &str,
        fields: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<Self> {
        Ok(Value::Record(Record::new(tag, fields)?))
    }

    /// A map entry, the `Tuple2` record seen when iterating over a map.
    pub fn entry(key: Value, value: Value) -> Self {
        Value::Record(Record {
            tag: Ident::from_static(TUPLE2),
            fields: vec![
                (Ident::from_static("_1"), key),
                (Ident::from_static("_2"), value),
            ],
        })
    }

    pub fn object(object: impl NativeObject + 'static) -> Self {
        Value::Object(Arc::new(object))
    }
}

fn dedup(elements: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = vec![];
    for element in elements {
        if !unique.iter().any(|u| u.native_eq(&element)) {
            unique.push(element);
        }
    }
    unique
}

fn dedup_keys(entries: impl IntoIterator<Item = (Value, Value)>) -> Vec<(Value, Value)> {
    let mut unique: Vec<(Value, Value)> = vec![];
    for (key, value) in entries {
        match unique.iter_mut().find(|(k, _)| k.native_eq(&key)) {
            Some(entry) => entry.1 = value,
            None => unique.push((key, value)),
        }
    }
    unique
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Option(value.map(|v| Box::new(v.into())))
    }
}

//===----------------------------------------------------------------------===//
// Views
//===----------------------------------------------------------------------===//

impl Value {
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns the array as a `Vector` view. Arrays nested directly inside it are viewed the
    /// same way; every other value is returned as is.
    pub fn deep(&self) -> Value {
        match self {
            Value::Array(array) => Value::vector(array.elements().iter().map(Value::deep)),
            other => other.clone(),
        }
    }

    /// Ordered elements of arrays and sequences.
    pub fn ordered_elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array(array) => Some(array.elements()),
            Value::Seq(_, elements) => Some(elements),
            _ => None,
        }
    }

    /// The elements as seen by contain-style checks: arrays, sequences and sets yield their
    /// elements, strings their characters, options zero or one element and maps their entries
    /// as [`Value::entry`] records.
    pub fn elements(&self) -> Option<Cow<'_, [Value]>> {
        match self {
            Value::Array(array) => Some(Cow::Borrowed(array.elements())),
            Value::Seq(_, elements) | Value::Set(_, elements) => Some(Cow::Borrowed(elements)),
            Value::Str(s) => Some(Cow::Owned(s.chars().map(Value::Char).collect())),
            Value::Option(None) => Some(Cow::Borrowed(&[])),
            Value::Option(Some(value)) => Some(Cow::Owned(vec![(**value).clone()])),
            Value::Map(_, entries) => Some(Cow::Owned(
                entries
                    .iter()
                    .map(|(k, v)| Value::entry(k.clone(), v.clone()))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Looks up a field of a record value.
    pub fn field(&self, name: &str) -> Result<&Value> {
        match self {
            Value::Record(record) => record.field(name),
            other => Err(Error::NoSuchField {
                record: Ident::try_from(other.kind_name())?,
                field: name.to_owned(),
            }),
        }
    }

    /// Name of the runtime constructor of the value.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Unit => "Unit",
            Value::Bool(_) => "Boolean",
            Value::Char(_) => "Char",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Double(_) => "Double",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Seq(SeqKind::List, _) => "List",
            Value::Seq(SeqKind::Vector, _) => "Vector",
            Value::Seq(SeqKind::Chain, _) => "Chain",
            Value::Seq(SeqKind::Every, elements) if elements.len() == 1 => "One",
            Value::Seq(SeqKind::Every, _) => "Many",
            Value::Seq(SeqKind::JavaList, _) => "JavaList",
            Value::Set(SetKind::Set, _) => "Set",
            Value::Set(SetKind::JavaSet, _) => "JavaSet",
            Value::Map(MapKind::Map, _) => "Map",
            Value::Map(MapKind::JavaMap, _) => "JavaMap",
            Value::Option(Some(_)) => "Some",
            Value::Option(None) => "None",
            Value::Sum(kind, branch, _) => kind.branch_name(*branch),
            Value::Record(_) => "Record",
            Value::Object(_) => "Object",
        }
    }

    /// Best effort runtime type. Element types are not inferred and show up as `Any`.
    pub fn runtime_type(&self) -> Type {
        let any = Type::any;
        match self {
            Value::Null => Type::null(),
            Value::Unit => Type::unit(),
            Value::Bool(_) => Type::bool(),
            Value::Char(_) => Type::char(),
            Value::Int(_) => Type::int(),
            Value::Long(_) => Type::long(),
            Value::Double(_) => Type::double(),
            Value::Str(_) => Type::string(),
            Value::Array(_) => Type::array(any()),
            Value::Seq(SeqKind::List, _) => Type::list(any()),
            Value::Seq(SeqKind::Vector, _) => Type::vector(any()),
            Value::Seq(SeqKind::Chain, _) => Type::chain(any()),
            Value::Seq(SeqKind::Every, elements) if elements.len() == 1 => Type::one(any()),
            Value::Seq(SeqKind::Every, _) => Type::many(any()),
            Value::Seq(SeqKind::JavaList, _) => Type::java_list(any()),
            Value::Set(SetKind::Set, _) => Type::set(any()),
            Value::Set(SetKind::JavaSet, _) => Type::java_set(any()),
            Value::Map(MapKind::Map, _) => Type::map(any(), any()),
            Value::Map(MapKind::JavaMap, _) => Type::java_map(any(), any()),
            Value::Option(Some(_)) => Type::some(any()),
            Value::Option(None) => Type::none(),
            Value::Sum(SumKind::Or, Branch::First, _) => Type::good(any()),
            Value::Sum(SumKind::Or, Branch::Second, _) => Type::bad(any()),
            Value::Sum(SumKind::Either, Branch::First, _) => Type::left(any()),
            Value::Sum(SumKind::Either, Branch::Second, _) => Type::right(any()),
            Value::Sum(SumKind::Try, Branch::First, _) => Type::success(any()),
            Value::Sum(SumKind::Try, Branch::Second, _) => Type::failure(any()),
            Value::Sum(SumKind::Choice, Branch::First, _) => Type::west(any()),
            Value::Sum(SumKind::Choice, Branch::Second, _) => Type::east(any()),
            Value::Record(record) => Type::named(record.tag().as_str()).unwrap_or_else(|_| any()),
            Value::Object(object) => object.runtime_type(),
        }
    }
}

//===----------------------------------------------------------------------===//
// Display
//===----------------------------------------------------------------------===//

fn write_joined<'a, T: 'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a T>,
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    for (n, item) in items.into_iter().enumerate() {
        if n > 0 {
            write!(f, ", ")?;
        }
        write_item(f, item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}L"),
            Value::Double(d) => write!(f, "{d:?}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Seq(SeqKind::JavaList, elements) | Value::Set(SetKind::JavaSet, elements) => {
                write!(f, "[")?;
                write_joined(f, elements, |f, e| write!(f, "{e}"))?;
                write!(f, "]")
            }
            Value::Array(array) => {
                write!(f, "Array(")?;
                write_joined(f, array.elements(), |f, e| write!(f, "{e}"))?;
                write!(f, ")")
            }
            Value::Seq(_, elements) | Value::Set(_, elements) => {
                write!(f, "{}(", self.kind_name())?;
                write_joined(f, elements, |f, e| write!(f, "{e}"))?;
                write!(f, ")")
            }
            Value::Map(MapKind::JavaMap, entries) => {
                write!(f, "{{")?;
                write_joined(f, entries, |f, (k, v)| write!(f, "{k}={v}"))?;
                write!(f, "}}")
            }
            Value::Map(MapKind::Map, entries) => {
                write!(f, "Map(")?;
                write_joined(f, entries, |f, (k, v)| write!(f, "{k} -> {v}"))?;
                write!(f, ")")
            }
            Value::Option(Some(value)) => write!(f, "Some({value})"),
            Value::Option(None) => write!(f, "None"),
            Value::Sum(kind, branch, value) => write!(f, "{}({value})", kind.branch_name(*branch)),
            Value::Record(record) if record.tag() == TUPLE2 => {
                write!(f, "(")?;
                write_joined(f, record.fields(), |f, (_, v)| write!(f, "{v}"))?;
                write!(f, ")")
            }
            Value::Record(record) => {
                write!(f, "{}(", record.tag())?;
                write_joined(f, record.fields(), |f, (_, v)| write!(f, "{v}"))?;
                write!(f, ")")
            }
            Value::Object(object) => write!(f, "{object:?}"),
        }
    }
}
