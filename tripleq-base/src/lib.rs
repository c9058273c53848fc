#![doc = include_str!("../README.md")]

pub mod error;
pub mod hierarchy;
pub mod ident;
mod native;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use hierarchy::TypeHierarchy;
pub use ident::Ident;
pub use types::{Type, TypeCtor, Variance};
pub use value::{
    ArrayRef, Branch, MapKind, NativeObject, ObjectRef, Record, SeqKind, SetKind, SumKind, Value,
};
