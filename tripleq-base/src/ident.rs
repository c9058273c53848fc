use std::{fmt, sync::Arc};

use regex::Regex;

use crate::error::Error;

lazy_static::lazy_static! {
    pub(crate) static ref VALID_IDENT: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Name of a user declared type, record tag or record field.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ident(Arc<str>);

impl TryFrom<&str> for Ident {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if !VALID_IDENT.is_match(value) {
            return Err(Error::InvalidIdent(value.to_owned()));
        }
        Ok(Self(value.into()))
    }
}

impl TryFrom<String> for Ident {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().try_into()
    }
}

impl Ident {
    /// For names known to be valid at compile time.
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(VALID_IDENT.is_match(name), "{name}");
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
