//! # environment
//!
//! Variable bindings for the interpreter: an insertion-ordered map from
//! names to `i64` values built on [`indexmap::IndexMap`].
//!
//! ## Example
//! ```rust
//! # use pasclex_calc::Environment;
//! let mut env = Environment::new();
//! assert_eq!(env.set("x", 3), None);
//! assert_eq!(env.set("x", 4), Some(3)); // rebinding returns the old value
//! assert_eq!(env.get("x"), Some(4));
//! assert_eq!(env.get("y"), None);
//! ```

use indexmap::IndexMap;
use smartstring::alias::String;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Errors from reading a `name=value` binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("binding {binding:?} is not of the form name=value")]
    MissingEquals { binding: String },

    #[error("invalid variable name {name:?}")]
    InvalidName { name: String },

    #[error("invalid value {value:?}")]
    InvalidValue {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Maps variable names to values, remembering the order of first binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: IndexMap<String, i64>,
}

impl Environment {
    /// An environment with no bindings.
    pub fn new() -> Self {
        Self {
            vars: IndexMap::new(),
        }
    }

    /// Binds `name` to `value` and returns the previous value, if any.
    ///
    /// A rebound name keeps its place in the iteration order.
    pub fn set(&mut self, name: impl AsRef<str>, value: i64) -> Option<i64> {
        self.vars.insert(String::from(name.as_ref()), value)
    }

    /// Value bound to `name`.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.vars.get(name).copied()
    }

    /// Is `name` bound?
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns the number of bound names.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Are there no bindings?
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Bindings in order of first binding.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.vars.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: AsRef<str>> FromIterator<(K, i64)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.extend(iter);
        env
    }
}

impl<K: AsRef<str>> Extend<(K, i64)> for Environment {
    fn extend<I: IntoIterator<Item = (K, i64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

/// A `name=value` pair as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: i64,
}

impl FromStr for Binding {
    type Err = BindingError;

    /// Reads `name=value`; the name must be a valid identifier and the value
    /// a decimal `i64`. Whitespace around either part is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').ok_or_else(|| BindingError::MissingEquals {
            binding: s.into(),
        })?;
        let name = name.trim();
        if !is_identifier(name) {
            return Err(BindingError::InvalidName { name: name.into() });
        }
        let value = value.trim();
        let value = value.parse().map_err(|source| BindingError::InvalidValue {
            value: value.into(),
            source,
        })?;
        Ok(Self {
            name: name.into(),
            value,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphabetic() || c == '_' || c.is_ascii_digit())
        }
        _ => false,
    }
}
