//! Resolver arguments as seen by permission checks.
//!
//! The host converts the GraphQL engine's coerced arguments into an [`Arguments`]
//! tree before calling the permission extension. Global ids are decoded upstream
//! and arrive as [`ArgumentValue::Reference`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reference to a concrete object of a concrete GraphQL type (a "global id").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceId {
    type_name: String,
    node_id: String,
}

impl ReferenceId {
    #[must_use]
    pub fn new(type_name: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            node_id: node_id.into(),
        }
    }

    /// GraphQL type name the id was issued for (e.g. `"WidgetType"`).
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Raw primary key of the referenced object.
    #[must_use]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.node_id)
    }
}

/// Error returned when parsing a `Type:id` reference fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid reference id '{0}': expected 'Type:id'")]
pub struct ParseReferenceIdError(String);

impl FromStr for ReferenceId {
    type Err = ParseReferenceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((type_name, node_id)) if !type_name.is_empty() && !node_id.is_empty() => {
                Ok(Self::new(type_name, node_id))
            }
            _ => Err(ParseReferenceIdError(s.to_owned())),
        }
    }
}

/// A single resolver argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Reference(ReferenceId),
    List(Vec<ArgumentValue>),
    Object(Arguments),
}

impl ArgumentValue {
    #[must_use]
    pub fn reference(type_name: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self::Reference(ReferenceId::new(type_name, node_id))
    }

    #[must_use]
    pub fn as_reference(&self) -> Option<&ReferenceId> {
        match self {
            Self::Reference(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Arguments> {
        match self {
            Self::Object(args) => Some(args),
            _ => None,
        }
    }
}

impl From<ReferenceId> for ArgumentValue {
    fn from(id: ReferenceId) -> Self {
        Self::Reference(id)
    }
}

impl From<Arguments> for ArgumentValue {
    fn from(args: Arguments) -> Self {
        Self::Object(args)
    }
}

impl From<Vec<ArgumentValue>> for ArgumentValue {
    fn from(items: Vec<ArgumentValue>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for ArgumentValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for ArgumentValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ArgumentValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for ArgumentValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Named resolver arguments, kept in the order the engine supplied them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(String, ArgumentValue)>,
}

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an argument. A replaced argument keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &ArgumentValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<ArgumentValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}
