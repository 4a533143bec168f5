use std::collections::HashMap;

use crate::types::Value;

/// Arguments for one statement execution.
///
/// The two shapes are an explicit tagged choice made at the call boundary;
/// the chosen variant is forwarded to the session unchanged, which owns the
/// actual binding semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// Ordered values bound by position.
    Positional(Vec<Value>),
    /// Values bound by parameter name.
    Named(HashMap<String, Value>),
}

impl Params {
    /// An empty positional argument set.
    #[must_use]
    pub fn none() -> Self {
        Self::Positional(Vec::new())
    }

    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Positional(values.into_iter().collect())
    }

    pub fn named(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self::Named(pairs.into_iter().collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Self::Positional(values)
    }
}

impl From<HashMap<String, Value>> for Params {
    fn from(map: HashMap<String, Value>) -> Self {
        Self::Named(map)
    }
}
