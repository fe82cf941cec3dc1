//! Variable data model shared by the walker, codec, and perturbation engine

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A variable value as stored on the panel
///
/// Untagged so snapshots keep the native JSON typing: numbers stay numeric,
/// booleans stay `true`/`false` literals, strings stay quoted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Kind name for log and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// One discovered panel variable
///
/// `node_id` is only stable for the lifetime of the session that produced it.
/// Unknown extra fields on a snapshot record are ignored when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub node_id: String,
    pub value: Value,
}

/// An ordered sequence of variables in discovery (pre-order) order
///
/// Immutable once produced: the codec and the perturbation engine build new
/// sets rather than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableSet(Vec<Variable>);

impl VariableSet {
    pub fn new(variables: Vec<Variable>) -> Self {
        Self(variables)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.0.iter()
    }

    /// Look up a variable by name
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.0.iter().find(|v| v.name == name)
    }
}

impl IntoIterator for VariableSet {
    type Item = Variable;
    type IntoIter = std::vec::IntoIter<Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Variable> for VariableSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Variable names skipped by the perturbation engine (and optionally by
/// traversal): diagnostic and system tags, not physical process values
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet(HashSet<String>);

/// Diagnostic/system tags excluded on every panel
const DEFAULT_EXCLUDED_TAGS: &[&str] = &["@DiagnosticsIndicatorTag", "Tag_ScreenNumber"];

impl ExclusionSet {
    /// Empty set (nothing excluded)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The compiled-in diagnostic/system tag set
    pub fn default_tags() -> Self {
        DEFAULT_EXCLUDED_TAGS.iter().copied().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
