//! The binding store.

use serde::Serialize;
use smallstep_types::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Mutable mapping from variable names to their current value.
///
/// Only values are stored, so a lookup always yields a normal form.
/// Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Heap {
    bindings: BTreeMap<String, Value>,
}

impl Heap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a heap pre-populated with initial bindings.
    pub fn with_bindings<I, K>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        bindings.into_iter().map(|(k, v)| (k.into(), v)).collect()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bind `name` to `value`, creating the binding if it does not exist.
    /// Returns the previous value, if any.
    pub fn assign(&mut self, name: &str, value: Value) -> Option<Value> {
        self.bindings.insert(name.to_string(), value)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.bindings.iter()
    }
}

impl FromIterator<(String, Value)> for Heap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Heap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_creates_then_overwrites() {
        let mut heap = Heap::new();
        assert_eq!(heap.assign("x", Value::Int(1)), None);
        assert_eq!(heap.assign("x", Value::Bool(true)), Some(Value::Int(1)));
        assert_eq!(heap.get("x"), Some(Value::Bool(true)));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn with_bindings_iterates_in_name_order() {
        let heap = Heap::with_bindings([("b", Value::Int(31)), ("a", Value::Int(12))]);
        let names: Vec<&str> = heap.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(heap.get("a"), Some(Value::Int(12)));
        assert!(!heap.contains("c"));
    }
}
