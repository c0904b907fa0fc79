//! One-or-many lookup results

use serde::Serialize;

/// Result of a lookup that yields either a single entity or an ordered run of them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Lookup<T> {
    pub fn len(&self) -> usize {
        match self {
            Lookup::One(_) => 1,
            Lookup::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single entity, if this is a one-entity result
    pub fn as_one(&self) -> Option<&T> {
        match self {
            Lookup::One(item) => Some(item),
            Lookup::Many(_) => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Lookup::One(item) => std::slice::from_ref(item).iter(),
            Lookup::Many(items) => items.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Lookup::One(item) => vec![item],
            Lookup::Many(items) => items,
        }
    }
}

impl<T> IntoIterator for Lookup<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
