use indexmap::{map, IndexMap};
use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{LuaString, Value};

/// String-keyed mapping produced by a decoded `T` record.
///
/// Keys are unique; inserting an existing key replaces its value and keeps
/// its original position, so a later duplicate wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    entries: IndexMap<LuaString, Value>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key.as_bytes())
    }

    pub fn get_bytes(&self, key: &[u8]) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key.as_bytes())
    }

    /// Returns the replaced value when `key` was already present.
    pub fn insert(&mut self, key: impl Into<LuaString>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Moves every entry of `other` into `self`; entries of `other` win.
    pub fn merge(&mut self, other: Table) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> map::Iter<'_, LuaString, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> map::Keys<'_, LuaString, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> map::Values<'_, LuaString, Value> {
        self.entries.values()
    }

    /// Collapses nested tables into one level of `outer.inner` keys.
    ///
    /// Leaves keep their position in a depth-first walk; empty nested tables
    /// contribute no keys.
    pub fn flatten(&self) -> Table {
        let mut flat = Table::new();
        let mut stack = vec![(LuaString::new(), self.entries.iter())];
        while let Some((prefix, entries)) = stack.last_mut() {
            let Some((key, value)) = entries.next() else {
                stack.pop();
                continue;
            };
            let path = join_path(prefix, key);
            match value {
                Value::Table(nested) => stack.push((path, nested.entries.iter())),
                leaf => {
                    flat.insert(path, leaf.clone());
                }
            }
        }
        flat
    }
}

fn join_path(prefix: &LuaString, key: &LuaString) -> LuaString {
    if prefix.is_empty() {
        return key.clone();
    }
    let mut path = Vec::with_capacity(prefix.len() + 1 + key.len());
    path.extend_from_slice(prefix.as_bytes());
    path.push(b'.');
    path.extend_from_slice(key.as_bytes());
    LuaString::from(path)
}

impl IntoIterator for Table {
    type Item = (LuaString, Value);
    type IntoIter = map::IntoIter<LuaString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a LuaString, &'a Value);
    type IntoIter = map::Iter<'a, LuaString, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<LuaString>> FromIterator<(K, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
