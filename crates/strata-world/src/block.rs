use crate::id::NamespacedId;
use std::collections::BTreeMap;
use std::fmt;

/// A block type plus its state properties, e.g.
/// `minecraft:oak_log[axis=y]`.
///
/// Properties are kept in an ordered map so two states with the same
/// content compare and hash identically; registries use `BlockState` as a
/// lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
    pub id: NamespacedId,
    pub properties: BTreeMap<String, String>,
}

impl BlockState {
    pub fn new(id: NamespacedId) -> Self {
        BlockState {
            id,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_properties<K, V, I>(id: NamespacedId, properties: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        BlockState {
            id,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (name, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", name, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
