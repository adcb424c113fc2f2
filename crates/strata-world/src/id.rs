use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

static PLAINS: Lazy<NamespacedId> = Lazy::new(|| NamespacedId::minecraft("plains"));
static AIR: Lazy<NamespacedId> = Lazy::new(|| NamespacedId::minecraft("air"));

/// A `namespace:path` identifier for a block or biome type.
///
/// Backed by shared string storage: cloning is two reference bumps, which
/// matters because a column stores one biome id per voxel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedId {
    namespace: Arc<str>,
    path: Arc<str>,
}

impl NamespacedId {
    pub fn new(namespace: &str, path: &str) -> Self {
        NamespacedId {
            namespace: Arc::from(namespace),
            path: Arc::from(path),
        }
    }

    pub fn minecraft(path: &str) -> Self {
        NamespacedId::new("minecraft", path)
    }

    /// Parses `namespace:path`; a string without a colon gets the
    /// `minecraft` namespace.
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((namespace, path)) => NamespacedId::new(namespace, path),
            None => NamespacedId::minecraft(s),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// True for `air`, `cave_air`, `void_air` and any other id whose path
    /// ends in "air". Air never occludes and is never meshed.
    pub fn is_air_family(&self) -> bool {
        self.path.ends_with("air")
    }

    /// The default biome a column is filled with before decoding.
    pub fn plains() -> Self {
        PLAINS.clone()
    }

    pub fn air() -> Self {
        AIR.clone()
    }
}

impl fmt::Display for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}
