use crate::block::BlockState;
use crate::column::{ChunkPos, VoxelColumn};
use crate::id::NamespacedId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// World-space extent a view answers lookups for, in block coordinates,
/// max-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl ViewBounds {
    /// Bounds covering an inclusive rectangle of chunks over a vertical
    /// range.
    pub fn of_chunks(min: ChunkPos, max: ChunkPos, min_y: i32, max_y: i32) -> Self {
        ViewBounds {
            min_x: min.x * 16,
            max_x: (max.x + 1) * 16,
            min_y,
            max_y,
            min_z: min.z * 16,
            max_z: (max.z + 1) * 16,
        }
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        (self.min_x..self.max_x).contains(&x)
            && (self.min_y..self.max_y).contains(&y)
            && (self.min_z..self.max_z).contains(&z)
    }
}

/// Read-only voxel lookups across one or more decoded columns.
///
/// Meshing reads both the voxel being meshed and its neighbors through this
/// trait, so cross-column face culling and single-column meshing share one
/// code path. Lookups outside [`bounds`](Self::bounds), in columns nobody
/// has decoded yet, or at voxels with no data all answer `None`, the
/// caller-facing "treat as absent" result. Implementations must tolerate
/// concurrent readers.
pub trait WorldView: Sync {
    fn bounds(&self) -> ViewBounds;

    fn block_at(&self, x: i32, y: i32, z: i32) -> Option<Arc<BlockState>>;

    fn biome_at(&self, x: i32, y: i32, z: i32) -> Option<NamespacedId>;
}

/// A [`WorldView`] over decoded columns keyed by chunk position.
///
/// Bounds are fixed at construction (the caller's region of interest);
/// columns arrive incrementally as workers finish decoding them.
pub struct ColumnSet {
    bounds: ViewBounds,
    columns: RwLock<HashMap<ChunkPos, Arc<VoxelColumn>>>,
}

impl ColumnSet {
    pub fn new(bounds: ViewBounds) -> Self {
        ColumnSet {
            bounds,
            columns: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, pos: ChunkPos, column: Arc<VoxelColumn>) {
        self.columns.write().unwrap().insert(pos, column);
    }

    pub fn remove(&self, pos: ChunkPos) -> Option<Arc<VoxelColumn>> {
        self.columns.write().unwrap().remove(&pos)
    }

    pub fn get(&self, pos: ChunkPos) -> Option<Arc<VoxelColumn>> {
        self.columns.read().unwrap().get(&pos).cloned()
    }

    pub fn len(&self) -> usize {
        self.columns.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.read().unwrap().is_empty()
    }
}

impl WorldView for ColumnSet {
    fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    fn block_at(&self, x: i32, y: i32, z: i32) -> Option<Arc<BlockState>> {
        if !self.bounds.contains(x, y, z) {
            return None;
        }
        let columns = self.columns.read().unwrap();
        let column = columns.get(&ChunkPos::of_block(x, z))?;
        column.block_shared(x.rem_euclid(16), y, z.rem_euclid(16))
    }

    fn biome_at(&self, x: i32, y: i32, z: i32) -> Option<NamespacedId> {
        if !self.bounds.contains(x, y, z) {
            return None;
        }
        let columns = self.columns.read().unwrap();
        let column = columns.get(&ChunkPos::of_block(x, z))?;
        column
            .biome(x.rem_euclid(16), y, z.rem_euclid(16))
            .cloned()
    }
}
