use crate::block::BlockState;
use crate::id::NamespacedId;
use std::fmt;
use std::sync::Arc;
use strata_nbt::Tag;

/// Position of a column in chunk coordinates (world block coordinate / 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        ChunkPos { x, z }
    }

    /// The chunk containing the given world block coordinates.
    pub fn of_block(block_x: i32, block_z: i32) -> Self {
        ChunkPos {
            x: block_x.div_euclid(16),
            z: block_z.div_euclid(16),
        }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// One decoded 16x16x(y_max - y_min) column.
///
/// Blocks are optional (absent means no data was stored there); biomes always
/// hold a value and start out as plains. Entity and tile-entity records are
/// carried along as raw tag compounds for downstream consumers.
#[derive(Debug)]
pub struct VoxelColumn {
    y_min: i32,
    y_max: i32,
    blocks: Vec<Option<Arc<BlockState>>>,
    biomes: Vec<NamespacedId>,
    pub entities: Vec<Tag>,
    pub tile_entities: Vec<Tag>,
}

impl VoxelColumn {
    pub fn new(y_min: i32, y_max: i32) -> Self {
        assert!(y_min <= y_max, "inverted vertical bounds");
        let len = 16 * 16 * (y_max - y_min) as usize;
        VoxelColumn {
            y_min,
            y_max,
            blocks: vec![None; len],
            biomes: vec![NamespacedId::plains(); len],
            entities: Vec::new(),
            tile_entities: Vec::new(),
        }
    }

    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    pub fn y_max(&self) -> i32 {
        self.y_max
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Voxel index for x + z*16 + (y - y_min)*256.
    ///
    /// Horizontal coordinates outside [0,16) are a caller bug and panic;
    /// vertical coordinates outside the column's bounds yield `None`.
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        assert!(
            (0..16).contains(&x) && (0..16).contains(&z),
            "relative chunk coordinate out of range: ({}, {})",
            x,
            z
        );
        if y < self.y_min || y >= self.y_max {
            return None;
        }
        Some((x + z * 16 + (y - self.y_min) * 256) as usize)
    }

    pub fn block(&self, x: i32, y: i32, z: i32) -> Option<&BlockState> {
        self.blocks[self.index(x, y, z)?].as_deref()
    }

    /// Like [`block`](Self::block) but hands out the shared allocation, for
    /// views that answer lookups across threads.
    pub fn block_shared(&self, x: i32, y: i32, z: i32) -> Option<Arc<BlockState>> {
        self.blocks[self.index(x, y, z)?].clone()
    }

    pub fn biome(&self, x: i32, y: i32, z: i32) -> Option<&NamespacedId> {
        Some(&self.biomes[self.index(x, y, z)?])
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, state: Arc<BlockState>) {
        if let Some(i) = self.index(x, y, z) {
            self.blocks[i] = Some(state);
        }
    }

    pub fn set_biome(&mut self, x: i32, y: i32, z: i32, biome: NamespacedId) {
        if let Some(i) = self.index(x, y, z) {
            self.biomes[i] = biome;
        }
    }

    pub(crate) fn set_block_raw(&mut self, index: usize, state: Arc<BlockState>) {
        self.blocks[index] = Some(state);
    }

    pub(crate) fn set_biome_raw(&mut self, index: usize, biome: NamespacedId) {
        self.biomes[index] = biome;
    }
}
