//! Helpers for the pre-palette layouts: numeric block ids with 4-bit data
//! nibbles, the optional "Add" high-nibble extension, and the flat layout's
//! storage-order permutation.

use crate::block::BlockState;
use crate::id::NamespacedId;
use crate::registry::LegacyIdResolver;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed height of the oldest family.
pub const LEGACY_HEIGHT: i32 = 128;

/// Reads the 4-bit value for `index` from a nibble-packed array: low nibble
/// at even indices, high at odd. Callers validate that `data` covers
/// `index / 2`.
pub fn nibble(data: &[i8], index: usize) -> u8 {
    let byte = data[index / 2] as u8;
    if index % 2 == 0 {
        byte & 0x0f
    } else {
        byte >> 4
    }
}

/// Merges an "Add" array into base ids: each byte extends two consecutive
/// ids by a 4-bit high part, low nibble for the even index.
pub fn apply_add(ids: &mut [u16], add: &[i8]) {
    for (i, &byte) in add.iter().enumerate() {
        let byte = byte as u8;
        if let Some(id) = ids.get_mut(2 * i) {
            *id += u16::from(byte & 0x0f) << 8;
        }
        if let Some(id) = ids.get_mut(2 * i + 1) {
            *id += u16::from(byte >> 4) << 8;
        }
    }
}

/// Disk index of the flat legacy layout. Y runs fastest on disk, so this is
/// the permutation the decoder walks to land blocks at
/// `x + z*16 + y*256`.
pub fn flat_disk_index(x: i32, y: i32, z: i32) -> usize {
    (y + z * LEGACY_HEIGHT + x * LEGACY_HEIGHT * 16) as usize
}

/// Turns legacy numeric ids into the namespaced model through an external
/// resolver, consulting it once per distinct input.
///
/// The memoized block states are shared allocations, so a column of mostly
/// identical blocks stores one `BlockState` many times over.
pub struct LegacyConverter<'a> {
    resolver: &'a dyn LegacyIdResolver,
    blocks: HashMap<(u16, u8), Arc<BlockState>>,
    biomes: HashMap<i32, NamespacedId>,
}

impl<'a> LegacyConverter<'a> {
    pub fn new(resolver: &'a dyn LegacyIdResolver) -> Self {
        LegacyConverter {
            resolver,
            blocks: HashMap::new(),
            biomes: HashMap::new(),
        }
    }

    pub fn block(&mut self, id: u16, data: u8) -> Arc<BlockState> {
        let resolver = self.resolver;
        self.blocks
            .entry((id, data))
            .or_insert_with(|| Arc::new(resolver.block(id, data)))
            .clone()
    }

    pub fn biome(&mut self, id: i32) -> NamespacedId {
        let resolver = self.resolver;
        self.biomes
            .entry(id)
            .or_insert_with(|| resolver.biome(id))
            .clone()
    }
}
