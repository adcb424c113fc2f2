//! Normalized voxel-column model and the versioned chunk decoder.
//!
//! Save files have gone through several incompatible on-disk layouts. The
//! decoder in this crate takes one column's parsed tag tree (see
//! `strata-nbt`), works out which layout generation (its [`Era`]) it belongs
//! to, and produces a uniform [`VoxelColumn`]: dense block states and biomes
//! over the column's vertical range, plus its entity and tile-entity records.
//!
//! External concerns stay behind traits: translating legacy numeric ids is a
//! [`LegacyIdResolver`], block-type facts (occlusion, materials) are a
//! [`BlockRegistry`], and cross-column lookups during meshing go through a
//! [`WorldView`].

mod block;
mod cancel;
mod column;
mod decode;
mod error;
mod id;
mod legacy;
mod palette;
mod registry;
mod view;

pub use block::BlockState;
pub use cancel::{CancelToken, Cancelled};
pub use column::{ChunkPos, VoxelColumn};
pub use decode::{ChunkSource, DecodeContext, Era, WorldFamily};
pub use error::{DecodeError, Result};
pub use id::NamespacedId;
pub use legacy::LegacyConverter;
pub use palette::{
    biome_palette_bits, bits_for, block_palette_bits, pack, unpack, BitAddressing, UnpackError,
};
pub use registry::{BlockRegistry, LegacyIdResolver, Occlusion};
pub use view::{ColumnSet, ViewBounds, WorldView};
