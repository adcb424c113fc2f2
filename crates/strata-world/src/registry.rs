//! Trait seams for the collaborators the decoder and mesher consult but do
//! not own: block-type facts and legacy numeric-id translation.

use crate::block::BlockState;
use crate::id::NamespacedId;

/// How a block type hides the faces of blocks adjoining it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occlusion {
    /// Occupies its whole cell; neighbors' touching faces are hidden.
    Full,
    /// Hides nothing.
    None,
    /// Hides faces only between two blocks of the same type (glass panes,
    /// water bodies).
    Transparent,
    /// Sits on its cell floor; hides only the face below it.
    Bottom,
}

/// Block-type facts owned by the caller's registry. Unknown ids are the
/// registry's problem; the decode/mesh layers pass them through untouched.
pub trait BlockRegistry: Sync {
    fn occlusion(&self, state: &BlockState) -> Occlusion;

    /// Material ids for a block in a biome, in shorthand form: 1, 2, 3 or 6
    /// entries (see the mesh layer's expansion rules).
    fn materials(&self, state: &BlockState, biome: &NamespacedId) -> Vec<NamespacedId>;

    /// Whether this block type is waterlogged by nature (seagrass, kelp);
    /// the decoder then pins the `waterlogged` property to "true" when the
    /// save omits it.
    fn acts_waterlogged(&self, _id: &NamespacedId) -> bool {
        false
    }
}

/// Translates the numeric ids of the pre-palette eras.
pub trait LegacyIdResolver: Sync {
    /// Maps a reconstructed numeric id (0..=4095) plus its 4-bit data value
    /// to a block state. Fallback for unknown ids is the implementation's
    /// choice; this layer does not validate.
    fn block(&self, id: u16, data: u8) -> BlockState;

    fn biome(&self, id: i32) -> NamespacedId;
}
