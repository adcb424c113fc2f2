use crate::geom::Transform;
use crate::model::{ModelRegistry, VoxelContext};
use crate::options::MeshOptions;
use crate::sink::FaceSink;
use log::debug;
use strata_world::{BlockRegistry, CancelToken, Cancelled, ChunkPos, NamespacedId, WorldView};

/// Walks decoded voxels one column at a time and hands each to its block
/// model.
///
/// The mesher holds no per-call state; neighbor reads go through the
/// shared view, so workers can mesh different columns concurrently against
/// the same `Mesher`.
pub struct Mesher<'a> {
    view: &'a dyn WorldView,
    registry: &'a dyn BlockRegistry,
    models: &'a ModelRegistry,
    options: MeshOptions,
}

impl<'a> Mesher<'a> {
    pub fn new(
        view: &'a dyn WorldView,
        registry: &'a dyn BlockRegistry,
        models: &'a ModelRegistry,
        options: MeshOptions,
    ) -> Self {
        Mesher {
            view,
            registry,
            models,
            options,
        }
    }

    /// Meshes every stored voxel of the column at `pos` over the view's
    /// vertical range. Air-family voxels and voxels with no data produce
    /// no geometry. Cancellation is honored once per vertical (x, z) run;
    /// on cancellation the sink keeps the faces emitted so far and the
    /// shared view is untouched.
    pub fn mesh_chunk(
        &self,
        pos: ChunkPos,
        transform: Option<&Transform>,
        sink: &mut dyn FaceSink,
        cancel: &CancelToken,
    ) -> Result<(), Cancelled> {
        let bounds = self.view.bounds();
        let x0 = pos.x * 16;
        let z0 = pos.z * 16;
        let mut visited = 0usize;

        for z in z0..z0 + 16 {
            for x in x0..x0 + 16 {
                cancel.check()?;
                for y in bounds.min_y..bounds.max_y {
                    let block = match self.view.block_at(x, y, z) {
                        Some(block) => block,
                        None => continue,
                    };
                    if block.id.is_air_family() {
                        continue;
                    }
                    let biome = self
                        .view
                        .biome_at(x, y, z)
                        .unwrap_or_else(NamespacedId::plains);
                    let ctx = VoxelContext {
                        view: self.view,
                        registry: self.registry,
                        options: &self.options,
                        x,
                        y,
                        z,
                        block: &block,
                        biome,
                    };
                    self.models.model_for(&block.id).mesh(&ctx, transform, sink);
                    visited += 1;
                }
            }
        }
        debug!("meshed chunk {}: {} solid voxels", pos, visited);
        Ok(())
    }
}
