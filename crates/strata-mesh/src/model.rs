use crate::boxmesh;
use crate::geom::Transform;
use crate::occlusion;
use crate::options::MeshOptions;
use crate::sink::FaceSink;
use std::collections::HashMap;
use std::sync::Arc;
use strata_world::{BlockRegistry, BlockState, NamespacedId, WorldView};
use vek::Vec3;

/// Everything a block model may consult while emitting one voxel.
pub struct VoxelContext<'a> {
    pub view: &'a dyn WorldView,
    pub registry: &'a dyn BlockRegistry,
    pub options: &'a MeshOptions,
    /// World coordinates of the voxel being meshed.
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub block: &'a BlockState,
    pub biome: NamespacedId,
}

/// Emits the geometry for one block type.
///
/// One method: given the voxel, its surroundings, and a placement, append
/// faces to the sink. Implementations are shared across meshing workers.
pub trait BlockModel: Send + Sync {
    fn mesh(&self, ctx: &VoxelContext<'_>, transform: Option<&Transform>, sink: &mut dyn FaceSink);
}

/// The default model: a unit cube spanning `[x, x+1) x [y, y+1) x [z, z+1)`
/// with per-side occlusion culling and registry-supplied materials.
pub struct CubeModel;

impl BlockModel for CubeModel {
    fn mesh(&self, ctx: &VoxelContext<'_>, transform: Option<&Transform>, sink: &mut dyn FaceSink) {
        let visible = occlusion::draw_sides(
            ctx.view,
            ctx.block,
            ctx.x,
            ctx.y,
            ctx.z,
            ctx.registry,
            ctx.options.render_edge_faces,
        );
        if visible == [false; 6] {
            return;
        }
        let materials = ctx.registry.materials(ctx.block, &ctx.biome);
        let materials = match boxmesh::expand_materials(&materials) {
            Some(materials) => materials,
            None => return,
        };
        let corner0 = Vec3::new(f64::from(ctx.x), f64::from(ctx.y), f64::from(ctx.z));
        boxmesh::add_box(
            sink,
            corner0,
            corner0 + 1.0,
            transform,
            &materials,
            None,
            Some(&visible),
        );
    }
}

/// Block type to model lookup with a shared fallback for unlisted types.
pub struct ModelRegistry {
    models: HashMap<NamespacedId, Arc<dyn BlockModel>>,
    fallback: Arc<dyn BlockModel>,
}

impl ModelRegistry {
    /// An empty registry: every block meshes as a plain cube.
    pub fn new() -> Self {
        ModelRegistry {
            models: HashMap::new(),
            fallback: Arc::new(CubeModel),
        }
    }

    pub fn insert(&mut self, id: NamespacedId, model: Arc<dyn BlockModel>) {
        self.models.insert(id, model);
    }

    pub fn model_for(&self, id: &NamespacedId) -> &dyn BlockModel {
        match self.models.get(id) {
            Some(model) => model.as_ref(),
            None => self.fallback.as_ref(),
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
