//! Occlusion-aware box meshing over decoded voxel columns.
//!
//! Feed [`Mesher`] a [`WorldView`](strata_world::WorldView) (usually a
//! `ColumnSet` of decoded columns) and a [`FaceSink`]; per block type a
//! [`BlockModel`] decides the geometry, with [`CubeModel`] as the
//! fallback. Faces an adjacent voxel provably hides are culled before they
//! reach the sink, so an exporter behind the sink only ever sees geometry
//! worth keeping.

mod boxmesh;
mod direction;
mod geom;
mod mesher;
mod model;
mod occlusion;
mod options;
mod sink;

pub use boxmesh::{add_box, expand_materials};
pub use direction::Direction;
pub use geom::Transform;
pub use mesher::Mesher;
pub use model::{BlockModel, CubeModel, ModelRegistry, VoxelContext};
pub use occlusion::{draw_side, draw_sides};
pub use options::MeshOptions;
pub use sink::{Face, FaceSink, MeshBuffer, UNIT_UVS};
