use serde::{Deserialize, Serialize};

/// Toggles consulted while meshing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Draw faces that look out of the meshed region, where no neighbor
    /// voxel exists to judge occlusion against. Off by default: edge walls
    /// are usually unwanted in an export.
    pub render_edge_faces: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            render_edge_faces: false,
        }
    }
}
