use std::sync::Arc;
use strata_world::{
    BlockRegistry, BlockState, ChunkPos, ColumnSet, NamespacedId, Occlusion, ViewBounds,
    VoxelColumn,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Occlusion classes and material palettes by block path, enough to
/// exercise every culling rule and every expansion shape.
pub struct TestRegistry;

impl BlockRegistry for TestRegistry {
    fn occlusion(&self, state: &BlockState) -> Occlusion {
        match state.id.path() {
            "glass" | "water" => Occlusion::Transparent,
            "torch" => Occlusion::None,
            "snow" => Occlusion::Bottom,
            _ => Occlusion::Full,
        }
    }

    fn materials(&self, state: &BlockState, _biome: &NamespacedId) -> Vec<NamespacedId> {
        match state.id.path() {
            "grass_block" => vec![
                NamespacedId::minecraft("grass_top"),
                NamespacedId::minecraft("grass_side"),
                NamespacedId::minecraft("dirt"),
            ],
            "oak_log" => vec![
                NamespacedId::minecraft("oak_log_top"),
                NamespacedId::minecraft("oak_log_side"),
            ],
            _ => vec![state.id.clone()],
        }
    }
}

/// A view over the inclusive chunk rectangle with the given columns
/// already decoded into it.
pub fn view_over(
    min: ChunkPos,
    max: ChunkPos,
    min_y: i32,
    max_y: i32,
    columns: Vec<(ChunkPos, VoxelColumn)>,
) -> ColumnSet {
    let set = ColumnSet::new(ViewBounds::of_chunks(min, max, min_y, max_y));
    for (pos, column) in columns {
        set.insert(pos, Arc::new(column));
    }
    set
}

pub fn place(column: &mut VoxelColumn, x: i32, y: i32, z: i32, path: &str) {
    column.set_block(x, y, z, Arc::new(BlockState::new(NamespacedId::minecraft(path))));
}
