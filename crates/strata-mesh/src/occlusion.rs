//! Per-face visibility rules.

use crate::direction::Direction;
use strata_world::{BlockRegistry, BlockState, Occlusion, WorldView};

/// Whether the `side` face of `block` must be drawn, judged against the
/// single voxel behind that face.
///
/// `None` means there is no neighbor at all (world or selection edge, or a
/// column nobody decoded): the edge option decides. Air always lets faces
/// through. Everything else is the neighbor's occlusion class, with the
/// transparent rule suppressing internal faces between two voxels of the
/// same type.
pub fn draw_side(
    block: &BlockState,
    side: Direction,
    neighbor: Option<&BlockState>,
    registry: &dyn BlockRegistry,
    render_edge_faces: bool,
) -> bool {
    let neighbor = match neighbor {
        None => return render_edge_faces,
        Some(neighbor) => neighbor,
    };
    if neighbor.id.is_air_family() {
        return true;
    }
    match registry.occlusion(neighbor) {
        Occlusion::Full => false,
        Occlusion::None => true,
        Occlusion::Transparent => neighbor.id != block.id,
        Occlusion::Bottom => side != Direction::Up,
    }
}

/// Visibility for all six faces of the voxel at (x, y, z), in
/// [`Direction::ALL`] order.
///
/// Neighbor coordinates beyond the view's declared bounds are not looked
/// up; they get the no-neighbor edge rule directly.
pub fn draw_sides(
    view: &dyn WorldView,
    block: &BlockState,
    x: i32,
    y: i32,
    z: i32,
    registry: &dyn BlockRegistry,
    render_edge_faces: bool,
) -> [bool; 6] {
    let bounds = view.bounds();
    let mut visible = [false; 6];
    for (i, dir) in Direction::ALL.iter().enumerate() {
        let (dx, dy, dz) = dir.offset();
        let (nx, ny, nz) = (x + dx, y + dy, z + dz);
        let neighbor = if bounds.contains(nx, ny, nz) {
            view.block_at(nx, ny, nz)
        } else {
            None
        };
        visible[i] = draw_side(block, *dir, neighbor.as_deref(), registry, render_edge_faces);
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_world::NamespacedId;

    struct RuleRegistry;

    impl BlockRegistry for RuleRegistry {
        fn occlusion(&self, state: &BlockState) -> Occlusion {
            match state.id.path() {
                "glass" | "water" => Occlusion::Transparent,
                "torch" => Occlusion::None,
                "snow" => Occlusion::Bottom,
                _ => Occlusion::Full,
            }
        }

        fn materials(&self, state: &BlockState, _biome: &NamespacedId) -> Vec<NamespacedId> {
            vec![state.id.clone()]
        }
    }

    fn state(path: &str) -> BlockState {
        BlockState::new(NamespacedId::minecraft(path))
    }

    #[test]
    fn full_neighbor_hides_every_side() {
        let stone = state("stone");
        let dirt = state("dirt");
        for dir in Direction::ALL {
            assert!(!draw_side(&stone, dir, Some(&dirt), &RuleRegistry, true));
        }
    }

    #[test]
    fn none_and_air_neighbors_hide_nothing() {
        let stone = state("stone");
        let torch = state("torch");
        let air = state("air");
        let cave_air = state("cave_air");
        for dir in Direction::ALL {
            assert!(draw_side(&stone, dir, Some(&torch), &RuleRegistry, false));
            assert!(draw_side(&stone, dir, Some(&air), &RuleRegistry, false));
            assert!(draw_side(&stone, dir, Some(&cave_air), &RuleRegistry, false));
        }
    }

    #[test]
    fn transparent_neighbor_culls_only_its_own_type() {
        let glass = state("glass");
        let water = state("water");
        assert!(!draw_side(
            &glass,
            Direction::East,
            Some(&glass),
            &RuleRegistry,
            false
        ));
        assert!(draw_side(
            &water,
            Direction::East,
            Some(&glass),
            &RuleRegistry,
            false
        ));
    }

    #[test]
    fn bottom_neighbor_hides_only_the_upward_face() {
        let stone = state("stone");
        let snow = state("snow");
        for dir in Direction::ALL {
            let expected = dir != Direction::Up;
            assert_eq!(
                draw_side(&stone, dir, Some(&snow), &RuleRegistry, false),
                expected,
                "{:?}",
                dir
            );
        }
    }

    #[test]
    fn missing_neighbor_follows_the_edge_option() {
        let stone = state("stone");
        assert!(draw_side(&stone, Direction::Up, None, &RuleRegistry, true));
        assert!(!draw_side(&stone, Direction::Up, None, &RuleRegistry, false));
    }

    struct SoloBlock {
        bounds: strata_world::ViewBounds,
        stone: Arc<BlockState>,
    }

    impl WorldView for SoloBlock {
        fn bounds(&self) -> strata_world::ViewBounds {
            self.bounds
        }

        fn block_at(&self, x: i32, y: i32, z: i32) -> Option<Arc<BlockState>> {
            if (x, y, z) == (0, 0, 0) {
                Some(self.stone.clone())
            } else {
                None
            }
        }

        fn biome_at(&self, _x: i32, _y: i32, _z: i32) -> Option<NamespacedId> {
            Some(NamespacedId::plains())
        }
    }

    #[test]
    fn sides_at_the_view_edge_use_the_edge_rule() {
        use strata_world::{ChunkPos, ViewBounds};
        let view = SoloBlock {
            bounds: ViewBounds::of_chunks(ChunkPos::new(0, 0), ChunkPos::new(0, 0), 0, 16),
            stone: Arc::new(state("stone")),
        };
        let stone = state("stone");

        // The down face sits on the view floor; all other neighbors are
        // absent but in bounds.
        let with_edges = draw_sides(&view, &stone, 0, 0, 0, &RuleRegistry, true);
        assert_eq!(with_edges, [true; 6]);
        let without_edges = draw_sides(&view, &stone, 0, 0, 0, &RuleRegistry, false);
        assert_eq!(
            without_edges,
            [false; 6],
            "absent neighbors and the floor both fall back to the edge option"
        );
    }
}
