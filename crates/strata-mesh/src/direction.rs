/// The six axis directions, in the fixed order faces are evaluated and
/// emitted: up, north (-z), south (+z), west (-x), east (+x), down.
///
/// The discriminants double as indices into the per-side arrays
/// (`materials[6]`, `visible[6]`, `uvs[6]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    North,
    South,
    West,
    East,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::Down,
    ];

    /// Unit offset to the neighbor voxel this face looks at.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
            Direction::Down => (0, -1, 0),
        }
    }
}
