use serde::{Deserialize, Serialize};

use crate::Point;

/// Semantic kind of a rendered cell. The renderer decides what each one looks like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Unrevealed board cell.
    Blank,
    Mine,
    /// Cross drawn over the mine that ended the game.
    WrongFlag,
    Smile,
    Frown,
    Sunglasses,
    /// Revealed cell with its neighbor mine count, `0..=8`.
    Count(u8),
}

/// Vertical stacking of render instructions.
pub type Layer = i8;

/// Blank board and the starting face.
pub const BOARD_LAYER: Layer = -1;
/// Revealed plates, mines and the end-of-game face.
pub const BASE_LAYER: Layer = 0;
/// Count digits and the wrong-flag cross.
pub const OVERLAY_LAYER: Layer = 1;

/// Board-local position of the face decoration, one cell up-left of the origin.
pub const DECORATION_CELL: Point = Point::new(-1, -1);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    pub tile: TileKind,
    pub pos: Point,
    pub z: Layer,
}

impl RenderInstruction {
    pub const fn new(tile: TileKind, pos: Point, z: Layer) -> Self {
        Self { tile, pos, z }
    }

    /// Moves a board-local instruction onto the world grid.
    pub const fn translated(self, origin: Point) -> Option<Self> {
        match origin.checked_offset(self.pos.x, self.pos.y) {
            Some(pos) => Some(Self { pos, ..self }),
            None => None,
        }
    }
}
