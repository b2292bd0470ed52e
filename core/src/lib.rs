#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use controller::*;
pub use error::*;
pub use generator::*;
pub use registry::*;
pub use report::*;
pub use reveal::*;
pub use session::*;
pub use tile::*;
pub use trust::*;
pub use types::*;

mod controller;
mod error;
mod generator;
mod registry;
mod report;
mod reveal;
mod session;
mod tile;
mod trust;
mod types;

/// Validated dimensions and mine count of a single game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const MIN_SIDE: Coord = 5;
    pub const MAX_SIDE: Coord = 50;
    /// Cells that can never hold a mine: the four corners and the first click.
    pub const RESERVED_CELLS: CellCount = 5;

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates the board sides and resolves the mine count, falling back to
    /// [`Self::default_mines`] when `mines` is absent or zero.
    pub fn new(size: Coord2, mines: Option<CellCount>) -> Result<Self> {
        let side_range = Self::MIN_SIDE..=Self::MAX_SIDE;
        if !side_range.contains(&size.0) || !side_range.contains(&size.1) {
            return Err(GameError::InvalidSize);
        }

        let mines = match mines {
            Some(mines) if mines > 0 => mines,
            _ => Self::default_mines(size),
        };
        if mines > mult(size.0, size.1).saturating_sub(Self::RESERVED_CELLS) {
            return Err(GameError::TooManyMines);
        }

        Ok(Self::new_unchecked(size, mines))
    }

    /// 15% of the board, rounded half up.
    pub const fn default_mines(size: Coord2) -> CellCount {
        let cells = mult(size.0, size.1) as u32;
        ((cells * 15 + 50) / 100) as CellCount
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Mine layout of one game. Created once and only queried afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_mask: Array2<bool>,
    size: Coord2,
    mine_count: CellCount,
}

impl Board {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (dim_x, dim_y) = mine_mask.dim();
        let size = (
            Coord::try_from(dim_x).map_err(|_| GameError::InvalidBoardShape)?,
            Coord::try_from(dim_y).map_err(|_| GameError::InvalidBoardShape)?,
        );
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            size,
            mine_count,
        })
    }

    pub(crate) fn from_generated(mine_mask: Array2<bool>, size: Coord2, mine_count: CellCount) -> Self {
        Self {
            mine_mask,
            size,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Signed lookup; anything outside the board is not a mine.
    pub fn is_mine(&self, x: i32, y: i32) -> bool {
        match (Coord::try_from(x), Coord::try_from(y)) {
            (Ok(x), Ok(y)) if x < self.size.0 && y < self.size.1 => self[(x, y)],
            _ => false,
        }
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines in the 8-connected neighborhood, clipped at the board edge.
    pub fn neighbor_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// Every mine, in column-major order.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        let (x_end, y_end) = self.size;
        (0..x_end)
            .flat_map(|x| (0..y_end).map(move |y| (x, y)))
            .filter(|&coords| self[coords])
            .collect()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }
}

impl Index<Coord2> for Board {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mine_count_rounds_half_up() {
        assert_eq!(BoardConfig::default_mines((10, 10)), 15);
        assert_eq!(BoardConfig::default_mines((5, 5)), 4);
        assert_eq!(BoardConfig::default_mines((5, 6)), 5);
        assert_eq!(BoardConfig::default_mines((50, 50)), 375);
    }

    #[test]
    fn config_validates_sides_and_mines() {
        assert_eq!(BoardConfig::new((4, 10), None), Err(GameError::InvalidSize));
        assert_eq!(BoardConfig::new((10, 51), None), Err(GameError::InvalidSize));
        assert_eq!(
            BoardConfig::new((5, 5), Some(21)),
            Err(GameError::TooManyMines)
        );

        let config = BoardConfig::new((5, 5), Some(20)).unwrap();
        assert_eq!(config.safe_cells(), 5);

        let config = BoardConfig::new((8, 6), Some(0)).unwrap();
        assert_eq!(config.mines, 7);
    }

    #[test]
    fn board_queries() {
        let board = Board::from_mine_coords((5, 5), &[(2, 2), (3, 2)]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 23);
        assert!(board.is_mine(2, 2));
        assert!(!board.is_mine(-1, 2));
        assert!(!board.is_mine(2, 5));
        assert_eq!(board.neighbor_mine_count((2, 1)), 2);
        assert_eq!(board.neighbor_mine_count((4, 4)), 0);
        assert_eq!(board.neighbor_mine_count((4, 2)), 1);
        assert_eq!(board.mine_coords(), [(2, 2), (3, 2)]);
    }

    #[test]
    fn board_rejects_out_of_range_mines() {
        assert_eq!(
            Board::from_mine_coords((5, 5), &[(5, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
