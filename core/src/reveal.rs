use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The clicked cell holds a mine. Carries every mine so the whole layout can be shown.
    Mine { trigger: Coord2, mines: Vec<Coord2> },
    /// Safe cells opened by this reveal with their neighbor counts. Empty when the
    /// clicked cell was already revealed.
    Cleared(Vec<(Coord2, u8)>),
}

/// Read-only view over a board and the cells already revealed on it.
#[derive(Debug)]
pub struct RevealEngine<'a> {
    board: &'a Board,
    revealed: &'a Array2<bool>,
}

impl<'a> RevealEngine<'a> {
    pub fn new(board: &'a Board, revealed: &'a Array2<bool>) -> Result<Self> {
        let (x_end, y_end) = board.size();
        if revealed.dim() != (usize::from(x_end), usize::from(y_end)) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { board, revealed })
    }

    pub fn reveal(&self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.board.contains_mine(coords) {
            return Ok(RevealOutcome::Mine {
                trigger: coords,
                mines: self.board.mine_coords(),
            });
        }

        if self.is_revealed(coords) {
            return Ok(RevealOutcome::Cleared(Vec::new()));
        }

        let count = self.board.neighbor_mine_count(coords);
        if count != 0 {
            return Ok(RevealOutcome::Cleared(vec![(coords, count)]));
        }

        Ok(RevealOutcome::Cleared(self.flood_fill(coords)))
    }

    /// Opens the zero region around `start` plus its numbered border. Cells are marked as
    /// visited when queued so nothing is emitted twice.
    fn flood_fill(&self, start: Coord2) -> Vec<(Coord2, u8)> {
        let mut visited: Array2<bool> = Array2::default(self.revealed.raw_dim());
        let mut to_visit = vec![start];
        let mut cells = Vec::new();
        visited[start.to_nd_index()] = true;

        while let Some(visit_coords) = to_visit.pop() {
            let count = self.board.neighbor_mine_count(visit_coords);
            cells.push((visit_coords, count));

            if count != 0 {
                continue;
            }

            for pos in self.board.iter_neighbors(visit_coords) {
                if !visited[pos.to_nd_index()] && !self.is_revealed(pos) {
                    visited[pos.to_nd_index()] = true;
                    to_visit.push(pos);
                }
            }
        }

        cells
    }

    fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn cleared(outcome: RevealOutcome) -> BTreeSet<(Coord2, u8)> {
        match outcome {
            RevealOutcome::Cleared(cells) => cells.into_iter().collect(),
            other => panic!("expected cleared cells, got {other:?}"),
        }
    }

    #[test]
    fn mine_returns_full_layout() {
        let board = board((5, 5), &[(2, 2), (1, 3)]);
        let revealed = Array2::default([5, 5]);
        let engine = RevealEngine::new(&board, &revealed).unwrap();

        let outcome = engine.reveal((2, 2)).unwrap();

        assert_eq!(
            outcome,
            RevealOutcome::Mine {
                trigger: (2, 2),
                mines: vec![(1, 3), (2, 2)],
            }
        );
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let board = board((5, 5), &[(2, 2)]);
        let revealed = Array2::default([5, 5]);
        let engine = RevealEngine::new(&board, &revealed).unwrap();

        let cells = cleared(engine.reveal((1, 1)).unwrap());

        assert_eq!(cells, BTreeSet::from([((1, 1), 1)]));
    }

    #[test]
    fn flood_fill_opens_zero_region_and_border() {
        let board = board((5, 5), &[(2, 2)]);
        let revealed = Array2::default([5, 5]);
        let engine = RevealEngine::new(&board, &revealed).unwrap();

        let cells = cleared(engine.reveal((4, 4)).unwrap());

        assert_eq!(cells.len(), 24);
        assert!(cells.contains(&((0, 0), 0)));
        assert!(cells.contains(&((1, 1), 1)));
        assert!(cells.contains(&((3, 3), 1)));
        assert!(!cells.iter().any(|&(coords, _)| coords == (2, 2)));
    }

    #[test]
    fn flood_fill_stops_at_numbered_wall() {
        // a full column of mines splits the board in two
        let mines: Vec<Coord2> = (0..6).map(|y| (2, y)).collect();
        let board = board((6, 6), &mines);
        let revealed = Array2::default([6, 6]);
        let engine = RevealEngine::new(&board, &revealed).unwrap();

        let cells = cleared(engine.reveal((5, 0)).unwrap());

        assert_eq!(cells.len(), 18);
        assert!(cells.iter().all(|&((x, _), _)| x >= 3));
        assert!(cells.contains(&((3, 0), 2)));
        assert!(cells.contains(&((3, 3), 3)));
        assert!(cells.contains(&((4, 4), 0)));
    }

    #[test]
    fn skips_cells_already_revealed() {
        let board = board((5, 5), &[(2, 2)]);
        let mut revealed: Array2<bool> = Array2::default([5, 5]);
        revealed[[3, 3]] = true;
        revealed[[4, 3]] = true;
        let engine = RevealEngine::new(&board, &revealed).unwrap();

        let cells = cleared(engine.reveal((4, 4)).unwrap());

        assert!(!cells.iter().any(|&(coords, _)| coords == (3, 3) || coords == (4, 3)));
        assert!(cells.contains(&((0, 0), 0)));

        let again = cleared(engine.reveal((3, 3)).unwrap());
        assert!(again.is_empty());
    }

    #[test]
    fn large_open_board_does_not_recurse() {
        let board = board((50, 50), &[(25, 25)]);
        let revealed = Array2::default([50, 50]);
        let engine = RevealEngine::new(&board, &revealed).unwrap();

        let cells = cleared(engine.reveal((0, 0)).unwrap());

        assert_eq!(cells.len(), 2499);
    }

    #[test]
    fn rejects_mismatched_mask_and_coords() {
        let board = board((5, 5), &[]);
        let revealed = Array2::default([4, 5]);
        assert_eq!(
            RevealEngine::new(&board, &revealed).unwrap_err(),
            GameError::InvalidBoardShape
        );

        let revealed = Array2::default([5, 5]);
        let engine = RevealEngine::new(&board, &revealed).unwrap();
        assert_eq!(engine.reveal((5, 1)), Err(GameError::InvalidCoords));
    }
}
