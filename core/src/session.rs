use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Lost,
    Won,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

impl Default for GameOutcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game instance anchored on the world grid.
///
/// The board is generated lazily on the first reveal so the first click can be kept safe.
/// `revealed` records which cells have already had their final render emitted; decoration
/// cells outside the board never enter it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    owner: String,
    config: BoardConfig,
    origin: Point,
    bounds: BoundingBox,
    outcome: GameOutcome,
    board: Option<Board>,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    moves: BTreeMap<String, u32>,
    last_mover: Option<String>,
    final_progress: Option<f64>,
}

impl GameSession {
    /// Anchors a game at `origin`. Fails with [`GameError::OutOfBounds`] when the board or
    /// its face decoration would not fit on the grid.
    pub fn new(owner: impl Into<String>, origin: Point, config: BoardConfig) -> Result<Self> {
        let bounds =
            BoundingBox::from_origin(origin, config.size).ok_or(GameError::OutOfBounds)?;
        if origin
            .checked_offset(DECORATION_CELL.x, DECORATION_CELL.y)
            .is_none()
        {
            return Err(GameError::OutOfBounds);
        }

        Ok(Self {
            owner: owner.into(),
            config,
            origin,
            bounds,
            outcome: GameOutcome::InProgress,
            board: None,
            revealed: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            moves: BTreeMap::new(),
            last_mover: None,
            final_progress: None,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_in_progress(&self) -> bool {
        !self.outcome.is_finished()
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn last_mover(&self) -> Option<&str> {
        self.last_mover.as_deref()
    }

    pub fn moves(&self) -> &BTreeMap<String, u32> {
        &self.moves
    }

    pub fn moves_by(&self, player: &str) -> u32 {
        self.moves.get(player).copied().unwrap_or(0)
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Board-local coordinates of a world point, if it lies on this board.
    pub fn to_local(&self, point: Point) -> Option<Coord2> {
        if !self.bounds.contains(point) {
            return None;
        }
        let x = Coord::try_from(point.x - self.origin.x).ok()?;
        let y = Coord::try_from(point.y - self.origin.y).ok()?;
        Some((x, y))
    }

    /// Fraction of safe cells revealed. Frozen at the value reached when the game ended.
    pub fn progress(&self) -> f64 {
        if let Some(progress) = self.final_progress {
            return progress;
        }
        let safe = self.config.safe_cells();
        if safe == 0 {
            return 1.0;
        }
        let ratio = f64::from(self.revealed_count) / f64::from(safe);
        if ratio > 1.0 { 1.0 } else { ratio }
    }

    /// Generates the board on first use with `first` kept mine-free.
    pub fn ensure_board(&mut self, generator: impl BoardGenerator, first: Coord2) -> &Board {
        let config = self.config;
        self.board
            .get_or_insert_with(|| generator.generate(config, &[first]))
    }

    /// Installs a prepared board in place of generation. The declared mine count follows the
    /// installed board.
    pub fn install_board(&mut self, board: Board) -> Result<()> {
        if self.board.is_some() {
            return Err(GameError::BoardAlreadyGenerated);
        }
        if board.size() != self.config.size {
            return Err(GameError::InvalidBoardShape);
        }
        self.config.mines = board.mine_count();
        self.board = Some(board);
        Ok(())
    }

    /// Runs the reveal engine against this session's board and mask.
    pub fn reveal(&self, coords: Coord2) -> Result<RevealOutcome> {
        let board = self.board.as_ref().ok_or(GameError::InvalidCoords)?;
        RevealEngine::new(board, &self.revealed)?.reveal(coords)
    }

    /// Blank board plus the starting face, in world coordinates.
    pub fn initial_render(&self) -> Vec<RenderInstruction> {
        let (x_end, y_end) = self.config.size;
        let mut instructions = Vec::with_capacity(usize::from(self.config.total_cells()) + 1);
        instructions.push(RenderInstruction::new(
            TileKind::Smile,
            DECORATION_CELL,
            BOARD_LAYER,
        ));
        for x in 0..x_end {
            for y in 0..y_end {
                instructions.push(RenderInstruction::new(
                    TileKind::Blank,
                    local_point((x, y)),
                    BOARD_LAYER,
                ));
            }
        }
        self.to_world(instructions)
    }

    /// Commits safe cells from a reveal: filters out cells already rendered, records the rest
    /// in the mask, counts the move and ends the game when every safe cell is open.
    ///
    /// A reveal that opens nothing new is not counted as a move.
    pub fn apply_cleared(&mut self, actor: &str, cells: &[(Coord2, u8)]) -> Vec<RenderInstruction> {
        if !self.is_in_progress() {
            return Vec::new();
        }

        let mut instructions = Vec::new();
        for &(coords, count) in cells {
            if self.is_revealed(coords) {
                continue;
            }
            self.revealed[coords.to_nd_index()] = true;
            self.revealed_count += 1;

            let pos = local_point(coords);
            instructions.push(RenderInstruction::new(TileKind::Count(0), pos, BASE_LAYER));
            if count > 0 {
                instructions.push(RenderInstruction::new(
                    TileKind::Count(count),
                    pos,
                    OVERLAY_LAYER,
                ));
            }
        }

        if instructions.is_empty() {
            return instructions;
        }
        *self.moves.entry(actor.into()).or_insert(0) += 1;

        if self.revealed_count >= self.config.safe_cells() {
            self.finish(GameOutcome::Won, actor);
            instructions.push(RenderInstruction::new(
                TileKind::Sunglasses,
                DECORATION_CELL,
                BASE_LAYER,
            ));
        }

        self.to_world(instructions)
    }

    /// Ends the game on a mine: marks the trigger, shows every mine and frowns.
    /// The mask is left untouched.
    pub fn apply_mine(&mut self, actor: &str, trigger: Coord2, mines: &[Coord2]) -> Vec<RenderInstruction> {
        if !self.is_in_progress() {
            return Vec::new();
        }

        let mut instructions = Vec::with_capacity(mines.len() + 2);
        instructions.push(RenderInstruction::new(
            TileKind::WrongFlag,
            local_point(trigger),
            OVERLAY_LAYER,
        ));
        instructions.extend(
            mines
                .iter()
                .filter(|&&coords| !self.is_revealed(coords))
                .map(|&coords| RenderInstruction::new(TileKind::Mine, local_point(coords), BASE_LAYER)),
        );
        instructions.push(RenderInstruction::new(
            TileKind::Frown,
            DECORATION_CELL,
            BASE_LAYER,
        ));

        self.finish(GameOutcome::Lost, actor);
        self.to_world(instructions)
    }

    fn finish(&mut self, outcome: GameOutcome, actor: &str) {
        if !self.is_in_progress() {
            return;
        }
        self.final_progress = Some(self.progress());
        self.outcome = outcome;
        self.last_mover = Some(actor.into());
    }

    fn to_world(&self, instructions: Vec<RenderInstruction>) -> Vec<RenderInstruction> {
        instructions
            .into_iter()
            .filter_map(|instruction| instruction.translated(self.origin))
            .collect()
    }
}

fn local_point((x, y): Coord2) -> Point {
    Point::new(x.into(), y.into())
}
