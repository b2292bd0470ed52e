use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    /// Places `config.mines` mines, never on a corner and never on a cell of `safe`.
    fn generate(self, config: BoardConfig, safe: &[Coord2]) -> Board;
}
