use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Plain facts about a finished game, for whoever formats announcements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub owner: String,
    pub actor: String,
    pub config: BoardConfig,
    pub progress: f64,
}

impl GameSummary {
    pub(crate) fn of(session: &GameSession, actor: &str) -> Self {
        Self {
            owner: session.owner().into(),
            actor: actor.into(),
            config: session.config(),
            progress: session.progress(),
        }
    }

    /// Whether the actor played on someone else's board.
    pub fn on_behalf(&self) -> bool {
        self.owner != self.actor
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started {
        owner: String,
        origin: Point,
        config: BoardConfig,
    },
    Lost(GameSummary),
    Won(GameSummary),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMoves {
    pub player: String,
    pub moves: u32,
    pub final_move: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub owner: String,
    pub config: BoardConfig,
    pub outcome: GameOutcome,
    pub progress: f64,
    pub moves: Vec<PlayerMoves>,
    pub last_mover: Option<String>,
}

impl StatsReport {
    pub fn of(session: &GameSession) -> Self {
        let last_mover = session.last_mover();
        let moves = session
            .moves()
            .iter()
            .map(|(player, &moves)| PlayerMoves {
                player: player.clone(),
                moves,
                final_move: last_mover == Some(player.as_str()),
            })
            .collect();

        Self {
            owner: session.owner().into(),
            config: session.config(),
            outcome: session.outcome(),
            progress: session.progress(),
            moves,
            last_mover: last_mover.map(String::from),
        }
    }

    /// The player whose only move ended the game, which is never counted as a move.
    pub fn uncounted_final_mover(&self) -> Option<&str> {
        let last_mover = self.last_mover.as_deref()?;
        if self.moves.iter().any(|entry| entry.player == last_mover) {
            None
        } else {
            Some(last_mover)
        }
    }
}

/// What a command changed: render instructions in world coordinates and outcome facts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub instructions: Vec<RenderInstruction>,
    pub events: Vec<GameEvent>,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty() && self.events.is_empty()
    }
}
