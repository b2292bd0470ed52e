use alloc::vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Decides who may wipe every game at once.
pub trait Privileges {
    fn is_privileged(&self, player: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Privileges for F {
    fn is_privileged(&self, player: &str) -> bool {
        self(player)
    }
}

/// Requested game shape before validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOptions {
    pub width: Coord,
    pub height: Coord,
    pub mines: Option<CellCount>,
}

impl StartOptions {
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            mines: None,
        }
    }

    pub const fn with_mines(self, mines: CellCount) -> Self {
        Self {
            mines: Some(mines),
            ..self
        }
    }

    pub fn board_config(&self) -> Result<BoardConfig> {
        BoardConfig::new((self.width, self.height), self.mines)
    }
}

impl Default for StartOptions {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

/// Applies commands to the registry and trust store. Every operation validates before it
/// writes, so a failed command leaves state untouched.
#[derive(Clone, Debug)]
pub struct GameController {
    registry: GameRegistry,
    trust: TrustStore,
    rng: SmallRng,
    max_placement_attempts: u32,
}

impl GameController {
    pub fn new(seed: u64) -> Self {
        Self {
            registry: GameRegistry::new(),
            trust: TrustStore::new(),
            rng: SmallRng::seed_from_u64(seed),
            max_placement_attempts: RandomBoardGenerator::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_placement_attempts(self, max_placement_attempts: u32) -> Self {
        Self {
            max_placement_attempts,
            ..self
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GameRegistry {
        &mut self.registry
    }

    pub fn trust(&self) -> &TrustStore {
        &self.trust
    }

    pub fn start_game(
        &mut self,
        requester: &str,
        origin: Point,
        options: StartOptions,
    ) -> Result<Update> {
        if self.registry.active_for_owner(requester).is_some() {
            return Err(GameError::AlreadyHasGame);
        }
        let config = options.board_config()?;

        let session = self
            .registry
            .try_place(GameSession::new(requester, origin, config)?)?;
        log::info!(
            "{} started a {}x{} game with {} mines at ({}, {})",
            requester,
            config.size.0,
            config.size.1,
            config.mines,
            origin.x,
            origin.y
        );

        Ok(Update {
            instructions: session.initial_render(),
            events: vec![GameEvent::Started {
                owner: requester.into(),
                origin,
                config,
            }],
        })
    }

    pub fn mine_at(&mut self, actor: &str, point: Point) -> Result<Update> {
        let session = self
            .registry
            .find_at_mut(point, false)
            .ok_or(GameError::NoActiveGame)?;
        if !self.trust.is_trusted(session.owner(), actor) {
            return Err(GameError::NotTrusted);
        }
        let coords = session.to_local(point).ok_or(GameError::InvalidCoords)?;

        if session.board().is_none() {
            let generator = RandomBoardGenerator::new(self.rng.next_u64())
                .with_max_attempts(self.max_placement_attempts);
            session.ensure_board(generator, coords);
        }

        let mut update = Update::default();
        match session.reveal(coords)? {
            RevealOutcome::Mine { trigger, mines } => {
                update.instructions = session.apply_mine(actor, trigger, &mines);
                log::info!("{} hit a mine on the game of {}", actor, session.owner());
                update
                    .events
                    .push(GameEvent::Lost(GameSummary::of(session, actor)));
            }
            RevealOutcome::Cleared(cells) => {
                update.instructions = session.apply_cleared(actor, &cells);
                if !session.is_in_progress() {
                    log::info!("{} cleared the game of {}", actor, session.owner());
                    update
                        .events
                        .push(GameEvent::Won(GameSummary::of(session, actor)));
                }
            }
        }

        Ok(update)
    }

    pub fn stats_for(&self, point: Point) -> Result<StatsReport> {
        self.registry
            .find_at(point, true)
            .map(StatsReport::of)
            .ok_or(GameError::NoGame)
    }

    pub fn toggle_trust(&mut self, owner: &str, target: &str) -> TrustChange {
        self.trust.toggle(owner, target)
    }

    /// Removes every session. The caller is expected to wipe the rendered scene as well.
    pub fn clear_all(&mut self, requester: &str, privileges: &impl Privileges) -> Result<usize> {
        if !privileges.is_privileged(requester) {
            return Err(GameError::Unauthorized);
        }
        let cleared = self.registry.clear_all();
        log::info!("{} cleared {} games", requester, cleared);
        Ok(cleared)
    }
}
