use std::sync::{Mutex, MutexGuard, PoisonError};

use sweepfield_core::{
    GameController, GameError, Point, Privileges, StartOptions, StatsReport, TrustChange, Update,
};
use sweepfield_protocol::Command;

use crate::{ConfigPrivileges, HostConfig, HostError, Messenger, PlayerDirectory, Scene, messages};

/// Scene a player's render batches go to.
pub fn scene_name(player: &str) -> String {
    format!("minefield_{player}")
}

/// Runs commands against one shared controller.
///
/// Position lookups may suspend, so each command resolves the player's position first and only
/// then takes the lock, letting the controller re-check everything against current state. The
/// lock is never held across an await, and rendering and messaging happen after it is released.
#[derive(Debug)]
pub struct Host<D, S, M> {
    controller: Mutex<GameController>,
    config: HostConfig,
    directory: D,
    scene: S,
    messenger: M,
}

impl<D: PlayerDirectory, S: Scene, M: Messenger> Host<D, S, M> {
    pub fn new(config: HostConfig, directory: D, scene: S, messenger: M) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let controller =
            GameController::new(seed).with_max_placement_attempts(config.max_placement_attempts);
        Self {
            controller: Mutex::new(controller),
            config,
            directory,
            scene,
            messenger,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Exclusive access to the rules engine.
    pub fn controller(&self) -> MutexGuard<'_, GameController> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether `player` may issue commands at all.
    pub fn is_authorized(&self, player: &str) -> bool {
        !self.config.only_authorized || self.privileges().is_privileged(player)
    }

    /// Runs one command, telling the player why it failed if it did. Commands from players
    /// who are not authorized are dropped silently.
    pub async fn handle(&self, player: &str, command: Command) -> Result<(), HostError> {
        if !self.is_authorized(player) {
            log::debug!("Ignoring {} from unauthorized player {}", command.name(), player);
            return Ok(());
        }

        let result = match command {
            Command::Start(options) => self.start(player, options).await,
            Command::Mine => self.mine(player).await,
            Command::Stats => self.stats(player).await.map(|_| ()),
            Command::ClearAll => self.clear_all(player).map(|_| ()),
            Command::Trust { target } => self.trust(player, &target).map(|_| ()),
        };

        if let Err(err) = &result {
            log::debug!("Command from {} failed: {}", player, err);
            self.messenger
                .announce_to_one(player, &messages::error(player, err));
        }
        result
    }

    pub async fn start(&self, player: &str, options: StartOptions) -> Result<(), HostError> {
        // cheap checks first so a bad request never waits on the position lookup
        if self.controller().registry().active_for_owner(player).is_some() {
            return Err(GameError::AlreadyHasGame.into());
        }
        options.board_config()?;

        let origin = self.locate(player).await?;
        let update = self.controller().start_game(player, origin, options)?;
        self.publish(player, update);
        Ok(())
    }

    pub async fn mine(&self, player: &str) -> Result<(), HostError> {
        let point = self.locate(player).await?;
        let update = {
            let mut controller = self.controller();
            match controller.mine_at(player, point) {
                Ok(update) => update,
                Err(GameError::NotTrusted) => {
                    // name the owner in the reply
                    let owner = controller
                        .registry()
                        .find_at(point, false)
                        .map(|session| session.owner().to_string());
                    return Err(match owner {
                        Some(owner) => HostError::NotTrusted { owner },
                        None => GameError::NotTrusted.into(),
                    });
                }
                Err(err) => return Err(err.into()),
            }
        };
        self.publish(player, update);
        Ok(())
    }

    pub async fn stats(&self, player: &str) -> Result<StatsReport, HostError> {
        let point = self.locate(player).await?;
        let report = self.controller().stats_for(point)?;
        for line in messages::stats(&report) {
            self.messenger.announce_to_one(player, &line);
        }
        Ok(report)
    }

    /// Wipes every game and the rendered scene. Returns how many games were removed.
    pub fn clear_all(&self, player: &str) -> Result<usize, HostError> {
        let cleared = self.controller().clear_all(player, &self.privileges())?;
        if let Err(err) = self.scene.clear() {
            log::error!("Failed to clear the scene after {} cleared all games: {:#}", player, err);
        }
        Ok(cleared)
    }

    /// Toggles whether `target_name` may play on `player`'s games.
    pub fn trust(&self, player: &str, target_name: &str) -> Result<TrustChange, HostError> {
        let target = self
            .directory
            .find_by_name(target_name)
            .ok_or_else(|| HostError::PlayerNotFound(target_name.into()))?;

        let change = self.controller().toggle_trust(player, &target);
        if let Some(text) = messages::trust(player, &target, change) {
            self.messenger.announce_to_one(player, &text);
            self.messenger.announce_to_one(&target, &text);
        }
        Ok(change)
    }

    async fn locate(&self, player: &str) -> Result<Point, HostError> {
        match self.directory.position(player).await {
            Ok(position) => self.config.snap(position).ok_or_else(|| {
                log::debug!("{} is off the grid at {:?}", player, position);
                GameError::OutOfBounds.into()
            }),
            Err(err) => {
                log::debug!("Position lookup for {} failed: {:#}", player, err);
                Err(HostError::PlayerNotFound(player.into()))
            }
        }
    }

    fn privileges(&self) -> ConfigPrivileges<'_, D> {
        ConfigPrivileges {
            config: &self.config,
            directory: &self.directory,
        }
    }

    /// Hands an update to the renderer and announces its events. A render failure is logged
    /// and does not undo the state change.
    fn publish(&self, player: &str, update: Update) {
        if !update.instructions.is_empty() {
            if let Err(err) = self.scene.render(&scene_name(player), &update.instructions) {
                log::error!(
                    "Failed to render {} tiles for {}: {:#}",
                    update.instructions.len(),
                    player,
                    err
                );
            }
        }
        for event in &update.events {
            self.messenger.announce_to_all(&messages::event(event));
        }
    }
}
