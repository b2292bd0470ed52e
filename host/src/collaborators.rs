use std::future::Future;

use sweepfield_core::{Privileges, RenderInstruction};

use crate::HostConfig;

/// Player lookup provided by the game server.
pub trait PlayerDirectory {
    /// World position of a connected player. May suspend.
    fn position(&self, player: &str) -> impl Future<Output = anyhow::Result<(f64, f64)>>;

    fn is_host(&self, player: &str) -> bool;

    /// Canonical name of a connected player matching `name`.
    fn find_by_name(&self, name: &str) -> Option<String>;
}

/// Turns render instructions into visuals.
pub trait Scene {
    fn render(&self, scene: &str, instructions: &[RenderInstruction]) -> anyhow::Result<()>;

    fn clear(&self) -> anyhow::Result<()>;
}

/// Delivers already formatted text to players.
pub trait Messenger {
    fn announce_to_all(&self, text: &str);

    fn announce_to_one(&self, player: &str, text: &str);
}

/// Host player or anyone listed in the config.
#[derive(Debug)]
pub struct ConfigPrivileges<'a, D> {
    pub config: &'a HostConfig,
    pub directory: &'a D,
}

impl<D: PlayerDirectory> Privileges for ConfigPrivileges<'_, D> {
    fn is_privileged(&self, player: &str) -> bool {
        self.directory.is_host(player) || self.config.is_listed(player)
    }
}
