use alloc::vec::Vec;

use crate::*;

/// Every live session on the shared plane, in placement order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameRegistry {
    sessions: Vec<GameSession>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session` unless its box intersects any existing session, finished or not.
    pub fn try_place(&mut self, session: GameSession) -> Result<&mut GameSession> {
        let bounds = session.bounds();
        if let Some(existing) = self.sessions.iter().find(|s| s.bounds().overlaps(&bounds)) {
            log::debug!(
                "Placement at {:?} rejected, overlaps game of {}",
                bounds,
                existing.owner()
            );
            return Err(GameError::Overlap);
        }
        self.sessions.push(session);
        let index = self.sessions.len() - 1;
        Ok(&mut self.sessions[index])
    }

    /// First session whose box contains `point`. Finished sessions only match when
    /// `include_finished` is set.
    pub fn find_at(&self, point: Point, include_finished: bool) -> Option<&GameSession> {
        self.sessions
            .iter()
            .find(|s| s.bounds().contains(point) && (include_finished || s.is_in_progress()))
    }

    pub fn find_at_mut(&mut self, point: Point, include_finished: bool) -> Option<&mut GameSession> {
        self.sessions
            .iter_mut()
            .find(|s| s.bounds().contains(point) && (include_finished || s.is_in_progress()))
    }

    /// The game `owner` is still playing, if any.
    pub fn active_for_owner(&self, owner: &str) -> Option<&GameSession> {
        self.sessions
            .iter()
            .find(|s| s.owner() == owner && s.is_in_progress())
    }

    /// Drops every session and returns how many there were.
    pub fn clear_all(&mut self) -> usize {
        let count = self.sessions.len();
        self.sessions.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameSession> {
        self.sessions.iter()
    }
}
