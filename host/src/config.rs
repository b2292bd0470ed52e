use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sweepfield_core::{Point, RandomBoardGenerator};

use crate::HostError;

/// World units per cell for the regular tile set.
pub const DEFAULT_GRID_UNIT: f64 = 80.0;
/// World units per cell when playing on microbricks.
pub const MICRO_GRID_UNIT: f64 = 20.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// World units per board cell. Ignored when `microbricks` is set.
    pub grid_unit: f64,
    pub microbricks: bool,
    /// Restrict every command to the host and `authorized_users`.
    pub only_authorized: bool,
    /// Players allowed to clear all games, and to play when `only_authorized` is set.
    pub authorized_users: Vec<String>,
    /// Fixed seed for board generation. Drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Random draws per board before mine placement turns exhaustive.
    pub max_placement_attempts: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            grid_unit: DEFAULT_GRID_UNIT,
            microbricks: false,
            only_authorized: false,
            authorized_users: Vec::new(),
            seed: None,
            max_placement_attempts: RandomBoardGenerator::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, HostError> {
        let config: Self =
            toml::from_str(content).map_err(|e| HostError::Config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HostError> {
        let content = fs::read_to_string(path)
            .map_err(|e| HostError::Config(format!("failed to read config file: {e}")))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), HostError> {
        if !(self.grid_unit.is_finite() && self.grid_unit > 0.0) {
            return Err(HostError::Config(
                "grid_unit must be a positive number".into(),
            ));
        }
        Ok(())
    }

    pub fn effective_grid_unit(&self) -> f64 {
        if self.microbricks {
            MICRO_GRID_UNIT
        } else {
            self.grid_unit
        }
    }

    /// Snaps a world position to the board grid. Positions that are not finite or land
    /// outside the `i32` grid have no cell.
    pub fn snap(&self, (x, y): (f64, f64)) -> Option<Point> {
        let unit = self.effective_grid_unit();
        Some(Point::new(snap_axis(x, unit)?, snap_axis(y, unit)?))
    }

    pub fn is_listed(&self, player: &str) -> bool {
        self.authorized_users.iter().any(|user| user == player)
    }
}

/// Rounds half up, so a player standing on a cell edge lands on the next cell.
fn snap_axis(value: f64, unit: f64) -> Option<i32> {
    let cell = (value / unit + 0.5).floor();
    if cell.is_finite() && cell >= f64::from(i32::MIN) && cell <= f64::from(i32::MAX) {
        Some(cell as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_file() {
        let config = HostConfig::from_toml_str("").unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn reads_every_field() {
        let config = HostConfig::from_toml_str(
            r#"
            microbricks = true
            only_authorized = true
            authorized_users = ["alice", "bob"]
            seed = 99
            max_placement_attempts = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.effective_grid_unit(), MICRO_GRID_UNIT);
        assert!(config.only_authorized);
        assert!(config.is_listed("bob"));
        assert!(!config.is_listed("carol"));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.max_placement_attempts, 12);
    }

    #[test]
    fn rejects_bad_grid_unit() {
        assert!(matches!(
            HostConfig::from_toml_str("grid_unit = 0.0"),
            Err(HostError::Config(_))
        ));
        assert!(matches!(
            HostConfig::from_toml_str("grid_unit = \"wide\""),
            Err(HostError::Config(_))
        ));
    }

    #[test]
    fn snapping_rounds_to_nearest_cell() {
        let config = HostConfig::default();
        assert_eq!(config.snap((0.0, 0.0)), Some(Point::new(0, 0)));
        assert_eq!(config.snap((39.9, 40.0)), Some(Point::new(0, 1)));
        assert_eq!(config.snap((-40.0, -41.0)), Some(Point::new(0, -1)));
        assert_eq!(config.snap((800.0, -1600.0)), Some(Point::new(10, -20)));
    }

    #[test]
    fn positions_off_the_grid_do_not_snap() {
        let config = HostConfig::default();
        let far = f64::from(i32::MAX) * DEFAULT_GRID_UNIT;

        assert_eq!(config.snap((1e300, 0.0)), None);
        assert_eq!(config.snap((0.0, -1e300)), None);
        assert_eq!(config.snap((f64::NAN, 0.0)), None);
        assert_eq!(config.snap((f64::INFINITY, 0.0)), None);
        assert_eq!(config.snap((far + DEFAULT_GRID_UNIT, 0.0)), None);
        assert_eq!(config.snap((far, 0.0)), Some(Point::new(i32::MAX, 0)));
    }
}
