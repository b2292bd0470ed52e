//! User-facing text. The rules engine only reports facts; everything players read is worded here.

use sweepfield_core::{
    BoardConfig, GameError, GameEvent, GameOutcome, GameSummary, StatsReport, TrustChange,
};

use crate::HostError;

fn percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

fn describe(config: &BoardConfig) -> String {
    let density = f64::from(config.mines) / f64::from(config.total_cells());
    format!(
        "({}x{} {} mines = {}%)",
        config.size.0,
        config.size.1,
        config.mines,
        percent(density)
    )
}

fn behalf(summary: &GameSummary) -> String {
    if summary.on_behalf() {
        format!(" on {}'s behalf", summary.owner)
    } else {
        String::new()
    }
}

pub fn event(event: &GameEvent) -> String {
    match event {
        GameEvent::Started {
            owner,
            origin,
            config,
        } => format!(
            "{owner} starting at ({},{}) {}",
            origin.x,
            origin.y,
            describe(config)
        ),
        GameEvent::Lost(summary) => format!(
            "{} lost a game at {}% complete{}... {}",
            summary.actor,
            percent(summary.progress),
            behalf(summary),
            describe(&summary.config)
        ),
        GameEvent::Won(summary) => format!(
            "{} finished a game{}! {}",
            summary.actor,
            behalf(summary),
            describe(&summary.config)
        ),
    }
}

/// Reply to `player` explaining why their command failed.
pub fn error(player: &str, err: &HostError) -> String {
    match err {
        HostError::PlayerNotFound(name) => format!("Could not find {name}"),
        HostError::NotTrusted { owner } => {
            format!("{owner} does not trust you to do that, {player}")
        }
        HostError::Config(message) => format!("Configuration problem: {message}"),
        HostError::Game(err) => match err {
            GameError::Overlap => format!("{player} can't start a game here (overlap)"),
            GameError::TooManyMines => format!("{player}'s game would have too many mines"),
            GameError::InvalidSize => format!(
                "{player}'s game must be between {} and {} cells wide",
                BoardConfig::MIN_SIDE,
                BoardConfig::MAX_SIDE
            ),
            GameError::OutOfBounds => format!("{player} is too far out to play here"),
            GameError::AlreadyHasGame => format!("{player} already has a game in progress"),
            GameError::NoActiveGame => format!("{player} is not over an active game"),
            GameError::NoGame => format!("{player} is not over a game"),
            GameError::NotTrusted => {
                format!("The owner of this game does not trust you to do that, {player}")
            }
            GameError::Unauthorized => format!("{player} is not allowed to do that"),
            GameError::InvalidCoords
            | GameError::BoardAlreadyGenerated
            | GameError::InvalidBoardShape => format!("Something went wrong for {player}: {err}"),
        },
    }
}

pub fn stats(report: &StatsReport) -> Vec<String> {
    let status = match report.outcome {
        GameOutcome::InProgress => format!("{}%", percent(report.progress)),
        GameOutcome::Lost => format!("lost @ {}%", percent(report.progress)),
        GameOutcome::Won => "won".to_string(),
    };

    let mut lines = vec![format!(
        "[{status}] {} {}",
        report.owner,
        describe(&report.config)
    )];
    lines.extend(report.moves.iter().map(|entry| {
        let suffix = if entry.final_move { " (final move)" } else { "" };
        format!(" -- {}: {} moves{suffix}", entry.player, entry.moves)
    }));
    if let Some(player) = report.uncounted_final_mover() {
        lines.push(format!("{player}'s only move was losing the game"));
    }
    lines
}

pub fn trust(owner: &str, target: &str, change: TrustChange) -> Option<String> {
    match change {
        TrustChange::Granted => Some(format!("{owner} now trusts {target} for minesweeper")),
        TrustChange::Revoked => Some(format!("{owner} no longer trusts {target} for minesweeper")),
        TrustChange::Ignored => None,
    }
}
