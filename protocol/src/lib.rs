//! External vocabulary of the minefield: chat commands coming in, scene updates going out.

use serde::{Deserialize, Serialize};
use sweepfield_core::{BoardConfig, CellCount, Coord, RenderInstruction, StartOptions};

/// Prefix shared by every command, as in `ms:start` or `ms start`.
pub const COMMAND_PREFIX: &str = "ms";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    Start(StartOptions),
    Mine,
    Stats,
    ClearAll,
    Trust { target: String },
}

impl Command {
    /// Parses a command name with its arguments. The name may carry the `ms:` prefix, and
    /// the bare `ms` name takes the subcommand from the first argument.
    pub fn parse(name: &str, args: &[&str]) -> Option<Self> {
        let name = name
            .strip_prefix(COMMAND_PREFIX)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(name);

        match name {
            COMMAND_PREFIX => {
                let (sub, rest) = args.split_first()?;
                Self::parse(sub, rest)
            }
            "start" => Some(Self::Start(parse_start_options(args))),
            "mine" => Some(Self::Mine),
            "stats" => Some(Self::Stats),
            "clearall" => Some(Self::ClearAll),
            "trust" => {
                let target = args.join(" ");
                if target.is_empty() {
                    None
                } else {
                    Some(Self::Trust { target })
                }
            }
            _ => None,
        }
    }

    /// Parses a whitespace separated line such as `ms start size:20 mines:60`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let name = words.next()?;
        let args: Vec<&str> = words.collect();
        Self::parse(name, &args)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::Mine => "mine",
            Self::Stats => "stats",
            Self::ClearAll => "clearall",
            Self::Trust { .. } => "trust",
        }
    }
}

/// Reads `width:`, `height:`, `size:` and `mines:` tokens. Malformed tokens and values that
/// are not integers are skipped; sides are clamped to the allowed range and at least one
/// mine is requested.
pub fn parse_start_options(args: &[&str]) -> StartOptions {
    let mut options = StartOptions::default();

    for arg in args {
        let Some((key, value)) = arg.split_once(':') else {
            continue;
        };
        if value.contains(':') {
            continue;
        }
        // decimals like `12.5` are skipped, not truncated to 12
        let Ok(value) = value.trim().parse::<i64>() else {
            continue;
        };

        match key {
            "width" => options.width = clamp_side(value),
            "height" => options.height = clamp_side(value),
            "size" => {
                options.width = clamp_side(value);
                options.height = clamp_side(value);
            }
            "mines" => options.mines = Some(value.clamp(1, i64::from(CellCount::MAX)) as CellCount),
            _ => {}
        }
    }

    options
}

fn clamp_side(value: i64) -> Coord {
    value.clamp(
        i64::from(BoardConfig::MIN_SIDE),
        i64::from(BoardConfig::MAX_SIDE),
    ) as Coord
}

/// One message for an out-of-process renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum SceneCommand {
    Render {
        scene: String,
        instructions: Vec<RenderInstruction>,
    },
    Clear,
}

impl SceneCommand {
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepfield_core::{BASE_LAYER, Point, TileKind};

    #[test]
    fn parses_every_dispatch_form() {
        assert_eq!(Command::parse("mine", &[]), Some(Command::Mine));
        assert_eq!(Command::parse("ms:stats", &[]), Some(Command::Stats));
        assert_eq!(Command::parse("ms", &["clearall"]), Some(Command::ClearAll));
        assert_eq!(Command::parse("ms", &[]), None);
        assert_eq!(Command::parse("ms:dig", &[]), None);
        assert_eq!(
            Command::parse_line("ms trust Some Player"),
            Some(Command::Trust {
                target: "Some Player".into()
            })
        );
        assert_eq!(Command::parse("trust", &[]), None);
    }

    #[test]
    fn start_options_are_clamped() {
        let options = parse_start_options(&["width:3", "height:80", "mines:-4"]);
        assert_eq!(options, StartOptions::new(5, 50).with_mines(1));

        let options = parse_start_options(&["size:20", "mines:60"]);
        assert_eq!(options, StartOptions::new(20, 20).with_mines(60));
    }

    #[test]
    fn malformed_start_tokens_are_ignored() {
        let options = parse_start_options(&["width", "height:abc", "mines:1:2", "depth:9", "size:12.5"]);
        assert_eq!(options, StartOptions::default());

        assert_eq!(
            Command::parse_line("ms:start size:7"),
            Some(Command::Start(StartOptions::new(7, 7)))
        );
    }

    #[test]
    fn decimal_values_are_skipped_not_truncated() {
        let options = parse_start_options(&["size:12.5", "width:8", "mines:3.9"]);
        assert_eq!(options, StartOptions::new(8, 10));
    }

    #[test]
    fn scene_commands_are_json_lines() {
        let render = SceneCommand::Render {
            scene: "minefield_alice".into(),
            instructions: vec![RenderInstruction::new(
                TileKind::Count(3),
                Point::new(-1, 4),
                BASE_LAYER,
            )],
        };

        let line = render.to_json_line().unwrap();

        assert!(line.ends_with('\n'));
        assert!(line.starts_with(r#"{"op":"render","scene":"minefield_alice""#));
        assert_eq!(SceneCommand::from_json(line.trim_end()).unwrap(), render);
        assert_eq!(
            SceneCommand::Clear.to_json_line().unwrap(),
            "{\"op\":\"clear\"}\n"
        );
    }
}
