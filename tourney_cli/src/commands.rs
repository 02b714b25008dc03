use crate::render;
use std::fmt;
use tourney::{
    CompetitorId, EngineResult, EngineSettings, Format, MatchId, MatchLocation, Side,
    TournamentState,
};

/// A parsed CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Overview of the active format
    Show,
    /// Players and teams with their ids
    Players,
    AddPlayer(String),
    RemovePlayer(CompetitorId),
    AddTeam(CompetitorId, CompetitorId),
    RemoveTeam(CompetitorId),
    SetFormat(Format),
    /// Draw a new bracket for the active format
    GenerateBracket,
    /// Schedule a new league for the active format
    GenerateLeague,
    Score {
        loc: MatchLocation,
        home: u32,
        away: u32,
    },
    Assign {
        loc: MatchLocation,
        side: Side,
        competitor: Option<CompetitorId>,
    },
    LeagueScore {
        match_id: MatchId,
        home: u32,
        away: u32,
    },
    /// League table, or knockout table if no league exists
    Table,
    Reset,
}

impl Command {
    /// Name used for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Players => "players",
            Self::AddPlayer(_) => "add-player",
            Self::RemovePlayer(_) => "remove-player",
            Self::AddTeam(..) => "add-team",
            Self::RemoveTeam(_) => "remove-team",
            Self::SetFormat(_) => "format",
            Self::GenerateBracket => "bracket",
            Self::GenerateLeague => "league",
            Self::Score { .. } => "score",
            Self::Assign { .. } => "assign",
            Self::LeagueScore { .. } => "league-score",
            Self::Table => "table",
            Self::Reset => "reset",
        }
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required argument is absent.
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },
    /// Not a whole number.
    InvalidNumber(String),
    /// Neither `1v1` nor `2v2`.
    InvalidFormat(String),
    /// Neither `home` nor `away`.
    InvalidSide(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { command, usage } => {
                write!(f, "Missing argument for '{}'. Usage: {}", command, usage)
            }
            Self::InvalidNumber(value) => {
                write!(f, "Invalid number '{}'. Must be a whole number", value)
            }
            Self::InvalidFormat(value) => {
                write!(f, "Invalid format '{}'. Use '1v1' or '2v2'", value)
            }
            Self::InvalidSide(value) => {
                write!(f, "Invalid side '{}'. Use 'home' or 'away'", value)
            }
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Run with --help to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse command words (everything after the options) into a [`Command`].
///
/// No words means [`Command::Show`].
///
/// # Examples
///
/// ```
/// use tourney_cli::commands::{Command, parse_command};
///
/// let words: Vec<String> = ["score", "0", "1", "3", "2"].iter().map(|s| s.to_string()).collect();
/// assert!(matches!(parse_command(&words), Ok(Command::Score { home: 3, away: 2, .. })));
/// assert_eq!(parse_command(&[]), Ok(Command::Show));
/// ```
pub fn parse_command(words: &[String]) -> Result<Command, ParseError> {
    let parts: Vec<&str> = words.iter().map(|w| w.trim()).collect();
    let Some((&name, args)) = parts.split_first() else {
        return Ok(Command::Show);
    };

    match name {
        "show" => Ok(Command::Show),
        "players" => Ok(Command::Players),
        "bracket" => Ok(Command::GenerateBracket),
        "league" => Ok(Command::GenerateLeague),
        "table" => Ok(Command::Table),
        "reset" => Ok(Command::Reset),
        "add-player" => {
            let player_name = args.join(" ");
            if player_name.trim().is_empty() {
                return Err(missing("add-player", "add-player NAME"));
            }
            Ok(Command::AddPlayer(player_name.trim().to_string()))
        }
        "remove-player" => {
            let id = arg(args, 0, "remove-player", "remove-player ID")?;
            Ok(Command::RemovePlayer(id.into()))
        }
        "add-team" => {
            let usage = "add-team PLAYER_ID PLAYER_ID";
            let first = arg(args, 0, "add-team", usage)?;
            let second = arg(args, 1, "add-team", usage)?;
            Ok(Command::AddTeam(first.into(), second.into()))
        }
        "remove-team" => {
            let id = arg(args, 0, "remove-team", "remove-team ID")?;
            Ok(Command::RemoveTeam(id.into()))
        }
        "format" => {
            let value = arg(args, 0, "format", "format 1v1|2v2")?;
            let format = value
                .parse()
                .map_err(|_| ParseError::InvalidFormat(value.to_string()))?;
            Ok(Command::SetFormat(format))
        }
        "score" => parse_score_command(args),
        "assign" => parse_assign_command(args),
        "league-score" => parse_league_score_command(args),
        other => Err(ParseError::UnrecognizedCommand(other.to_string())),
    }
}

fn missing(command: &'static str, usage: &'static str) -> ParseError {
    ParseError::MissingArgument { command, usage }
}

fn arg<'a>(
    args: &[&'a str],
    idx: usize,
    command: &'static str,
    usage: &'static str,
) -> Result<&'a str, ParseError> {
    args.get(idx).copied().ok_or(missing(command, usage))
}

fn parse_index(value: &str) -> Result<usize, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

/// Scores are taken as signed input; negatives become 0.
fn parse_score(value: &str) -> Result<u32, ParseError> {
    let score: i64 = value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))?;
    if score < 0 {
        log::warn!("Negative score {score} recorded as 0");
        return Ok(0);
    }
    u32::try_from(score).map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

/// Parse a score command: "score ROUND MATCH HOME AWAY"
fn parse_score_command(args: &[&str]) -> Result<Command, ParseError> {
    let usage = "score ROUND MATCH HOME_SCORE AWAY_SCORE";
    let round_idx = parse_index(arg(args, 0, "score", usage)?)?;
    let match_idx = parse_index(arg(args, 1, "score", usage)?)?;
    let home = parse_score(arg(args, 2, "score", usage)?)?;
    let away = parse_score(arg(args, 3, "score", usage)?)?;
    Ok(Command::Score {
        loc: MatchLocation::new(round_idx, match_idx),
        home,
        away,
    })
}

/// Parse an assign command: "assign ROUND MATCH home|away ID|-"
fn parse_assign_command(args: &[&str]) -> Result<Command, ParseError> {
    let usage = "assign ROUND MATCH home|away ID|-";
    let round_idx = parse_index(arg(args, 0, "assign", usage)?)?;
    let match_idx = parse_index(arg(args, 1, "assign", usage)?)?;
    let side_arg = arg(args, 2, "assign", usage)?;
    let side = side_arg
        .parse()
        .map_err(|_| ParseError::InvalidSide(side_arg.to_string()))?;
    let competitor = match arg(args, 3, "assign", usage)? {
        "-" => None,
        id => Some(id.into()),
    };
    Ok(Command::Assign {
        loc: MatchLocation::new(round_idx, match_idx),
        side,
        competitor,
    })
}

/// Parse a league score command: "league-score MATCH_ID HOME AWAY"
fn parse_league_score_command(args: &[&str]) -> Result<Command, ParseError> {
    let usage = "league-score MATCH_ID HOME_SCORE AWAY_SCORE";
    let match_id = arg(args, 0, "league-score", usage)?;
    let home = parse_score(arg(args, 1, "league-score", usage)?)?;
    let away = parse_score(arg(args, 2, "league-score", usage)?)?;
    Ok(Command::LeagueScore {
        match_id: match_id.into(),
        home,
        away,
    })
}

/// Result of running a command.
#[derive(Debug)]
pub struct Outcome {
    /// The new state, if the command changed anything
    pub state: Option<TournamentState>,
    /// Text to print
    pub output: String,
}

impl Outcome {
    fn changed(state: TournamentState, output: String) -> Self {
        Self {
            state: Some(state),
            output,
        }
    }

    fn view(output: String) -> Self {
        Self {
            state: None,
            output,
        }
    }
}

/// Run a command against `state`.
///
/// # Errors
///
/// Returns the engine error unchanged; `state` is never modified.
pub fn execute(
    command: &Command,
    state: &TournamentState,
    settings: &EngineSettings,
) -> EngineResult<Outcome> {
    let outcome = match command {
        Command::Show => Outcome::view(render::overview(state)),
        Command::Players => Outcome::view(render::roster(state)),
        Command::AddPlayer(name) => {
            let next = state.add_player(name.as_str());
            let output = render::roster(&next);
            Outcome::changed(next, output)
        }
        Command::RemovePlayer(id) => {
            let next = state.remove_player(id)?;
            let output = render::roster(&next);
            Outcome::changed(next, output)
        }
        Command::AddTeam(first, second) => {
            let next = state.add_team(&[first.clone(), second.clone()])?;
            let output = render::roster(&next);
            Outcome::changed(next, output)
        }
        Command::RemoveTeam(id) => {
            let next = state.remove_team(id)?;
            let output = render::roster(&next);
            Outcome::changed(next, output)
        }
        Command::SetFormat(format) => {
            let next = state.set_format(*format);
            let output = render::overview(&next);
            Outcome::changed(next, output)
        }
        Command::GenerateBracket => {
            let next = state.generate_bracket()?;
            let output = render::bracket(&next);
            Outcome::changed(next, output)
        }
        Command::GenerateLeague => {
            let next = state.generate_league()?;
            let output = render::league(&next);
            Outcome::changed(next, output)
        }
        Command::Score { loc, home, away } => {
            let next = state.update_match(*loc, *home, *away, settings)?;
            let output = render::bracket(&next);
            Outcome::changed(next, output)
        }
        Command::Assign {
            loc,
            side,
            competitor,
        } => {
            let next = state.set_match_competitor(*loc, *side, competitor.clone())?;
            let output = render::bracket(&next);
            Outcome::changed(next, output)
        }
        Command::LeagueScore {
            match_id,
            home,
            away,
        } => {
            let next = state.update_league_match(match_id, *home, *away)?;
            let output = render::league(&next);
            Outcome::changed(next, output)
        }
        Command::Table => {
            let rows = if state.league().is_some() {
                state.league_standings(settings)?
            } else {
                state.knockout_standings(settings)?
            };
            Outcome::view(render::table(&rows))
        }
        Command::Reset => {
            let next = state.reset_tournament();
            let output = render::overview(&next);
            Outcome::changed(next, output)
        }
    };
    Ok(outcome)
}
