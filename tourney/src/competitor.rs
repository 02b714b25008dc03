//! Competitor identifiers, players, teams and display-name resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Placeholder shown for a slot with no resolvable competitor.
pub const TBD: &str = "TBD";

/// Opaque competitor identifier (a player id in 1v1, a team id in 2v2).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorId(String);

impl CompetitorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh player id
    pub fn new_player() -> Self {
        Self(format!("p{}", Uuid::new_v4().simple()))
    }

    /// Fresh team id
    pub fn new_team() -> Self {
        Self(format!("team{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CompetitorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CompetitorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single player on the roster
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: CompetitorId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<CompetitorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A 2v2 team; `players` holds member player ids in order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: CompetitorId,
    pub players: Vec<CompetitorId>,
}

/// Tournament format
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Format {
    #[default]
    #[serde(rename = "1v1")]
    OneVsOne,
    #[serde(rename = "2v2")]
    TwoVsTwo,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::OneVsOne, Format::TwoVsTwo];
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::OneVsOne => write!(f, "1v1"),
            Format::TwoVsTwo => write!(f, "2v2"),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1v1" => Ok(Format::OneVsOne),
            "2v2" => Ok(Format::TwoVsTwo),
            other => Err(format!("unknown format '{other}' (expected 1v1 or 2v2)")),
        }
    }
}

/// What the engines see: an id, a resolved display name and, for teams,
/// the member ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<CompetitorId>,
}

impl Competitor {
    pub fn new(id: impl Into<CompetitorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// Players and teams as managed by the roster.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
}

impl Roster {
    pub fn player(&self, id: &CompetitorId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn team(&self, id: &CompetitorId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    /// Display name for a competitor id under `format`.
    ///
    /// Teams render as their members' names joined with `" & "`; anything
    /// unresolvable renders as [`TBD`].
    pub fn display_name(&self, format: Format, id: Option<&CompetitorId>) -> String {
        let Some(id) = id else {
            return TBD.to_string();
        };

        match format {
            Format::OneVsOne => self
                .player(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| TBD.to_string()),
            Format::TwoVsTwo => {
                let Some(team) = self.team(id) else {
                    return TBD.to_string();
                };
                let names: Vec<&str> = team
                    .players
                    .iter()
                    .filter_map(|pid| self.player(pid))
                    .map(|p| p.name.as_str())
                    .collect();
                if names.is_empty() {
                    TBD.to_string()
                } else {
                    names.join(" & ")
                }
            }
        }
    }

    /// Competitor list for `format`: every player in 1v1, every team in 2v2.
    pub fn competitors(&self, format: Format) -> Vec<Competitor> {
        match format {
            Format::OneVsOne => self
                .players
                .iter()
                .map(|p| Competitor {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    members: vec![p.id.clone()],
                })
                .collect(),
            Format::TwoVsTwo => self
                .teams
                .iter()
                .map(|t| Competitor {
                    id: t.id.clone(),
                    name: self.display_name(format, Some(&t.id)),
                    members: t.players.clone(),
                })
                .collect(),
        }
    }
}
