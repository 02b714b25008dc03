//! Bracket data models.

use crate::competitor::CompetitorId;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};

/// Match identifier, unique within one bracket or league.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id of the `k`-th contested match of a knockout round
    pub fn knockout(round_idx: usize, k: usize) -> Self {
        Self(format!("r{round_idx}m{k}"))
    }

    /// Id of the `k`-th bye of a knockout round
    pub fn bye(round_idx: usize, k: usize) -> Self {
        Self(format!("r{round_idx}bye{k}"))
    }

    /// Id of the `k`-th fixture of a league round
    pub fn league(round_idx: usize, k: usize) -> Self {
        Self(format!("l{round_idx}m{k}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for MatchId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One of the two competitor slots of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Side::Home),
            "away" => Ok(Side::Away),
            other => Err(format!("unknown side '{other}' (expected home or away)")),
        }
    }
}

/// Where a match slot gets its competitor from.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum SlotSource {
    /// Nothing feeds this slot (the empty side of a bye)
    #[default]
    Unfilled,
    /// Seeded directly with a competitor
    Competitor(CompetitorId),
    /// Filled by the winner of another match
    Match(MatchId),
}

impl SlotSource {
    pub fn match_id(&self) -> Option<&MatchId> {
        match self {
            SlotSource::Match(id) => Some(id),
            _ => None,
        }
    }
}

/// Downstream link: the match and slot this match's winner feeds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMatch {
    pub match_id: MatchId,
    pub side: Side,
}

impl NextMatch {
    pub fn new(match_id: MatchId, side: Side) -> Self {
        Self { match_id, side }
    }
}

/// Position of a match inside a bracket.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLocation {
    pub round_idx: usize,
    pub match_idx: usize,
}

impl MatchLocation {
    pub fn new(round_idx: usize, match_idx: usize) -> Self {
        Self {
            round_idx,
            match_idx,
        }
    }
}

/// A knockout match
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub home: Option<CompetitorId>,
    pub away: Option<CompetitorId>,
    pub home_source: SlotSource,
    pub away_source: SlotSource,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub completed: bool,
    pub winner: Option<CompetitorId>,
    /// Single-competitor match that needs no score
    pub bye: bool,
    /// `None` only for the final
    pub next: Option<NextMatch>,
}

impl Match {
    /// Contested first-round match between two seeded competitors
    pub fn seeded(id: MatchId, home: CompetitorId, away: CompetitorId) -> Self {
        Self {
            id,
            home: Some(home.clone()),
            away: Some(away.clone()),
            home_source: SlotSource::Competitor(home),
            away_source: SlotSource::Competitor(away),
            home_score: None,
            away_score: None,
            completed: false,
            winner: None,
            bye: false,
            next: None,
        }
    }

    /// First-round bye; already decided in favor of its only competitor
    pub fn bye(id: MatchId, competitor: CompetitorId) -> Self {
        Self {
            id,
            home: Some(competitor.clone()),
            away: None,
            home_source: SlotSource::Competitor(competitor.clone()),
            away_source: SlotSource::Unfilled,
            home_score: None,
            away_score: None,
            completed: true,
            winner: Some(competitor),
            bye: true,
            next: None,
        }
    }

    /// Later-round match fed by the winners of two earlier matches
    pub fn fed_by(id: MatchId, home: MatchId, away: MatchId) -> Self {
        Self {
            id,
            home: None,
            away: None,
            home_source: SlotSource::Match(home),
            away_source: SlotSource::Match(away),
            home_score: None,
            away_score: None,
            completed: false,
            winner: None,
            bye: false,
            next: None,
        }
    }

    pub fn slot(&self, side: Side) -> Option<&CompetitorId> {
        match side {
            Side::Home => self.home.as_ref(),
            Side::Away => self.away.as_ref(),
        }
    }

    pub fn set_slot(&mut self, side: Side, competitor: Option<CompetitorId>) {
        match side {
            Side::Home => self.home = competitor,
            Side::Away => self.away = competitor,
        }
    }

    pub fn source(&self, side: Side) -> &SlotSource {
        match side {
            Side::Home => &self.home_source,
            Side::Away => &self.away_source,
        }
    }

    pub fn home_source_id(&self) -> Option<&MatchId> {
        self.source(Side::Home).match_id()
    }

    pub fn away_source_id(&self) -> Option<&MatchId> {
        self.source(Side::Away).match_id()
    }

    /// Both competitors known and not a bye
    pub fn is_ready(&self) -> bool {
        !self.bye && self.home.is_some() && self.away.is_some()
    }

    pub fn is_final(&self) -> bool {
        self.next.is_none()
    }

    /// Loser of a completed contested match
    pub fn loser(&self) -> Option<&CompetitorId> {
        if !self.completed || self.bye {
            return None;
        }
        let winner = self.winner.as_ref()?;
        if self.home.as_ref() == Some(winner) {
            self.away.as_ref()
        } else {
            self.home.as_ref()
        }
    }

    pub fn involves(&self, competitor: &CompetitorId) -> bool {
        self.home.as_ref() == Some(competitor) || self.away.as_ref() == Some(competitor)
    }

    /// Drop the recorded result.
    pub(crate) fn reset_result(&mut self) {
        self.completed = false;
        self.winner = None;
        self.home_score = None;
        self.away_score = None;
    }

    /// Re-derive a bye's outcome from whichever slot is occupied.
    pub(crate) fn resolve_bye(&mut self) {
        self.winner = self.home.clone().or_else(|| self.away.clone());
        self.completed = self.winner.is_some();
    }
}

/// Serialized form; the id lookup is derived and rebuilt on load.
#[derive(Serialize, Deserialize)]
struct BracketData {
    rounds: Vec<Arc<Vec<Match>>>,
}

/// A single-elimination bracket.
///
/// Rounds are shared copy-on-write: cloning a bracket only bumps reference
/// counts and an update copies just the rounds it writes to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BracketData", into = "BracketData")]
pub struct Bracket {
    rounds: Vec<Arc<Vec<Match>>>,
    lookup: Arc<HashMap<MatchId, MatchLocation>>,
}

impl From<BracketData> for Bracket {
    fn from(data: BracketData) -> Self {
        let lookup = index_rounds(&data.rounds);
        Self {
            rounds: data.rounds,
            lookup: Arc::new(lookup),
        }
    }
}

impl From<Bracket> for BracketData {
    fn from(bracket: Bracket) -> Self {
        Self {
            rounds: bracket.rounds,
        }
    }
}

fn index_rounds(rounds: &[Arc<Vec<Match>>]) -> HashMap<MatchId, MatchLocation> {
    rounds
        .iter()
        .enumerate()
        .flat_map(|(round_idx, round)| {
            round
                .iter()
                .enumerate()
                .map(move |(match_idx, m)| (m.id.clone(), MatchLocation::new(round_idx, match_idx)))
        })
        .collect()
}

impl Bracket {
    /// Assemble a bracket from finished rounds and index it.
    pub fn from_rounds(rounds: Vec<Vec<Match>>) -> Self {
        BracketData {
            rounds: rounds.into_iter().map(Arc::new).collect(),
        }
        .into()
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn round(&self, round_idx: usize) -> Option<&[Match]> {
        self.rounds.get(round_idx).map(|r| r.as_slice())
    }

    pub fn rounds(&self) -> impl Iterator<Item = &[Match]> {
        self.rounds.iter().map(|r| r.as_slice())
    }

    /// Every match, round by round
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.iter())
    }

    pub fn get(&self, loc: MatchLocation) -> Option<&Match> {
        self.rounds.get(loc.round_idx)?.get(loc.match_idx)
    }

    pub fn locate(&self, id: &MatchId) -> Option<MatchLocation> {
        self.lookup.get(id).copied()
    }

    pub fn match_by_id(&self, id: &MatchId) -> Option<&Match> {
        self.get(self.locate(id)?)
    }

    /// Mutable access; copies the round first if it is shared.
    pub(crate) fn match_mut(&mut self, loc: MatchLocation) -> Option<&mut Match> {
        let round = self.rounds.get_mut(loc.round_idx)?;
        Arc::make_mut(round).get_mut(loc.match_idx)
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last()?.first()
    }

    /// Winner of the final, once it has been played
    pub fn champion(&self) -> Option<&CompetitorId> {
        self.final_match()
            .filter(|m| m.completed)
            .and_then(|m| m.winner.as_ref())
    }

    /// Whether a score can be entered at `loc`
    pub fn is_editable(&self, loc: MatchLocation) -> bool {
        self.get(loc).is_some_and(Match::is_ready)
    }

    /// Human label for a round, counted back from the final.
    pub fn round_name(&self, round_idx: usize) -> Option<String> {
        let matches = self.round(round_idx)?.len();
        let from_final = self.rounds.len() - 1 - round_idx;

        let name = match from_final {
            0 => "Final".to_string(),
            1 => "Semi-Finals".to_string(),
            2 if matches == 4 => "Quarter-Finals".to_string(),
            _ => format!("Round of {}", matches * 2),
        };
        Some(name)
    }
}
