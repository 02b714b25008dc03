//! League data models.

use crate::bracket::MatchId;
use crate::competitor::CompetitorId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A round-robin fixture
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueMatch {
    pub id: MatchId,
    /// Round-robin round (0-based)
    pub round_idx: usize,
    pub home: CompetitorId,
    pub away: CompetitorId,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub completed: bool,
    /// `None` until played, and on a draw
    pub winner: Option<CompetitorId>,
}

impl LeagueMatch {
    pub fn new(id: MatchId, round_idx: usize, home: CompetitorId, away: CompetitorId) -> Self {
        Self {
            id,
            round_idx,
            home,
            away,
            home_score: None,
            away_score: None,
            completed: false,
            winner: None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.completed && self.home_score.is_some() && self.home_score == self.away_score
    }

    pub fn involves(&self, competitor: &CompetitorId) -> bool {
        &self.home == competitor || &self.away == competitor
    }
}

/// A round-robin league: fixtures in creation order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub matches: Vec<LeagueMatch>,
}

impl League {
    pub fn new(matches: Vec<LeagueMatch>) -> Self {
        Self { matches }
    }

    pub fn get(&self, id: &MatchId) -> Option<&LeagueMatch> {
        self.matches.iter().find(|m| &m.id == id)
    }

    pub(crate) fn position(&self, id: &MatchId) -> Option<usize> {
        self.matches.iter().position(|m| &m.id == id)
    }

    /// Fixtures grouped by round, rounds ascending
    pub fn rounds(&self) -> BTreeMap<usize, Vec<&LeagueMatch>> {
        let mut rounds: BTreeMap<usize, Vec<&LeagueMatch>> = BTreeMap::new();
        for m in &self.matches {
            rounds.entry(m.round_idx).or_default().push(m);
        }
        rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds().len()
    }

    /// One round's fixtures (one page of the fixture list)
    pub fn round(&self, round_idx: usize) -> Vec<&LeagueMatch> {
        self.matches
            .iter()
            .filter(|m| m.round_idx == round_idx)
            .collect()
    }

    /// Every fixture has a result
    pub fn is_finished(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(|m| m.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.matches.iter().filter(|m| m.completed).count()
    }
}
