//! League table / knockout table projection.
//!
//! Standings are recomputed from scratch on every call; nothing is cached.
//! Ordering is total (points, goal difference, goals for, name, id), so the
//! same input always gives the same table.

use crate::bracket::Match;
use crate::competitor::{Competitor, CompetitorId};
use crate::league::{League, LeagueMatch};
use crate::settings::PointsTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anything that can contribute a result to a table.
pub trait ScoredMatch {
    fn home(&self) -> Option<&CompetitorId>;
    fn away(&self) -> Option<&CompetitorId>;
    /// `(home, away)` once the match is completed with both scores known
    fn final_score(&self) -> Option<(u32, u32)>;
}

impl ScoredMatch for Match {
    fn home(&self) -> Option<&CompetitorId> {
        self.home.as_ref()
    }

    fn away(&self) -> Option<&CompetitorId> {
        self.away.as_ref()
    }

    fn final_score(&self) -> Option<(u32, u32)> {
        if !self.completed {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }
}

impl ScoredMatch for LeagueMatch {
    fn home(&self) -> Option<&CompetitorId> {
        Some(&self.home)
    }

    fn away(&self) -> Option<&CompetitorId> {
        Some(&self.away)
    }

    fn final_score(&self) -> Option<(u32, u32)> {
        if !self.completed {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }
}

/// One line of the table
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub id: CompetitorId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<CompetitorId>,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u64,
    /// Wins as a rounded percentage of matches played
    pub win_percentage: u32,
}

impl StandingsRow {
    fn empty(competitor: &Competitor) -> Self {
        Self {
            id: competitor.id.clone(),
            name: competitor.name.clone(),
            members: competitor.members.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            win_percentage: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(u64::from(scored));
        self.goals_against = self.goals_against.saturating_add(u64::from(conceded));
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
        }
    }

    fn finish(&mut self, points: &PointsTable) {
        let signed = |goals: u64| i64::try_from(goals).unwrap_or(i64::MAX);
        self.goal_difference = signed(self.goals_for).saturating_sub(signed(self.goals_against));
        self.points = [
            (self.wins, points.win),
            (self.draws, points.draw),
            (self.losses, points.loss),
        ]
        .into_iter()
        .fold(0u64, |total, (count, each)| {
            total.saturating_add(u64::from(count).saturating_mul(u64::from(each)))
        });
        self.win_percentage = if self.played == 0 {
            0
        } else {
            // Integer round-half-up of 100 * wins / played.
            let (wins, played) = (u64::from(self.wins), u64::from(self.played));
            u32::try_from((200 * wins + played) / (2 * played)).unwrap_or(100)
        };
    }
}

/// Compute the table with the default 3/1/0 points.
pub fn standings<'a, M, I>(competitors: &[Competitor], matches: I) -> Vec<StandingsRow>
where
    M: ScoredMatch + 'a,
    I: IntoIterator<Item = &'a M>,
{
    standings_with(competitors, matches, &PointsTable::default())
}

/// Compute the table with a custom points table.
///
/// Only completed matches with both scores count; byes and unplayed fixtures
/// are skipped. Matches against competitors outside `competitors` still
/// count for the side that is listed.
pub fn standings_with<'a, M, I>(
    competitors: &[Competitor],
    matches: I,
    points: &PointsTable,
) -> Vec<StandingsRow>
where
    M: ScoredMatch + 'a,
    I: IntoIterator<Item = &'a M>,
{
    let mut rows: Vec<StandingsRow> = competitors.iter().map(StandingsRow::empty).collect();
    let index: HashMap<CompetitorId, usize> = competitors
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();

    for m in matches {
        let Some((home_score, away_score)) = m.final_score() else {
            continue;
        };
        if let Some(&i) = m.home().and_then(|id| index.get(id)) {
            rows[i].record(home_score, away_score);
        }
        if let Some(&i) = m.away().and_then(|id| index.get(id)) {
            rows[i].record(away_score, home_score);
        }
    }

    for row in &mut rows {
        row.finish(points);
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}

/// Top of the table once every fixture is played.
pub fn league_winner<'a>(rows: &'a [StandingsRow], league: &League) -> Option<&'a StandingsRow> {
    if !league.is_finished() {
        return None;
    }
    rows.first().filter(|row| row.played > 0)
}
