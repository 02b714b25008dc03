//! Round-robin scheduling (circle method) and league score entry.

use super::models::{League, LeagueMatch};
use crate::bracket::{MIN_COMPETITORS, MatchId};
use crate::competitor::{Competitor, CompetitorId};
use crate::errors::{EngineError, EngineResult};
use log::debug;
use std::cmp::Ordering;

/// Build a single round-robin in which everyone meets everyone once.
///
/// An odd field is padded with a rest slot; whoever is paired with it sits
/// that round out and no fixture is created.
///
/// # Errors
///
/// Returns [`EngineError::InsufficientCompetitors`] for fewer than two
/// competitors.
pub fn build_league(competitors: &[Competitor]) -> EngineResult<League> {
    let n = competitors.len();
    if n < MIN_COMPETITORS {
        return Err(EngineError::InsufficientCompetitors {
            needed: MIN_COMPETITORS,
            current: n,
        });
    }

    let mut circle: Vec<Option<&CompetitorId>> = competitors.iter().map(|c| Some(&c.id)).collect();
    if circle.len() % 2 == 1 {
        circle.push(None);
    }
    let slots = circle.len();

    let mut matches = Vec::with_capacity(n * (n - 1) / 2);
    for round_idx in 0..slots - 1 {
        let mut k = 0;
        for i in 0..slots / 2 {
            if let (Some(home), Some(away)) = (circle[i], circle[slots - 1 - i]) {
                matches.push(LeagueMatch::new(
                    MatchId::league(round_idx, k),
                    round_idx,
                    home.clone(),
                    away.clone(),
                ));
                k += 1;
            }
        }
        // Position 0 stays put; the rest turn one step.
        circle[1..].rotate_right(1);
    }

    debug!(
        "Built league: {} competitors, {} rounds, {} fixtures",
        n,
        slots - 1,
        matches.len()
    );

    Ok(League::new(matches))
}

/// Record a league result. Level scores are draws.
///
/// # Errors
///
/// Returns [`EngineError::UnknownMatch`] if `match_id` is not in the league.
pub fn apply_league_score(
    league: &League,
    match_id: &MatchId,
    home_score: u32,
    away_score: u32,
) -> EngineResult<League> {
    let idx = league
        .position(match_id)
        .ok_or_else(|| EngineError::UnknownMatch(match_id.clone()))?;

    let mut updated = league.clone();
    let fixture = &mut updated.matches[idx];
    fixture.home_score = Some(home_score);
    fixture.away_score = Some(away_score);
    fixture.completed = true;
    fixture.winner = match home_score.cmp(&away_score) {
        Ordering::Greater => Some(fixture.home.clone()),
        Ordering::Less => Some(fixture.away.clone()),
        Ordering::Equal => None,
    };

    Ok(updated)
}
