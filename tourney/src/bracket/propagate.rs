//! Result entry and forward propagation through a bracket.
//!
//! Both entry points return a new [`Bracket`] and leave the input untouched.
//! Propagation walks the `next` links with an explicit cursor, so the work per
//! call is bounded by the number of rounds.

use super::models::{Bracket, MatchLocation, Side};
use crate::competitor::CompetitorId;
use crate::errors::{EngineError, EngineResult};
use crate::settings::KnockoutTiePolicy;
use log::{debug, warn};
use std::cmp::Ordering;

/// Record a score and advance the winner.
///
/// A level score sends the home competitor through. Use
/// [`apply_score_with`] to choose a different [`KnockoutTiePolicy`].
pub fn apply_score(
    bracket: &Bracket,
    round_idx: usize,
    match_idx: usize,
    home_score: u32,
    away_score: u32,
) -> EngineResult<Bracket> {
    apply_score_with(
        bracket,
        round_idx,
        match_idx,
        home_score,
        away_score,
        KnockoutTiePolicy::default(),
    )
}

/// Record a score under `tie_policy` and advance the winner.
///
/// The winner is written into the downstream slot. Byes on the way are
/// resolved and passed through; the first contested match reached is
/// invalidated if it already had a result, and propagation stops there.
///
/// # Errors
///
/// - [`EngineError::UnknownLocation`] if there is no match at the position
/// - [`EngineError::MatchNotReady`] for a bye or a match missing a competitor
/// - [`EngineError::DrawNotAllowed`] for a level score under
///   [`KnockoutTiePolicy::Reject`]
pub fn apply_score_with(
    bracket: &Bracket,
    round_idx: usize,
    match_idx: usize,
    home_score: u32,
    away_score: u32,
    tie_policy: KnockoutTiePolicy,
) -> EngineResult<Bracket> {
    let loc = MatchLocation::new(round_idx, match_idx);
    let current = bracket.get(loc).ok_or(EngineError::UnknownLocation(loc))?;

    if !current.is_ready() {
        return Err(EngineError::MatchNotReady(current.id.clone()));
    }

    let winning_side = match home_score.cmp(&away_score) {
        Ordering::Greater => Side::Home,
        Ordering::Less => Side::Away,
        Ordering::Equal => match tie_policy {
            KnockoutTiePolicy::Home => Side::Home,
            KnockoutTiePolicy::Reject => {
                return Err(EngineError::DrawNotAllowed(current.id.clone()));
            }
        },
    };

    let mut updated = bracket.clone();
    let scored = updated
        .match_mut(loc)
        .ok_or(EngineError::UnknownLocation(loc))?;
    scored.home_score = Some(home_score);
    scored.away_score = Some(away_score);
    scored.completed = true;
    scored.winner = scored.slot(winning_side).cloned();

    debug!(
        "Scored {} {}-{}, winner {:?}",
        scored.id, home_score, away_score, scored.winner
    );

    advance_winner(&mut updated, loc);
    Ok(updated)
}

/// Put `competitor` (or nobody) into one slot of a match.
///
/// A bye re-derives its winner from whichever slot is occupied. A contested
/// match that had a result is reset, since the result belonged to a different
/// pairing. Every completed match downstream that depended on the old
/// occupant is then reset in turn until an undecided match is reached.
///
/// # Errors
///
/// Returns [`EngineError::UnknownLocation`] if there is no match at the
/// position.
pub fn set_match_competitor(
    bracket: &Bracket,
    round_idx: usize,
    match_idx: usize,
    side: Side,
    competitor: Option<CompetitorId>,
) -> EngineResult<Bracket> {
    let loc = MatchLocation::new(round_idx, match_idx);
    let mut updated = bracket.clone();
    let target = updated
        .match_mut(loc)
        .ok_or(EngineError::UnknownLocation(loc))?;

    target.set_slot(side, competitor);
    if target.bye {
        target.resolve_bye();
    } else if target.completed {
        debug!("Reset {} after {} slot changed", target.id, side);
        target.reset_result();
    }

    cascade(&mut updated, loc);
    Ok(updated)
}

/// Forward step used by score entry: one contested match deep.
fn advance_winner(bracket: &mut Bracket, from: MatchLocation) {
    let mut cursor = from;
    loop {
        let Some((link, winner)) = bracket
            .get(cursor)
            .and_then(|m| Some((m.next.clone()?, m.winner.clone())))
        else {
            return;
        };
        let Some(next_loc) = bracket.locate(&link.match_id) else {
            warn!("Dangling link to {}", link.match_id);
            return;
        };
        let Some(next) = bracket.match_mut(next_loc) else {
            return;
        };

        next.set_slot(link.side, winner);
        if next.bye {
            next.resolve_bye();
            cursor = next_loc;
            continue;
        }
        if next.completed {
            debug!("Invalidated {} after upstream result changed", next.id);
            next.reset_result();
        }
        return;
    }
}

/// Forward step used by competitor reassignment: runs until a fixed point.
///
/// Each match pushes its winner forward, or nothing if it is undecided.
fn cascade(bracket: &mut Bracket, from: MatchLocation) {
    let mut cursor = from;
    loop {
        let Some((link, carried)) = bracket.get(cursor).and_then(|m| {
            let carried = if m.completed { m.winner.clone() } else { None };
            Some((m.next.clone()?, carried))
        }) else {
            return;
        };
        let Some(next_loc) = bracket.locate(&link.match_id) else {
            warn!("Dangling link to {}", link.match_id);
            return;
        };
        let Some(next) = bracket.match_mut(next_loc) else {
            return;
        };

        next.set_slot(link.side, carried);
        if next.bye {
            next.resolve_bye();
        } else if next.completed {
            debug!("Invalidated {} after upstream competitor changed", next.id);
            next.reset_result();
        } else {
            return;
        }
        cursor = next_loc;
    }
}
