//! Seeding and construction of single-elimination brackets.

use super::models::{Bracket, Match, MatchId, NextMatch, Side};
use crate::competitor::{Competitor, CompetitorId};
use crate::errors::{EngineError, EngineResult};
use log::debug;
use rand::{Rng, seq::SliceRandom};

/// Minimum entrants for any tournament structure
pub const MIN_COMPETITORS: usize = 2;

/// Build a bracket with a randomly drawn seeding.
///
/// # Errors
///
/// Returns [`EngineError::InsufficientCompetitors`] for fewer than two
/// competitors.
pub fn build_bracket(competitors: &[Competitor]) -> EngineResult<Bracket> {
    build_bracket_with_rng(competitors, &mut rand::rng())
}

/// Build a bracket drawing the seeding from `rng`.
///
/// The field is padded to the next power of two with byes. Bye holders skip
/// round 0 and are already placed in round 1 when this returns, so round 0
/// always holds `size / 2` entries and each later round halves it.
pub fn build_bracket_with_rng<R: Rng + ?Sized>(
    competitors: &[Competitor],
    rng: &mut R,
) -> EngineResult<Bracket> {
    let n = competitors.len();
    if n < MIN_COMPETITORS {
        return Err(EngineError::InsufficientCompetitors {
            needed: MIN_COMPETITORS,
            current: n,
        });
    }

    let size = n.next_power_of_two();
    let num_byes = size - n;
    let num_regular = (n - num_byes) / 2;

    let mut draw: Vec<CompetitorId> = competitors.iter().map(|c| c.id.clone()).collect();
    draw.shuffle(rng);

    let (playing, resting) = draw.split_at(num_regular * 2);
    let mut first_round: Vec<Match> = playing
        .chunks_exact(2)
        .enumerate()
        .map(|(k, pair)| Match::seeded(MatchId::knockout(0, k), pair[0].clone(), pair[1].clone()))
        .collect();
    first_round.extend(
        resting
            .iter()
            .enumerate()
            .map(|(k, competitor)| Match::bye(MatchId::bye(0, k), competitor.clone())),
    );
    // Spread the byes through the draw.
    first_round.shuffle(rng);

    let mut rounds = vec![first_round];
    loop {
        let round_idx = rounds.len();
        let Some(previous) = rounds.last_mut().filter(|r| r.len() > 1) else {
            break;
        };
        let next_round = link_round(previous, round_idx);
        rounds.push(next_round);
    }

    debug!(
        "Built bracket: {} competitors, {} byes, {} rounds",
        n,
        num_byes,
        rounds.len()
    );

    Ok(Bracket::from_rounds(rounds))
}

/// Pair consecutive matches of `previous` into the matches of `round_idx`,
/// linking each feeder forward and carrying already-decided winners.
fn link_round(previous: &mut [Match], round_idx: usize) -> Vec<Match> {
    let mut next_round = Vec::with_capacity(previous.len() / 2);

    for (k, pair) in previous.chunks_exact_mut(2).enumerate() {
        let [home_feeder, away_feeder] = pair else {
            continue;
        };

        let id = MatchId::knockout(round_idx, k);
        let mut next = Match::fed_by(id.clone(), home_feeder.id.clone(), away_feeder.id.clone());

        for (feeder, side) in [(home_feeder, Side::Home), (away_feeder, Side::Away)] {
            feeder.next = Some(NextMatch::new(id.clone(), side));
            if feeder.completed {
                next.set_slot(side, feeder.winner.clone());
            }
        }

        next_round.push(next);
    }

    next_round
}
