/// Property-based tests for bracket and league construction using proptest
///
/// These tests check the structural guarantees of generated brackets and
/// leagues, and that result propagation keeps a bracket consistent, across
/// a wide range of field sizes and random draws.
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::{HashMap, HashSet};
use tourney::{
    Bracket, Competitor, CompetitorId, MatchLocation, Side, apply_league_score, apply_score,
    bracket::build_bracket_with_rng, build_league, set_match_competitor, standings,
};

fn field(n: usize) -> Vec<Competitor> {
    (0..n)
        .map(|i| Competitor::new(format!("c{i}"), format!("Competitor {i}")))
        .collect()
}

fn draw(n: usize, seed: u64) -> Bracket {
    build_bracket_with_rng(&field(n), &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Play every match round by round with decisive scores from `scores`.
fn play_out(mut bracket: Bracket, scores: &[(u32, u32)]) -> Bracket {
    let mut k = 0;
    for round_idx in 0..bracket.round_count() {
        let len = bracket.round(round_idx).unwrap().len();
        for match_idx in 0..len {
            let loc = MatchLocation::new(round_idx, match_idx);
            if !bracket.is_editable(loc) {
                continue;
            }
            let (home, away) = scores[k % scores.len()];
            k += 1;
            bracket = apply_score(&bracket, round_idx, match_idx, home, away).unwrap();
        }
    }
    bracket
}

// Decisive knockout scores
fn score_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..6, 0u32..6).prop_filter("no draws", |(h, a)| h != a)
}

proptest! {
    #[test]
    fn test_round_count_is_log2_of_field(n in 2usize..64, seed in any::<u64>()) {
        let bracket = draw(n, seed);
        let expected = n.next_power_of_two().trailing_zeros() as usize;
        prop_assert_eq!(bracket.round_count(), expected);
    }

    #[test]
    fn test_round_sizes_halve(n in 2usize..64, seed in any::<u64>()) {
        let bracket = draw(n, seed);
        let size = n.next_power_of_two();
        for (round_idx, round) in bracket.rounds().enumerate() {
            prop_assert_eq!(round.len(), size >> (round_idx + 1));
        }
        prop_assert_eq!(bracket.round(bracket.round_count() - 1).unwrap().len(), 1);
    }

    #[test]
    fn test_bye_count_fills_to_power_of_two(n in 2usize..64, seed in any::<u64>()) {
        let bracket = draw(n, seed);
        let byes = bracket.round(0).unwrap().iter().filter(|m| m.bye).count();
        prop_assert_eq!(byes, n.next_power_of_two() - n);
        prop_assert!(bracket.round(0).unwrap().iter().filter(|m| m.bye).all(|m| m.completed));
        prop_assert!(bracket.matches().skip(bracket.round(0).unwrap().len()).all(|m| !m.bye));
    }

    #[test]
    fn test_each_competitor_enters_once(n in 2usize..64, seed in any::<u64>()) {
        let bracket = draw(n, seed);
        let mut seen = HashSet::new();
        for m in bracket.round(0).unwrap() {
            for c in [&m.home, &m.away].into_iter().flatten() {
                prop_assert!(seen.insert(c.clone()));
            }
        }
        prop_assert_eq!(seen.len(), n);
    }

    #[test]
    fn test_played_out_bracket_crowns_a_champion(
        n in 2usize..40,
        seed in any::<u64>(),
        scores in prop::collection::vec(score_strategy(), 1..16),
    ) {
        let bracket = play_out(draw(n, seed), &scores);
        let champion = bracket.champion().cloned();
        prop_assert!(champion.is_some());
        let champion = champion.unwrap();

        // The champion won every match they played.
        for m in bracket.matches().filter(|m| m.involves(&champion)) {
            prop_assert!(m.completed);
            prop_assert_eq!(m.winner.as_ref(), Some(&champion));
        }

        // Every decided winner was one of the two sides.
        for m in bracket.matches().filter(|m| m.completed && !m.bye) {
            let winner = m.winner.as_ref().unwrap();
            prop_assert!(Some(winner) == m.home.as_ref() || Some(winner) == m.away.as_ref());
            prop_assert!(m.loser().is_some());
        }
    }

    #[test]
    fn test_winners_fill_their_next_slot(
        n in 2usize..40,
        seed in any::<u64>(),
        scores in prop::collection::vec(score_strategy(), 1..16),
    ) {
        let bracket = play_out(draw(n, seed), &scores);
        for m in bracket.matches().filter(|m| m.completed) {
            if let Some(link) = &m.next {
                let next = bracket.match_by_id(&link.match_id).unwrap();
                prop_assert_eq!(next.slot(link.side), m.winner.as_ref());
            }
        }
    }

    #[test]
    fn test_clearing_a_slot_unwinds_downstream(
        n in 2usize..40,
        seed in any::<u64>(),
        scores in prop::collection::vec(score_strategy(), 1..16),
    ) {
        let played = play_out(draw(n, seed), &scores);
        let match_idx = played
            .round(0)
            .unwrap()
            .iter()
            .position(|m| !m.bye)
            .unwrap();

        let cleared = set_match_competitor(&played, 0, match_idx, Side::Home, None).unwrap();
        let first = &cleared.round(0).unwrap()[match_idx];
        prop_assert!(!first.completed);
        prop_assert!(first.winner.is_none());

        // Everything on the path to the final is unplayed again.
        let mut link = first.next.clone();
        while let Some(next) = link {
            let m = cleared.match_by_id(&next.match_id).unwrap();
            prop_assert!(!m.completed);
            link = m.next.clone();
        }
        prop_assert!(cleared.champion().is_none());

        // The original value is unchanged.
        prop_assert!(played.champion().is_some());
    }

    #[test]
    fn test_league_pairs_everyone_once(n in 2usize..24) {
        let league = build_league(&field(n)).unwrap();
        prop_assert_eq!(league.matches.len(), n * (n - 1) / 2);

        let mut pairs = HashSet::new();
        let mut appearances: HashMap<CompetitorId, usize> = HashMap::new();
        for m in &league.matches {
            prop_assert_ne!(&m.home, &m.away);
            let pair = if m.home < m.away {
                (m.home.clone(), m.away.clone())
            } else {
                (m.away.clone(), m.home.clone())
            };
            prop_assert!(pairs.insert(pair));
            *appearances.entry(m.home.clone()).or_default() += 1;
            *appearances.entry(m.away.clone()).or_default() += 1;
        }
        prop_assert_eq!(appearances.len(), n);
        prop_assert!(appearances.values().all(|&count| count == n - 1));
    }

    #[test]
    fn test_league_rounds_are_disjoint(n in 2usize..24) {
        let league = build_league(&field(n)).unwrap();
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        prop_assert_eq!(league.round_count(), expected_rounds);

        for (_, fixtures) in league.rounds() {
            let mut busy = HashSet::new();
            for m in fixtures {
                prop_assert!(busy.insert(m.home.clone()));
                prop_assert!(busy.insert(m.away.clone()));
            }
        }
    }

    #[test]
    fn test_standings_are_consistent(
        n in 2usize..12,
        scores in prop::collection::vec((0u32..5, 0u32..5), 1..40),
    ) {
        let competitors = field(n);
        let mut league = build_league(&competitors).unwrap();
        let ids: Vec<_> = league.matches.iter().map(|m| m.id.clone()).collect();
        for (id, (home, away)) in ids.iter().zip(scores.iter().cycle()) {
            league = apply_league_score(&league, id, *home, *away).unwrap();
        }

        let rows = standings(&competitors, &league.matches);
        prop_assert_eq!(&rows, &standings(&competitors, &league.matches));
        prop_assert_eq!(rows.len(), n);

        let wins: u32 = rows.iter().map(|r| r.wins).sum();
        let losses: u32 = rows.iter().map(|r| r.losses).sum();
        let goals_for: u64 = rows.iter().map(|r| r.goals_for).sum();
        let goals_against: u64 = rows.iter().map(|r| r.goals_against).sum();
        prop_assert_eq!(wins, losses);
        prop_assert_eq!(goals_for, goals_against);

        for pair in rows.windows(2) {
            prop_assert!(pair[0].points >= pair[1].points);
        }
    }
}
