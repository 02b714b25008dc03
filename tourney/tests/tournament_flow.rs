//! Integration tests for the tournament state
//!
//! These tests drive a [`TournamentState`] the way a front end does: roster
//! edits, generating structures, entering results, and persisting the value
//! between steps.

#[cfg(test)]
mod tournament_flow_tests {
    use tourney::{
        CompetitorId, EngineError, EngineSettings, Format, KnockoutTiePolicy, MatchLocation,
        PointsTable, Side, TBD, TournamentState,
    };

    fn id(s: &str) -> CompetitorId {
        CompetitorId::new(s)
    }

    /// Persist and reload, as a front end would between every step.
    fn reload(state: &TournamentState) -> TournamentState {
        let json = serde_json::to_string(state).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    /// Enter `home`-wins results until the bracket has a champion.
    fn play_bracket(mut state: TournamentState, settings: &EngineSettings) -> TournamentState {
        let rounds = state.bracket().unwrap().round_count();
        for round_idx in 0..rounds {
            let len = state.bracket().unwrap().round(round_idx).unwrap().len();
            for match_idx in 0..len {
                let loc = MatchLocation::new(round_idx, match_idx);
                if state.bracket().unwrap().is_editable(loc) {
                    state = reload(&state.update_match(loc, 2, 1, settings).unwrap());
                }
            }
        }
        state
    }

    #[test]
    fn test_singles_knockout_to_champion() {
        let settings = EngineSettings::default();
        let state = TournamentState::sample().generate_bracket().unwrap();
        let bracket = state.bracket().unwrap();

        assert_eq!(bracket.round_count(), 3);
        assert_eq!(bracket.round_name(0).unwrap(), "Quarter-Finals");
        assert_eq!(bracket.round_name(1).unwrap(), "Semi-Finals");
        assert_eq!(bracket.round_name(2).unwrap(), "Final");

        let state = play_bracket(state, &settings);
        let champion = state.champion().unwrap();
        assert_ne!(state.display_name(Some(champion)), TBD);

        let table = state.knockout_standings(&settings).unwrap();
        assert_eq!(&table[0].id, champion);
        assert_eq!(table[0].wins, 3);
        assert_eq!(table.iter().map(|r| r.played).sum::<u32>(), 14);
    }

    #[test]
    fn test_odd_field_uses_byes() {
        let state = TournamentState::sample()
            .remove_player(&id("p8"))
            .unwrap()
            .remove_player(&id("p7"))
            .unwrap()
            .remove_player(&id("p6"))
            .unwrap()
            .generate_bracket()
            .unwrap();

        let first = state.bracket().unwrap().round(0).unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first.iter().filter(|m| m.bye).count(), 3);

        let bye = first.iter().position(|m| m.bye).unwrap();
        let err = state
            .update_match(MatchLocation::new(0, bye), 1, 0, &EngineSettings::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::MatchNotReady(_)));
    }

    #[test]
    fn test_rejecting_draws() {
        let settings = EngineSettings::default().with_tie_policy(KnockoutTiePolicy::Reject);
        let state = TournamentState::sample().generate_bracket().unwrap();
        let loc = MatchLocation::new(0, 0);

        let err = state.update_match(loc, 1, 1, &settings).unwrap_err();
        assert!(matches!(err, EngineError::DrawNotAllowed(_)));

        let drawn = state
            .update_match(loc, 1, 1, &EngineSettings::default())
            .unwrap();
        let m = &drawn.bracket().unwrap().round(0).unwrap()[0];
        assert_eq!(m.winner, m.home);
    }

    #[test]
    fn test_correcting_an_entrant_after_the_final() {
        let settings = EngineSettings::default();
        let state = play_bracket(TournamentState::sample().generate_bracket().unwrap(), &settings);
        assert!(state.champion().is_some());

        let champion = state.champion().unwrap().clone();
        let bracket = state.bracket().unwrap();
        let (match_idx, first) = bracket
            .round(0)
            .unwrap()
            .iter()
            .enumerate()
            .find(|(_, m)| m.involves(&champion))
            .unwrap();
        let side = if first.home.as_ref() == Some(&champion) {
            Side::Home
        } else {
            Side::Away
        };

        // Withdraw the champion from their first match.
        let corrected = state
            .set_match_competitor(MatchLocation::new(0, match_idx), side, None)
            .unwrap();
        assert!(corrected.champion().is_none());
        assert!(!corrected.bracket().unwrap().round(0).unwrap()[match_idx].completed);
    }

    #[test]
    fn test_doubles_league() {
        let settings = EngineSettings::default().with_points(PointsTable {
            win: 2,
            draw: 1,
            loss: 0,
        });
        let mut state = TournamentState::sample()
            .add_team(&[id("p1"), id("p2")])
            .unwrap()
            .add_team(&[id("p3"), id("p4")])
            .unwrap()
            .add_team(&[id("p5"), id("p6")])
            .unwrap()
            .set_format(Format::TwoVsTwo)
            .generate_league()
            .unwrap();

        let league = state.league().unwrap().clone();
        assert_eq!(league.matches.len(), 3);
        assert_eq!(league.round_count(), 3);

        for fixture in &league.matches {
            state = reload(&state.update_league_match(&fixture.id, 1, 1).unwrap());
        }

        let table = state.league_standings(&settings).unwrap();
        assert!(table.iter().all(|r| r.points == 2 && r.draws == 2));
        // Level on everything, so the names decide.
        assert_eq!(table[0].name, "Haaland & De Bruyne");

        let winner = state.league_winner(&settings).unwrap();
        assert_eq!(winner.id, table[0].id);
    }

    #[test]
    fn test_formats_are_independent() {
        let state = TournamentState::sample()
            .add_team(&[id("p1"), id("p2")])
            .unwrap()
            .add_team(&[id("p3"), id("p4")])
            .unwrap()
            .generate_bracket()
            .unwrap()
            .set_format(Format::TwoVsTwo)
            .generate_bracket()
            .unwrap();

        assert_eq!(state.bracket().unwrap().round_count(), 1);
        let state = reload(&state.reset_tournament());
        assert!(state.bracket().is_none());
        assert_eq!(
            state.set_format(Format::OneVsOne).bracket().unwrap().round_count(),
            3
        );
    }

    #[test]
    fn test_unknown_league_match() {
        let state = TournamentState::sample().generate_league().unwrap();
        let err = state
            .update_league_match(&"l99m0".into(), 1, 0)
            .unwrap_err();
        assert!(err.is_unknown_reference());
    }
}
