//! Integration tests for the CLI workflow
//!
//! Each step mirrors one invocation of the binary: load the snapshot, parse
//! and execute a command, save if the state changed.

use std::path::Path;
use tempfile::TempDir;
use tourney::{EngineSettings, Format, KnockoutTiePolicy};
use tourney_cli::{
    commands::{Outcome, execute, parse_command},
    store,
};

fn run(path: &Path, input: &str, settings: &EngineSettings) -> anyhow::Result<Outcome> {
    let words: Vec<String> = input.split_whitespace().map(str::to_string).collect();
    let command = parse_command(&words)?;
    let state = store::load(path)?;
    let outcome = execute(&command, &state, settings)?;
    if let Some(next) = &outcome.state {
        store::save(path, next)?;
    }
    Ok(outcome)
}

#[test]
fn test_knockout_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cup.json");
    let settings = EngineSettings::default();

    run(&path, "bracket", &settings).unwrap();
    for match_idx in 0..4 {
        run(&path, &format!("score 0 {match_idx} 2 0"), &settings).unwrap();
    }
    run(&path, "score 1 0 1 0", &settings).unwrap();
    run(&path, "score 1 1 0 1", &settings).unwrap();
    let outcome = run(&path, "score 2 0 3 2", &settings).unwrap();
    assert!(outcome.output.contains("Champion:"));

    let state = store::load(&path).unwrap();
    let champion = state.champion().unwrap();
    let table = run(&path, "table", &settings).unwrap();
    assert!(table.state.is_none());
    assert!(table.output.contains(&state.display_name(Some(champion))));
}

#[test]
fn test_rejected_command_leaves_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cup.json");
    let settings = EngineSettings::default().with_tie_policy(KnockoutTiePolicy::Reject);

    run(&path, "bracket", &settings).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    assert!(run(&path, "score 0 0 1 1", &settings).is_err());
    assert!(run(&path, "score 9 0 1 0", &settings).is_err());
    assert!(run(&path, "remove-player nobody", &settings).is_err());
    assert!(run(&path, "frobnicate", &settings).is_err());

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_doubles_league_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("league.json");
    let settings = EngineSettings::default();

    run(&path, "add-team p1 p2", &settings).unwrap();
    run(&path, "add-team p3 p4", &settings).unwrap();
    run(&path, "format 2v2", &settings).unwrap();
    let outcome = run(&path, "league", &settings).unwrap();
    assert!(outcome.output.contains("Neymar & Mbappé"));

    let state = store::load(&path).unwrap();
    assert_eq!(state.active_format, Format::TwoVsTwo);
    let fixture = state.league().unwrap().matches[0].id.clone();

    run(&path, &format!("league-score {fixture} -1 2"), &settings).unwrap();
    let state = store::load(&path).unwrap();
    let played = &state.league().unwrap().matches[0];
    assert_eq!(played.home_score, Some(0));
    assert_eq!(played.away_score, Some(2));
    assert!(state.league_winner(&settings).is_some());
}

#[test]
fn test_roster_edit_invalidates_bracket() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cup.json");
    let settings = EngineSettings::default();

    run(&path, "bracket", &settings).unwrap();
    run(&path, "add-player Kylian Junior", &settings).unwrap();

    let state = store::load(&path).unwrap();
    assert!(state.bracket().is_none());
    assert!(
        state
            .roster
            .players
            .iter()
            .any(|p| p.name == "Kylian Junior")
    );
}
