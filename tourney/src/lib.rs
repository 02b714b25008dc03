//! # Tourney
//!
//! A tournament structure engine: single-elimination brackets with byes and
//! round-robin leagues for 1v1 (players) or 2v2 (teams) competitions.
//!
//! Every structure is a plain value. Operations borrow their input and hand
//! back a new value, so a front end can keep the previous state for undo or
//! compare the two, and an `Err` never leaves anything half-updated.
//!
//! ## Core Modules
//!
//! - [`competitor`]: player and team rosters and display-name resolution
//! - [`bracket`]: bracket construction, score entry and result propagation
//! - [`league`]: round-robin scheduling and league results
//! - [`standings`]: league tables computed from any set of played matches
//! - [`state`]: the persisted, format-keyed tournament state
//!
//! ## Example
//!
//! ```
//! use tourney::{EngineSettings, MatchLocation, TournamentState};
//!
//! let settings = EngineSettings::default();
//! let state = TournamentState::sample().generate_bracket().unwrap();
//! let state = state
//!     .update_match(MatchLocation::new(0, 0), 2, 0, &settings)
//!     .unwrap();
//!
//! assert!(state.bracket().unwrap().round(0).unwrap()[0].completed);
//! ```

/// Single-elimination brackets.
pub mod bracket;
pub use bracket::{
    Bracket, Match, MatchId, MatchLocation, Side, SlotSource, apply_score, apply_score_with,
    build_bracket, set_match_competitor,
};

/// Players, teams and competitor identity.
pub mod competitor;
pub use competitor::{Competitor, CompetitorId, Format, Player, Roster, TBD, Team};

pub mod errors;
pub use errors::{EngineError, EngineResult};

/// Round-robin leagues.
pub mod league;
pub use league::{League, LeagueMatch, apply_league_score, build_league};

pub mod settings;
pub use settings::{EngineSettings, KnockoutTiePolicy, PointsTable};

pub mod standings;
pub use standings::{StandingsRow, league_winner, standings, standings_with};

pub mod state;
pub use state::{PerFormat, TournamentState};
