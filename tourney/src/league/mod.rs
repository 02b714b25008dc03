//! Round-robin leagues.

pub mod models;
pub mod scheduler;

pub use models::{League, LeagueMatch};
pub use scheduler::{apply_league_score, build_league};
