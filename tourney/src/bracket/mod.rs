//! Single-elimination brackets.
//!
//! - [`builder`]: random draw, bye placement and round linking
//! - [`propagate`]: score entry and competitor reassignment, with results
//!   carried forward (or invalidated) along the bracket tree
//! - [`models`]: matches, slots and the bracket itself
//!
//! ## Example
//!
//! ```
//! use tourney::bracket::{apply_score, build_bracket};
//! use tourney::competitor::Competitor;
//!
//! let field: Vec<Competitor> = ["Ada", "Bo", "Cy", "Di"]
//!     .iter()
//!     .map(|name| Competitor::new(name.to_lowercase(), *name))
//!     .collect();
//!
//! let bracket = build_bracket(&field).unwrap();
//! assert_eq!(bracket.round_count(), 2);
//!
//! let bracket = apply_score(&bracket, 0, 0, 3, 1).unwrap();
//! assert!(bracket.final_match().unwrap().home.is_some());
//! ```

pub mod builder;
pub mod models;
pub mod propagate;

pub use builder::{MIN_COMPETITORS, build_bracket, build_bracket_with_rng};
pub use models::{Bracket, Match, MatchId, MatchLocation, NextMatch, Side, SlotSource};
pub use propagate::{apply_score, apply_score_with, set_match_competitor};
