//! Engine error types.

use crate::bracket::{MatchId, MatchLocation};
use crate::competitor::{CompetitorId, Format};
use thiserror::Error;

/// Engine errors
///
/// Every engine operation borrows its input immutably, so an `Err` always
/// means nothing changed: the caller still holds the previous value and may
/// retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Fewer competitors than a structure needs
    #[error("Insufficient competitors: need {needed}, have {current}")]
    InsufficientCompetitors { needed: usize, current: usize },

    /// Round/match position does not exist in the bracket
    #[error("No match at round {}, position {}", .0.round_idx, .0.match_idx)]
    UnknownLocation(MatchLocation),

    /// Match id does not exist
    #[error("Unknown match: {0}")]
    UnknownMatch(MatchId),

    /// Competitor id is not on the roster
    #[error("Unknown competitor: {0}")]
    UnknownCompetitor(CompetitorId),

    /// Match is a bye or is still waiting on a competitor
    #[error("Match {0} is not ready for a score")]
    MatchNotReady(MatchId),

    /// Knockout match ended level while draws are rejected
    #[error("Match {0} ended in a draw; knockout matches need a winner")]
    DrawNotAllowed(MatchId),

    /// No bracket/league has been generated for the format yet
    #[error("No {structure} generated for {format}")]
    NotGenerated {
        format: Format,
        structure: &'static str,
    },

    /// Team composition rejected
    #[error("Invalid team: {0}")]
    InvalidTeam(String),
}

impl EngineError {
    /// Whether the error came from a reference that does not resolve
    pub fn is_unknown_reference(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownLocation(_)
                | EngineError::UnknownMatch(_)
                | EngineError::UnknownCompetitor(_)
        )
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
