//! Format-keyed tournament state.
//!
//! [`TournamentState`] is the value a front end persists after every change.
//! Each operation takes `&self` and returns the next state; on `Err` the
//! caller simply keeps the value it already has (last write wins).

use crate::bracket::{self, Bracket, MatchId, MatchLocation, Side, apply_score_with, build_bracket};
use crate::competitor::{Competitor, CompetitorId, Format, Player, Roster, Team};
use crate::errors::{EngineError, EngineResult};
use crate::league::{League, apply_league_score, build_league};
use crate::settings::EngineSettings;
use crate::standings::{self, StandingsRow, standings_with};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// One optional value per [`Format`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerFormat<T> {
    #[serde(rename = "1v1")]
    pub one_vs_one: Option<T>,
    #[serde(rename = "2v2")]
    pub two_vs_two: Option<T>,
}

impl<T> Default for PerFormat<T> {
    fn default() -> Self {
        Self {
            one_vs_one: None,
            two_vs_two: None,
        }
    }
}

impl<T: Clone> PerFormat<T> {
    pub fn get(&self, format: Format) -> Option<&T> {
        match format {
            Format::OneVsOne => self.one_vs_one.as_ref(),
            Format::TwoVsTwo => self.two_vs_two.as_ref(),
        }
    }

    /// Copy with the entry for `format` replaced
    pub fn with(&self, format: Format, value: Option<T>) -> Self {
        let mut next = self.clone();
        match format {
            Format::OneVsOne => next.one_vs_one = value,
            Format::TwoVsTwo => next.two_vs_two = value,
        }
        next
    }
}

/// Everything a front end stores: roster, structures per format, and the
/// format currently being administered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentState {
    #[serde(flatten)]
    pub roster: Roster,
    #[serde(default)]
    pub brackets: PerFormat<Bracket>,
    #[serde(default)]
    pub leagues: PerFormat<League>,
    pub active_format: Format,
}

impl TournamentState {
    /// State pre-filled with eight sample players
    pub fn sample() -> Self {
        let names = [
            "Neymar",
            "Mbappé",
            "Vinicius Jr",
            "Rodrygo",
            "Haaland",
            "De Bruyne",
            "Salah",
            "Benzema",
        ];
        let players = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(format!("p{}", i + 1), *name))
            .collect();

        Self {
            roster: Roster {
                players,
                teams: Vec::new(),
            },
            ..Self::default()
        }
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.brackets.get(self.active_format)
    }

    pub fn league(&self) -> Option<&League> {
        self.leagues.get(self.active_format)
    }

    /// Competitors of the active format
    pub fn competitors(&self) -> Vec<Competitor> {
        self.roster.competitors(self.active_format)
    }

    /// Display name in the active format, `"TBD"` if unresolvable
    pub fn display_name(&self, id: Option<&CompetitorId>) -> String {
        self.roster.display_name(self.active_format, id)
    }

    /// Drop the bracket and league of `format`; their entrants changed.
    fn invalidate(&self, format: Format) -> Self {
        debug!("Invalidating {format} bracket and league");
        Self {
            brackets: self.brackets.with(format, None),
            leagues: self.leagues.with(format, None),
            ..self.clone()
        }
    }

    pub fn add_player(&self, name: impl Into<String>) -> Self {
        let mut next = self.invalidate(Format::OneVsOne);
        next.roster
            .players
            .push(Player::new(CompetitorId::new_player(), name));
        next
    }

    pub fn remove_player(&self, id: &CompetitorId) -> EngineResult<Self> {
        if self.roster.player(id).is_none() {
            return Err(EngineError::UnknownCompetitor(id.clone()));
        }
        let mut next = self.invalidate(Format::OneVsOne);
        next.roster.players.retain(|p| &p.id != id);
        Ok(next)
    }

    /// Register a 2v2 team of two distinct players not already on a team.
    pub fn add_team(&self, members: &[CompetitorId]) -> EngineResult<Self> {
        if members.len() != 2 {
            return Err(EngineError::InvalidTeam(format!(
                "a team needs exactly 2 players, got {}",
                members.len()
            )));
        }
        if members[0] == members[1] {
            return Err(EngineError::InvalidTeam(format!(
                "{} cannot partner themselves",
                members[0]
            )));
        }
        for member in members {
            if self.roster.player(member).is_none() {
                return Err(EngineError::UnknownCompetitor(member.clone()));
            }
            if self.roster.teams.iter().any(|t| t.players.contains(member)) {
                return Err(EngineError::InvalidTeam(format!(
                    "{member} is already on a team"
                )));
            }
        }

        let mut next = self.invalidate(Format::TwoVsTwo);
        next.roster.teams.push(Team {
            id: CompetitorId::new_team(),
            players: members.to_vec(),
        });
        Ok(next)
    }

    pub fn remove_team(&self, id: &CompetitorId) -> EngineResult<Self> {
        if self.roster.team(id).is_none() {
            return Err(EngineError::UnknownCompetitor(id.clone()));
        }
        let mut next = self.invalidate(Format::TwoVsTwo);
        next.roster.teams.retain(|t| &t.id != id);
        Ok(next)
    }

    pub fn set_format(&self, format: Format) -> Self {
        Self {
            active_format: format,
            ..self.clone()
        }
    }

    /// Clear the active format's bracket and league; the roster stays.
    pub fn reset_tournament(&self) -> Self {
        self.invalidate(self.active_format)
    }

    /// Draw a fresh bracket for the active format, replacing any existing one.
    pub fn generate_bracket(&self) -> EngineResult<Self> {
        let bracket = build_bracket(&self.competitors())?;
        info!(
            "Generated {} bracket with {} rounds",
            self.active_format,
            bracket.round_count()
        );
        Ok(Self {
            brackets: self.brackets.with(self.active_format, Some(bracket)),
            ..self.clone()
        })
    }

    /// Schedule a fresh league for the active format, replacing any existing one.
    pub fn generate_league(&self) -> EngineResult<Self> {
        let league = build_league(&self.competitors())?;
        info!(
            "Generated {} league with {} fixtures",
            self.active_format,
            league.matches.len()
        );
        Ok(Self {
            leagues: self.leagues.with(self.active_format, Some(league)),
            ..self.clone()
        })
    }

    fn require_bracket(&self) -> EngineResult<&Bracket> {
        self.bracket().ok_or(EngineError::NotGenerated {
            format: self.active_format,
            structure: "bracket",
        })
    }

    fn require_league(&self) -> EngineResult<&League> {
        self.league().ok_or(EngineError::NotGenerated {
            format: self.active_format,
            structure: "league",
        })
    }

    fn with_bracket(&self, bracket: Bracket) -> Self {
        Self {
            brackets: self.brackets.with(self.active_format, Some(bracket)),
            ..self.clone()
        }
    }

    /// Enter a knockout score in the active bracket.
    pub fn update_match(
        &self,
        loc: MatchLocation,
        home_score: u32,
        away_score: u32,
        settings: &EngineSettings,
    ) -> EngineResult<Self> {
        let bracket = apply_score_with(
            self.require_bracket()?,
            loc.round_idx,
            loc.match_idx,
            home_score,
            away_score,
            settings.tie_policy,
        )?;
        Ok(self.with_bracket(bracket))
    }

    /// Correct a slot of the active bracket; `None` empties it.
    pub fn set_match_competitor(
        &self,
        loc: MatchLocation,
        side: Side,
        competitor: Option<CompetitorId>,
    ) -> EngineResult<Self> {
        if let Some(id) = &competitor
            && !self.competitors().iter().any(|c| &c.id == id)
        {
            return Err(EngineError::UnknownCompetitor(id.clone()));
        }

        let bracket = bracket::set_match_competitor(
            self.require_bracket()?,
            loc.round_idx,
            loc.match_idx,
            side,
            competitor,
        )?;
        Ok(self.with_bracket(bracket))
    }

    /// Enter a result in the active league.
    pub fn update_league_match(
        &self,
        match_id: &MatchId,
        home_score: u32,
        away_score: u32,
    ) -> EngineResult<Self> {
        let league = apply_league_score(self.require_league()?, match_id, home_score, away_score)?;
        Ok(Self {
            leagues: self.leagues.with(self.active_format, Some(league)),
            ..self.clone()
        })
    }

    /// League table of the active format
    pub fn league_standings(&self, settings: &EngineSettings) -> EngineResult<Vec<StandingsRow>> {
        let league = self.require_league()?;
        Ok(standings_with(
            &self.competitors(),
            &league.matches,
            &settings.points,
        ))
    }

    /// Table built from the active bracket's played matches
    pub fn knockout_standings(
        &self,
        settings: &EngineSettings,
    ) -> EngineResult<Vec<StandingsRow>> {
        let bracket = self.require_bracket()?;
        Ok(standings_with(
            &self.competitors(),
            bracket.matches(),
            &settings.points,
        ))
    }

    /// League winner of the active format, once every fixture is played
    pub fn league_winner(&self, settings: &EngineSettings) -> Option<StandingsRow> {
        let league = self.league()?;
        let rows = self.league_standings(settings).ok()?;
        standings::league_winner(&rows, league).cloned()
    }

    /// Bracket champion of the active format
    pub fn champion(&self) -> Option<&CompetitorId> {
        self.bracket()?.champion()
    }
}
