//! Plain-text views of the tournament state.

use tourney::{Format, Match, StandingsRow, TournamentState};

fn score_or_blank(score: Option<u32>) -> String {
    score.map_or_else(|| "-".to_string(), |s| s.to_string())
}

fn bracket_line(state: &TournamentState, round_idx: usize, match_idx: usize, m: &Match) -> String {
    let home = state.display_name(m.home.as_ref());
    if m.bye {
        return format!("  [{round_idx}.{match_idx}] {home} (bye)");
    }

    let away = state.display_name(m.away.as_ref());
    let marker = if m.completed { "  ✓" } else { "" };
    format!(
        "  [{round_idx}.{match_idx}] {home} {} - {} {away}{marker}",
        score_or_blank(m.home_score),
        score_or_blank(m.away_score),
    )
}

/// Bracket of the active format, round by round
pub fn bracket(state: &TournamentState) -> String {
    let Some(bracket) = state.bracket() else {
        return format!("No {} bracket. Run 'bracket' to draw one.", state.active_format);
    };

    let mut lines = Vec::new();
    for (round_idx, round) in bracket.rounds().enumerate() {
        let name = bracket
            .round_name(round_idx)
            .unwrap_or_else(|| format!("Round {}", round_idx + 1));
        lines.push(format!("{name}:"));
        for (match_idx, m) in round.iter().enumerate() {
            lines.push(bracket_line(state, round_idx, match_idx, m));
        }
    }

    if let Some(champion) = bracket.champion() {
        lines.push(format!("Champion: {}", state.display_name(Some(champion))));
    }
    lines.join("\n")
}

/// League fixtures of the active format grouped by round
pub fn league(state: &TournamentState) -> String {
    let Some(league) = state.league() else {
        return format!("No {} league. Run 'league' to schedule one.", state.active_format);
    };

    let mut lines = Vec::new();
    for (round_idx, fixtures) in league.rounds() {
        lines.push(format!("Round {}:", round_idx + 1));
        for m in fixtures {
            lines.push(format!(
                "  [{}] {} {} - {} {}",
                m.id,
                state.display_name(Some(&m.home)),
                score_or_blank(m.home_score),
                score_or_blank(m.away_score),
                state.display_name(Some(&m.away)),
            ));
        }
    }
    lines.push(format!(
        "Played {}/{}",
        league.completed_count(),
        league.matches.len()
    ));
    lines.join("\n")
}

/// Standings table
pub fn table(rows: &[StandingsRow]) -> String {
    let width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut lines = vec![format!(
        "{:>3}  {:<width$}  {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>3} {:>4}",
        "#", "Name", "P", "W", "D", "L", "GF", "GA", "GD", "Pts", "Win%"
    )];
    for (pos, row) in rows.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:<width$}  {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>+4} {:>3} {:>3}%",
            pos + 1,
            row.name,
            row.played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.goals_against,
            row.goal_difference,
            row.points,
            row.win_percentage,
        ));
    }
    lines.join("\n")
}

/// Players and teams with ids
pub fn roster(state: &TournamentState) -> String {
    let mut lines = vec![format!("Players ({}):", state.roster.players.len())];
    for player in &state.roster.players {
        lines.push(format!("  {}  {}", player.id, player.name));
    }

    lines.push(format!("Teams ({}):", state.roster.teams.len()));
    for team in &state.roster.teams {
        lines.push(format!(
            "  {}  {}",
            team.id,
            state.roster.display_name(tourney::Format::TwoVsTwo, Some(&team.id))
        ));
    }
    lines.join("\n")
}

/// Summary of the active format
pub fn overview(state: &TournamentState) -> String {
    let mut lines = vec![
        format!("Format: {}", state.active_format),
        format!("Competitors: {}", state.competitors().len()),
    ];

    match state.bracket() {
        Some(b) => {
            let played = b.matches().filter(|m| m.completed && !m.bye).count();
            let total = b.matches().filter(|m| !m.bye).count();
            lines.push(format!("Bracket: {} rounds, {played}/{total} played", b.round_count()));
            if let Some(champion) = b.champion() {
                lines.push(format!("Champion: {}", state.display_name(Some(champion))));
            }
        }
        None => lines.push("Bracket: none".to_string()),
    }

    match state.league() {
        Some(l) => lines.push(format!(
            "League: {} rounds, {}/{} played",
            l.round_count(),
            l.completed_count(),
            l.matches.len()
        )),
        None => lines.push("League: none".to_string()),
    }

    for format in Format::ALL.into_iter().filter(|f| *f != state.active_format) {
        let mut held = Vec::new();
        if state.brackets.get(format).is_some() {
            held.push("bracket");
        }
        if state.leagues.get(format).is_some() {
            held.push("league");
        }
        if !held.is_empty() {
            lines.push(format!("Also in {format}: {}", held.join(", ")));
        }
    }

    lines.join("\n")
}
