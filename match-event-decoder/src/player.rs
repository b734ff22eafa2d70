//! Player identity and involvement
//!
//! Player identity is never stored in the export; it is recovered from the
//! `code` text by a fixed convention:
//!
//! ```text
//! 12.John Smith(5) - Passes accurate
//! ^^ ^^^^^^^^^^ ^^^   ^^^^^^^^^^^^^^^
//! |  name       |     action shorthand
//! prefix        parenthetical
//! ```
//!
//! The convention is reproduced exactly, including its blind spots: a name
//! that itself contains `.` or `(` decomposes incorrectly.

use crate::query::{self, player_events};
use crate::types::{Event, WindowCount, NONE_SENTINEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Recover the player name from an event code
///
/// The code is split on the first `" - "`; the left part on the first `.`;
/// the remainder on the first `(`. The trimmed middle piece is the name.
/// Codes lacking any of the three markers (or whose left part has no `.`)
/// yield `None`.
///
/// ```
/// use match_event_decoder::decompose_player_code;
///
/// assert_eq!(
///     decompose_player_code("12.John Smith(5) - Passes accurate").as_deref(),
///     Some("John Smith")
/// );
/// assert_eq!(decompose_player_code("Passes accurate"), None);
/// ```
pub fn decompose_player_code(code: &str) -> Option<String> {
    if !(code.contains(" - ") && code.contains('.') && code.contains('(')) {
        return None;
    }

    let (player_part, _) = code.split_once(" - ")?;
    let (_, after_prefix) = player_part.split_once('.')?;
    let name = after_prefix
        .split_once('(')
        .map_or(after_prefix, |(name, _)| name)
        .trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Distinct decomposed player names, sorted
///
/// With a team, only events whose `Team` label contains it are considered.
/// The sentinel name "None" is excluded.
pub fn player_list<'a, I>(events: I, team: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = &'a Event>,
{
    let events: Vec<&Event> = match team {
        Some(team) => query::filter_by_team(events, team),
        None => events.into_iter().collect(),
    };

    distinct_players(events).into_iter().collect()
}

fn distinct_players<'a, I>(events: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter_map(|e| e.code.as_deref())
        .filter_map(decompose_player_code)
        .filter(|name| name != NONE_SENTINEL)
        .collect()
}

/// A player's activity over time next to their team's per-capita average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Involvement {
    pub player: String,
    /// Team label of the player's first event
    pub team: Option<String>,
    /// Distinct players resolved among the team's events
    pub team_players: usize,
    pub player_counts: Vec<WindowCount>,
    pub team_average: Vec<WindowCount>,
}

/// Compare a player's windowed activity with the team average
///
/// Windows span the whole match: `[0, max(max start over all events, floor))`.
/// The team is the `Team` label of the player's first event, matched exactly
/// here. The average is team count divided by the number of distinct players
/// on the team, or 0 when no player resolves. Returns `None` when the player
/// has no events.
pub fn team_involvement(
    events: &[Event],
    name: &str,
    window_seconds: f64,
    match_duration_floor: f64,
) -> Option<Involvement> {
    let own = player_events(events, name);
    let first = own.first()?;
    let team = first.team().map(str::to_string);

    let team_events: Vec<&Event> = match team.as_deref() {
        Some(team) => events.iter().filter(|e| e.team() == Some(team)).collect(),
        None => Vec::new(),
    };
    let team_players = distinct_players(team_events.iter().copied()).len();

    let limit = events
        .iter()
        .filter_map(|e| e.start_time)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(match_duration_floor);

    let player_counts = query::window_counts(&start_times(&own), window_seconds, limit);
    let team_average = query::window_counts(&start_times(&team_events), window_seconds, limit)
        .into_iter()
        .map(|w| WindowCount {
            window_start: w.window_start,
            count: if team_players > 0 {
                w.count / team_players as f64
            } else {
                0.0
            },
        })
        .collect();

    log::debug!(
        "Involvement for {}: team {:?} with {} players",
        name,
        team,
        team_players
    );

    Some(Involvement {
        player: name.to_string(),
        team,
        team_players,
        player_counts,
        team_average,
    })
}

fn start_times(events: &[&Event]) -> Vec<f64> {
    events.iter().filter_map(|e| e.start_time).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coded(code: &str, team: &str, start: f64) -> Event {
        let mut event = Event {
            start_time: Some(start),
            code: Some(code.to_string()),
            ..Default::default()
        };
        event.labels.insert("Team".into(), team.into());
        event
    }

    #[test]
    fn test_decompose_standard_code() {
        assert_eq!(
            decompose_player_code("12.John Smith(5) - Passes accurate").as_deref(),
            Some("John Smith")
        );
        assert_eq!(
            decompose_player_code("7. Avihai Wodaje (CM) - Goals").as_deref(),
            Some("Avihai Wodaje")
        );
    }

    #[test]
    fn test_decompose_missing_markers() {
        assert_eq!(decompose_player_code("Passes accurate"), None);
        assert_eq!(decompose_player_code("12.John Smith - Goals"), None);
        assert_eq!(decompose_player_code("John Smith(5) - Goals"), None);
        assert_eq!(decompose_player_code("12.John Smith(5) Goals"), None);
        assert_eq!(decompose_player_code(""), None);
    }

    #[test]
    fn test_decompose_known_limitations() {
        // '(' only on the right: the whole remainder becomes the name
        assert_eq!(
            decompose_player_code("12.John Smith - Goals (header)").as_deref(),
            Some("John Smith")
        );
        // A '.' inside the name cuts it short
        assert_eq!(
            decompose_player_code("J.R. Smith(5) - Goals").as_deref(),
            Some("R. Smith")
        );
        // '.' only on the right: no prefix separator in the player part
        assert_eq!(decompose_player_code("John Smith(5) - Goals 2.0"), None);
        // Empty name
        assert_eq!(decompose_player_code("12.(5) - Goals"), None);
    }

    #[test]
    fn test_player_list_sorted_distinct() {
        let events = vec![
            coded("9. Zed Adams (9) - Goals", "Home FC", 10.0),
            coded("4. Amir Cohen (4) - Passes accurate", "Home FC", 20.0),
            coded("4. Amir Cohen (4) - Clearances", "Home FC", 30.0),
            coded("1. Ben Levi (1) - Saves", "Away FC U19", 40.0),
            coded("0. None (0) - Substitution", "Away FC U19", 50.0),
            coded("Half start", "None", 0.0),
        ];

        assert_eq!(
            player_list(&events, None),
            vec!["Amir Cohen", "Ben Levi", "Zed Adams"]
        );
        assert_eq!(player_list(&events, Some("Away FC")), vec!["Ben Levi"]);
        assert!(player_list(&events, Some("Nobody")).is_empty());
    }

    #[test]
    fn test_team_involvement_average() {
        let events = vec![
            coded("4. Amir Cohen (4) - Passes accurate", "Home FC", 10.0),
            coded("4. Amir Cohen (4) - Passes accurate", "Home FC", 20.0),
            coded("9. Zed Adams (9) - Goals", "Home FC", 30.0),
            coded("9. Zed Adams (9) - Goals", "Home FC", 400.0),
            coded("1. Ben Levi (1) - Saves", "Away FC", 35.0),
        ];

        let involvement = team_involvement(&events, "Amir Cohen", 300.0, 5400.0).unwrap();
        assert_eq!(involvement.team.as_deref(), Some("Home FC"));
        assert_eq!(involvement.team_players, 2);
        assert_eq!(involvement.player_counts.len(), 18);
        assert_eq!(involvement.team_average.len(), 18);
        assert_eq!(involvement.player_counts[0].count, 2.0);
        assert_eq!(involvement.player_counts[1].count, 0.0);
        assert_eq!(involvement.team_average[0].count, 1.5);
        assert_eq!(involvement.team_average[1].count, 0.5);
    }

    #[test]
    fn test_team_involvement_without_resolved_players() {
        let mut event = Event {
            start_time: Some(10.0),
            code: Some("x Ghost y".into()),
            ..Default::default()
        };
        event.labels.insert("Team".into(), "Home FC".into());
        let events = vec![event];

        let involvement = team_involvement(&events, "Ghost", 300.0, 600.0).unwrap();
        assert_eq!(involvement.team_players, 0);
        assert_eq!(involvement.player_counts[0].count, 1.0);
        assert!(involvement.team_average.iter().all(|w| w.count == 0.0));
    }

    #[test]
    fn test_team_involvement_unknown_player() {
        let events = vec![coded("4. Amir Cohen (4) - Goals", "Home FC", 10.0)];
        assert!(team_involvement(&events, "Nobody", 300.0, 5400.0).is_none());
    }
}
