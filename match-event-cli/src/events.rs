//! Event listing
//!
//! Applies the optional action/team/half filters and renders the remaining
//! events either as one line per event or as pretty-printed JSON.

use anyhow::Result;
use match_event_decoder::query::{filter_by_action, filter_by_half, filter_by_team};
use match_event_decoder::Event;
use std::fmt;

/// Filters selected on the command line
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub action: Option<String>,
    pub team: Option<String>,
    pub half: Option<String>,
    pub limit: Option<usize>,
}

impl EventFilter {
    /// Apply all filters in turn, then the limit
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        let mut selected: Vec<&Event> = events.iter().collect();

        if let Some(action) = &self.action {
            selected = filter_by_action(selected, action);
        }
        if let Some(team) = &self.team {
            selected = filter_by_team(selected, team);
        }
        if let Some(half) = &self.half {
            selected = filter_by_half(selected, half);
        }
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        selected
    }
}

/// One line per event: id, time span, code, then labels
pub fn render_lines(events: &[&Event]) -> String {
    events.iter().map(|event| format!("{}\n", EventLine(event))).collect()
}

struct EventLine<'a>(&'a Event);

impl fmt::Display for EventLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.0;
        let id = event.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let span = match (event.start_time, event.end_time) {
            (Some(start), Some(end)) => format!("{:.2}-{:.2}", start, end),
            (Some(start), None) => format!("{:.2}-", start),
            (None, Some(end)) => format!("-{:.2}", end),
            (None, None) => "-".to_string(),
        };
        let labels: Vec<String> = event
            .labels
            .iter()
            .map(|(group, value)| format!("{}={}", group, value))
            .collect();

        write!(
            f,
            "#{:<6} {:<18} {} [{}]",
            id,
            span,
            event.code.as_deref().unwrap_or(""),
            labels.join(", ")
        )
    }
}

/// Pretty-printed JSON array of the events
pub fn render_json(events: &[&Event]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}
