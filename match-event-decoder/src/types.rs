//! Core types for the match event decoder library
//!
//! This module defines the fundamental types the extractor emits when processing
//! an annotation export, plus the result types of the query layer. Events are
//! plain immutable data: the decoder creates them once and never mutates them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Label group holding the action name (e.g. "Passes accurate")
pub const LABEL_ACTION: &str = "Action";
/// Label group holding the team name
pub const LABEL_TEAM: &str = "Team";
/// Label group holding the match half ("1", "2", ...)
pub const LABEL_HALF: &str = "Half";
/// Label group holding the pitch x coordinate
pub const LABEL_POS_X: &str = "pos_x";
/// Label group holding the pitch y coordinate
pub const LABEL_POS_Y: &str = "pos_y";

/// Label value used by the exports for "no team"
pub const NONE_SENTINEL: &str = "None";

/// Label collection of one instance: group name → value
///
/// Group names are data, not a fixed schema. An ordered map keeps iteration
/// deterministic for downstream consumers.
pub type Labels = BTreeMap<String, String>;

/// Errors that can occur while loading or extracting a document
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Source not found or unreadable: {path:?}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse document: {0}")]
    Parse(String),

    #[error("Invalid value {value:?} for field '{field}' in instance #{instance}")]
    InvalidField {
        field: &'static str,
        value: String,
        instance: usize,
    },
}

impl DecoderError {
    /// True for malformed markup and non-numeric numeric fields
    pub fn is_parse_error(&self) -> bool {
        matches!(self, DecoderError::Parse(_) | DecoderError::InvalidField { .. })
    }
}

/// One observed action instance from the annotation export
///
/// Every scalar field is optional: `None` means the source instance had no
/// such child element. Nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Instance ID (unique within a file, not enforced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Start of the clip in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    /// End of the clip in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    /// Free text combining player identity and action shorthand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// All labels attached to the instance
    #[serde(default)]
    pub labels: Labels,
}

impl Event {
    /// Get a label value by group name
    pub fn label(&self, group: &str) -> Option<&str> {
        self.labels.get(group).map(String::as_str)
    }

    /// The `Action` label, if present
    pub fn action(&self) -> Option<&str> {
        self.label(LABEL_ACTION)
    }

    /// The `Team` label, if present
    pub fn team(&self) -> Option<&str> {
        self.label(LABEL_TEAM)
    }

    /// The `Half` label, if present
    pub fn half(&self) -> Option<&str> {
        self.label(LABEL_HALF)
    }

    /// Pitch coordinates from the `pos_x`/`pos_y` labels
    ///
    /// Returns `None` when either label is missing or not numeric.
    pub fn position(&self) -> Option<(f64, f64)> {
        let x = self.label(LABEL_POS_X)?.trim().parse::<f64>().ok()?;
        let y = self.label(LABEL_POS_Y)?.trim().parse::<f64>().ok()?;
        Some((x, y))
    }
}

/// Time span covered by a set of events
///
/// Starts as `[+inf, 0]`; a range still in that state means "no data".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// True if no event contributed a start time
    pub fn is_empty(&self) -> bool {
        self.start == f64::INFINITY
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: f64::INFINITY,
            end: 0.0,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "no data")
        } else {
            write!(f, "{:.2} - {:.2}", self.start, self.end)
        }
    }
}

/// Summary statistics of a match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of events
    pub total_events: usize,
    /// Distinct `Team` label values, excluding "None"
    pub teams: BTreeSet<String>,
    /// `Action` label value → occurrences
    pub actions: BTreeMap<String, usize>,
    /// `Half` label value → occurrences
    pub halves: BTreeMap<String, usize>,
    /// Earliest start / latest end
    pub time_range: TimeRange,
}

impl SummaryStats {
    /// Actions sorted by descending count (ties by name), at most `limit`
    pub fn top_actions(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut sorted: Vec<(&str, usize)> = self
            .actions
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted.truncate(limit);
        sorted
    }
}

/// Event count within one half-open time window `[start, start + size)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowCount {
    /// Window start in seconds
    pub window_start: f64,
    /// Number of events (or per-capita average) in the window
    pub count: f64,
}
