//! Event query and aggregation layer
//!
//! Pure functions over borrowed events. Nothing here mutates an event or
//! returns an error: empty input, absent labels and unresolved names degrade to
//! empty results and zero counts.
//!
//! Every operation accepts any `IntoIterator<Item = &Event>`, so the output of
//! one filter can be fed straight into another:
//!
//! ```
//! use match_event_decoder::query::{filter_by_half, filter_by_team, summary};
//! use match_event_decoder::Event;
//!
//! let events: Vec<Event> = Vec::new();
//! let first_half = filter_by_half(&events, "1");
//! let home = filter_by_team(first_half, "Home");
//! assert_eq!(summary(home).total_events, 0);
//! ```

use crate::types::{
    Event, SummaryStats, WindowCount, LABEL_ACTION, LABEL_HALF, LABEL_TEAM, NONE_SENTINEL,
};

/// Events whose `labels[group]` equals `value`
///
/// The `Team` group is the exception: it matches when the label *contains*
/// `value`, so "Bnei Yehuda" selects "Bnei Yehuda Tel-Aviv U19".
pub fn filter_by_label<'a, I>(events: I, group: &str, value: &str) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let substring = group == LABEL_TEAM;

    events
        .into_iter()
        .filter(|event| match event.label(group) {
            Some(label) if substring => label.contains(value),
            Some(label) => label == value,
            None => false,
        })
        .collect()
}

/// Events with the given `Action` label
pub fn filter_by_action<'a, I>(events: I, action: &str) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    filter_by_label(events, LABEL_ACTION, action)
}

/// Events whose `Team` label contains `team`
pub fn filter_by_team<'a, I>(events: I, team: &str) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    filter_by_label(events, LABEL_TEAM, team)
}

/// Events with the given `Half` label
pub fn filter_by_half<'a, I>(events: I, half: &str) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    filter_by_label(events, LABEL_HALF, half)
}

/// Summary statistics in a single pass
pub fn summary<'a, I>(events: I) -> SummaryStats
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut stats = SummaryStats::default();

    for event in events {
        stats.total_events += 1;

        if let Some(team) = event.team() {
            if !team.is_empty() && team != NONE_SENTINEL {
                stats.teams.insert(team.to_string());
            }
        }

        if let Some(action) = event.action() {
            *stats.actions.entry(action.to_string()).or_insert(0) += 1;
        }

        if let Some(half) = event.half() {
            *stats.halves.entry(half.to_string()).or_insert(0) += 1;
        }

        if let Some(start) = event.start_time {
            stats.time_range.start = stats.time_range.start.min(start);
        }
        if let Some(end) = event.end_time {
            stats.time_range.end = stats.time_range.end.max(end);
        }
    }

    stats
}

/// Events whose `code` contains `" {name} "`
///
/// Plain substring matching: a name missing its surrounding spaces in the code
/// is not found, and a name embedded in a longer name can over-match.
pub fn player_events<'a, I>(events: I, name: &str) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let needle = format!(" {} ", name);

    events
        .into_iter()
        .filter(|event| {
            event
                .code
                .as_deref()
                .is_some_and(|code| code.contains(&needle))
        })
        .collect()
}

/// Count events per fixed-size window over `[0, max(max_start, floor))`
///
/// Window starts are `0, w, 2w, ...` while below the limit; each window is
/// half-open. Events without a start time, or before 0, are not counted.
/// A non-positive or non-finite window size yields no windows.
pub fn time_windowed_counts<'a, I>(
    events: I,
    window_seconds: f64,
    match_duration_floor: f64,
) -> Vec<WindowCount>
where
    I: IntoIterator<Item = &'a Event>,
{
    let starts: Vec<f64> = events.into_iter().filter_map(|e| e.start_time).collect();
    let observed_max = starts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let limit = observed_max.max(match_duration_floor);

    window_counts(&starts, window_seconds, limit)
}

/// Upper bound on the number of windows produced for one query
pub const MAX_WINDOWS: usize = 100_000;

/// Count start times into windows covering `[0, limit)`
///
/// At most [`MAX_WINDOWS`] windows are produced; start times past the last
/// one are not counted.
pub(crate) fn window_counts(starts: &[f64], window_seconds: f64, limit: f64) -> Vec<WindowCount> {
    if !(window_seconds.is_finite() && window_seconds > 0.0) || !(limit > 0.0) || !limit.is_finite()
    {
        return Vec::new();
    }

    let wanted = (limit / window_seconds).ceil();
    let num_windows = if wanted > MAX_WINDOWS as f64 {
        log::warn!(
            "Time range {:.0}s needs {:.0} windows of {}s, truncating to {}",
            limit,
            wanted,
            window_seconds,
            MAX_WINDOWS
        );
        MAX_WINDOWS
    } else {
        wanted as usize
    };
    let mut counts = vec![0usize; num_windows];

    for &start in starts {
        if let Some(index) = window_index(start, window_seconds, num_windows) {
            counts[index] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| WindowCount {
            window_start: i as f64 * window_seconds,
            count: count as f64,
        })
        .collect()
}

/// Index of the half-open window `[k*w, (k+1)*w)` containing `t`, if below `num_windows`
fn window_index(t: f64, window_seconds: f64, num_windows: usize) -> Option<usize> {
    if !(t >= 0.0) || !t.is_finite() {
        return None;
    }

    let approx = (t / window_seconds).floor();
    if approx > num_windows as f64 {
        return None;
    }

    let mut index = approx as usize;
    // Correct for rounding at exact boundaries
    if t < index as f64 * window_seconds {
        index -= 1;
    } else if t >= (index + 1) as f64 * window_seconds {
        index += 1;
    }
    (index < num_windows).then_some(index)
}
