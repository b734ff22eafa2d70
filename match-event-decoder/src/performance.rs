//! Per-player performance summary
//!
//! Aggregates one player's events into the counts shown on a player report:
//! passing, dribbling, defending and shooting, plus effective playing time.

use crate::config::ActionCategories;
use crate::query::player_events;
use crate::types::Event;
use serde::{Deserialize, Serialize};

/// Actions counted as accurate passes
const ACCURATE_PASSES: &[&str] = &["Passes accurate", "Passes forward accurate"];
/// Actions counted as inaccurate passes
const INACCURATE_PASSES: &[&str] = &[
    "Inaccurate passes",
    "Incomplete passes forward",
    "Passes inaccurate",
];
const PROGRESSIVE_PASS: &str = "Progressive passes accurate";

const SUCCESSFUL_DRIBBLES: &[&str] = &["Dribbling successful", "Take on successful"];
const UNSUCCESSFUL_DRIBBLES: &[&str] = &["Dribbling unsuccessful", "Take on unsuccessful"];

const CHALLENGE_WON: &str = "Challenges won";
const CHALLENGE_LOST: &str = "Challenges unsuccessful";
const BALL_RECOVERY: &str = "Ball recoveries";

const GOAL: &str = "Goals";
const SHOT_ON_TARGET: &str = "Shots on target";
const SHOT_OFF_TARGET: &str = "Shots off target";

/// A shot on target this close (seconds / pitch units) to a goal is the goal itself
const SAME_SHOT_SECONDS: f64 = 1.0;
const SAME_SHOT_DISTANCE: f64 = 0.1;

/// Pitch x coordinate beyond which the opponent half starts
const OPPONENT_HALF_X: f64 = 50.0;

/// A player who starts acting within this many seconds is counted from kick-off
const KICKOFF_GRACE_SECONDS: f64 = 600.0;

/// Performance summary of one player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPerformance {
    pub player: String,
    pub total_events: usize,
    pub effective_minutes: u32,

    pub accurate_passes: usize,
    pub inaccurate_passes: usize,
    pub progressive_passes: usize,

    pub successful_dribbles: usize,
    pub unsuccessful_dribbles: usize,

    pub defensive_actions: usize,
    pub challenges: usize,
    pub challenges_won: usize,
    pub ball_recoveries: usize,
    pub ball_recoveries_opponent_half: usize,

    pub goals: usize,
    pub shots_on_target: usize,
    pub shots_off_target: usize,
}

impl PlayerPerformance {
    /// Aggregate all events of `name` (matched as in [`player_events`])
    pub fn compute(events: &[Event], name: &str, categories: &ActionCategories) -> Self {
        let own = player_events(events, name);

        let mut perf = PlayerPerformance {
            player: name.to_string(),
            total_events: own.len(),
            effective_minutes: effective_minutes(&own),
            ..Default::default()
        };

        let mut goals: Vec<&Event> = Vec::new();
        let mut on_target: Vec<&Event> = Vec::new();

        for &event in &own {
            let action = match event.action() {
                Some(action) => action,
                None => continue,
            };

            if categories.is_pass(action) {
                if ACCURATE_PASSES.contains(&action) {
                    perf.accurate_passes += 1;
                } else if INACCURATE_PASSES.contains(&action) {
                    perf.inaccurate_passes += 1;
                } else if action == PROGRESSIVE_PASS {
                    perf.progressive_passes += 1;
                }
            }

            if categories.is_dribble(action) {
                if SUCCESSFUL_DRIBBLES.contains(&action) {
                    perf.successful_dribbles += 1;
                } else if UNSUCCESSFUL_DRIBBLES.contains(&action) {
                    perf.unsuccessful_dribbles += 1;
                }
            }

            if categories.is_defensive(action) {
                perf.defensive_actions += 1;
            }

            match action {
                CHALLENGE_WON => {
                    perf.challenges += 1;
                    perf.challenges_won += 1;
                }
                CHALLENGE_LOST => perf.challenges += 1,
                BALL_RECOVERY => {
                    perf.ball_recoveries += 1;
                    if event.position().is_some_and(|(x, _)| x > OPPONENT_HALF_X) {
                        perf.ball_recoveries_opponent_half += 1;
                    }
                }
                _ => {}
            }

            if categories.is_shooting(action) {
                match action {
                    GOAL => goals.push(event),
                    SHOT_ON_TARGET => on_target.push(event),
                    SHOT_OFF_TARGET => perf.shots_off_target += 1,
                    _ => {}
                }
            }
        }

        perf.goals = goals.len();
        perf.shots_on_target = on_target
            .iter()
            .filter(|shot| !goals.iter().any(|goal| is_same_shot(shot, goal)))
            .count();

        perf
    }

    /// Accurate + inaccurate passes
    pub fn total_passes(&self) -> usize {
        self.accurate_passes + self.inaccurate_passes
    }

    /// Goals + shots on target + shots off target
    pub fn total_shots(&self) -> usize {
        self.goals + self.shots_on_target + self.shots_off_target
    }

    pub fn total_dribbles(&self) -> usize {
        self.successful_dribbles + self.unsuccessful_dribbles
    }

    /// Accurate passes as a percentage of all passes
    pub fn pass_success_rate(&self) -> f64 {
        percentage(self.accurate_passes, self.total_passes())
    }

    /// Shots on target as a percentage of all shots
    pub fn shot_on_target_rate(&self) -> f64 {
        percentage(self.shots_on_target, self.total_shots())
    }

    pub fn dribble_success_rate(&self) -> f64 {
        percentage(self.successful_dribbles, self.total_dribbles())
    }

    pub fn challenge_success_rate(&self) -> f64 {
        percentage(self.challenges_won, self.challenges)
    }
}

/// A goal is usually also tagged as a shot on target at the same moment and spot
fn is_same_shot(shot: &Event, goal: &Event) -> bool {
    let (Some(shot_time), Some(goal_time)) = (shot.start_time, goal.start_time) else {
        return false;
    };
    let (Some((sx, sy)), Some((gx, gy))) = (shot.position(), goal.position()) else {
        return false;
    };

    (shot_time - goal_time).abs() < SAME_SHOT_SECONDS
        && (sx - gx).abs() < SAME_SHOT_DISTANCE
        && (sy - gy).abs() < SAME_SHOT_DISTANCE
}

/// `part / max(total, 1) * 100`
fn percentage(part: usize, total: usize) -> f64 {
    part as f64 / total.max(1) as f64 * 100.0
}

/// Minutes between the first (or kick-off) and last action
fn effective_minutes(events: &[&Event]) -> u32 {
    let starts: Vec<f64> = events.iter().filter_map(|e| e.start_time).collect();
    if starts.is_empty() {
        return 0;
    }

    let first = starts.iter().copied().fold(f64::INFINITY, f64::min);
    let last = starts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let origin = if first <= KICKOFF_GRACE_SECONDS { 0.0 } else { first };

    ((last - origin) / 60.0).max(0.0) as u32
}
