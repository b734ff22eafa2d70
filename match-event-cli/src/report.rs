//! Report generation
//!
//! Plain-text match summaries and per-player performance reports.

use chrono::{DateTime, Local};
use match_event_decoder::{Involvement, PlayerPerformance, SummaryStats};
use std::fmt;

const RULE: &str = "══════════════════════════════════════════════════";

/// Match summary: totals, teams, time range, halves and top actions
pub fn render_summary(stats: &SummaryStats, top_actions: usize) -> String {
    SummaryReport { stats, top_actions }.to_string()
}

/// Full text report of one player
pub fn render_player_report(
    perf: &PlayerPerformance,
    involvement: Option<&Involvement>,
    generated_at: DateTime<Local>,
) -> String {
    PlayerReport {
        perf,
        involvement,
        generated_at,
    }
    .to_string()
}

struct SummaryReport<'a> {
    stats: &'a SummaryStats,
    top_actions: usize,
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "  MATCH SUMMARY")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Total Events: {}", stats.total_events)?;
        let teams: Vec<&str> = stats.teams.iter().map(String::as_str).collect();
        writeln!(f, "Teams: {}", teams.join(", "))?;
        writeln!(f, "Time Range: {}", stats.time_range)?;

        writeln!(f, "\nEvents by Half:")?;
        for (half, count) in &stats.halves {
            writeln!(f, "  Half {}: {} events", half, count)?;
        }

        writeln!(f, "\nTop {} Actions:", self.top_actions)?;
        for (action, count) in stats.top_actions(self.top_actions) {
            writeln!(f, "  {}: {}", action, count)?;
        }
        Ok(())
    }
}

struct PlayerReport<'a> {
    perf: &'a PlayerPerformance,
    involvement: Option<&'a Involvement>,
    generated_at: DateTime<Local>,
}

impl fmt::Display for PlayerReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let perf = self.perf;

        writeln!(f, "{} - REPORT", perf.player.to_uppercase())?;
        writeln!(f, "Effective Time - {} Minutes", perf.effective_minutes)?;
        writeln!(f, "Generated {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "{}", RULE)?;

        writeln!(f, "\nPASSING")?;
        writeln!(f, "  Total Passes              {:>5}", perf.total_passes())?;
        writeln!(f, "  Accurate Passes           {:>5}", perf.accurate_passes)?;
        writeln!(f, "  Success Rate             {:>5.1}%", perf.pass_success_rate())?;
        writeln!(f, "  Progressive Passes        {:>5}", perf.progressive_passes)?;

        writeln!(f, "\nATTACKING")?;
        writeln!(f, "  Total Shots               {:>5}", perf.total_shots())?;
        writeln!(f, "  Goals                     {:>5}", perf.goals)?;
        writeln!(f, "  Shots on Target           {:>5}", perf.shots_on_target)?;
        writeln!(f, "  Shot Rate                {:>5.1}%", perf.shot_on_target_rate())?;
        writeln!(f, "  Dribbles                  {:>5}", perf.total_dribbles())?;
        writeln!(f, "  Successful Dribbles       {:>5}", perf.successful_dribbles)?;
        writeln!(f, "  Success Rate             {:>5.1}%", perf.dribble_success_rate())?;

        writeln!(f, "\nDEFENDING")?;
        writeln!(f, "  Total Defensive Actions   {:>5}", perf.defensive_actions)?;
        writeln!(f, "  Challenges                {:>5}", perf.challenges)?;
        writeln!(f, "  Success Rate             {:>5.1}%", perf.challenge_success_rate())?;
        writeln!(f, "  Ball Recoveries           {:>5}", perf.ball_recoveries)?;
        writeln!(f, "  Ball Recoveries Opp Half  {:>5}", perf.ball_recoveries_opponent_half)?;

        match self.involvement {
            Some(involvement) => write_involvement(f, involvement),
            None => Ok(()),
        }
    }
}

fn write_involvement(f: &mut fmt::Formatter<'_>, involvement: &Involvement) -> fmt::Result {
    writeln!(f, "\nINVOLVEMENT (actions per window)")?;
    if let Some(team) = &involvement.team {
        writeln!(f, "  Team: {} ({} players)", team, involvement.team_players)?;
    }
    writeln!(f, "  {:>6}  {:>7}  {:>8}", "Minute", "Player", "Team avg")?;

    for (own, team) in involvement
        .player_counts
        .iter()
        .zip(&involvement.team_average)
    {
        writeln!(
            f,
            "  {:>6}  {:>7}  {:>8.2}",
            (own.window_start / 60.0) as u32,
            own.count,
            team.count
        )?;
    }
    Ok(())
}

/// File name of a player's report
///
/// Spaces become underscores; path separators and other characters that are
/// not safe in a file name become `-`.
pub fn report_file_name(player: &str) -> String {
    let stem: String = player
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let stem = if stem.is_empty() || stem == "." || stem == ".." {
        "player".to_string()
    } else {
        stem
    };
    format!("{}_report.txt", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use match_event_decoder::WindowCount;

    #[test]
    fn test_render_summary() {
        let mut stats = SummaryStats {
            total_events: 3,
            ..Default::default()
        };
        stats.teams.insert("A".into());
        stats.teams.insert("B".into());
        stats.actions.insert("Goals".into(), 2);
        stats.actions.insert("Passes accurate".into(), 1);
        stats.halves.insert("1".into(), 2);
        stats.halves.insert("2".into(), 1);

        let text = render_summary(&stats, 1);
        assert!(text.contains("Total Events: 3"));
        assert!(text.contains("Teams: A, B"));
        assert!(text.contains("Time Range: no data"));
        assert!(text.contains("  Half 1: 2 events"));
        assert!(text.contains("  Goals: 2"));
        assert!(!text.contains("Passes accurate"));
    }

    #[test]
    fn test_render_player_report() {
        let perf = PlayerPerformance {
            player: "Dan Gal".into(),
            effective_minutes: 87,
            accurate_passes: 3,
            inaccurate_passes: 1,
            ..Default::default()
        };
        let involvement = Involvement {
            player: "Dan Gal".into(),
            team: Some("Home FC".into()),
            team_players: 2,
            player_counts: vec![
                WindowCount { window_start: 0.0, count: 2.0 },
                WindowCount { window_start: 300.0, count: 0.0 },
            ],
            team_average: vec![
                WindowCount { window_start: 0.0, count: 1.5 },
                WindowCount { window_start: 300.0, count: 0.5 },
            ],
        };
        let generated = Local.with_ymd_and_hms(2025, 8, 31, 20, 0, 0).unwrap();

        let text = render_player_report(&perf, Some(&involvement), generated);
        assert!(text.starts_with("DAN GAL - REPORT\nEffective Time - 87 Minutes\n"));
        assert!(text.contains("Generated 2025-08-31 20:00:00"));
        assert!(text.contains("Success Rate              75.0%"));
        assert!(text.contains("Team: Home FC (2 players)"));
        assert!(text.contains("       5        0      0.50"));
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("Avihai Wodaje"), "Avihai_Wodaje_report.txt");
    }

    #[test]
    fn test_report_file_name_has_no_path_separators() {
        let name = report_file_name("../AC/DC\\Crew");
        assert_eq!(name, "..-AC-DC-Crew_report.txt");
        assert!(!name.contains('/') && !name.contains('\\'));

        let dir = std::path::Path::new("out");
        assert_eq!(dir.join(&name).parent(), Some(dir));
    }
}
