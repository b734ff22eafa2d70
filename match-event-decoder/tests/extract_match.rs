// End-to-end extraction and query tests against on-disk exports
use match_event_decoder::query::{filter_by_half, filter_by_team};
use match_event_decoder::{
    decompose_player_code, extract_file, load, player_list, summary, team_involvement,
    time_windowed_counts, ActionCategories, DecoderError, Extractor, ExtractorConfig,
    ParsedDocument, PlayerPerformance,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn extracts_every_instance_in_source_order() {
    init_logging();
    let events = extract_file(&fixture("sample_match.xml"), &ExtractorConfig::default()).unwrap();

    assert_eq!(events.len(), 6);
    let ids: Vec<_> = events.iter().map(|e| e.id).collect();
    assert_eq!(ids, (1..=6i64).map(Some).collect::<Vec<_>>());

    // Orphan label skipped, remaining labels kept
    assert_eq!(events[4].labels.len(), 3);
    // Instance without labels is still an event
    assert!(events[5].labels.is_empty());
    assert_eq!(events[5].code.as_deref(), Some("End of the 2nd half"));
}

#[test]
fn summary_of_sample_match() {
    let events = extract_file(&fixture("sample_match.xml"), &ExtractorConfig::default()).unwrap();
    let stats = summary(&events);

    assert_eq!(stats.total_events, 6);
    assert_eq!(
        stats.teams.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Bnei Yehuda Tel-Aviv U19", "Hapoel Kfar Shalem U19"]
    );
    assert_eq!(stats.actions.get("Passes accurate"), Some(&2));
    assert_eq!(stats.actions.get("Goals"), Some(&1));
    assert_eq!(stats.halves.get("1"), Some(&3));
    assert_eq!(stats.halves.get("2"), Some(&2));
    assert_eq!(stats.time_range.start, 0.0);
    assert_eq!(stats.time_range.end, 5703.0);
}

#[test]
fn three_instance_scenario() {
    let doc = ParsedDocument::parse(
        r#"<file><ALL_INSTANCES>
            <instance>
                <label><group>Action</group><text>Goals</text></label>
                <label><group>Team</group><text>A</text></label>
                <label><group>Half</group><text>1</text></label>
            </instance>
            <instance>
                <label><group>Action</group><text>Passes accurate</text></label>
                <label><group>Team</group><text>A</text></label>
                <label><group>Half</group><text>1</text></label>
            </instance>
            <instance>
                <label><group>Action</group><text>Goals</text></label>
                <label><group>Team</group><text>B</text></label>
                <label><group>Half</group><text>2</text></label>
            </instance>
        </ALL_INSTANCES></file>"#,
    )
    .unwrap();

    let events = Extractor::new().extract(&doc).unwrap();
    let stats = summary(&events);

    assert_eq!(stats.total_events, 3);
    assert_eq!(stats.teams.len(), 2);
    assert!(stats.teams.contains("A") && stats.teams.contains("B"));
    assert_eq!(stats.actions.get("Goals"), Some(&2));
    assert_eq!(stats.actions.get("Passes accurate"), Some(&1));
    assert_eq!(stats.halves.get("1"), Some(&2));
    assert_eq!(stats.halves.get("2"), Some(&1));
    // No start times: "no data" range
    assert!(stats.time_range.is_empty());
}

#[test]
fn team_and_half_filters_compose() {
    let events = extract_file(&fixture("sample_match.xml"), &ExtractorConfig::default()).unwrap();

    let home = filter_by_team(&events, "Bnei Yehuda");
    assert_eq!(home.len(), 3);

    let home_first_half = filter_by_half(home, "1");
    let ids: Vec<_> = home_first_half.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![Some(2), Some(3)]);
}

#[test]
fn players_and_performance_from_export() {
    let events = extract_file(&fixture("sample_match.xml"), &ExtractorConfig::default()).unwrap();

    assert_eq!(
        player_list(&events, None),
        vec!["Avihai Wodaje", "Noam Katz", "Omer Levi"]
    );
    assert_eq!(
        player_list(&events, Some("Bnei Yehuda")),
        vec!["Avihai Wodaje", "Noam Katz"]
    );
    assert_eq!(
        decompose_player_code(events[1].code.as_deref().unwrap()).as_deref(),
        Some("Avihai Wodaje")
    );

    let perf = PlayerPerformance::compute(&events, "Omer Levi", &ActionCategories::default());
    assert_eq!(perf.ball_recoveries, 1);
    assert_eq!(perf.ball_recoveries_opponent_half, 1);

    let involvement = team_involvement(&events, "Avihai Wodaje", 300.0, 5400.0).unwrap();
    // Match runs to 5702s, so 20 five-minute windows
    assert_eq!(involvement.player_counts.len(), 20);
    assert_eq!(involvement.team_players, 2);
    assert_eq!(involvement.player_counts[0].count, 1.0);
    assert_eq!(involvement.player_counts[2].count, 1.0);
    assert_eq!(involvement.team_average[11].count, 0.5);

    let all = time_windowed_counts(&events, 300.0, 5400.0);
    assert_eq!(all.iter().map(|w| w.count).sum::<f64>(), 6.0);
}

#[test]
fn non_numeric_id_fails_whole_extraction() {
    let temp_file = write_temp(
        "<file><ALL_INSTANCES><instance><ID>1</ID></instance><instance><ID>abc</ID></instance></ALL_INSTANCES></file>",
    );

    let err = extract_file(temp_file.path(), &ExtractorConfig::default()).unwrap_err();
    assert!(err.is_parse_error(), "unexpected error: {}", err);
}

#[test]
fn missing_file_is_not_found() {
    let err = load(&fixture("no_such_match.xml")).unwrap_err();
    assert!(matches!(err, DecoderError::NotFound { .. }));
}

#[test]
fn malformed_markup_is_parse_error() {
    let temp_file = write_temp("<file><ALL_INSTANCES><instance></ALL_INSTANCES>");
    let err = load(temp_file.path()).unwrap_err();
    assert!(matches!(err, DecoderError::Parse(_)));
}

#[test]
fn document_without_container_has_no_events() {
    init_logging();
    let temp_file = write_temp("<file><ROWS><row/></ROWS></file>");
    let events = extract_file(temp_file.path(), &ExtractorConfig::default()).unwrap();
    assert!(events.is_empty());
}

#[test]
fn huge_start_time_keeps_window_queries_bounded() {
    init_logging();
    let doc = ParsedDocument::parse(
        r#"<file><ALL_INSTANCES>
            <instance>
                <start>10</start>
                <code>1. Dan Gal (7) - Passes accurate</code>
                <label><group>Team</group><text>Home FC</text></label>
            </instance>
            <instance>
                <start>1e20</start>
                <code>2. Dan Gal (7) - Passes accurate</code>
                <label><group>Team</group><text>Home FC</text></label>
            </instance>
        </ALL_INSTANCES></file>"#,
    )
    .unwrap();
    let events = Extractor::new().extract(&doc).unwrap();
    assert_eq!(events[1].start_time, Some(1e20));

    let windows = time_windowed_counts(&events, 300.0, 5400.0);
    assert_eq!(windows.len(), match_event_decoder::query::MAX_WINDOWS);
    assert_eq!(windows[0].count, 1.0);

    let involvement = team_involvement(&events, "Dan Gal", 300.0, 5400.0).unwrap();
    assert_eq!(involvement.player_counts.len(), match_event_decoder::query::MAX_WINDOWS);
    assert_eq!(involvement.player_counts[0].count, 1.0);
}
