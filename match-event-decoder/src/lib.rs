//! Match Event Decoder Library
//!
//! A stateless, reusable library for turning sports-analytics XML exports
//! (event-tagged video annotations) into a flat, strongly-keyed event table,
//! and for querying that table.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on extraction and queries:
//! - Loads and structurally parses the annotation export
//! - Extracts one `Event` per instance, preserving source order
//! - Filters events by label, player and time window
//! - Computes match summaries, player lists and per-player performance
//!
//! The library does NOT:
//! - Render charts, pitch maps or heatmaps
//! - Format CSV/JSON exports
//! - Hold any shared mutable state (extraction returns an owned `Vec<Event>`)
//!
//! All presentation is in the application layer (match-event-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use match_event_decoder::{load, query, Extractor};
//! use std::path::Path;
//!
//! let doc = load(Path::new("match.xml")).unwrap();
//! let events = Extractor::new().extract(&doc).unwrap();
//!
//! let stats = query::summary(&events);
//! println!("{} events, teams: {:?}", stats.total_events, stats.teams);
//!
//! for event in query::filter_by_action(&events, "Goals") {
//!     println!("Goal at {:?}: {:?}", event.start_time, event.code);
//! }
//! ```

// Public modules
pub mod config;
pub mod document;
pub mod extractor;
pub mod performance;
pub mod player;
pub mod query;
pub mod types;

// Re-export main types for convenience
pub use config::{ActionCategories, DuplicateLabelPolicy, ExtractorConfig};
pub use document::{load, Element, ParsedDocument};
pub use extractor::{extract, extract_file, Extractor};
pub use performance::PlayerPerformance;
pub use player::{decompose_player_code, player_list, team_involvement, Involvement};
pub use query::{filter_by_label, player_events, summary, time_windowed_counts};
pub use types::{
    DecoderError, Event, Labels, Result, SummaryStats, TimeRange, WindowCount, LABEL_ACTION,
    LABEL_HALF, LABEL_POS_X, LABEL_POS_Y, LABEL_TEAM, NONE_SENTINEL,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
