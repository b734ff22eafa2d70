//! Main extractor API
//!
//! This module provides the primary interface for turning a parsed annotation
//! document into a flat sequence of events. The Extractor is stateless apart
//! from its configuration: every call returns a fresh, owned `Vec<Event>`.

use crate::config::{DuplicateLabelPolicy, ExtractorConfig};
use crate::document::{self, Element, ParsedDocument};
use crate::types::{DecoderError, Event, Labels, Result};
use std::path::Path;
use std::str::FromStr;

/// The main extractor struct - entry point for all extraction operations
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract all events from a parsed document, in source order
    ///
    /// A document without the container element yields an empty sequence
    /// (logged as a warning). A numeric field holding non-numeric text fails
    /// the whole extraction.
    ///
    /// # Example
    /// ```
    /// use match_event_decoder::{Extractor, ParsedDocument};
    ///
    /// let doc = ParsedDocument::parse(
    ///     "<file><ALL_INSTANCES><instance><ID>7</ID></instance></ALL_INSTANCES></file>",
    /// ).unwrap();
    /// let events = Extractor::new().extract(&doc).unwrap();
    /// assert_eq!(events[0].id, Some(7));
    /// ```
    pub fn extract(&self, doc: &ParsedDocument) -> Result<Vec<Event>> {
        let container = match doc.root().find_first(&self.config.container_tag) {
            Some(container) => container,
            None => {
                log::warn!(
                    "No <{}> element found in document, no events extracted",
                    self.config.container_tag
                );
                return Ok(Vec::new());
            }
        };

        let events = container
            .children_named(&self.config.instance_tag)
            .enumerate()
            .map(|(index, instance)| self.parse_instance(index, instance))
            .collect::<Result<Vec<_>>>()?;

        log::info!("Extracted {} events", events.len());
        Ok(events)
    }

    /// Load a file from disk and extract its events
    pub fn extract_file(&self, path: &Path) -> Result<Vec<Event>> {
        let doc = document::load(path)?;
        self.extract(&doc)
    }

    /// Build one event from an instance element
    fn parse_instance(&self, index: usize, instance: &Element) -> Result<Event> {
        let event = Event {
            id: parse_numeric(instance, "ID", "id", index)?,
            start_time: parse_numeric(instance, "start", "start_time", index)?,
            end_time: parse_numeric(instance, "end", "end_time", index)?,
            code: instance.child_text("code").map(str::to_string),
            labels: self.parse_labels(index, instance),
        };

        log::trace!("Instance #{}: {:?}", index, event);
        Ok(event)
    }

    /// Collect `label` children that carry both a `group` and a `text`
    fn parse_labels(&self, index: usize, instance: &Element) -> Labels {
        let mut labels = Labels::new();

        for label in instance.children_named("label") {
            let (group, text) = match (label.child_text("group"), label.child_text("text")) {
                (Some(group), Some(text)) => (group, text),
                _ => {
                    log::trace!("Instance #{}: skipping incomplete label", index);
                    continue;
                }
            };

            match self.config.duplicate_labels {
                DuplicateLabelPolicy::LastWins => {
                    labels.insert(group.to_string(), text.to_string());
                }
                DuplicateLabelPolicy::FirstWins => {
                    labels
                        .entry(group.to_string())
                        .or_insert_with(|| text.to_string());
                }
            }
        }

        labels
    }
}

/// Parse a numeric child element; absent child → `None`, bad text → error
fn parse_numeric<T: FromStr>(
    instance: &Element,
    tag: &str,
    field: &'static str,
    index: usize,
) -> Result<Option<T>> {
    match instance.child_text(tag) {
        None => Ok(None),
        Some(text) => text
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| DecoderError::InvalidField {
                field,
                value: text.to_string(),
                instance: index,
            }),
    }
}

/// Extract events from a parsed document with the given configuration
pub fn extract(doc: &ParsedDocument, config: &ExtractorConfig) -> Result<Vec<Event>> {
    Extractor::with_config(config.clone()).extract(doc)
}

/// Load a file from disk and extract its events with the given configuration
pub fn extract_file(path: &Path, config: &ExtractorConfig) -> Result<Vec<Event>> {
    Extractor::with_config(config.clone()).extract_file(path)
}
