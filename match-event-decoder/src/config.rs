//! Decoder configuration types
//!
//! This module defines the minimal configuration needed by the decoder library:
//! where the extractor finds instances, how duplicate labels are resolved, and
//! which action names make up each performance category.

use serde::{Deserialize, Serialize};

/// How to resolve two labels with the same group inside one instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateLabelPolicy {
    /// The last label in document order overwrites earlier ones
    #[default]
    LastWins,
    /// The first label in document order is kept
    FirstWins,
}

/// Configuration for the event extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Tag of the container element holding all instances
    #[serde(default = "default_container_tag")]
    pub container_tag: String,

    /// Tag of a single instance element
    #[serde(default = "default_instance_tag")]
    pub instance_tag: String,

    /// Duplicate label group resolution (default: last wins)
    #[serde(default)]
    pub duplicate_labels: DuplicateLabelPolicy,
}

fn default_container_tag() -> String {
    "ALL_INSTANCES".to_string()
}

fn default_instance_tag() -> String {
    "instance".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            container_tag: default_container_tag(),
            instance_tag: default_instance_tag(),
            duplicate_labels: DuplicateLabelPolicy::default(),
        }
    }
}

impl ExtractorConfig {
    /// Create a new extractor configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the container tag
    pub fn with_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = tag.into();
        self
    }

    /// Builder method: set the instance tag
    pub fn with_instance_tag(mut self, tag: impl Into<String>) -> Self {
        self.instance_tag = tag.into();
        self
    }

    /// Builder method: set the duplicate label policy
    pub fn with_duplicate_labels(mut self, policy: DuplicateLabelPolicy) -> Self {
        self.duplicate_labels = policy;
        self
    }
}

/// Action names grouped into the categories of a player performance summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCategories {
    #[serde(default = "default_pass_actions")]
    pub passes: Vec<String>,
    #[serde(default = "default_dribble_actions")]
    pub dribbles: Vec<String>,
    #[serde(default = "default_defensive_actions")]
    pub defensive: Vec<String>,
    #[serde(default = "default_shooting_actions")]
    pub shooting: Vec<String>,
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_pass_actions() -> Vec<String> {
    to_strings(&[
        "Passes accurate",
        "Passes forward accurate",
        "Progressive passes accurate",
        "Inaccurate passes",
        "Incomplete passes forward",
        "Passes inaccurate",
        "Long passes accurate",
        "Long passes inaccurate",
        "Key passes",
    ])
}

fn default_dribble_actions() -> Vec<String> {
    to_strings(&[
        "Dribbling successful",
        "Dribbling unsuccessful",
        "Take on successful",
        "Take on unsuccessful",
        "Dribbles",
        "Dribbling",
    ])
}

fn default_defensive_actions() -> Vec<String> {
    to_strings(&[
        "Challenges won",
        "Challenges unsuccessful",
        "Interceptions",
        "Tackles successful",
        "Tackles unsuccessful",
        "Clearances",
        "Blocks",
        "Ball recoveries",
        "Duels won",
        "Duels lost",
    ])
}

fn default_shooting_actions() -> Vec<String> {
    to_strings(&[
        "Goals",
        "Shots on target",
        "Shots off target",
        "Shots blocked",
        "Participation in positional attacks with shots",
        "Participation in set-pieces with shots",
        "Participation in counterattacks with shots",
    ])
}

impl Default for ActionCategories {
    fn default() -> Self {
        Self {
            passes: default_pass_actions(),
            dribbles: default_dribble_actions(),
            defensive: default_defensive_actions(),
            shooting: default_shooting_actions(),
        }
    }
}

impl ActionCategories {
    pub fn is_pass(&self, action: &str) -> bool {
        self.passes.iter().any(|a| a == action)
    }

    pub fn is_dribble(&self, action: &str) -> bool {
        self.dribbles.iter().any(|a| a == action)
    }

    pub fn is_defensive(&self, action: &str) -> bool {
        self.defensive.iter().any(|a| a == action)
    }

    pub fn is_shooting(&self, action: &str) -> bool {
        self.shooting.iter().any(|a| a == action)
    }
}
