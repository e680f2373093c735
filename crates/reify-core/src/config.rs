use serde::{Deserialize, Serialize};

use crate::{FormatError, FormatResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The first malformed capture fails the whole batch.
    #[default]
    Abort,
    /// A malformed capture renders the bare command under a diagnostic comment.
    Annotate,
}

/// Dialect knobs for script rendering. Built once and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterConfig {
    #[serde(default = "default_max_length")]
    pub max_length: i32,
    #[serde(default = "default_unbounded_length")]
    pub unbounded_length: String,
    #[serde(default = "default_parameter_marker")]
    pub parameter_marker: char,
    #[serde(default = "default_wide_prefix")]
    pub wide_prefix: String,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            unbounded_length: default_unbounded_length(),
            parameter_marker: default_parameter_marker(),
            wide_prefix: default_wide_prefix(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl FormatterConfig {
    pub fn from_json(payload: &str) -> FormatResult<Self> {
        serde_json::from_str(payload).map_err(|err| FormatError::InvalidConfig(err.to_string()))
    }
}

fn default_max_length() -> i32 {
    8000
}

fn default_unbounded_length() -> String {
    "max".to_string()
}

fn default_parameter_marker() -> char {
    '@'
}

fn default_wide_prefix() -> String {
    "N".to_string()
}
