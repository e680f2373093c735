use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteType {
    #[default]
    None,
    NonQuery,
    Scalar,
    Reader,
}

/// A recorded database command as handed over by the timing-capture layer.
///
/// Field aliases accept the PascalCase names profilers emit in their JSON
/// results, so a captured timing can be deserialized without remapping.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CapturedCommand {
    #[serde(alias = "CommandString")]
    pub command_text: String,
    #[serde(default, alias = "Parameters")]
    pub parameters: Vec<CapturedParameter>,
    #[serde(default, alias = "ExecuteType")]
    pub execute_type: ExecuteType,
    #[serde(default, alias = "StartedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "DurationMilliseconds")]
    pub duration_ms: Option<f64>,
}

impl CapturedCommand {
    pub fn new(command_text: impl Into<String>) -> Self {
        Self {
            command_text: command_text.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, parameter: CapturedParameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CapturedParameter {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "DbType")]
    pub declared_type: String,
    /// Serialized bound value; `None` stands for SQL NULL.
    #[serde(default, alias = "Value")]
    pub value: Option<String>,
    /// Declared maximum length, `0` or negative when unspecified.
    #[serde(default, alias = "Size")]
    pub size: i32,
}

impl CapturedParameter {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        value: Option<&str>,
        size: i32,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            value: value.map(str::to_string),
            size,
        }
    }

    /// The captured value, treating an empty string the same as absent.
    pub fn non_empty_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Outcome of formatting one command inside a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedCommand {
    pub command_text: String,
    pub script: String,
    #[serde(default)]
    pub reconstruction_failed: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
}
