use chrono::{DateTime, TimeZone, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use reify_core::{
    format_commands, FailurePolicy, FormatError, FormatterConfig, SqlFormatter as _,
    SqlServerFormatter,
};
use reify_types::{CapturedCommand, CapturedParameter, ExecuteType};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[pyclass]
struct SqlFormatter {
    inner: Arc<SqlServerFormatter>,
}

#[pymethods]
impl SqlFormatter {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(payload) => FormatterConfig::from_json(payload).map_err(format_error)?,
            None => FormatterConfig::default(),
        };
        Ok(Self {
            inner: Arc::new(SqlServerFormatter::new(config)),
        })
    }

    fn format_sql(&self, command_json: &str) -> PyResult<String> {
        let command = parse_json::<CommandInput>(command_json)?.to_command()?;
        self.inner.format_sql(&command).map_err(format_error)
    }

    fn async_format_sql<'p>(&self, py: Python<'p>, command_json: String) -> PyResult<&'p PyAny> {
        let formatter = self.inner.clone();
        pyo3_asyncio::tokio::future_into_py(py, async move {
            let command = parse_json::<CommandInput>(&command_json)?.to_command()?;
            let script = tokio::task::spawn_blocking(move || {
                formatter.format_sql(&command).map_err(format_error)
            }).await.map_err(py_error)??;
            Ok(script)
        })
    }

    #[pyo3(signature = (commands_json, policy=None))]
    fn format_commands(&self, commands_json: &str, policy: Option<&str>) -> PyResult<String> {
        let commands = parse_commands(commands_json)?;
        let policy = resolve_policy(policy, self.inner.config())?;
        let results =
            format_commands(self.inner.as_ref(), &commands, policy).map_err(format_error)?;
        to_json(&results)
    }

    #[pyo3(signature = (commands_json, policy=None))]
    fn async_format_commands<'p>(
        &self,
        py: Python<'p>,
        commands_json: String,
        policy: Option<String>,
    ) -> PyResult<&'p PyAny> {
        let formatter = self.inner.clone();
        pyo3_asyncio::tokio::future_into_py(py, async move {
            let commands = parse_commands(&commands_json)?;
            let policy = resolve_policy(policy.as_deref(), formatter.config())?;
            let json = tokio::task::spawn_blocking(move || {
                let results = format_commands(formatter.as_ref(), &commands, policy)
                    .map_err(format_error)?;
                to_json(&results)
            }).await.map_err(py_error)??;
            Ok(json)
        })
    }
}

#[pymodule]
fn _core(_py: Python, module: &PyModule) -> PyResult<()> {
    pyo3_log::init();
    module.add_class::<SqlFormatter>()?;
    Ok(())
}

/// Wire form of a captured command. Timestamps may arrive as RFC 3339 text
/// or epoch milliseconds.
#[derive(Deserialize)]
struct CommandInput {
    #[serde(alias = "CommandString")]
    command_text: String,
    #[serde(default, alias = "Parameters")]
    parameters: Vec<CapturedParameter>,
    #[serde(default, alias = "ExecuteType")]
    execute_type: ExecuteType,
    #[serde(default)]
    started_at: Option<String>,
    #[serde(default)]
    started_at_ms: Option<i64>,
    #[serde(default, alias = "DurationMilliseconds")]
    duration_ms: Option<f64>,
}

impl CommandInput {
    fn to_command(self) -> PyResult<CapturedCommand> {
        Ok(CapturedCommand {
            command_text: self.command_text,
            parameters: self.parameters,
            execute_type: self.execute_type,
            started_at: parse_optional_timestamp(self.started_at_ms, self.started_at)?,
            duration_ms: self.duration_ms,
        })
    }
}

fn parse_commands(payload: &str) -> PyResult<Vec<CapturedCommand>> {
    parse_json::<Vec<CommandInput>>(payload)?
        .into_iter()
        .map(CommandInput::to_command)
        .collect()
}

fn resolve_policy(policy: Option<&str>, config: &FormatterConfig) -> PyResult<FailurePolicy> {
    match policy {
        None => Ok(config.failure_policy),
        Some("abort") => Ok(FailurePolicy::Abort),
        Some("annotate") => Ok(FailurePolicy::Annotate),
        Some(other) => Err(PyValueError::new_err(format!(
            "invalid failure policy: {}",
            other
        ))),
    }
}

fn parse_json<T: DeserializeOwned>(payload: &str) -> PyResult<T> {
    serde_json::from_str(payload).map_err(py_error)
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(py_error)
}

fn parse_optional_timestamp(
    ts_ms: Option<i64>,
    ts: Option<String>,
) -> PyResult<Option<DateTime<Utc>>> {
    match (ts_ms, ts) {
        (Some(ms), _) => Ok(Some(parse_millis(ms)?)),
        (None, Some(text)) => Ok(Some(parse_rfc3339(&text)?)),
        (None, None) => Ok(None),
    }
}

fn parse_millis(ms: i64) -> PyResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| PyValueError::new_err("invalid millisecond timestamp"))
}

fn parse_rfc3339(value: &str) -> PyResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(py_error)
}

fn format_error(err: FormatError) -> PyErr {
    PyValueError::new_err(match err {
        FormatError::MalformedCapture { parameter, reason } => {
            format!("malformed capture for {}: {}", parameter, reason)
        }
        FormatError::InvalidConfig(message) => format!("invalid config: {}", message),
    })
}

fn py_error<E: std::fmt::Display>(err: E) -> PyErr {
    PyValueError::new_err(err.to_string())
}
