use reify_types::CapturedCommand;

mod config;
mod encode;
mod formatter;
mod resolve;
mod session;
mod table_valued;

pub use config::{FailurePolicy, FormatterConfig};
pub use encode::encode_value;
pub use formatter::SqlServerFormatter;
pub use resolve::{db_type_from_str, db_type_to_str, resolve_type, DbType, ResolvedType};
pub use session::format_commands;
pub use table_valued::decode_rows;

pub type FormatResult<T> = Result<T, FormatError>;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("malformed capture for parameter {parameter}: {reason}")]
    MalformedCapture { parameter: String, reason: String },
    #[error("invalid formatter config: {0}")]
    InvalidConfig(String),
}

/// Turns a captured command into a script that can be run on its own.
pub trait SqlFormatter: Send + Sync {
    fn format_sql(&self, command: &CapturedCommand) -> FormatResult<String>;
}
