use reify_types::{CapturedCommand, FormattedCommand};
use tracing::{info, instrument, warn};

use crate::{FailurePolicy, FormatResult, SqlFormatter};

/// Formats every command of a profiling session, in input order.
#[instrument(skip_all, fields(count = commands.len(), policy = ?policy))]
pub fn format_commands<F: SqlFormatter + ?Sized>(
    formatter: &F,
    commands: &[CapturedCommand],
    policy: FailurePolicy,
) -> FormatResult<Vec<FormattedCommand>> {
    let mut results = Vec::with_capacity(commands.len());
    let mut failed = 0usize;

    for command in commands {
        let formatted = match formatter.format_sql(command) {
            Ok(script) => formatted_command(command, script, None),
            Err(err) => match policy {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Annotate => {
                    warn!("Parameter reconstruction failed: {}", err);
                    failed += 1;
                    let script = format!(
                        "-- parameter reconstruction failed: {}\n{}",
                        err, command.command_text
                    );
                    formatted_command(command, script, Some(err.to_string()))
                }
            },
        };
        results.push(formatted);
    }

    info!(
        formatted = results.len(),
        failed,
        "Session commands formatted"
    );
    Ok(results)
}

fn formatted_command(
    command: &CapturedCommand,
    script: String,
    error: Option<String>,
) -> FormattedCommand {
    FormattedCommand {
        command_text: command.command_text.clone(),
        script,
        reconstruction_failed: error.is_some(),
        error,
        started_at: command.started_at,
        duration_ms: command.duration_ms,
    }
}
