use tracing::debug;

use crate::encode::quote_literal;
use crate::{FormatError, FormatResult};

/// Decodes a table-valued payload (a JSON array of rows, each an array of
/// strings) into the body of a `VALUES` list.
///
/// Returns `Ok(None)` when the payload is absent, empty, or holds no rows.
pub fn decode_rows(parameter: &str, payload: Option<&str>) -> FormatResult<Option<String>> {
    let Some(payload) = payload.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let rows: Vec<Vec<String>> =
        serde_json::from_str(payload).map_err(|err| FormatError::MalformedCapture {
            parameter: parameter.to_string(),
            reason: err.to_string(),
        })?;

    debug!(parameter, rows = rows.len(), "Decoded table-valued rows");

    if rows.is_empty() {
        return Ok(None);
    }

    let tuples: Vec<String> = rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|cell| quote_literal(cell)).collect();
            format!("({})", cells.join(","))
        })
        .collect();
    Ok(Some(tuples.join(",\n")))
}
