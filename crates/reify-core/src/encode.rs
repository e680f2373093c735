use reify_types::CapturedParameter;

use crate::{DbType, FormatterConfig};

/// Renders a scalar parameter's captured value as a SQL literal.
pub fn encode_value(
    parameter: &CapturedParameter,
    db_type: DbType,
    config: &FormatterConfig,
) -> String {
    let Some(value) = parameter.non_empty_value() else {
        return "null".to_string();
    };

    match db_type {
        DbType::Boolean => {
            if value == "True" {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        // Captured as ready-made numeric or 0x tokens.
        DbType::Int16 | DbType::Int32 | DbType::Int64 | DbType::Binary => value.to_string(),
        DbType::String | DbType::StringFixedLength => {
            format!("{}{}", config.wide_prefix, quote_literal(value))
        }
        _ => quote_literal(value),
    }
}

pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
