use reify_types::{CapturedCommand, CapturedParameter};
use std::fmt::Write;
use tracing::debug;

use crate::{
    decode_rows, encode_value, resolve_type, FormatResult, FormatterConfig, ResolvedType,
    SqlFormatter,
};

/// Formats captured commands for SQL Server, declaring every parameter ahead
/// of the original command text.
#[derive(Debug, Clone, Default)]
pub struct SqlServerFormatter {
    config: FormatterConfig,
}

impl SqlServerFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    fn parameter_name(&self, name: &str) -> String {
        let marker = self.config.parameter_marker;
        if name.starts_with(marker) {
            name.to_string()
        } else {
            format!("{}{}", marker, name)
        }
    }

    fn write_parameter(
        &self,
        buffer: &mut String,
        parameter: &CapturedParameter,
    ) -> FormatResult<()> {
        let name = self.parameter_name(&parameter.name);

        match resolve_type(&parameter.declared_type, parameter.size, &self.config) {
            ResolvedType::Scalar { db_type, keyword } => {
                let value = encode_value(parameter, db_type, &self.config);
                let _ = writeln!(buffer, "DECLARE {} {} = {};", name, keyword, value);
            }
            ResolvedType::PassThrough(type_name) => {
                debug!(parameter = %name, type_name, "Declaring table-valued parameter");
                let rows = decode_rows(&name, parameter.value.as_deref())?;
                let _ = write!(buffer, "DECLARE {} {};", name, type_name);
                if let Some(rows) = rows {
                    let _ = write!(buffer, "\nINSERT INTO {} VALUES {};", name, rows);
                }
                buffer.push('\n');
            }
        }
        Ok(())
    }
}

impl SqlFormatter for SqlServerFormatter {
    fn format_sql(&self, command: &CapturedCommand) -> FormatResult<String> {
        if command.parameters.is_empty() {
            return Ok(command.command_text.clone());
        }

        let mut buffer = String::new();
        for parameter in &command.parameters {
            self.write_parameter(&mut buffer, parameter)?;
        }
        buffer.push_str("\n\n");
        buffer.push_str(&command.command_text);
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormatError;
    use serde_json::json;

    fn format(command: &CapturedCommand) -> String {
        SqlServerFormatter::default().format_sql(command).unwrap()
    }

    #[test]
    fn no_parameters_returns_command_text_verbatim() {
        let command = CapturedCommand::new("SELECT 1\r\n  -- trailing  ");
        assert_eq!(format(&command), "SELECT 1\r\n  -- trailing  ");
    }

    #[test]
    fn declares_scalar_parameter() {
        let command = CapturedCommand::new("SELECT * FROM T WHERE x=@x")
            .with_parameter(CapturedParameter::new("x", "Int32", Some("5"), 0));
        assert_eq!(
            format(&command),
            "DECLARE @x int = 5;\n\n\nSELECT * FROM T WHERE x=@x"
        );
    }

    #[test]
    fn declares_wide_string_with_length() {
        let command = CapturedCommand::new("SELECT @s")
            .with_parameter(CapturedParameter::new("@s", "String", Some("it's"), 10));
        assert_eq!(
            format(&command),
            "DECLARE @s nvarchar(10) = N'it''s';\n\n\nSELECT @s"
        );
    }

    #[test]
    fn name_normalization_is_idempotent() {
        let bare = CapturedCommand::new("q")
            .with_parameter(CapturedParameter::new("id", "Int64", Some("1"), 0));
        let marked = CapturedCommand::new("q")
            .with_parameter(CapturedParameter::new("@id", "Int64", Some("1"), 0));
        assert_eq!(format(&bare), format(&marked));
        assert!(format(&bare).starts_with("DECLARE @id bigint = 1;"));
    }

    #[test]
    fn declares_and_populates_table_valued_parameter() {
        let rows = json!([["1", "a"], ["2", "b"]]).to_string();
        let command = CapturedCommand::new("EXEC dbo.Load @p").with_parameter(
            CapturedParameter::new("p", "dbo.MyTableType", Some(rows.as_str()), 0),
        );
        assert_eq!(
            format(&command),
            "DECLARE @p dbo.MyTableType;\nINSERT INTO @p VALUES ('1','a'),\n('2','b');\n\n\nEXEC dbo.Load @p"
        );
    }

    #[test]
    fn empty_table_valued_parameter_skips_insert() {
        let command = CapturedCommand::new("EXEC dbo.Load @p")
            .with_parameter(CapturedParameter::new("p", "dbo.MyTableType", None, 0));
        assert_eq!(
            format(&command),
            "DECLARE @p dbo.MyTableType;\n\n\nEXEC dbo.Load @p"
        );
    }

    #[test]
    fn keeps_parameter_order() {
        let command = CapturedCommand::new("SELECT @b, @a, @c")
            .with_parameter(CapturedParameter::new("b", "Boolean", Some("True"), 0))
            .with_parameter(CapturedParameter::new("a", "AnsiString", None, 9000))
            .with_parameter(CapturedParameter::new(
                "c",
                "Guid",
                Some("0f8fad5b-d9cb-469f-a165-70867728950e"),
                0,
            ));
        assert_eq!(
            format(&command),
            "DECLARE @b bit = 1;\n\
             DECLARE @a varchar(max) = null;\n\
             DECLARE @c uniqueidentifier = '0f8fad5b-d9cb-469f-a165-70867728950e';\n\
             \n\n\
             SELECT @b, @a, @c"
        );
    }

    #[test]
    fn malformed_table_payload_is_reported() {
        let command = CapturedCommand::new("EXEC dbo.Load @p")
            .with_parameter(CapturedParameter::new("x", "Int32", Some("1"), 0))
            .with_parameter(CapturedParameter::new("p", "dbo.MyTableType", Some("[1,2"), 0));
        let err = SqlServerFormatter::default().format_sql(&command).unwrap_err();
        assert!(matches!(
            err,
            FormatError::MalformedCapture { ref parameter, .. } if parameter == "@p"
        ));
    }

    #[test]
    fn custom_marker_is_applied_once() {
        let formatter = SqlServerFormatter::new(FormatterConfig {
            parameter_marker: ':',
            ..FormatterConfig::default()
        });
        let command = CapturedCommand::new("q")
            .with_parameter(CapturedParameter::new(":a", "Int32", Some("1"), 0))
            .with_parameter(CapturedParameter::new("b", "Int32", Some("2"), 0));
        assert_eq!(
            formatter.format_sql(&command).unwrap(),
            "DECLARE :a int = 1;\nDECLARE :b int = 2;\n\n\nq"
        );
    }
}
