use crate::FormatterConfig;

/// The recognized scalar parameter type vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    AnsiString,
    Binary,
    Byte,
    Boolean,
    Currency,
    Date,
    DateTime,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    Object,
    SByte,
    Single,
    String,
    Time,
    UInt16,
    UInt32,
    UInt64,
    VarNumeric,
    AnsiStringFixedLength,
    StringFixedLength,
    Xml,
    DateTime2,
    DateTimeOffset,
}

impl DbType {
    pub const ALL: [DbType; 27] = [
        DbType::AnsiString,
        DbType::Binary,
        DbType::Byte,
        DbType::Boolean,
        DbType::Currency,
        DbType::Date,
        DbType::DateTime,
        DbType::Decimal,
        DbType::Double,
        DbType::Guid,
        DbType::Int16,
        DbType::Int32,
        DbType::Int64,
        DbType::Object,
        DbType::SByte,
        DbType::Single,
        DbType::String,
        DbType::Time,
        DbType::UInt16,
        DbType::UInt32,
        DbType::UInt64,
        DbType::VarNumeric,
        DbType::AnsiStringFixedLength,
        DbType::StringFixedLength,
        DbType::Xml,
        DbType::DateTime2,
        DbType::DateTimeOffset,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType<'a> {
    Scalar { db_type: DbType, keyword: String },
    /// Not in the scalar vocabulary; carried verbatim as a table-valued type.
    PassThrough(&'a str),
}

enum Rule {
    WithLength(&'static str),
    Fixed(&'static str),
    Verbatim,
}

fn rule_for(db_type: DbType) -> Rule {
    match db_type {
        DbType::AnsiString => Rule::WithLength("varchar"),
        DbType::String => Rule::WithLength("nvarchar"),
        DbType::AnsiStringFixedLength => Rule::WithLength("char"),
        DbType::StringFixedLength => Rule::WithLength("nchar"),
        DbType::Binary => Rule::WithLength("varbinary"),
        DbType::Byte => Rule::Fixed("tinyint"),
        DbType::Int16 => Rule::Fixed("smallint"),
        DbType::Int32 => Rule::Fixed("int"),
        DbType::Int64 => Rule::Fixed("bigint"),
        DbType::DateTime => Rule::Fixed("datetime"),
        DbType::Guid => Rule::Fixed("uniqueidentifier"),
        DbType::Boolean => Rule::Fixed("bit"),
        _ => Rule::Verbatim,
    }
}

pub fn resolve_type<'a>(
    declared_type: &'a str,
    size: i32,
    config: &FormatterConfig,
) -> ResolvedType<'a> {
    let Some(db_type) = db_type_from_str(declared_type) else {
        return ResolvedType::PassThrough(declared_type);
    };

    let keyword = match rule_for(db_type) {
        Rule::WithLength(native) => with_length(native, size, config),
        Rule::Fixed(native) => native.to_string(),
        Rule::Verbatim => declared_type.to_string(),
    };
    ResolvedType::Scalar { db_type, keyword }
}

fn with_length(native: &str, size: i32, config: &FormatterConfig) -> String {
    if size < 1 {
        return native.to_string();
    }
    if size > config.max_length {
        format!("{}({})", native, config.unbounded_length)
    } else {
        format!("{}({})", native, size)
    }
}

pub fn db_type_from_str(value: &str) -> Option<DbType> {
    match value {
        "AnsiString" => Some(DbType::AnsiString),
        "Binary" => Some(DbType::Binary),
        "Byte" => Some(DbType::Byte),
        "Boolean" => Some(DbType::Boolean),
        "Currency" => Some(DbType::Currency),
        "Date" => Some(DbType::Date),
        "DateTime" => Some(DbType::DateTime),
        "Decimal" => Some(DbType::Decimal),
        "Double" => Some(DbType::Double),
        "Guid" => Some(DbType::Guid),
        "Int16" => Some(DbType::Int16),
        "Int32" => Some(DbType::Int32),
        "Int64" => Some(DbType::Int64),
        "Object" => Some(DbType::Object),
        "SByte" => Some(DbType::SByte),
        "Single" => Some(DbType::Single),
        "String" => Some(DbType::String),
        "Time" => Some(DbType::Time),
        "UInt16" => Some(DbType::UInt16),
        "UInt32" => Some(DbType::UInt32),
        "UInt64" => Some(DbType::UInt64),
        "VarNumeric" => Some(DbType::VarNumeric),
        "AnsiStringFixedLength" => Some(DbType::AnsiStringFixedLength),
        "StringFixedLength" => Some(DbType::StringFixedLength),
        "Xml" => Some(DbType::Xml),
        "DateTime2" => Some(DbType::DateTime2),
        "DateTimeOffset" => Some(DbType::DateTimeOffset),
        _ => None,
    }
}

pub fn db_type_to_str(db_type: DbType) -> &'static str {
    match db_type {
        DbType::AnsiString => "AnsiString",
        DbType::Binary => "Binary",
        DbType::Byte => "Byte",
        DbType::Boolean => "Boolean",
        DbType::Currency => "Currency",
        DbType::Date => "Date",
        DbType::DateTime => "DateTime",
        DbType::Decimal => "Decimal",
        DbType::Double => "Double",
        DbType::Guid => "Guid",
        DbType::Int16 => "Int16",
        DbType::Int32 => "Int32",
        DbType::Int64 => "Int64",
        DbType::Object => "Object",
        DbType::SByte => "SByte",
        DbType::Single => "Single",
        DbType::String => "String",
        DbType::Time => "Time",
        DbType::UInt16 => "UInt16",
        DbType::UInt32 => "UInt32",
        DbType::UInt64 => "UInt64",
        DbType::VarNumeric => "VarNumeric",
        DbType::AnsiStringFixedLength => "AnsiStringFixedLength",
        DbType::StringFixedLength => "StringFixedLength",
        DbType::Xml => "Xml",
        DbType::DateTime2 => "DateTime2",
        DbType::DateTimeOffset => "DateTimeOffset",
    }
}
