use crate::{LuaString, Table, Value};

/// Strips the control characters the game uses as formatting markers from
/// both ends of a string.
///
/// UTF-8 strings are trimmed by `char::is_control`; anything else only loses
/// ASCII control bytes, so the remaining payload stays byte-identical.
pub fn clean_string(value: &LuaString) -> LuaString {
    match value.as_str() {
        Some(text) => LuaString::from(text.trim_matches(char::is_control)),
        None => {
            let bytes = value.as_bytes();
            let start = bytes
                .iter()
                .position(|b| !b.is_ascii_control())
                .unwrap_or(bytes.len());
            let end = bytes
                .iter()
                .rposition(|b| !b.is_ascii_control())
                .map_or(start, |idx| idx + 1);
            LuaString::from(&bytes[start..end])
        }
    }
}

/// Cleans every string value, recursing into nested tables. Keys are kept.
pub fn clean_table(table: &Table) -> Table {
    table
        .iter()
        .map(|(key, value)| (key.clone(), clean_value(value)))
        .collect()
}

pub fn clean_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(clean_string(s)),
        Value::Table(table) => Value::Table(clean_table(table)),
        Value::Integer(_) | Value::Float(_) | Value::Boolean(_) => value.clone(),
    }
}
