use std::{fmt, ops::Index};

use serde::{Serialize, Serializer};

use crate::num::{self, Numeric};

use super::{LuaString, Table};

/// One decoded value. Every consumer matches all five cases.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(LuaString),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Table(Table),
}

impl Value {
    /// Folds a wire double into `Integer` when it has no fractional part and
    /// fits in `i64`, `Float` otherwise.
    pub fn from_number(value: f64) -> Self {
        match num::collapse(value) {
            Numeric::Integer(i) => Value::Integer(i),
            Numeric::Float(f) => Value::Float(f),
        }
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    pub fn as_lua_str(&self) -> Option<&LuaString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Only succeeds for strings holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_lua_str().and_then(LuaString::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Widens integers, since both came from the same wire double.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|table| table.get(key))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Table(_) => "table",
        }
    }

    /// Canonical string form used when this value is a table key.
    pub fn into_key(self) -> LuaString {
        match self {
            Value::String(s) => s,
            Value::Integer(i) => num::format_integer(i).into(),
            Value::Float(f) => num::format_float(f).into(),
            Value::Boolean(b) => if b { "true" } else { "false" }.into(),
            table @ Value::Table(_) => table.to_string().into(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(fl) => write!(f, "{}", num::format_float(*fl)),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Table(table) => {
                write!(f, "{{")?;
                for (i, (k, v)) in table.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Value::Table(table) => table.get(key).unwrap_or_else(|| {
                panic!("key '{key}' not found in table with {} entries", table.len())
            }),
            _ => panic!("cannot index into non-table value of type {}", self.type_name()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<LuaString> for Value {
    fn from(value: LuaString) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => s.serialize(serializer),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => serde_json::Value::String(s.to_str_lossy().into_owned()),
            Value::Integer(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Boolean(b) => serde_json::Value::Bool(b),
            Value::Table(table) => table.into(),
        }
    }
}

impl From<Table> for serde_json::Value {
    fn from(table: Table) -> Self {
        let mut object = serde_json::Map::with_capacity(table.len());
        for (key, value) in table {
            object.insert(key.to_str_lossy().into_owned(), value.into());
        }
        serde_json::Value::Object(object)
    }
}
