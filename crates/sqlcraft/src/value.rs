//! Bind values and the value-conversion hook.
//!
//! Builders never interpolate user data into SQL text directly. Every bound
//! value is normalized into a [`Value`] and carried in an ordered list next to
//! the generated statement, one entry per `?` placeholder. The [`IntoValue`]
//! trait is the conversion seam: anything a caller passes to a comparison
//! method goes through it before it reaches the bind list.
//!
//! [`Value::to_literal`] exists for the two places where SQL text needs an
//! inline rendering: literal marker mode and `DEFAULT <v>` constraint
//! fragments. Text literals are single-quote escaped.

use crate::error::BuildResult;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// A normalized bind value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit integer (all integer inputs widen to this)
    Int(i64),
    /// Double-precision float
    Float(f64),
    /// Text value
    Text(String),
    /// UUID value
    Uuid(Uuid),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time without timezone
    Timestamp(NaiveDateTime),
    /// JSON document
    Json(serde_json::Value),
}

impl Value {
    /// Normalize any serializable type into a JSON value.
    pub fn json<T: serde::Serialize>(value: &T) -> BuildResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Check whether this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render the value as an inline SQL literal.
    ///
    /// Used by literal marker mode and `DEFAULT` constraint formatting.
    /// Text is wrapped in single quotes with embedded quotes doubled.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => quote_text(s),
            Self::Uuid(u) => format!("'{u}'"),
            Self::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Self::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S")),
            Self::Json(j) => quote_text(&j.to_string()),
        }
    }
}

fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Conversion into a [`Value`].
///
/// This is the normalization hook applied to every operand before it is
/// added to the bind list. `Option::None` maps to [`Value::Null`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! impl_into_value_int {
    ($($t:ty),*) => {
        $(impl IntoValue for $t {
            fn into_value(self) -> Value {
                Value::Int(i64::from(self))
            }
        })*
    };
}

impl_into_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for Uuid {
    fn into_value(self) -> Value {
        Value::Uuid(self)
    }
}

impl IntoValue for NaiveDate {
    fn into_value(self) -> Value {
        Value::Date(self)
    }
}

impl IntoValue for NaiveDateTime {
    fn into_value(self) -> Value {
        Value::Timestamp(self)
    }
}

impl IntoValue for serde_json::Value {
    fn into_value(self) -> Value {
        Value::Json(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}
