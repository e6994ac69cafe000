//! Pick and shuffle over untyped JSON values, for sketches that read their
//! palettes and word lists from configuration.

use serde_json::Value;

use crate::{Generator, RandomError};

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(value: &Value) -> RandomError {
    RandomError::TypeMismatch {
        expected: "array or string",
        found: type_name(value),
    }
}

impl Generator {
    /// Picks an array element or a character of a string.
    ///
    /// Empty arrays and strings yield `Ok(None)`; any other JSON type is a
    /// [`RandomError::TypeMismatch`].
    pub fn pick_value(&mut self, value: &Value) -> Result<Option<Value>, RandomError> {
        match value {
            Value::Array(items) => Ok(self.pick(items).cloned()),
            Value::String(text) => Ok(self.pick_char(text).map(|c| Value::String(c.to_string()))),
            other => Err(mismatch(other)),
        }
    }

    /// Shuffled copy of an array or string, see [`Generator::shuffle`].
    pub fn shuffle_value(&mut self, value: &Value) -> Result<Value, RandomError> {
        match value {
            Value::Array(items) => Ok(Value::Array(self.shuffle(items))),
            Value::String(text) => Ok(Value::String(self.shuffle_str(text))),
            other => Err(mismatch(other)),
        }
    }
}
