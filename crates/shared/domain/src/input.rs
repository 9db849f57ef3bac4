//! Raw, untyped input as it arrives from a transport.
//!
//! Operations accept `Input` for every caller-supplied field so that
//! presence and type can be checked (and reported with stable messages)
//! before anything is turned into a typed domain value.

use std::collections::BTreeMap;

use serde_json::Value;

static MISSING: Input = Input::Missing;

/// A value of unknown shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Input {
    /// Not supplied at all
    #[default]
    Missing,
    /// Explicit null
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Input>),
    Object(BTreeMap<String, Input>),
}

impl Input {
    /// True for `Missing` and `Null`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Input::Missing | Input::Null)
    }

    /// Look up a key on an object; anything else yields `Missing`.
    pub fn field(&self, key: &str) -> &Input {
        match self {
            Input::Object(map) => map.get(key).unwrap_or(&MISSING),
            _ => &MISSING,
        }
    }

    /// Render the value the way a JavaScript `String(value)` would.
    ///
    /// Validation messages embed this rendering, so `[]` becomes the empty
    /// string and `{}` becomes `[object Object]`.
    pub fn stringify(&self) -> String {
        match self {
            Input::Missing => "undefined".to_string(),
            Input::Null => "null".to_string(),
            Input::Bool(b) => b.to_string(),
            Input::Number(n) => format_number(*n),
            Input::String(s) => s.clone(),
            Input::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_absent() {
                        String::new()
                    } else {
                        item.stringify()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Input::Object(_) => "[object Object]".to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Input::Null,
            Value::Bool(b) => Input::Bool(b),
            Value::Number(n) => Input::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Input::String(s),
            Value::Array(items) => Input::Array(items.into_iter().map(Input::from).collect()),
            Value::Object(map) => {
                Input::Object(map.into_iter().map(|(k, v)| (k, Input::from(v))).collect())
            }
        }
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Input::Missing)
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(items: Vec<T>) -> Self {
        Input::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Input::String(s.to_string())
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Input::String(s)
    }
}

impl From<f64> for Input {
    fn from(n: f64) -> Self {
        Input::Number(n)
    }
}

impl From<i64> for Input {
    fn from(n: i64) -> Self {
        Input::Number(n as f64)
    }
}

impl From<bool> for Input {
    fn from(b: bool) -> Self {
        Input::Bool(b)
    }
}
