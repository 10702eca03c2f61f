//! Execution messages passed to the pre/post execution hooks.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message the host hands to execution hooks.
///
/// Only `prompt` has a meaning to extensions; every other field is carried
/// through untouched so chained hooks see exactly what the host sent. Hosts
/// put whatever they like in `prompt` (an id, a list of outputs, an object),
/// so it is kept as a raw JSON value.
///
/// # Example
///
/// ```
/// use feishu_canvas_host::message::ExecutionMessage;
///
/// let message: ExecutionMessage =
///     serde_json::from_str(r#"{"prompt": "p-42", "node": "7"}"#).unwrap();
/// assert!(message.has_prompt());
/// assert_eq!(message.fields["node"], "7");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMessage {
    /// Prompt payload of the run that produced this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Value>,
    /// Remaining fields, passed through unchanged.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ExecutionMessage {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prompt payload.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<Value>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Adds a pass-through field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns true if the message carries a truthy prompt.
    ///
    /// `null`, `false`, `0` and `""` do not count. Arrays and objects always
    /// count, even when empty.
    #[must_use]
    pub fn has_prompt(&self) -> bool {
        self.prompt.as_ref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl fmt::Display for ExecutionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}
