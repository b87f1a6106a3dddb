//! Normalised results of a single HTTP call

use serde_json::Value;

/// Response body as the harness sees it
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
    Empty,
}

impl Body {
    /// Parse raw body text, keeping it verbatim when it is not JSON
    pub fn parse(text: String) -> Self {
        if text.trim().is_empty() {
            return Body::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(text),
        }
    }

    fn as_text(&self) -> String {
        match self {
            Body::Json(value) => value.to_string(),
            Body::Text(text) => text.clone(),
            Body::Empty => String::new(),
        }
    }
}

/// Result of one HTTP call
///
/// Either the server answered (any status) or no response was obtained.
/// Every body accessor returns `None` for a transport failure, so checks
/// against the body simply fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Response { status: u16, body: Body },
    TransportFailure { error: String },
}

impl Outcome {
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Response { status, .. } => Some(*status),
            Outcome::TransportFailure { .. } => None,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Outcome::TransportFailure { .. })
    }

    pub fn json(&self) -> Option<&Value> {
        match self {
            Outcome::Response {
                body: Body::Json(value),
                ..
            } => Some(value),
            _ => None,
        }
    }

    /// Look up a field by JSON pointer, e.g. `/user/id`
    pub fn field(&self, pointer: &str) -> Option<&Value> {
        self.json().and_then(|value| value.pointer(pointer))
    }

    /// Whether the key is present at all (a `null` value counts)
    pub fn has_field(&self, pointer: &str) -> bool {
        self.field(pointer).is_some()
    }

    pub fn str_field(&self, pointer: &str) -> Option<&str> {
        self.field(pointer).and_then(Value::as_str)
    }

    pub fn bool_field(&self, pointer: &str) -> Option<bool> {
        self.field(pointer).and_then(Value::as_bool)
    }

    /// Numeric field, also accepting decimal strings such as `"5.0"`
    pub fn number_field(&self, pointer: &str) -> Option<f64> {
        match self.field(pointer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Identifier field as a string; numeric ids are stringified
    pub fn id_field(&self, pointer: &str) -> Option<String> {
        match self.field(pointer)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// `success: true` in the body
    pub fn succeeded(&self) -> bool {
        self.bool_field("/success") == Some(true)
    }

    /// The `count` field, 0 when absent
    pub fn count(&self) -> u64 {
        self.field("/count").and_then(Value::as_u64).unwrap_or(0)
    }

    /// Body text truncated to `max` characters, for diagnostics
    pub fn snippet(&self, max: usize) -> String {
        match self {
            Outcome::Response { body, .. } => body.as_text().chars().take(max).collect(),
            Outcome::TransportFailure { error } => error.clone(),
        }
    }
}

/// An outcome paired with the single status it is judged against
#[derive(Debug, Clone)]
pub struct Exchange {
    pub expected_status: u16,
    pub outcome: Outcome,
}

impl Exchange {
    /// The base pass condition for the call itself
    pub fn met(&self) -> bool {
        self.outcome.status() == Some(self.expected_status)
    }
}
