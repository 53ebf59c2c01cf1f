//! Secret scrubbing for diagnostic output.
//!
//! Diagnostic traces carry operation params and records verbatim, which may
//! include credentials submitted through admin forms. Values under
//! secret-looking keys are replaced wholesale; other strings are scanned for
//! inline credentials such as bearer tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Placeholder written in place of redacted values.
pub const REDACTED: &str = "[REDACTED]";

static SENSITIVE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(password|passwd|secret|token|api[_-]?key|private[_-]?key|credential|authorization)").unwrap());

static INLINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(authorization:\s+)([^\s]+(?:\s+[^\s]+)*)").unwrap(),
        Regex::new(r"(?i)((?:^|\b)Bearer\s+)([A-Za-z0-9\-._~+/]+=*)").unwrap(),
        Regex::new(r"(?i)((?:^|\b)Basic\s+)([A-Za-z0-9+/]+=*)").unwrap(),
        Regex::new(r"(?i)([A-Z0-9_]*?(?:KEY|TOKEN|SECRET|PASSWORD)=)([^\s&]+)").unwrap(),
        Regex::new(r"(?i)(://[^:/@\s]+:)([^@\s]+)(@)").unwrap(),
    ]
});

/// Redact inline credentials inside free text.
///
/// ```rust
/// use halbridge_util::redact_sensitive;
///
/// assert_eq!(redact_sensitive("Authorization: Bearer abc.def"), "Authorization: [REDACTED]");
/// assert_eq!(redact_sensitive("API_TOKEN=xyz page=2"), "API_TOKEN=[REDACTED] page=2");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in INLINE_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |captures: &regex::Captures| {
                let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
                let suffix = captures.get(3).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}{REDACTED}{suffix}")
            })
            .to_string();
    }
    redacted
}

/// Redact a JSON document, preserving its structure.
pub fn redact_json(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(redact_sensitive(text)),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, entry) in map {
                let redacted = if SENSITIVE_KEY.is_match(key) && !entry.is_null() {
                    Value::String(REDACTED.to_string())
                } else {
                    redact_json(entry)
                };
                out.insert(key.clone(), redacted);
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
