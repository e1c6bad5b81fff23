//! Output formatting utilities for the CLI.

use serde::Serialize;
use serde_json::json;

use crate::domain::errors::DomainError;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// JSON body for a failed command: message, kind and status code.
///
/// Domain failures keep their classification; anything else is reported as
/// an internal error.
pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    match err.downcast_ref::<DomainError>() {
        Some(domain) => {
            let mut body = json!({
                "error": format!("{err:#}"),
                "kind": domain.kind().as_str(),
                "status": domain.status_code(),
            });
            if !domain.field_errors().is_empty() {
                body["fields"] = json!(domain.field_errors());
            }
            body
        }
        None => json!({
            "error": format!("{err:#}"),
            "kind": "internal",
            "status": 500,
        }),
    }
}

/// Truncate a string to a maximum number of characters, appending "..." if
/// truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
