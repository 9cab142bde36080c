//! Request DTOs for the matchup API
//!
//! Defines the structure of incoming query parameters.

use serde::Deserialize;

/// Maximum accepted action name length.
pub const MAX_ACTION_NAME_LENGTH: usize = 64;

/// Query parameters for GET /actions/:name
///
/// # Fields
/// - `reference`: Optional URL of the action resource. When omitted the
///   catalog's default action URL for the name is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionQuery {
    #[serde(default)]
    pub reference: Option<String>,
}

impl ActionQuery {
    /// Validates the action name and reference.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return Some("Action name cannot be empty".to_string());
        }
        if name.len() > MAX_ACTION_NAME_LENGTH {
            return Some(format!(
                "Action name exceeds maximum length of {} characters",
                MAX_ACTION_NAME_LENGTH
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Some(format!("Invalid action name '{}'", name));
        }
        if let Some(reference) = &self.reference {
            if !(reference.starts_with("http://") || reference.starts_with("https://")) {
                return Some("Reference must be an http(s) URL".to_string());
            }
        }
        None
    }
}
