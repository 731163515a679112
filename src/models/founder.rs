use serde::{Deserialize, Serialize};

/// One founder discovered for the company.
///
/// `email` is `None` when no provider could resolve it; that is an expected
/// state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FounderRecord {
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: Option<String>,
    #[serde(rename = "linkedin")]
    pub linkedin_url: Option<String>,
    pub generated_email: Option<String>,
}

impl FounderRecord {
    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

/// Split a full name on the first space: "Ada King Lovelace" -> ("Ada", "King Lovelace").
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
