use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Post,
    Comment,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Post => "post",
            RecordKind::Comment => "comment",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of user-authored text pulled from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedRecord {
    pub kind: RecordKind,
    pub text: String,
}

impl ScrapedRecord {
    pub fn post(text: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Post,
            text: text.into(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Comment,
            text: text.into(),
        }
    }
}

/// Everything collected for one user in a single run.
#[derive(Debug, Clone, Default)]
pub struct UserActivity {
    pub posts: Vec<ScrapedRecord>,
    pub comments: Vec<ScrapedRecord>,
}

impl UserActivity {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }
}

/// Trims a raw username and rejects values that cannot form a profile path.
pub fn normalize_username(raw: &str) -> Result<String, crate::CoreError> {
    let username = raw.trim();
    let username = username.strip_prefix("u/").unwrap_or(username);

    if username.is_empty() {
        return Err(crate::CoreError::InvalidInput {
            message: "username must not be empty".to_string(),
        });
    }
    if username
        .chars()
        .any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace())
    {
        return Err(crate::CoreError::InvalidInput {
            message: format!("'{}' is not a valid Reddit username", username),
        });
    }

    Ok(username.to_string())
}
