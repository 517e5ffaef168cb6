use crate::phrases::Bucket;
use persona_core::RecordKind;
use std::fmt;

pub const NOT_ENOUGH_DATA: &str = "Not enough data to generate a persona.";

pub const MAX_CITATIONS: usize = 5;

const QUOTE_KEEP_CHARS: usize = 197;
const QUOTE_ELLIPSIS_OVER: usize = 200;
const SNIPPET_CHARS: usize = 80;

const RULE_WIDTH: usize = 40;

/// Keeps the first `keep` characters and appends "..." only when `text`
/// is longer than `ellipsis_over` characters.
pub fn truncate_chars(text: &str, keep: usize, ellipsis_over: usize) -> String {
    let mut out: String = text.chars().take(keep).collect();
    if text.chars().count() > ellipsis_over {
        out.push_str("...");
    }
    out
}

pub fn quote_excerpt(text: &str) -> String {
    truncate_chars(text, QUOTE_KEEP_CHARS, QUOTE_ELLIPSIS_OVER)
}

pub fn citation_snippet(text: &str) -> String {
    truncate_chars(text, SNIPPET_CHARS, SNIPPET_CHARS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub snippet: String,
    pub kind: RecordKind,
}

#[derive(Debug, Clone, Default)]
pub struct PersonaReport {
    pub username: String,
    pub traits: Vec<String>,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    /// Already truncated.
    pub quote: String,
    pub citations: Vec<Citation>,
}

impl PersonaReport {
    pub fn phrases(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Trait => &self.traits,
            Bucket::Interest => &self.interests,
            Bucket::Goal => &self.goals,
        }
    }

    pub fn render(&self) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut lines: Vec<String> = vec![
            "USER PERSONA".to_string(),
            "=".repeat(RULE_WIDTH),
            String::new(),
            "Name             : Unknown".to_string(),
            format!("Reddit Handle    : u/{}", self.username),
            "Age Group        : Not evident".to_string(),
            "Location         : Not available".to_string(),
            "Occupation       : Not evident".to_string(),
        ];

        for bucket in Bucket::ALL {
            lines.push(String::new());
            lines.push(rule.clone());
            lines.push(bucket.heading().to_string());
            lines.push(rule.clone());
            lines.extend(self.phrases(bucket).iter().map(|p| format!("• {}", p)));
        }

        lines.extend([
            String::new(),
            rule.clone(),
            "Frustrations:".to_string(),
            rule.clone(),
            "• Not clearly stated".to_string(),
            String::new(),
            rule.clone(),
            "Quote:".to_string(),
            rule.clone(),
            format!("\"{}\"", self.quote),
            String::new(),
            rule.clone(),
            "Citations:".to_string(),
            rule.clone(),
        ]);

        for (i, citation) in self.citations.iter().enumerate() {
            lines.push(format!("{}. \"{}\"", i + 1, citation.snippet));
            lines.push(format!("   — Cited from {}", citation.kind));
        }

        lines.extend([
            String::new(),
            rule,
            "Note:".to_string(),
            "This persona was auto\u{2011}generated from publicly available Reddit activity."
                .to_string(),
        ]);

        lines.join("\n")
    }
}

impl fmt::Display for PersonaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
