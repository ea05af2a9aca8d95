use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest input prefix kept in a history entry, in characters.
pub const SNIPPET_MAX_CHARS: usize = 100;

/// Appended to a history snippet when the input was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Identifier of a fallacy pattern.
///
/// Known ids map to their own variant; anything else is carried verbatim in
/// `Unknown` so a display name can still be derived from it.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryId {
    AdHominem,
    FalseCausality,
    FalseDilemma,
    AppealToEmotion,
    FaultyGeneralization,
    AdPopulum,
    CircularReasoning,
    FallacyOfExtension,
    Unknown(String),
}

impl CategoryId {
    /// Exact-key parse. No trimming or case folding is applied.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ad hominem" => Self::AdHominem,
            "false causality" => Self::FalseCausality,
            "false dilemma" => Self::FalseDilemma,
            "appeal to emotion" => Self::AppealToEmotion,
            "faulty generalization" => Self::FaultyGeneralization,
            "ad populum" => Self::AdPopulum,
            "circular reasoning" => Self::CircularReasoning,
            "fallacy of extension" => Self::FallacyOfExtension,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::AdHominem => "ad hominem",
            Self::FalseCausality => "false causality",
            Self::FalseDilemma => "false dilemma",
            Self::AppealToEmotion => "appeal to emotion",
            Self::FaultyGeneralization => "faulty generalization",
            Self::AdPopulum => "ad populum",
            Self::CircularReasoning => "circular reasoning",
            Self::FallacyOfExtension => "fallacy of extension",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Display name used when the catalog has no entry for this id.
    pub fn fallback_display_name(&self) -> String {
        title_case(self.as_str())
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CategoryId {
    fn from(raw: String) -> Self {
        match Self::parse(&raw) {
            Self::Unknown(_) => Self::Unknown(raw),
            known => known,
        }
    }
}

impl From<&str> for CategoryId {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        match id {
            CategoryId::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// One catalog entry. Catalog data is static, so the record borrows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallacyCategory {
    pub id: CategoryId,
    pub display_name: &'static str,
    pub definition: &'static str,
    pub example: &'static str,
    pub why_problematic: &'static str,
}

/// Outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category_id: CategoryId,
    /// Static per-rule score in [0.0, 1.0].
    pub confidence: f64,
    pub explanation: String,
}

/// One accepted analysis retained for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text_snippet: String,
    pub category_display_name: String,
    pub confidence: f64,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(text: &str, category_display_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            text_snippet: snippet(text),
            category_display_name: category_display_name.into(),
            confidence,
            recorded_at: Utc::now(),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.text_snippet.chars().count() > SNIPPET_MAX_CHARS
    }
}

/// Cut `text` to [`SNIPPET_MAX_CHARS`] characters, marking the cut.
pub fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
