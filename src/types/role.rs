// src/types/role.rs
//! Structured entities produced from the model's free-form text.

use serde::{Deserialize, Serialize};

/// One job-role recommendation decomposed from the suggestion text.
///
/// Immutable once produced by the parser. Ordering within the parsed
/// sequence matches first appearance in the source text, which is the
/// model's own ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub title: String,
    pub description: String,
    /// The `Required Skills:` source line, verbatim, when one followed the
    /// title line.
    pub required_skills_raw: Option<String>,
    /// Parsed decomposition of `required_skills_raw`: trimmed, empty
    /// entries dropped, deduplicated, source order preserved.
    pub required_skills: Vec<String>,
}

impl RoleSuggestion {
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            required_skills_raw: None,
            required_skills: Vec::new(),
        }
    }
}

/// A named group of feedback bullet points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSection {
    pub name: String,
    pub points: Vec<String>,
}

/// Outcome of matching a role's required skills against resume text.
///
/// `matched_skills` and `missing_skills` partition the required-skill list
/// exactly; both keep the list's original order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsScoreResult {
    /// Percentage of required skills found in the resume, 0..=100.
    pub score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}
