// src/types/response.rs
//! Wire shapes of the four upstream collaborators. Field names must stay
//! exactly as the services emit them.

use serde::{Deserialize, Serialize};

/// `POST /upload-resume/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResumeResponse {
    /// Raw suggestion text for the suggestion parser.
    pub job_suggestions: Option<String>,
    /// Extracted resume plain text, kept in the session for later scoring.
    pub resume_text: Option<String>,
    pub error: Option<String>,
}

/// `POST /resume-feedback/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackResponse {
    /// Raw feedback text for the section parser.
    pub feedback: Option<String>,
    pub error: Option<String>,
}

/// One external search link for a role title, from
/// `GET /api/search-links/?role=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLink {
    pub site: String,
    pub url: String,
}

/// `POST /ats-score/` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AtsScoreResponse {
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}
