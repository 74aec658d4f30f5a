// src/error.rs
//! Engine error taxonomy.
//!
//! Parsing has no error variant on purpose: an unrecognized line degrades
//! to a title-only entity inside the parser and never reaches a caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No resume text is available for scoring. Callers must surface this
    /// as an actionable message, not a silent zero score.
    #[error("resume text not available; upload a resume before scoring")]
    InputMissing,

    /// A link or score lookup failed. Recorded per role, never fatal for
    /// the rest of the view model.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// A remote collaborator returned an unexpected shape. Logged by the
    /// caller and rendered the same way as a failed fetch.
    #[error("malformed upstream response: {0}")]
    MalformedUpstream(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(error: reqwest::Error) -> Self {
        EngineError::FetchFailed(error.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::MalformedUpstream(error.to_string())
    }
}
