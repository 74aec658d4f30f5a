// src/session.rs
//! Explicitly owned session state.
//!
//! The extracted resume text and the raw model outputs live here for the
//! lifetime of one analysis session. The struct is constructed at startup
//! and passed to whoever needs it, so ownership and mutation are visible
//! at every call site; nothing is ambient.

#[derive(Debug, Default)]
pub struct SessionState {
    resume_text: Option<String>,
    raw_suggestions: Option<String>,
    raw_feedback: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the extracted resume text after an upload. Written once per
    /// upload; a later upload replaces it.
    pub fn set_resume_text(&mut self, text: String) {
        self.resume_text = Some(text);
    }

    pub fn resume_text(&self) -> Option<&str> {
        self.resume_text.as_deref()
    }

    pub fn set_raw_suggestions(&mut self, text: String) {
        self.raw_suggestions = Some(text);
    }

    pub fn raw_suggestions(&self) -> Option<&str> {
        self.raw_suggestions.as_deref()
    }

    pub fn set_raw_feedback(&mut self, text: String) {
        self.raw_feedback = Some(text);
    }

    pub fn raw_feedback(&self) -> Option<&str> {
        self.raw_feedback.as_deref()
    }
}
