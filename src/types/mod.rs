// src/types/mod.rs
pub mod response;
pub mod role;

pub use response::{AtsScoreResponse, FeedbackResponse, SearchLink, UploadResumeResponse};
pub use role::{AtsScoreResult, FeedbackSection, RoleSuggestion};
