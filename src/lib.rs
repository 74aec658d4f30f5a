// src/lib.rs
//! Career-suggestion engine: turns a language model's free-form job-role
//! and resume-feedback text into structured entities, scores a resume
//! against each role's required skills, and enriches roles with external
//! search links fetched at most once per title.

pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod orchestrator;
pub mod parse;
pub mod score;
pub mod session;
pub mod types;

pub use client::ServiceClient;
pub use config::ServiceConfig;
pub use enrich::{KeyPolicy, LinkCache, LinkFetcher, LinkState};
pub use error::EngineError;
pub use orchestrator::{Orchestrator, RoleView};
pub use session::SessionState;
pub use types::{AtsScoreResult, FeedbackSection, RoleSuggestion, SearchLink};
