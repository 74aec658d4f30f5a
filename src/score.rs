// src/score.rs
//! Skill matching and ATS-fit scoring.
//!
//! This module is the semantic contract: the remote `/ats-score/`
//! collaborator is expected to implement the same policy, and the local
//! matcher is what offline callers and tests run against.

use crate::error::EngineError;
use crate::types::AtsScoreResult;

/// Score reported when a role lists no required skills. There is nothing
/// to miss, so the fit is vacuously perfect rather than a division fault.
pub const EMPTY_SKILLS_SCORE: u8 = 100;

/// Partition `required_skills` into matched and missing against the resume
/// text and compute the fit score.
///
/// A skill matches when it occurs case-insensitively as a substring of the
/// resume text. Empty or whitespace-only resume text is an
/// `InputMissing` error the caller must surface to the user.
pub fn match_skills(
    resume_text: &str,
    required_skills: &[String],
) -> Result<AtsScoreResult, EngineError> {
    if resume_text.trim().is_empty() {
        return Err(EngineError::InputMissing);
    }

    if required_skills.is_empty() {
        return Ok(empty_skills_result());
    }

    let haystack = resume_text.to_lowercase();
    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for skill in required_skills {
        if haystack.contains(&skill.to_lowercase()) {
            matched_skills.push(skill.clone());
        } else {
            missing_skills.push(skill.clone());
        }
    }

    let score = percentage(matched_skills.len(), required_skills.len());

    Ok(AtsScoreResult {
        score,
        matched_skills,
        missing_skills,
    })
}

/// The defined result for an empty required-skill list.
pub fn empty_skills_result() -> AtsScoreResult {
    AtsScoreResult {
        score: EMPTY_SKILLS_SCORE,
        matched_skills: Vec::new(),
        missing_skills: Vec::new(),
    }
}

fn percentage(matched: usize, total: usize) -> u8 {
    ((100.0 * matched as f64) / total as f64).round() as u8
}
