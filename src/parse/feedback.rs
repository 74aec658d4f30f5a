// src/parse/feedback.rs
//! Feedback section parser: narrative resume feedback into named sections
//! of bullet points.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::FeedbackSection;

/// Recognized section headers, optionally prefixed with a numeral and a
/// period (`1. Summary`). Prefix match only: trailing words on the header
/// line are tolerated, as the model tends to append them.
static SECTION_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:\d+\.)?\s*(summary|work experience|skills|education|formatting(?:\s*&\s*structure)?|overall suggestions)",
    )
    .expect("invalid section header pattern")
});

/// Map a matched header to its canonical spelling so differently-cased or
/// abbreviated headers land in the same section.
fn canonical_name(matched: &str) -> &'static str {
    let lower = matched.to_lowercase();
    match lower.as_str() {
        "summary" => "Summary",
        "work experience" => "Work Experience",
        "skills" => "Skills",
        "education" => "Education",
        "overall suggestions" => "Overall Suggestions",
        _ if lower.starts_with("formatting") => "Formatting & Structure",
        // Unreachable while the regex and this table agree.
        _ => "Overall Suggestions",
    }
}

/// Parse raw feedback text into sections, preserving the order in which
/// sections first appear.
///
/// Lines before the first recognized header are discarded. A repeated
/// header resumes its existing section, so points accumulate instead of
/// being silently reset. Pure and idempotent.
pub fn parse_feedback(raw: Option<&str>) -> Vec<FeedbackSection> {
    let mut sections: Vec<FeedbackSection> = Vec::new();
    let mut current: Option<usize> = None;

    for line in super::lines(raw) {
        if let Some(caps) = SECTION_HEADER_RE.captures(&line) {
            let name = canonical_name(&caps[1]);
            let index = match sections.iter().position(|s| s.name == name) {
                Some(existing) => existing,
                None => {
                    sections.push(FeedbackSection {
                        name: name.to_string(),
                        points: Vec::new(),
                    });
                    sections.len() - 1
                }
            };
            current = Some(index);
        } else if let Some(index) = current {
            sections[index].points.push(line);
        }
    }

    sections
}
