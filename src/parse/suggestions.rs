// src/parse/suggestions.rs
//! Suggestion parser: free-form role-suggestion text into ordered
//! `RoleSuggestion` entities.
//!
//! The upstream model is prompted for bullets of the form
//! `**Role Title**: short explanation` followed by an optional
//! `Required Skills: a, b, c` line, but nothing guarantees it complies.
//! Every line therefore classifies into exactly one of three shapes and
//! the worst case degrades to a title-only entity; this parser never
//! fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::RoleSuggestion;

static BOLD_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*(.+?)\*\*\s*:\s*(.*)$").expect("invalid bold title pattern"));

static REQUIRED_SKILLS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^required\s+skills\s*:\s*(.*)$").expect("invalid required skills pattern")
});

/// Classification of a suggestion line. Exhaustive by construction: every
/// line lands in exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TitleLine {
    /// `**Title**: description` matched strictly.
    Matched { title: String, description: String },
    /// The line holds a `**` pair and a colon but not in the strict shape;
    /// split at the first colon, delimiters stripped from the title side.
    Loose { title: String, description: String },
    /// Anything else: the whole trimmed line is the title.
    TitleOnly { title: String },
}

fn classify(line: &str) -> TitleLine {
    if let Some(caps) = BOLD_TITLE_RE.captures(line) {
        return TitleLine::Matched {
            title: caps[1].trim().to_string(),
            description: caps[2].trim().to_string(),
        };
    }

    if line.matches("**").count() >= 2 {
        if let Some(colon) = line.find(':') {
            let title = line[..colon].replace('*', "").trim().to_string();
            let description = line[colon + 1..].trim().to_string();
            if !title.is_empty() {
                return TitleLine::Loose { title, description };
            }
        }
    }

    TitleLine::TitleOnly {
        title: line.to_string(),
    }
}

/// Split the value portion of a `Required Skills:` line on commas,
/// trimming entries, dropping empties, and deduplicating while keeping
/// first-appearance order.
fn split_skills(value: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for entry in value.split(',') {
        let entry = entry.trim();
        if entry.is_empty() || skills.iter().any(|s| s == entry) {
            continue;
        }
        skills.push(entry.to_string());
    }
    skills
}

/// Parse raw suggestion text into an ordered sequence of `RoleSuggestion`.
///
/// Scans the tokenized lines with a one-line lookahead: after a title line
/// is established, a following `Required Skills:` line is consumed into
/// the entity rather than emitted on its own. Total: every input line is
/// accounted for exactly once.
pub fn parse_suggestions(raw: Option<&str>) -> Vec<RoleSuggestion> {
    let lines = super::lines(raw);
    let mut suggestions = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let (title, description) = match classify(&lines[i]) {
            TitleLine::Matched { title, description }
            | TitleLine::Loose { title, description } => (title, description),
            TitleLine::TitleOnly { title } => (title, String::new()),
        };

        let mut required_skills_raw = None;
        let mut required_skills = Vec::new();
        if let Some(next) = lines.get(i + 1) {
            if let Some(caps) = REQUIRED_SKILLS_RE.captures(next) {
                required_skills_raw = Some(next.clone());
                required_skills = split_skills(&caps[1]);
                i += 1;
            }
        }

        suggestions.push(RoleSuggestion {
            title,
            description,
            required_skills_raw,
            required_skills,
        });
        i += 1;
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_title_with_skills_line() {
        let raw = "**Data Analyst**: Analyzes data.\nRequired Skills: SQL, Excel, Python";
        let parsed = parse_suggestions(Some(raw));

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Data Analyst");
        assert_eq!(parsed[0].description, "Analyzes data.");
        assert_eq!(
            parsed[0].required_skills_raw.as_deref(),
            Some("Required Skills: SQL, Excel, Python")
        );
        assert_eq!(parsed[0].required_skills, vec!["SQL", "Excel", "Python"]);
    }

    #[test]
    fn test_bare_line_becomes_title_only() {
        let parsed = parse_suggestions(Some("Graphic Designer"));
        assert_eq!(
            parsed,
            vec![RoleSuggestion::title_only("Graphic Designer")]
        );
    }

    #[test]
    fn test_loose_match_when_colon_sits_inside_bold() {
        let parsed = parse_suggestions(Some("**Data Analyst:** Analyzes data."));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Data Analyst");
    }

    #[test]
    fn test_leading_skills_line_is_never_dropped() {
        let parsed = parse_suggestions(Some("Required Skills: SQL, Excel"));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Required Skills: SQL, Excel");
        assert!(parsed[0].required_skills.is_empty());
    }

    #[test]
    fn test_skills_split_trims_dedupes_and_drops_empties() {
        let raw = "**Dev**: Builds things.\nRequired Skills: Rust , , SQL,Rust,  ";
        let parsed = parse_suggestions(Some(raw));
        assert_eq!(parsed[0].required_skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_every_line_accounted_for_exactly_once() {
        let raw = "**A**: one\nRequired Skills: x, y\nplain line\n**B**: two\nanother plain";
        let parsed = parse_suggestions(Some(raw));

        // 5 input lines: one consumed as a skills continuation, four entities.
        assert_eq!(parsed.len(), 4);
        let titles: Vec<&str> = parsed.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "plain line", "B", "another plain"]);
    }

    #[test]
    fn test_ordering_matches_source() {
        let raw = "**Zeta**: z\n**Alpha**: a\n**Mid**: m";
        let titles: Vec<String> = parse_suggestions(Some(raw))
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_idempotent_reparse() {
        let raw = "**Data Analyst**: Analyzes data.\nRequired Skills: SQL\nGraphic Designer";
        assert_eq!(parse_suggestions(Some(raw)), parse_suggestions(Some(raw)));
    }

    #[test]
    fn test_skills_prefix_is_case_insensitive() {
        let raw = "**Dev**: builds\nREQUIRED SKILLS: Git";
        let parsed = parse_suggestions(Some(raw));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].required_skills, vec!["Git"]);
    }

    #[test]
    fn test_absent_input_yields_nothing() {
        assert!(parse_suggestions(None).is_empty());
    }
}
