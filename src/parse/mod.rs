// src/parse/mod.rs
//! Tolerant parsers for the model's free-form text.

pub mod feedback;
pub mod suggestions;

pub use feedback::parse_feedback;
pub use suggestions::parse_suggestions;

/// Split raw text into trimmed, non-empty lines.
///
/// `None` (no text received from upstream) yields an empty sequence rather
/// than an error. Pure; shared by both parsers.
pub fn lines(raw: Option<&str>) -> Vec<String> {
    raw.map(|text| {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_trims_and_drops_empties() {
        let raw = "  first \n\n\t\nsecond\n   \nthird  ";
        assert_eq!(lines(Some(raw)), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_lines_absent_input() {
        assert!(lines(None).is_empty());
        assert!(lines(Some("")).is_empty());
    }
}
