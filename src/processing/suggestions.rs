//! Improvement suggestions derived from a gap report

use crate::config::ScoringConfig;
use crate::processing::gap_analyzer::GapReport;

pub const MISSING_SKILLS_HEADER: &str = "Consider adding the following skills to your resume:";
pub const SIGNIFICANT_GAP_MESSAGE: &str =
    "Your resume might need significant improvements to match this job's requirements.";
pub const PARTIAL_MATCH_MESSAGE: &str = "Your resume matches some requirements but could be improved.";

pub struct SuggestionGenerator {
    significant_gap_threshold: f32,
    partial_match_threshold: f32,
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::with_thresholds(0.5, 0.8)
    }
}

impl SuggestionGenerator {
    pub fn new(scoring: &ScoringConfig) -> Self {
        Self::with_thresholds(scoring.significant_gap_threshold, scoring.partial_match_threshold)
    }

    pub fn with_thresholds(significant_gap_threshold: f32, partial_match_threshold: f32) -> Self {
        Self {
            significant_gap_threshold,
            partial_match_threshold,
        }
    }

    /// Missing skills first (sorted), then at most one overall assessment.
    pub fn generate(&self, report: &GapReport) -> Vec<String> {
        let mut suggestions = Vec::new();

        if !report.missing_skills.is_empty() {
            suggestions.push(MISSING_SKILLS_HEADER.to_string());
            suggestions.extend(report.missing_skills.iter().map(|skill| format!("- {}", skill)));
        }

        if report.match_percentage < self.significant_gap_threshold {
            suggestions.push(SIGNIFICANT_GAP_MESSAGE.to_string());
        } else if report.match_percentage < self.partial_match_threshold {
            suggestions.push(PARTIAL_MATCH_MESSAGE.to_string());
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn report(missing: &[&str], matching: &[&str]) -> GapReport {
        let missing: BTreeSet<String> = missing.iter().map(|s| s.to_string()).collect();
        let matching: BTreeSet<String> = matching.iter().map(|s| s.to_string()).collect();
        let total = missing.len() + matching.len();
        GapReport {
            match_percentage: if total == 0 { 0.0 } else { matching.len() as f32 / total as f32 },
            missing_skills: missing,
            matching_skills: matching,
        }
    }

    #[test]
    fn test_half_match_is_partial() {
        let suggestions = SuggestionGenerator::default().generate(&report(&["docker"], &["python"]));

        assert_eq!(
            suggestions,
            vec![
                MISSING_SKILLS_HEADER.to_string(),
                "- docker".to_string(),
                PARTIAL_MATCH_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_low_match_is_significant_gap() {
        let suggestions = SuggestionGenerator::default().generate(&report(&["sql", "aws", "go"], &["rust"]));

        assert_eq!(suggestions[1..4], ["- aws", "- go", "- sql"]);
        assert_eq!(suggestions.last().map(String::as_str), Some(SIGNIFICANT_GAP_MESSAGE));
        assert_eq!(suggestions.len(), 5);
    }

    #[test]
    fn test_strong_match_has_no_assessment() {
        let suggestions = SuggestionGenerator::default().generate(&report(&[], &["rust", "sql"]));
        assert!(suggestions.is_empty());

        let suggestions = SuggestionGenerator::default()
            .generate(&report(&["x"], &["a", "b", "c", "d"]));
        assert_eq!(suggestions, vec![MISSING_SKILLS_HEADER.to_string(), "- x".to_string()]);
    }

    #[test]
    fn test_nothing_required_reads_as_significant_gap() {
        let suggestions = SuggestionGenerator::default().generate(&GapReport::default());
        assert_eq!(suggestions, vec![SIGNIFICANT_GAP_MESSAGE.to_string()]);
    }

    #[test]
    fn test_thresholds_from_config() {
        let scoring = ScoringConfig {
            significant_gap_threshold: 0.2,
            partial_match_threshold: 0.4,
            top_terms: 10,
        };
        let suggestions = SuggestionGenerator::new(&scoring).generate(&report(&["docker"], &["python"]));
        assert_eq!(suggestions.len(), 2);
    }
}
