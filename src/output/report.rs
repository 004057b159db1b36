//! Report structures handed to the output formatters

use crate::config::{ScoringConfig, StrategyKind};
use crate::processing::analyzer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis results plus presentation summary and generation metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub metadata: ReportMetadata,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Headline score of the selected strategy (0-100)
    pub score_percentage: u8,

    /// Share of required terms found in the resume (0-100)
    pub coverage_percentage: u8,

    pub verdict: Verdict,

    /// Required terms the resume covers
    pub strengths: Vec<String>,

    /// Required terms the resume lacks
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    StrongMatch,
    PartialMatch,
    SignificantGaps,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub resume_file: String,
    pub job_file: String,
    pub processing_time_ms: u64,
    pub strategy: StrategyKind,
}

impl AnalysisReport {
    pub fn from_analysis(analysis: AnalysisResult, scoring: &ScoringConfig) -> Self {
        let summary = Self::create_summary(&analysis, scoring);
        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: analysis.resume_path.clone(),
            job_file: analysis.job_path.clone(),
            processing_time_ms: analysis.processing_time_ms,
            strategy: analysis.strategy,
        };

        Self {
            summary,
            metadata,
            analysis,
        }
    }

    fn create_summary(analysis: &AnalysisResult, scoring: &ScoringConfig) -> AnalysisSummary {
        let coverage = analysis.gap_report.match_percentage;

        let verdict = if coverage < scoring.significant_gap_threshold {
            Verdict::SignificantGaps
        } else if coverage < scoring.partial_match_threshold {
            Verdict::PartialMatch
        } else {
            Verdict::StrongMatch
        };

        AnalysisSummary {
            score_percentage: to_percentage(analysis.match_result.percentage() / 100.0),
            coverage_percentage: to_percentage(coverage),
            verdict,
            strengths: analysis.gap_report.matching_skills.iter().cloned().collect(),
            improvement_areas: analysis.gap_report.missing_skills.iter().cloned().collect(),
        }
    }
}

impl Verdict {
    pub fn description(self) -> &'static str {
        match self {
            Verdict::StrongMatch => "Strong match with the job's required skills",
            Verdict::PartialMatch => "Partial match, some required skills are missing",
            Verdict::SignificantGaps => "Significant gaps against the job's required skills",
        }
    }
}

fn to_percentage(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}
