//! Analysis engine coordinating extraction, scoring, gap analysis and suggestions

use crate::config::{Config, StrategyKind};
use crate::processing::document::Document;
use crate::processing::gap_analyzer::{build_strategy, GapAnalyzer, GapReport, MatchResult, MatchStrategy};
use crate::processing::language::SharedPipeline;
use crate::processing::lexicon::SkillLexicon;
use crate::processing::requirements::{JobRequirements, RequirementExtractor};
use crate::processing::resume_parser::{ParsedResume, ResumeParser};
use crate::processing::similarity::{MatchScore, SimilarityScorer};
use crate::processing::suggestions::SuggestionGenerator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// Main analysis engine that coordinates all analysis components
pub struct AnalysisEngine {
    nlp: SharedPipeline,
    lexicon: Arc<SkillLexicon>,
    resume_parser: ResumeParser,
    requirement_extractor: RequirementExtractor,
    scorer: SimilarityScorer,
    gap_analyzer: GapAnalyzer,
    strategy: Box<dyn MatchStrategy>,
    suggestion_generator: SuggestionGenerator,
}

/// Everything computed for one resume / job description pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub resume: ParsedResume,
    pub requirements: JobRequirements,
    pub match_result: MatchResult,
    pub gap_report: GapReport,
    pub suggestions: Vec<String>,
    pub strategy: StrategyKind,

    /// Performance metrics
    pub processing_time_ms: u64,

    /// File paths
    pub resume_path: String,
    pub job_path: String,
}

impl AnalysisEngine {
    /// Create an engine from configuration. The language pipeline is shared
    /// by every component and never mutated.
    pub fn new(config: &Config, nlp: SharedPipeline) -> Self {
        let lexicon = Arc::new(SkillLexicon::with_extra_skills(&config.lexicon.extra_skills));
        let strategy = build_strategy(config.analysis.strategy, Arc::clone(&nlp), Arc::clone(&lexicon));

        log::debug!(
            "Analysis engine ready: {} lexicon skills, {} strategy",
            lexicon.len(),
            strategy.kind()
        );

        Self {
            resume_parser: ResumeParser::new(Arc::clone(&nlp), Arc::clone(&lexicon)),
            requirement_extractor: RequirementExtractor::new(Arc::clone(&nlp)),
            scorer: SimilarityScorer::new(Arc::clone(&nlp)),
            gap_analyzer: GapAnalyzer::new(Arc::clone(&nlp)),
            suggestion_generator: SuggestionGenerator::new(&config.scoring),
            strategy,
            lexicon,
            nlp,
        }
    }

    /// Replace the configured match strategy.
    pub fn with_strategy(mut self, kind: StrategyKind) -> Self {
        if kind != self.strategy.kind() {
            self.strategy = build_strategy(kind, Arc::clone(&self.nlp), Arc::clone(&self.lexicon));
        }
        self
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn lexicon(&self) -> &SkillLexicon {
        &self.lexicon
    }

    pub fn parse_resume(&self, text: &str) -> ParsedResume {
        self.resume_parser.parse(text)
    }

    pub fn extract_requirements(&self, job_text: &str) -> JobRequirements {
        self.requirement_extractor.extract(job_text)
    }

    pub fn calculate_match_score(&self, resume_text: &str, job_text: &str) -> MatchScore {
        self.scorer.calculate_match_score(resume_text, job_text)
    }

    /// Noun-derived gap analysis of the required-skills sentences.
    pub fn analyze_skill_gaps(&self, resume_skills: &BTreeSet<String>, requirements: &JobRequirements) -> GapReport {
        self.gap_analyzer.analyze(resume_skills, requirements)
    }

    pub fn generate_improvement_suggestions(&self, gap_report: &GapReport) -> Vec<String> {
        self.suggestion_generator.generate(gap_report)
    }

    /// Run the whole pipeline with the configured strategy.
    pub fn analyze(&self, resume: &Document, job: &Document) -> AnalysisResult {
        let start_time = Instant::now();

        // 1. Entity and requirement extraction (independent)
        let parsed_resume = self.resume_parser.parse_document(resume);
        let requirements = self.extract_requirements(&job.content);
        log::debug!(
            "Resume: {} skills, {} education, {} experience entries; job: {} requirement sentences",
            parsed_resume.skills.len(),
            parsed_resume.education.len(),
            parsed_resume.experience.len(),
            requirements.total()
        );

        if requirements.is_empty() {
            log::info!("No requirement sentences found in {}", job.file_name());
        }

        // 2. Scoring and gaps
        let match_result = self.strategy.match_result(&parsed_resume, &job.content, &requirements);
        let gap_report = self.strategy.gap_report(&parsed_resume, &job.content, &requirements);

        // 3. Suggestions
        let suggestions = self.generate_improvement_suggestions(&gap_report);

        let processing_time = start_time.elapsed();
        log::info!(
            "{} vs {}: {} match {:.1}%, {} of {} required terms present ({}ms)",
            resume.file_name(),
            job.file_name(),
            self.strategy.kind(),
            match_result.percentage(),
            gap_report.matching_skills.len(),
            gap_report.required_count(),
            processing_time.as_millis()
        );

        AnalysisResult {
            resume: parsed_resume,
            requirements,
            match_result,
            gap_report,
            suggestions,
            strategy: self.strategy.kind(),
            processing_time_ms: processing_time.as_millis() as u64,
            resume_path: resume.file_path.clone(),
            job_path: job.file_path.clone(),
        }
    }
}
