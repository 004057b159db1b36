//! Skill gap analysis and the interchangeable match strategies

use crate::config::StrategyKind;
use crate::processing::language::SharedPipeline;
use crate::processing::lexicon::SkillLexicon;
use crate::processing::requirements::JobRequirements;
use crate::processing::resume_parser::ParsedResume;
use crate::processing::similarity::{SimilarityScorer, TermScore};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Reconciliation of resume skills against the job's required terms.
///
/// `matching_skills` and `missing_skills` are disjoint and together cover
/// every required term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub missing_skills: BTreeSet<String>,
    pub matching_skills: BTreeSet<String>,
    /// Fraction of required terms present in the resume, 0 when nothing is required.
    pub match_percentage: f32,
}

impl GapReport {
    /// Partition `required` by case-insensitive membership in `resume_skills`.
    pub fn from_terms(required: &BTreeSet<String>, resume_skills: &BTreeSet<String>) -> Self {
        let resume_lower: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

        let (matching_skills, missing_skills): (BTreeSet<String>, BTreeSet<String>) = required
            .iter()
            .cloned()
            .partition(|term| resume_lower.contains(&term.to_lowercase()));

        let match_percentage = if required.is_empty() {
            0.0
        } else {
            matching_skills.len() as f32 / required.len() as f32
        };

        Self {
            missing_skills,
            matching_skills,
            match_percentage,
        }
    }

    pub fn required_count(&self) -> usize {
        self.matching_skills.len() + self.missing_skills.len()
    }
}

/// Noun-derived gap analysis over the required-skills sentences.
pub struct GapAnalyzer {
    nlp: SharedPipeline,
}

impl GapAnalyzer {
    pub fn new(nlp: SharedPipeline) -> Self {
        Self { nlp }
    }

    /// Every noun / proper noun of the lowercased required-skills sentences.
    /// Non-skill nouns such as "years" are included.
    pub fn required_terms(&self, requirements: &JobRequirements) -> BTreeSet<String> {
        requirements
            .required_skills
            .iter()
            .flat_map(|sentence| self.nlp.nominal_tokens(&sentence.to_lowercase()))
            .collect()
    }

    pub fn analyze(&self, resume_skills: &BTreeSet<String>, requirements: &JobRequirements) -> GapReport {
        let required = self.required_terms(requirements);
        debug!("{} required terms from {} sentences", required.len(), requirements.required_skills.len());
        GapReport::from_terms(&required, resume_skills)
    }
}

/// Headline score of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MatchResult {
    Similarity {
        similarity_score: f32,
        term_scores: Vec<TermScore>,
    },
    Keyword {
        /// 0 to 100.
        match_score: f32,
        matched_skills: BTreeSet<String>,
        missing_skills: BTreeSet<String>,
    },
}

impl MatchResult {
    pub fn strategy(&self) -> StrategyKind {
        match self {
            MatchResult::Similarity { .. } => StrategyKind::Similarity,
            MatchResult::Keyword { .. } => StrategyKind::Keyword,
        }
    }

    /// Score on a 0-100 scale regardless of strategy.
    pub fn percentage(&self) -> f32 {
        match self {
            MatchResult::Similarity { similarity_score, .. } => similarity_score * 100.0,
            MatchResult::Keyword { match_score, .. } => *match_score,
        }
    }
}

pub trait MatchStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Terms the resume is expected to cover.
    fn required_terms(&self, job_text: &str, requirements: &JobRequirements) -> BTreeSet<String>;

    fn match_result(&self, resume: &ParsedResume, job_text: &str, requirements: &JobRequirements) -> MatchResult;

    fn gap_report(&self, resume: &ParsedResume, job_text: &str, requirements: &JobRequirements) -> GapReport {
        GapReport::from_terms(&self.required_terms(job_text, requirements), &resume.skills)
    }
}

/// TF-IDF similarity with noun-derived required terms.
pub struct SimilarityStrategy {
    scorer: SimilarityScorer,
    gaps: GapAnalyzer,
}

impl SimilarityStrategy {
    pub fn new(nlp: SharedPipeline) -> Self {
        Self {
            scorer: SimilarityScorer::new(Arc::clone(&nlp)),
            gaps: GapAnalyzer::new(nlp),
        }
    }
}

impl MatchStrategy for SimilarityStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Similarity
    }

    fn required_terms(&self, _job_text: &str, requirements: &JobRequirements) -> BTreeSet<String> {
        self.gaps.required_terms(requirements)
    }

    fn match_result(&self, resume: &ParsedResume, job_text: &str, _requirements: &JobRequirements) -> MatchResult {
        let score = self.scorer.calculate_match_score(&resume.raw_text, job_text);
        MatchResult::Similarity {
            similarity_score: score.similarity,
            term_scores: score.term_scores,
        }
    }
}

/// Lexicon skills of the whole job description against resume skills.
pub struct KeywordStrategy {
    lexicon: Arc<SkillLexicon>,
}

impl KeywordStrategy {
    pub fn new(lexicon: Arc<SkillLexicon>) -> Self {
        Self { lexicon }
    }
}

impl MatchStrategy for KeywordStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Keyword
    }

    fn required_terms(&self, job_text: &str, _requirements: &JobRequirements) -> BTreeSet<String> {
        self.lexicon.find_skills(job_text)
    }

    fn match_result(&self, resume: &ParsedResume, job_text: &str, requirements: &JobRequirements) -> MatchResult {
        let report = self.gap_report(resume, job_text, requirements);
        MatchResult::Keyword {
            match_score: report.match_percentage * 100.0,
            matched_skills: report.matching_skills,
            missing_skills: report.missing_skills,
        }
    }
}

pub fn build_strategy(kind: StrategyKind, nlp: SharedPipeline, lexicon: Arc<SkillLexicon>) -> Box<dyn MatchStrategy> {
    match kind {
        StrategyKind::Similarity => Box::new(SimilarityStrategy::new(nlp)),
        StrategyKind::Keyword => Box::new(KeywordStrategy::new(lexicon)),
    }
}
