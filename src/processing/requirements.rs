//! Job description requirement extraction

use crate::processing::language::SharedPipeline;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementCategory {
    RequiredSkills,
    PreferredSkills,
    Experience,
    Education,
}

impl RequirementCategory {
    /// Categories in the order they claim sentences.
    pub const PRECEDENCE: [RequirementCategory; 4] = [
        RequirementCategory::RequiredSkills,
        RequirementCategory::PreferredSkills,
        RequirementCategory::Experience,
        RequirementCategory::Education,
    ];

    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            RequirementCategory::RequiredSkills => &["required", "must have", "essential"],
            RequirementCategory::PreferredSkills => &["preferred", "nice to have", "desirable"],
            RequirementCategory::Experience => &["experience", "years"],
            RequirementCategory::Education => &["degree", "education", "qualification"],
        }
    }

    /// First category whose trigger occurs in the sentence, if any.
    pub fn classify(sentence: &str) -> Option<RequirementCategory> {
        let lower = sentence.to_lowercase();
        Self::PRECEDENCE
            .into_iter()
            .find(|category| category.triggers().iter().any(|t| lower.contains(t)))
    }
}

impl std::fmt::Display for RequirementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequirementCategory::RequiredSkills => write!(f, "Required Skills"),
            RequirementCategory::PreferredSkills => write!(f, "Preferred Skills"),
            RequirementCategory::Experience => write!(f, "Experience"),
            RequirementCategory::Education => write!(f, "Education"),
        }
    }
}

/// Job description sentences grouped by requirement category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
}

impl JobRequirements {
    pub fn bucket(&self, category: RequirementCategory) -> &[String] {
        match category {
            RequirementCategory::RequiredSkills => &self.required_skills,
            RequirementCategory::PreferredSkills => &self.preferred_skills,
            RequirementCategory::Experience => &self.experience,
            RequirementCategory::Education => &self.education,
        }
    }

    fn bucket_mut(&mut self, category: RequirementCategory) -> &mut Vec<String> {
        match category {
            RequirementCategory::RequiredSkills => &mut self.required_skills,
            RequirementCategory::PreferredSkills => &mut self.preferred_skills,
            RequirementCategory::Experience => &mut self.experience,
            RequirementCategory::Education => &mut self.education,
        }
    }

    pub fn total(&self) -> usize {
        RequirementCategory::PRECEDENCE
            .iter()
            .map(|c| self.bucket(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub struct RequirementExtractor {
    nlp: SharedPipeline,
}

impl RequirementExtractor {
    pub fn new(nlp: SharedPipeline) -> Self {
        Self { nlp }
    }

    /// Classify each sentence of the job description. Sentences without a
    /// trigger phrase are dropped.
    pub fn extract(&self, job_text: &str) -> JobRequirements {
        let mut requirements = JobRequirements::default();

        for sentence in self.nlp.segment(job_text) {
            if let Some(category) = RequirementCategory::classify(&sentence) {
                requirements.bucket_mut(category).push(sentence);
            }
        }

        requirements
    }
}
