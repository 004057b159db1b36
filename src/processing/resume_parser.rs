//! Resume entity extraction: contact details, skills, education and experience

use crate::processing::document::Document;
use crate::processing::language::SharedPipeline;
use crate::processing::lexicon::SkillLexicon;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

const EDUCATION_KEYWORDS: &[&str] = &["degree", "bachelor", "master", "phd", "bsc", "msc", "b.tech", "m.tech"];
const EXPERIENCE_KEYWORDS: &[&str] = &["work", "experience", "employed", "job", "position"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.linkedin.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub contact_info: ContactInfo,
    pub skills: BTreeSet<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub raw_text: String,
    pub file_path: Option<String>,
}

pub struct ResumeParser {
    nlp: SharedPipeline,
    lexicon: Arc<SkillLexicon>,
    email_regex: Regex,
    phone_regex: Regex,
    linkedin_regex: Regex,
}

impl ResumeParser {
    pub fn new(nlp: SharedPipeline, lexicon: Arc<SkillLexicon>) -> Self {
        let email_regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("Invalid email regex");

        // Loose on purpose: optional country code, optional area group, 3-4 digits.
        let phone_regex = Regex::new(r"(?:\+\d{1,2}\s?)?\b(?:\d{3}[-.]?)?\s?\d{3}[-.]?\d{4}\b")
            .expect("Invalid phone regex");

        let linkedin_regex = Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+/?")
            .expect("Invalid linkedin regex");

        Self {
            nlp,
            lexicon,
            email_regex,
            phone_regex,
            linkedin_regex,
        }
    }

    /// Extract every resume field from plain text. Never fails; empty text
    /// yields empty fields.
    pub fn parse(&self, text: &str) -> ParsedResume {
        ParsedResume {
            contact_info: self.extract_contact_info(text),
            skills: self.extract_skills(text),
            education: self.extract_education(text),
            experience: self.extract_experience(text),
            raw_text: text.to_string(),
            file_path: None,
        }
    }

    pub fn parse_document(&self, document: &Document) -> ParsedResume {
        let mut parsed = self.parse(&document.content);
        parsed.file_path = Some(document.file_path.clone());
        parsed
    }

    pub fn extract_contact_info(&self, text: &str) -> ContactInfo {
        let first = |re: &Regex| re.find(text).map(|m| m.as_str().trim().to_string());

        ContactInfo {
            email: first(&self.email_regex),
            phone: first(&self.phone_regex),
            linkedin: first(&self.linkedin_regex),
        }
    }

    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.lexicon.find_skills(text)
    }

    pub fn extract_education(&self, text: &str) -> Vec<String> {
        self.sentences_matching(text, EDUCATION_KEYWORDS)
    }

    pub fn extract_experience(&self, text: &str) -> Vec<String> {
        self.sentences_matching(text, EXPERIENCE_KEYWORDS)
    }

    fn sentences_matching(&self, text: &str, keywords: &[&str]) -> Vec<String> {
        self.nlp
            .segment(text)
            .into_iter()
            .filter(|sentence| {
                let lower = sentence.to_lowercase();
                keywords.iter().any(|k| lower.contains(k))
            })
            .collect()
    }
}
