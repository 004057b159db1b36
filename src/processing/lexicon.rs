//! Curated skill vocabulary and lexicon lookup

use crate::processing::normalizer::tokenize;
use log::warn;
use std::collections::BTreeSet;

/// Fixed set of recognized skills. Entries are lowercased and are either a
/// single word token or an adjacent pair of tokens.
#[derive(Debug, Clone)]
pub struct SkillLexicon {
    skills: BTreeSet<String>,
}

impl Default for SkillLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillLexicon {
    pub fn new() -> Self {
        Self::with_extra_skills(&[])
    }

    /// Built-in skills plus user-supplied entries. Entries that do not
    /// normalize to one or two word tokens are skipped.
    pub fn with_extra_skills(extra: &[String]) -> Self {
        let mut skills = BTreeSet::new();

        for entry in Self::default_skills().iter().copied().chain(extra.iter().map(String::as_str)) {
            match Self::normalize_entry(entry) {
                Some(skill) => {
                    skills.insert(skill);
                }
                None => warn!("Ignoring lexicon entry '{}': must be one or two words", entry),
            }
        }

        Self { skills }
    }

    /// Lexicon skills appearing as a unigram or adjacent bigram in `text`.
    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        let tokens = tokenize(text);
        let mut found = BTreeSet::new();

        for (i, token) in tokens.iter().enumerate() {
            if self.skills.contains(token) {
                found.insert(token.clone());
            }
            if let Some(next) = tokens.get(i + 1) {
                let bigram = format!("{} {}", token, next);
                if self.skills.contains(&bigram) {
                    found.insert(bigram);
                }
            }
        }

        found
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(&skill.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    fn normalize_entry(entry: &str) -> Option<String> {
        let tokens = tokenize(entry);
        match tokens.len() {
            1 | 2 => Some(tokens.join(" ")),
            _ => None,
        }
    }

    fn default_skills() -> &'static [&'static str] {
        &[
            // Languages
            "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Rust", "Golang",
            "Ruby", "PHP", "Swift", "Kotlin", "Scala", "SQL", "HTML", "CSS", "Bash",
            // Data and ML
            "Machine Learning", "Deep Learning", "Data Science", "Data Analysis", "NLP",
            "TensorFlow", "PyTorch", "Pandas", "NumPy", "Spark", "Hadoop", "Kafka", "Tableau",
            "Power BI", "Excel",
            // Web
            "React", "React Native", "Angular", "Vue", "Node.js", "Express", "Django", "Flask",
            "Spring Boot", "GraphQL", "REST", "gRPC",
            // Infrastructure
            "Docker", "Kubernetes", "AWS", "Azure", "GCP", "Google Cloud", "Terraform",
            "Ansible", "Jenkins", "Git", "Linux", "Nginx", "Microservices",
            // Databases
            "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "SQL Server",
            // Practices
            "Agile", "Scrum", "Jira", "Project Management",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_extracts_itself() {
        let lexicon = SkillLexicon::new();
        for skill in lexicon.iter() {
            let found = lexicon.find_skills(skill);
            assert!(found.contains(skill), "lexicon entry '{}' was not extracted", skill);
        }
    }

    #[test]
    fn test_unigrams_and_bigrams() {
        let lexicon = SkillLexicon::new();
        let found = lexicon.find_skills("Built Machine Learning pipelines in Python, served via Node.js and C++.");

        assert!(found.contains("machine learning"));
        assert!(found.contains("python"));
        assert!(found.contains("node.js"));
        assert!(found.contains("c++"));
    }

    #[test]
    fn test_substrings_do_not_match() {
        let lexicon = SkillLexicon::new();
        let found = lexicon.find_skills("JavaScript only");

        assert!(found.contains("javascript"));
        assert!(!found.contains("java"));
    }

    #[test]
    fn test_extra_skills_are_normalized() {
        let lexicon = SkillLexicon::with_extra_skills(&[
            "  Apache Airflow ".to_string(),
            "three word skill".to_string(),
        ]);

        assert!(lexicon.contains("apache airflow"));
        assert!(lexicon.contains("Apache Airflow"));
        assert!(!lexicon.contains("three word skill"));
        assert_eq!(lexicon.len(), SkillLexicon::new().len() + 1);
    }

    #[test]
    fn test_empty_text() {
        assert!(SkillLexicon::new().find_skills("").is_empty());
    }
}
