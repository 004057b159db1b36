//! TF-IDF cosine similarity and per-term keyword presence

use crate::processing::language::SharedPipeline;
use aho_corasick::AhoCorasick;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Presence of one job description noun in the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermScore {
    pub term: String,
    /// 1.0 when present in the resume, 0.0 otherwise.
    pub score: f32,
}

impl TermScore {
    pub fn is_present(&self) -> bool {
        self.score > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// Cosine similarity of the TF-IDF vectors, in [0, 1].
    pub similarity: f32,
    pub term_scores: Vec<TermScore>,
}

pub struct SimilarityScorer {
    nlp: SharedPipeline,
    stop_words: HashSet<&'static str>,
    token_regex: Regex,
}

impl SimilarityScorer {
    pub fn new(nlp: SharedPipeline) -> Self {
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");

        Self {
            nlp,
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            token_regex,
        }
    }

    pub fn calculate_match_score(&self, resume_text: &str, job_text: &str) -> MatchScore {
        MatchScore {
            similarity: self.score(resume_text, job_text),
            term_scores: self.term_scores(resume_text, job_text),
        }
    }

    /// Cosine similarity between the TF-IDF vectors of the two documents,
    /// with IDF fitted on exactly this two-document corpus.
    ///
    /// Scores are only comparable for the same document pair.
    pub fn score(&self, resume_text: &str, job_text: &str) -> f32 {
        let counts = [self.term_counts(resume_text), self.term_counts(job_text)];
        if counts.iter().any(|c| c.is_empty()) {
            return 0.0;
        }

        // Sorted vocabulary keeps the summation order independent of document order.
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n_docs = counts.len() as f64;
        let weight = |doc: &HashMap<String, usize>, term: &str, df: usize| -> f64 {
            let tf = doc.get(term).copied().unwrap_or(0) as f64;
            let idf = ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0;
            tf * idf
        };

        let mut dot = 0.0;
        let mut norm_a = 0.0;
        let mut norm_b = 0.0;
        for (term, df) in &document_frequency {
            let a = weight(&counts[0], term, *df);
            let b = weight(&counts[1], term, *df);
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
        debug!(
            "TF-IDF similarity {:.4} over {} terms",
            similarity,
            document_frequency.len()
        );
        similarity.clamp(0.0, 1.0) as f32
    }

    /// Binary presence of every job description noun / proper noun in the
    /// resume (case-insensitive substring), in first-occurrence order.
    pub fn term_scores(&self, resume_text: &str, job_text: &str) -> Vec<TermScore> {
        let mut seen = HashSet::new();
        let terms: Vec<String> = self
            .nlp
            .nominal_tokens(job_text)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();

        if terms.is_empty() {
            return Vec::new();
        }

        let mut pattern_ids: HashMap<String, usize> = HashMap::new();
        let mut patterns: Vec<String> = Vec::new();
        for term in &terms {
            let lower = term.to_lowercase();
            if !pattern_ids.contains_key(&lower) {
                pattern_ids.insert(lower.clone(), patterns.len());
                patterns.push(lower);
            }
        }

        let resume_lower = resume_text.to_lowercase();
        let present = Self::find_present(&patterns, &resume_lower);

        terms
            .into_iter()
            .map(|term| {
                let found = pattern_ids
                    .get(&term.to_lowercase())
                    .map_or(false, |id| present[*id]);
                TermScore {
                    term,
                    score: if found { 1.0 } else { 0.0 },
                }
            })
            .collect()
    }

    fn find_present(patterns: &[String], haystack: &str) -> Vec<bool> {
        let mut present = vec![false; patterns.len()];

        match AhoCorasick::new(patterns) {
            Ok(matcher) => {
                for mat in matcher.find_overlapping_iter(haystack) {
                    present[mat.pattern().as_usize()] = true;
                }
            }
            Err(e) => {
                warn!("Falling back to per-term search, matcher build failed: {}", e);
                for (flag, pattern) in present.iter_mut().zip(patterns) {
                    *flag = haystack.contains(pattern.as_str());
                }
            }
        }

        present
    }

    fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let lower = text.to_lowercase();
        let mut counts = HashMap::new();

        for token in self.token_regex.find_iter(&lower) {
            let token = token.as_str();
            if !self.stop_words.contains(token) {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        counts
    }
}

/// English stop words removed before TF-IDF weighting.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
    "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
    "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::language::HeuristicPipeline;

    fn scorer() -> SimilarityScorer {
        SimilarityScorer::new(HeuristicPipeline::shared())
    }

    #[test]
    fn test_identical_documents_score_one() {
        let text = "Rust engineer building distributed storage systems";
        let score = scorer().score(text, text);
        assert!((score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        assert_eq!(scorer().score("python docker", "accounting ledger"), 0.0);
    }

    #[test]
    fn test_empty_or_stop_word_only_documents() {
        let s = scorer();
        assert_eq!(s.score("", "python developer"), 0.0);
        assert_eq!(s.score("python developer", ""), 0.0);
        assert_eq!(s.score("the and of", "python developer"), 0.0);
    }

    #[test]
    fn test_full_english_stop_word_list() {
        let s = scorer();
        assert_eq!(ENGLISH_STOP_WORDS.len(), 318);
        assert_eq!(s.score("full system two", "full system two"), 0.0);
        assert_eq!(s.score("find the top three hundred", "show name part"), 0.0);

        // Stop words do not dilute the overlap of real terms.
        let with_noise = s.score("full stack python system", "python");
        assert!((with_noise - s.score("stack python", "python")).abs() < 1e-6);
    }

    #[test]
    fn test_score_is_symmetric() {
        let s = scorer();
        let resume = "Python developer with Docker, AWS and Kubernetes experience. Python everywhere.";
        let job = "We need Kubernetes and Terraform skills plus Python experience.";

        let forward = s.score(resume, job);
        assert_eq!(forward, s.score(job, resume));
        assert!(forward > 0.0 && forward < 1.0);
    }

    #[test]
    fn test_more_overlap_scores_higher() {
        let s = scorer();
        let job = "Python Django PostgreSQL backend engineer";
        let close = s.score("Backend engineer using Python, Django and PostgreSQL", job);
        let far = s.score("Frontend designer using Figma and Sketch for engineer handoff", job);
        assert!(close > far);
    }

    #[test]
    fn test_term_scores_presence() {
        let terms = scorer().term_scores(
            "Experienced python developer with Docker.",
            "Required: 5 years of experience with Python and Kubernetes.",
        );

        let lookup = |t: &str| terms.iter().find(|s| s.term == t).map(|s| s.score);
        assert_eq!(lookup("Python"), Some(1.0));
        assert_eq!(lookup("experience"), Some(1.0));
        assert_eq!(lookup("years"), Some(0.0));
        assert_eq!(lookup("Kubernetes"), Some(0.0));
        assert_eq!(lookup("Required"), None);
    }

    #[test]
    fn test_term_scores_deduplicate_in_order() {
        let terms = scorer().term_scores("docker", "Docker pipelines. Docker images and pipelines.");
        let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["Docker", "pipelines", "images"]);
        assert!(terms[0].is_present());
    }

    #[test]
    fn test_term_scores_empty_job() {
        assert!(scorer().term_scores("anything", "").is_empty());
    }
}
