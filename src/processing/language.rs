//! Sentence segmentation and coarse part-of-speech tagging
//!
//! The analysis components only need sentence boundaries and a coarse
//! noun / proper-noun / other distinction. `HeuristicPipeline` provides both
//! with closed-class word lists, suffix rules and capitalization. Words of
//! the skill lexicon are always nominal. The pipeline is built once and
//! shared read-only between components through an `Arc`.

use crate::processing::lexicon::SkillLexicon;
use crate::processing::normalizer::split_words;
use std::collections::HashSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    Propn,
    Verb,
    Adj,
    Adv,
    Num,
    Other,
}

impl PosTag {
    /// NOUN or PROPN.
    pub fn is_nominal(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub tag: PosTag,
}

/// Sentence segmentation and POS tagging capability.
pub trait LanguagePipeline: Send + Sync {
    /// Split text into trimmed, non-empty sentences in document order.
    fn segment(&self, text: &str) -> Vec<String>;

    /// Tag every word token of `text`, in document order.
    fn tag(&self, text: &str) -> Vec<TaggedToken>;

    /// Tokens tagged NOUN or PROPN, original casing, document order.
    fn nominal_tokens(&self, text: &str) -> Vec<String> {
        self.tag(text)
            .into_iter()
            .filter(|t| t.tag.is_nominal())
            .map(|t| t.text)
            .collect()
    }
}

pub type SharedPipeline = Arc<dyn LanguagePipeline>;

/// Rule-based English tagger.
pub struct HeuristicPipeline {
    function_words: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    nominal_ing: HashSet<&'static str>,
    skill_words: HashSet<String>,
}

impl Default for HeuristicPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicPipeline {
    pub fn new() -> Self {
        Self::with_lexicon(&SkillLexicon::new())
    }

    /// Tagger that treats every word of `lexicon` entries as a noun, so
    /// skills like "ansible" or "spring" survive the suffix rules.
    pub fn with_lexicon(lexicon: &SkillLexicon) -> Self {
        let skill_words = lexicon
            .iter()
            .flat_map(|skill| skill.split(' '))
            .map(str::to_string)
            .collect();

        Self {
            function_words: FUNCTION_WORDS.iter().copied().collect(),
            verbs: VERBS.iter().copied().collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
            adverbs: ADVERBS.iter().copied().collect(),
            nominal_ing: NOMINAL_ING.iter().copied().collect(),
            skill_words,
        }
    }

    /// Build the pipeline behind the shared handle passed to components.
    pub fn shared() -> SharedPipeline {
        Arc::new(Self::new())
    }

    /// Shared pipeline aware of a configured lexicon.
    pub fn shared_for(lexicon: &SkillLexicon) -> SharedPipeline {
        Arc::new(Self::with_lexicon(lexicon))
    }

    fn tag_word(&self, word: &str, sentence_initial: bool) -> PosTag {
        let lower = word.to_lowercase();

        if is_numeric(word) {
            return PosTag::Num;
        }
        if self.function_words.contains(lower.as_str()) {
            return PosTag::Other;
        }

        let proper = looks_proper(word, sentence_initial);
        if self.skill_words.contains(&lower) {
            return if proper { PosTag::Propn } else { PosTag::Noun };
        }

        if self.verbs.contains(lower.as_str()) {
            return PosTag::Verb;
        }
        if self.adjectives.contains(lower.as_str()) {
            return PosTag::Adj;
        }
        if self.adverbs.contains(lower.as_str()) {
            return PosTag::Adv;
        }

        if proper {
            return PosTag::Propn;
        }

        self.tag_by_suffix(&lower)
    }

    fn tag_by_suffix(&self, lower: &str) -> PosTag {
        if lower.chars().count() <= 4 {
            return PosTag::Noun;
        }
        if lower.ends_with("ly") {
            return PosTag::Adv;
        }
        if lower.ends_with("ing") {
            return if self.nominal_ing.contains(lower) {
                PosTag::Noun
            } else {
                PosTag::Verb
            };
        }
        if lower.ends_with("ed") {
            return PosTag::Verb;
        }
        if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PosTag::Adj;
        }
        PosTag::Noun
    }
}

impl LanguagePipeline for HeuristicPipeline {
    fn segment(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tagged = Vec::new();

        for sentence in text.unicode_sentences() {
            for (i, word) in split_words(sentence).enumerate() {
                tagged.push(TaggedToken {
                    text: word.to_string(),
                    tag: self.tag_word(word, i == 0),
                });
            }
        }

        tagged
    }
}

/// Acronyms, camel case, or capitalized away from the sentence start.
fn looks_proper(word: &str, sentence_initial: bool) -> bool {
    let has_upper = word.chars().any(|c| c.is_uppercase());
    let all_upper = word.chars().filter(|c| c.is_alphabetic()).count() > 1
        && word.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase());
    let inner_upper = word.chars().skip(1).any(|c| c.is_uppercase());

    all_upper || inner_upper || (has_upper && !sentence_initial)
}

fn is_numeric(word: &str) -> bool {
    word.chars().next().map_or(false, |c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | '+' | '-' | 'k'))
}

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "ical", "less", "ish"];

const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "all",
    "both", "either", "neither", "no", "other", "another", "such", "i", "me", "my", "mine",
    "we", "us", "our", "ours", "you", "your", "yours", "he", "him", "his", "she", "her", "hers",
    "it", "its", "they", "them", "their", "theirs", "who", "whom", "whose", "which", "what",
    "of", "in", "on", "at", "by", "for", "with", "without", "from", "to", "into", "onto",
    "about", "above", "below", "across", "after", "before", "during", "through", "over",
    "under", "between", "among", "within", "via", "per", "including", "and", "or", "but",
    "nor", "so", "yet", "if", "because", "while", "whereas", "although", "as", "than",
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "not", "there", "here", "also", "etc", "e.g", "i.e",
];

const VERBS: &[&str] = &[
    "build", "builds", "develop", "develops", "design", "designs", "lead", "leads", "manage",
    "manages", "use", "uses", "join", "seek", "want", "need", "needs", "write", "writes",
    "maintain", "maintains", "own", "owns", "drive", "drives", "deliver", "delivers",
    "collaborate", "support", "supports", "implement", "ensure", "create", "work", "works",
    "know", "apply", "include", "includes", "make", "help", "grow", "mentor", "deploy",
];

const ADJECTIVES: &[&str] = &[
    "required", "preferred", "essential", "desirable", "nice", "strong", "excellent", "good",
    "great", "solid", "senior", "junior", "new", "able", "familiar", "proficient", "relevant",
    "related", "similar", "equivalent", "minimum", "several", "many", "more", "most", "least",
    "plus", "key", "hands-on", "remote", "full-time", "part-time", "large", "small", "modern",
    "scalable", "distributed", "technical", "professional", "experienced", "skilled",
];

const ADVERBS: &[&str] = &[
    "very", "well", "ideally", "preferably", "highly", "closely", "currently", "previously",
    "always", "often", "too", "just", "only", "now",
];

const NOMINAL_ING: &[&str] = &[
    "engineering", "learning", "programming", "testing", "computing", "marketing",
    "accounting", "networking", "training", "processing", "modeling", "modelling",
    "scripting", "debugging", "monitoring", "logging", "banking", "consulting",
    "manufacturing", "understanding", "background", "building",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_for(text: &str) -> Vec<(String, PosTag)> {
        HeuristicPipeline::new()
            .tag(text)
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    #[test]
    fn test_segment_sentences() {
        let pipeline = HeuristicPipeline::new();
        let sentences = pipeline.segment(
            "Required: 5 years of experience with Python. Preferred: knowledge of Kubernetes.",
        );

        assert_eq!(
            sentences,
            vec![
                "Required: 5 years of experience with Python.",
                "Preferred: knowledge of Kubernetes.",
            ]
        );
    }

    #[test]
    fn test_segment_breaks_on_newlines() {
        let pipeline = HeuristicPipeline::new();
        let sentences = pipeline.segment("Skills\nPython, Docker\n\nEducation\nBSc Computer Science");
        assert!(sentences.len() >= 3);
        assert!(sentences.iter().any(|s| s == "Python, Docker"));
    }

    #[test]
    fn test_segment_empty() {
        assert!(HeuristicPipeline::new().segment("   ").is_empty());
    }

    #[test]
    fn test_tagging_nouns_and_proper_nouns() {
        let tags = tags_for("Required: 5 years of experience with Python.");

        assert_eq!(tags[0], ("Required".to_string(), PosTag::Adj));
        assert_eq!(tags[1], ("5".to_string(), PosTag::Num));
        assert_eq!(tags[2], ("years".to_string(), PosTag::Noun));
        assert_eq!(tags[3], ("of".to_string(), PosTag::Other));
        assert_eq!(tags[4], ("experience".to_string(), PosTag::Noun));
        assert_eq!(tags[6], ("Python".to_string(), PosTag::Propn));
    }

    #[test]
    fn test_acronyms_are_proper_nouns() {
        let tags = tags_for("AWS and GCP experience");
        assert_eq!(tags[0].1, PosTag::Propn);
        assert_eq!(tags[2].1, PosTag::Propn);
    }

    #[test]
    fn test_suffix_rules() {
        let tags = tags_for("we are quickly building scalable systems and deployed services");
        let lookup = |w: &str| tags.iter().find(|(t, _)| t == w).map(|(_, tag)| *tag);

        assert_eq!(lookup("quickly"), Some(PosTag::Adv));
        assert_eq!(lookup("scalable"), Some(PosTag::Adj));
        assert_eq!(lookup("deployed"), Some(PosTag::Verb));
        assert_eq!(lookup("systems"), Some(PosTag::Noun));
    }

    #[test]
    fn test_nominal_tokens_lowercase_input() {
        let pipeline = HeuristicPipeline::new();
        let nouns = pipeline.nominal_tokens("must have docker and kubernetes experience.");
        assert_eq!(nouns, vec!["docker", "kubernetes", "experience"]);
    }

    #[test]
    fn test_lexicon_words_are_nominal_in_lowercase() {
        let lexicon = SkillLexicon::new();
        let pipeline = HeuristicPipeline::with_lexicon(&lexicon);

        let rejected: Vec<&str> = lexicon
            .iter()
            .flat_map(|skill| skill.split(' '))
            .filter(|word| pipeline.nominal_tokens(word) != vec![word.to_string()])
            .collect();
        assert!(rejected.is_empty(), "lexicon words not tagged as nouns: {:?}", rejected);

        let nouns = pipeline.nominal_tokens("required: ansible, spring boot and react native.");
        assert_eq!(nouns, vec!["ansible", "spring", "boot", "react", "native"]);
    }

    #[test]
    fn test_configured_skills_are_nominal() {
        let lexicon = SkillLexicon::with_extra_skills(&["Sensible Stack".to_string()]);

        assert!(HeuristicPipeline::new().nominal_tokens("sensible").is_empty());
        assert_eq!(
            HeuristicPipeline::with_lexicon(&lexicon).nominal_tokens("sensible"),
            vec!["sensible"]
        );
    }
}
