//! Text processing and analysis module

pub mod normalizer;
pub mod lexicon;
pub mod language;
pub mod document;
pub mod resume_parser;
pub mod requirements;
pub mod similarity;
pub mod gap_analyzer;
pub mod suggestions;
pub mod analyzer;
