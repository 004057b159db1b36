//! Resume analyzer library
//!
//! Extracts contact details, skills, education and experience from resumes,
//! groups job description sentences into requirement categories, and scores
//! how well a resume matches a job with TF-IDF similarity or lexicon keyword
//! overlap, reporting skill gaps and improvement suggestions.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
