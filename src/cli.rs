//! CLI interface for the resume analyzer

use crate::config::{OutputFormat, StrategyKind};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// File types accepted for resumes.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt", "md"];
/// File types accepted for job descriptions.
pub const JOB_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt", "md"];

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Resume and job description matching tool")]
#[command(long_about = "Extract skills, contact details and requirements, score how well a resume matches a job description, and report skill gaps with suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume against a job description
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Match strategy: similarity, keyword
        #[arg(short, long)]
        strategy: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Include parsed resume and requirement details
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Extract contact details, skills, education and experience from a resume
    Parse {
        /// Path to resume file
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Group job description sentences into requirement categories
    Requirements {
        /// Path to job description file
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the recognized skills
    Skills,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Parse and validate match strategy
pub fn parse_strategy(strategy: &str) -> Result<StrategyKind, String> {
    match strategy.to_lowercase().as_str() {
        "similarity" | "tfidf" => Ok(StrategyKind::Similarity),
        "keyword" | "keywords" => Ok(StrategyKind::Keyword),
        _ => Err(format!("Invalid strategy: {}. Supported: similarity, keyword", strategy)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from([
            "resume-analyzer",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "job.txt",
            "--strategy",
            "keyword",
            "--save",
            "out.md",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze {
                resume,
                strategy,
                save,
                detailed,
                ..
            } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(strategy.as_deref(), Some("keyword"));
                assert_eq!(save, Some(PathBuf::from("out.md")));
                assert!(!detailed);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
        assert_eq!(parse_strategy("Keyword"), Ok(StrategyKind::Keyword));
        assert!(parse_strategy("embedding").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.DOCX"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.xyz"), RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), RESUME_EXTENSIONS).is_err());
    }

    #[test]
    fn test_accepted_extensions_are_extractable() {
        use crate::input::file_detector::FileType;

        assert_eq!(RESUME_EXTENSIONS, JOB_EXTENSIONS);
        for ext in JOB_EXTENSIONS {
            assert_ne!(FileType::from_extension(ext), FileType::Unknown, "{} has no extractor", ext);
        }
        assert!(validate_file_extension(Path::new("posting.doc"), JOB_EXTENSIONS).is_ok());
    }
}
