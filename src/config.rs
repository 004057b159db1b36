//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub scoring: ScoringConfig,
    pub lexicon: LexiconConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub strategy: StrategyKind,
}

/// Which gap-analysis strategy produces the match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// TF-IDF similarity with noun-derived required terms
    Similarity,
    /// Lexicon keywords found in the job description
    Keyword,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Below this match percentage the resume needs significant work.
    pub significant_gap_threshold: f32,
    /// Below this match percentage the resume is a partial match.
    pub partial_match_threshold: f32,
    /// Number of term scores shown in the console keyword chart.
    pub top_terms: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    pub extra_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                strategy: StrategyKind::Similarity,
            },
            scoring: ScoringConfig {
                significant_gap_threshold: 0.5,
                partial_match_threshold: 0.8,
                top_terms: 15,
            },
            lexicon: LexiconConfig::default(),
            input: InputConfig { enable_cache: true },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the user config, writing the defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load a config file from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    /// Reject threshold combinations the suggestion rules cannot honor.
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);

        if !in_unit(scoring.significant_gap_threshold) || !in_unit(scoring.partial_match_threshold) {
            return Err(ResumeAnalyzerError::Configuration(
                "Scoring thresholds must be within [0, 1]".to_string(),
            ));
        }

        if scoring.significant_gap_threshold > scoring.partial_match_threshold {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "significant_gap_threshold ({}) must not exceed partial_match_threshold ({})",
                scoring.significant_gap_threshold, scoring.partial_match_threshold
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Similarity => write!(f, "similarity"),
            StrategyKind::Keyword => write!(f, "keyword"),
        }
    }
}
