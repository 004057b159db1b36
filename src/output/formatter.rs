//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::document::file_name_of;
use crate::processing::gap_analyzer::MatchResult;
use crate::processing::requirements::{JobRequirements, RequirementCategory};
use crate::processing::resume_parser::ParsedResume;
use colored::{Color, Colorize};
use std::path::Path;

const BAR_WIDTH: usize = 20;

/// Trait for formatting analysis output
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn format_resume(&self, resume: &ParsedResume) -> Result<String>;
    fn format_requirements(&self, requirements: &JobRequirements) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output with a keyword match chart
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    top_terms: usize,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// One row of the keyword chart: term and presence in [0, 1].
fn keyword_rows(result: &MatchResult) -> Vec<(String, f32)> {
    match result {
        MatchResult::Similarity { term_scores, .. } => {
            term_scores.iter().map(|t| (t.term.clone(), t.score)).collect()
        }
        MatchResult::Keyword {
            matched_skills,
            missing_skills,
            ..
        } => matched_skills
            .iter()
            .map(|s| (s.clone(), 1.0))
            .chain(missing_skills.iter().map(|s| (s.clone(), 0.0)))
            .collect(),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            top_terms: 15,
        }
    }

    pub fn with_top_terms(mut self, top_terms: usize) -> Self {
        self.top_terms = top_terms;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG", Color::Green),
            50..=79 => ("PARTIAL", Color::Yellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    /// Horizontal bar per job term, the terminal stand-in for a bar chart.
    fn format_keyword_chart(&self, rows: &[(String, f32)]) -> String {
        let label_width = rows
            .iter()
            .take(self.top_terms)
            .map(|(term, _)| term.chars().count())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for (term, score) in rows.iter().take(self.top_terms) {
            let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
            let color = if *score > 0.0 { Color::Green } else { Color::Red };

            output.push_str(&format!(
                "  {:<width$} {} {:>3}%\n",
                term,
                self.colorize(&bar, color),
                (score * 100.0).round() as u32,
                width = label_width
            ));
        }

        if rows.len() > self.top_terms {
            output.push_str(&format!("  ... {} more terms\n", rows.len() - self.top_terms));
        }

        output
    }

    fn format_list(&self, items: &[String], color: Color) -> String {
        items
            .iter()
            .map(|item| format!("  • {}\n", self.colorize(item, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let analysis = &report.analysis;

        // Header
        output.push_str(&self.format_header("RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Strategy: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.strategy,
            report.metadata.processing_time_ms
        ));

        // Summary
        output.push_str(&self.format_header("Summary", 2));
        let score_label = match analysis.match_result {
            MatchResult::Similarity { .. } => "Similarity Score",
            MatchResult::Keyword { .. } => "Keyword Match Score",
        };
        output.push_str(&format!(
            "{}: {}% {}\n",
            score_label,
            report.summary.score_percentage,
            self.format_score_badge(report.summary.score_percentage)
        ));
        output.push_str(&format!(
            "Required skills covered: {}% ({} of {})\n",
            report.summary.coverage_percentage,
            analysis.gap_report.matching_skills.len(),
            analysis.gap_report.required_count()
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(report.summary.verdict.description(), Color::Cyan)
        ));

        // Keyword chart
        let rows = keyword_rows(&analysis.match_result);
        if !rows.is_empty() {
            output.push_str(&self.format_header("Keyword Match", 2));
            output.push_str(&self.format_keyword_chart(&rows));
        }

        if !report.summary.strengths.is_empty() {
            output.push_str(&self.format_header("Matching Skills", 3));
            output.push_str(&self.format_list(&report.summary.strengths, Color::Green));
        }

        if !report.summary.improvement_areas.is_empty() {
            output.push_str(&self.format_header("Missing Skills", 3));
            output.push_str(&self.format_list(&report.summary.improvement_areas, Color::Red));
        }

        // Suggestions
        if !analysis.suggestions.is_empty() {
            output.push_str(&self.format_header("Suggestions", 2));
            for suggestion in &analysis.suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if self.detailed {
            output.push_str(&self.format_resume(&analysis.resume)?);
            output.push_str(&self.format_requirements(&analysis.requirements)?);
        }

        output.push_str(&format!(
            "\n{}\n",
            self.colorize(
                &format!("Generated by resume-analyzer v{}", report.metadata.analyzer_version),
                Color::BrightBlack
            )
        ));

        Ok(output)
    }

    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        let mut output = self.format_header("Resume Details", 2);
        let contact = &resume.contact_info;
        let or_missing = |field: &Option<String>| field.clone().unwrap_or_else(|| "not found".to_string());

        output.push_str(&format!("Email:    {}\n", or_missing(&contact.email)));
        output.push_str(&format!("Phone:    {}\n", or_missing(&contact.phone)));
        output.push_str(&format!("LinkedIn: {}\n", or_missing(&contact.linkedin)));

        let skills: Vec<String> = resume.skills.iter().cloned().collect();
        output.push_str(&self.format_header(&format!("Skills ({})", skills.len()), 3));
        if skills.is_empty() {
            output.push_str("  none recognized\n");
        } else {
            output.push_str(&format!("  {}\n", self.colorize(&skills.join(", "), Color::Cyan)));
        }

        output.push_str(&self.format_header(&format!("Education ({})", resume.education.len()), 3));
        output.push_str(&self.format_list(&resume.education, Color::White));

        output.push_str(&self.format_header(&format!("Experience ({})", resume.experience.len()), 3));
        output.push_str(&self.format_list(&resume.experience, Color::White));

        Ok(output)
    }

    fn format_requirements(&self, requirements: &JobRequirements) -> Result<String> {
        let mut output = self.format_header("Job Requirements", 2);

        if requirements.is_empty() {
            output.push_str("  No requirement sentences found\n");
            return Ok(output);
        }

        for category in RequirementCategory::PRECEDENCE {
            let sentences = requirements.bucket(category);
            output.push_str(&self.format_header(&format!("{} ({})", category, sentences.len()), 3));
            output.push_str(&self.format_list(sentences, Color::White));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        self.to_json(resume)
    }

    fn format_requirements(&self, requirements: &JobRequirements) -> Result<String> {
        self.to_json(requirements)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn bullet_list(items: &[String]) -> String {
        let mut output: String = items.iter().map(|item| format!("- {}\n", item)).collect();
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let analysis = &report.analysis;

        output.push_str("# Resume Match Analysis\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Strategy:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.strategy,
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name_of(&report.metadata.resume_file),
                file_name_of(&report.metadata.job_file)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Match score | {}% |\n", report.summary.score_percentage));
        output.push_str(&format!(
            "| Required skills covered | {}% ({} of {}) |\n",
            report.summary.coverage_percentage,
            analysis.gap_report.matching_skills.len(),
            analysis.gap_report.required_count()
        ));
        output.push_str(&format!("| Verdict | {} |\n\n", report.summary.verdict.description()));

        let rows = keyword_rows(&analysis.match_result);
        if !rows.is_empty() {
            output.push_str("## Keyword Match\n\n");
            output.push_str("| Term | Present |\n");
            output.push_str("|------|---------|\n");
            for (term, score) in &rows {
                output.push_str(&format!("| {} | {} |\n", term, if *score > 0.0 { "yes" } else { "no" }));
            }
            output.push('\n');
        }

        if !report.summary.strengths.is_empty() {
            output.push_str("### Matching Skills\n\n");
            output.push_str(&Self::bullet_list(&report.summary.strengths));
        }

        if !report.summary.improvement_areas.is_empty() {
            output.push_str("### Missing Skills\n\n");
            output.push_str(&Self::bullet_list(&report.summary.improvement_areas));
        }

        if !analysis.suggestions.is_empty() {
            output.push_str("## Suggestions\n\n");
            for suggestion in &analysis.suggestions {
                // Skill lines already carry their own list marker.
                if suggestion.starts_with("- ") {
                    output.push_str(&format!("{}\n", suggestion));
                } else {
                    output.push_str(&format!("\n{}\n\n", suggestion));
                }
            }
            output.push('\n');
        }

        output.push_str(&self.format_resume(&analysis.resume)?);
        output.push_str(&self.format_requirements(&analysis.requirements)?);

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by resume-analyzer v{}*\n",
                report.metadata.analyzer_version
            ));
        }

        Ok(output)
    }

    fn format_resume(&self, resume: &ParsedResume) -> Result<String> {
        let mut output = String::from("## Resume Details\n\n");
        let contact = &resume.contact_info;
        let field = |value: &Option<String>| value.as_deref().unwrap_or("-").to_string();

        output.push_str(&format!("- **Email:** {}\n", field(&contact.email)));
        output.push_str(&format!("- **Phone:** {}\n", field(&contact.phone)));
        output.push_str(&format!("- **LinkedIn:** {}\n\n", field(&contact.linkedin)));

        output.push_str("### Skills\n\n");
        if resume.skills.is_empty() {
            output.push_str("_None recognized_\n\n");
        } else {
            let skills: Vec<String> = resume.skills.iter().map(|s| format!("`{}`", s)).collect();
            output.push_str(&format!("{}\n\n", skills.join(", ")));
        }

        if !resume.education.is_empty() {
            output.push_str("### Education\n\n");
            output.push_str(&Self::bullet_list(&resume.education));
        }

        if !resume.experience.is_empty() {
            output.push_str("### Experience\n\n");
            output.push_str(&Self::bullet_list(&resume.experience));
        }

        Ok(output)
    }

    fn format_requirements(&self, requirements: &JobRequirements) -> Result<String> {
        let mut output = String::from("## Job Requirements\n\n");

        if requirements.is_empty() {
            output.push_str("_No requirement sentences found_\n\n");
            return Ok(output);
        }

        for category in RequirementCategory::PRECEDENCE {
            let sentences = requirements.bucket(category);
            if !sentences.is_empty() {
                output.push_str(&format!("### {}\n\n", category));
                output.push_str(&Self::bullet_list(sentences));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, top_terms: usize, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed).with_top_terms(top_terms),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_resume(&self, resume: &ParsedResume, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_resume(resume)
    }

    pub fn generate_requirements(&self, requirements: &JobRequirements, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_requirements(requirements)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_analysis{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::document::{Document, DocumentType};
    use crate::processing::language::HeuristicPipeline;

    fn report() -> AnalysisReport {
        let engine = AnalysisEngine::new(&Config::default(), HeuristicPipeline::shared());
        let result = engine.analyze(
            &Document::new(
                "Jane Doe jane@doe.dev. Python developer with Docker. BSc degree in Physics.".to_string(),
                "/home/jane/resume.pdf".to_string(),
                DocumentType::Resume,
            ),
            &Document::new(
                "Required: Python and Kubernetes. Preferred: Terraform.".to_string(),
                "job.txt".to_string(),
                DocumentType::JobDescription,
            ),
        );
        AnalysisReport::from_analysis(result, &Config::default().scoring)
    }

    #[test]
    fn test_console_plain_output() {
        let output = ConsoleFormatter::new(false, true).format_report(&report()).unwrap();

        assert!(output.contains("Similarity Score:"));
        assert!(output.contains("Required skills covered: 50% (1 of 2)"));
        let python_row = output.lines().find(|l| l.trim_start().starts_with("Python")).unwrap();
        assert!(python_row.contains(&"█".repeat(BAR_WIDTH)));
        assert!(python_row.ends_with("100%"));
        assert!(output.contains("- kubernetes"));
        assert!(output.contains("Email:    jane@doe.dev"));
        assert!(output.contains("Preferred Skills (1)"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_chart_truncates_to_top_terms() {
        let formatter = ConsoleFormatter::new(false, false).with_top_terms(1);
        let rows = vec![("rust".to_string(), 1.0), ("sql".to_string(), 0.0)];
        let chart = formatter.format_keyword_chart(&rows);

        assert!(chart.contains("rust"));
        assert!(!chart.contains("sql"));
        assert!(chart.contains("1 more terms"));
    }

    #[test]
    fn test_json_report_is_valid() {
        let json = JsonFormatter::new(false).format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["analysis"]["match_result"]["strategy"], "similarity");
        assert_eq!(value["analysis"]["gap_report"]["missing_skills"][0], "kubernetes");
        assert_eq!(value["metadata"]["strategy"], "similarity");
    }

    #[test]
    fn test_markdown_report() {
        let markdown = MarkdownFormatter::new(true).format_report(&report()).unwrap();

        assert!(markdown.starts_with("# Resume Match Analysis"));
        assert!(markdown.contains("**Resume:** `resume.pdf`"));
        assert!(markdown.contains("| Python | yes |"));
        assert!(markdown.contains("| Kubernetes | no |"));
        assert!(markdown.contains("### Required Skills"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, 5, true);
        let requirements = JobRequirements::default();

        let text = generator.generate_requirements(&requirements, OutputFormat::Console).unwrap();
        assert!(text.contains("No requirement sentences found"));

        let json = generator.generate_requirements(&requirements, OutputFormat::Json).unwrap();
        assert!(json.contains("\"required_skills\": []"));

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert_eq!(generator.formatter(format).supports_format(), format);
        }
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Markdown, "/tmp/jane_resume.pdf", false),
            "jane_resume_analysis.md"
        );
    }
}
