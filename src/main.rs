//! resume-analyzer: match a resume against a job description

use clap::Parser;
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_analyzer::output::report::AnalysisReport;
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::language::{HeuristicPipeline, SharedPipeline};
use resume_analyzer::processing::lexicon::SkillLexicon;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
        None => Config::load(),
    }
}

fn language_pipeline(config: &Config) -> SharedPipeline {
    HeuristicPipeline::shared_for(&SkillLexicon::with_extra_skills(&config.lexicon.extra_skills))
}

fn output_format(requested: Option<String>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            strategy,
            output,
            detailed,
            save,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, cli::JOB_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;

            let format = output_format(output, &config)?;
            let strategy = match strategy {
                Some(s) => cli::parse_strategy(&s).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.analysis.strategy,
            };
            let detailed = detailed || config.output.detailed;

            info!("Analyzing {} against {} ({} strategy)", resume.display(), job.display(), strategy);

            let engine = AnalysisEngine::new(&config, language_pipeline(&config)).with_strategy(strategy);
            let mut input_manager = InputManager::new().with_cache(config.input.enable_cache);

            let resume_doc = input_manager.load_resume(&resume).await?;
            let job_doc = input_manager.load_job_description(&job).await?;

            let result = engine.analyze(&resume_doc, &job_doc);
            let report = AnalysisReport::from_analysis(result, &config.scoring);

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed,
                config.scoring.top_terms,
                true,
            );
            println!("{}", generator.generate_report(&report, format)?);

            if let Some(save_path) = save {
                let target = if save_path.is_dir() {
                    save_path.join(suggest_filename(format, &resume_doc.file_path, true))
                } else {
                    save_path
                };

                let plain = ReportGenerator::with_options(false, detailed, config.scoring.top_terms, true);
                save_report_to_file(&plain.generate_report(&report, format)?, &target)?;
                info!("Report saved to {}", target.display());
            }
        }

        Commands::Parse { resume, output } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            let format = output_format(output, &config)?;

            let engine = AnalysisEngine::new(&config, language_pipeline(&config));
            let resume_doc = InputManager::new().load_resume(&resume).await?;

            let mut parsed = engine.parse_resume(&resume_doc.content);
            parsed.file_path = Some(resume_doc.file_path.clone());

            let generator = ReportGenerator::with_options(config.output.color_output, true, config.scoring.top_terms, true);
            println!("{}", generator.generate_resume(&parsed, format)?);
        }

        Commands::Requirements { job, output } => {
            cli::validate_file_extension(&job, cli::JOB_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            let format = output_format(output, &config)?;

            let engine = AnalysisEngine::new(&config, language_pipeline(&config));
            let job_doc = InputManager::new().load_job_description(&job).await?;
            let requirements = engine.extract_requirements(&job_doc.content);

            let generator = ReportGenerator::with_options(config.output.color_output, true, config.scoring.top_terms, true);
            println!("{}", generator.generate_requirements(&requirements, format)?);
        }

        Commands::Skills => {
            let engine = AnalysisEngine::new(&config, language_pipeline(&config));
            let lexicon = engine.lexicon();

            println!("Recognized skills ({}):", lexicon.len());
            for skill in lexicon.iter() {
                println!("  {}", skill);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}\n{}", path.display(), content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
