//! pddl-check - PDDL domain and problem validator
//!
//! CLI entry point.  Reports go to stdout, logs and errors to stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};

use pddl_check::cli::{Cli, Command};
use pddl_check::config::{Config, OutputFormat};
use pddl_check::output::{self, FileReport, TokenRow};
use pddl_check::pddl::{scanner, Domain, Problem};
use pddl_check::report::{self, Report, ReportError};

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// `run` dispatches the command and returns whether everything it checked
/// passed.
fn run(cli: Cli) -> Result<bool> {
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.strict {
        config.strict = true;
    }
    log::debug!("using config: {:?}", config);

    match cli.command {
        Command::Domain { files } => cmd_domain(&config, &files),
        Command::Problem { file, domain } => cmd_problem(&config, &file, domain.as_deref()),
        Command::Full { domain, problem } => cmd_full(&config, &domain, &problem),
        Command::Tokens { file } => cmd_tokens(&config, &file),
    }
}

fn read_input(config: &Config, path: &Path) -> Result<String> {
    let meta = fs::metadata(path).with_context(|| format!("Failed to read {}", path.display()))?;
    config.check_input_size(path, meta.len())?;
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn passes(config: &Config, valid: bool, warnings: usize) -> bool {
    valid && !(config.strict && warnings > 0)
}

fn cmd_domain(config: &Config, files: &[PathBuf]) -> Result<bool> {
    let mut texts = Vec::with_capacity(files.len());
    for path in files {
        let text = read_input(config, path)?;
        if text.trim().is_empty() {
            return Err(ReportError::EmptyDomain).with_context(|| path.display().to_string());
        }
        if !Domain::is_domain(&text) {
            log::warn!("{} does not look like a PDDL domain", path.display());
        }
        texts.push(text);
    }

    let labels: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
    let reports: Vec<Report> = report::validate_domains(&texts).into_iter().map(Report::from).collect();

    match config.format {
        OutputFormat::Json => {
            let rows: Vec<FileReport> = labels
                .iter()
                .zip(&reports)
                .map(|(file, report)| FileReport { file, report })
                .collect();
            println!("{}", output::json(&rows)?);
        }
        OutputFormat::Text => {
            for (label, r) in labels.iter().zip(&reports) {
                print!("{}", output::text_report(label, r, config.show_info));
            }
        }
    }

    Ok(reports.iter().all(|r| passes(config, r.valid, r.warning_count)))
}

fn cmd_problem(config: &Config, path: &Path, domain: Option<&Path>) -> Result<bool> {
    let text = read_input(config, path)?;
    if !text.trim().is_empty() && !Problem::is_problem(&text) {
        log::warn!("{} does not look like a PDDL problem", path.display());
    }
    let domain_text = domain.map(|d| read_input(config, d)).transpose()?;

    let r = report::validate_problem_report(&text, domain_text.as_deref())
        .with_context(|| path.display().to_string())?;
    let label = path.display().to_string();

    match config.format {
        OutputFormat::Json => println!("{}", output::json(&FileReport { file: &label, report: &r })?),
        OutputFormat::Text => print!("{}", output::text_report(&label, &r, config.show_info)),
    }
    Ok(passes(config, r.valid, r.warning_count))
}

fn cmd_full(config: &Config, domain: &Path, problem: &Path) -> Result<bool> {
    let domain_text = read_input(config, domain)?;
    let problem_text = read_input(config, problem)?;

    let r = report::validate_full(&domain_text, &problem_text)?;

    match config.format {
        OutputFormat::Json => println!("{}", output::json(&r)?),
        OutputFormat::Text => print!(
            "{}",
            output::text_full(
                &domain.display().to_string(),
                &problem.display().to_string(),
                &r,
                config.show_info
            )
        ),
    }
    Ok(passes(config, r.overall_valid, r.total_warnings))
}

fn cmd_tokens(config: &Config, path: &Path) -> Result<bool> {
    let text = read_input(config, path)?;
    let rows: Vec<TokenRow> = scanner::scan(&text)
        .into_iter()
        .map(|t| TokenRow::new(t, &text))
        .collect();

    match config.format {
        OutputFormat::Json => println!("{}", output::json(&rows)?),
        OutputFormat::Text => print!("{}", output::text_tokens(&rows)),
    }
    Ok(true)
}
