//! Command line surface for the `ccf-auditor` binary

use crate::questionnaire::{Interview, QuestionBank};
use crate::scanner;
use ccf_auditor_base::api::{Auditor, AuditorConfig};
use ccf_core::catalog::Catalog;
use ccf_core::config::{AuditorPreferences, LogLevel};
use ccf_core::log_info;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SCAN_REPORT_STEM: &str = "code_security_report";

#[derive(Parser, Debug)]
#[command(name = "ccf-auditor", version, about = "CCF security auditor")]
pub struct Cli {
    #[arg(long, global = true, help = "Emit log events as JSON lines")]
    pub structured_logs: bool,
    #[arg(short, long, global = true, help = "Log debug events")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Runtime preferences TOML file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print catalog statistics
    Catalog { path: PathBuf },
    /// Print the question bank
    Questions {
        #[arg(long)]
        domain: Option<String>,
    },
    /// Scan a source repository and export a report
    Scan {
        repo: PathBuf,
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        system_name: Option<String>,
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Run an interactive assessment on stdin/stdout and export a report
    Interview {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

impl Cli {
    /// Preferences from `--config` (or env/defaults) with flag overrides applied
    pub fn preferences(&self) -> Result<AuditorPreferences, String> {
        let mut preferences = match &self.config {
            Some(path) => AuditorPreferences::from_toml_file(path)?,
            None => AuditorPreferences::default(),
        };

        if self.structured_logs {
            preferences.logging.use_structured_logging = true;
        }
        if self.verbose {
            preferences.logging.min_log_level = LogLevel::Debug;
        }

        Ok(preferences)
    }
}

/// Execute a parsed command. Interactive input is read from `input`, all
/// user-facing output goes to `out`.
pub fn run<R: BufRead, W: Write>(
    cli: &Cli,
    preferences: &AuditorPreferences,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let config = AuditorConfig::from_preferences(&preferences.report);

    match &cli.command {
        Commands::Catalog { path } => show_catalog(path, out),
        Commands::Questions { domain } => show_questions(domain.as_deref(), out),
        Commands::Scan {
            repo,
            catalog,
            system_name,
            output_dir,
        } => run_scan(repo, catalog, system_name.as_deref(), output_dir, config, out),
        Commands::Interview {
            catalog,
            output_dir,
        } => run_interview(catalog, output_dir, config, input, out),
    }
}

/// Report stem for an interview export, e.g. `audit_report_Payment_API`
pub fn interview_report_stem(system_name: &str) -> String {
    format!("audit_report_{}", system_name.replace(' ', "_"))
}

fn load_catalog(path: &Path) -> Result<Arc<Catalog>, Box<dyn Error>> {
    Ok(Arc::new(Catalog::from_path(path)?))
}

fn show_catalog<W: Write>(path: &Path, out: &mut W) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(path)?;
    write!(out, "{}", catalog.statistics().summary())?;
    Ok(())
}

fn show_questions<W: Write>(domain: Option<&str>, out: &mut W) -> Result<(), Box<dyn Error>> {
    let bank = QuestionBank::embedded()?;

    let domains: Vec<&str> = match domain {
        Some(name) => vec![name],
        None => bank.domains().collect(),
    };

    for name in domains {
        let questions = bank.questions_for_domain(name);
        if questions.is_empty() {
            writeln!(out, "No questions for domain: {}", name)?;
            continue;
        }

        writeln!(out, "{}", name)?;
        for question in questions {
            writeln!(out, "  [{}] {}", question.control_id, question.text)?;
            for option in &question.options {
                writeln!(out, "      - {}", option)?;
            }
        }
    }

    Ok(())
}

fn run_scan<W: Write>(
    repo: &Path,
    catalog_path: &Path,
    system_name: Option<&str>,
    output_dir: &Path,
    config: AuditorConfig,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(catalog_path)?;
    let mut auditor = Auditor::with_config(catalog, config);

    let name = match system_name {
        Some(name) => name.to_string(),
        None => default_system_name(repo),
    };

    let outcome = scanner::scan_repository(&mut auditor, repo, &name)?;

    writeln!(out, "Scan of {}", repo.display())?;
    writeln!(out, "{}", outcome.signals.summary())?;
    if outcome.signals.truncated {
        writeln!(out, "Scan stopped at the file limit; results are partial.")?;
    }
    for rule in &outcome.application.skipped_rules {
        writeln!(out, "Rule skipped, control not in catalog: {}", rule)?;
    }

    print_scores(&auditor, out)?;

    let exported = auditor.export_report(output_dir, SCAN_REPORT_STEM)?;
    print_exported(&exported, out)?;

    log_info!("Scan command completed", "system" => &name);
    Ok(())
}

fn run_interview<R: BufRead, W: Write>(
    catalog_path: &Path,
    output_dir: &Path,
    config: AuditorConfig,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(catalog_path)?;
    let bank = QuestionBank::embedded()?;
    let unknown = bank.unknown_controls(&catalog).len();
    if unknown > 0 {
        writeln!(
            out,
            "Note: {} questions reference controls outside the catalog and will be skipped",
            unknown
        )?;
    }

    let mut auditor = Auditor::with_config(catalog, config);
    let mut interview = Interview::new(input, &mut *out, &bank);
    let summary = interview.run(&mut auditor)?;
    drop(interview);

    let summary = match summary {
        Some(summary) => summary,
        None => return Ok(()),
    };

    writeln!(
        out,
        "\nReviewed {} domains, {} answers, {} findings",
        summary.domains_reviewed, summary.questions_answered, summary.findings_added
    )?;
    print_scores(&auditor, out)?;

    let system_name = auditor
        .scope()
        .map(|scope| scope.system_name.clone())
        .unwrap_or_default();
    let exported = auditor.export_report(output_dir, &interview_report_stem(&system_name))?;
    print_exported(&exported, out)?;

    Ok(())
}

fn default_system_name(repo: &Path) -> String {
    fs::canonicalize(repo)
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| repo.display().to_string())
}

/// Overall score, then domain scores from weakest to strongest
fn print_scores<W: Write>(auditor: &Auditor, out: &mut W) -> Result<(), Box<dyn Error>> {
    writeln!(out, "\nOverall Compliance Score: {:.1}%", auditor.overall_score())?;

    let mut scores: Vec<(String, f64)> = auditor.domain_scores().into_iter().collect();
    scores.sort_by(|a, b| a.1.total_cmp(&b.1));

    writeln!(out, "Domain Scores:")?;
    for (domain, score) in scores {
        writeln!(out, "  {}: {:.1}%", domain, score)?;
    }
    Ok(())
}

fn print_exported<W: Write>(
    exported: &ccf_auditor_base::api::ExportedReport,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "\nReports saved:")?;
    writeln!(out, "  - {}", exported.json_path.display())?;
    writeln!(out, "  - {}", exported.markdown_path.display())?;
    Ok(())
}
