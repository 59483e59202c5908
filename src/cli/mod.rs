//! CLI command definitions and handlers

mod init;

use analysis_gate::config::{load_config, load_config_file, ValidatorConfig};
use analysis_gate::models::ValidationLevel;
use analysis_gate::observer::{JournalObserver, TracingObserver};
use analysis_gate::reporters::{self, OutputFormat, TextOptions};
use analysis_gate::validation::Validator;
use analysis_gate::Analysis;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// analysis-gate - progressive quality gate for orchestrator analyses
#[derive(Parser, Debug)]
#[command(name = "analysis-gate")]
#[command(
    version,
    about = "Score an analysis document and accept it at the strictest quality tier it clears",
    long_about = "analysis-gate scores a JSON analysis on structure, research, avatar, \
insights and simulation, then tries the STRICT, MODERATE, FLEXIBLE and EMERGENCY \
profiles in order. An analysis that clears none of them still passes through the \
emergency override, so downstream steps are never blocked.",
    after_help = "\
Examples:
  analysis-gate validate analysis.json               Validate a file
  cat analysis.json | analysis-gate validate -       Validate stdin
  analysis-gate validate analysis.json --explain     Show every profile attempt
  analysis-gate validate a.json --fail-below moderate   Exit 1 below MODERATE (CI mode)
  analysis-gate clean analysis.json -o clean.json    Strip failed-step markers
  analysis-gate levels                               Show the threshold table"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: analysis-gate.toml or .analysis-gate.json in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write one JSON file per validation event under this directory
    #[arg(long, global = true, env = "ANALYSIS_GATE_JOURNAL_DIR")]
    pub journal_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an analysis with progressive tolerance
    Validate {
        /// Analysis JSON file, or - for stdin
        input: PathBuf,

        /// Session id used to correlate logs and journal entries (generated when absent)
        #[arg(long)]
        session_id: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// List every profile attempt
        #[arg(long)]
        explain: bool,

        /// Disable emoji in output (cleaner for CI logs)
        #[arg(long)]
        no_emoji: bool,

        /// Exit with code 1 if the accepted level is weaker than this one
        #[arg(long, value_parser = ["strict", "moderate", "flexible", "emergency"])]
        fail_below: Option<String>,
    },

    /// Remove fields tagged with failure markers (ERRO_, FALHA_, INVALID_)
    Clean {
        /// Analysis JSON file, or - for stdin
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Omit the validation_metadata block
        #[arg(long)]
        no_metadata: bool,
    },

    /// Check whether the analysis has enough content for a PDF report (exit 1 if not)
    PdfCheck {
        /// Analysis JSON file, or - for stdin
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Pass the analysis without scoring it
    Force {
        /// Analysis JSON file, or - for stdin
        input: PathBuf,

        /// Why the gate is being bypassed
        #[arg(long)]
        reason: String,

        /// Session id used to correlate logs and journal entries (generated when absent)
        #[arg(long)]
        session_id: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Score a single component of the analysis
    Component {
        /// Analysis JSON file, or - for stdin
        input: PathBuf,

        /// Top-level key of the component, e.g. avatar_ultra_detalhado
        name: String,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Show the validation levels and their thresholds
    Levels {
        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Write an analysis-gate.toml with the default settings
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Run the selected command; returns the process exit code
pub fn run(cli: Cli) -> Result<i32> {
    let config = || resolve_config(cli.config.as_deref());

    match cli.command {
        Commands::Init { path, force } => {
            init::run(&path, force)?;
            Ok(0)
        }

        Commands::Validate {
            input,
            session_id,
            format,
            output,
            explain,
            no_emoji,
            fail_below,
        } => {
            let config = config()?;
            let format = resolve_format(format.as_deref(), &config)?;
            let options = text_options(&config, no_emoji, explain, output.is_none());
            let validator = build_validator(config, cli.journal_dir);
            let analysis = read_analysis(&input)?;
            let session_id = session_id.unwrap_or_else(generate_session_id);

            let verdict = validator.validate(&analysis, Some(&session_id));
            let rendered = reporters::report(&verdict, format, &options)?;
            emit(&rendered, output.as_deref())?;

            let floor = fail_below
                .as_deref()
                .map(ValidationLevel::from_str)
                .transpose()?;
            Ok(if below_floor(verdict.level, floor) { 1 } else { 0 })
        }

        Commands::Clean {
            input,
            output,
            no_metadata,
        } => {
            let config = config()?;
            let validator = Validator::new(config);
            let analysis = read_analysis(&input)?;

            let cleaned = validator.clean_for_output(&analysis);
            let meta = &cleaned.validation_metadata;
            tracing::info!(
                "Cleaned analysis: {} -> {} bytes",
                meta.original_size,
                meta.cleaned_size
            );
            let document = if no_metadata {
                cleaned.analysis
            } else {
                cleaned.into_document()
            };

            let rendered = serde_json::to_string_pretty(&document)?;
            emit(&rendered, output.as_deref())?;
            Ok(0)
        }

        Commands::PdfCheck { input, format } => {
            let config = config()?;
            let format = resolve_format(format.as_deref(), &config)?;
            let options = text_options(&config, false, false, true);
            let validator = Validator::new(config);
            let analysis = read_analysis(&input)?;

            let pdf = validator.should_generate_pdf(&analysis);
            emit(&reporters::report_pdf(&pdf, format, &options)?, None)?;
            Ok(if pdf.eligible { 0 } else { 1 })
        }

        Commands::Force {
            input,
            reason,
            session_id,
            format,
        } => {
            let config = config()?;
            if reason.trim().is_empty() {
                bail!("--reason must not be empty");
            }
            let format = resolve_format(format.as_deref(), &config)?;
            let options = text_options(&config, false, false, true);
            let validator = build_validator(config, cli.journal_dir);
            let analysis = read_analysis(&input)?;
            let session_id = session_id.unwrap_or_else(generate_session_id);

            let verdict = validator.force_pass(&analysis, &reason, Some(&session_id));
            emit(&reporters::report(&verdict, format, &options)?, None)?;
            Ok(0)
        }

        Commands::Component {
            input,
            name,
            format,
        } => {
            let config = config()?;
            let format = resolve_format(format.as_deref(), &config)?;
            let options = text_options(&config, false, false, true);
            let validator = Validator::new(config);
            let analysis = read_analysis(&input)?;

            let check = validator.check_component(&name, analysis.get(&name));
            emit(&reporters::report_component(&check, format, &options)?, None)?;
            Ok(0)
        }

        Commands::Levels { format } => {
            let config = config()?;
            let format = resolve_format(format.as_deref(), &config)?;
            let options = text_options(&config, false, false, true);
            let stats = Validator::new(config).stats();
            emit(&reporters::report_stats(&stats, format, &options)?, None)?;
            Ok(0)
        }
    }
}

/// Explicit `--config` must load; otherwise search the working directory
fn resolve_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => load_config_file(path),
        None => {
            let cwd = std::env::current_dir().context("Cannot determine working directory")?;
            Ok(load_config(&cwd))
        }
    }
}

/// CLI flag, then `[defaults] format`, then text
fn resolve_format(flag: Option<&str>, config: &ValidatorConfig) -> Result<OutputFormat> {
    let name = flag
        .or(config.defaults.format.as_deref())
        .unwrap_or("text");
    OutputFormat::from_str(name)
}

fn text_options(
    config: &ValidatorConfig,
    no_emoji: bool,
    explain: bool,
    to_terminal: bool,
) -> TextOptions {
    TextOptions {
        explain,
        emoji: !(no_emoji || config.defaults.no_emoji.unwrap_or(false)),
        color: to_terminal && console::colors_enabled(),
    }
}

/// Validator with the tracing observer, plus the journal when enabled
fn build_validator(config: ValidatorConfig, journal_dir: Option<PathBuf>) -> Validator {
    let journal_root = journal_dir.or_else(|| {
        config
            .journal
            .enabled
            .then(|| config.journal.effective_dir())
    });

    let mut validator = Validator::new(config).with_observer(TracingObserver);
    if let Some(root) = journal_root {
        tracing::debug!("Journaling validation events to {}", root.display());
        validator.register(Box::new(JournalObserver::new(root)));
    }
    validator
}

/// Read a JSON object from a file, or from stdin when `input` is `-`
fn read_analysis(input: &Path) -> Result<Analysis> {
    let (content, source) = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read analysis from stdin")?;
        (buf, "stdin".to_string())
    } else {
        let content = std::fs::read_to_string(input)
            .with_context(|| format!("Cannot read {}", input.display()))?;
        (content, input.display().to_string())
    };

    parse_analysis(&content).with_context(|| format!("Invalid analysis in {}", source))
}

fn parse_analysis(content: &str) -> Result<Analysis> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => bail!("expected a JSON object, got {}", json_kind(&other)),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Print to stdout, or write to `output`
fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// `session_<unix seconds>_<8 hex chars>`
fn generate_session_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "session_{}_{}",
        chrono::Utc::now().timestamp(),
        &suffix[..8]
    )
}

/// True when `level` ranks below `floor`; forced passes never do
fn below_floor(level: ValidationLevel, floor: Option<ValidationLevel>) -> bool {
    match (level.rank(), floor.and_then(|f| f.rank())) {
        (Some(rank), Some(min)) => rank < min,
        _ => false,
    }
}
