//! Command-line interface for contentgate.
//!
//! Provides commands for auditing a proposal, checking the verdict only,
//! rewriting the title, building the AEO outline and showing configuration.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::config::{self, ResolvedConfig};
use crate::core::{AuditGate, AuditReport};
use crate::domain::{AuditGateInput, GateMode};

/// contentgate - Content-quality audit gate for SEO/AEO page proposals
#[derive(Parser, Debug)]
#[command(name = "contentgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (overrides discovery and CONTENTGATE_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full gate and print the report
    Audit {
        /// Input file, YAML or JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Gate mode
        #[arg(short, long, value_enum, default_value = "planning")]
        mode: ModeArg,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Exit with status 1 when the content is blocked
        #[arg(long)]
        fail_on_block: bool,
    },

    /// Print only the pass/fail verdict; exits 1 when blocked
    Check {
        /// Input file, YAML or JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Gate mode
        #[arg(short, long, value_enum, default_value = "pre-publish")]
        mode: ModeArg,
    },

    /// Print the working title (rewritten when the proposal scores low)
    Title {
        /// Input file, YAML or JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the AEO outline for the proposal
    Outline {
        /// Input file, YAML or JSON (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Show resolved configuration
    Config,
}

/// Gate mode for CLI (maps to GateMode)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Advisory: evaluator failures become warnings
    Planning,

    /// Enforcing: evaluator failures and low scores block
    PrePublish,
}

impl From<ModeArg> for GateMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Planning => GateMode::Planning,
            ModeArg::PrePublish => GateMode::PrePublish,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = match &self.config {
            Some(path) => config::load_config_from(Some(path))?,
            None => config::config()?.clone(),
        };

        match self.command {
            Commands::Audit {
                input,
                mode,
                format,
                fail_on_block,
            } => audit(&cfg, input, mode.into(), format, fail_on_block).await,
            Commands::Check { input, mode } => check(&cfg, input, mode.into()).await,
            Commands::Title { input } => title(&cfg, input).await,
            Commands::Outline { input, format } => outline(&cfg, input, format).await,
            Commands::Config => show_config(&cfg),
        }
    }
}

/// Run the full gate
async fn audit(
    cfg: &ResolvedConfig,
    input_file: Option<PathBuf>,
    mode: GateMode,
    format: OutputFormat,
    fail_on_block: bool,
) -> Result<()> {
    let input = load_input(cfg, input_file.as_deref()).await?;
    let gate = AuditGate::new(cfg.thresholds.clone());
    let result = gate.run(&input, mode);
    let approved = result.approved;

    match format {
        OutputFormat::Json => {
            let report = AuditReport::new(&input, result)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Markdown => println!("{}", result.to_markdown()),
    }

    if fail_on_block && !approved {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the verdict only
async fn check(cfg: &ResolvedConfig, input_file: Option<PathBuf>, mode: GateMode) -> Result<()> {
    let input = load_input(cfg, input_file.as_deref()).await?;
    let verdict = AuditGate::new(cfg.thresholds.clone()).would_pass(&input, mode);

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    if !verdict.pass {
        std::process::exit(1);
    }
    Ok(())
}

async fn title(cfg: &ResolvedConfig, input_file: Option<PathBuf>) -> Result<()> {
    let input = load_input(cfg, input_file.as_deref()).await?;
    println!("{}", AuditGate::new(cfg.thresholds.clone()).rewrite_title(&input));
    Ok(())
}

async fn outline(
    cfg: &ResolvedConfig,
    input_file: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let input = load_input(cfg, input_file.as_deref()).await?;
    let outline = AuditGate::new(cfg.thresholds.clone()).enhanced_outline(&input);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outline)?),
        OutputFormat::Markdown => print!("{}", outline.to_markdown()),
    }
    Ok(())
}

/// Show resolved configuration
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("contentgate configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    print!("{}", serde_yaml::to_string(cfg)?);
    Ok(())
}

/// Read, parse and validate gate input from a file or stdin
async fn load_input(cfg: &ResolvedConfig, input_file: Option<&Path>) -> Result<AuditGateInput> {
    let (content, is_json) = if let Some(path) = input_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        (content, is_json)
    } else if !std::io::stdin().is_terminal() {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read from stdin")?;
        (buffer, false)
    } else {
        anyhow::bail!("No input provided. Use --input <file> or pipe to stdin");
    };

    let input = parse_input(&content, is_json)?;
    cfg.limits
        .validate(&input)
        .context("Input rejected")?;
    debug!(service = %input.task_context.primary_service, "Loaded gate input");
    Ok(input)
}

/// Parse gate input; JSON when flagged or when the text looks like a JSON object
pub fn parse_input(content: &str, is_json: bool) -> Result<AuditGateInput> {
    if content.trim().is_empty() {
        anyhow::bail!("Input is empty");
    }

    if is_json || content.trim_start().starts_with('{') {
        serde_json::from_str(content).context("Failed to parse JSON input")
    } else {
        serde_yaml::from_str(content).context("Failed to parse YAML input")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageRole, SearchIntent};

    #[test]
    fn test_parse_yaml_input() {
        let yaml = r#"
task_context:
  role: money
  intent: buy
  primary_service: wedding photography
  location: Bristol
proposed:
  title: Wedding Photography in Bristol
  headings: [Pricing, Book Your Date]
  focus_keyphrase: wedding photography bristol
  meta_description: ""
"#;
        let input = parse_input(yaml, false).unwrap();
        assert_eq!(input.task_context.role, PageRole::Money);
        assert_eq!(input.task_context.intent, SearchIntent::Buy);
        assert_eq!(input.task_context.location(), Some("Bristol"));
        assert_eq!(input.proposed.headings.len(), 2);
        assert!(input.vision_context.is_none());
        assert!(input.user_context.reviews.is_empty());
    }

    #[test]
    fn test_parse_json_input() {
        let json = r#"{
            "task_context": {"role": "support", "intent": "learn", "primary_service": "gutter cleaning"},
            "proposed": {"title": "How to Clean Gutters", "headings": [], "focus_keyphrase": "", "meta_description": ""}
        }"#;
        let input = parse_input(json, false).unwrap();
        assert_eq!(input.task_context.intent, SearchIntent::Learn);
        assert!(input.task_context.location().is_none());
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert!(parse_input("   ", false).is_err());
        let err = parse_input("{\"task_context\": 3}", true).unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_mode_arg_maps_to_gate_mode() {
        assert_eq!(GateMode::from(ModeArg::Planning), GateMode::Planning);
        assert_eq!(GateMode::from(ModeArg::PrePublish), GateMode::PrePublish);
    }
}
