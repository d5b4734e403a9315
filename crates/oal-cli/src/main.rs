use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use oal_core::config::{self, CONFIG_FILE_NAME, RuleConfig};
use oal_core::document::{self, DocumentFormat, WriteOutcome};
use oal_core::fix;
use oal_core::resolve;
use oal_core::rules::{self, ValidationReport};
use oal_core::{Rule, RuleContext};

#[derive(Parser)]
#[command(name = "oal", about = "OpenAPI convention linter", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint an OpenAPI spec against the configured conventions
    Lint {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the rule configuration (defaults to .oal.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Apply proposed fixes and rewrite the input file
        #[arg(long)]
        fix: bool,
    },

    /// List registered rules
    Rules,

    /// Initialize a new oal configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lint { input, config, fix } => cmd_lint(input, config, fix),

        Commands::Rules => cmd_rules(),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oal", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the rule configuration: an explicit path, the project file, or the
/// built-in defaults.
fn load_rule_config(explicit: Option<&PathBuf>) -> Result<RuleConfig> {
    let path = explicit
        .cloned()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    match config::load_config(&path).map_err(|e| anyhow::anyhow!(e))? {
        Some(cfg) => {
            log::debug!("loaded rule config from {}", path.display());
            Ok(cfg)
        }
        None if explicit.is_some() => anyhow::bail!("config file {} not found", path.display()),
        None => Ok(RuleConfig::default()),
    }
}

fn load_document(path: &PathBuf) -> Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let doc = match DocumentFormat::from_path(path) {
        Some(DocumentFormat::Json) => document::from_json(&content)?,
        _ => document::from_yaml(&content)?,
    };
    Ok(doc)
}

fn print_findings(report: &ValidationReport) {
    for finding in &report.errors {
        println!("error    {}  {}", finding.path, finding.message);
    }
    for finding in &report.warnings {
        println!("warning  {}  {}", finding.path, finding.message);
    }
    eprintln!(
        "{} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );
}

fn cmd_lint(input: PathBuf, config_path: Option<PathBuf>, apply: bool) -> Result<()> {
    let cfg = load_rule_config(config_path.as_ref())?;
    let mut original = load_document(&input)?;
    let resolved = resolve::resolve_spec(&original)?;

    let ctx = RuleContext {
        resolved_spec: &resolved,
    };
    let report = rules::run_rules(&ctx, &cfg);

    print_findings(&report);

    if apply && !report.fixes.is_empty() {
        match fix::apply_fixes(&report.fixes, &mut original, &input)? {
            WriteOutcome::Written(_) => {
                eprintln!("Applied {} fixes to {}", report.fix_count(), input.display());
            }
            WriteOutcome::UnknownExtension => {
                anyhow::bail!(
                    "cannot rewrite {}: unrecognized extension (expected .json, .yaml, or .yml)",
                    input.display()
                );
            }
        }
    } else if !report.fixes.is_empty() {
        eprintln!(
            "{} violations can be fixed automatically; rerun with --fix to apply",
            report.fix_count()
        );
    }

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_rules() -> Result<()> {
    for rule in rules::all_rules() {
        println!("{:<16} {}", rule.name(), rule.description());
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
