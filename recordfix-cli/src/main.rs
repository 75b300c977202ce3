mod config;
mod explain;
mod io;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use recordfix_engine::{FixError, RecordFixer, RuleCatalog};
use recordfix_types::report::ReportArtifacts;
use recordfix_types::{FixReport, RunInfo, ToolInfo};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "recordfix",
    version,
    about = "Rule-driven normalization of JSON record batches."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize a record batch and split off records missing required fields.
    Fix(FixArgs),
    /// Explain what a rule does and how it treats missing fields.
    Explain(ExplainArgs),
    /// List all available rules.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct FixArgs {
    /// Record batch: a JSON document, or JSON lines (.jsonl / .ndjson).
    #[arg(long)]
    input: Utf8PathBuf,

    /// Declaration file (JSON, YAML or TOML). Replaces the config's [rules].
    #[arg(long)]
    rules: Option<Utf8PathBuf>,

    /// Declare or override one field, as `path=chain` (repeatable).
    #[arg(long = "rule", value_name = "PATH=CHAIN")]
    rule: Vec<String>,

    /// Output directory for recordfix artifacts.
    #[arg(long, default_value = "recordfix-out")]
    out_dir: Utf8PathBuf,

    /// Config file (default: ./recordfix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Write single-line JSON instead of pretty-printed JSON.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule name to explain (e.g., "integer", "required").
    rule: String,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(exit_code(&e));
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Fix(args) => cmd_fix(args),
        Command::Explain(args) => cmd_explain(args),
        Command::ListRules(args) => cmd_list_rules(args),
    }
}

/// Declaration errors exit with 2, everything else with 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<FixError>())
        .map(FixError::exit_code)
        .unwrap_or(1)
}

fn cmd_fix(args: FixArgs) -> anyhow::Result<()> {
    let started_at = Utc::now();

    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new(".")).context("load recordfix.toml config")?,
    };
    let rules_file = args
        .rules
        .as_deref()
        .map(io::load_declaration)
        .transpose()?;
    let cli_rules = config::parse_rule_assignments(&args.rule)?;
    let merged = ConfigMerger::new(file_config).merge_fix_args(rules_file, &cli_rules, args.compact);

    debug!(
        "merged config: rules={:?}, pretty={}",
        merged.rules, merged.pretty
    );
    if merged.rules.is_empty() {
        warn!("no rules declared; records pass through unchanged");
    }

    let records = io::load_records(&args.input)?;

    let mut fixer = RecordFixer::default();
    fixer
        .fix_data(records, &merged.rules)
        .with_context(|| format!("fix records from {}", args.input))?;

    let summary = fixer.summary();
    let plan = fixer.last_plan().clone();
    let (normalized, excluded) = fixer.into_outputs();

    let out_dir = args.out_dir;
    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir))?;

    let normalized_path = out_dir.join("normalized.json");
    let excluded_path = out_dir.join("excluded.json");
    io::write_json(&normalized_path, &normalized, merged.pretty)?;
    io::write_json(&excluded_path, &excluded, merged.pretty)?;

    let tool = ToolInfo {
        name: "recordfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };
    let run = RunInfo {
        started_at: Some(started_at),
        ended_at: Some(Utc::now()),
    };
    let mut report = FixReport::new(tool, run, summary, plan);
    report.artifacts = Some(ReportArtifacts {
        input: Some(args.input.to_string()),
        normalized: Some(normalized_path.to_string()),
        excluded: Some(excluded_path.to_string()),
    });
    io::write_json(&out_dir.join("report.json"), &report, merged.pretty)?;

    info!("wrote artifacts to {}", out_dir);
    println!(
        "normalized {} of {} records ({} excluded) -> {}",
        summary.normalized, summary.records_total, summary.excluded, out_dir
    );
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{list_rule_keys, lookup_rule};

    let Some(rule) = lookup_rule(&args.rule) else {
        let available = list_rule_keys().join(", ");
        anyhow::bail!(
            "Unknown rule: '{}'\n\nAvailable rules: {}",
            args.rule,
            available
        );
    };

    println!("================================================================================");
    println!("RULE: {}", rule.title);
    println!("================================================================================");
    println!();
    println!("Name:    {}", rule.key);
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.description);
    println!();

    println!("WHEN THE FIELD IS MISSING");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.when_missing);
    println!();

    println!("EXAMPLES");
    println!("--------------------------------------------------------------------------------");
    for (raw, fixed) in rule.examples {
        println!("  {:<28} -> {}", raw, fixed);
    }
    println!();

    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    let metas = RuleCatalog::builtin().metas();

    match args.format {
        OutputFormat::Text => {
            println!("Available rules:\n");
            println!("  {:<12} {:<12} DESCRIPTION", "NAME", "KIND");
            println!("  {:<12} {:<12} -----------", "----", "----");
            for meta in &metas {
                let kind = if meta.structural {
                    "structural"
                } else {
                    "transform"
                };
                println!("  {:<12} {:<12} {}", meta.name, kind, meta.description);
            }
            println!();
            println!("Use 'recordfix explain <rule>' for details.");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&metas)?);
        }
    }
    Ok(())
}
