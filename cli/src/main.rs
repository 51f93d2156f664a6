//! Codex audit log: command-line front end.
//!
//! Records assistant invocations and extension lifecycle changes to the
//! JSON-array logs, and checks those logs for schema and hash integrity.
//!
//! Usage:
//!   codex-integrity log-invocation --command-id explain --workspace api
//!   codex-integrity log-lifecycle --action Install --version 1.2.3 \
//!       --workspace Global --reason upgrade
//!   codex-integrity validate --validate-hashes
//!
//! Every command reads `--config <file>` when given; flags override it.
//! Relative paths in the config file resolve against the file's directory;
//! relative paths given as flags resolve against the working directory.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use codex_audit::{EventLogger, HashResolver};
use codex_config::CodexConfig;
use codex_contracts::{
    error::{CodexError, CodexResult},
    integrity::IntegrityStatus,
    request::{InvocationRequest, LifecycleRequest},
};
use codex_core::{EnvSession, SystemClock};
use codex_verify::run_integrity_check;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Codex audit log: record assistant events and verify log integrity.
#[derive(Parser)]
#[command(
    name = "codex-integrity",
    about = "Record assistant audit events and verify log integrity",
    long_about = "Appends invocation and lifecycle events to JSON-array audit logs,\n\
                  and validates those logs against a JSON Schema and a hash-compliance policy."
)]
struct Cli {
    /// TOML configuration file. Relative paths inside it resolve against its directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record one assistant invocation.
    LogInvocation(InvocationArgs),
    /// Record one extension install, update, or removal.
    LogLifecycle(LifecycleArgs),
    /// Validate both logs and report an integrity status.
    Validate(ValidateArgs),
}

#[derive(Args, Default)]
struct InvocationArgs {
    #[arg(long)]
    command_id: Option<String>,
    #[arg(long)]
    workspace: Option<String>,
    #[arg(long)]
    invocation_type: Option<String>,
    #[arg(long)]
    completion_model: Option<String>,
    #[arg(long)]
    shortcut_used: Option<String>,
    #[arg(long)]
    context: Option<String>,
    #[arg(long)]
    stage: Option<String>,
    #[arg(long)]
    result: Option<String>,
    /// Write to this log instead of the configured invocation log.
    #[arg(long)]
    log_path: Option<PathBuf>,
}

#[derive(Args, Default)]
struct LifecycleArgs {
    #[arg(long)]
    action: Option<String>,
    #[arg(long)]
    version: Option<String>,
    #[arg(long)]
    workspace: Option<String>,
    #[arg(long)]
    reason: Option<String>,
    #[arg(long)]
    extension_id: Option<String>,
    #[arg(long)]
    stage: Option<String>,
    #[arg(long)]
    result: Option<String>,
    /// Write to this log instead of the configured lifecycle log.
    #[arg(long)]
    log_path: Option<PathBuf>,
}

#[derive(Args, Default)]
struct ValidateArgs {
    /// Lifecycle log to check. Relative to the working directory.
    #[arg(long)]
    lifecycle_log: Option<PathBuf>,
    /// Invocation log to check. Relative to the working directory.
    #[arg(long)]
    invocation_log: Option<PathBuf>,
    /// JSON Schema for both logs. Relative to the working directory.
    #[arg(long)]
    schema_path: Option<PathBuf>,
    /// Compute hash compliance for the lifecycle log.
    #[arg(long)]
    validate_hashes: bool,
    /// Compliance rate (percent, 0 to 100) below which a warning is recorded.
    #[arg(long)]
    threshold: Option<f64>,
}

impl From<InvocationArgs> for InvocationRequest {
    fn from(a: InvocationArgs) -> Self {
        InvocationRequest {
            command_id: a.command_id,
            workspace: a.workspace,
            invocation_type: a.invocation_type,
            completion_model: a.completion_model,
            shortcut_used: a.shortcut_used,
            context: a.context,
            stage: a.stage,
            result: a.result,
            log_path: a.log_path,
        }
    }
}

impl From<LifecycleArgs> for LifecycleRequest {
    fn from(a: LifecycleArgs) -> Self {
        LifecycleRequest {
            action: a.action,
            version: a.version,
            workspace: a.workspace,
            reason: a.reason,
            extension_id: a.extension_id,
            stage: a.stage,
            result: a.result,
            log_path: a.log_path,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=info for progress output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> CodexResult<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::LogInvocation(args) => {
            let event = build_logger(&config).build_invocation_event(&args.into())?;
            print_json(&event)?;
            Ok(0)
        }
        Command::LogLifecycle(args) => {
            let event = build_logger(&config).build_lifecycle_event(&args.into())?;
            print_json(&event)?;
            Ok(0)
        }
        Command::Validate(args) => {
            let mut config = config;
            apply_validate_overrides(&mut config, &args, &current_dir()?)?;

            let summary = run_integrity_check(&config.integrity_check());
            print_json(&summary)?;
            report_status(summary.status, summary.total_errors, summary.total_warnings);
            Ok(exit_code(summary.status))
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> CodexResult<CodexConfig> {
    match path {
        Some(p) => CodexConfig::from_file(p),
        None => Ok(CodexConfig::defaults_in(current_dir()?)),
    }
}

fn current_dir() -> CodexResult<PathBuf> {
    std::env::current_dir().map_err(|e| CodexError::ConfigError {
        reason: format!("cannot determine current directory: {e}"),
    })
}

fn build_logger(config: &CodexConfig) -> EventLogger {
    EventLogger::new(
        Box::new(SystemClock),
        Box::new(EnvSession::from_env(config.session_env_var())),
        HashResolver::new(config.artifact_dirs(), config.package_extension()),
        config.invocation_log(),
        config.lifecycle_log(),
    )
    .with_store_lock(config.store_lock())
}

/// Flags win over the config file. Flag paths are anchored at `cwd`, the
/// same way `--log-path` is for the logging commands. `--validate-hashes`
/// can only turn the check on.
fn apply_validate_overrides(
    config: &mut CodexConfig,
    args: &ValidateArgs,
    cwd: &Path,
) -> CodexResult<()> {
    if let Some(t) = args.threshold {
        config.set_compliance_threshold(t)?;
    }

    let settings = config.settings_mut();
    if let Some(p) = &args.lifecycle_log {
        settings.logs.lifecycle = cwd.join(p);
    }
    if let Some(p) = &args.invocation_log {
        settings.logs.invocation = cwd.join(p);
    }
    if let Some(p) = &args.schema_path {
        settings.schema.path = cwd.join(p);
    }
    if args.validate_hashes {
        settings.integrity.validate_hashes = true;
    }
    Ok(())
}

/// `Failed` is the only status that fails the process.
fn exit_code(status: IntegrityStatus) -> i32 {
    match status {
        IntegrityStatus::Passed | IntegrityStatus::Warning => 0,
        IntegrityStatus::Failed => 1,
    }
}

fn report_status(status: IntegrityStatus, errors: usize, warnings: usize) {
    match status {
        IntegrityStatus::Failed => {
            eprintln!("Integrity validation failed with {errors} error(s)");
        }
        IntegrityStatus::Warning => {
            eprintln!("Integrity validation completed with {warnings} warning(s)");
        }
        IntegrityStatus::Passed => println!("All integrity checks passed"),
    }
}

fn print_json<T: Serialize>(value: &T) -> CodexResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CodexError::Io {
        path: "<stdout>".to_string(),
        reason: format!("failed to serialize output: {e}"),
    })?;
    println!("{text}");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
