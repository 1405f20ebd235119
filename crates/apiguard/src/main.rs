//! apiguard: lint Swagger/OpenAPI operations against API design conventions.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use apiguard_core::{Rule, Severity};
use apiguard_lib::logging::{self, LogFormat};
use apiguard_lib::report::{self, OutputFormat};
use apiguard_lib::{lint_files, LintConfig, LintError};

#[derive(Parser, Debug)]
#[command(name = "apiguard", about = "Lint API description documents", version)]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log format (pretty or json).
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lint spec file(s) and report rule violations.
    ///
    /// Exits with 1 when any file fails to load or any error-severity rule fires.
    Lint {
        /// Input spec file(s) (YAML or JSON).
        #[arg(short, long, required = true, num_args = 1..)]
        spec: Vec<PathBuf>,

        /// Configuration file (defaults to ./.apiguard.yaml when present).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override a rule severity, e.g. `--rule no_summary=off`.
        #[arg(long = "rule", value_name = "KEY=SEVERITY")]
        rules: Vec<String>,

        /// Output format (text or json).
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print every rule with its effective severity.
    Rules {
        /// Configuration file (defaults to ./.apiguard.yaml when present).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override a rule severity, e.g. `--rule no_summary=off`.
        #[arg(long = "rule", value_name = "KEY=SEVERITY")]
        rules: Vec<String>,
    },
}

/// Load the configuration file (if any) and apply command-line overrides.
fn effective_config(
    config: Option<&Path>,
    overrides: &[String],
) -> Result<LintConfig, LintError> {
    let mut lint_config = LintConfig::resolve(config, Path::new("."))?;
    lint_config.apply_overrides(overrides)?;
    Ok(lint_config)
}

/// Run the lint command.
fn run_lint(
    specs: &[PathBuf],
    config: Option<&Path>,
    overrides: &[String],
    format: &str,
) -> ExitCode {
    let Some(output_format) = OutputFormat::parse(format) else {
        eprintln!("error: unknown output format '{}' (expected text or json)", format);
        return ExitCode::from(2);
    };

    let lint_config = match effective_config(config, overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let results = lint_files(specs, &lint_config.operations);
    let has_failures = results.iter().any(|r| r.is_failure());

    match output_format {
        OutputFormat::Json => match report::render_json(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize report: {}", e);
                return ExitCode::from(1);
            }
        },
        OutputFormat::Text => eprint!("{}", report::render_text(&results)),
    }

    if has_failures {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Run the rules command.
fn run_rules(config: Option<&Path>, overrides: &[String]) -> ExitCode {
    let lint_config = match effective_config(config, overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    for rule in Rule::ALL {
        let severity = lint_config.operations.severity(rule);
        let marker = if severity == Severity::Off { "-" } else { "*" };
        println!(
            "{} {:<28} {:<8} {}",
            marker,
            rule.key(),
            severity,
            rule.message()
        );
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_format) = LogFormat::parse(&cli.log_format) else {
        eprintln!(
            "error: unknown log format '{}' (expected pretty or json)",
            cli.log_format
        );
        return ExitCode::from(2);
    };
    if let Err(e) = logging::init_logging(&cli.log_level, log_format) {
        eprintln!("error: {}", e);
        return ExitCode::from(1);
    }

    match cli.command {
        Commands::Lint {
            spec,
            config,
            rules,
            format,
        } => run_lint(&spec, config.as_deref(), &rules, &format),
        Commands::Rules { config, rules } => run_rules(config.as_deref(), &rules),
    }
}
