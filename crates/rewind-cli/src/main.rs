#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use rewind_core::DuplicatePolicy;
use rewind_core::config::{RewindConfig, resolve_config};
use rewind_core::error::ErrorCode;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rewind: an event-sourced item store with undo/redo",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Do not log dispatched events.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of .rewind/config.toml discovery.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the duplicate-id policy: append, ignore, or reject.
    #[arg(long, global = true, value_name = "POLICY")]
    duplicate_ids: Option<DuplicatePolicy>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }

    /// Fold command-line overrides into the loaded config.
    fn apply_overrides(&self, config: &mut RewindConfig) {
        if let Some(policy) = self.duplicate_ids {
            config.store.duplicate_ids = policy;
        }
        if self.quiet {
            config.log.enabled = false;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Walk through add, remove, undo, redo",
        long_about = "Dispatch an ADD_ITEM and a REMOVE_ITEM against a fresh store, then undo and redo once, printing the state after every step.",
        after_help = "EXAMPLES:\n    # Human-readable walkthrough\n    rw demo\n\n    # Emit machine-readable output\n    rw demo --json"
    )]
    Demo,

    #[command(
        about = "Replay a script of dispatch/undo/redo steps",
        long_about = "Replay a JSON Lines script against a fresh store and print the final state and history depths.",
        after_help = "EXAMPLES:\n    # Replay leniently\n    rw run steps.jsonl\n\n    # Abort on the first invalid event\n    rw run steps.jsonl --strict\n\n    # Include the dispatched events in JSON output\n    rw run steps.jsonl --transcript --json"
    )]
    Run(cmd::run::RunArgs),

    #[command(
        about = "Apply one event to one state",
        long_about = "Reduce a single event onto a state given as JSON, with no history involved.",
        after_help = "EXAMPLES:\n    # Add to an empty store\n    rw reduce --event '{\"kind\":\"ADD_ITEM\",\"payload\":{\"item\":{\"id\":1,\"name\":\"Product 1\"}}}'\n\n    # Remove from an existing state\n    rw reduce --state '{\"items\":[{\"id\":1,\"name\":\"a\"}]}' --event '{\"kind\":\"REMOVE_ITEM\",\"payload\":{\"itemId\":1}}'"
    )]
    Reduce(cmd::reduce::ReduceArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    rw completions bash"
    )]
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("REWIND_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "rewind=debug,rw=debug,info"
        } else {
            "rewind=info,rw=info,warn"
        })
    });

    let format = env::var("REWIND_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let project_root = env::current_dir()?;

    let mut config = match resolve_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let message = format!("{e:#}");
            render_error(
                output,
                &CliError::with_code(&message, ErrorCode::ConfigParseError),
            )?;
            anyhow::bail!("{message}");
        }
    };
    cli.apply_overrides(&mut config);
    debug!(policy = %config.store.duplicate_ids, log = config.log.enabled, "resolved config");

    match cli.command {
        Commands::Demo => cmd::demo::run_demo(&config, output),
        Commands::Run(ref args) => cmd::run::run_run(args, &config, output),
        Commands::Reduce(ref args) => cmd::reduce::run_reduce(args, &config, output),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "rw", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["rw", "demo"],
            vec!["rw", "run", "steps.jsonl"],
            vec!["rw", "reduce", "--event", "{}"],
            vec!["rw", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?}, error: {:?}",
                args,
                result.err()
            );
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["rw", "demo", "--json", "--quiet", "--duplicate-ids", "reject"]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.duplicate_ids, Some(DuplicatePolicy::Reject));
    }

    #[test]
    fn verbose_is_accepted_after_subcommand() {
        let cli = Cli::parse_from(["rw", "demo", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn invalid_policy_is_rejected() {
        assert!(Cli::try_parse_from(["rw", "--duplicate-ids", "overwrite", "demo"]).is_err());
    }

    #[test]
    fn overrides_fold_into_config() {
        let cli = Cli::parse_from(["rw", "-q", "--duplicate-ids", "ignore", "demo"]);
        let mut config = RewindConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::Ignore);
        assert!(!config.log.enabled);
    }

    #[test]
    fn format_flag_takes_value_enum() {
        let cli = Cli::parse_from(["rw", "--format", "text", "demo"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }
}
