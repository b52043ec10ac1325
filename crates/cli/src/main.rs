mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Which response option a template is expanded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ResponseArg {
    Positive,
    Negative,
}

/// Placeholder, predicate and event pipeline tooling for layout schemas.
#[derive(Parser)]
#[command(
    name = "placard",
    version,
    about = "Placeholder, predicate and event pipeline tooling for layout schemas"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a templated string against an offer in a layout schema
    Expand {
        /// Template text containing %^...^% placeholders
        template: String,
        /// Path to the layout schema JSON
        #[arg(long)]
        schema: PathBuf,
        /// Slot whose offer supplies the data
        #[arg(long, default_value = "0")]
        slot: usize,
        /// Catalog item of the offer to bring into scope
        #[arg(long)]
        catalog_item: Option<usize>,
        /// Response option to bring into scope
        #[arg(long, value_enum)]
        response: Option<ResponseArg>,
        /// Zero-based offer on screen, for STATE placeholders
        #[arg(long, default_value = "0")]
        position: usize,
    },

    /// Evaluate a predicate array against a UI state
    Eval {
        /// Path to a JSON file holding the `when` predicate array
        #[arg(long)]
        predicates: PathBuf,
        /// Path to a JSON file describing the UI state
        #[arg(long)]
        state: PathBuf,
        /// Layout schema supplying breakpoints and placeholder data
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Slot whose offer supplies placeholder data (requires --schema)
        #[arg(long, default_value = "0")]
        slot: usize,
        /// Catalog item of the offer to bring into scope
        #[arg(long)]
        catalog_item: Option<usize>,
    },

    /// Feed recorded events through the dedup/batch pipeline
    Replay {
        /// Path to a JSON Lines file, one event record per line
        #[arg(long)]
        events: PathBuf,
        /// Pipeline config (TOML); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Delay between submissions in milliseconds
        #[arg(long, default_value = "0")]
        interval_ms: u64,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand {
            template,
            schema,
            slot,
            catalog_item,
            response,
            position,
        } => {
            commands::expand::cmd_expand(commands::expand::ExpandOptions {
                template: &template,
                schema: &schema,
                slot,
                catalog_item,
                response,
                position,
                output: cli.output,
                quiet: cli.quiet,
            });
        }
        Commands::Eval {
            predicates,
            state,
            schema,
            slot,
            catalog_item,
        } => {
            commands::eval::cmd_eval(commands::eval::EvalOptions {
                predicates: &predicates,
                state: &state,
                schema: schema.as_deref(),
                slot,
                catalog_item,
                output: cli.output,
                quiet: cli.quiet,
            });
        }
        Commands::Replay {
            events,
            config,
            interval_ms,
        } => {
            commands::replay::cmd_replay(
                &events,
                config.as_deref(),
                interval_ms,
                cli.output,
                cli.quiet,
            );
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Read and parse a JSON file, exiting with a reported error on failure.
pub(crate) fn read_json(path: &std::path::Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: file not found: {}", path.display());
            report_error(&msg, output, quiet);
            std::process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error: invalid JSON in {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            std::process::exit(1);
        }
    }
}

/// Load a layout schema file, exiting with a reported error on failure.
pub(crate) fn load_schema(
    path: &std::path::Path,
    output: OutputFormat,
    quiet: bool,
) -> placard_interchange::LayoutSchema {
    let doc = read_json(path, output, quiet);
    match placard_interchange::from_schema(&doc) {
        Ok(schema) => schema,
        Err(e) => {
            let msg = format!("error: invalid layout schema {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            std::process::exit(1);
        }
    }
}
