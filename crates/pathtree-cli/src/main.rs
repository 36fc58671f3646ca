//! `pathtree` CLI — build JSON documents from field-path scripts.
//!
//! ## Usage
//!
//! ```sh
//! # Build JSON from a script on stdin
//! printf 'name = "Alice"\naddress.city = "Paris"\n' | pathtree build
//!
//! # Build from a file, pretty-printed, into a file
//! pathtree build -i doc.paths -o doc.json --pretty
//!
//! # Assignments straight from the command line (no stdin read)
//! pathtree build --set 'user.name="Ada"' --set 'user.tags=["x"]'
//!
//! # Interleave a wrapper object around every level
//! pathtree build --prefix attributes -i doc.paths
//!
//! # List every leaf of a JSON object as script lines
//! pathtree flatten -i doc.json
//! ```
//!
//! Logging goes to stderr and is filtered by `PATHTREE_LOG` (default `warn`,
//! or `debug` with `--verbose`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pathtree_core::{apply_script, JsonObjectBuilder, ScriptOptions};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pathtree",
    version,
    about = "Build JSON documents one field path at a time"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a JSON object from `<path> = <json>` lines
    Build {
        /// Script file (reads from stdin if omitted and no --set is given)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Extra assignment applied after the script, e.g. `a.b=42`
        #[arg(long = "set", value_name = "PATH=JSON")]
        assignments: Vec<String>,
        /// Interleave this name before every path segment
        #[arg(long, conflicts_with = "suffix")]
        prefix: Option<String>,
        /// Interleave this name after every path segment
        #[arg(long)]
        suffix: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print every leaf of a JSON object as a script line
    Flatten {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            output,
            assignments,
            prefix,
            suffix,
            pretty,
        } => {
            let options = ScriptOptions { prefix, suffix };
            let mut builder = JsonObjectBuilder::new();

            // With only --set assignments there is nothing to read.
            if input.is_some() || assignments.is_empty() {
                let script = read_input(input.as_deref())?;
                apply_script(&mut builder, &script, &options)
                    .context("Failed to build JSON from script")?;
            }
            if !assignments.is_empty() {
                let extra = assignments.join("\n");
                apply_script(&mut builder, &extra, &options)
                    .context("Failed to apply --set assignments")?;
            }

            let value = builder.into_value();
            info!(fields = value.as_object().map_or(0, |m| m.len()), "built document");
            let json = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Flatten { input, output } => {
            let json = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Failed to parse JSON input")?;
            let Some(object) = value.as_object() else {
                anyhow::bail!("flatten expects a JSON object at the top level");
            };
            let script =
                pathtree_core::to_script(object).context("Failed to flatten JSON object")?;
            debug!(lines = script.lines().count(), "flattened document");
            write_output(output.as_deref(), &script)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `PATHTREE_LOG` takes precedence over the
/// default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PATHTREE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
