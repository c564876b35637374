//! object-eval — call an `object.*` builtin from the command line.
//!
//! Each operand is a JSON document; the result is printed as JSON, or in
//! policy syntax with `--display`.
//!
//! ```text
//! object-eval object.union '{"a": {"x": 1}}' '{"a": {"y": 2}}'
//! object-eval object.lookup '{"a": [{"b": "x"}]}' '"a.0.b"' 'null'
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use policy_core::config::{load_dotenv, EvalConfig};
use policy_core::Term;

// ── CLI ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "object-eval", version, about)]
struct Cli {
    /// Builtin name, e.g. `object.union`.
    builtin: Option<String>,

    /// Operands as JSON documents.
    operands: Vec<String>,

    /// List registered builtins and exit.
    #[arg(long)]
    list: bool,

    /// Pretty-print JSON output.
    #[arg(long, env = "POLICY_PRETTY")]
    pretty: bool,

    /// Print the result in policy syntax instead of JSON.
    #[arg(long)]
    display: bool,
}

fn main() -> Result<()> {
    load_dotenv();
    let config = EvalConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    config.log_summary();

    let cli = Cli::parse();
    let registry = policy_objects::registry().context("failed to register builtins")?;

    if cli.list {
        for name in registry.names() {
            if let Some(builtin) = registry.get(name) {
                println!("{}/{}", builtin.name, builtin.arity);
            }
        }
        return Ok(());
    }

    let Some(name) = cli.builtin.as_deref() else {
        bail!("missing builtin name (use --list to see available builtins)");
    };

    let operands = cli
        .operands
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_str::<Term>(raw)
                .with_context(|| format!("operand {} is not valid JSON: {}", i + 1, raw))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(builtin = name, operands = operands.len(), "evaluating");
    let result = registry
        .eval(name, &operands)
        .with_context(|| format!("{} failed", name))?;

    if cli.display {
        println!("{}", result);
    } else if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}
