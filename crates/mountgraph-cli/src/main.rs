//! Mountgraph CLI
//!
//! - `generate`: normalize a definitions document and infer context relations
//! - `kinds`: list every group/version/kind annotated in a document
//! - `inspect`: show one spec with its properties and mounts

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use mountgraph_relations::{generate, Generated};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

mod load;
mod report;

#[derive(Parser)]
#[command(name = "mountgraph")]
#[command(
    author,
    version,
    about = "Mountgraph: normalize Kubernetes schemas and infer where objects mount"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize definitions and infer context relations, emitting JSON.
    Generate {
        #[command(flatten)]
        model: ModelArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Which artifact to emit
        #[arg(long, value_enum, default_value_t = Emit::All)]
        emit: Emit,
    },

    /// List the group/version/kind keys annotated in a definitions document.
    Kinds {
        /// OpenAPI v2 document or bare definitions map
        #[arg(short, long)]
        definitions: PathBuf,
    },

    /// Show one normalized spec with its properties and mounts.
    Inspect {
        #[command(flatten)]
        model: ModelArgs,

        /// Full definition id, e.g. io.k8s.api.core.v1.Container
        id: String,
    },
}

#[derive(Args)]
struct ModelArgs {
    /// OpenAPI v2 document or bare definitions map
    #[arg(short, long)]
    definitions: PathBuf,

    /// JSON model config (kinds, patches, meta ids, excluded properties)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resource kinds, as a JSON array or one `group.version.kind` per line
    #[arg(long)]
    kinds: Option<PathBuf>,

    /// Treat every annotated kind as a resource
    #[arg(long)]
    all_kinds: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    Specs,
    Relations,
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate { model, out, emit } => {
            let generated = run_model(&model)?;
            let json = emit_json(&generated, emit)?;
            write_output(out.as_deref(), &json)?;
            if !cli.quiet {
                eprint!("{}", report::summary(&generated.stats)?);
            }
        }
        Commands::Kinds { definitions } => {
            let defs = load::read_definitions(&definitions)?;
            for key in load::collect_kinds(&defs).iter() {
                println!("{key}");
            }
        }
        Commands::Inspect { model, id } => {
            let generated = run_model(&model)?;
            let text = report::inspect(&generated, &id)?
                .ok_or_else(|| anyhow!("no spec named `{id}` in {}", model.definitions.display()))?;
            print!("{text}");
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_model(model: &ModelArgs) -> Result<Generated> {
    let definitions = load::read_definitions(&model.definitions)?;
    let config = load::load_config(
        model.config.as_deref(),
        model.kinds.as_deref(),
        model.all_kinds,
        &definitions,
    )?;
    if config.kinds.is_empty() {
        tracing::warn!("no resource kinds configured; every spec is treated as a plain object");
    }
    generate(&definitions, &config)
        .with_context(|| format!("generation failed for {}", model.definitions.display()))
}

fn emit_json(generated: &Generated, emit: Emit) -> Result<String> {
    let json = match emit {
        Emit::Specs => serde_json::to_string_pretty(&generated.specs)?,
        Emit::Relations => serde_json::to_string_pretty(&generated.relations)?,
        Emit::All => serde_json::to_string_pretty(generated)?,
    };
    Ok(json)
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
        }
        None => println!("{text}"),
    }
    Ok(())
}
