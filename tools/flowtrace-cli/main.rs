use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use flowtrace::model::{ParsedWorkflow, Platform};
use flowtrace::render::RenderOptions;
use tracing_subscriber::EnvFilter;

/// CLI-side mirror of `Platform` for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformCli {
    Make,
    N8n,
    Zapier,
}

impl From<PlatformCli> for Platform {
    fn from(p: PlatformCli) -> Self {
        match p {
            PlatformCli::Make => Platform::Make,
            PlatformCli::N8n => Platform::N8n,
            PlatformCli::Zapier => Platform::Zapier,
        }
    }
}

/// Normalize Make, n8n and Zapier workflow exports into one graph
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the workflow as a text tree
    Render {
        /// Path to the exported workflow JSON
        path: PathBuf,
        /// Platform of the export; detected from its shape when omitted
        #[arg(short, long, value_enum)]
        platform: Option<PlatformCli>,
        /// Prefix trigger nodes with a marker
        #[arg(long)]
        mark_triggers: bool,
    },
    /// Print the normalized nodes and edges as JSON
    Json {
        path: PathBuf,
        #[arg(short, long, value_enum)]
        platform: Option<PlatformCli>,
    },
    /// Report structural problems; exits non-zero when any are found
    Check {
        path: PathBuf,
        #[arg(short, long, value_enum)]
        platform: Option<PlatformCli>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Render {
            path,
            platform,
            mark_triggers,
        } => {
            let workflow = load(&path, platform)?;
            let options = RenderOptions {
                mark_triggers,
                ..RenderOptions::default()
            };
            print!("{}", flowtrace::render::render_workflow(&workflow, &options));
            Ok(ExitCode::SUCCESS)
        }
        Command::Json { path, platform } => {
            let workflow = load(&path, platform)?;
            let json = serde_json::to_string_pretty(&workflow)
                .context("failed to serialize normalized workflow")?;
            println!("{}", json);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { path, platform } => {
            let workflow = load(&path, platform)?;
            let findings = flowtrace::validate::diagnose(&workflow.graph);
            for finding in &findings {
                println!("{}", finding);
            }
            if findings.is_empty() {
                println!(
                    "ok: {} nodes, {} edges",
                    workflow.graph.nodes.len(),
                    workflow.graph.edges.len()
                );
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn load(path: &Path, platform: Option<PlatformCli>) -> Result<ParsedWorkflow> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read workflow file '{}'", path.display()))?;
    let workflow = match platform {
        Some(p) => flowtrace::parse::parse(p.into(), &json),
        None => flowtrace::parse::parse_auto(&json),
    }
    .with_context(|| format!("failed to normalize '{}'", path.display()))?;
    Ok(workflow)
}
