//! Scaffold a route declaration file inside a container.
//!
//! Options that are not passed are asked for on the terminal, unless
//! `--no-interaction` is set.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use apiato_core::generator::{
    ConsolePrompt, NonInteractive, Prompt, RouteGenerator, RouteInputs, Stub,
};

#[derive(Debug, Parser)]
#[command(name = "apiato-route", about = "Create a new Route file", version)]
struct Args {
    /// Root directory holding the containers
    #[arg(long, env = "CONTAINERS_PATH", default_value = "app/Containers")]
    containers_path: PathBuf,

    /// The name of the container
    #[arg(long)]
    container: Option<String>,

    /// The name of the route file (defaults to the operation)
    #[arg(long)]
    file: Option<String>,

    /// The operation from the Controller to be called (e.g., index)
    #[arg(long)]
    operation: Option<String>,

    /// The type of the endpoint (private, public)
    #[arg(long)]
    doctype: Option<String>,

    /// The version of the endpoint (1, 2, ...)
    #[arg(long)]
    docversion: Option<String>,

    /// The URI of the endpoint (/stores, /cars, ...)
    #[arg(long)]
    url: Option<String>,

    /// The HTTP verb of the endpoint (GET, POST, ...)
    #[arg(long)]
    verb: Option<String>,

    /// Use this stub file instead of the built-in one
    #[arg(long)]
    stub: Option<PathBuf>,

    /// Never ask; fail on missing required options
    #[arg(short = 'n', long)]
    no_interaction: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let inputs = RouteInputs {
        container: args.container,
        file: args.file,
        operation: args.operation,
        doctype: args.doctype,
        docversion: args.docversion,
        url: args.url,
        verb: args.verb,
    };

    let mut prompt: Box<dyn Prompt> = if args.no_interaction {
        Box::new(NonInteractive)
    } else {
        Box::new(ConsolePrompt::stdio())
    };
    let spec = inputs
        .resolve(prompt.as_mut())
        .context("Invalid route options")?;

    let mut generator = RouteGenerator::new(&args.containers_path);
    if let Some(stub) = &args.stub {
        generator = generator.with_stub(Stub::from_file(stub).context("Failed to load stub")?);
    }

    let path = generator
        .generate(&spec)
        .context("Failed to generate route")?;

    println!("Route generated successfully: {}", path.display());

    Ok(())
}
