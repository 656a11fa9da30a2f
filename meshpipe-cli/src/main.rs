/// meshpipe - load an OBJ file and print its vertex stream and transforms
///
/// Usage: meshpipe <file.obj> [--lenient] [--position x,y,z] [--scale x,y,z]
///                 [--orientation degrees] [--aspect ratio]
///
/// Set RUST_LOG=debug for parser diagnostics.

use anyhow::{Context, Result};
use clap::Parser;
use meshpipe_cli::{report, Args};
use meshpipe_core::{Mesh, Transform};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mesh = Mesh::load(&args.path, &args.load_options())
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    let matrices = Transform::compose(&args.pose(), &args.camera())
        .context("failed to compose transforms")?;

    print!("{}", report(&mesh, &matrices));
    Ok(())
}
