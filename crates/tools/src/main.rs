use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tools::{check, load_content, marker_positions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Portfolio content tools")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a content document and print a summary
    Check {
        /// Path to the content JSON
        path: PathBuf,
    },

    /// Print projected marker positions as JSON
    Markers {
        /// Path to the content JSON (built-in content when omitted)
        path: Option<PathBuf>,

        /// Marker shell radius
        #[arg(long, default_value_t = scene::config::MarkerStyle::default().surface_radius)]
        radius: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Check { path } => {
            let content = load_content(Some(&path))?;
            let report = check(&content);
            info!(path = %path.display(), "content ok");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Markers { path, radius } => {
            let content = load_content(path.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&marker_positions(&content, radius))?);
        }
    }

    Ok(())
}
