use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use git_versioning::domain::ProjectId;
use git_versioning::git::Git2FactsProvider;
use git_versioning::resolver::Resolver;
use git_versioning::{config, ui, GitVersioningError};

#[derive(clap::Parser)]
#[command(
    name = "git-versioning",
    about = "Resolve project versions from git repository state and format rules"
)]
struct Args {
    /// Project coordinates as group:artifact[:version]
    coordinates: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Repository root to resolve against")]
    repo: PathBuf,

    #[arg(long, help = "Print the full context property map")]
    show_context: bool,

    #[arg(short = 'q', long, help = "Print only the resolved version string")]
    quiet: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-versioning {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let coordinates = match &args.coordinates {
        Some(coordinates) => coordinates.as_str(),
        None => {
            ui::display_error("Missing coordinates - expected group:artifact[:version]");
            std::process::exit(2);
        }
    };

    let id = match ProjectId::parse(coordinates) {
        Ok(id) => id,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(2);
        }
    };

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    let include_properties = config.include_properties || args.show_context;

    let mut resolver = Resolver::new(Git2FactsProvider::new(), &config)?;

    let outcome = resolver.resolve(&id, &args.repo);
    for warning in resolver.take_warnings() {
        ui::display_warning(&warning);
    }

    match outcome {
        Ok(resolved) => {
            if args.quiet {
                println!("{}", resolved.version);
            } else {
                ui::display_resolution(&resolved);
                if include_properties {
                    ui::display_context(&resolved);
                }
            }
            Ok(())
        }
        // a missing version leaves the project unresolved but is not a failure
        Err(GitVersioningError::MissingVersion { .. }) => {
            if !args.quiet {
                ui::display_status("Nothing to resolve");
            }
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
