//! # plan-review CLI
//!
//! Parse plans, export feedback, and create or open share links.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plan_review_config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plan-review")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to ~/.config/plan-review/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the blocks a plan parses into
    Blocks {
        plan: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the feedback document for a plan's annotations
    Feedback {
        plan: PathBuf,

        /// JSON file holding an array of annotations
        annotations: Option<PathBuf>,
    },

    /// Create a share link for a plan
    Share {
        plan: PathBuf,

        /// JSON file holding an array of annotations
        #[arg(long)]
        annotations: Option<PathBuf>,

        /// Title shown to recipients (defaults to the plan's first heading)
        #[arg(long)]
        title: Option<String>,
    },

    /// Decode a share link and show its plan and feedback
    Open {
        /// Share URL or bare payload
        link: String,

        /// Emit the decoded plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add your annotations to a shared plan and print the new link
    Reshare {
        /// Share URL or bare payload
        link: String,

        /// JSON file holding your annotations
        annotations: PathBuf,
    },

    /// Render a plan as HTML with annotation highlights
    Render {
        plan: PathBuf,

        /// JSON file holding an array of annotations
        annotations: Option<PathBuf>,
    },

    /// Set the reviewer name and colour stamped on shared annotations
    SetAuthor {
        name: String,

        /// Highlight colour as a hex code, e.g. "#3B82F6"
        #[arg(long)]
        color: Option<String>,
    },

    /// Read or write the annotation store
    Annotations {
        #[command(subcommand)]
        command: AnnotationCommands,
    },
}

#[derive(Subcommand)]
enum AnnotationCommands {
    /// Store annotations from a JSON file under a plan id
    Save { plan_id: String, file: PathBuf },

    /// Print the stored annotations of a plan as JSON
    Load { plan_id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let config = Config::resolve(cli.config.as_deref())?;
    log::debug!("using share base {}", config.share_base_url);

    match cli.command {
        Commands::Blocks { plan, json } => commands::blocks(&plan, json),
        Commands::Feedback { plan, annotations } => {
            commands::feedback(&plan, annotations.as_deref())
        }
        Commands::Share {
            plan,
            annotations,
            title,
        } => commands::share(&config, &plan, annotations.as_deref(), title.as_deref()),
        Commands::Open { link, json } => commands::open(&link, json),
        Commands::Reshare { link, annotations } => commands::reshare(&config, &link, &annotations),
        Commands::Render { plan, annotations } => commands::render(&plan, annotations.as_deref()),
        Commands::SetAuthor { name, color } => {
            commands::set_author(cli.config.as_deref(), &name, color.as_deref())
        }
        Commands::Annotations { command } => match command {
            AnnotationCommands::Save { plan_id, file } => {
                commands::save_annotations(&config, &plan_id, &file)
            }
            AnnotationCommands::Load { plan_id } => commands::load_annotations(&config, &plan_id),
        },
    }
}
