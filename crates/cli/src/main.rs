mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use shoebox_core::Library;

/// Shoebox — local image catalog with tags and bounded groups
#[derive(Parser)]
#[command(name = "shoebox", version, about)]
struct Cli {
    /// Path to the catalog database
    #[arg(long, default_value_t = default_path("catalog.db"))]
    catalog: String,

    /// Path to the settings file holding registered folders
    #[arg(long, default_value_t = default_path("settings.json"))]
    settings: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage registered folders: add, rescan, or list
    Folders {
        #[command(subcommand)]
        action: Option<FoldersAction>,
    },
    /// List catalogued images with their sizes and tags
    Ls,
    /// List all known tags
    Tags,
    /// Attach or detach a tag on an image
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Manage image groups (10 images maximum per group)
    Groups {
        #[command(subcommand)]
        action: Option<GroupsAction>,
    },
}

#[derive(Subcommand)]
enum FoldersAction {
    /// Register a folder and scan it for images
    Add {
        /// Path to the image folder
        path: PathBuf,
    },
    /// Re-scan every registered folder
    Scan,
}

#[derive(Subcommand)]
enum TagAction {
    /// Attach a tag to an image, creating the tag on first use
    Add { image_id: i64, name: String },
    /// Detach a tag from an image
    Rm { image_id: i64, name: String },
}

#[derive(Subcommand)]
enum GroupsAction {
    /// Create a group (returns the existing group if the name is taken)
    Create { name: String },
    /// Add an image to a group
    Add { name: String, image_id: i64 },
    /// Remove an image from a group
    Rm { name: String, image_id: i64 },
    /// Show a group's members
    Show { name: String },
}

fn default_path(file: &str) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".shoebox")
        .join(file)
        .to_string_lossy()
        .to_string()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut library = Library::open(Path::new(&cli.catalog))?;
    let settings_path = PathBuf::from(&cli.settings);

    match cli.command {
        Commands::Folders { action } => match action {
            None => commands::folders::list(&settings_path)?,
            Some(FoldersAction::Add { path }) => {
                commands::folders::add(&library, &settings_path, path)?
            }
            Some(FoldersAction::Scan) => commands::folders::scan(&library, &settings_path)?,
        },
        Commands::Ls => commands::ls::run(&library)?,
        Commands::Tags => commands::tags::list(&library)?,
        Commands::Tag { action } => match action {
            TagAction::Add { image_id, name } => commands::tags::add(&library, image_id, &name)?,
            TagAction::Rm { image_id, name } => commands::tags::rm(&library, image_id, &name)?,
        },
        Commands::Groups { action } => match action {
            None => commands::groups::list(&library)?,
            Some(GroupsAction::Create { name }) => commands::groups::create(&library, &name)?,
            Some(GroupsAction::Add { name, image_id }) => {
                commands::groups::add(&mut library, &name, image_id)?
            }
            Some(GroupsAction::Rm { name, image_id }) => {
                commands::groups::rm(&library, &name, image_id)?
            }
            Some(GroupsAction::Show { name }) => commands::groups::show(&library, &name)?,
        },
    }

    Ok(())
}
