use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidshelf")]
#[command(author, version, about = "Local video library indexer and server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the configured directories and serve the catalog over HTTP
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory list file (overrides config)
        #[arg(long)]
        dirs: Option<PathBuf>,
    },

    /// Scan the configured directories and print a summary
    Scan {
        /// Directory list file (overrides config)
        #[arg(long)]
        dirs: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename media files to their canonical identifier
    Rename {
        /// Directory containing the files
        #[arg(required = true)]
        path: PathBuf,

        /// Perform the renames (default is a preview)
        #[arg(long)]
        apply: bool,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Only print rename operations and errors
        #[arg(long)]
        terse: bool,
    },

    /// Print the identifier derived from each file name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Validate configuration file and directory list
    Validate,

    /// Display version information
    Version,
}
