mod cli;

use vidshelf::{
    catalog::CatalogStore,
    config::{self, Config},
    rename::{ConsoleReporter, RenameOptions, Renamer},
    scanner::{self, FileLister, ScanSummary, WalkDirLister},
    server,
};
use vidshelf_common::normalize;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const RULE: &str = "--------------------------------------------------";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidshelf=trace,vidshelf_common=debug,tower_http=debug".to_string()
        } else {
            "vidshelf=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { host, port, dirs } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve(cli.config.as_deref(), host, port, dirs))
        }
        Commands::Scan { dirs, json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(scan(cli.config.as_deref(), dirs, json))
        }
        Commands::Rename {
            path,
            apply,
            recursive,
            terse,
        } => {
            rename(
                &path,
                RenameOptions {
                    dry_run: !apply,
                    recursive,
                },
                terse,
            );
            Ok(())
        }
        Commands::Normalize { names } => {
            for name in names {
                match normalize(&name) {
                    Some(id) => println!("{name} -> {id}"),
                    None => println!("{name} -> no match"),
                }
            }
            Ok(())
        }
        Commands::Validate => validate(cli.config.as_deref()),
        Commands::Version => {
            println!("vidshelf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load config and work out the directory relative paths are resolved against.
fn load(config_path: Option<&Path>, dirs: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let mut config = config::load_config_or_default(config_path)?;

    // A path given on the command line is relative to the working directory
    if let Some(dirs) = dirs {
        config.library.dirs_file = std::env::current_dir()
            .context("Failed to determine current directory")?
            .join(dirs);
        config.library.directories.clear();
    }

    let base = match config_path.and_then(|p| p.parent()) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().context("Failed to determine current directory")?,
    };

    Ok((config, base))
}

async fn scan_library(config: &Config, base: &Path) -> Result<(Arc<CatalogStore>, ScanSummary)> {
    let roots = config::resolve_roots(&config.library, base)?;
    for root in &roots {
        if !root.is_dir() {
            tracing::warn!("Directory not found: {}", root.display());
        }
    }

    let store = Arc::new(CatalogStore::new());
    let lister: Arc<dyn FileLister> =
        Arc::new(WalkDirLister::new().follow_links(config.library.follow_links));

    let summary = scanner::build_catalog(store.clone(), lister, roots).await;
    Ok((store, summary))
}

async fn serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    dirs: Option<PathBuf>,
) -> Result<()> {
    let (mut config, base) = load(config_path, dirs)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting video directory scan...");
    let (store, summary) = scan_library(&config, &base).await?;
    print_summary(&store, &summary);

    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    server::start_server(config, store).await
}

async fn scan(config_path: Option<&Path>, dirs: Option<PathBuf>, json: bool) -> Result<()> {
    let (config, base) = load(config_path, dirs)?;
    let (store, summary) = scan_library(&config, &base).await?;

    if json {
        let report = serde_json::json!({
            "roots": summary.roots,
            "failed_workers": summary.failed_workers,
            "stats": store.stats(),
            "unmatched": store.unmatched_sorted(),
            "duplicates": store.duplicates(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&store, &summary);
    }

    Ok(())
}

fn print_summary(store: &CatalogStore, summary: &ScanSummary) {
    let stats = store.stats();

    println!("\nScan Summary:");
    println!("{RULE}");
    println!("Directories scanned: {}", summary.roots.len());
    println!("Total videos found: {}", stats.videos);
    println!("Total posters found: {}", stats.posters);
    println!("Complete pairs (video + poster): {}", stats.complete);

    if !stats.videos_without_posters.is_empty() {
        println!("\nVideos without posters:");
        for id in &stats.videos_without_posters {
            println!("- {id}");
        }
    }

    if !stats.posters_without_videos.is_empty() {
        println!("\nPosters without videos:");
        for id in &stats.posters_without_videos {
            println!("- {id}");
        }
    }

    let duplicates = store.duplicates();
    if !duplicates.is_empty() {
        println!("\nDuplicate files (kept | discarded):");
        for dup in &duplicates {
            println!(
                "- {} [{}]: {} | {}",
                dup.id,
                dup.kind,
                dup.kept.display(),
                dup.discarded.display()
            );
        }
    }

    let unmatched = store.unmatched_sorted();
    if !unmatched.is_empty() {
        println!("\nUnmatched files:");
        for path in &unmatched {
            println!("- {}", path.display());
        }
    }

    let walk_errors = summary.walk_errors();
    if walk_errors > 0 || summary.failed_workers > 0 {
        println!(
            "\nWalk errors: {walk_errors}, failed workers: {}",
            summary.failed_workers
        );
    }
    println!("{RULE}");
}

fn rename(path: &Path, options: RenameOptions, terse: bool) {
    if !terse {
        let mode = if options.dry_run {
            "PREVIEW mode (no files will be changed)"
        } else {
            "RENAME mode"
        };
        println!("\nRunning in {mode}");
        println!("Processing directory: {}", path.display());
        if options.recursive {
            println!("Recursive mode: enabled");
        }
        println!("{RULE}");
    }

    let mut renamer = Renamer::new(options, ConsoleReporter::new(terse));
    if let Err(e) = renamer.run(path) {
        println!("\nError during execution: {e}");
    }

    if terse {
        return;
    }

    let stats = renamer.stats();
    println!("{RULE}");
    println!("Summary:");
    println!("Total files processed: {}", stats.total);
    if options.dry_run {
        println!("Files to be renamed: {}", stats.renamed);
    } else {
        println!("Files renamed: {}", stats.renamed);
    }
    println!("Files skipped: {}", stats.skipped);
    println!("Errors encountered: {}", stats.errors);
    println!("{RULE}");
}

fn validate(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(p) => println!("Validating config: {:?}", p),
        None => println!("No config file specified, searching default locations"),
    }

    let (config, base) = load(config_path, None)?;
    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    if let Some(dir) = &config.server.static_dir {
        println!("  Static dir: {}", dir.display());
    }
    println!("  Follow links: {}", config.library.follow_links);

    let roots = config::resolve_roots(&config.library, &base)?;
    println!("  Directories: {}", roots.len());
    for root in &roots {
        let marker = if root.is_dir() { "✓" } else { "✗" };
        println!("    {marker} {}", root.display());
    }

    Ok(())
}
