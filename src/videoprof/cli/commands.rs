//! # CLI Layer
//!
//! The only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Picks platform paths for the configuration and the cache
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, see `setup.rs`
//! 2. **Context Setup**: logging, configuration, cache, API facade
//! 3. **Dispatch**: `--mi` or scan + analyze + report
//! 4. **Output Formatting**: `render.rs`, one section after another

use super::render::{render_directories, render_files, render_flags, render_summary};
use super::setup::Cli;
use clap::Parser;
use directories::ProjectDirs;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use videoprof::api::VideoprofApi;
use videoprof::commands::ReportSections;
use videoprof::config::VideoprofConfig;
use videoprof::error::{Result, VideoprofError};
use videoprof::store::sqlite::SqliteStore;
use videoprof::tracks::MediaInfoCli;

const APP_NAME: &str = "videoprof";
const LOG_ENV: &str = "VIDEOPROF_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => project_dirs()?.config_dir().join("config.json"),
    };
    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => project_dirs()?.cache_dir().join("cache.db"),
    };

    let config = VideoprofConfig::load_or_init(&config_path)?;
    let attributes = config.make_attributes()?;
    let store = SqliteStore::open(&db_path)?;
    let mut api = VideoprofApi::new(attributes, store, MediaInfoCli::default());

    let mut library = api.scan(&cli.sources, cli.depth)?;

    if cli.mi {
        if let Some(tracks) = api.first_tracks(&library)? {
            println!("{}", serde_json::to_string_pretty(&tracks)?);
        }
        return Ok(());
    }

    let progress = progress_bar(library.videos.len());
    api.analyze(&mut library, |done, _| progress.set_position(done as u64))?;
    progress.finish_and_clear();

    let sections = ReportSections {
        summary: cli.summary,
        files: cli.files,
        directories: cli.directories,
        flags: cli.flags,
    }
    .or_summary();
    let report = api.report(&library, sections);

    print_section(&render_summary(&report.summary));
    print_section(&render_files(&report.files));
    print_section(&render_directories(&report.directories));
    print_section(&render_flags(&report.flags));
    Ok(())
}

fn print_section(text: &str) {
    if !text.is_empty() {
        println!("{}", text);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| VideoprofError::Config("Could not determine a home directory".to_string()))
}

fn progress_bar(total: usize) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("> {percent}% {wide_bar} {pos}/{len}") {
        bar.set_style(style);
    }
    bar
}

