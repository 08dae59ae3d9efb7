use clap::Parser;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "0.4.0"
/// Format for dev builds: "0.4.0@abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("VIDEOPROF_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("VIDEOPROF_GIT_DATE");
    const IS_RELEASE: &str = env!("VIDEOPROF_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "videoprof", bin_name = "videoprof", version = get_version())]
#[command(
    about = "Profile a video collection against configurable quality preferences",
    long_about = None
)]
pub struct Cli {
    /// Files or directories to profile
    pub sources: Vec<PathBuf>,

    /// Configuration file, created with the defaults when missing
    #[arg(long, value_name = "PATH", help_heading = "Storage")]
    pub config: Option<PathBuf>,

    /// Metadata cache database
    #[arg(long, value_name = "PATH", help_heading = "Storage")]
    pub db: Option<PathBuf>,

    /// Directory depth used to group files
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub depth: usize,

    /// Show the attribute summary (default when no report is selected)
    #[arg(short, long, help_heading = "Reports")]
    pub summary: bool,

    /// Show badges for every file
    #[arg(short, long, help_heading = "Reports")]
    pub files: bool,

    /// Show flag counts and badges per directory
    #[arg(short, long, help_heading = "Reports")]
    pub directories: bool,

    /// Show every flagged quality
    #[arg(long, help_heading = "Reports")]
    pub flags: bool,

    /// Print the metadata of the first file found and exit
    #[arg(long)]
    pub mi: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["videoprof", "movies"]).unwrap();
        assert_eq!(cli.sources, vec![PathBuf::from("movies")]);
        assert_eq!(cli.depth, 1);
        assert!(!cli.summary && !cli.files && !cli.directories && !cli.flags);
        assert!(cli.config.is_none());
        assert!(cli.db.is_none());
    }

    #[test]
    fn report_flags_and_storage_paths() {
        let cli = Cli::try_parse_from([
            "videoprof",
            "-fd",
            "--flags",
            "--depth",
            "2",
            "--config",
            "c.json",
            "--db",
            "cache.db",
            "a",
            "b",
        ])
        .unwrap();
        assert!(cli.files && cli.directories && cli.flags);
        assert!(!cli.summary);
        assert_eq!(cli.depth, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert_eq!(cli.db, Some(PathBuf::from("cache.db")));
        assert_eq!(cli.sources.len(), 2);
    }

    #[test]
    fn version_starts_with_package_version() {
        assert!(get_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
