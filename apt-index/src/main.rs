//! apt-index CLI
//!
//! Reads a GitHub release listing and prints a `Packages` index to stdout.
//! Diagnostics go to stderr.

use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use apt_index::{
    config::{
        default_user_agent, DEFAULT_DESCRIPTION_LIMIT, DEFAULT_HOMEPAGE, DEFAULT_MAINTAINER,
        DEFAULT_TIMEOUT_SECS,
    },
    run, HttpFetcher, IndexConfig, Result, ShortNamePolicy,
};

#[derive(Parser)]
#[command(name = "apt-index")]
#[command(about = "APT Packages index generator for GitHub release assets", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "APT_INDEX_LOG", default_value = "info")]
    log_level: String,

    /// Release listing JSON file (standard input when omitted or "-")
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Maintainer field for every package
    #[arg(long, env = "APT_INDEX_MAINTAINER", default_value = DEFAULT_MAINTAINER)]
    maintainer: String,

    /// Homepage field for every package
    #[arg(long, env = "APT_INDEX_HOMEPAGE", default_value = DEFAULT_HOMEPAGE)]
    homepage: String,

    /// Index prereleases too (drafts are always skipped)
    #[arg(long, env = "APT_INDEX_INCLUDE_PRERELEASES")]
    include_prereleases: bool,

    /// Handling of .deb names without _version_arch segments
    #[arg(long, env = "APT_INDEX_SHORT_NAMES", value_enum, default_value = "skip")]
    short_names: ShortNamePolicy,

    /// Download timeout per asset (in seconds)
    #[arg(long, env = "APT_INDEX_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// User-Agent header for downloads
    #[arg(long, env = "APT_INDEX_USER_AGENT")]
    user_agent: Option<String>,

    /// Maximum description length before truncation (in characters)
    #[arg(long, default_value_t = DEFAULT_DESCRIPTION_LIMIT)]
    description_limit: usize,
}

impl Cli {
    fn index_config(&self) -> IndexConfig {
        IndexConfig {
            maintainer: self.maintainer.clone(),
            homepage: self.homepage.clone(),
            include_prereleases: self.include_prereleases,
            short_names: self.short_names,
            description_limit: self.description_limit,
            timeout: Duration::from_secs(self.timeout),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
        }
    }
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = cli.index_config();
    let input = read_input(cli.input.as_deref())?;
    let fetcher = HttpFetcher::new(&config)?;

    let mut out = BufWriter::new(io::stdout().lock());
    run(&input, &config, &fetcher, &mut out)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
