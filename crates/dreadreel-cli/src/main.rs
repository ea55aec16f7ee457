use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{browse, config, discover, reviews, search, trailer};
use reel_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "dreadreel")]
#[command(about = "Dreadreel - find horror movies, their reviews and their trailers")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotating file instead of stderr.
    /// Without a path, logs go to the default log directory.
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// Configuration file (defaults to the per-user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List popular movies of the configured genre
    Discover {
        /// Show at most this many movies
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search the catalog by title
    #[command(long_about = "Search the catalog by title. Results are restricted to the configured genre and to movies with a poster, the same as the discovery listing.")]
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show a movie's details with reviews from every source
    #[command(long_about = "Load a movie's details, credits and reviews. Catalog reviews are listed first, followed by aggregate ratings looked up by the movie's exact title. A review source that fails is reported and left out.")]
    Reviews {
        /// Catalog id of the movie
        id: u64,
    },
    /// Find a trailer for a title
    Trailer {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Also print the embeddable player URL
        #[arg(long, action = ArgAction::SetTrue)]
        embed: bool,
    },
    /// Interactive search: type to search, ':<n>' opens a result, ':q' quits
    Browse,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (API keys are masked)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = match cli.log_file {
        Some(Some(path)) => Some(path),
        Some(None) => {
            let paths = PathManager::default();
            paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
            Some(paths.default_log_file())
        }
        None => None,
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref()).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Discover { limit } => {
            let pipeline = commands::build_pipeline(config_path)?;
            discover::run_discover(&pipeline, limit, &output).await
        }
        Commands::Search { query } => {
            let pipeline = commands::build_pipeline(config_path)?;
            search::run_search(&pipeline, &query.join(" "), &output).await
        }
        Commands::Reviews { id } => {
            let pipeline = commands::build_pipeline(config_path)?;
            reviews::run_reviews(&pipeline, id, &output).await
        }
        Commands::Trailer { title, embed } => {
            let pipeline = commands::build_pipeline(config_path)?;
            trailer::run_trailer(&pipeline, &title.join(" "), embed, &output).await
        }
        Commands::Browse => {
            let pipeline = commands::build_pipeline(config_path)?;
            browse::run_browse(&pipeline, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, config_path, &output),
    }
}
