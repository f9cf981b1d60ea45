pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod history;
pub mod models;
pub mod services;

use clap::Parser;
use cli::{Cli, Commands, cmd_download, cmd_history, cmd_init, cmd_search_photos};
pub use clients::{FetchError, SearchClient};
pub use config::Config;
pub use history::SearchHistory;
pub use models::PhotoRecord;
pub use services::{ImageService, ImageSize};
use tracing_subscriber::EnvFilter;

pub fn init_logging(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    init_logging(&config);
    config.validate()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search { query, json, save }) => {
            let query = query.join(" ");
            cmd_search_photos(&config, &query, json, save.as_deref()).await
        }
        Some(Commands::Download { url, dir }) => cmd_download(&config, &url, &dir).await,
        Some(Commands::History { filter }) => cmd_history(&config, filter.as_deref()).await,
        Some(Commands::Init) => cmd_init(),
        None => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("imagesearcher - search Unsplash photos from the terminal");
    println!();
    println!("Usage: imagesearcher <command> [args]");
    println!();
    println!("Commands:");
    println!("  search <query> [--json] [--save <dir>]");
    println!("                            Search photos and remember the query");
    println!("  download <url> [dir]      Download one image");
    println!("  history [filter]          Show recent searches");
    println!("  init                      Create default config file");
    println!();
    println!("Set UNSPLASH_ACCESS_KEY or unsplash.access_key in config.toml.");
}
