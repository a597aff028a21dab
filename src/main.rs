use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spodcli::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Fill a playlist from a Discogs style/year search
    Sync(SyncOptions),

    /// Add the latest album of each band in a file to a playlist
    Bands(BandsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Target Spotify playlist ID
    #[clap(long)]
    pub playlist: String,

    /// Discogs style to search for, e.g. "Doom Metal"
    #[clap(long)]
    pub style: String,

    /// Release year to search for
    #[clap(long)]
    pub year: String,

    /// Style substrings to exclude, comma separated
    #[clap(long = "exclude-styles", value_delimiter = ',')]
    pub exclude_styles: Vec<String>,

    /// Print per-release skip reasons
    #[clap(long, short)]
    pub verbose: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BandsOptions {
    /// Target Spotify playlist ID
    #[clap(long)]
    pub playlist: String,

    /// File with one band name per line
    #[clap(long)]
    pub file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Sync(opt) => {
            cli::sync(
                opt.playlist,
                opt.style,
                opt.year,
                opt.exclude_styles,
                opt.verbose,
            )
            .await
        }
        Command::Bands(opt) => cli::bands(opt.playlist, opt.file).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
