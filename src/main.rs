use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;

use sweepcli::{
    cli, config, error,
    library::DEFAULT_PLAYLIST_PREFIX,
    mail::EXIT_SETUP_FAILED,
    types::PkceToken,
};

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
    /// Path to a .env file to load; pass an empty string to disable
    #[clap(long, global = true, default_value = ".env")]
    env_file: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move messages by UID to the Trash mailbox (MOVE, or COPY + EXPUNGE)
    Trash(TrashOptions),

    /// Authorize with Spotify API
    Auth,

    /// List your Spotify playlists
    Playlists(PlaylistsOptions),

    /// Remove every track but the first of each album from matching playlists
    Prune(PruneOptions),

    /// Make all your playlists public
    Publish(PublishOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TrashOptions {
    /// IMAP host
    #[clap(long, default_value = config::DEFAULT_IMAP_HOST)]
    host: String,

    /// IMAP port (implicit TLS)
    #[clap(long, default_value_t = config::DEFAULT_IMAP_PORT)]
    port: u16,

    /// Account user name (or set EMAIL_USER)
    #[clap(long)]
    user: Option<String>,

    /// Account password (or set EMAIL_PASS)
    #[clap(long)]
    password: Option<String>,

    /// Source mailbox to move from
    #[clap(long, default_value = "INBOX")]
    source: String,

    /// Target mailbox (if omitted, auto-detect Trash)
    #[clap(long)]
    target: Option<String>,

    /// Comma-separated UID list to move
    #[clap(long, required = true)]
    uids: String,

    /// Don't perform changes; just log actions
    #[clap(long)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only show playlists named "<prefix> yyyy-mm"
    #[clap(long)]
    prefix: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PruneOptions {
    /// Name prefix of the playlists to prune
    #[clap(long, default_value = DEFAULT_PLAYLIST_PREFIX)]
    prefix: String,

    /// Only report the duplicates
    #[clap(long)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PublishOptions {
    /// Only report which playlists would change
    #[clap(long)]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_file = (!cli.env_file.is_empty()).then(|| PathBuf::from(&cli.env_file));
    if let Err(e) = config::load_env(env_file.as_deref()).await {
        error!("Cannot load environment. Err: {}", e);
    }

    match cli.command {
        Command::Trash(opt) => {
            let args = cli::TrashArgs {
                host: opt.host,
                port: opt.port,
                user: opt.user,
                password: opt.password,
                source: opt.source,
                target: opt.target,
                uids: opt.uids,
                dry_run: opt.dry_run,
            };
            let code = tokio::task::spawn_blocking(move || cli::trash(args))
                .await
                .unwrap_or(EXIT_SETUP_FAILED);
            std::process::exit(code);
        }
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Playlists(opt) => cli::list_playlists(opt.prefix).await,
        Command::Prune(opt) => cli::prune(&opt.prefix, opt.dry_run).await,
        Command::Publish(opt) => cli::publish(opt.dry_run).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
