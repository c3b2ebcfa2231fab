use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use wallet::cli::{handle_command, Prompter, Session, WalletCommands};
use wallet::config::{Settings, WalletPaths};
use wallet::storage::JsonStore;

#[derive(Parser)]
#[command(
    name = "wallet",
    version,
    about = "Terminal personal finance ledger",
    long_about = "Records dated income and spending entries, keeps running totals \
                  and stores everything in a single JSON file."
)]
struct Cli {
    /// Wallet file to use instead of the configured default
    #[arg(short, long, env = "WALLET_FILE", global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<WalletCommands>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    wallet::init_tracing();

    // Initialize paths and settings
    let paths = WalletPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // The default wallet path is resolved once, here
    let wallet_file = match cli.file {
        Some(file) => file,
        None => settings.resolve_wallet_path()?,
    };
    let store = JsonStore::new(&wallet_file)?;

    match cli.command {
        None | Some(WalletCommands::Shell) => {
            let prompter = Prompter::new(io::stdin().lock(), io::stdout());
            let mut session = Session::new(store, settings, prompter);
            session.run()?;
        }
        Some(cmd) => handle_command(&store, &paths, &settings, cmd)?,
    }

    Ok(())
}
