//! CLI command handlers
//!
//! This module contains the one-shot commands, bridging the clap argument
//! parsing with the ledger, and the interactive menu session.

pub mod commands;
pub mod menu;
pub mod prompts;
pub mod session;

pub use commands::{handle_command, load_ledger, WalletCommands};
pub use menu::MenuOption;
pub use prompts::Prompter;
pub use session::Session;
