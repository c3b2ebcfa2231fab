//! Interactive session
//!
//! Owns the open ledger and the path it was loaded from or saved to, and runs
//! the main menu loop. Loading or creating a wallet swaps the whole ledger;
//! a failed load leaves the open ledger untouched.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::menu::MenuOption;
use super::prompts::Prompter;
use crate::config::Settings;
use crate::display::format_balance_summary;
use crate::error::WalletResult;
use crate::models::Ledger;
use crate::storage::JsonStore;

/// State of one interactive session
pub struct Session<R, W> {
    ledger: Option<Ledger>,
    wallet_path: Option<PathBuf>,
    store: JsonStore,
    settings: Settings,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session with no open wallet
    pub fn new(store: JsonStore, settings: Settings, prompter: Prompter<R, W>) -> Self {
        Self {
            ledger: None,
            wallet_path: None,
            store,
            settings,
            prompter,
        }
    }

    /// The open ledger, if any
    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }

    /// Path the open ledger was last loaded from or saved to
    pub fn wallet_path(&self) -> Option<&Path> {
        self.wallet_path.as_deref()
    }

    /// Consume the session, returning the output sink
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run the menu loop until the user quits or input ends
    pub fn run(&mut self) -> WalletResult<()> {
        loop {
            let choice = self.prompter.menu_choice(self.ledger.is_none())?;
            if choice == MenuOption::Quit {
                return Ok(());
            }
            self.dispatch(choice)?;
        }
    }

    /// Perform one menu action
    pub fn dispatch(&mut self, choice: MenuOption) -> WalletResult<()> {
        match choice {
            MenuOption::ShowBalance => self.show_balance(),
            MenuOption::AddEntry => self.add_entry(),
            MenuOption::EditEntry => self.edit_entry(),
            MenuOption::FindEntries => self.find_entries(),
            MenuOption::ShowAllEntries => self.show_all_entries(),
            MenuOption::Save => self.save_current(),
            MenuOption::SaveAs => self.save_as(),
            MenuOption::LoadDefault => self.load(None),
            MenuOption::LoadSelected => self.load_selected(),
            MenuOption::New => self.create_new(),
            MenuOption::Quit => Ok(()),
        }
    }

    fn show_balance(&mut self) -> WalletResult<()> {
        let Some(ledger) = &self.ledger else {
            return Ok(());
        };
        let summary = format_balance_summary(ledger, &self.settings);
        self.prompter.message(&summary)
    }

    fn add_entry(&mut self) -> WalletResult<()> {
        let Some(ledger) = &mut self.ledger else {
            return Ok(());
        };
        let Some(entry) = self.prompter.new_entry()? else {
            return Ok(());
        };

        match ledger.add(entry) {
            Ok(_) => self.prompter.message("New entry added."),
            Err(e) => self.prompter.message(&format!("Entry not added: {}", e)),
        }
    }

    fn edit_entry(&mut self) -> WalletResult<()> {
        let Some(ledger) = &mut self.ledger else {
            return Ok(());
        };
        if ledger.is_empty() {
            return self.prompter.message("No entries to edit.");
        }

        let Some(number) = self.prompter.entry_number()? else {
            return Ok(());
        };
        let key = number - 1;

        let current = match ledger.entry(key) {
            Ok(entry) => entry,
            Err(e) if e.is_not_found() => return self.prompter.message("Entry not found."),
            Err(e) => return Err(e),
        };
        let updated = self.prompter.edited_entry(current)?;

        match ledger.replace(key, updated) {
            Ok(_) => self.prompter.message(&format!("Entry {} updated.", number)),
            Err(e) if e.is_not_found() => self.prompter.message("Entry not found."),
            Err(e) => self.prompter.message(&format!("Entry not updated: {}", e)),
        }
    }

    fn find_entries(&mut self) -> WalletResult<()> {
        let Some(ledger) = &self.ledger else {
            return Ok(());
        };
        if ledger.is_empty() {
            return self.prompter.message("No entries to search.");
        }

        let Some((field, value)) = self.prompter.search_query()? else {
            return Ok(());
        };

        let found = ledger.find(field, value);
        if found.is_empty() {
            return self.prompter.message("No matching entries found.");
        }
        self.prompter.show_entries(&found, &self.settings)
    }

    fn show_all_entries(&mut self) -> WalletResult<()> {
        let Some(ledger) = &self.ledger else {
            return Ok(());
        };
        if ledger.is_empty() {
            return self.prompter.message("No entries to display.");
        }

        let entries = ledger.get_range(0, ledger.len(), 1)?;
        self.prompter.show_entries(&entries, &self.settings)
    }

    fn save_current(&mut self) -> WalletResult<()> {
        let path = self.wallet_path.clone();
        self.save(path.as_deref())
    }

    fn save_as(&mut self) -> WalletResult<()> {
        if self.ledger.is_none() {
            return Ok(());
        }
        let Some(path) = self.prompter.file_path(false)? else {
            return Ok(());
        };
        self.save(Some(Path::new(&path)))
    }

    fn save(&mut self, path: Option<&Path>) -> WalletResult<()> {
        let Some(ledger) = &self.ledger else {
            return Ok(());
        };

        let target = self.store.resolve(path);
        if self.store.save(&ledger.to_json(), Some(&target)) {
            let message = format!("Wallet saved to {}", target.display());
            self.wallet_path = Some(target);
            self.prompter.message(&message)
        } else {
            self.prompter
                .message(&format!("Could not save wallet to {}", target.display()))
        }
    }

    fn load_selected(&mut self) -> WalletResult<()> {
        let Some(path) = self.prompter.file_path(true)? else {
            return Ok(());
        };
        self.load(Some(Path::new(&path)))
    }

    fn load(&mut self, path: Option<&Path>) -> WalletResult<()> {
        let target = self.store.resolve(path);

        let Some(doc) = self.store.load(Some(&target)) else {
            return self
                .prompter
                .message("Could not load wallet: the file could not be read.");
        };

        match Ledger::from_json(&doc) {
            Ok(ledger) => {
                info!(path = %target.display(), entries = ledger.len(), "Opened wallet");
                self.ledger = Some(ledger);
                self.wallet_path = Some(target);
                self.prompter.message("Wallet loaded.")
            }
            Err(e) => {
                info!(path = %target.display(), error = %e, "Rejected wallet document");
                self.prompter
                    .message("Could not load wallet: the file contains invalid data.")
            }
        }
    }

    fn create_new(&mut self) -> WalletResult<()> {
        info!("Created new wallet");
        self.ledger = Some(Ledger::new());
        self.wallet_path = None;
        self.prompter.message("New wallet created.")
    }
}
