//! Main menu options
//!
//! The full menu is shown while a wallet is open. Without an open wallet only
//! the load/new actions are offered, numbered from one.

/// Actions offered by the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    ShowBalance,
    AddEntry,
    EditEntry,
    FindEntries,
    ShowAllEntries,
    Save,
    SaveAs,
    LoadDefault,
    LoadSelected,
    New,
    Quit,
}

impl MenuOption {
    /// Options of the full menu in display order
    const FULL: [(MenuOption, &'static str); 10] = [
        (MenuOption::ShowBalance, "Show balance"),
        (MenuOption::AddEntry, "Add entry"),
        (MenuOption::EditEntry, "Edit entry"),
        (MenuOption::FindEntries, "Find entries"),
        (MenuOption::ShowAllEntries, "Show all entries"),
        (MenuOption::Save, "Save wallet"),
        (MenuOption::SaveAs, "Save wallet as..."),
        (MenuOption::LoadDefault, "Load wallet"),
        (MenuOption::LoadSelected, "Load wallet from file"),
        (MenuOption::New, "New wallet"),
    ];

    /// Options available without an open wallet
    const TRUNCATED: [(MenuOption, &'static str); 3] = [
        (MenuOption::LoadDefault, "Load wallet"),
        (MenuOption::LoadSelected, "Load wallet from file"),
        (MenuOption::New, "New wallet"),
    ];

    fn options(truncated: bool) -> &'static [(MenuOption, &'static str)] {
        if truncated {
            &Self::TRUNCATED
        } else {
            &Self::FULL
        }
    }

    /// Map a typed choice to an option
    pub fn from_choice(choice: &str, truncated: bool) -> Option<Self> {
        let choice = choice.trim().to_lowercase();
        if choice == "q" {
            return Some(Self::Quit);
        }

        let number: usize = choice.parse().ok()?;
        Self::options(truncated)
            .get(number.checked_sub(1)?)
            .map(|(option, _)| *option)
    }

    /// Render the menu text
    pub fn render(truncated: bool) -> String {
        let mut output = String::from("Choose an action:\n");
        for (i, (option, label)) in Self::options(truncated).iter().enumerate() {
            // Blank line before the listing and file action groups
            if !truncated && matches!(option, Self::ShowAllEntries | Self::Save) {
                output.push('\n');
            }
            output.push_str(&format!("{}) {}\n", i + 1, label));
        }
        output.push_str("\nq - Quit\n");
        output
    }
}
