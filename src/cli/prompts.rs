//! Interactive prompts
//!
//! Reads raw lines from any `BufRead`, validates them into typed values and
//! writes prompts and listings to any `Write`. Invalid input re-asks; an empty
//! answer cancels (or keeps the current value when editing), and so does the
//! end of input.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use super::menu::MenuOption;
use crate::config::Settings;
use crate::display::format_entry_page;
use crate::error::WalletResult;
use crate::models::{parse_iso_date, Entry, EntryCategory, Money, SearchField, SearchValue};

/// Line-oriented prompt driver
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) -> WalletResult<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Show a message followed by a blank line
    pub fn message(&mut self, text: &str) -> WalletResult<()> {
        self.say(&format!("{}\n", text))
    }

    /// Read one line without its terminator; `None` at end of input
    fn read_line(&mut self) -> WalletResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Ask until `parse` accepts the answer
    fn ask<T>(
        &mut self,
        prompt: &str,
        empty_hint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> WalletResult<Option<T>> {
        loop {
            self.say(prompt)?;
            self.say(&format!("(empty input - {})", empty_hint))?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }

            match parse(line) {
                Some(value) => return Ok(Some(value)),
                None => self.say("Invalid input.\n")?,
            }
        }
    }

    /// Ask for a main menu choice; end of input quits
    pub fn menu_choice(&mut self, truncated: bool) -> WalletResult<MenuOption> {
        loop {
            self.say(&MenuOption::render(truncated))?;
            let Some(line) = self.read_line()? else {
                return Ok(MenuOption::Quit);
            };
            match MenuOption::from_choice(&line, truncated) {
                Some(option) => return Ok(option),
                None => self.say("Invalid choice.\n")?,
            }
        }
    }

    pub fn date(&mut self, current: Option<NaiveDate>) -> WalletResult<Option<NaiveDate>> {
        let mut prompt = String::from("Enter date as YYYY-MM-DD");
        if let Some(date) = current {
            prompt.push_str(&format!(" (current: {})", date.format("%Y-%m-%d")));
        }
        self.ask(&prompt, empty_hint(current.is_some()), parse_iso_date)
    }

    pub fn category(
        &mut self,
        current: Option<EntryCategory>,
    ) -> WalletResult<Option<EntryCategory>> {
        let mut prompt = String::from("Choose category:");
        if let Some(category) = current {
            prompt.push_str(&format!(" (current: {})", category));
        }
        for category in EntryCategory::ALL {
            prompt.push_str(&format!("\n{}) {}", category.code(), category));
        }
        self.ask(&prompt, empty_hint(current.is_some()), |s| s.parse().ok())
    }

    /// Ask for a non-negative amount rounded to two decimals
    pub fn amount(&mut self, current: Option<Money>) -> WalletResult<Option<Money>> {
        let mut prompt = String::from("Enter amount:");
        if let Some(amount) = current {
            prompt.push_str(&format!(" (current: {})", amount));
        }
        self.ask(&prompt, empty_hint(current.is_some()), |s| {
            Money::parse(s).ok().filter(|m| !m.is_negative())
        })
    }

    /// Ask for free text; `None` only at end of input
    pub fn description(&mut self) -> WalletResult<Option<String>> {
        self.say("Enter description:")?;
        self.read_line()
    }

    /// Ask whether an empty description should keep the current one
    pub fn keep_description(&mut self) -> WalletResult<bool> {
        loop {
            self.say("1) Clear description\n2) Keep description")?;
            match self.read_line()?.as_deref().map(str::trim) {
                Some("1") => return Ok(false),
                Some("2") | None => return Ok(true),
                Some(_) => continue,
            }
        }
    }

    /// Ask for a positive, one-based entry number
    pub fn entry_number(&mut self) -> WalletResult<Option<usize>> {
        self.ask("Enter entry number:", "cancel", |s| {
            s.parse::<usize>().ok().filter(|n| *n > 0)
        })
    }

    /// Ask for a search field and a value for it
    pub fn search_query(&mut self) -> WalletResult<Option<(SearchField, SearchValue)>> {
        let Some(field) = self.ask(
            "Choose search field:\n1) Category\n2) Date\n3) Amount",
            "cancel",
            |s| s.parse::<u8>().ok().and_then(|c| SearchField::try_from(c).ok()),
        )?
        else {
            return Ok(None);
        };

        let value = match field {
            SearchField::Category => self.category(None)?.map(SearchValue::from),
            SearchField::Date => self.date(None)?.map(SearchValue::from),
            SearchField::Amount => self.amount(None)?.map(SearchValue::from),
        };
        Ok(value.map(|v| (field, v)))
    }

    /// Ask for a file path; an empty answer means the default path
    pub fn file_path(&mut self, loading: bool) -> WalletResult<Option<String>> {
        if loading {
            self.say("Enter path and file name to load.")?;
        } else {
            self.say("Enter path and file name to save.")?;
        }
        self.say("(empty input - use default)")?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Ask for all fields of a new entry
    pub fn new_entry(&mut self) -> WalletResult<Option<Entry>> {
        let Some(date) = self.date(None)? else {
            return Ok(None);
        };
        let Some(category) = self.category(None)? else {
            return Ok(None);
        };
        let Some(amount) = self.amount(None)? else {
            return Ok(None);
        };
        let Some(description) = self.description()? else {
            return Ok(None);
        };

        Ok(Some(Entry::from_money(date, category, amount, description)?))
    }

    /// Ask for replacement values, keeping the current ones on empty answers
    pub fn edited_entry(&mut self, entry: &Entry) -> WalletResult<Entry> {
        let date = self.date(Some(entry.date()))?.unwrap_or(entry.date());
        let category = self
            .category(Some(entry.category()))?
            .unwrap_or(entry.category());
        let amount = self.amount(Some(entry.amount()))?.unwrap_or(entry.amount());

        let description = match self.description()? {
            Some(text) if !text.is_empty() => text,
            Some(_) => {
                if self.keep_description()? {
                    entry.description().to_string()
                } else {
                    String::new()
                }
            }
            None => entry.description().to_string(),
        };

        Entry::from_money(date, category, amount, description)
    }

    /// Show entries a page at a time, asking before each further page
    pub fn show_entries(
        &mut self,
        entries: &[(usize, &Entry)],
        settings: &Settings,
    ) -> WalletResult<()> {
        let page_size = settings.effective_page_size();
        let mut shown = 0;

        for page in entries.chunks(page_size) {
            self.say(format_entry_page(page, settings).trim_end_matches('\n'))?;
            self.say("")?;
            shown += page.len();

            if shown >= entries.len() {
                break;
            }

            self.say(&format!("{} more entries.", entries.len() - shown))?;
            self.say("Continue? (Y/n)")?;
            let answer = self.read_line()?.map(|a| a.trim().to_lowercase());
            if !matches!(answer.as_deref(), Some("" | "y" | "yes")) {
                break;
            }
        }

        Ok(())
    }
}

fn empty_hint(has_current: bool) -> &'static str {
    if has_current {
        "keep current"
    } else {
        "cancel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_reasks_on_invalid_input() {
        let mut p = prompter("31.12.2024\n2024-12-1\n2024-12-31\n");
        assert_eq!(p.date(None).unwrap(), Some(date(2024, 12, 31)));
        assert!(output(p).contains("Invalid input."));
    }

    #[test]
    fn test_empty_input_cancels() {
        let mut p = prompter("\n");
        assert_eq!(p.date(None).unwrap(), None);

        let mut p = prompter("");
        assert_eq!(p.amount(None).unwrap(), None);
    }

    #[test]
    fn test_amount_rejects_negative() {
        let mut p = prompter("-5\n12.346\n");
        assert_eq!(p.amount(None).unwrap(), Some(Money::from_cents(1235)));
    }

    #[test]
    fn test_zero_amount_accepted() {
        let mut p = prompter("0\n");
        assert_eq!(p.amount(None).unwrap(), Some(Money::zero()));
    }

    #[test]
    fn test_category_choice() {
        let mut p = prompter("3\n2\n");
        assert_eq!(p.category(None).unwrap(), Some(EntryCategory::Spend));
    }

    #[test]
    fn test_entry_number_must_be_positive() {
        let mut p = prompter("0\n-1\n3\n");
        assert_eq!(p.entry_number().unwrap(), Some(3));
    }

    #[test]
    fn test_menu_choice_reasks_and_quits_at_eof() {
        let mut p = prompter("42\n2\n");
        assert_eq!(p.menu_choice(false).unwrap(), MenuOption::AddEntry);
        assert_eq!(p.menu_choice(false).unwrap(), MenuOption::Quit);
        assert!(output(p).contains("Invalid choice."));
    }

    #[test]
    fn test_new_entry() {
        let mut p = prompter("2024-02-01\n1\n1500\nSalary\n");
        let entry = p.new_entry().unwrap().unwrap();
        assert_eq!(entry.date(), date(2024, 2, 1));
        assert_eq!(entry.category(), EntryCategory::Income);
        assert_eq!(entry.amount(), Money::from_cents(150_000));
        assert_eq!(entry.description(), "Salary");
    }

    #[test]
    fn test_new_entry_cancelled() {
        let mut p = prompter("2024-02-01\n\n");
        assert!(p.new_entry().unwrap().is_none());
    }

    #[test]
    fn test_edited_entry_keeps_unchanged_fields() {
        let old = Entry::new(date(2024, 1, 1), EntryCategory::Spend, 10.0, "Taxi").unwrap();

        let mut p = prompter("\n\n25\n\n2\n");
        let edited = p.edited_entry(&old).unwrap();
        assert_eq!(edited.date(), old.date());
        assert_eq!(edited.category(), EntryCategory::Spend);
        assert_eq!(edited.amount(), Money::from_cents(2500));
        assert_eq!(edited.description(), "Taxi");
    }

    #[test]
    fn test_edited_entry_clears_description() {
        let old = Entry::new(date(2024, 1, 1), EntryCategory::Spend, 10.0, "Taxi").unwrap();

        let mut p = prompter("2024-01-02\n1\n\n\n1\n");
        let edited = p.edited_entry(&old).unwrap();
        assert_eq!(edited.date(), date(2024, 1, 2));
        assert_eq!(edited.category(), EntryCategory::Income);
        assert_eq!(edited.amount(), old.amount());
        assert_eq!(edited.description(), "");
    }

    #[test]
    fn test_search_query() {
        let mut p = prompter("5\n3\n19.99\n");
        let (field, value) = p.search_query().unwrap().unwrap();
        assert_eq!(field, SearchField::Amount);
        assert_eq!(value, SearchValue::Amount(19.99));
    }

    #[test]
    fn test_file_path() {
        let mut p = prompter("  /tmp/w.json \n\n");
        assert_eq!(p.file_path(true).unwrap(), Some("/tmp/w.json".to_string()));
        assert_eq!(p.file_path(false).unwrap(), Some(String::new()));
        assert_eq!(p.file_path(false).unwrap(), None);
    }

    #[test]
    fn test_show_entries_paginates() {
        let entries: Vec<Entry> = (1..=3)
            .map(|d| Entry::new(date(2024, 1, d), EntryCategory::Spend, 1.0, "x").unwrap())
            .collect();
        let pairs: Vec<(usize, &Entry)> = entries.iter().enumerate().collect();
        let settings = Settings {
            page_size: 2,
            ..Settings::default()
        };

        let mut p = prompter("n\n");
        p.show_entries(&pairs, &settings).unwrap();
        let out = output(p);
        assert!(out.contains("1) Date: 2024-01-01"));
        assert!(out.contains("2) Date: 2024-01-02"));
        assert!(out.contains("1 more entries."));
        assert!(!out.contains("3) Date: 2024-01-03"));

        let mut p = prompter("y\n");
        p.show_entries(&pairs, &settings).unwrap();
        assert!(output(p).contains("3) Date: 2024-01-03"));
    }
}
