//! The numbered text menu.
//!
//! Every mutating choice writes the whole store back to the snapshot before
//! returning to the menu; Exit (and end of input) saves once more.

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use engine::{BulkReader, Store, TransactionUpdate, format_date, snapshot};
use tracing::{info, warn};

use crate::{
    error::{CliError, Result},
    prompt::Prompter,
};

const RULE: &str = "-----------------------------------";

/// Something able to show the table view for a snapshot file.
pub trait TableView {
    fn open(&mut self, data_file: &Path) -> Result<()>;
}

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W, T> {
    prompter: Prompter<R, W>,
    store: Store,
    data_file: PathBuf,
    table: T,
}

impl<R: BufRead, W: Write, T: TableView> Menu<R, W, T> {
    pub fn new(prompter: Prompter<R, W>, store: Store, data_file: PathBuf, table: T) -> Self {
        Self {
            prompter,
            store,
            data_file,
            table,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        self.prompter.output()
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(CliError::InputClosed) => {
                    info!("input closed, leaving the menu");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        self.prompter.say("Exiting program.")?;
        self.save()
    }

    fn step(&mut self) -> Result<Flow> {
        self.prompter.say("")?;
        self.prompter.say("Personal Finance Tracker")?;
        self.prompter.say("1. Add Transaction")?;
        self.prompter.say("2. View Transactions")?;
        self.prompter.say("3. Update Transaction")?;
        self.prompter.say("4. Delete Transaction")?;
        self.prompter.say("5. Display Summary")?;
        self.prompter.say("6. Open Table View")?;
        self.prompter.say("7. Exit")?;

        let choice = self.prompter.ask("Enter your choice: ")?;
        match choice.trim() {
            "1" => self.add()?,
            "2" => self.view()?,
            "3" => self.update()?,
            "4" => self.delete()?,
            "5" => self.summary()?,
            "6" => self.open_table()?,
            "7" => return Ok(Flow::Exit),
            _ => self.prompter.say("Invalid choice. Please try again.")?,
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<()> {
        snapshot::save(&self.store, &self.data_file)?;
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let method = self.prompter.ask_until(
            "How would you like to input your transactions?\n\
             For bulk input, please enter 'B'.\n\
             For inputting transactions one by one, please enter 'I'.\n\
             Your choice: ",
            "Invalid input method!",
            |raw| match raw.trim().to_uppercase().as_str() {
                "B" => Ok(true),
                "I" => Ok(false),
                _ => Err(()),
            },
        )?;

        if method {
            self.add_bulk()
        } else {
            self.add_single()
        }
    }

    fn add_single(&mut self) -> Result<()> {
        let category = self
            .prompter
            .ask_non_empty("Enter category: ", "Category cannot be empty.")?;
        let amount = self.prompter.ask_amount("Enter amount: ")?;
        let date = self.prompter.ask_date("Enter date (YYYY-MM-DD): ")?;

        self.store.add(category, amount, date);
        self.save()?;
        self.prompter.say("Transaction added successfully.")
    }

    fn add_bulk(&mut self) -> Result<()> {
        let filename = self
            .prompter
            .ask("Enter the file name (one category,amount,date per line): ")?;
        let filename = filename.trim();

        let reader = match BulkReader::open(filename) {
            Ok(reader) => reader,
            Err(err) if err.is_not_found() => {
                return self.prompter.say(format!("File '{filename}' not found."));
            }
            Err(err) => return self.prompter.say(err),
        };

        let before = self.store.len();
        match self.store.add_bulk(reader) {
            Ok(applied) => {
                self.save()?;
                info!(applied, file = filename, "bulk import done");
                self.prompter
                    .say(format!("{applied} bulk transactions added successfully."))
            }
            Err(err) => {
                let applied = self.store.len() - before;
                if applied > 0 {
                    self.save()?;
                }
                warn!(applied, file = filename, "bulk import stopped: {err}");
                self.prompter.say(format!(
                    "Invalid data format at {err}. \
                     Category, amount and date must be separated by commas."
                ))?;
                self.prompter.say(format!(
                    "{applied} transactions before that line were added; the rest were skipped."
                ))
            }
        }
    }

    fn view(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return self.prompter.say("No transactions found to display.");
        }

        self.prompter.say("Transaction History")?;
        for (i, category) in self.store.categories().iter().enumerate() {
            self.prompter.say(RULE)?;
            self.prompter
                .say(format!("{}. Category: {}", i + 1, category.name()))?;
            for (j, tx) in category.transactions().iter().enumerate() {
                self.prompter.say(format!("{}.", j + 1))?;
                self.prompter
                    .say(format!("Amount   :  {}", tx.amount.compact()))?;
                self.prompter
                    .say(format!("Date     :  {}", format_date(tx.date)))?;
            }
        }
        Ok(())
    }

    /// Asks for a 1-based category ID and returns its index.
    fn pick_category(&mut self, prompt: &str) -> Result<Option<usize>> {
        let id = self.prompter.ask_id(prompt)?;
        let index = to_index(id, self.store.categories().len());
        if index.is_none() {
            self.prompter.say("Category ID not found.")?;
        }
        Ok(index)
    }

    /// Asks for a 1-based transaction ID inside `category_index`.
    fn pick_transaction(&mut self, category_index: usize, action: &str) -> Result<Option<usize>> {
        let Some(category) = self.store.categories().get(category_index) else {
            return Ok(None);
        };
        let name = category.name().to_string();
        let len = category.transactions().len();

        let id = self
            .prompter
            .ask_id(&format!("Enter the transaction ID in '{name}' to {action}: "))?;
        let index = to_index(id, len);
        if index.is_none() {
            self.prompter.say("Transaction ID not found.")?;
        }
        Ok(index)
    }

    fn update(&mut self) -> Result<()> {
        self.view()?;
        if self.store.is_empty() {
            return self.prompter.say("No transactions yet.");
        }

        let Some(category_index) = self.pick_category("\nEnter the category ID to update: ")?
        else {
            return Ok(());
        };
        let Some(transaction_index) = self.pick_transaction(category_index, "update")? else {
            return Ok(());
        };

        let field = self
            .prompter
            .ask("Select to change (category/amount/date): ")?;
        let change = match field.trim().to_lowercase().as_str() {
            "category" => TransactionUpdate::Category(
                self.prompter
                    .ask_non_empty("Enter the new category: ", "Category cannot be empty.")?,
            ),
            "amount" => TransactionUpdate::Amount(self.prompter.ask_amount("Enter the new amount: ")?),
            "date" => TransactionUpdate::Date(
                self.prompter
                    .ask_date("Enter the new transaction date (YYYY-MM-DD): ")?,
            ),
            _ => {
                return self
                    .prompter
                    .say("Invalid field. Choose category, amount or date.");
            }
        };

        self.store
            .update(category_index, transaction_index, change)?;
        self.save()?;
        self.prompter.say("Transaction successfully updated!")
    }

    fn delete(&mut self) -> Result<()> {
        self.view()?;
        if self.store.is_empty() {
            return self.prompter.say("No transactions yet.");
        }

        let Some(category_index) = self.pick_category("Enter the category ID to delete: ")? else {
            return Ok(());
        };
        let Some(transaction_index) = self.pick_transaction(category_index, "delete")? else {
            return Ok(());
        };

        self.store.delete(category_index, transaction_index)?;
        self.save()?;
        self.prompter.say("Transaction deleted successfully.")
    }

    fn summary(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return self.prompter.say("No transactions found.");
        }

        let summary = match self.store.summarize() {
            Ok(summary) => summary,
            Err(err) => {
                warn!("summary failed: {err}");
                return self.prompter.say(format!("Unable to display the summary: {err}"));
            }
        };
        self.prompter.say("\nCategory - Total Expenses")?;
        self.prompter.say(RULE)?;
        for category in &summary.categories {
            self.prompter
                .say(format!("{} - {}", category.name, category.total))?;
        }
        self.prompter.say(RULE)?;
        self.prompter
            .say(format!("Total Expenses - {}", summary.total))
    }

    fn open_table(&mut self) -> Result<()> {
        self.prompter.say("Opening table view...")?;
        if let Err(err) = self.table.open(&self.data_file) {
            warn!("table view failed: {err}");
            return self
                .prompter
                .say(format!("Unable to open the table view: {err}"));
        }
        self.prompter.say("Table view closed.")
    }
}

/// Converts a typed 1-based ID into an index below `len`.
fn to_index(id: i64, len: usize) -> Option<usize> {
    let index = usize::try_from(id).ok()?.checked_sub(1)?;
    (index < len).then_some(index)
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use engine::{MoneyCents, parse_date};
    use tempfile::TempDir;

    use super::*;

    #[derive(Default)]
    struct RecordingTable {
        opened: Vec<PathBuf>,
    }

    impl TableView for RecordingTable {
        fn open(&mut self, data_file: &Path) -> Result<()> {
            self.opened.push(data_file.to_path_buf());
            Ok(())
        }
    }

    type TestMenu = Menu<Cursor<Vec<u8>>, Vec<u8>, RecordingTable>;

    fn menu(dir: &TempDir, store: Store, input: &str) -> TestMenu {
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Menu::new(
            prompter,
            store,
            dir.path().join("transactions.json"),
            RecordingTable::default(),
        )
    }

    fn printed(menu: &TestMenu) -> String {
        String::from_utf8_lossy(menu.output()).into_owned()
    }

    fn sample() -> Store {
        let mut store = Store::new();
        store.add("Food", MoneyCents::new(1250), parse_date("2024-01-02").unwrap());
        store.add("Rent", MoneyCents::new(90000), parse_date("2024-01-01").unwrap());
        store.add("Food", MoneyCents::new(800), parse_date("2024-01-05").unwrap());
        store
    }

    #[test]
    fn to_index_is_one_based() {
        assert_eq!(to_index(1, 2), Some(0));
        assert_eq!(to_index(2, 2), Some(1));
        assert_eq!(to_index(3, 2), None);
        assert_eq!(to_index(0, 2), None);
        assert_eq!(to_index(-1, 2), None);
    }

    #[test]
    fn add_single_reprompts_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(
            &dir,
            Store::new(),
            "1\nx\ni\n\nFood\nabc\n12.345\n2024-13-01\n2024-01-05\n7\n",
        );
        menu.run().unwrap();

        let out = printed(&menu);
        assert!(out.contains("Invalid input method!"));
        assert!(out.contains("Category cannot be empty."));
        assert!(out.contains("Please enter a valid amount!"));
        assert!(out.contains("Invalid date format"));
        assert!(out.contains("Transaction added successfully."));

        let saved = snapshot::load(dir.path().join("transactions.json")).unwrap();
        let food = saved.category("Food").unwrap();
        assert_eq!(food.transactions()[0].amount, MoneyCents::new(1235));
        assert_eq!(&saved, menu.store());
    }

    #[test]
    fn bulk_import_keeps_lines_before_error() {
        let dir = tempfile::tempdir().unwrap();
        let bulk = dir.path().join("bulk.txt");
        fs::write(&bulk, "Food,10,2024-01-01\nRent,900\nFun,5,2024-01-03\n").unwrap();

        let input = format!("1\nB\n{}\n", bulk.display());
        let mut menu = menu(&dir, Store::new(), &input);
        menu.run().unwrap();

        let out = printed(&menu);
        assert!(out.contains("line 2"), "{out}");
        assert!(out.contains("1 transactions before that line were added"));
        assert_eq!(menu.store().len(), 1);
        assert!(menu.store().category("Fun").is_none());

        let saved = snapshot::load(dir.path().join("transactions.json")).unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn bulk_import_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, sample(), "1\nb\nnope.txt\n7\n");
        menu.run().unwrap();
        assert!(printed(&menu).contains("File 'nope.txt' not found."));
        assert_eq!(menu.store().len(), 3);
    }

    #[test]
    fn view_numbers_categories_and_transactions() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, sample(), "2\n7\n");
        menu.run().unwrap();
        let out = printed(&menu);
        assert!(out.contains("1. Category: Food"));
        assert!(out.contains("2. Category: Rent"));
        assert!(out.contains("Amount   :  12.5"));
        assert!(out.contains("Date     :  2024-01-05"));
    }

    #[test]
    fn view_on_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, Store::new(), "2\n5\n7\n");
        menu.run().unwrap();
        let out = printed(&menu);
        assert!(out.contains("No transactions found to display."));
        assert!(out.contains("No transactions found."));
    }

    #[test]
    fn update_category_renames_and_merges() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, sample(), "3\n1\n2\nCategory\nRent\n7\n");
        menu.run().unwrap();

        assert!(printed(&menu).contains("Transaction successfully updated!"));
        let store = menu.store();
        assert!(store.category("Food").is_none());
        assert_eq!(store.category("Rent").unwrap().transactions().len(), 3);
    }

    #[test]
    fn update_amount_and_bad_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(
            &dir,
            sample(),
            "3\n9\n3\nabc\n1\n5\n3\n2\n1\namount\n1000\n3\n1\n1\ncolour\n7\n",
        );
        menu.run().unwrap();

        let out = printed(&menu);
        assert!(out.contains("Category ID not found."));
        assert!(out.contains("Please enter a valid integer!"));
        assert!(out.contains("Transaction ID not found."));
        assert!(out.contains("Invalid field."));
        let rent = menu.store().category("Rent").unwrap();
        assert_eq!(rent.transactions()[0].amount, MoneyCents::new(100000));
        assert_eq!(
            menu.store().category("Food").unwrap().total().unwrap(),
            MoneyCents::new(2050)
        );
    }

    #[test]
    fn delete_last_keeps_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, sample(), "4\n2\n1\n7\n");
        menu.run().unwrap();

        assert!(printed(&menu).contains("Transaction deleted successfully."));
        let saved = snapshot::load(dir.path().join("transactions.json")).unwrap();
        assert!(saved.category("Rent").unwrap().transactions().is_empty());
        assert_eq!(saved.len(), 2);
    }

    #[test]
    fn summary_prints_totals() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, sample(), "5\n7\n");
        menu.run().unwrap();
        let out = printed(&menu);
        assert!(out.contains("Food - 20.50"));
        assert!(out.contains("Rent - 900.00"));
        assert!(out.contains("Total Expenses - 920.50"));
    }

    #[test]
    fn summary_reports_overflowing_total() {
        let dir = tempfile::tempdir().unwrap();
        let huge: MoneyCents = "50000000000000000".parse().unwrap();
        let mut store = Store::new();
        store.add("Food", huge, parse_date("2024-01-01").unwrap());
        store.add("Food", huge, parse_date("2024-01-02").unwrap());

        let mut menu = menu(&dir, store, "5\n7\n");
        menu.run().unwrap();
        let out = printed(&menu);
        assert!(out.contains("Unable to display the summary: total is too large"));
        assert!(out.contains("Exiting program."));
    }

    #[test]
    fn table_view_gets_the_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, sample(), "6\n8\n7\n");
        menu.run().unwrap();
        assert_eq!(
            menu.table.opened,
            vec![dir.path().join("transactions.json")]
        );
        let out = printed(&menu);
        assert!(out.contains("Table view closed."));
        assert!(out.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn end_of_input_saves_and_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut menu = menu(&dir, sample(), "1\nI\nFood\n");
        menu.run().unwrap();

        assert!(printed(&menu).contains("Exiting program."));
        let saved = snapshot::load(dir.path().join("transactions.json")).unwrap();
        assert_eq!(saved, sample());
    }
}
