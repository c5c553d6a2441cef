use std::{path::Path, time::Duration};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{EngineError, Entry, SearchOutcome, SortColumn, SortDirection, SortState, Store};
use tracing::{debug, info};

use crate::{
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

const PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
    /// Yes/no question; the answer triggers a refresh.
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn new(kind: DialogKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub data_file: String,
    pub store: Store,
    /// Rows currently on screen: the flattened store, a sort of it, or search results.
    pub rows: Vec<Entry>,
    pub selected: usize,
    pub query: String,
    pub focus: Focus,
    pub sort: SortState,
    pub sorted_by: Option<(SortColumn, SortDirection)>,
    pub filtered: bool,
    pub dialog: Option<Dialog>,
}

impl AppState {
    fn select_next(&mut self, step: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_add(step).min(self.rows.len() - 1);
    }

    fn select_prev(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    fn show_rows(&mut self, rows: Vec<Entry>) {
        self.rows = rows;
        self.selected = 0;
    }
}

pub struct App {
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(store: Store, data_file: &Path) -> Self {
        let rows = store.flatten().collect();
        let state = AppState {
            data_file: data_file.display().to_string(),
            store,
            rows,
            selected: 0,
            query: String::new(),
            focus: Focus::Table,
            sort: SortState::new(),
            sorted_by: None,
            filtered: false,
            dialog: None,
        };

        Self {
            state,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let mut guard = ui::TerminalGuard::enter()?;
        self.event_loop(&mut guard)
    }

    fn event_loop(&mut self, guard: &mut ui::TerminalGuard) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            guard
                .terminal()
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.dialog.is_some() {
            self.handle_dialog(action);
            return;
        }

        match self.state.focus {
            Focus::Table => self.handle_table(action),
            Focus::Search => self.handle_search(action),
        }
    }

    fn handle_dialog(&mut self, action: AppAction) {
        let Some(dialog) = &self.state.dialog else {
            return;
        };
        match dialog.kind {
            DialogKind::Info | DialogKind::Error => {
                if matches!(
                    action,
                    AppAction::Submit | AppAction::Cancel | AppAction::Input(' ')
                ) {
                    self.state.dialog = None;
                }
            }
            DialogKind::Confirm => match action {
                AppAction::Submit | AppAction::Input('y' | 'Y') => {
                    self.state.dialog = None;
                    self.refresh();
                }
                AppAction::Cancel | AppAction::Input('n' | 'N') => {
                    self.state.dialog = None;
                }
                _ => {}
            },
        }
    }

    fn handle_table(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.select_prev(1),
            AppAction::Down | AppAction::Input('j') => self.state.select_next(1),
            AppAction::PageUp => self.state.select_prev(PAGE),
            AppAction::PageDown => self.state.select_next(PAGE),
            AppAction::First | AppAction::Input('g') => self.state.selected = 0,
            AppAction::Last | AppAction::Input('G') => self.state.select_last(),
            AppAction::NextField | AppAction::Input('/') => self.state.focus = Focus::Search,
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('1' | 'c') => self.sort_by(SortColumn::Category),
            AppAction::Input('2' | 'd') => self.sort_by(SortColumn::Date),
            AppAction::Input('3' | 'a') => self.sort_by(SortColumn::Amount),
            AppAction::Input('r') => self.request_refresh(),
            _ => {}
        }
    }

    fn handle_search(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.query.push(ch),
            AppAction::Backspace => {
                self.state.query.pop();
            }
            AppAction::Submit => self.search(),
            AppAction::Cancel | AppAction::NextField => self.state.focus = Focus::Table,
            AppAction::Up => self.state.select_prev(1),
            AppAction::Down => self.state.select_next(1),
            AppAction::PageUp => self.state.select_prev(PAGE),
            AppAction::PageDown => self.state.select_next(PAGE),
            _ => {}
        }
    }

    /// Activates a column header: sorts the whole store and flips the
    /// direction that column will use next time.
    pub fn sort_by(&mut self, column: SortColumn) {
        let sorted = self.state.sort.sort(&self.state.store, column);
        debug!(column = column.label(), direction = ?sorted.direction, "sorted table");
        self.state.sorted_by = Some((sorted.column, sorted.direction));
        self.state.filtered = false;
        self.state.show_rows(sorted.entries);
    }

    pub fn search(&mut self) {
        match engine::search(&self.state.store, &self.state.query) {
            Ok(SearchOutcome::Matches(entries)) => {
                self.state.filtered = true;
                self.state.sorted_by = None;
                self.state.show_rows(entries);
            }
            Ok(SearchOutcome::NoMatches) => {
                self.state.filtered = true;
                self.state.sorted_by = None;
                self.state.show_rows(Vec::new());
                self.state.dialog = Some(Dialog::new(
                    DialogKind::Info,
                    "No Results",
                    "No transactions found.",
                ));
            }
            Err(EngineError::EmptyQuery) => {
                self.state.dialog = Some(Dialog::new(
                    DialogKind::Error,
                    "Empty",
                    "Search term cannot be empty.",
                ));
            }
            Err(err) => {
                self.state.dialog = Some(Dialog::new(DialogKind::Error, "Error", &err.to_string()));
            }
        }
    }

    pub fn request_refresh(&mut self) {
        self.state.dialog = Some(Dialog::new(
            DialogKind::Confirm,
            "Refresh",
            "Do you want to refresh all transactions?",
        ));
    }

    fn refresh(&mut self) {
        self.state.filtered = false;
        self.state.sorted_by = None;
        let rows = self.state.store.flatten().collect();
        self.state.show_rows(rows);
    }
}

/// Loads the snapshot named by `data_file` and runs the table view until the
/// user quits. The view is read-only: nothing is written back.
pub fn run_file(data_file: &Path) -> Result<()> {
    let store = engine::snapshot::load(data_file)?;
    info!(
        path = %data_file.display(),
        transactions = store.len(),
        "opening table view"
    );
    App::new(store, data_file).run()
}
