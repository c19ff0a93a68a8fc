//! Interactive session controller.
//!
//! Drives the select → load → report → browse → restart cycle as an explicit
//! state machine. Each iteration loads the chosen city's file fresh; nothing
//! carries over between iterations.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, Dataset, FilterSelection};
use bikeshare_data::analysis::analyze;
use bikeshare_data::filter::apply_filters;
use bikeshare_data::reader::load_city;
use bikeshare_ui::report_view::{render_analysis, render_selection, FAREWELL, GREETING};
use bikeshare_ui::table_view::render_trip_rows;
use tracing::{debug, info};

use crate::browser::RowBrowser;
use crate::prompt::Prompter;

pub const RESTART_QUESTION: &str = "Would you like to restart? Enter yes or no.";
pub const END_OF_ROWS: &str = "There are no more rows to show.";

// ── Dataset sources ───────────────────────────────────────────────────────────

/// Where a session gets a city's trips from.
pub trait DatasetSource {
    fn load(&self, city: City) -> Result<Dataset>;
}

impl<T: DatasetSource + ?Sized> DatasetSource for &T {
    fn load(&self, city: City) -> Result<Dataset> {
        (**self).load(city)
    }
}

/// Reads `<data_dir>/<city file>` on every call.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    data_dir: PathBuf,
}

impl DirectorySource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl DatasetSource for DirectorySource {
    fn load(&self, city: City) -> Result<Dataset> {
        load_city(&self.data_dir, city)
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// Where the session is between two prompts.
#[derive(Debug)]
pub enum SessionState {
    SelectFilters,
    Load(FilterSelection),
    Report(FilterSelection, Dataset),
    RestartPrompt,
    Terminate,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::SelectFilters => "select-filters",
            SessionState::Load(_) => "load",
            SessionState::Report(..) => "report",
            SessionState::RestartPrompt => "restart-prompt",
            SessionState::Terminate => "terminate",
        }
    }
}

/// One interactive run over a prompt stream and a dataset source.
pub struct Session<R, W, S> {
    prompter: Prompter<R, W>,
    source: S,
    page_size: usize,
}

impl<R: BufRead, W: Write, S: DatasetSource> Session<R, W, S> {
    pub fn new(input: R, output: W, source: S, page_size: usize) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            source,
            page_size,
        }
    }

    /// Run until the user declines to restart or input ends. Load errors
    /// end the session and are returned.
    pub fn run(&mut self) -> Result<()> {
        self.prompter.say(&format!("\n{}", GREETING))?;

        let mut state = SessionState::SelectFilters;
        loop {
            if matches!(state, SessionState::Terminate) {
                break;
            }
            let from = state.name();
            state = match self.step(state) {
                Ok(next) => next,
                Err(BikeshareError::InputClosed) => {
                    info!("Input closed in state {}", from);
                    SessionState::Terminate
                }
                Err(err) => return Err(err),
            };
            info!("Session {} -> {}", from, state.name());
        }

        self.prompter.say(FAREWELL)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn step(&mut self, state: SessionState) -> Result<SessionState> {
        match state {
            SessionState::SelectFilters => {
                let selection = self.prompter.ask_selection()?;
                self.prompter.write_raw(&render_selection(&selection))?;
                Ok(SessionState::Load(selection))
            }
            SessionState::Load(selection) => {
                let dataset = self.source.load(selection.city)?;
                debug!("Loaded {} trips for {}", dataset.len(), selection.city);
                Ok(SessionState::Report(selection, dataset))
            }
            SessionState::Report(selection, dataset) => {
                self.report_and_browse(&dataset, selection)?;
                Ok(SessionState::RestartPrompt)
            }
            SessionState::RestartPrompt => {
                if self.prompter.confirm(RESTART_QUESTION)? {
                    Ok(SessionState::SelectFilters)
                } else {
                    Ok(SessionState::Terminate)
                }
            }
            SessionState::Terminate => Ok(SessionState::Terminate),
        }
    }

    /// Print the four reports, then page through raw rows while the user
    /// keeps answering yes.
    fn report_and_browse(&mut self, dataset: &Dataset, selection: FilterSelection) -> Result<()> {
        let table = apply_filters(dataset, selection.month, selection.day);
        let result = analyze(&table, selection);
        self.prompter.write_raw(&render_analysis(&result))?;

        let mut browser = RowBrowser::new(self.page_size);
        let mut question = format!(
            "Would you like to see the first {} rows of data?",
            browser.page_size()
        );
        while self.prompter.confirm(&question)? {
            let rows = browser.next_page(&table);
            if rows.is_empty() {
                self.prompter.say(END_OF_ROWS)?;
                break;
            }
            self.prompter.write_raw(&render_trip_rows(table.schema(), rows))?;
            if browser.exhausted(&table) {
                self.prompter.say(END_OF_ROWS)?;
                break;
            }
            question = format!("{} more rows of data? Yes or no.", browser.page_size());
        }
        Ok(())
    }
}
