//! Command interface over the live grid.
//!
//! The editor owns the single live [`Grid`] and the last year that passed
//! validation. Front ends translate user input into these calls:
//!
//! ```text
//! SetYear(y) | ToggleCell(c, r) | ResetAll() | Export(params) -> Script
//! ```
//!
//! Year changes build the new grid first and then swap it in, so a reader
//! never sees a half-built grid.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::events::Event;
use crate::grid::{format_date, Grid, Year};
use crate::script::{generate, CommitTime, ExportRequest, Script};

/// User-supplied export fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportParams {
    pub commit_time: CommitTime,
    pub author_email: String,
    pub repository_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    grid: Grid,
    last_valid_year: Year,
}

impl Editor {
    /// Start editing an empty grid for `year`.
    pub fn new(year: Year) -> Self {
        Self::from_grid(Grid::build(year))
    }

    /// Resume editing a previously saved grid.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            last_valid_year: grid.year(),
            grid,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn year(&self) -> Year {
        self.last_valid_year
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch to `year`, discarding every edit.
    ///
    /// An out-of-range year rebuilds the grid for the last valid year.
    pub fn set_year(&mut self, year: i32) -> Event {
        match Year::new(year) {
            Ok(year) => self.replace(year),
            Err(_) => self.reject_year(year.to_string()),
        }
    }

    /// Like [`Editor::set_year`] for raw text input; non-numeric text is
    /// handled like an out-of-range year.
    pub fn set_year_input(&mut self, input: &str) -> Event {
        match input.parse::<Year>() {
            Ok(year) => self.replace(year),
            Err(_) => self.reject_year(input.to_string()),
        }
    }

    /// Cycle the intensity of one cell. Disabled cells produce no event.
    pub fn toggle_cell(&mut self, column: usize, row: usize) -> Result<Option<Event>, ValidationError> {
        let date = self.grid.get(column, row).map(|cell| cell.date);
        let (Some(intensity), Some(date)) = (self.grid.cycle_intensity(column, row)?, date) else {
            debug!(column, row, "ignored toggle on disabled cell");
            return Ok(None);
        };
        Ok(Some(Event::CellChanged {
            column,
            row,
            date,
            intensity: intensity.level(),
            at: Utc::now(),
        }))
    }

    /// Cycle the cell showing `date`.
    ///
    /// # Errors
    ///
    /// `InvalidDate` when `date` is not in the grid's year.
    pub fn toggle_date(&mut self, date: NaiveDate) -> Result<Option<Event>, ValidationError> {
        let pos = self
            .grid
            .cell_for_date(date)
            .ok_or_else(|| ValidationError::InvalidDate {
                date: format_date(date),
                message: format!("not in {}", self.grid.year()),
            })?;
        self.toggle_cell(pos.column(), pos.row())
    }

    pub fn reset_all(&mut self) -> Event {
        self.grid.reset_all();
        Event::GridReset {
            year: self.grid.year().get(),
            at: Utc::now(),
        }
    }

    /// Validate `params` and generate the script for the live grid.
    pub fn export(&self, params: &ExportParams) -> Result<(Script, Event), ValidationError> {
        let request = ExportRequest::new(
            &self.grid,
            params.commit_time,
            params.author_email.as_str(),
            params.repository_url.as_str(),
        );
        let script = generate(&request)?;
        let summary = script.summary();
        let event = Event::ScriptExported {
            year: request.year().get(),
            active_days: summary.active_days,
            commit_count: summary.commit_count,
            at: Utc::now(),
        };
        Ok((script, event))
    }

    fn replace(&mut self, year: Year) -> Event {
        let grid = Grid::build(year);
        self.grid = grid;
        self.last_valid_year = year;
        Event::YearChanged {
            year: year.get(),
            at: Utc::now(),
        }
    }

    fn reject_year(&mut self, input: String) -> Event {
        let kept = self.last_valid_year;
        warn!(%input, kept_year = kept.get(), "rejected year, rebuilding last valid year");
        self.grid = Grid::build(kept);
        Event::YearRejected {
            input,
            kept_year: kept.get(),
            at: Utc::now(),
        }
    }
}
