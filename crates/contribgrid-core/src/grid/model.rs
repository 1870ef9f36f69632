//! Grid cell state.
//!
//! A [`Grid`] is a 53 x 7 matrix fully determined by its [`Year`]. Cells
//! outside the year are disabled and always hold intensity 0; enabled cells
//! cycle through intensities 0..=4.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calendar::{cell_date, format_date, start_of_grid, Year, DAYS, WEEKS};
use crate::error::ValidationError;

/// Commits per day for each intensity level.
pub const INTENSITY_MAP: [u32; 5] = [0, 1, 10, 20, 24];

/// Paint level of a cell (0..=4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const ZERO: Intensity = Intensity(0);
    pub const MAX: Intensity = Intensity(4);

    pub fn new(level: u8) -> Result<Self, ValidationError> {
        if usize::from(level) < INTENSITY_MAP.len() {
            Ok(Intensity(level))
        } else {
            Err(ValidationError::OutOfBounds {
                collection: "intensity levels".into(),
                index: usize::from(level),
                len: INTENSITY_MAP.len(),
            })
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Next level, wrapping 4 back to 0.
    pub fn next(self) -> Self {
        Intensity((self.0 + 1) % INTENSITY_MAP.len() as u8)
    }

    /// Number of commits a day at this level produces.
    pub fn commit_count(self) -> u32 {
        INTENSITY_MAP[usize::from(self.0)]
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Intensity {
    type Error = ValidationError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Intensity::new(level)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

/// Column/row coordinate inside the grid; always within 53 x 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    column: usize,
    row: usize,
}

impl CellPos {
    /// Checked constructor; rejects positions outside 53 x 7.
    pub fn new(column: usize, row: usize) -> Result<Self, ValidationError> {
        if column >= WEEKS {
            return Err(ValidationError::OutOfBounds {
                collection: "grid columns".into(),
                index: column,
                len: WEEKS,
            });
        }
        if row >= DAYS {
            return Err(ValidationError::OutOfBounds {
                collection: "grid rows".into(),
                index: row,
                len: DAYS,
            });
        }
        Ok(Self { column, row })
    }

    pub fn column(self) -> usize {
        self.column
    }

    pub fn row(self) -> usize {
        self.row
    }

    fn index(self) -> usize {
        self.column * DAYS + self.row
    }
}

/// One day slot of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub date: NaiveDate,
    pub enabled: bool,
    pub intensity: Intensity,
}

impl Cell {
    /// ISO date label (`YYYY-MM-DD`).
    pub fn label(&self) -> String {
        format_date(self.date)
    }

    /// Enabled with a non-zero intensity.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.intensity.is_zero()
    }
}

/// Calendar grid for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridDraft", into = "GridDraft")]
pub struct Grid {
    year: Year,
    /// Column-major, `column * DAYS + row`.
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a fresh grid for `year` with every intensity at 0.
    pub fn build(year: Year) -> Self {
        let mut cells = Vec::with_capacity(WEEKS * DAYS);
        for column in 0..WEEKS {
            for row in 0..DAYS {
                let date = cell_date(year, column, row);
                cells.push(Cell {
                    date,
                    enabled: year.contains(date),
                    intensity: Intensity::ZERO,
                });
            }
        }
        debug!(year = year.get(), start = %start_of_grid(year), "built grid");
        Self { year, cells }
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn cell(&self, pos: CellPos) -> &Cell {
        &self.cells[pos.index()]
    }

    /// Cell at raw coordinates, `None` outside the grid.
    pub fn get(&self, column: usize, row: usize) -> Option<&Cell> {
        CellPos::new(column, row).ok().map(|pos| self.cell(pos))
    }

    /// All cells with their positions, column by column, top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, cell)| {
            (
                CellPos {
                    column: i / DAYS,
                    row: i % DAYS,
                },
                cell,
            )
        })
    }

    /// Enabled cells with a non-zero intensity, in column-major order.
    pub fn active_cells(&self) -> impl Iterator<Item = (CellPos, &Cell)> + '_ {
        self.cells().filter(|(_, cell)| cell.is_active())
    }

    pub fn enabled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.enabled).count()
    }

    /// Advance the intensity of the cell at `column`, `row`.
    ///
    /// Returns the new intensity, or `None` when the cell is disabled (and
    /// left untouched).
    pub fn cycle_intensity(
        &mut self,
        column: usize,
        row: usize,
    ) -> Result<Option<Intensity>, ValidationError> {
        let pos = CellPos::new(column, row)?;
        let cell = &mut self.cells[pos.index()];
        if !cell.enabled {
            return Ok(None);
        }
        cell.intensity = cell.intensity.next();
        debug!(column, row, intensity = cell.intensity.level(), "cycled cell");
        Ok(Some(cell.intensity))
    }

    /// Set every enabled cell back to 0.
    pub fn reset_all(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.enabled) {
            cell.intensity = Intensity::ZERO;
        }
    }

    /// Position of `date`, or `None` when it lies outside the grid's year.
    pub fn cell_for_date(&self, date: NaiveDate) -> Option<CellPos> {
        if !self.year.contains(date) {
            return None;
        }
        let offset = usize::try_from((date - start_of_grid(self.year)).num_days()).ok()?;
        CellPos::new(offset / DAYS, offset % DAYS).ok()
    }
}

/// Persisted shape of a grid: dates are recomputed from the year.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridDraft {
    year: Year,
    intensities: Vec<Vec<Intensity>>,
}

impl From<Grid> for GridDraft {
    fn from(grid: Grid) -> Self {
        let intensities = grid
            .cells
            .chunks(DAYS)
            .map(|week| week.iter().map(|c| c.intensity).collect())
            .collect();
        GridDraft {
            year: grid.year,
            intensities,
        }
    }
}

impl TryFrom<GridDraft> for Grid {
    type Error = ValidationError;

    fn try_from(draft: GridDraft) -> Result<Self, Self::Error> {
        if draft.intensities.len() != WEEKS {
            return Err(ValidationError::OutOfBounds {
                collection: "grid columns".into(),
                index: draft.intensities.len(),
                len: WEEKS,
            });
        }
        let mut grid = Grid::build(draft.year);
        for (column, week) in draft.intensities.into_iter().enumerate() {
            if week.len() != DAYS {
                return Err(ValidationError::OutOfBounds {
                    collection: "grid rows".into(),
                    index: week.len(),
                    len: DAYS,
                });
            }
            for (row, intensity) in week.into_iter().enumerate() {
                let cell = &mut grid.cells[column * DAYS + row];
                if !cell.enabled && !intensity.is_zero() {
                    return Err(ValidationError::InvalidDate {
                        date: cell.label(),
                        message: format!("outside {} but painted", draft.year),
                    });
                }
                cell.intensity = intensity;
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(value: i32) -> Grid {
        Grid::build(Year::new(value).unwrap())
    }

    #[test]
    fn intensity_cycles_through_map() {
        let mut level = Intensity::ZERO;
        let mut counts = Vec::new();
        for _ in 0..5 {
            counts.push(level.commit_count());
            level = level.next();
        }
        assert_eq!(counts, vec![0, 1, 10, 20, 24]);
        assert_eq!(level, Intensity::ZERO);
        assert!(Intensity::new(5).is_err());
    }

    #[test]
    fn build_marks_days_outside_year_disabled() {
        let g = grid(2024);
        // 2023-12-31 sits at column 0, row 0.
        assert!(!g.get(0, 0).unwrap().enabled);
        assert!(g.get(0, 1).unwrap().enabled);
        assert_eq!(g.get(0, 1).unwrap().label(), "2024-01-01");
        assert_eq!(g.enabled_count(), 366);
        assert!(g.cells().all(|(_, c)| c.intensity.is_zero()));
    }

    #[test]
    fn cycle_on_disabled_cell_is_noop() {
        let mut g = grid(2024);
        for _ in 0..7 {
            assert_eq!(g.cycle_intensity(0, 0).unwrap(), None);
        }
        assert_eq!(g.get(0, 0).unwrap().intensity, Intensity::ZERO);
    }

    #[test]
    fn cycle_rejects_out_of_bounds() {
        let mut g = grid(2024);
        assert!(matches!(
            g.cycle_intensity(53, 0),
            Err(ValidationError::OutOfBounds { index: 53, len: 53, .. })
        ));
        assert!(g.cycle_intensity(0, 7).is_err());
    }

    #[test]
    fn positions_outside_grid_cannot_be_built() {
        let g = grid(2024);
        assert!(CellPos::new(53, 0).is_err());
        assert!(CellPos::new(0, 7).is_err());
        assert!(g.get(53, 0).is_none());
        assert!(g.get(0, 7).is_none());

        let last = CellPos::new(WEEKS - 1, DAYS - 1).unwrap();
        assert_eq!(g.cell(last).date, cell_date(g.year(), WEEKS - 1, DAYS - 1));
        assert_eq!(g.cells().last().map(|(pos, _)| pos), Some(last));
    }

    #[test]
    fn reset_all_clears_enabled_cells() {
        let mut g = grid(2024);
        g.cycle_intensity(3, 2).unwrap();
        g.cycle_intensity(3, 2).unwrap();
        g.cycle_intensity(40, 6).unwrap();
        assert_eq!(g.active_cells().count(), 2);
        g.reset_all();
        assert_eq!(g.active_cells().count(), 0);
        assert_eq!(g, grid(2024));
    }

    #[test]
    fn cell_for_date_inverts_cell_date() {
        let g = grid(2024);
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let pos = g.cell_for_date(date).unwrap();
        assert_eq!((pos.column(), pos.row()), (10, 5));
        assert_eq!(g.cell(pos).date, date);
        assert_eq!(g.cell_for_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), None);
    }

    #[test]
    fn draft_round_trip_keeps_intensities() {
        let mut g = grid(2024);
        g.cycle_intensity(10, 5).unwrap();
        g.cycle_intensity(20, 0).unwrap();
        g.cycle_intensity(20, 0).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn draft_with_painted_disabled_cell_is_rejected() {
        let mut intensities = vec![vec![0u8; DAYS]; WEEKS];
        intensities[0][0] = 2;
        let json = serde_json::json!({ "year": 2024, "intensities": intensities });
        assert!(serde_json::from_value::<Grid>(json).is_err());
    }

    #[test]
    fn draft_with_bad_year_is_rejected() {
        let json = serde_json::json!({ "year": 1850, "intensities": vec![vec![0u8; DAYS]; WEEKS] });
        assert!(serde_json::from_value::<Grid>(json).is_err());
    }

    proptest! {
        #[test]
        fn prop_enabled_cells_match_days_in_year(value in 1901i32..=2999) {
            let g = grid(value);
            prop_assert_eq!(g.cells().count(), WEEKS * DAYS);
            prop_assert_eq!(g.enabled_count() as u32, g.year().day_count());
            for (_, cell) in g.cells().filter(|(_, c)| c.enabled) {
                prop_assert_eq!(chrono::Datelike::year(&cell.date), value);
            }
        }

        #[test]
        fn prop_five_cycles_restore_intensity(
            value in 1901i32..=2999,
            column in 0usize..WEEKS,
            row in 0usize..DAYS,
            start in 0u8..5,
        ) {
            let mut g = grid(value);
            let enabled = g.get(column, row).unwrap().enabled;
            for _ in 0..start {
                g.cycle_intensity(column, row).unwrap();
            }
            let before = g.get(column, row).unwrap().intensity;
            for _ in 0..5 {
                g.cycle_intensity(column, row).unwrap();
            }
            prop_assert_eq!(g.get(column, row).unwrap().intensity, before);
            if !enabled {
                prop_assert_eq!(before, Intensity::ZERO);
            }
        }
    }
}
