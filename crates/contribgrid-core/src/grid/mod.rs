//! Contribution grid: a year laid out as 53 week columns of 7 weekday rows.

pub mod calendar;
pub mod model;

pub use calendar::{
    cell_date, format_date, month_boundaries, start_of_grid, MonthLabel, Year, DAYS, MAX_YEAR,
    MIN_YEAR, WEEKS,
};
pub use model::{Cell, CellPos, Grid, Intensity, INTENSITY_MAP};
