//! Text preview of a grid.
//!
//! Renders the month label row followed by one line per weekday, each cell
//! two characters wide so month names fit above their columns.

use serde::Serialize;

use crate::grid::{month_boundaries, Cell, Grid, DAYS, WEEKS};

const DAY_NAMES: [&str; DAYS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const ROW_PREFIX: usize = 4;
const CELL_WIDTH: usize = 2;

/// Totals shown under the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridStats {
    pub year: i32,
    pub enabled_days: usize,
    pub active_days: usize,
    pub commits: u64,
}

pub fn stats(grid: &Grid) -> GridStats {
    let (active_days, commits) = grid
        .active_cells()
        .fold((0, 0u64), |(days, commits), (_, cell)| {
            (days + 1, commits + u64::from(cell.intensity.commit_count()))
        });
    GridStats {
        year: grid.year().get(),
        enabled_days: grid.enabled_count(),
        active_days,
        commits,
    }
}

fn heat_char(cell: &Cell) -> char {
    if !cell.enabled {
        return ' ';
    }
    match cell.intensity.level() {
        0 => '·',
        1 => '░',
        2 => '▒',
        3 => '▓',
        _ => '█',
    }
}

/// Month labels, then the 7 weekday rows. Trailing spaces are trimmed.
pub fn render(grid: &Grid) -> String {
    let mut output = String::new();

    let mut header = vec![' '; ROW_PREFIX + WEEKS * CELL_WIDTH + 2];
    for slot in month_boundaries(grid.year()) {
        if let Some(label) = slot.label {
            let start = ROW_PREFIX + slot.column * CELL_WIDTH;
            for (i, ch) in label.chars().enumerate() {
                header[start + i] = ch;
            }
        }
    }
    output.push_str(header.iter().collect::<String>().trim_end());
    output.push('\n');

    for (row, day_name) in DAY_NAMES.iter().enumerate() {
        let mut line = format!("{:<width$}", day_name, width = ROW_PREFIX);
        for column in 0..WEEKS {
            if let Some(cell) = grid.get(column, row) {
                line.push(heat_char(cell));
                line.push(' ');
            }
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output.push_str("Legend: · none  ░ 1  ▒ 10  ▓ 20  █ 24 commits/day\n");
    output
}
