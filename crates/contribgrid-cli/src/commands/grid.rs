use chrono::NaiveDate;
use clap::Subcommand;
use contribgrid_core::{month_boundaries, preview, Event, Year};

use super::{log_event, read_draft, with_draft};

#[derive(Subcommand)]
pub enum GridAction {
    /// Show the draft year, or switch to another year (discards all painting)
    Year {
        /// Year between 1901 and 2999
        year: Option<String>,
    },
    /// Cycle the intensity of a cell (0 -> 1 -> 2 -> 3 -> 4 -> 0)
    Toggle {
        /// Week column (0-52)
        column: usize,
        /// Weekday row (0 = Sunday .. 6 = Saturday)
        row: usize,
        /// Number of cycles to apply
        #[arg(long, default_value_t = 1)]
        times: u8,
    },
    /// Cycle the intensity of the cell showing a date (YYYY-MM-DD)
    ToggleDate {
        date: NaiveDate,
        /// Number of cycles to apply
        #[arg(long, default_value_t = 1)]
        times: u8,
    },
    /// Reset every cell to intensity 0
    Reset,
    /// Print the grid preview and totals
    Show {
        /// Output totals as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the month label of each column
    Months {
        /// Year to inspect (defaults to the draft year)
        #[arg(long)]
        year: Option<Year>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GridAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GridAction::Year { year: None } => read_draft(|editor| {
            println!("{}", editor.year());
            Ok(())
        }),
        GridAction::Year { year: Some(input) } => with_draft(|editor| {
            let event = editor.set_year_input(&input);
            log_event(&event);
            match event {
                Event::YearRejected { kept_year, .. } => {
                    eprintln!("invalid year {input:?}; keeping {kept_year} (grid cleared)");
                }
                _ => println!("year set to {}", editor.year()),
            }
            Ok(())
        }),
        GridAction::Toggle { column, row, times } => with_draft(|editor| {
            for _ in 0..times {
                match editor.toggle_cell(column, row)? {
                    Some(event) => log_event(&event),
                    None => {
                        println!("cell {column},{row} is outside {}", editor.year());
                        return Ok(());
                    }
                }
            }
            print_cell(editor, column, row);
            Ok(())
        }),
        GridAction::ToggleDate { date, times } => with_draft(|editor| {
            for _ in 0..times {
                if let Some(event) = editor.toggle_date(date)? {
                    log_event(&event);
                }
            }
            if let Some(pos) = editor.grid().cell_for_date(date) {
                print_cell(editor, pos.column(), pos.row());
            }
            Ok(())
        }),
        GridAction::Reset => with_draft(|editor| {
            let event = editor.reset_all();
            log_event(&event);
            println!("grid reset");
            Ok(())
        }),
        GridAction::Show { json } => read_draft(|editor| {
            let stats = preview::stats(editor.grid());
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", stats.year);
                print!("{}", preview::render(editor.grid()));
                println!(
                    "{} active days, {} commits ({} days in year)",
                    stats.active_days, stats.commits, stats.enabled_days
                );
            }
            Ok(())
        }),
        GridAction::Months { year, json } => read_draft(|editor| {
            let year = year.unwrap_or_else(|| editor.year());
            let labels = month_boundaries(year);
            if json {
                println!("{}", serde_json::to_string_pretty(&labels)?);
            } else {
                for slot in labels.iter().filter(|l| l.label.is_some()) {
                    println!("{:>2} {}", slot.column, slot.label.unwrap_or_default());
                }
            }
            Ok(())
        }),
    }
}

fn print_cell(editor: &contribgrid_core::Editor, column: usize, row: usize) {
    if let Some(cell) = editor.grid().get(column, row) {
        println!(
            "{} intensity {} ({} commits)",
            cell.label(),
            cell.intensity.level(),
            cell.intensity.commit_count()
        );
    }
}
