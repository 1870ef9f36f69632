use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every editor state change produces an Event.
/// Front ends log or display them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A new grid was built for `year`; previous edits were discarded.
    YearChanged { year: i32, at: DateTime<Utc> },
    /// Year input was rejected and the grid rebuilt for the last valid year.
    YearRejected {
        input: String,
        kept_year: i32,
        at: DateTime<Utc>,
    },
    CellChanged {
        column: usize,
        row: usize,
        date: NaiveDate,
        intensity: u8,
        at: DateTime<Utc>,
    },
    GridReset { year: i32, at: DateTime<Utc> },
    ScriptExported {
        year: i32,
        active_days: usize,
        commit_count: usize,
        at: DateTime<Utc>,
    },
}
