//! # contribgrid Core Library
//!
//! This library provides the core logic for painting a GitHub-style
//! contribution calendar and turning it into a shell script of backdated,
//! empty commits. The `contribgrid` CLI is a thin layer over the same
//! library.
//!
//! ## Architecture
//!
//! - **Grid**: maps a year onto 53 Sunday-start week columns x 7 weekday
//!   rows, with a 0-4 intensity per day
//! - **Script**: validates identity/repository input and generates a typed
//!   command sequence, rendered to shell text in a final pass
//! - **Editor**: the command interface (`set_year`, `toggle_cell`,
//!   `reset_all`, `export`) owning the live grid
//! - **Storage**: TOML configuration and a JSON draft of the live grid
//!
//! The script is only ever emitted; nothing here runs git.
//!
//! ## Key Components
//!
//! - [`Grid`]: calendar grid and cell state
//! - [`generate`]: commit script generation
//! - [`Editor`]: stateful command interface
//! - [`Config`]: export defaults

pub mod editor;
pub mod error;
pub mod events;
pub mod grid;
pub mod preview;
pub mod script;
pub mod storage;

pub use editor::{Editor, ExportParams};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use grid::{month_boundaries, start_of_grid, Cell, CellPos, Grid, Intensity, MonthLabel, Year};
pub use preview::GridStats;
pub use script::{generate, CommitTime, ExportRequest, Script, ScriptCommand, SCRIPT_FILE_NAME};
pub use storage::Config;
