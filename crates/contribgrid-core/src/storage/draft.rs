//! JSON draft of the live grid.
//!
//! The CLI runs one command per process, so the painted grid is kept in
//! `<data_dir>/draft.json` between invocations.

use std::path::Path;

use tracing::debug;

use super::data_dir;
use crate::error::Result;
use crate::grid::{Grid, Year};

const DRAFT_FILE: &str = "draft.json";

/// Load the draft in `dir`, or a fresh grid for the current year when none
/// has been saved.
///
/// # Errors
///
/// Returns an error if the draft exists but is unreadable or malformed.
pub fn load_draft_at(dir: &Path) -> Result<Grid> {
    let path = dir.join(DRAFT_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let grid: Grid = serde_json::from_str(&content)?;
            debug!(path = %path.display(), year = grid.year().get(), "loaded draft");
            Ok(grid)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Grid::build(Year::current())),
        Err(e) => Err(e.into()),
    }
}

pub fn save_draft_at(dir: &Path, grid: &Grid) -> Result<()> {
    let content = serde_json::to_string(grid)?;
    std::fs::write(dir.join(DRAFT_FILE), content)?;
    Ok(())
}

pub fn load_draft() -> Result<Grid> {
    load_draft_at(&data_dir()?)
}

pub fn save_draft(grid: &Grid) -> Result<()> {
    save_draft_at(&data_dir()?, grid)
}
