pub mod config;
pub mod export;
pub mod grid;

use contribgrid_core::storage::{load_draft, save_draft};
use contribgrid_core::{Editor, Event};

/// Run `f` against the saved draft and persist the result.
pub(crate) fn with_draft<T>(
    f: impl FnOnce(&mut Editor) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let mut editor = Editor::from_grid(load_draft()?);
    let out = f(&mut editor)?;
    save_draft(editor.grid())?;
    Ok(out)
}

/// Run `f` against the saved draft without writing it back.
pub(crate) fn read_draft<T>(
    f: impl FnOnce(&Editor) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let editor = Editor::from_grid(load_draft()?);
    f(&editor)
}

pub(crate) fn log_event(event: &Event) {
    tracing::debug!(?event, "editor event");
}
