mod config;
pub mod draft;

pub use config::{Config, ExportConfig, IdentityConfig, RepositoryConfig};
pub use draft::{load_draft, load_draft_at, save_draft, save_draft_at};

use std::path::PathBuf;

/// Returns the contribgrid data directory, creating it if needed.
///
/// `CONTRIBGRID_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/contribgrid[-dev]/`; set CONTRIBGRID_ENV=dev to use the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("CONTRIBGRID_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CONTRIBGRID_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("contribgrid-dev")
            } else {
                base_dir.join("contribgrid")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
