//! Script export command.

use std::path::{Path, PathBuf};

use clap::Args;
use contribgrid_core::storage::load_draft;
use contribgrid_core::{CommitTime, Config, Editor, ExportParams};

use super::log_event;

#[derive(Args)]
pub struct ExportArgs {
    /// Author/committer email (default: identity.email from config)
    #[arg(long)]
    email: Option<String>,
    /// Repository URL, https://...git (default: repository.url from config)
    #[arg(long)]
    repo: Option<String>,
    /// Commit time HH:MM, UTC (default: export.commit_time from config)
    #[arg(long)]
    time: Option<CommitTime>,
    /// Output file, or "-" for stdout (default: export.file_name from config)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let params = ExportParams {
        commit_time: args.time.unwrap_or(config.export.commit_time),
        author_email: args.email.unwrap_or(config.identity.email),
        repository_url: args.repo.unwrap_or(config.repository.url),
    };

    let editor = Editor::from_grid(load_draft()?);
    let (script, event) = editor.export(&params)?;
    log_event(&event);

    let summary = script.summary();
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(config.export.file_name));
    if output.as_os_str() == "-" {
        println!("{script}");
        eprintln!(
            "{} commits over {} days",
            summary.commit_count, summary.active_days
        );
        return Ok(());
    }

    write_script(&output, &script.render())?;
    println!("Script written to: {}", output.display());
    println!(
        "{} commits over {} days in {}",
        summary.commit_count,
        summary.active_days,
        editor.year()
    );
    println!("Run it inside an empty directory; it force-pushes to {}", params.repository_url);
    Ok(())
}

fn write_script(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}
