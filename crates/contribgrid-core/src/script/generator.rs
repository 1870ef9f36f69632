//! Commit script generation.
//!
//! ## Usage
//!
//! ```ignore
//! let request = ExportRequest::new(&grid, CommitTime::default(), email, url);
//! let script = generate(&request)?;
//! std::fs::write(SCRIPT_FILE_NAME, script.render())?;
//! ```

use tracing::info;

use super::command::{CommitTime, Script, ScriptCommand};
use crate::error::ValidationError;
use crate::grid::{Grid, Year};

/// Everything needed to turn a painted grid into a script.
///
/// Built at export time only; never persisted. The year is always the
/// grid's own.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    grid: &'a Grid,
    commit_time: CommitTime,
    author_email: String,
    repository_url: String,
}

impl<'a> ExportRequest<'a> {
    pub fn new(
        grid: &'a Grid,
        commit_time: CommitTime,
        author_email: impl Into<String>,
        repository_url: impl Into<String>,
    ) -> Self {
        Self {
            grid,
            commit_time,
            author_email: author_email.into(),
            repository_url: repository_url.into(),
        }
    }

    pub fn year(&self) -> Year {
        self.grid.year()
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn commit_time(&self) -> CommitTime {
        self.commit_time
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// Check identity and repository fields.
    ///
    /// # Errors
    ///
    /// `InvalidEmail` when the email is empty or has no `@`;
    /// `InvalidRepositoryUrl` unless the URL starts with `https://` and ends
    /// with `.git`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.author_email)?;
        validate_repository_url(&self.repository_url)
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || !email.contains('@') {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

pub fn validate_repository_url(url: &str) -> Result<(), ValidationError> {
    if !url.starts_with("https://") || !url.ends_with(".git") {
        return Err(ValidationError::InvalidRepositoryUrl(url.to_string()));
    }
    Ok(())
}

/// Validate `request` and produce the full command sequence.
///
/// Nothing is generated when validation fails.
pub fn generate(request: &ExportRequest<'_>) -> Result<Script, ValidationError> {
    request.validate()?;

    let mut script = Script::default();
    script.push(ScriptCommand::Shebang);
    script.push(ScriptCommand::SetErrexit);
    script.push(ScriptCommand::echo("🚀 Initializing and setting up repository..."));
    script.push(ScriptCommand::Init);
    script.push(ScriptCommand::CheckoutMain);
    script.push(ScriptCommand::SetRemote {
        url: request.repository_url.clone(),
    });
    script.push(ScriptCommand::Blank);
    script.push(ScriptCommand::echo("🎨 Creating commits..."));

    // Active cells are enabled, so every date falls inside the grid's year.
    for (_, cell) in request.grid.active_cells() {
        for seq in 0..cell.intensity.commit_count() {
            script.push(ScriptCommand::commit(
                cell.date,
                request.commit_time,
                seq,
                &request.author_email,
            ));
        }
    }

    script.push(ScriptCommand::Blank);
    script.push(ScriptCommand::echo(
        "⬆️ Pushing to GitHub (this will replace the remote history)...",
    ));
    script.push(ScriptCommand::Push);
    script.push(ScriptCommand::Blank);
    script.push(ScriptCommand::echo("✅ All done!"));

    let summary = script.summary();
    info!(
        year = request.year().get(),
        days = summary.active_days,
        commits = summary.commit_count,
        "generated contribution script"
    );
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Intensity, WEEKS, DAYS};
    use indoc::indoc;

    const EMAIL: &str = "a@b.com";
    const URL: &str = "https://x/y.git";

    fn grid_2024() -> Grid {
        Grid::build(Year::new(2024).unwrap())
    }

    fn paint(grid: &mut Grid, column: usize, row: usize, level: u8) {
        for _ in 0..level {
            grid.cycle_intensity(column, row).unwrap();
        }
    }

    fn commit_lines(text: &str) -> Vec<&str> {
        text.lines().filter(|l| l.contains("git commit")).collect()
    }

    #[test]
    fn empty_grid_renders_bootstrap_and_trailer_only() {
        let grid = grid_2024();
        let request = ExportRequest::new(&grid, CommitTime::default(), EMAIL, URL);
        let script = generate(&request).unwrap();
        let expected = indoc! {r#"
            #!/bin/bash
            set -e
            echo "🚀 Initializing and setting up repository..."
            git init
            git checkout -b main
            git remote add origin "https://x/y.git" || git remote set-url origin "https://x/y.git"

            echo "🎨 Creating commits..."

            echo "⬆️ Pushing to GitHub (this will replace the remote history)..."
            git push --force origin main

            echo "✅ All done!""#};
        assert_eq!(script.render(), expected);
        assert_eq!(script.summary().commit_count, 0);
    }

    #[test]
    fn reset_grid_exports_no_commits() {
        let mut grid = grid_2024();
        paint(&mut grid, 5, 3, 4);
        paint(&mut grid, 30, 1, 2);
        grid.reset_all();
        let script = generate(&ExportRequest::new(&grid, CommitTime::default(), EMAIL, URL)).unwrap();
        assert!(commit_lines(&script.render()).is_empty());
    }

    #[test]
    fn single_day_intensity_one() {
        let mut grid = grid_2024();
        // 2024-03-15
        paint(&mut grid, 10, 5, 1);
        let time = "09:00".parse().unwrap();
        let text = generate(&ExportRequest::new(&grid, time, EMAIL, URL))
            .unwrap()
            .render();
        let commits = commit_lines(&text);
        assert_eq!(commits.len(), 1);
        assert_eq!(
            commits[0],
            "GIT_AUTHOR_EMAIL=\"a@b.com\" GIT_COMMITTER_EMAIL=\"a@b.com\" \
             GIT_AUTHOR_DATE=\"2024-03-15 09:00:00 +0000\" GIT_COMMITTER_DATE=\"2024-03-15 09:00:00 +0000\" \
             git commit --allow-empty -m \"Contribution 2024-03-15 1\""
        );
    }

    #[test]
    fn intensity_four_uses_ordered_seconds() {
        let mut grid = grid_2024();
        paint(&mut grid, 10, 5, 4);
        let script = generate(&ExportRequest::new(&grid, CommitTime::default(), EMAIL, URL)).unwrap();
        let commits: Vec<_> = script.commits().collect();
        assert_eq!(commits.len(), Intensity::MAX.commit_count() as usize);
        let text = script.render();
        let lines = commit_lines(&text);
        for (k, line) in lines.iter().enumerate().take(4) {
            assert!(line.contains(&format!("2024-03-15 12:00:{k:02} +0000")));
            assert!(line.ends_with(&format!("-m \"Contribution 2024-03-15 {}\"", k + 1)));
        }
    }

    #[test]
    fn commits_follow_column_major_date_order() {
        let mut grid = grid_2024();
        paint(&mut grid, 20, 6, 1);
        paint(&mut grid, 20, 0, 1);
        paint(&mut grid, 2, 4, 1);
        let script = generate(&ExportRequest::new(&grid, CommitTime::default(), EMAIL, URL)).unwrap();
        let dates: Vec<_> = script
            .commits()
            .filter_map(|c| match c {
                ScriptCommand::Commit { date, .. } => Some(*date),
                _ => None,
            })
            .collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn full_year_at_max_intensity() {
        let mut grid = grid_2024();
        for column in 0..WEEKS {
            for row in 0..DAYS {
                paint(&mut grid, column, row, 4);
            }
        }
        let summary = generate(&ExportRequest::new(&grid, CommitTime::default(), EMAIL, URL))
            .unwrap()
            .summary();
        assert_eq!(summary.active_days, 366);
        assert_eq!(summary.commit_count, 366 * 24);
    }

    #[test]
    fn invalid_identity_produces_no_script() {
        let mut grid = grid_2024();
        paint(&mut grid, 10, 5, 2);
        let cases = [
            ("", URL, ValidationError::InvalidEmail(String::new())),
            ("nobody", URL, ValidationError::InvalidEmail("nobody".into())),
            (EMAIL, "http://x/y.git", ValidationError::InvalidRepositoryUrl("http://x/y.git".into())),
            (EMAIL, "https://x/y", ValidationError::InvalidRepositoryUrl("https://x/y".into())),
        ];
        for (email, url, expected) in cases {
            let result = generate(&ExportRequest::new(&grid, CommitTime::default(), email, url));
            assert_eq!(result, Err(expected));
        }
    }

    #[test]
    fn request_year_follows_grid() {
        let grid = Grid::build(Year::new(2019).unwrap());
        let request = ExportRequest::new(&grid, CommitTime::default(), EMAIL, URL);
        assert_eq!(request.year(), grid.year());
        assert_eq!(request.author_email(), EMAIL);
        assert_eq!(request.repository_url(), URL);

        let mut grid = grid_2024();
        paint(&mut grid, 0, 1, 1);
        let script = generate(&ExportRequest::new(&grid, CommitTime::default(), EMAIL, URL)).unwrap();
        let dates: Vec<_> = script
            .commits()
            .filter_map(|c| match c {
                ScriptCommand::Commit { date, .. } => Some(date.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(dates, vec!["2024-01-01"]);
    }

    #[test]
    fn output_is_deterministic() {
        let mut grid = grid_2024();
        paint(&mut grid, 7, 3, 3);
        paint(&mut grid, 44, 2, 1);
        let request = ExportRequest::new(&grid, "23:59".parse().unwrap(), EMAIL, URL);
        assert_eq!(generate(&request).unwrap().render(), generate(&request).unwrap().render());
    }
}
