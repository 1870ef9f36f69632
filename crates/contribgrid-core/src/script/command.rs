//! Typed script commands and their shell rendering.
//!
//! Generation produces an ordered list of [`ScriptCommand`] records; text
//! only appears in [`Script::render`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::grid::format_date;

/// Branch the script commits to and force-pushes.
pub const BRANCH: &str = "main";
/// Remote name the script configures.
pub const REMOTE: &str = "origin";
/// Conventional file name of the exported script.
pub const SCRIPT_FILE_NAME: &str = "create_contributions.sh";

/// Wall-clock time (UTC) stamped on every commit, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitTime {
    hour: u8,
    minute: u8,
}

impl CommitTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidCommitTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl Default for CommitTime {
    fn default() -> Self {
        Self { hour: 12, minute: 0 }
    }
}

impl FromStr for CommitTime {
    type Err = ValidationError;

    /// Parse `HH:MM`; an empty string yields the default `12:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        let invalid = || ValidationError::InvalidCommitTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for CommitTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CommitTime> for String {
    fn from(time: CommitTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for CommitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One line of the generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptCommand {
    Shebang,
    /// `set -e`: abort on the first failing command.
    SetErrexit,
    Echo { message: String },
    Blank,
    Init,
    CheckoutMain,
    /// Add `origin`, falling back to updating its URL if it already exists.
    SetRemote { url: String },
    /// Empty commit with author and committer pinned to `date time:seq`.
    Commit {
        date: NaiveDate,
        time: CommitTime,
        seq: u32,
        email: String,
        message: String,
    },
    /// Force-push `main`, replacing the remote history.
    Push,
}

impl ScriptCommand {
    /// Commit record for the `seq`-th commit (0-based) of `date`.
    pub fn commit(date: NaiveDate, time: CommitTime, seq: u32, email: &str) -> Self {
        ScriptCommand::Commit {
            date,
            time,
            seq,
            email: email.to_string(),
            message: format!("Contribution {} {}", format_date(date), seq + 1),
        }
    }

    pub fn echo(message: impl Into<String>) -> Self {
        ScriptCommand::Echo {
            message: message.into(),
        }
    }

    /// Shell text of this command, without trailing newline.
    pub fn render(&self) -> String {
        match self {
            ScriptCommand::Shebang => "#!/bin/bash".to_string(),
            ScriptCommand::SetErrexit => "set -e".to_string(),
            ScriptCommand::Echo { message } => format!("echo \"{}\"", quote(message)),
            ScriptCommand::Blank => String::new(),
            ScriptCommand::Init => "git init".to_string(),
            ScriptCommand::CheckoutMain => format!("git checkout -b {BRANCH}"),
            ScriptCommand::SetRemote { url } => {
                let url = quote(url);
                format!("git remote add {REMOTE} \"{url}\" || git remote set-url {REMOTE} \"{url}\"")
            }
            ScriptCommand::Commit {
                date,
                time,
                seq,
                email,
                message,
            } => {
                let when = format!("{} {}:{:02} +0000", format_date(*date), time, seq);
                let email = quote(email);
                format!(
                    "GIT_AUTHOR_EMAIL=\"{email}\" GIT_COMMITTER_EMAIL=\"{email}\" \
                     GIT_AUTHOR_DATE=\"{when}\" GIT_COMMITTER_DATE=\"{when}\" \
                     git commit --allow-empty -m \"{}\"",
                    quote(message)
                )
            }
            ScriptCommand::Push => format!("git push --force {REMOTE} {BRANCH}"),
        }
    }
}

/// Escape a value for a double-quoted POSIX shell word.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Totals for a generated script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    pub active_days: usize,
    pub commit_count: usize,
}

/// Ordered command sequence of a generated script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    commands: Vec<ScriptCommand>,
}

impl Script {
    pub(crate) fn push(&mut self, command: ScriptCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[ScriptCommand] {
        &self.commands
    }

    pub fn commits(&self) -> impl Iterator<Item = &ScriptCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, ScriptCommand::Commit { .. }))
    }

    pub fn summary(&self) -> ScriptSummary {
        let mut days: Vec<NaiveDate> = self
            .commits()
            .filter_map(|c| match c {
                ScriptCommand::Commit { date, .. } => Some(*date),
                _ => None,
            })
            .collect();
        let commit_count = days.len();
        days.dedup();
        ScriptSummary {
            active_days: days.len(),
            commit_count,
        }
    }

    /// Lines joined with `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.commands
            .iter()
            .map(ScriptCommand::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_time_parsing() {
        assert_eq!("09:00".parse::<CommitTime>().unwrap().to_string(), "09:00");
        assert_eq!("".parse::<CommitTime>().unwrap(), CommitTime::default());
        assert_eq!(CommitTime::default().to_string(), "12:00");
        for bad in ["9:00", "24:00", "12:60", "noon", "12:00:00", "ab:cd"] {
            assert!(bad.parse::<CommitTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn commit_renders_pinned_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let time: CommitTime = "09:00".parse().unwrap();
        let line = ScriptCommand::commit(date, time, 0, "a@b.com").render();
        assert_eq!(
            line,
            "GIT_AUTHOR_EMAIL=\"a@b.com\" GIT_COMMITTER_EMAIL=\"a@b.com\" \
             GIT_AUTHOR_DATE=\"2024-03-15 09:00:00 +0000\" GIT_COMMITTER_DATE=\"2024-03-15 09:00:00 +0000\" \
             git commit --allow-empty -m \"Contribution 2024-03-15 1\""
        );
    }

    #[test]
    fn set_remote_tolerates_existing_origin() {
        let line = ScriptCommand::SetRemote {
            url: "https://x/y.git".into(),
        }
        .render();
        assert_eq!(
            line,
            "git remote add origin \"https://x/y.git\" || git remote set-url origin \"https://x/y.git\""
        );
    }

    #[test]
    fn quote_escapes_shell_metacharacters() {
        assert_eq!(quote("a@b.com"), "a@b.com");
        assert_eq!(quote(r#"x"$(rm)`\"#), r#"x\"\$(rm)\`\\"#);
    }

    #[test]
    fn summary_counts_distinct_days() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let time = CommitTime::default();
        let mut script = Script::default();
        script.push(ScriptCommand::Init);
        script.push(ScriptCommand::commit(d1, time, 0, "a@b.com"));
        script.push(ScriptCommand::commit(d1, time, 1, "a@b.com"));
        script.push(ScriptCommand::commit(d2, time, 0, "a@b.com"));
        assert_eq!(
            script.summary(),
            ScriptSummary {
                active_days: 2,
                commit_count: 3
            }
        );
    }
}
