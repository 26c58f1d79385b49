//! Compose a prompt in `$EDITOR`.
//!
//! A placeholder file is written to the data directory, the editor is run
//! on it with the terminal attached, and once the editor has exited the
//! file is read back and renamed after its first few words. Prompt files
//! are never deleted.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info};

const PLACEHOLDER: &str = "Replace this file with your prompt.";

/// Characters that are not allowed in archived prompt file names.
const FORBIDDEN_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Number of prompt words used in an archived file name.
const NAME_WORDS: usize = 5;

/// Launches an external editor to collect a prompt.
pub struct Editor {
    program: String,
    data_dir: PathBuf,
}

impl Editor {
    pub fn new(program: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Open the editor and return the text the user saved.
    ///
    /// The file is only read after the editor process has exited. On a
    /// non-zero exit the placeholder file is left where it is.
    pub async fn compose(&self) -> Result<String> {
        let tmp_path = prompt_file_path(&self.data_dir, Utc::now(), "");
        tokio::fs::write(&tmp_path, PLACEHOLDER)
            .await
            .map_err(|e| Error::io(&tmp_path, e))?;

        debug!("Opening {} in {}", tmp_path.display(), self.program);
        let status = Command::new(&self.program)
            .arg(&tmp_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| Error::EditorSpawn {
                editor: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::EditorExit(describe_exit(status)));
        }

        let prompt = tokio::fs::read_to_string(&tmp_path)
            .await
            .map_err(|e| Error::io(&tmp_path, e))?;

        let archive_path = prompt_file_path(&self.data_dir, Utc::now(), &prompt);
        tokio::fs::rename(&tmp_path, &archive_path)
            .await
            .map_err(|e| Error::io(&archive_path, e))?;

        info!("Archived prompt at {}", archive_path.display());
        // stderr: stdout carries only the model's reply.
        eprintln!("Saving prompt to: {}", archive_path.display());

        Ok(prompt)
    }
}

fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => format!("none ({})", status),
    }
}

/// Replace characters that are unsafe in file names with `#` and lowercase.
pub fn sanitize_file_name(input: &str) -> String {
    input
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '#' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Format `now` as an ISO-8601 timestamp usable in a file name.
fn file_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-")
}

/// Build `prompt_<timestamp>_<words>.txt` inside `data_dir`.
pub fn prompt_file_path(data_dir: &Path, now: DateTime<Utc>, prompt: &str) -> PathBuf {
    let words = prompt
        .split_whitespace()
        .take(NAME_WORDS)
        .map(sanitize_file_name)
        .collect::<Vec<_>>()
        .join("-");

    data_dir.join(format!("prompt_{}_{}.txt", file_timestamp(now), words))
}
