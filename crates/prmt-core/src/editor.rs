//! Answers written in an external text editor
//!
//! The editor is opened on a temporary scratch file pre-filled with the
//! default value and the instructions as `#` comment lines. Once the editor
//! exits, the file is read back and the injected header is removed again by
//! exact substring match: if the user edited the header, the edited remains
//! are part of the answer.

use crate::error::{PromptError, Result};
use crate::interrupt::EditorSession;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Editor used when `EDITOR` is not set
pub const DEFAULT_EDITOR: &str = "vi";

/// Instruction line added when no instruction is given
pub const COMMENT_NOTICE: &str = "# Lines starting with '#' will be ignored.\n";

/// External editor command, e.g. `vim` or `code --wait`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    command: String,
}

impl Editor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Editor named by `EDITOR`, or [`DEFAULT_EDITOR`]
    pub fn from_env() -> Self {
        let command = std::env::var("EDITOR")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
        Self::new(command)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Open the editor on `document` and return the cleaned text
    pub fn edit(&self, document: &Document) -> Result<String> {
        let mut parts =
            shell_words::split(&self.command).map_err(|e| PromptError::EditorCommand {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;
        if parts.is_empty() {
            return Err(PromptError::EditorCommand {
                command: self.command.clone(),
                reason: "empty command".to_string(),
            });
        }
        let program = parts.remove(0);

        let header = document.header();
        let suffix = document
            .file_type
            .as_deref()
            .map(|ft| format!(".{}", ft))
            .unwrap_or_default();

        // Removed when dropped, on every return path below
        let mut scratch = tempfile::Builder::new()
            .prefix("prmt-")
            .suffix(&suffix)
            .tempfile()?;
        scratch.write_all(header.as_bytes())?;
        scratch.flush()?;

        let mut cmd = Command::new(&program);
        cmd.args(&parts);
        if let Some(file_type) = document.file_type.as_deref() {
            if is_vi(&program) {
                cmd.arg("-c").arg(format!("set filetype={}", file_type));
            }
        }
        cmd.arg(scratch.path());

        debug!(editor = %self.command, path = %scratch.path().display(), "launching editor");

        let session = EditorSession::begin();
        let status = cmd.status().map_err(|source| PromptError::EditorSpawn {
            command: self.command.clone(),
            source,
        })?;
        let interrupted = session.interrupted();
        drop(session);

        debug!(editor = %self.command, ?status, interrupted, "editor exited");

        if interrupted {
            return Err(PromptError::Interrupted);
        }
        if !status.success() {
            return Err(PromptError::EditorExit {
                command: self.command.clone(),
                code: status.code(),
            });
        }

        let raw = std::fs::read_to_string(scratch.path())?;
        Ok(document.strip(&raw))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::from_env()
    }
}

fn is_vi(program: &str) -> bool {
    matches!(
        Path::new(program).file_name().and_then(|n| n.to_str()),
        Some("vi") | Some("vim")
    )
}

/// Scratch document handed to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub default: Option<String>,
    pub instruction: Option<String>,
    /// File extension without the dot, e.g. `md`
    pub file_type: Option<String>,
    /// Add [`COMMENT_NOTICE`] when there is no instruction
    pub comment_notice: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            default: None,
            instruction: None,
            file_type: None,
            comment_notice: true,
        }
    }
}

impl Document {
    /// Default value line followed by the commented instruction
    pub fn header(&self) -> String {
        let mut header = match self.default.as_deref() {
            Some(default) if !default.is_empty() => format!("{}\n", default),
            _ => "\n".to_string(),
        };

        match self.instruction.as_deref() {
            Some(instruction) => {
                for line in instruction.lines() {
                    header.push_str(&format!("# {}\n", line));
                }
            }
            None if self.comment_notice => header.push_str(COMMENT_NOTICE),
            None => {}
        }

        header
    }

    /// Remove every verbatim occurrence of the header
    pub fn strip(&self, raw: &str) -> String {
        raw.replace(&self.header(), "")
    }
}
