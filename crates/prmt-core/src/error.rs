//! Error types for the prompt engine
//!
//! Invalid answers never show up here: they are retried inside the prompt
//! loop. These are the failures a caller actually has to deal with.

use thiserror::Error;

/// Errors that can end a prompt
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Input stream closed while waiting for an answer")]
    Closed,

    #[error("Interrupted by user")]
    Interrupted,

    #[error("Failed to launch editor '{command}'")]
    EditorSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{command}' exited with {}", describe_code(.code))]
    EditorExit { command: String, code: Option<i32> },

    #[error("Invalid editor command '{command}': {reason}")]
    EditorCommand { command: String, reason: String },

    #[error("Invalid template '{pattern}': {reason}")]
    Template { pattern: String, reason: String },

    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PromptError>;
