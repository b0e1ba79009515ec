//! prmt Core - Typed command-line prompts for operator scripts
//!
//! Ask for a string, an integer, a yes/no confirmation, a comma separated
//! list, one option out of a set, or free text written in the user's editor.
//! Every prompt validates its answer and asks again until it gets a valid one.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Templates** - `{}` patterns and the precedence rules that pick
//!   the one used for each part of a prompt (`template`, `config`)
//! - **Layer 2: Prompts** - `Prompter` and its builders, each running the
//!   ask/validate/retry loop over a `Console`
//! - **Layer 3: Terminal** - stdin/stdout, raw key capture for multi-line
//!   answers and Ctrl-C handling (feature-gated)
//!
//! The `command` module runs the shell steps that scripts chain after their
//! prompts.
//!
//! # Feature Flags
//!
//! - `terminal` (default): raw-mode multi-line input and the Ctrl-C handler
//!
//! # Example Usage
//!
//! ```ignore
//! use prmt_core::{Choice, Prompter};
//!
//! let mut prompter = Prompter::new();
//!
//! let name = prompter.string("Release name?").default("nightly").interact()?;
//! let build = prompter.integer("Build number?").default(1).interact()?;
//! let (_, channel) = prompter
//!     .select("Channel?", ["stable", "beta", "Enter custom channel"])
//!     .default(0)
//!     .custom_key(2)
//!     .interact()?;
//! if prompter.confirm(format!("Publish {name} #{build:?} to {channel}?")).interact()? {
//!     // ...
//! }
//! ```

pub mod command;
pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod interrupt;
pub mod options;
pub mod prompt;
pub mod template;

// Re-export main types for convenience
pub use config::{Formats, PromptKind, SelectFormats, Settings};
pub use console::{Console, Key, Scripted, Terminal};
pub use editor::{Document, Editor};
pub use error::{PromptError, Result};
pub use options::{Choice, OptionKey, OptionSet};
pub use prompt::{
    ConfirmPrompt, EditorPrompt, IntegerPrompt, ListPrompt, Prompter, SelectPrompt, StringPrompt,
};
