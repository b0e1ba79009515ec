//! Typed prompts
//!
//! Every prompt follows the same loop: write the prompt, read an answer,
//! validate it. An accepted answer is followed by the prompt suffix and
//! returned. A rejected one is followed by `"Invalid input."` and the suffix,
//! and the exact same prompt is shown again. There is no retry limit.

mod confirm;
mod editor;
mod integer;
mod list;
mod select;
mod string;

pub use confirm::ConfirmPrompt;
pub use editor::EditorPrompt;
pub use integer::IntegerPrompt;
pub use list::ListPrompt;
pub use select::SelectPrompt;
pub use string::StringPrompt;

use crate::config::Settings;
use crate::console::{Console, Terminal};
use crate::editor::Editor;
use crate::error::{PromptError, Result};
use crate::options::OptionSet;
use crate::template::PromptTemplate;
use tracing::debug;

/// Outcome of validating one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Verdict<T> {
    Accepted(T),
    Rejected,
}

/// Adds the format setters shared by every prompt builder
macro_rules! format_setters {
    ($formats:ident) => {
        /// Positional formats: `[question, default, prompt]`
        pub fn fmt<I, S>(mut self, patterns: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.$formats.set_positional(patterns);
            self
        }

        /// Template for displaying the question
        pub fn fmt_question(mut self, pattern: impl Into<String>) -> Self {
            self.$formats.set($crate::template::Fragment::Question, pattern);
            self
        }

        /// Template for displaying the default value
        pub fn fmt_default(mut self, pattern: impl Into<String>) -> Self {
            self.$formats.set($crate::template::Fragment::Default, pattern);
            self
        }

        /// Template for displaying the prompt line. Must contain one `{}`.
        pub fn fmt_prompt(mut self, pattern: impl Into<String>) -> Self {
            self.$formats.set($crate::template::Fragment::Prompt, pattern);
            self
        }
    };
}

pub(crate) use format_setters;

/// Asks questions on a [`Console`]
///
/// Holds the editor used for editor prompts and the [`Settings`] layered
/// beneath each call's own formats.
#[derive(Debug)]
pub struct Prompter<C: Console = Terminal> {
    console: C,
    editor: Editor,
    settings: Settings,
}

impl Prompter<Terminal> {
    /// Prompter on the interactive terminal, editor taken from `EDITOR`
    pub fn new() -> Self {
        Self::with_console(Terminal::new())
    }
}

impl Default for Prompter<Terminal> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console> Prompter<C> {
    pub fn with_console(console: C) -> Self {
        Self {
            console,
            editor: Editor::from_env(),
            settings: Settings::default(),
        }
    }

    pub fn with_editor(mut self, editor: Editor) -> Self {
        self.editor = editor;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Ask for a string
    pub fn string(&mut self, question: impl Into<String>) -> StringPrompt<'_, C> {
        StringPrompt::new(self, question.into())
    }

    /// Ask for a string written in the external editor
    pub fn string_from_editor(&mut self, question: impl Into<String>) -> EditorPrompt<'_, C> {
        EditorPrompt::new(self, question.into())
    }

    /// Ask for an integer
    pub fn integer(&mut self, question: impl Into<String>) -> IntegerPrompt<'_, C> {
        IntegerPrompt::new(self, question.into())
    }

    /// Ask for a yes/no confirmation
    pub fn confirm(&mut self, question: impl Into<String>) -> ConfirmPrompt<'_, C> {
        ConfirmPrompt::new(self, question.into())
    }

    /// Ask for comma separated values
    pub fn list_of_string(&mut self, question: impl Into<String>) -> ListPrompt<'_, C> {
        ListPrompt::new(self, question.into())
    }

    /// Ask to pick one of `options`
    pub fn select<V>(
        &mut self,
        question: impl Into<String>,
        options: impl Into<OptionSet<V>>,
    ) -> SelectPrompt<'_, C, V>
    where
        V: std::fmt::Display,
    {
        SelectPrompt::new(self, question.into(), options.into())
    }

    pub(crate) fn write(&mut self, text: &str) -> Result<()> {
        self.console.write_str(text)?;
        Ok(())
    }

    /// Read one line; a closed input stream ends the prompt
    pub(crate) fn read_line(&mut self) -> Result<String> {
        self.console.read_line()?.ok_or(PromptError::Closed)
    }

    pub(crate) fn read_multiline(&mut self) -> Result<String> {
        Ok(self.console.read_multiline()?)
    }

    pub(crate) fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Run `attempt` until it accepts an answer.
    ///
    /// The prompt suffix of `template` is written only after the accepted
    /// answer; each rejection writes the invalid-input notice instead.
    pub(crate) fn retry<T, F>(&mut self, template: &PromptTemplate, mut attempt: F) -> Result<T>
    where
        F: FnMut(&mut Self) -> Result<Verdict<T>>,
    {
        let mut rejected = 0usize;
        loop {
            match attempt(self)? {
                Verdict::Accepted(value) => {
                    self.write(template.prompt_suffix())?;
                    return Ok(value);
                }
                Verdict::Rejected => {
                    rejected += 1;
                    debug!(rejected, "answer rejected, asking again");
                    self.write(&template.invalid_notice())?;
                }
            }
        }
    }
}

/// An empty answer falls back to the default, then to the empty string
pub(crate) fn or_default(raw: String, default: Option<&str>) -> String {
    if raw.is_empty() {
        default.unwrap_or_default().to_string()
    } else {
        raw
    }
}
