use super::string::ask_string;
use super::{Prompter, Verdict};
use crate::console::Console;
use crate::error::Result;
use crate::options::{Choice, OptionKey, OptionSet};
use crate::template::{CallFormats, Fragment, SelectTemplate};
use std::fmt;

/// Prompt to pick one option
///
/// Sequences are picked by index, mappings by key (see
/// [`OptionSet::resolve`]). The key comes back exactly as declared.
pub struct SelectPrompt<'a, C: Console, V> {
    prompter: &'a mut Prompter<C>,
    question: String,
    options: OptionSet<V>,
    default: Option<OptionKey>,
    custom_key: Option<OptionKey>,
    sorted: bool,
    formats: CallFormats,
    custom_formats: CallFormats,
}

impl<'a, C: Console, V: fmt::Display> SelectPrompt<'a, C, V> {
    pub(crate) fn new(prompter: &'a mut Prompter<C>, question: String, options: OptionSet<V>) -> Self {
        Self {
            prompter,
            question,
            options,
            default: None,
            custom_key: None,
            sorted: false,
            formats: CallFormats::default(),
            custom_formats: CallFormats::default(),
        }
    }

    /// Key typed in for an empty answer
    pub fn default(mut self, key: impl Into<OptionKey>) -> Self {
        self.default = Some(key.into());
        self
    }

    /// Picking this key asks for free text, using the option's value as the
    /// question
    pub fn custom_key(mut self, key: impl Into<OptionKey>) -> Self {
        self.custom_key = Some(key.into());
        self
    }

    /// Sort sequence options by their text. Keys become the sorted positions.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Positional formats: `[question, option, options_end, default, prompt]`
    pub fn fmt<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats.set_positional(patterns);
        self
    }

    pub fn fmt_question(mut self, pattern: impl Into<String>) -> Self {
        self.formats.set(Fragment::Question, pattern);
        self
    }

    /// Template for each option line, filled with key and value
    pub fn fmt_option(mut self, pattern: impl Into<String>) -> Self {
        self.formats.set(Fragment::Option, pattern);
        self
    }

    /// Written after the option list
    pub fn fmt_options_end(mut self, pattern: impl Into<String>) -> Self {
        self.formats.set(Fragment::OptionsEnd, pattern);
        self
    }

    pub fn fmt_default(mut self, pattern: impl Into<String>) -> Self {
        self.formats.set(Fragment::Default, pattern);
        self
    }

    pub fn fmt_prompt(mut self, pattern: impl Into<String>) -> Self {
        self.formats.set(Fragment::Prompt, pattern);
        self
    }

    /// Positional formats of the custom value prompt: `[question, default, prompt]`
    pub fn fmt_custom<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_formats.set_positional(patterns);
        self
    }

    pub fn fmt_custom_question(mut self, pattern: impl Into<String>) -> Self {
        self.custom_formats.set(Fragment::Question, pattern);
        self
    }

    pub fn fmt_custom_default(mut self, pattern: impl Into<String>) -> Self {
        self.custom_formats.set(Fragment::Default, pattern);
        self
    }

    pub fn fmt_custom_prompt(mut self, pattern: impl Into<String>) -> Self {
        self.custom_formats.set(Fragment::Prompt, pattern);
        self
    }

    pub fn interact(self) -> Result<(OptionKey, Choice<V>)> {
        let template =
            SelectTemplate::resolve(&self.formats, &self.custom_formats, self.prompter.settings())?;
        let options = if self.sorted {
            self.options.sorted()
        } else {
            self.options
        };
        let default = self.default.as_ref().map(|key| key.to_string());
        let custom_key = self.custom_key.as_ref().map(|key| key.to_string());
        let menu = template.render(&self.question, &options.entries(), default.as_deref());

        let (key, custom) = self.prompter.retry(template.base(), |p| {
            p.write(&menu)?;
            let raw = p.read_line()?;
            let raw = match (raw.is_empty(), default.as_deref()) {
                (false, _) => raw,
                (true, Some(default)) => default.to_string(),
                (true, None) => return Ok(Verdict::Rejected),
            };

            let Some((key, value)) = options.resolve(&raw) else {
                return Ok(Verdict::Rejected);
            };

            if custom_key.as_deref() == Some(key.to_string().as_str()) {
                let question = value.to_string();
                let text = ask_string(p, template.custom(), &question, None, &[], false, false)?;
                return Ok(Verdict::Accepted((key, Some(text))));
            }
            Ok(Verdict::Accepted((key, None)))
        })?;

        let choice = match custom {
            Some(text) => Choice::Custom(text),
            None => Choice::Listed(
                options
                    .take(&key)
                    .expect("resolved key is present in its option set"),
            ),
        };
        Ok((key, choice))
    }
}
