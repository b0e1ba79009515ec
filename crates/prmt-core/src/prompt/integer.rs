use super::{format_setters, Prompter, Verdict};
use crate::config::PromptKind;
use crate::console::Console;
use crate::error::Result;
use crate::template::{CallFormats, PromptTemplate};

/// Prompt for a base-10 integer
///
/// An empty answer without default yields `None`, which is not the same as
/// `Some(0)`.
pub struct IntegerPrompt<'a, C: Console> {
    prompter: &'a mut Prompter<C>,
    question: String,
    default: Option<i64>,
    blacklist: Vec<i64>,
    required: bool,
    formats: CallFormats,
}

impl<'a, C: Console> IntegerPrompt<'a, C> {
    pub(crate) fn new(prompter: &'a mut Prompter<C>, question: String) -> Self {
        Self {
            prompter,
            question,
            default: None,
            blacklist: Vec::new(),
            required: false,
            formats: CallFormats::default(),
        }
    }

    pub fn default(mut self, default: i64) -> Self {
        self.default = Some(default);
        self
    }

    /// Ask again if the parsed value is one of these
    pub fn blacklist(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.blacklist = values.into_iter().collect();
        self
    }

    /// Ask again instead of returning `None` for an empty answer
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    format_setters!(formats);

    pub fn interact(self) -> Result<Option<i64>> {
        let template =
            PromptTemplate::resolve(&self.formats, self.prompter.settings(), PromptKind::Integer)?;
        let default_text = self.default.map(|d| d.to_string());
        let prompt = template.render(&self.question, default_text.as_deref());
        let (default, blacklist, required) = (self.default, &self.blacklist, self.required);

        self.prompter.retry(&template, |p| {
            p.write(&prompt)?;
            let raw = p.read_line()?;
            Ok(validate_integer(&raw, default, blacklist, required))
        })
    }
}

pub(crate) fn validate_integer(
    raw: &str,
    default: Option<i64>,
    blacklist: &[i64],
    required: bool,
) -> Verdict<Option<i64>> {
    let value = if raw.is_empty() {
        default
    } else {
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => return Verdict::Rejected,
        }
    };

    match value {
        Some(v) if blacklist.contains(&v) => Verdict::Rejected,
        None if required => Verdict::Rejected,
        value => Verdict::Accepted(value),
    }
}
