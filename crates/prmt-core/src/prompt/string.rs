use super::{format_setters, or_default, Prompter, Verdict};
use crate::config::PromptKind;
use crate::console::Console;
use crate::error::Result;
use crate::template::{CallFormats, PromptTemplate};

/// Prompt for a string
///
/// ```ignore
/// let name = prompter.string("Your name?").default("Joe").interact()?;
/// ```
pub struct StringPrompt<'a, C: Console> {
    prompter: &'a mut Prompter<C>,
    question: String,
    default: Option<String>,
    blacklist: Vec<String>,
    required: bool,
    multiline: bool,
    formats: CallFormats,
}

impl<'a, C: Console> StringPrompt<'a, C> {
    pub(crate) fn new(prompter: &'a mut Prompter<C>, question: String) -> Self {
        Self {
            prompter,
            question,
            default: None,
            blacklist: Vec::new(),
            required: false,
            multiline: false,
            formats: CallFormats::default(),
        }
    }

    /// Value used when the answer is empty
    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Ask again if the answer is one of these
    pub fn blacklist<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = values.into_iter().map(Into::into).collect();
        self
    }

    /// Ask again if the answer (after applying the default) is empty
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Read keys until Ctrl-D or Ctrl-C instead of a single line
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    format_setters!(formats);

    pub fn interact(self) -> Result<String> {
        let template =
            PromptTemplate::resolve(&self.formats, self.prompter.settings(), PromptKind::String)?;
        ask_string(
            self.prompter,
            &template,
            &self.question,
            self.default.as_deref(),
            &self.blacklist,
            self.required,
            self.multiline,
        )
    }
}

/// Shared by plain string prompts and the custom value of a select
pub(crate) fn ask_string<C: Console>(
    prompter: &mut Prompter<C>,
    template: &PromptTemplate,
    question: &str,
    default: Option<&str>,
    blacklist: &[String],
    required: bool,
    multiline: bool,
) -> Result<String> {
    let prompt = template.render(question, default);
    prompter.retry(template, |p| {
        p.write(&prompt)?;
        let raw = if multiline {
            p.read_multiline()?
        } else {
            p.read_line()?
        };
        Ok(validate_string(or_default(raw, default), blacklist, required))
    })
}

pub(crate) fn validate_string(answer: String, blacklist: &[String], required: bool) -> Verdict<String> {
    if (required && answer.is_empty()) || blacklist.contains(&answer) {
        Verdict::Rejected
    } else {
        Verdict::Accepted(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Key, Scripted};

    fn prompter(lines: &[&str]) -> Prompter<Scripted> {
        Prompter::with_console(Scripted::new(lines.iter().copied()))
    }

    #[test]
    fn test_simple_answer() {
        let mut p = prompter(&["Ada"]);
        let name = p.string("Name?").interact().unwrap();
        assert_eq!(name, "Ada");
        assert_eq!(p.console().output(), "\nName?\n> \n");
    }

    #[test]
    fn test_default_on_empty_answer() {
        let mut p = prompter(&[""]);
        let name = p.string("Name?").default("Joe").interact().unwrap();
        assert_eq!(name, "Joe");
        assert_eq!(p.console().output(), "\nName?\n[Joe]> \n");
    }

    #[test]
    fn test_empty_answer_without_default() {
        let mut p = prompter(&[""]);
        assert_eq!(p.string("Name?").interact().unwrap(), "");
    }

    #[test]
    fn test_short_format() {
        let mut p = prompter(&["James"]);
        let name = p
            .string("Name?")
            .default("Joe")
            .fmt(["{} ", "[{}] ", "> {}"])
            .interact()
            .unwrap();
        assert_eq!(name, "James");
        assert_eq!(p.console().output(), "Name? [Joe] > ");
    }

    #[test]
    fn test_required_retries_until_non_empty() {
        let mut p = prompter(&["", "", "x"]);
        let value = p.string("Value?").required(true).interact().unwrap();
        assert_eq!(value, "x");
        assert_eq!(p.console().output().matches("Invalid input.").count(), 2);
    }

    #[test]
    fn test_blacklist_empty_string() {
        let mut p = prompter(&["", "x"]);
        let value = p.string("Value?").blacklist([""]).interact().unwrap();
        assert_eq!(value, "x");
    }

    #[test]
    fn test_blacklisted_default_is_rejected() {
        let mut p = prompter(&["", "other"]);
        let value = p
            .string("Value?")
            .default("admin")
            .blacklist(["admin"])
            .interact()
            .unwrap();
        assert_eq!(value, "other");
    }

    #[test]
    fn test_suffix_only_after_accepted_answer() {
        let mut p = prompter(&["bad", "good"]);
        p.string("Q")
            .blacklist(["bad"])
            .fmt(["{}:", "[{}]", "> {} <end>"])
            .interact()
            .unwrap();
        assert_eq!(
            p.console().output(),
            "Q:> Invalid input. <end>\nQ:>  <end>"
        );
    }

    #[test]
    fn test_invalid_prompt_template() {
        let mut p = prompter(&["x"]);
        let result = p.string("Q").fmt_prompt("no slot").interact();
        assert!(result.is_err());
        assert_eq!(p.console().output(), "");
    }

    #[test]
    fn test_multiline() {
        let mut keys: Vec<Key> = "one".chars().map(Key::Char).collect();
        keys.push(Key::Enter);
        keys.extend("two".chars().map(Key::Char));
        keys.push(Key::EndOfInput);

        let mut p = Prompter::with_console(Scripted::default().with_keys(keys));
        let text = p.string("Story?").multiline(true).interact().unwrap();
        assert_eq!(text, "one\ntwo");
    }

    #[test]
    fn test_multiline_interrupt_uses_default() {
        let mut p = Prompter::with_console(Scripted::default().with_keys([Key::Interrupt]));
        let text = p
            .string("Story?")
            .default("none")
            .multiline(true)
            .interact()
            .unwrap();
        assert_eq!(text, "none");
    }
}
