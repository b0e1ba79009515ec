use super::string::validate_string;
use super::{format_setters, or_default, Prompter, Verdict};
use crate::config::PromptKind;
use crate::console::Console;
use crate::error::Result;
use crate::template::{CallFormats, PromptTemplate};

/// Prompt for comma separated values
///
/// Each value is trimmed. If any value is blacklisted the whole answer is
/// asked again.
pub struct ListPrompt<'a, C: Console> {
    prompter: &'a mut Prompter<C>,
    question: String,
    default: Option<String>,
    blacklist: Vec<String>,
    required: bool,
    formats: CallFormats,
}

impl<'a, C: Console> ListPrompt<'a, C> {
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

    /// Values used when the answer is empty, shown joined with `", "`
    pub fn default<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.as_ref().to_string()).collect();
        self.default = Some(values.join(", "));
        self
    }

    /// Ask again if any value is one of these
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

    format_setters!(formats);

    pub fn interact(self) -> Result<Vec<String>> {
        let template = PromptTemplate::resolve(
            &self.formats,
            self.prompter.settings(),
            PromptKind::ListOfString,
        )?;
        let default = self.default.as_deref();
        let prompt = template.render(&self.question, default);
        let (blacklist, required) = (&self.blacklist, self.required);

        self.prompter.retry(&template, |p| {
            p.write(&prompt)?;
            let raw = p.read_line()?;
            Ok(validate_list(or_default(raw, default), blacklist, required))
        })
    }
}

pub(crate) fn split_list(answer: &str) -> Vec<String> {
    answer.split(',').map(|item| item.trim().to_string()).collect()
}

pub(crate) fn validate_list(answer: String, blacklist: &[String], required: bool) -> Verdict<Vec<String>> {
    let Verdict::Accepted(answer) = validate_string(answer, &[], required) else {
        return Verdict::Rejected;
    };

    let items = split_list(&answer);
    if items.iter().any(|item| blacklist.contains(item)) {
        Verdict::Rejected
    } else {
        Verdict::Accepted(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Scripted;

    fn prompter(lines: &[&str]) -> Prompter<Scripted> {
        Prompter::with_console(Scripted::new(lines.iter().copied()))
    }

    #[test]
    fn test_split_trims_items() {
        assert_eq!(split_list("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_list(""), vec![""]);
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut p = prompter(&["a, b ,c"]);
        let values = p.list_of_string("Values?").interact().unwrap();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_default_joined() {
        let mut p = prompter(&[""]);
        let values = p
            .list_of_string("Values?")
            .default(["lol", "nice"])
            .interact()
            .unwrap();
        assert_eq!(values, vec!["lol", "nice"]);
        assert!(p.console().output().contains("[lol, nice]"));
    }

    #[test]
    fn test_blacklisted_item_rejects_whole_answer() {
        let mut p = prompter(&["", "fine, ok"]);
        let values = p
            .list_of_string("Values?")
            .default(["lol, nice"])
            .blacklist(["lol"])
            .interact()
            .unwrap();
        assert_eq!(values, vec!["fine", "ok"]);
        assert_eq!(p.console().output().matches("Invalid input.").count(), 1);
    }

    #[test]
    fn test_blacklist_empty_item() {
        let mut p = prompter(&["", "a,,b", "a,b"]);
        let values = p.list_of_string("Values?").blacklist([""]).interact().unwrap();
        assert_eq!(values, vec!["a", "b"]);
        assert_eq!(p.console().output().matches("Invalid input.").count(), 2);
    }

    #[test]
    fn test_empty_answer_without_default() {
        let mut p = prompter(&[""]);
        assert_eq!(p.list_of_string("Values?").interact().unwrap(), vec![""]);
    }

    #[test]
    fn test_required() {
        let mut p = prompter(&["", "x"]);
        let values = p.list_of_string("Values?").required(true).interact().unwrap();
        assert_eq!(values, vec!["x"]);
    }
}
