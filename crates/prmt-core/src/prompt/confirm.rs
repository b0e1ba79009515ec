use super::{format_setters, Prompter, Verdict};
use crate::config::PromptKind;
use crate::console::Console;
use crate::error::Result;
use crate::template::{CallFormats, PromptTemplate};

const YES: &[&str] = &["y", "yes", "true", "1"];
const NO: &[&str] = &["n", "no", "false", "0"];

/// Prompt for a yes/no answer
///
/// Accepts `y`, `yes`, `true`, `1` and `n`, `no`, `false`, `0` in any case.
pub struct ConfirmPrompt<'a, C: Console> {
    prompter: &'a mut Prompter<C>,
    question: String,
    default: Option<bool>,
    formats: CallFormats,
}

impl<'a, C: Console> ConfirmPrompt<'a, C> {
    pub(crate) fn new(prompter: &'a mut Prompter<C>, question: String) -> Self {
        Self {
            prompter,
            question,
            default: None,
            formats: CallFormats::default(),
        }
    }

    /// Answer used for an empty line, shown as `yes` or `no`
    pub fn default(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }

    format_setters!(formats);

    pub fn interact(self) -> Result<bool> {
        let template =
            PromptTemplate::resolve(&self.formats, self.prompter.settings(), PromptKind::Confirm)?;
        let default_text = self.default.map(|d| if d { "yes" } else { "no" });
        let prompt = template.render(&self.question, default_text);
        let default = self.default;

        self.prompter.retry(&template, |p| {
            p.write(&prompt)?;
            let raw = p.read_line()?;
            Ok(validate_confirm(&raw, default))
        })
    }
}

pub(crate) fn validate_confirm(raw: &str, default: Option<bool>) -> Verdict<bool> {
    if raw.is_empty() {
        return match default {
            Some(value) => Verdict::Accepted(value),
            None => Verdict::Rejected,
        };
    }

    let answer = raw.to_lowercase();
    if YES.contains(&answer.as_str()) {
        Verdict::Accepted(true)
    } else if NO.contains(&answer.as_str()) {
        Verdict::Accepted(false)
    } else {
        Verdict::Rejected
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
    fn test_validate_confirm() {
        for yes in ["y", "Y", "yes", "YES", "true", "True", "1"] {
            assert_eq!(validate_confirm(yes, None), Verdict::Accepted(true), "{}", yes);
        }
        for no in ["n", "N", "no", "No", "false", "FALSE", "0"] {
            assert_eq!(validate_confirm(no, None), Verdict::Accepted(false), "{}", no);
        }
        assert_eq!(validate_confirm("maybe", None), Verdict::Rejected);
        assert_eq!(validate_confirm(" y", None), Verdict::Rejected);
    }

    #[test]
    fn test_yes() {
        let mut p = prompter(&["y"]);
        assert!(p.confirm("Continue?").interact().unwrap());
    }

    #[test]
    fn test_uppercase_no() {
        let mut p = prompter(&["N"]);
        assert!(!p.confirm("Continue?").interact().unwrap());
    }

    #[test]
    fn test_empty_without_default_asks_again() {
        let mut p = prompter(&["", "yes"]);
        assert!(p.confirm("Continue?").interact().unwrap());
        assert_eq!(p.console().output().matches("Invalid input.").count(), 1);
    }

    #[test]
    fn test_empty_with_default() {
        let mut p = prompter(&[""]);
        assert!(p.confirm("Continue?").default(true).interact().unwrap());
        assert_eq!(p.console().output(), "\nContinue?\n[yes]> \n");
    }

    #[test]
    fn test_n_invalid_answers_then_valid() {
        let mut p = prompter(&["?", "sure", "nope", "", "no"]);
        assert!(!p.confirm("Continue?").interact().unwrap());
        assert_eq!(p.console().output().matches("Invalid input.").count(), 4);
        assert_eq!(p.console().remaining(), 0);
    }
}
