//! Prompt templates
//!
//! A prompt is rendered from a handful of patterns (question, option line,
//! post-options separator, default marker and prompt marker). Each pattern is
//! resolved through a fixed precedence chain: explicit call-site fragment,
//! positional call-site list, carrier field for the primitive, carrier global
//! field, built-in default. The first layer that is present wins, even if it
//! holds an empty string.

use crate::config::{PromptKind, Settings};
use crate::error::{PromptError, Result};
use std::fmt;

/// Built-in question pattern
pub const DEFAULT_QUESTION: &str = "\n{}\n";
/// Built-in default marker pattern
pub const DEFAULT_MARKER: &str = "[{}]";
/// Built-in prompt marker pattern
pub const DEFAULT_PROMPT: &str = "> {}\n";
/// Built-in option line pattern (key, value)
pub const DEFAULT_OPTION: &str = "  {}: {}";
/// Built-in separator written after the option list
pub const DEFAULT_OPTIONS_END: &str = "\n";

/// Notice written when an answer is rejected
pub const INVALID_INPUT: &str = "Invalid input.";

/// The named parts of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    Question,
    Option,
    OptionsEnd,
    Default,
    Prompt,
}

impl Fragment {
    /// Built-in pattern for this fragment
    pub fn builtin(self) -> &'static str {
        match self {
            Fragment::Question => DEFAULT_QUESTION,
            Fragment::Option => DEFAULT_OPTION,
            Fragment::OptionsEnd => DEFAULT_OPTIONS_END,
            Fragment::Default => DEFAULT_MARKER,
            Fragment::Prompt => DEFAULT_PROMPT,
        }
    }
}

/// Ordering of a positional format list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `[question, default, prompt]`
    Simple,
    /// `[question, option, options_end, default, prompt]`
    Select,
}

impl Layout {
    fn position(self, fragment: Fragment) -> Option<usize> {
        match (self, fragment) {
            (Layout::Simple, Fragment::Question) => Some(0),
            (Layout::Simple, Fragment::Default) => Some(1),
            (Layout::Simple, Fragment::Prompt) => Some(2),
            (Layout::Simple, _) => None,
            (Layout::Select, Fragment::Question) => Some(0),
            (Layout::Select, Fragment::Option) => Some(1),
            (Layout::Select, Fragment::OptionsEnd) => Some(2),
            (Layout::Select, Fragment::Default) => Some(3),
            (Layout::Select, Fragment::Prompt) => Some(4),
        }
    }
}

/// Format arguments given at the call site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallFormats {
    explicit: Vec<(Fragment, String)>,
    positional: Vec<Option<String>>,
}

impl CallFormats {
    /// Set one fragment explicitly. Overrides the positional list.
    pub fn set(&mut self, fragment: Fragment, pattern: impl Into<String>) {
        let pattern = pattern.into();
        match self.explicit.iter_mut().find(|(f, _)| *f == fragment) {
            Some(entry) => entry.1 = pattern,
            None => self.explicit.push((fragment, pattern)),
        }
    }

    /// Replace the positional list. Missing trailing entries stay absent.
    pub fn set_positional<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional = patterns.into_iter().map(|p| Some(p.into())).collect();
    }

    /// Replace the positional list with possibly-absent entries
    pub fn set_positional_partial<I>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = Option<String>>,
    {
        self.positional = patterns.into_iter().collect();
    }

    fn explicit(&self, fragment: Fragment) -> Option<&str> {
        self.explicit
            .iter()
            .find(|(f, _)| *f == fragment)
            .map(|(_, p)| p.as_str())
    }

    fn positional(&self, layout: Layout, fragment: Fragment) -> Option<&str> {
        layout
            .position(fragment)
            .and_then(|i| self.positional.get(i))
            .and_then(|p| p.as_deref())
    }
}

/// Pick the first layer that is present, falling back to `builtin`
pub fn first_present<'a>(layers: &[Option<&'a str>], builtin: &'a str) -> &'a str {
    layers.iter().copied().flatten().next().unwrap_or(builtin)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Slot,
}

/// A display pattern with `{}` substitution slots
///
/// `{{` and `}}` render as literal braces. Any other brace is kept as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    pieces: Vec<Piece>,
}

impl Pattern {
    pub fn parse(source: &str) -> Self {
        let mut pieces = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match (c, chars.peek()) {
                ('{', Some('}')) => {
                    chars.next();
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(Piece::Slot);
                }
                ('{', Some('{')) | ('}', Some('}')) => {
                    chars.next();
                    text.push(c);
                }
                _ => text.push(c),
            }
        }
        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }

        Self {
            source: source.to_string(),
            pieces,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of substitution slots
    pub fn slots(&self) -> usize {
        self.pieces.iter().filter(|p| **p == Piece::Slot).count()
    }

    /// Fill the slots in order. Slots without an argument render empty,
    /// surplus arguments are ignored.
    pub fn render(&self, args: &[&dyn fmt::Display]) -> String {
        let mut out = String::new();
        let mut args = args.iter();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Slot => {
                    if let Some(arg) = args.next() {
                        out.push_str(&arg.to_string());
                    }
                }
            }
        }
        out
    }

    /// Split around the single slot into `(prefix, suffix)`
    pub fn split(&self) -> Result<(String, String)> {
        let slots = self.slots();
        if slots != 1 {
            return Err(PromptError::Template {
                pattern: self.source.clone(),
                reason: format!("expected exactly one '{{}}' slot, found {}", slots),
            });
        }

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut seen_slot = false;
        for piece in &self.pieces {
            match piece {
                Piece::Slot => seen_slot = true,
                Piece::Text(text) if seen_slot => suffix.push_str(text),
                Piece::Text(text) => prefix.push_str(text),
            }
        }
        Ok((prefix, suffix))
    }
}

fn resolve_pattern(
    call: &CallFormats,
    layout: Layout,
    settings: &Settings,
    kind: PromptKind,
    fragment: Fragment,
) -> Pattern {
    let [specific, global] = settings.layers(kind, fragment);
    let source = first_present(
        &[
            call.explicit(fragment),
            call.positional(layout, fragment),
            specific,
            global,
        ],
        fragment.builtin(),
    );
    Pattern::parse(source)
}

/// Resolved question, default marker and prompt marker of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    question: Pattern,
    default: Pattern,
    prompt_prefix: String,
    prompt_suffix: String,
}

impl PromptTemplate {
    /// Build from explicit patterns, bypassing resolution
    pub fn new(question: &str, default: &str, prompt: &str) -> Result<Self> {
        let (prompt_prefix, prompt_suffix) = Pattern::parse(prompt).split()?;
        Ok(Self {
            question: Pattern::parse(question),
            default: Pattern::parse(default),
            prompt_prefix,
            prompt_suffix,
        })
    }

    /// Resolve the template of a simple primitive
    pub fn resolve(call: &CallFormats, settings: &Settings, kind: PromptKind) -> Result<Self> {
        Self::resolve_with_layout(call, Layout::Simple, settings, kind)
    }

    fn resolve_with_layout(
        call: &CallFormats,
        layout: Layout,
        settings: &Settings,
        kind: PromptKind,
    ) -> Result<Self> {
        let pick = |fragment| resolve_pattern(call, layout, settings, kind, fragment);
        let prompt = pick(Fragment::Prompt);
        let (prompt_prefix, prompt_suffix) = prompt.split()?;
        Ok(Self {
            question: pick(Fragment::Question),
            default: pick(Fragment::Default),
            prompt_prefix,
            prompt_suffix,
        })
    }

    pub fn question(&self, question: &str) -> String {
        self.question.render(&[&question])
    }

    pub fn default_marker(&self, default: Option<&str>) -> String {
        default
            .map(|d| self.default.render(&[&d]))
            .unwrap_or_default()
    }

    /// Written before reading the answer
    pub fn prompt_prefix(&self) -> &str {
        &self.prompt_prefix
    }

    /// Written once the answer has been accepted
    pub fn prompt_suffix(&self) -> &str {
        &self.prompt_suffix
    }

    /// Question, default marker and prompt prefix, ready to write
    pub fn render(&self, question: &str, default: Option<&str>) -> String {
        let mut out = self.question(question);
        out.push_str(&self.default_marker(default));
        out.push_str(&self.prompt_prefix);
        out
    }

    /// Notice written after a rejected answer
    pub fn invalid_notice(&self) -> String {
        format!("{}{}\n", INVALID_INPUT, self.prompt_suffix)
    }
}

/// Resolved templates of a select prompt, including its custom follow-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectTemplate {
    base: PromptTemplate,
    option: Pattern,
    options_end: Pattern,
    custom: PromptTemplate,
}

impl SelectTemplate {
    pub fn resolve(call: &CallFormats, custom: &CallFormats, settings: &Settings) -> Result<Self> {
        Ok(Self {
            base: PromptTemplate::resolve_with_layout(
                call,
                Layout::Select,
                settings,
                PromptKind::Select,
            )?,
            option: resolve_pattern(
                call,
                Layout::Select,
                settings,
                PromptKind::Select,
                Fragment::Option,
            ),
            options_end: resolve_pattern(
                call,
                Layout::Select,
                settings,
                PromptKind::Select,
                Fragment::OptionsEnd,
            ),
            custom: PromptTemplate::resolve(custom, settings, PromptKind::SelectCustom)?,
        })
    }

    pub fn base(&self) -> &PromptTemplate {
        &self.base
    }

    /// Template of the free-text prompt shown for the custom key
    pub fn custom(&self) -> &PromptTemplate {
        &self.custom
    }

    /// Question, option lines, separator, default marker and prompt prefix
    pub fn render<K, V>(&self, question: &str, entries: &[(K, V)], default: Option<&str>) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut out = self.base.question(question);
        out.push('\n');
        for (key, value) in entries {
            out.push_str(&self.option.render(&[key, value]));
            out.push('\n');
        }
        out.push_str(&self.options_end.render(&[]));
        out.push_str(&self.base.default_marker(default));
        out.push_str(self.base.prompt_prefix());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Formats;

    #[test]
    fn test_pattern_render_fills_slots_in_order() {
        let pattern = Pattern::parse("  {}: {}");
        assert_eq!(pattern.slots(), 2);
        assert_eq!(pattern.render(&[&1, &"b"]), "  1: b");
    }

    #[test]
    fn test_pattern_escaped_braces() {
        let pattern = Pattern::parse("{{{}}}");
        assert_eq!(pattern.slots(), 1);
        assert_eq!(pattern.render(&[&"x"]), "{x}");
    }

    #[test]
    fn test_pattern_without_slot_renders_literal() {
        let pattern = Pattern::parse("\n");
        assert_eq!(pattern.render(&[&"ignored"]), "\n");
    }

    #[test]
    fn test_split_prompt_marker() {
        let (prefix, suffix) = Pattern::parse("> {}\n").split().unwrap();
        assert_eq!(prefix, "> ");
        assert_eq!(suffix, "\n");
    }

    #[test]
    fn test_split_requires_one_slot() {
        assert!(Pattern::parse("> ").split().is_err());
        assert!(Pattern::parse("{} {}").split().is_err());
    }

    #[test]
    fn test_first_present_keeps_empty_override() {
        assert_eq!(first_present(&[None, Some(""), Some("x")], "d"), "");
        assert_eq!(first_present(&[None, None], "d"), "d");
    }

    #[test]
    fn test_builtin_defaults() {
        let template =
            PromptTemplate::resolve(&CallFormats::default(), &Settings::default(), PromptKind::String)
                .unwrap();
        assert_eq!(template.render("Name?", None), "\nName?\n> ");
        assert_eq!(template.render("Name?", Some("Joe")), "\nName?\n[Joe]> ");
        assert_eq!(template.prompt_suffix(), "\n");
        assert_eq!(template.invalid_notice(), "Invalid input.\n\n");
    }

    #[test]
    fn test_precedence_chain() {
        let settings = Settings {
            global: Formats {
                question: Some("G{} ".to_string()),
                default: Some("g[{}] ".to_string()),
                prompt: Some("g> {}".to_string()),
            },
            integer: Formats {
                question: Some("I{} ".to_string()),
                ..Formats::default()
            },
            ..Settings::default()
        };

        let mut call = CallFormats::default();
        call.set_positional_partial([None, Some("p[{}] ".to_string()), None]);
        call.set(Fragment::Prompt, ">> {}");

        let template = PromptTemplate::resolve(&call, &settings, PromptKind::Integer).unwrap();
        // question from the carrier field, default from the positional list,
        // prompt from the explicit argument
        assert_eq!(template.render("q", Some("1")), "Iq p[1] >> ");

        let template = PromptTemplate::resolve(&call, &settings, PromptKind::Confirm).unwrap();
        assert_eq!(template.render("q", None), "Gq >> ");
    }

    #[test]
    fn test_explicit_overrides_positional() {
        let mut call = CallFormats::default();
        call.set_positional(["{} ", "[{}] ", "> {}"]);
        call.set(Fragment::Question, "Q: {}");

        let template =
            PromptTemplate::resolve(&call, &Settings::default(), PromptKind::String).unwrap();
        assert_eq!(template.render("q", Some("d")), "Q: q[d] > ");
        assert_eq!(template.prompt_suffix(), "");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut call = CallFormats::default();
        call.set_positional(["{} ", "[{}] ", "> {}"]);
        let settings = Settings::default();

        let first = PromptTemplate::resolve(&call, &settings, PromptKind::String).unwrap();
        let second = PromptTemplate::resolve(&call, &settings, PromptKind::String).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.render("q", Some("d")), second.render("q", Some("d")));
    }

    #[test]
    fn test_select_render() {
        let template =
            SelectTemplate::resolve(&CallFormats::default(), &CallFormats::default(), &Settings::default())
                .unwrap();
        let entries = vec![(0, "a"), (1, "b")];
        assert_eq!(
            template.render("Pick", &entries, Some("1")),
            "\nPick\n\n  0: a\n  1: b\n\n[1]> "
        );
    }

    #[test]
    fn test_select_positional_layout() {
        let mut call = CallFormats::default();
        call.set_positional(["{}\n", "{}) {}", "", "({}) ", "? {}"]);
        let template =
            SelectTemplate::resolve(&call, &CallFormats::default(), &Settings::default()).unwrap();
        let entries = vec![("x", 10)];
        assert_eq!(template.render("Pick", &entries, Some("x")), "Pick\n\nx) 10\n(x) ? ");
    }
}
