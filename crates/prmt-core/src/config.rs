//! Reusable format settings
//!
//! `Settings` pre-fills template fragments so callers do not have to repeat
//! them on every prompt. A [`Prompter`](crate::Prompter) layers these beneath
//! call-site arguments. Settings can also be read from YAML:
//!
//! ```yaml
//! global:
//!   question: "{} "
//!   prompt: "> {}"
//! select:
//!   option: "  [{}] {}"
//! ```

use crate::error::Result;
use crate::template::Fragment;
use serde::Deserialize;
use std::path::Path;

/// Question, default marker and prompt marker overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Formats {
    pub question: Option<String>,
    pub default: Option<String>,
    pub prompt: Option<String>,
}

impl Formats {
    fn get(&self, fragment: Fragment) -> Option<&str> {
        match fragment {
            Fragment::Question => self.question.as_deref(),
            Fragment::Default => self.default.as_deref(),
            Fragment::Prompt => self.prompt.as_deref(),
            Fragment::Option | Fragment::OptionsEnd => None,
        }
    }
}

/// Overrides for select prompts and their custom-value follow-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectFormats {
    pub question: Option<String>,
    pub option: Option<String>,
    pub options_end: Option<String>,
    pub default: Option<String>,
    pub prompt: Option<String>,
    pub custom_question: Option<String>,
    pub custom_default: Option<String>,
    pub custom_prompt: Option<String>,
}

impl SelectFormats {
    fn get(&self, fragment: Fragment) -> Option<&str> {
        match fragment {
            Fragment::Question => self.question.as_deref(),
            Fragment::Option => self.option.as_deref(),
            Fragment::OptionsEnd => self.options_end.as_deref(),
            Fragment::Default => self.default.as_deref(),
            Fragment::Prompt => self.prompt.as_deref(),
        }
    }

    fn get_custom(&self, fragment: Fragment) -> Option<&str> {
        match fragment {
            Fragment::Question => self.custom_question.as_deref(),
            Fragment::Default => self.custom_default.as_deref(),
            Fragment::Prompt => self.custom_prompt.as_deref(),
            Fragment::Option | Fragment::OptionsEnd => None,
        }
    }
}

/// The prompt a set of templates is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    String,
    StringFromEditor,
    Integer,
    Confirm,
    ListOfString,
    Select,
    /// Free-text prompt shown after picking a select's custom key
    SelectCustom,
}

/// Format overrides shared by every prompt of a [`Prompter`](crate::Prompter)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub global: Formats,
    pub string: Formats,
    pub string_from_editor: Formats,
    pub integer: Formats,
    pub confirm: Formats,
    pub list_of_string: Formats,
    pub select: SelectFormats,
}

impl Settings {
    /// Parse settings from a YAML document
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    /// Read settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Carrier layers for a fragment: `[primitive-specific, global]`.
    ///
    /// Option line and options-end have no global layer.
    pub fn layers(&self, kind: PromptKind, fragment: Fragment) -> [Option<&str>; 2] {
        let specific = match kind {
            PromptKind::String => self.string.get(fragment),
            PromptKind::StringFromEditor => self.string_from_editor.get(fragment),
            PromptKind::Integer => self.integer.get(fragment),
            PromptKind::Confirm => self.confirm.get(fragment),
            PromptKind::ListOfString => self.list_of_string.get(fragment),
            PromptKind::Select => self.select.get(fragment),
            PromptKind::SelectCustom => self.select.get_custom(fragment),
        };
        [specific, self.global.get(fragment)]
    }
}
