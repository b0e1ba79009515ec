use super::string::validate_string;
use super::{format_setters, or_default, Prompter};
use crate::config::PromptKind;
use crate::console::Console;
use crate::editor::Document;
use crate::error::Result;
use crate::template::{CallFormats, PromptTemplate};

/// Prompt for a string written in the external editor
///
/// The editor is opened on a scratch file holding the default value and the
/// instruction as `#` comments. Leaving the file untouched means the default.
pub struct EditorPrompt<'a, C: Console> {
    prompter: &'a mut Prompter<C>,
    question: String,
    document: Document,
    blacklist: Vec<String>,
    required: bool,
    formats: CallFormats,
}

impl<'a, C: Console> EditorPrompt<'a, C> {
    pub(crate) fn new(prompter: &'a mut Prompter<C>, question: String) -> Self {
        Self {
            prompter,
            question,
            document: Document::default(),
            blacklist: Vec::new(),
            required: false,
            formats: CallFormats::default(),
        }
    }

    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.document.default = Some(default.into());
        self
    }

    /// Text shown as `#` comment lines in the editor
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.document.instruction = Some(instruction.into());
        self
    }

    /// Extension of the scratch file, e.g. `md`, for syntax highlighting
    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.document.file_type = Some(file_type.into());
        self
    }

    /// Whether to add a note about `#` lines when there is no instruction
    pub fn comment_notice(mut self, notice: bool) -> Self {
        self.document.comment_notice = notice;
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

    format_setters!(formats);

    pub fn interact(self) -> Result<String> {
        let template = PromptTemplate::resolve(
            &self.formats,
            self.prompter.settings(),
            PromptKind::StringFromEditor,
        )?;
        let default = self.document.default.as_deref();
        let prompt = template.render(&self.question, default);
        let (document, blacklist, required) = (&self.document, &self.blacklist, self.required);

        self.prompter.retry(&template, |p| {
            p.write(&prompt)?;
            let text = p.editor().edit(document)?;
            p.write(&format!("{}\n", text))?;
            Ok(validate_string(or_default(text, default), blacklist, required))
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use crate::console::Scripted;
    use crate::editor::Editor;
    use crate::error::PromptError;
    use crate::interrupt::editor_test_guard;
    use crate::prompt::Prompter;

    fn prompter(editor: &str) -> Prompter<Scripted> {
        Prompter::with_console(Scripted::default()).with_editor(Editor::new(editor))
    }

    #[test]
    fn test_text_from_editor() {
        let _guard = editor_test_guard();
        let mut p = prompter(r#"sh -c 'printf "Dear team" >> "$1"' sh"#);
        let text = p
            .string_from_editor("Message?")
            .instruction("Write the announcement")
            .interact()
            .unwrap();
        assert_eq!(text, "Dear team");
        assert_eq!(p.console().output(), "\nMessage?\n> Dear team\n\n");
    }

    #[test]
    fn test_untouched_file_gives_default() {
        let _guard = editor_test_guard();
        let mut p = prompter("true");
        let text = p
            .string_from_editor("Message?")
            .default("hello")
            .fmt(["{} ", "[{}] ", "> {}"])
            .interact()
            .unwrap();
        assert_eq!(text, "hello");
        assert_eq!(p.console().output(), "Message? [hello] > \n");
    }

    #[test]
    fn test_editor_failure_is_returned() {
        let _guard = editor_test_guard();
        let mut p = prompter("false");
        let result = p.string_from_editor("Message?").interact();
        assert!(matches!(result, Err(PromptError::EditorExit { .. })));
    }
}
