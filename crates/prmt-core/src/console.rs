//! Text input and output for prompts
//!
//! Prompts talk to a [`Console`]. [`Terminal`] is the interactive session on
//! stdin/stdout; [`Scripted`] replays canned answers and records everything
//! written, which is what tests and non-interactive callers use.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A key delivered while capturing multi-line input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    /// Ctrl-D
    EndOfInput,
    /// Ctrl-C
    Interrupt,
}

/// Where prompts write to and read answers from
pub trait Console {
    /// Write text and flush it
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Read one line without its line terminator. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Read keys one by one until end of input or interrupt
    fn read_multiline(&mut self) -> io::Result<String>;
}

/// Accumulate keys until Ctrl-D or Ctrl-C, echoing what was typed.
///
/// Both terminating keys end the capture normally; whatever was typed so far
/// is returned.
pub fn collect_multiline<K, E>(mut next_key: K, mut echo: E) -> io::Result<String>
where
    K: FnMut() -> io::Result<Key>,
    E: FnMut(&str) -> io::Result<()>,
{
    let mut buffer = String::new();
    loop {
        match next_key()? {
            Key::Char(c) => {
                buffer.push(c);
                let mut encoded = [0u8; 4];
                echo(c.encode_utf8(&mut encoded))?;
            }
            Key::Enter => {
                buffer.push('\n');
                echo("\r\n")?;
            }
            Key::Backspace => {
                if let Some(removed) = buffer.pop() {
                    if removed != '\n' {
                        echo("\u{8} \u{8}")?;
                    }
                }
            }
            Key::EndOfInput | Key::Interrupt => {
                echo("\r\n")?;
                return Ok(buffer);
            }
        }
    }
}

/// The interactive terminal session
#[derive(Debug)]
pub struct Terminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    #[cfg(feature = "terminal")]
    fn read_multiline(&mut self) -> io::Result<String> {
        let _raw = raw::RawMode::enter()?;
        let stdout = &self.stdout;
        collect_multiline(raw::read_key, |text| {
            let mut out = stdout.lock();
            out.write_all(text.as_bytes())?;
            out.flush()
        })
    }

    #[cfg(not(feature = "terminal"))]
    fn read_multiline(&mut self) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "multi-line input requires the 'terminal' feature",
        ))
    }
}

#[cfg(feature = "terminal")]
mod raw {
    use super::Key;
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
    use crossterm::terminal;
    use std::io;

    /// Keeps the terminal in raw mode while alive
    pub(super) struct RawMode;

    impl RawMode {
        pub(super) fn enter() -> io::Result<Self> {
            terminal::enable_raw_mode()?;
            Ok(Self)
        }
    }

    impl Drop for RawMode {
        fn drop(&mut self) {
            let _ = terminal::disable_raw_mode();
        }
    }

    pub(super) fn read_key() -> io::Result<Key> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Char('d') if ctrl => return Ok(Key::EndOfInput),
                KeyCode::Char('c') if ctrl => return Ok(Key::Interrupt),
                KeyCode::Char(c) if !ctrl => return Ok(Key::Char(c)),
                KeyCode::Enter => return Ok(Key::Enter),
                KeyCode::Backspace => return Ok(Key::Backspace),
                _ => {}
            }
        }
    }
}

/// Replays canned answers and records the output
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    lines: VecDeque<String>,
    keys: VecDeque<Key>,
    output: String,
}

impl Scripted {
    /// Answers handed out one per line read
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Keys handed out during multi-line capture
    pub fn with_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        self.keys.extend(keys);
        self
    }

    /// Everything written so far
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Console for Scripted {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn read_multiline(&mut self) -> io::Result<String> {
        let keys = &mut self.keys;
        let output = &mut self.output;
        collect_multiline(
            || Ok(keys.pop_front().unwrap_or(Key::EndOfInput)),
            |text| {
                output.push_str(text);
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }

    #[test]
    fn test_scripted_lines_then_closed() {
        let mut console = Scripted::new(["a", "b"]);
        assert_eq!(console.read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(console.remaining(), 1);
        assert_eq!(console.read_line().unwrap().as_deref(), Some("b"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn test_scripted_records_output() {
        let mut console = Scripted::default();
        console.write_str("> ").unwrap();
        console.write_str("done\n").unwrap();
        assert_eq!(console.output(), "> done\n");
    }

    #[test]
    fn test_multiline_until_end_of_input() {
        let mut keys = chars("ab");
        keys.push(Key::Enter);
        keys.extend(chars("c"));
        keys.push(Key::EndOfInput);
        keys.extend(chars("ignored"));

        let mut console = Scripted::default().with_keys(keys);
        assert_eq!(console.read_multiline().unwrap(), "ab\nc");
    }

    #[test]
    fn test_multiline_interrupt_keeps_buffer() {
        let mut keys = chars("xy");
        keys.push(Key::Interrupt);

        let mut console = Scripted::default().with_keys(keys);
        assert_eq!(console.read_multiline().unwrap(), "xy");
    }

    #[test]
    fn test_multiline_backspace() {
        let mut keys = chars("abc");
        keys.push(Key::Backspace);
        keys.push(Key::EndOfInput);

        let mut console = Scripted::default().with_keys(keys);
        assert_eq!(console.read_multiline().unwrap(), "ab");
        assert!(console.output().contains("\u{8} \u{8}"));
    }

    #[test]
    fn test_multiline_empty_when_interrupted_immediately() {
        let mut console = Scripted::default().with_keys([Key::Interrupt]);
        assert_eq!(console.read_multiline().unwrap(), "");
    }
}
