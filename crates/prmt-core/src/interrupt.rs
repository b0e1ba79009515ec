//! Ctrl-C handling
//!
//! Outside an editor session an interrupt ends the process right away (exit
//! status 130, cursor restored). While the external editor runs, the interrupt
//! is only recorded: the editor is left to exit on its own, the scratch file is
//! cleaned up and the prompt returns [`PromptError::Interrupted`].
//!
//! The handler is installed at most once per process, either by [`install`] or
//! by the first editor session, whichever comes first.
//!
//! [`PromptError::Interrupted`]: crate::PromptError::Interrupted

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

static EDITOR_SESSIONS: AtomicUsize = AtomicUsize::new(0);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

type ExitHook = Box<dyn Fn() + Send>;

static ON_EXIT: Mutex<Option<ExitHook>> = Mutex::new(None);

#[cfg(feature = "terminal")]
static HANDLER: std::sync::OnceLock<std::result::Result<(), String>> = std::sync::OnceLock::new();

/// Exit status used when the user interrupts a prompt
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Install the process-wide Ctrl-C handler.
///
/// `on_exit` runs right before the process exits on an interrupt that did not
/// happen during an editor session. Calling this again replaces `on_exit`.
#[cfg(feature = "terminal")]
pub fn install<F>(on_exit: F) -> crate::Result<()>
where
    F: Fn() + Send + 'static,
{
    let mut hook = ON_EXIT.lock().unwrap_or_else(|e| e.into_inner());
    *hook = Some(Box::new(on_exit));
    drop(hook);
    ensure_handler()
}

#[cfg(feature = "terminal")]
fn ensure_handler() -> crate::Result<()> {
    HANDLER
        .get_or_init(|| ctrlc::set_handler(on_interrupt).map_err(|e| e.to_string()))
        .clone()
        .map_err(|reason| std::io::Error::other(reason).into())
}

#[cfg(not(feature = "terminal"))]
fn ensure_handler() -> crate::Result<()> {
    Ok(())
}

/// Body of the Ctrl-C handler
#[cfg_attr(not(feature = "terminal"), allow(dead_code))]
pub(crate) fn on_interrupt() {
    if EDITOR_SESSIONS.load(Ordering::SeqCst) > 0 {
        INTERRUPTED.store(true, Ordering::SeqCst);
        return;
    }

    #[cfg(feature = "terminal")]
    let _ = ::console::Term::stderr().show_cursor();

    if let Some(on_exit) = ON_EXIT.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
        on_exit();
    }
    std::process::exit(INTERRUPT_EXIT_CODE);
}

/// Marks an external editor as running
#[derive(Debug)]
pub(crate) struct EditorSession(());

impl EditorSession {
    /// Also installs the Ctrl-C handler if nothing has yet, so the scratch
    /// file is removed even when the caller never called [`install`].
    pub(crate) fn begin() -> Self {
        if let Err(e) = ensure_handler() {
            debug!(error = %e, "Ctrl-C handler not installed");
        }
        if EDITOR_SESSIONS.fetch_add(1, Ordering::SeqCst) == 0 {
            INTERRUPTED.store(false, Ordering::SeqCst);
        }
        Self(())
    }

    /// Whether Ctrl-C was pressed since the session began
    pub(crate) fn interrupted(&self) -> bool {
        INTERRUPTED.load(Ordering::SeqCst)
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        EDITOR_SESSIONS.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Serializes tests that launch an editor, since an interrupt is seen by every
/// running session.
#[cfg(test)]
pub(crate) fn editor_test_guard() -> std::sync::MutexGuard<'static, ()> {
    static EDITOR_TESTS: Mutex<()> = Mutex::new(());
    EDITOR_TESTS.lock().unwrap_or_else(|e| e.into_inner())
}
