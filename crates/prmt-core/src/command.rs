//! External command steps
//!
//! Build and release scripts gather operator input with the prompts and then
//! run shell commands. Each command reports a [`CommandResult`]; the prompt
//! engine itself never runs any of them.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

/// Default time a step may run (5 minutes)
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(300);

/// Outcome of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
}

impl CommandResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Something that can be run and reports a [`CommandResult`]
#[allow(async_fn_in_trait)]
pub trait Step {
    fn name(&self) -> &str;

    async fn run(&self) -> CommandResult;
}

/// A shell command run through `sh -c`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellStep {
    pub name: String,
    pub command: String,
    /// Seconds before the command is killed
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ShellStep {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_STEP_TIMEOUT)
    }
}

impl Step for ShellStep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> CommandResult {
        debug!(step = %self.name, command = %self.command, "running step");

        let child = TokioCommand::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => return CommandResult::failed(format!("Failed to start '{}': {}", self.command, e)),
        };

        let output = match timeout(self.timeout(), child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return CommandResult::failed(format!("Failed to wait for '{}': {}", self.command, e))
            }
            Err(_) => {
                return CommandResult::failed(format!(
                    "'{}' timed out after {} seconds",
                    self.command,
                    self.timeout().as_secs()
                ))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            let message = last_line(&stdout).unwrap_or("done");
            CommandResult::ok(format!("{}: {}", self.name, message))
        } else {
            let reason = last_line(&stderr)
                .or_else(|| last_line(&stdout))
                .map(str::to_string)
                .unwrap_or_else(|| match output.status.code() {
                    Some(code) => format!("exit code {}", code),
                    None => "terminated by signal".to_string(),
                });
            CommandResult::failed(format!("{}: {}", self.name, reason))
        }
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rev().find(|line| !line.is_empty())
}

/// Progress reported by [`run_sequence`]
#[derive(Debug)]
pub enum StepEvent<'a, S> {
    Started(&'a S),
    Finished(&'a S, &'a CommandResult),
}

/// Run steps in order, stopping after the first failure.
///
/// `on_event` sees each step start and finish.
pub async fn run_sequence<S, F>(steps: &[S], mut on_event: F) -> Vec<CommandResult>
where
    S: Step,
    F: FnMut(StepEvent<'_, S>),
{
    let mut results = Vec::new();
    for step in steps {
        on_event(StepEvent::Started(step));
        let result = step.run().await;
        on_event(StepEvent::Finished(step, &result));
        let failed = !result.success;
        results.push(result);
        if failed {
            debug!(step = step.name(), "step failed, stopping sequence");
            break;
        }
    }
    results
}

/// Whether a sequence ran to the end without a failure
pub fn all_passed(results: &[CommandResult]) -> bool {
    results.iter().all(|result| result.success)
}

/// A YAML file listing shell steps
///
/// ```yaml
/// steps:
///   - name: test
///     command: cargo test
///   - name: package
///     command: cargo package
///     timeout_secs: 600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepFile {
    #[serde(default)]
    pub steps: Vec<ShellStep>,
}

impl StepFile {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).context("Failed to parse step file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_line() {
        assert_eq!(last_line("a\nb\n\n  "), Some("b"));
        assert_eq!(last_line(""), None);
    }

    #[test]
    fn test_step_file_from_yaml() {
        let file = StepFile::from_yaml_str(
            "steps:\n  - name: build\n    command: echo hi\n  - name: slow\n    command: sleep 1\n    timeout_secs: 2\n",
        )
        .unwrap();
        assert_eq!(file.steps.len(), 2);
        assert_eq!(file.steps[0].timeout(), DEFAULT_STEP_TIMEOUT);
        assert_eq!(file.steps[1].timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_step_file_rejects_unknown_fields() {
        assert!(StepFile::from_yaml_str("steps:\n  - name: x\n    cmd: y\n").is_err());
    }

    #[tokio::test]
    async fn test_successful_step() {
        let result = ShellStep::new("greet", "echo first; echo hello").run().await;
        assert_eq!(result, CommandResult::ok("greet: hello"));
    }

    #[tokio::test]
    async fn test_failed_step_reports_stderr() {
        let result = ShellStep::new("broken", "echo nope >&2; exit 2").run().await;
        assert!(!result.success);
        assert_eq!(result.message, "broken: nope");
    }

    #[tokio::test]
    async fn test_failed_step_without_output() {
        let result = ShellStep::new("quiet", "exit 4").run().await;
        assert_eq!(result.message, "quiet: exit code 4");
    }

    #[tokio::test]
    async fn test_step_timeout() {
        let mut step = ShellStep::new("slow", "sleep 5");
        step.timeout_secs = Some(0);
        let result = step.run().await;
        assert!(!result.success);
        assert!(result.message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_sequence_stops_at_first_failure() {
        let steps = vec![
            ShellStep::new("one", "true"),
            ShellStep::new("two", "false"),
            ShellStep::new("three", "true"),
        ];
        let mut events = Vec::new();
        let results = run_sequence(&steps, |event| match event {
            StepEvent::Started(step) => events.push(format!("start {}", step.name)),
            StepEvent::Finished(step, result) => {
                events.push(format!("finish {} {}", step.name, result.success))
            }
        })
        .await;

        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert!(!all_passed(&results));
        assert_eq!(
            events,
            vec!["start one", "finish one true", "start two", "finish two false"]
        );
    }

    #[tokio::test]
    async fn test_sequence_all_passed() {
        let steps = vec![ShellStep::new("one", "true"), ShellStep::new("two", "true")];
        let results = run_sequence(&steps, |_| {}).await;
        assert_eq!(results.len(), 2);
        assert!(all_passed(&results));
    }
}
