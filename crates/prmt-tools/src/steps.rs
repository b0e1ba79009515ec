//! Confirm-then-run for a file of shell steps

use anyhow::Result;
use colored::Colorize;
use prmt_core::command::{all_passed, run_sequence, ShellStep, Step, StepEvent, StepFile};
use prmt_core::{OptionKey, Prompter};
use std::path::Path;

const ALL_STEPS: &str = "all steps";

/// Load steps from `file`, let the operator pick where to start, then run
/// them in order. Returns `false` if a step failed.
pub async fn run(file: &Path, yes: bool) -> Result<bool> {
    let step_file = StepFile::load(file)?;
    cliclack::intro(format!("Running {}", file.display()).cyan().bold())?;

    if step_file.steps.is_empty() {
        cliclack::outro("Nothing to run")?;
        return Ok(true);
    }

    let steps = if yes {
        &step_file.steps[..]
    } else {
        let mut prompter = Prompter::new();
        let start = pick_start(&mut prompter, &step_file.steps)?;
        let steps = &step_file.steps[start..];

        let question = format!("Run {}?", describe(steps));
        if !prompter.confirm(question).default(true).interact()? {
            cliclack::outro_cancel("Nothing was run")?;
            return Ok(true);
        }
        steps
    };

    let mut spinner = None;
    let results = run_sequence(steps, |event| match event {
        StepEvent::Started(step) => {
            let bar = cliclack::spinner();
            bar.start(format!("{} ({})", step.name(), step.command.dimmed()));
            spinner = Some(bar);
        }
        StepEvent::Finished(_, result) => {
            if let Some(bar) = spinner.take() {
                if result.success {
                    bar.stop(format!("{} {}", "✓".green(), result.message));
                } else {
                    bar.error(format!("{} {}", "✗".red(), result.message));
                }
            }
        }
    })
    .await;
    let passed = all_passed(&results);

    if passed {
        cliclack::outro("All steps passed".green())?;
    } else {
        cliclack::outro_cancel("Stopped at the first failed step")?;
    }
    Ok(passed)
}

/// Offer "all steps" followed by each step name; returns the first index to run
fn pick_start<C: prmt_core::Console>(prompter: &mut Prompter<C>, steps: &[ShellStep]) -> Result<usize> {
    let mut options = vec![ALL_STEPS.to_string()];
    options.extend(steps.iter().map(|step| format!("from {}", step.name)));

    let (key, _) = prompter
        .select("Where should the run start?", options)
        .default(0)
        .interact()?;

    Ok(start_index(&key))
}

fn start_index(key: &OptionKey) -> usize {
    match key {
        OptionKey::Int(i) if *i > 0 => (*i - 1) as usize,
        _ => 0,
    }
}

fn describe(steps: &[ShellStep]) -> String {
    match steps {
        [only] => format!("step '{}'", only.name),
        _ => format!("{} steps", steps.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prmt_core::Scripted;

    fn steps() -> Vec<ShellStep> {
        vec![
            ShellStep::new("test", "true"),
            ShellStep::new("package", "true"),
            ShellStep::new("publish", "true"),
        ]
    }

    #[test]
    fn test_start_index() {
        assert_eq!(start_index(&OptionKey::Int(0)), 0);
        assert_eq!(start_index(&OptionKey::Int(2)), 1);
    }

    #[test]
    fn test_pick_start_default_runs_everything() {
        let mut prompter = Prompter::with_console(Scripted::new([""]));
        assert_eq!(pick_start(&mut prompter, &steps()).unwrap(), 0);
    }

    #[test]
    fn test_pick_start_from_step() {
        let mut prompter = Prompter::with_console(Scripted::new(["3"]));
        assert_eq!(pick_start(&mut prompter, &steps()).unwrap(), 2);
        assert!(prompter.console().output().contains("  3: from publish\n"));
    }

    #[test]
    fn test_describe() {
        let all = steps();
        assert_eq!(describe(&all[2..]), "step 'publish'");
        assert_eq!(describe(&all), "3 steps");
    }
}
