//! prmt-tools - Operator CLI built on prmt prompts

mod demo;
mod steps;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prmt_core::interrupt::INTERRUPT_EXIT_CODE;
use prmt_core::PromptError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const ABORT_MESSAGE: &str = "\n\nScript aborted by user.";

#[derive(Parser, Debug)]
#[command(name = "prmt-tools")]
#[command(about = "Interactive prompts for build and release scripts")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through every kind of prompt
    Demo(DemoArgs),
    /// Run the shell steps listed in a YAML file after confirmation
    Run(RunArgs),
}

#[derive(Parser, Debug, Default)]
pub struct DemoArgs {
    /// YAML file with format settings
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Include prompts that open $EDITOR
    #[arg(long)]
    pub editor: bool,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// YAML file listing the steps
    #[arg(short, long)]
    pub file: PathBuf,

    /// Run every step without asking (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Handle Ctrl+C gracefully
    prmt_core::interrupt::install(|| eprintln!("{}", ABORT_MESSAGE)).ok();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    let result = match args.command {
        Some(Command::Demo(demo_args)) => {
            demo::run(demo_args.settings.as_deref(), demo_args.editor).map(|_| true)
        }
        Some(Command::Run(run_args)) => steps::run(&run_args.file, run_args.yes).await,
        None => {
            // No subcommand provided, default to the demo
            let demo_args = DemoArgs::default();
            demo::run(demo_args.settings.as_deref(), demo_args.editor).map(|_| true)
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => match interrupt_exit_code(&e) {
            Some(code) => {
                eprintln!("{}", ABORT_MESSAGE);
                std::process::exit(code);
            }
            None => Err(e),
        },
    }
}

/// Exit status for an error caused by Ctrl-C, matching the signal handler's
fn interrupt_exit_code(error: &anyhow::Error) -> Option<i32> {
    match error.downcast_ref::<PromptError>() {
        Some(PromptError::Interrupted) => Some(INTERRUPT_EXIT_CODE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_args() {
        let args = Args::parse_from(["prmt-tools", "run", "--file", "steps.yaml", "--yes"]);
        match args.command {
            Some(Command::Run(run)) => {
                assert_eq!(run.file, PathBuf::from("steps.yaml"));
                assert!(run.yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let args = Args::parse_from(["prmt-tools"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_interrupted_prompt_exits_like_ctrl_c() {
        let error = anyhow::Error::new(PromptError::Interrupted);
        assert_eq!(interrupt_exit_code(&error), Some(130));
        assert_eq!(interrupt_exit_code(&error), Some(INTERRUPT_EXIT_CODE));
    }

    #[test]
    fn test_other_errors_are_not_interrupts() {
        assert_eq!(interrupt_exit_code(&anyhow::Error::new(PromptError::Closed)), None);
        assert_eq!(interrupt_exit_code(&anyhow::anyhow!("other")), None);
    }
}
