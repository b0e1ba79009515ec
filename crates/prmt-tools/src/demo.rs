//! Interactive tour of every prompt

use anyhow::{Context, Result};
use colored::Colorize;
use prmt_core::{OptionSet, Prompter, Settings};
use std::path::Path;

pub fn run(settings: Option<&Path>, with_editor: bool) -> Result<()> {
    let mut prompter = Prompter::new();
    if let Some(path) = settings {
        let settings = Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        cliclack::log::info(format!("Using settings from {}", path.display()))?;
        prompter = prompter.with_settings(settings);
    }

    cliclack::intro("prmt demo".cyan().bold())?;

    strings(&mut prompter)?;
    if with_editor {
        editor(&mut prompter)?;
    }
    numbers_and_lists(&mut prompter)?;
    selections(&mut prompter)?;

    cliclack::outro("Done")?;
    Ok(())
}

fn report(label: &str, value: impl std::fmt::Debug) -> Result<()> {
    cliclack::log::info(format!("{} {:?}", label.dimmed(), value))?;
    Ok(())
}

fn strings(p: &mut Prompter) -> Result<()> {
    let s = p.string("Enter string (simple)").interact()?;
    report("string", s)?;

    let s = p.string("Enter string (default)").default("Joe").interact()?;
    report("string", s)?;

    let s = p
        .string("Enter string (short; default)")
        .default("James")
        .fmt(["{} ", "[{}] ", "> {}"])
        .interact()?;
    report("string", s)?;

    let s = p
        .string("Enter string (short; no empty)")
        .fmt(["{} ", "[{}] ", "> {}"])
        .blacklist([""])
        .interact()?;
    report("string", s)?;

    let s = p
        .string("Enter text (Ctrl-D to finish)")
        .multiline(true)
        .interact()?;
    report("multiline", s)?;
    Ok(())
}

fn editor(p: &mut Prompter) -> Result<()> {
    let s = p
        .string_from_editor("Enter string (short; default; in editor)")
        .default("hello")
        .fmt(["{} ", "[{}] ", "> {}"])
        .interact()?;
    report("editor", s)?;

    let s = p
        .string_from_editor("Write release notes")
        .instruction("Summarize the changes in this release.")
        .file_type("md")
        .interact()?;
    report("editor", s)?;
    Ok(())
}

fn numbers_and_lists(p: &mut Prompter) -> Result<()> {
    let n = p.integer("Enter integer").interact()?;
    report("integer", n)?;

    let n = p.integer("Enter integer (default)").default(42).interact()?;
    report("integer", n)?;

    let n = p
        .integer("Enter integer (no empty)")
        .required(true)
        .interact()?;
    report("integer", n)?;

    let b = p.confirm("Confirm [y|n]").interact()?;
    report("confirm", b)?;

    let b = p.confirm("Confirm [y|n] (default)").default(true).interact()?;
    report("confirm", b)?;

    let l = p
        .list_of_string("Enter values (comma separated)")
        .default(["lol", "nice"])
        .blacklist(["bad"])
        .interact()?;
    report("list", l)?;
    Ok(())
}

fn selections(p: &mut Prompter) -> Result<()> {
    let (k, v) = p.select("Select item", ["a", "b", "c"]).interact()?;
    report("select", (k, v))?;

    let (k, v) = p
        .select("Select item (default; custom)", ["a", "Enter custom string", "c"])
        .default(1)
        .custom_key(1)
        .interact()?;
    report("select", (k, v))?;

    let options = OptionSet::mapping([("foo", 0), ("bar", 1), ("baz", 2)]);
    let (k, v) = p
        .select("Select key (mapping; default)", options)
        .default("bar")
        .interact()?;
    report("select", (k, v))?;

    let (k, v) = p
        .select("Select fruit (sorted)", vec!["pear", "apple", "fig"])
        .sorted(true)
        .fmt(["{} ", "{}) {}", "", "[{}] ", "> {}"])
        .interact()?;
    report("select", (k, v))?;
    Ok(())
}
