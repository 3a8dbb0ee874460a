//! Fixture runner CLI: load → run → report
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;

use crate::runner::{run_cases, Outcome};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// run JSON validation fixtures against the type-pattern library
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// One or more fixture files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., default_value = "fixtures/*.json")]
    input: Vec<String>,

    /// only run cases whose name contains this substring
    #[arg(long)]
    filter: Option<String>,

    /// write a JSON report of every outcome to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// print passing cases too
    #[arg(long, default_value_t = false)]
    show_passing: bool,

    /// disable colored output
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// -v debug, -vv trace; RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Number of cases that did not behave as declared.
    pub fn run(&self) -> Result<usize> {
        if self.no_color {
            colored::control::set_override(false);
        }

        let mut outcomes = Vec::<Outcome>::new();
        for path in resolve_file_path_patterns(&self.input)? {
            let file = path.to_string_lossy().to_string();
            let mut fixture = crate::fixture::load(&path)?;
            if let Some(filter) = &self.filter {
                fixture.cases.retain(|case| case.name.contains(filter.as_str()));
            }
            tracing::info!(%file, cases = fixture.cases.len(), "loaded fixture");
            outcomes.extend(run_cases(&file, &fixture.cases));
        }

        for outcome in &outcomes {
            self.print(outcome);
        }

        let failed = outcomes.iter().filter(|o| !o.ok()).count();
        let summary = format!("{} cases, {} failed", outcomes.len(), failed);
        if failed == 0 {
            eprintln!("{}", summary.green().bold());
        } else {
            eprintln!("{}", summary.red().bold());
        }

        if let Some(out) = self.report.as_ref() {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let report = serde_json::to_string_pretty(&outcomes)?;
            std::fs::write(out, report)
                .with_context(|| format!("failed to write report {}", out.display()))?;
        }

        Ok(failed)
    }

    fn print(&self, outcome: &Outcome) {
        if outcome.ok() {
            if self.show_passing {
                println!("{} {} :: {}", "✅".green(), outcome.file.dimmed(), outcome.name);
            }
            return;
        }
        println!("{} {} :: {}", "❌".red(), outcome.file.dimmed(), outcome.name.bold());
        if outcome.malformed_pattern {
            println!("    {}", "pattern contains a malformed literal".yellow());
        }
        for problem in &outcome.problems {
            println!("    {}", problem.red());
        }
        if let Some(message) = outcome.validation.as_ref().and_then(|v| v.message.as_deref()) {
            for line in message.lines() {
                println!("    │ {line}");
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    out.sort();
    Ok(out)
}
