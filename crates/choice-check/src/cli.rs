//! Command dispatch for the `choice-check` entrypoint.

use std::io::{self, Write};
use std::path::PathBuf;

use choice_grammar::{ChoiceConfig, ChoiceParser, ChoiceSet, ReferenceRegistry};
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use tracing::{info, warn};

use crate::config::LogLevel;
use crate::input::{SourceLine, load_policy, load_references, read_expressions};
use crate::output::{
    TreeReport, write_canonical, write_rejection, write_summary, write_trees_json,
    write_unresolved,
};

/// Check, canonicalise or dump files of choice expressions.
#[derive(Parser, Debug)]
#[command(name = "choice-check", version, about)]
pub(crate) struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub(crate) log_level: Option<LogLevel>,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Parse and validate every expression.
    Check(InputArgs),
    /// Print the canonical form of every expression that parses.
    Unparse(InputArgs),
    /// Print the parsed trees as JSON.
    Tree(InputArgs),
}

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// JSON file describing the sub-token, target class, policy and
    /// qualifiers.
    #[arg(long)]
    pub policy: PathBuf,
    /// File of known objects, one `Class|Name` or `Name` per line. Validation
    /// is skipped without it.
    #[arg(long)]
    pub references: Option<PathBuf>,
    /// Files holding one expression per line.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Result of a run: how many expressions were examined and how many failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Summary {
    pub(crate) checked: usize,
    pub(crate) failed: usize,
}

impl Summary {
    pub(crate) fn is_clean(self) -> bool {
        self.failed == 0
    }
}

struct Inputs {
    config: ChoiceConfig,
    references: Option<ReferenceRegistry>,
    lines: Vec<SourceLine>,
}

impl Inputs {
    fn load(args: &InputArgs) -> Result<Self> {
        let config = load_policy(&args.policy)?;
        let references = args
            .references
            .as_deref()
            .map(|path| load_references(path, &config.target_class))
            .transpose()?;
        let lines = read_expressions(&args.files)?;
        info!(
            expressions = lines.len(),
            sub_token = %config.sub_token,
            "loaded inputs"
        );
        Ok(Self {
            config,
            references,
            lines,
        })
    }

    fn parser(&self) -> ChoiceParser<'_> {
        let parser = || ChoiceParser::new(&self.config);
        self.references
            .as_ref()
            .map_or_else(parser, |references| parser().with_references(references))
    }
}

pub(crate) fn run(command: &Commands) -> Result<Summary> {
    let mut stdout = io::stdout();
    let summary = match command {
        Commands::Check(args) => handle_check(&mut stdout, &Inputs::load(args)?)?,
        Commands::Unparse(args) => handle_unparse(&mut stdout, &Inputs::load(args)?)?,
        Commands::Tree(args) => handle_tree(&mut stdout, &Inputs::load(args)?)?,
    };
    stdout.flush().wrap_err("failed to flush output")?;
    Ok(summary)
}

fn handle_check(writer: &mut dyn Write, inputs: &Inputs) -> Result<Summary> {
    let parser = inputs.parser();
    let mut summary = Summary::default();
    for line in &inputs.lines {
        summary.checked += 1;
        let choice = match parser.parse(&line.text) {
            Ok(choice) => choice,
            Err(err) => {
                summary.failed += 1;
                write_rejection(writer, line, &err)?;
                continue;
            }
        };
        if let Some(references) = &inputs.references {
            let report = choice.unresolved(references);
            if !report.is_clean() {
                summary.failed += 1;
                write_unresolved(writer, line, &report)?;
            }
        }
    }
    write_summary(writer, summary.checked, summary.failed)?;
    Ok(summary)
}

/// Parse every line, logging and counting the ones that are rejected.
fn parsed<'i>(inputs: &'i Inputs, summary: &mut Summary) -> Vec<(&'i SourceLine, ChoiceSet)> {
    let parser = inputs.parser();
    let mut accepted = Vec::new();
    for line in &inputs.lines {
        summary.checked += 1;
        match parser.parse(&line.text) {
            Ok(choice) => accepted.push((line, choice)),
            Err(err) => {
                summary.failed += 1;
                warn!(
                    file = %line.path.display(),
                    line = line.number,
                    error = %err,
                    "skipping rejected expression"
                );
            }
        }
    }
    accepted
}

fn handle_unparse(writer: &mut dyn Write, inputs: &Inputs) -> Result<Summary> {
    let mut summary = Summary::default();
    for (_, choice) in parsed(inputs, &mut summary) {
        write_canonical(writer, &choice.unparse()?)?;
    }
    Ok(summary)
}

fn handle_tree(writer: &mut dyn Write, inputs: &Inputs) -> Result<Summary> {
    let mut summary = Summary::default();
    let accepted = parsed(inputs, &mut summary);
    let reports: Vec<_> = accepted
        .iter()
        .map(|(line, choice)| TreeReport {
            file: line.path.display().to_string(),
            line: line.number,
            choice,
        })
        .collect();
    write_trees_json(writer, &reports)?;
    Ok(summary)
}
