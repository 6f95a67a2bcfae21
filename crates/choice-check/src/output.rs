//! Helpers for rendering checker output.

use std::io::Write;

use choice_grammar::{ChoiceSet, SyntaxError, ValidationReport};
use eyre::{Context, Result};
use serde::Serialize;

use crate::input::SourceLine;

fn location(line: &SourceLine) -> String {
    format!("{}:{}", line.path.display(), line.number)
}

pub(crate) fn write_rejection(
    writer: &mut dyn Write,
    line: &SourceLine,
    error: &SyntaxError,
) -> Result<()> {
    writeln!(writer, "{}: rejected: {error}", location(line))
        .wrap_err_with(|| format!("failed to report rejection at {}", location(line)))
}

pub(crate) fn write_unresolved(
    writer: &mut dyn Write,
    line: &SourceLine,
    report: &ValidationReport,
) -> Result<()> {
    writeln!(writer, "{}: unresolved: {report}", location(line))
        .wrap_err_with(|| format!("failed to report unresolved references at {}", location(line)))
}

pub(crate) fn write_summary(writer: &mut dyn Write, checked: usize, failed: usize) -> Result<()> {
    writeln!(writer, "{checked} checked, {failed} failed").wrap_err("failed to write summary")
}

pub(crate) fn write_canonical(writer: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(writer, "{text}").wrap_err("failed to write canonical expression")
}

/// One parsed expression in the `tree` listing.
#[derive(Serialize)]
pub(crate) struct TreeReport<'a> {
    pub(crate) file: String,
    pub(crate) line: usize,
    pub(crate) choice: &'a ChoiceSet,
}

pub(crate) fn write_trees_json(writer: &mut dyn Write, reports: &[TreeReport<'_>]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, reports)
        .wrap_err("failed to serialize choice trees to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}
