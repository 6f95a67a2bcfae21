//! Loading the policy, the known references and the expression files.

use std::fs;
use std::path::{Path, PathBuf};

use choice_grammar::{ChoiceConfig, ReferenceRegistry};

use crate::error::CheckError;

/// One expression read from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceLine {
    pub(crate) path: PathBuf,
    /// One-based line number.
    pub(crate) number: usize,
    pub(crate) text: String,
}

fn read(path: &Path) -> Result<String, CheckError> {
    fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Lines that carry content: not blank and not a `#` comment.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

pub(crate) fn load_policy(path: &Path) -> Result<ChoiceConfig, CheckError> {
    serde_json::from_str(&read(path)?).map_err(|source| CheckError::Policy {
        path: path.to_path_buf(),
        source,
    })
}

/// Read `Class|Name` lines; a line without `|` names an object of
/// `default_class`.
pub(crate) fn load_references(
    path: &Path,
    default_class: &str,
) -> Result<ReferenceRegistry, CheckError> {
    let text = read(path)?;
    let mut registry = ReferenceRegistry::new();
    for (number, line) in content_lines(&text) {
        let (class, name) = line.split_once('|').unwrap_or((default_class, line));
        if class.is_empty() || name.is_empty() {
            return Err(CheckError::Reference {
                path: path.to_path_buf(),
                line: number,
            });
        }
        registry.construct(class, name);
    }
    Ok(registry)
}

pub(crate) fn read_expressions(paths: &[PathBuf]) -> Result<Vec<SourceLine>, CheckError> {
    let mut lines = Vec::new();
    for path in paths {
        let text = read(path)?;
        lines.extend(content_lines(&text).map(|(number, line)| SourceLine {
            path: path.clone(),
            number,
            text: line.to_string(),
        }));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use choice_grammar::ReferenceOracle;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap_or_else(|err| panic!("temp file: {err}"));
        file.write_all(contents.as_bytes())
            .unwrap_or_else(|err| panic!("write temp file: {err}"));
        file
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let lines: Vec<_> = content_lines("# heading\n\nSUB|A\n  \nSUB|B\n").collect();
        assert_eq!(lines, [(3, "SUB|A"), (5, "SUB|B")]);
    }

    #[test]
    fn references_default_to_the_target_class() {
        let file = file_with("Longsword\nFeat|Power Attack\n# Dagger\n");
        let registry = load_references(file.path(), "WeaponProf")
            .unwrap_or_else(|err| panic!("references: {err}"));
        assert!(registry.exists("WeaponProf", "Longsword"));
        assert!(registry.exists("Feat", "Power Attack"));
        assert!(!registry.exists("WeaponProf", "Dagger"));
    }

    #[test]
    fn rejects_reference_lines_without_a_name() {
        let file = file_with("Longsword\nFeat|\n");
        let Err(err) = load_references(file.path(), "WeaponProf") else {
            panic!("empty name should be rejected");
        };
        assert!(matches!(err, CheckError::Reference { line: 2, .. }));
    }

    #[test]
    fn reports_malformed_policy_files() {
        let file = file_with("{ \"sub_token\": 3 }");
        let Err(err) = load_policy(file.path()) else {
            panic!("malformed policy should be rejected");
        };
        assert!(matches!(err, CheckError::Policy { .. }));
    }

    #[test]
    fn numbers_expressions_per_file() {
        let first = file_with("SUB|A\n\nSUB|B\n");
        let second = file_with("# only a comment\nSUB|C\n");
        let lines = read_expressions(&[first.path().to_path_buf(), second.path().to_path_buf()])
            .unwrap_or_else(|err| panic!("expressions: {err}"));
        let numbers: Vec<_> = lines.iter().map(|line| line.number).collect();
        assert_eq!(numbers, [1, 3, 2]);
        assert_eq!(lines.last().map(|line| line.text.as_str()), Some("SUB|C"));
    }
}
