//! Error types shared by the parsing, unparsing and configuration modules.

use std::fmt;
use thiserror::Error;

/// Additional context for separator-related parsing errors.
///
/// # Examples
/// ```
/// use choice_grammar::SeparatorErrorInfo;
/// let info = SeparatorErrorInfo::new("leading separator", '|', 0);
/// assert_eq!(info.separator, '|');
/// assert_eq!(info.position, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorErrorInfo {
    /// What went wrong.
    pub message: &'static str,
    /// The separator being split on.
    pub separator: char,
    /// Byte offset of the offending separator within the split text.
    pub position: usize,
}

impl SeparatorErrorInfo {
    /// Create a new error description for a separator failure.
    ///
    /// # Examples
    /// ```
    /// use choice_grammar::SeparatorErrorInfo;
    /// let info = SeparatorErrorInfo::new("empty segment", ',', 4);
    /// assert_eq!(info.message, "empty segment");
    /// ```
    #[must_use]
    pub fn new(message: &'static str, separator: char, position: usize) -> Self {
        Self {
            message,
            separator,
            position,
        }
    }
}

impl fmt::Display for SeparatorErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} `{}` at byte {} (zero-based)",
            self.message, self.separator, self.position
        )
    }
}

/// Reasons a choice expression is rejected while parsing.
///
/// Every variant is terminal: the parse produced nothing and nothing was
/// committed. Unresolved references are not syntax errors unless the policy
/// demands literal resolution; see [`SyntaxError::UnresolvedLiteral`].
///
/// # Examples
/// ```
/// use choice_grammar::{SeparatorErrorInfo, SyntaxError};
/// let info = SeparatorErrorInfo::new("trailing separator", '|', 7);
/// let err = SyntaxError::Separator(info.clone());
/// assert_eq!(err.to_string(), info.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The whole value was empty.
    #[error("choice value is empty")]
    EmptyInput,
    /// The value carried a sub-token name but no expression after it.
    #[error("choice value `{0}` has no expression after its sub-token")]
    MissingExpression(String),
    /// The sub-token did not match the one the token was configured for.
    #[error("unknown sub-token `{found}`, expected `{expected}`")]
    UnknownSubToken {
        /// Sub-token name the token accepts.
        expected: String,
        /// Sub-token name found in the value.
        found: String,
    },
    /// Leading, trailing or doubled `|` / `,` separators.
    #[error("{0}")]
    Separator(SeparatorErrorInfo),
    /// A `[` without its `]` or a `]` without its `[`.
    #[error("unbalanced brackets in `{text}` at byte {position} (zero-based)")]
    UnbalancedBrackets {
        /// The text being split when the imbalance was found.
        text: String,
        /// Byte offset of the offending bracket.
        position: usize,
    },
    /// `TYPE=` with nothing after it.
    #[error("type filter `{0}` names no types")]
    EmptyTypeList(String),
    /// A type list with a leading, trailing or doubled `.`.
    #[error("type filter `{0}` contains an empty type name")]
    EmptyTypeName(String),
    /// A type name containing a bracket.
    #[error("type filter `{0}` contains a bracket")]
    BracketInTypeName(String),
    /// A type filter where the scope does not permit one.
    #[error("type filter `{0}` is not permitted here")]
    TypeForbidden(String),
    /// `ALL` where the scope does not permit it.
    #[error("`ALL` is not permitted here")]
    AllForbidden,
    /// `ALL` next to any other choice in the same group.
    #[error("`ALL` cannot be combined with other choices")]
    AllCombined,
    /// A bracketed qualifier while qualifiers are disabled.
    #[error("qualifier `{0}` is not permitted here")]
    QualifierForbidden(String),
    /// A bracketed form whose name is not a registered qualifier.
    #[error("unknown qualifier `{0}`")]
    UnknownQualifier(String),
    /// `Name[]`.
    #[error("qualifier `{0}` has an empty body")]
    EmptyQualifierBody(String),
    /// Qualifier bodies nested deeper than the parser accepts.
    #[error("qualifiers are nested more than {limit} levels deep")]
    NestingTooDeep {
        /// Deepest nesting accepted.
        limit: usize,
    },
    /// Text after the closing bracket of a qualifier.
    #[error("unexpected text `{trailing}` after qualifier `{name}`")]
    DanglingText {
        /// Qualifier name.
        name: String,
        /// Text that followed the closing bracket.
        trailing: String,
    },
    /// `!Name[...]` for a qualifier that forbids negation.
    #[error("qualifier `{0}` cannot be negated")]
    NegationForbidden(String),
    /// `!` in front of something that is neither a type filter nor a
    /// qualifier.
    #[error("`{0}` cannot be negated")]
    NegatedReference(String),
    /// A reference that did not resolve while the policy requires literal
    /// resolution at parse time.
    #[error("`{name}` does not name a known {class}")]
    UnresolvedLiteral {
        /// Object class the reference was resolved against.
        class: String,
        /// Reference name.
        name: String,
    },
}

pub(crate) fn separator_error(
    message: &'static str,
    separator: char,
    position: usize,
) -> SyntaxError {
    SyntaxError::Separator(SeparatorErrorInfo::new(message, separator, position))
}

/// Errors surfaced while turning a stored choice set back into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnparseError {
    /// The stored tree carries an invalid grouping state, so no text would
    /// parse back into it.
    #[error("choice set `{0}` has an invalid grouping and cannot be unparsed")]
    InvalidGrouping(String),
    /// The owning object stored something other than a choice set under the
    /// choice key. This is a programming error in the collaborator, not bad
    /// input.
    #[error("contract violation: `{key}` holds `{found}`, expected a choice set")]
    ContractViolation {
        /// Key that was read.
        key: &'static str,
        /// Type name of the value found under the key.
        found: &'static str,
    },
}

/// Errors raised while assembling a qualifier registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Qualifier names must be plain identifiers.
    #[error("invalid qualifier name `{0}`")]
    InvalidName(String),
    /// The reserved words `ALL` and `TYPE` cannot name a qualifier.
    #[error("qualifier name `{0}` is reserved")]
    ReservedName(String),
    /// The same name was registered twice.
    #[error("qualifier `{0}` is already registered")]
    Duplicate(String),
}
