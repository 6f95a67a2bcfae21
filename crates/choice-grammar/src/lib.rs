//! Parser, validator and unparser for choice expressions.
//!
//! A choice expression tells a character-building tool which objects a user
//! may pick from: `WEAPONPROFICIENCY|Longsword|TYPE=Martial,!TYPE=Exotic`.
//! The crate turns such text into an immutable tree ([`ChoiceSet`]), checks
//! that its references exist once loading is complete
//! ([`ChoiceSet::validate`]) and prints it back in canonical form
//! ([`ChoiceSet::unparse`]).
//!
//! Parsing is all-or-nothing. [`ChooseToken::parse`] writes to the owning
//! [`ObjectRecord`] only after the whole value has been accepted.

mod choice_set;
mod config;
mod errors;
mod grouping;
mod owner;
mod parse;
mod references;
mod split;
mod token;
mod tree;
mod unparse;
mod validate;

pub use choice_set::ChoiceSet;
pub use config::{BodyRule, ChoiceConfig, ChoicePolicy, QualifierRegistry, QualifierSpec};
pub use errors::{RegistryError, SeparatorErrorInfo, SyntaxError, UnparseError};
pub use grouping::{GroupingNode, GroupingState, Operator};
pub use owner::{ObjectKey, ObjectRecord, TypeMismatch};
pub use parse::{ChoiceParser, MAX_NESTING};
pub use references::ReferenceRegistry;
pub use token::ChooseToken;
pub use tree::{Primitive, QualifierNode, Reference, Term, TypeFilter, TypeNames};
pub use validate::{ReferenceOracle, ValidationReport};
