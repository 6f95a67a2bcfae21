//! `TYPE=` filters.

use crate::errors::SyntaxError;
use crate::tree::{TypeFilter, TypeNames};

const TYPE_PREFIXES: [&str; 2] = ["TYPE=", "TYPE."];

/// Return the type list when `text` starts with a type-filter prefix.
pub(super) fn strip_type_prefix(text: &str) -> Option<&str> {
    TYPE_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
}

/// Build a filter from the text after the prefix.
///
/// `item` is the whole primitive as written and is only used in errors.
pub(super) fn parse_type_filter(
    item: &str,
    negated: bool,
    list: &str,
) -> Result<TypeFilter, SyntaxError> {
    if list.is_empty() {
        return Err(SyntaxError::EmptyTypeList(item.to_string()));
    }
    if list.contains(['[', ']']) {
        return Err(SyntaxError::BracketInTypeName(item.to_string()));
    }
    let names: Vec<&str> = list.split('.').collect();
    if names.iter().any(|name| name.is_empty()) {
        return Err(SyntaxError::EmptyTypeName(item.to_string()));
    }
    Ok(TypeFilter::new(negated, TypeNames::from_names(names)))
}
