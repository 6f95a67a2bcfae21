//! Root object produced by a successful parse.

use crate::grouping::GroupingNode;
use crate::tree::{Primitive, Reference, Term};

#[cfg(feature = "diagnostics")]
use serde::Serialize;

/// A parsed choice expression together with its sub-token and title.
///
/// Two choice sets built from the same text under equal configurations are
/// equal, whichever reference registry they were parsed against.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(Serialize))]
pub struct ChoiceSet {
    sub_token: String,
    title: String,
    root: GroupingNode,
}

impl ChoiceSet {
    /// Wrap a parsed root node.
    #[must_use]
    pub fn new(sub_token: impl Into<String>, title: impl Into<String>, root: GroupingNode) -> Self {
        Self {
            sub_token: sub_token.into(),
            title: title.into(),
            root,
        }
    }

    /// Sub-token name the value was written with.
    #[must_use]
    pub fn sub_token(&self) -> &str {
        &self.sub_token
    }

    /// Title taken from the configuration.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Top-level OR node.
    #[must_use]
    pub fn root(&self) -> &GroupingNode {
        &self.root
    }

    /// Every reference in the tree, in the order written, qualifier bodies
    /// included.
    #[must_use]
    pub fn references(&self) -> Vec<&Reference> {
        let mut found = Vec::new();
        collect_references(&self.root, &mut found);
        found
    }
}

fn collect_references<'t>(node: &'t GroupingNode, found: &mut Vec<&'t Reference>) {
    for term in node.terms() {
        match term {
            Term::Group(group) => collect_references(group, found),
            Term::Primitive(Primitive::Reference(reference)) => found.push(reference),
            Term::Primitive(Primitive::Qualifier(qualifier)) => {
                if let Some(body) = qualifier.body() {
                    collect_references(body, found);
                }
            }
            Term::Primitive(Primitive::TypeFilter(_) | Primitive::All) => {}
        }
    }
}

#[cfg(feature = "diagnostics")]
impl ChoiceSet {
    /// Pretty-printed JSON rendering of the tree, grouping states included.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `serde_json` while serialising.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChoiceConfig, QualifierRegistry, QualifierSpec};
    use crate::parse::ChoiceParser;

    fn parse(value: &str) -> ChoiceSet {
        let qualifiers = QualifierRegistry::new()
            .with(QualifierSpec::new("QUALIFIED"))
            .unwrap_or_else(|err| panic!("registry: {err}"));
        let config = ChoiceConfig::new("SUB", "WeaponProf")
            .with_title("Weapon choice")
            .with_qualifiers(qualifiers);
        ChoiceParser::new(&config)
            .parse(value)
            .unwrap_or_else(|err| panic!("parse `{value}`: {err}"))
    }

    #[test]
    fn carries_sub_token_and_title() {
        let choice = parse("SUB|TestWP1");
        assert_eq!(choice.sub_token(), "SUB");
        assert_eq!(choice.title(), "Weapon choice");
    }

    #[test]
    fn collects_references_depth_first() {
        let choice = parse("SUB|A,QUALIFIED[B|C,TYPE=Foo]");
        let names: Vec<_> = choice.references().into_iter().map(Reference::name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn renders_json_with_states() {
        let choice = parse("SUB|TestWP1,!TYPE=Foo");
        let json = choice
            .to_json()
            .unwrap_or_else(|err| panic!("serialise: {err}"));
        let value: serde_json::Value =
            serde_json::from_str(&json).unwrap_or_else(|err| panic!("reparse: {err}"));
        assert_eq!(
            value.pointer("/root/state/is_valid"),
            Some(&serde_json::Value::Bool(true))
        );
        assert_eq!(
            value.pointer("/root/terms/0/terms/1/kind"),
            Some(&serde_json::Value::String("type_filter".into()))
        );
    }
}
