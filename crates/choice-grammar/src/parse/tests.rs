//! Parser coverage: tree shape, policy gates and representative rejections.

use rstest::{fixture, rstest};

use super::{ChoiceParser, MAX_NESTING};
use crate::config::{ChoiceConfig, ChoicePolicy, QualifierRegistry, QualifierSpec};
use crate::errors::{SeparatorErrorInfo, SyntaxError};
use crate::grouping::Operator;
use crate::references::ReferenceRegistry;
use crate::tree::{Primitive, Reference, Term};

#[fixture]
fn config() -> ChoiceConfig {
    let qualifiers = [
        QualifierSpec::new("QUALIFIED"),
        QualifierSpec::new("PC").negatable(),
        QualifierSpec::new("ANY").with_optional_body(),
        QualifierSpec::new("FEAT")
            .with_target_class("Feat")
            .without_type_filters()
            .without_all(),
    ]
    .into_iter()
    .try_fold(QualifierRegistry::new(), QualifierRegistry::with)
    .unwrap_or_else(|err| panic!("registry: {err}"));
    ChoiceConfig::new("SUB", "WeaponProf").with_qualifiers(qualifiers)
}

fn parse_root(config: &ChoiceConfig, value: &str) -> Vec<Term> {
    ChoiceParser::new(config)
        .parse(value)
        .unwrap_or_else(|err| panic!("parse `{value}`: {err}"))
        .root()
        .terms()
        .to_vec()
}

fn parse_error(config: &ChoiceConfig, value: &str) -> SyntaxError {
    match ChoiceParser::new(config).parse(value) {
        Ok(choice) => panic!("expected `{value}` to be rejected, got {choice:?}"),
        Err(err) => err,
    }
}

fn reference(name: &str) -> Term {
    Primitive::Reference(Reference::new("WeaponProf", name)).into()
}

#[rstest]
fn comma_binds_tighter_than_pipe(config: ChoiceConfig) {
    let terms = parse_root(&config, "SUB|TestWP1|TestWP2,TYPE=Foo");
    let [first, Term::Group(group)] = terms.as_slice() else {
        panic!("expected a reference then an AND group, got {terms:?}");
    };
    assert_eq!(*first, reference("TestWP1"));
    assert_eq!(group.operator(), Operator::And);
    assert_eq!(group.terms().len(), 2);
    assert_eq!(group.terms().first(), Some(&reference("TestWP2")));
}

#[rstest]
#[case("SUB|TestWP1.TestWP2", "TestWP1.TestWP2")]
#[case("SUB|TestWP1 (Test)", "TestWP1 (Test)")]
#[case("SUB|QUALIFIED", "QUALIFIED")]
#[case("SUB|ALLY", "ALLY")]
#[case("SUB|TYPEFoo", "TYPEFoo")]
fn plain_names_are_references(config: ChoiceConfig, #[case] value: &str, #[case] name: &str) {
    assert_eq!(parse_root(&config, value), [reference(name)]);
}

#[rstest]
fn qualifier_bodies_use_their_own_class(config: ChoiceConfig) {
    let choice = ChoiceParser::new(&config)
        .parse("SUB|FEAT[Power Attack]|TestWP1")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert_eq!(
        choice.references(),
        [
            &Reference::new("Feat", "Power Attack"),
            &Reference::new("WeaponProf", "TestWP1"),
        ]
    );
}

#[rstest]
#[case("SUB|PC[TestWP1]", false)]
#[case("SUB|!PC[TestWP1]", true)]
#[case("SUB|!PC[ALL]", true)]
fn negatable_qualifiers_record_negation(
    config: ChoiceConfig,
    #[case] value: &str,
    #[case] negated: bool,
) {
    let terms = parse_root(&config, value);
    let [Term::Primitive(Primitive::Qualifier(qualifier))] = terms.as_slice() else {
        panic!("expected a single qualifier, got {terms:?}");
    };
    assert_eq!(qualifier.name(), "PC");
    assert_eq!(qualifier.is_negated(), negated);
    assert!(qualifier.body().is_some());
}

#[rstest]
fn optional_body_qualifier_may_stand_alone(config: ChoiceConfig) {
    let terms = parse_root(&config, "SUB|ANY");
    let [Term::Primitive(Primitive::Qualifier(qualifier))] = terms.as_slice() else {
        panic!("expected a bare qualifier, got {terms:?}");
    };
    assert_eq!(qualifier.name(), "ANY");
    assert!(qualifier.body().is_none());
}

#[rstest]
#[case("", SyntaxError::EmptyInput)]
#[case("SUB", SyntaxError::MissingExpression("SUB".into()))]
#[case("SUB|", SyntaxError::MissingExpression("SUB|".into()))]
#[case("OTHER|TestWP1", SyntaxError::UnknownSubToken { expected: "SUB".into(), found: "OTHER".into() })]
#[case("SUB|,", SyntaxError::Separator(SeparatorErrorInfo::new("leading separator", ',', 0)))]
#[case("SUB|TestWP1|", SyntaxError::Separator(SeparatorErrorInfo::new("trailing separator", '|', 7)))]
#[case("SUB|TYPE=", SyntaxError::EmptyTypeList("TYPE=".into()))]
#[case("SUB|!TYPE=One.", SyntaxError::EmptyTypeName("!TYPE=One.".into()))]
#[case("SUB|TYPE=Foo[Bar]", SyntaxError::BracketInTypeName("TYPE=Foo[Bar]".into()))]
#[case("SUB|ALL|TestWP1", SyntaxError::AllCombined)]
#[case("SUB|TestWP1,ALL", SyntaxError::AllCombined)]
#[case("SUB|QUALIFIED[ALL|TestWP1]", SyntaxError::AllCombined)]
#[case("SUB|QUALIFIED[]", SyntaxError::EmptyQualifierBody("QUALIFIED".into()))]
#[case("SUB|QUALIFIED[|]", SyntaxError::Separator(SeparatorErrorInfo::new("leading separator", '|', 0)))]
#[case("SUB|QUALIFIED[,]", SyntaxError::Separator(SeparatorErrorInfo::new("leading separator", ',', 0)))]
#[case("SUB|QUALIFIED[", SyntaxError::UnbalancedBrackets { text: "QUALIFIED[".into(), position: 9 })]
#[case("SUB|QUALIFIED[TestWP2||TestWP1]]", SyntaxError::UnbalancedBrackets { text: "QUALIFIED[TestWP2||TestWP1]]".into(), position: 27 })]
#[case("SUB|QUALIFIED[TestWP1]TYPE=Foo", SyntaxError::DanglingText { name: "QUALIFIED".into(), trailing: "TYPE=Foo".into() })]
#[case("SUB|!QUALIFIED[TestWP1]", SyntaxError::NegationForbidden("QUALIFIED".into()))]
#[case("SUB|!QUALIFIED[ALL]", SyntaxError::NegationForbidden("QUALIFIED".into()))]
#[case("SUB|!ANY", SyntaxError::NegationForbidden("ANY".into()))]
#[case("SUB|NOPE[TestWP1]", SyntaxError::UnknownQualifier("NOPE".into()))]
#[case("SUB|!TestWP1", SyntaxError::NegatedReference("!TestWP1".into()))]
#[case("SUB|FEAT[TYPE=Foo]", SyntaxError::TypeForbidden("TYPE=Foo".into()))]
#[case("SUB|FEAT[ALL]", SyntaxError::AllForbidden)]
fn rejects_malformed_values(
    config: ChoiceConfig,
    #[case] value: &str,
    #[case] expected: SyntaxError,
) {
    assert_eq!(parse_error(&config, value), expected);
}

#[rstest]
fn type_policy_applies_to_the_top_level_only(config: ChoiceConfig) {
    let config = config.with_policy(ChoicePolicy::default().with_type_legal(false));
    assert_eq!(
        parse_error(&config, "SUB|TestWP1|!TYPE=Foo.Bar"),
        SyntaxError::TypeForbidden("!TYPE=Foo.Bar".into())
    );
    assert_eq!(parse_root(&config, "SUB|QUALIFIED[TYPE=Foo]").len(), 1);
}

#[rstest]
fn all_policy_applies_to_the_top_level_only(config: ChoiceConfig) {
    let config = config.with_policy(ChoicePolicy::default().with_all_legal(false));
    assert_eq!(parse_error(&config, "SUB|ALL"), SyntaxError::AllForbidden);
    assert_eq!(parse_root(&config, "SUB|QUALIFIED[ALL]").len(), 1);
}

#[rstest]
fn disabled_qualifiers_reject_brackets(config: ChoiceConfig) {
    let config = config.with_policy(ChoicePolicy::default().with_qualifiers(false));
    assert_eq!(
        parse_error(&config, "SUB|QUALIFIED[TestWP1]"),
        SyntaxError::QualifierForbidden("QUALIFIED".into())
    );
    assert_eq!(parse_root(&config, "SUB|ANY"), [reference("ANY")]);
}

#[rstest]
fn literal_policy_resolves_references_while_parsing(config: ChoiceConfig) {
    let config = config.with_policy(ChoicePolicy::default().with_requires_literal(true));
    let mut registry = ReferenceRegistry::new();
    registry.construct("WeaponProf", "TestWP1");

    let parser = ChoiceParser::new(&config).with_references(&registry);
    assert!(parser.parse("SUB|TestWP1|TYPE=Foo").is_ok());
    assert_eq!(
        parser.parse("SUB|TestWP1|TestWP2"),
        Err(SyntaxError::UnresolvedLiteral {
            class: "WeaponProf".into(),
            name: "TestWP2".into(),
        })
    );
    assert!(ChoiceParser::new(&config).parse("SUB|TestWP1").is_err());
}

#[rstest]
fn lenient_grouping_keeps_invalid_state(config: ChoiceConfig) {
    let parser = ChoiceParser::new(&config);
    let node = parser
        .grouping("ALL|TestWP1")
        .unwrap_or_else(|err| panic!("well-formed text: {err}"));
    assert!(!node.state().is_valid());
    assert!(!node.state().allows_list());
    assert!(parser.parse_expression("ALL|TestWP1").is_err());
    assert!(parser.grouping("TestWP1||TestWP2").is_err());
}

#[rstest]
fn sole_all_is_valid(config: ChoiceConfig) {
    let node = ChoiceParser::new(&config)
        .parse_expression("ALL")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(node.state().allows_all());
    assert!(node.state().is_valid());
}

#[rstest]
fn independent_parsers_build_equal_trees(config: ChoiceConfig) {
    let other = config.clone();
    let value = "SUB|QUALIFIED[TYPE=Bar,TYPE=Goo],QUALIFIED[TYPE=Foo,TYPE=Yea]|TestWP1";
    let first = ChoiceParser::new(&config).parse(value);
    let second = ChoiceParser::new(&other).parse(value);
    assert!(first.is_ok());
    assert_eq!(first, second);
}

fn nested(depth: usize) -> String {
    format!("SUB|{}TestWP1{}", "QUALIFIED[".repeat(depth), "]".repeat(depth))
}

#[rstest]
#[case(1)]
#[case(MAX_NESTING)]
fn accepts_nesting_up_to_the_limit(config: ChoiceConfig, #[case] depth: usize) {
    let choice = ChoiceParser::new(&config)
        .parse(&nested(depth))
        .unwrap_or_else(|err| panic!("depth {depth}: {err}"));
    assert_eq!(choice.references(), [&Reference::new("WeaponProf", "TestWP1")]);
}

#[rstest]
#[case(MAX_NESTING + 1)]
#[case(5000)]
fn rejects_nesting_past_the_limit(config: ChoiceConfig, #[case] depth: usize) {
    assert_eq!(
        parse_error(&config, &nested(depth)),
        SyntaxError::NestingTooDeep { limit: MAX_NESTING }
    );
    let expression = nested(depth).replacen("SUB|", "", 1);
    assert!(ChoiceParser::new(&config).grouping(&expression).is_err());
}
