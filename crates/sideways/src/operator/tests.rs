use super::*;
use crate::{path::FieldPath, value::Value};

fn red() -> Operator {
    Operator::equals("color", "red")
}

#[test]
fn excluding_sets_and_clears_annotation() {
    let op = red().excluding(["colors"]);
    assert_eq!(
        op.does_not_affect().map(|set| set.iter().collect::<Vec<_>>()),
        Some(vec!["colors"])
    );

    let cleared = op.excluding(Vec::<String>::new());
    assert!(cleared.does_not_affect().is_none());
}

#[test]
fn excluding_is_inert_on_unannotatable_leaves() {
    assert!(Operator::all_documents().excluding(["colors"]).does_not_affect().is_none());
    assert!(
        Operator::autocomplete("title", "sh")
            .excluding(["colors"])
            .does_not_affect()
            .is_none()
    );
}

#[test]
fn has_exclusion_finds_nested_annotations() {
    let plain: Operator = CompoundOperator::default()
        .must(red())
        .should(Operator::exists("size"))
        .into();
    assert!(!plain.has_exclusion());

    let nested: Operator = CompoundOperator::default()
        .must(red())
        .filter(Operator::embedded(
            "items",
            Operator::equals("items.color", "blue").excluding(["item_colors"]),
        ))
        .into();
    assert!(nested.has_exclusion());

    let on_compound: Operator = CompoundOperator::default()
        .must(red())
        .excluding(["colors"])
        .into();
    assert!(on_compound.has_exclusion());
}

#[test]
fn leaves_report_their_paths() {
    let range: Operator = RangeOperator::new("price")
        .path("sale_price")
        .gte(Value::Int(10))
        .into();

    assert_eq!(
        range.paths(),
        vec![&FieldPath::new("price"), &FieldPath::new("sale_price")]
    );
    assert_eq!(red().paths(), vec![&FieldPath::new("color")]);
    assert!(Operator::all_documents().paths().is_empty());
    assert!(Operator::embedded("items", red()).paths().is_empty());
    assert!(!Operator::embedded("items", red()).is_leaf());
}

#[test]
fn should_requirement_follows_minimum_and_siblings() {
    let only_should = CompoundOperator::default().should(red());
    assert!(only_should.should_is_required());

    let optional = CompoundOperator::default()
        .must(Operator::exists("size"))
        .should(red());
    assert!(!optional.should_is_required());

    let counted = optional.clone().minimum_should_match(1);
    assert!(counted.should_is_required());

    assert!(!CompoundOperator::default().must(red()).should_is_required());
}

#[test]
fn operators_walk_clauses_in_order() {
    let compound = CompoundOperator::default()
        .should(Operator::exists("d"))
        .must_not(Operator::exists("c"))
        .filter(Operator::exists("b"))
        .must(Operator::exists("a"));

    let paths: Vec<_> = compound
        .operators()
        .flat_map(Operator::paths)
        .map(FieldPath::as_str)
        .collect();

    assert_eq!(paths, vec!["a", "b", "c", "d"]);
    assert_eq!(compound.clause(CompoundClauseType::MustNot).len(), 1);
}

#[test]
fn bitand_builds_a_must_pair() {
    let both = red() & Operator::exists("size");

    let Operator::Compound(compound) = both else {
        panic!("bitand should build a compound");
    };
    assert_eq!(compound.must.len(), 2);
    assert!(compound.does_not_affect.is_none());
}

#[test]
fn rewrap_keeps_scope_and_annotation() {
    let Operator::EmbeddedDocument(embedded) =
        Operator::embedded("items", red()).excluding(["item_colors"])
    else {
        panic!("embedded constructor should build an embedded operator");
    };

    let Operator::EmbeddedDocument(rewrapped) = embedded.rewrap(Operator::exists("items.size"))
    else {
        panic!("rewrap should build an embedded operator");
    };
    assert_eq!(rewrapped.path, embedded.path);
    assert_eq!(rewrapped.does_not_affect, embedded.does_not_affect);
    assert_eq!(*rewrapped.operator, Operator::exists("items.size"));
}

#[test]
fn exclusion_union_and_single() {
    let colors = ExclusionSet::new(["colors"]);
    assert_eq!(colors.single(), Some("colors"));

    let both = colors.union(Some(&ExclusionSet::new(["sizes"])));
    assert_eq!(both.len(), 2);
    assert_eq!(both.single(), None);
    assert_eq!(colors.union(None), colors);
}

#[test]
fn serde_uses_camel_case_and_skips_empty_clauses() {
    let op: Operator = CompoundOperator::default()
        .must_not(red().excluding(["colors"]))
        .into();

    let json = serde_json::to_value(&op).expect("operator should serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "compound": {
                "mustNot": [
                    { "equals": { "path": "color", "value": { "Text": "red" }, "doesNotAffect": ["colors"] } }
                ],
                "minimumShouldMatch": 0
            }
        })
    );

    let back: Operator = serde_json::from_value(json).expect("operator should deserialize");
    assert_eq!(back, op);
    assert!(CompoundClauseType::Filter.is_conjunctive());
    assert!(!CompoundClauseType::Should.is_conjunctive());
}
