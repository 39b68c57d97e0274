mod orchestrator;

use crate::{
    facet::{FacetDefinition, FacetDefinitions},
    operator::{CompoundOperator, Operator},
};

fn catalog() -> FacetDefinitions {
    [
        ("colors", "color"),
        ("sizes", "size"),
        ("brands", "brand"),
        ("item_colors", "items.color"),
    ]
    .into_iter()
    .try_fold(FacetDefinitions::new(), |defs, (name, path)| {
        defs.with(name, FacetDefinition::string(path))
    })
    .expect("test catalog should be valid")
}

fn color(value: &str) -> Operator {
    Operator::equals("color", value)
}

fn size(value: &str) -> Operator {
    Operator::equals("size", value)
}

fn brand(value: &str) -> Operator {
    Operator::equals("brand", value)
}

fn in_stock() -> Operator {
    Operator::exists("stock")
}

fn must(children: impl IntoIterator<Item = Operator>) -> CompoundOperator {
    children
        .into_iter()
        .fold(CompoundOperator::default(), |compound, child| compound.must(child))
}
