//! Reference evaluator used to check that rebuilt operators select the
//! same documents. Scoring is ignored; only matching is modeled.

use crate::{
    operator::{CompoundOperator, Operator, RangeBound},
    value::Value,
};
use std::{cmp::Ordering, collections::BTreeMap};

///
/// Document
///

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Document {
    pub(crate) fields: BTreeMap<String, Value>,
    pub(crate) embedded: BTreeMap<String, Vec<Self>>,
}

impl Document {
    pub(crate) fn with_field(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(path.to_string(), value.into());
        self
    }

    pub(crate) fn with_embedded(mut self, path: &str, documents: Vec<Self>) -> Self {
        self.embedded.insert(path.to_string(), documents);
        self
    }

    fn field(&self, path: &str) -> Option<&Value> {
        self.fields.get(path)
    }
}

/// Whether `operator` selects `document`.
pub(crate) fn eval(operator: &Operator, document: &Document) -> bool {
    match operator {
        Operator::Equals(op) => document.field(op.path.as_str()) == Some(&op.value),
        Operator::In(op) => op.paths.iter().any(|path| {
            document
                .field(path.as_str())
                .is_some_and(|value| op.values.contains(value))
        }),
        Operator::Range(op) => op.paths.iter().any(|path| {
            document.field(path.as_str()).is_some_and(|value| {
                within(value, op.lower.as_ref(), Ordering::Greater)
                    && within(value, op.upper.as_ref(), Ordering::Less)
            })
        }),
        Operator::Text(op) => op.paths.iter().any(|path| {
            document
                .field(path.as_str())
                .and_then(Value::as_text)
                .is_some_and(|text| text.contains(op.query.as_str()))
        }),
        Operator::Exists(op) => document.field(op.path.as_str()).is_some(),
        Operator::AllDocuments => true,
        Operator::Autocomplete(op) => document
            .field(op.path.as_str())
            .and_then(Value::as_text)
            .is_some_and(|text| text.starts_with(op.query.as_str())),
        Operator::Compound(compound) => eval_compound(compound, document),
        Operator::EmbeddedDocument(op) => document
            .embedded
            .get(op.path.as_str())
            .is_some_and(|children| children.iter().any(|child| eval(&op.operator, child))),
    }
}

/// `None` stands for "no filter".
pub(crate) fn eval_optional(operator: Option<&Operator>, document: &Document) -> bool {
    operator.is_none_or(|operator| eval(operator, document))
}

fn eval_compound(compound: &CompoundOperator, document: &Document) -> bool {
    let all = |children: &[Operator]| children.iter().all(|child| eval(child, document));

    if !all(&compound.must) || !all(&compound.filter) {
        return false;
    }
    if compound.must_not.iter().any(|child| eval(child, document)) {
        return false;
    }

    let required = if compound.minimum_should_match > 0 {
        compound.minimum_should_match
    } else {
        usize::from(compound.should_is_required())
    };
    let matched = compound
        .should
        .iter()
        .filter(|child| eval(child, document))
        .count();

    matched >= required
}

fn within(value: &Value, bound: Option<&RangeBound>, side: Ordering) -> bool {
    let Some(bound) = bound else {
        return true;
    };

    match value.partial_cmp_same_kind(&bound.value) {
        Some(Ordering::Equal) => bound.inclusive,
        Some(ordering) => ordering == side,
        None => false,
    }
}

/// Every leaf under `operator`, including those inside embedded scopes.
pub(crate) fn leaves(operator: &Operator) -> Vec<&Operator> {
    match operator {
        Operator::Compound(compound) => compound.operators().flat_map(leaves).collect(),
        Operator::EmbeddedDocument(embedded) => leaves(&embedded.operator),
        leaf => vec![leaf],
    }
}
