use super::*;
use crate::{
    config::DecomposerConfig,
    error::ConfigError,
    operator::{CompoundOperator, Operator},
    sideways::{
        Decomposer, DrillSidewaysInfo, OptimizationStatus, build_drill_sideways_info,
        facet_count_operator,
    },
};

#[test]
fn status_of_missing_info_is_non_drill_sideways() {
    assert_eq!(
        OptimizationStatus::of(None),
        OptimizationStatus::NonDrillSideways
    );

    let root = color("red").excluding(["colors"]);
    let info = build_drill_sideways_info(&root, &catalog());
    assert_eq!(
        OptimizationStatus::of(info.as_ref()),
        OptimizationStatus::Optimizable
    );
}

#[test]
fn exact_scan_agrees_with_shallow_check() {
    let exact = Decomposer::new(DecomposerConfig {
        exact_exclusion_scan: true,
        ..DecomposerConfig::default()
    })
    .expect("config should be valid");
    let shallow = Decomposer::default();

    let plain: Operator = must([color("red"), in_stock()]).into();
    let annotated: Operator = must([color("red").excluding(["colors"]), in_stock()]).into();

    for root in [&plain, &annotated, &in_stock()] {
        assert_eq!(
            exact.decompose(root, &catalog()),
            shallow.decompose(root, &catalog())
        );
    }
    assert!(exact.decompose(&plain, &catalog()).is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let err = Decomposer::new(DecomposerConfig {
        parallel_facet_threshold: 0,
        ..DecomposerConfig::default()
    })
    .expect_err("zero threshold should be rejected");

    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn count_operator_without_info_is_the_query() {
    let root: Operator = must([color("red"), in_stock()]).into();

    assert_eq!(
        facet_count_operator(&root, None, "colors"),
        Some(root.clone())
    );
}

#[test]
fn optimized_sideways_operator_adds_pre_filter() {
    let red = color("red").excluding(["colors"]);
    let root: Operator = must([red.clone(), in_stock()]).into();
    let info = build_drill_sideways_info(&root, &catalog()).expect("query has exclusions");

    let pre_filter: Operator = must([in_stock()]).into();
    assert_eq!(
        info.sideways_operator("colors"),
        Some(pre_filter.clone())
    );
    assert_eq!(
        facet_count_operator(&root, Some(&info), "sizes"),
        Some(pre_filter & red)
    );
}

#[test]
fn generic_sideways_operator_is_the_rebuilt_query() {
    let root: Operator = CompoundOperator::default()
        .should(color("red").excluding(["colors"]))
        .should(size("M"))
        .into();
    let info = build_drill_sideways_info(&root, &catalog()).expect("query has exclusions");

    assert_eq!(info.optimization_status(), OptimizationStatus::Generic);
    assert_eq!(
        info.sideways_operator("sizes"),
        info.facet_operator("sizes").cloned()
    );
    assert_eq!(info.sideways_operator("sizes"), Some(root));
}

#[test]
fn info_serializes_with_status_and_operators() {
    let root = color("red").excluding(["colors"]);
    let info = build_drill_sideways_info(&root, &catalog()).expect("query has exclusions");

    let json = serde_json::to_value(&info).expect("info should serialize");
    assert_eq!(json["optimizationStatus"], "OPTIMIZABLE");
    assert!(json["facetOperators"]["colors"].is_null());
    assert!(json.get("preFilter").is_none());

    let back: DrillSidewaysInfo = serde_json::from_value(json).expect("info should deserialize");
    assert_eq!(back, info);
}

#[test]
fn empty_facet_request_still_reports_exclusions() {
    let root: Operator = must([color("red").excluding(["colors"]), in_stock()]).into();

    let info = build_drill_sideways_info(&root, &FacetDefinitions::new())
        .expect("query has exclusions");

    assert_eq!(info.optimization_status(), OptimizationStatus::Generic);
    assert!(info.facet_operators().is_empty());
}
