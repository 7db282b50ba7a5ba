//! Integration test: artifact loading and train/serve feature consistency
//! Exercises the predictor directly, without the HTTP layer

use std::path::Path;

use evserve::prelude::*;
use serde_json::json;

fn write_artifacts(dir: &Path) {
    // Two numeric fields and two categorical fields, with a multi-category
    // one-hot expansion like the real EV schema
    std::fs::write(
        dir.join("schema.json"),
        r#"{
            "numeric_cols": ["PriceEuro", "Range_Km"],
            "categorical_cols": ["BodyStyle", "PowerTrain"],
            "categories": {
                "BodyStyle": ["Sedan", "SUV", "Hatchback"],
                "PowerTrain": ["AWD", "RWD"]
            },
            "final_columns": [
                "PriceEuro", "Range_Km",
                "BodyStyle_SUV", "BodyStyle_Hatchback",
                "PowerTrain_RWD"
            ]
        }"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("scaler.json"),
        r#"{"params": [
            {"mean": 50000.0, "scale": 10000.0},
            {"mean": 400.0, "scale": 100.0}
        ]}"#,
    )
    .unwrap();
    // Expensive or long-range cars are segment "F", the rest "C"
    std::fs::write(
        dir.join("model.json"),
        r#"{
            "classes": ["C", "F"],
            "n_features": 5,
            "trees": [
                {"kind": "split", "feature": 0, "threshold": 1.0,
                 "left": {"kind": "leaf", "class": 0},
                 "right": {"kind": "leaf", "class": 1}},
                {"kind": "split", "feature": 1, "threshold": 0.5,
                 "left": {"kind": "leaf", "class": 0},
                 "right": {"kind": "leaf", "class": 1}},
                {"kind": "split", "feature": 0, "threshold": 0.5,
                 "left": {"kind": "leaf", "class": 0},
                 "right": {"kind": "leaf", "class": 1}}
            ]
        }"#,
    )
    .unwrap();
}

#[test]
fn test_predictor_full_flow() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();

    // 75k euro, 480km range: all trees vote F
    let luxury = json!({
        "PriceEuro": 75000,
        "Range_Km": 480,
        "BodyStyle": "SUV",
        "PowerTrain": "AWD"
    });
    assert_eq!(
        predictor.predict_segment(luxury.as_object().unwrap()).unwrap(),
        "F"
    );

    // 35k euro, 300km range: all trees vote C
    let budget = json!({
        "PriceEuro": 35000,
        "Range_Km": 300,
        "BodyStyle": "Hatchback",
        "PowerTrain": "FWD"
    });
    assert_eq!(
        predictor.predict_segment(budget.as_object().unwrap()).unwrap(),
        "C"
    );
}

#[test]
fn test_sparse_and_malformed_input_still_predicts() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();

    // Nothing usable in the record: every column imputed, vector still full
    // shape, prediction still produced
    let junk = json!({
        "PriceEuro": "call me",
        "BodyStyle": "Spaceship",
        "Unrelated": [1, 2, 3]
    });
    let label = predictor.predict_segment(junk.as_object().unwrap()).unwrap();
    assert_eq!(label, "C");

    let empty = json!({});
    let label = predictor.predict_segment(empty.as_object().unwrap()).unwrap();
    assert_eq!(label, "C");
}

#[test]
fn test_aligned_vector_matches_training_layout() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    let predictor = Predictor::load(dir.path()).unwrap();
    let schema = predictor.schema();

    assert_eq!(schema.width(), 5);
    assert_eq!(schema.retained_categories("BodyStyle"), &["SUV", "Hatchback"]);

    let scaler = StandardScaler::new(vec![
        ScalerParams { mean: 50000.0, scale: 10000.0 },
        ScalerParams { mean: 400.0, scale: 100.0 },
    ])
    .unwrap();
    let aligner = FeatureAligner::new(schema.clone(), Box::new(scaler));

    let input = json!({
        "PriceEuro": 60000,
        "Range_Km": 500,
        "BodyStyle": "Hatchback",
        "PowerTrain": "RWD"
    });
    let vector = aligner.align(input.as_object().unwrap()).unwrap();
    assert_eq!(vector.to_vec(), vec![1.0, 1.0, 0.0, 1.0, 1.0]);
}
