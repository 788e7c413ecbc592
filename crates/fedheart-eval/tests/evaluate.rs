use fedheart_core::{
    Column, ColumnKind, Dataset, Domain, DomainRegistry, MissingnessProfile, Seed, Value,
};
use fedheart_eval::{EvalError, EvaluateOptions, evaluate, render_report};
use fedheart_generate::{GenerateOptions, MockDataGenerator};

fn registry() -> DomainRegistry {
    let mut registry = DomainRegistry::new();
    registry
        .register("sex", Domain::int_range(0, 2))
        .expect("register sex");
    registry
        .register("chol", Domain::int_range(50, 600))
        .expect("register chol");
    registry
}

fn reference() -> Dataset {
    let rows = 100;
    let sex = (0..rows).map(|index| Value::Int(index % 2)).collect();
    let chol = (0..rows)
        .map(|index| {
            if index % 10 == 0 {
                Value::Missing
            } else {
                Value::Float(200.0 + index as f64)
            }
        })
        .collect();
    Dataset::new(vec![
        Column::new("sex", ColumnKind::Int, sex),
        Column::new("chol", ColumnKind::Float, chol),
    ])
    .expect("reference")
}

#[test]
fn generated_mock_passes_evaluation() {
    let reference = reference();
    let options = GenerateOptions::default();
    let generator = MockDataGenerator::new(registry(), options.clone()).expect("generator");
    let output = generator
        .generate(&reference, Seed::new(2024).expect("seed"))
        .expect("generate");

    let mut eval_options = EvaluateOptions::from(&options);
    eval_options.strict = true;
    let metrics = evaluate(
        &output.dataset,
        &reference.missingness(),
        &registry(),
        &eval_options,
    )
    .expect("evaluate");

    assert!(metrics.is_clean());
    assert!(metrics.rows.within_bounds);

    let chol = metrics.column("chol").expect("chol metrics");
    assert_eq!(chol.reference_missing, 10);
    assert_eq!(
        chol.missing_expected,
        output.report.feature("chol").expect("chol report").missing_requested as u64
    );
    assert!(chol.missing_found <= chol.missing_expected);

    let sex = metrics.column("sex").expect("sex metrics");
    assert_eq!(sex.missing_found, 0);
    assert_eq!(sex.kind, "int");
}

#[test]
fn domain_violations_are_reported() {
    let reference = reference();
    let mock = Dataset::new(vec![
        Column::new(
            "sex",
            ColumnKind::Int,
            (0..60).map(|index| Value::Int(index % 3)).collect(),
        ),
        Column::new(
            "chol",
            ColumnKind::Float,
            (0..60).map(|_| Value::Float(250.0)).collect(),
        ),
    ])
    .expect("mock");

    let options = EvaluateOptions {
        max_examples: 2,
        ..EvaluateOptions::default()
    };
    let metrics =
        evaluate(&mock, &reference.missingness(), &registry(), &options).expect("evaluate");

    let sex = metrics.column("sex").expect("sex metrics");
    assert_eq!(sex.domain_checked, 60);
    assert_eq!(sex.domain_violations, 20);
    assert_eq!(
        metrics
            .violations
            .iter()
            .filter(|violation| violation.code == "domain")
            .count(),
        2
    );
    assert!(!metrics.is_clean());

    let strict = EvaluateOptions {
        strict: true,
        ..EvaluateOptions::default()
    };
    let result = evaluate(&mock, &reference.missingness(), &registry(), &strict);
    assert!(matches!(result, Err(EvalError::Violations(20))));

    let rendered = render_report(&metrics, "Mock evaluation", 10);
    assert!(rendered.starts_with("# Mock evaluation"));
    assert!(rendered.contains("| sex | int | 20 | 0 | 0 | 0 |"));
}

#[test]
fn excess_missing_values_are_flagged() {
    let reference = reference();
    let mock = Dataset::new(vec![
        Column::new(
            "sex",
            ColumnKind::Int,
            (0..60)
                .map(|index| if index < 3 { Value::Missing } else { Value::Int(1) })
                .collect(),
        ),
        Column::new(
            "chol",
            ColumnKind::Float,
            (0..60).map(|_| Value::Float(250.0)).collect(),
        ),
    ])
    .expect("mock");

    let metrics = evaluate(
        &mock,
        &reference.missingness(),
        &registry(),
        &EvaluateOptions::default(),
    )
    .expect("evaluate");

    let sex = metrics.column("sex").expect("sex metrics");
    assert_eq!(sex.missing_expected, 0);
    assert!(!sex.missing_within_expected);
    assert_eq!(metrics.violation_count(), 1);
}

#[test]
fn columns_missing_from_the_profile_are_invalid() {
    let mock = Dataset::new(vec![Column::new(
        "sex",
        ColumnKind::Int,
        vec![Value::Int(0); 60],
    )])
    .expect("mock");
    let profile = MissingnessProfile {
        row_count: 10,
        features: Vec::new(),
    };

    let result = evaluate(&mock, &profile, &registry(), &EvaluateOptions::default());
    assert!(matches!(result, Err(EvalError::InvalidDataset(_))));
}
