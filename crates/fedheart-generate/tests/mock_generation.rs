use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fedheart_core::{
    Column, ColumnKind, Dataset, Domain, DomainRegistry, Seed, Value, heart, scale_missing,
};
use fedheart_generate::{
    GenerateOptions, GenerationError, MissingSampling, MockDataGenerator, generate_mock,
};

/// Reference dataset shaped like the Cleveland file: 300 rows, `chol`
/// missing 4 values, `ca` missing 6, everything else complete.
fn reference_fixture() -> Dataset {
    let rows = 300;
    let registry = DomainRegistry::heart_disease();
    let columns = heart::columns()
        .into_iter()
        .map(|name| {
            let domain = registry.domain(name).expect("registered domain");
            let missing = match name {
                "chol" => 4,
                "ca" => 6,
                _ => 0,
            };
            let mut values: Vec<Value> = (0..rows)
                .map(|index| {
                    domain
                        .value_at(index % domain.len())
                        .expect("value in domain")
                })
                .collect();
            let mut kind = domain.kind();
            if missing > 0 {
                kind = ColumnKind::Float;
                values = values.into_iter().map(Value::widen).collect();
                for index in 0..missing {
                    values[index * 37] = Value::Missing;
                }
            }
            Column::new(name, kind, values)
        })
        .collect();
    Dataset::new(columns).expect("reference dataset")
}

fn generator(sampling: MissingSampling) -> MockDataGenerator {
    MockDataGenerator::heart_disease(GenerateOptions {
        sampling,
        ..GenerateOptions::default()
    })
    .expect("generator")
}

#[test]
fn generation_is_deterministic_per_seed() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithReplacement);
    let seed = Seed::new(12345).expect("seed");

    let first = generator.generate(&reference, seed).expect("first run");
    let second = generator.generate(&reference, seed).expect("second run");

    assert_eq!(first.dataset, second.dataset);
    assert_eq!(first.report, second.report);
    assert_eq!(first.report.seed, Some(12345));
}

#[test]
fn different_seeds_give_different_datasets() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithReplacement);

    let a = generator
        .generate(&reference, Seed::new(1).expect("seed"))
        .expect("run a");
    let b = generator
        .generate(&reference, Seed::new(2).expect("seed"))
        .expect("run b");

    assert_ne!(a.dataset, b.dataset);
}

#[test]
fn schema_matches_the_reference() {
    let reference = reference_fixture();
    let output = generator(MissingSampling::WithReplacement)
        .generate(&reference, Seed::default())
        .expect("generate");

    assert_eq!(output.dataset.feature_names(), reference.feature_names());
}

#[test]
fn row_count_stays_within_bounds() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithReplacement);

    for seed in 0..40 {
        let output = generator
            .generate(&reference, Seed::new(seed).expect("seed"))
            .expect("generate");
        let rows = output.dataset.row_count();
        assert!((50..300).contains(&rows), "seed {seed} produced {rows} rows");
        assert_eq!(output.report.rows, rows);
    }
}

#[test]
fn custom_row_bounds_are_honored() {
    let reference = reference_fixture();
    let generator = MockDataGenerator::heart_disease(GenerateOptions {
        min_rows: 10,
        max_rows: 12,
        sampling: MissingSampling::WithReplacement,
    })
    .expect("generator");

    for seed in 0..20 {
        let output = generator
            .generate(&reference, Seed::new(seed).expect("seed"))
            .expect("generate");
        assert!((10..12).contains(&output.dataset.row_count()));
    }
}

#[test]
fn values_stay_inside_registered_domains() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithReplacement);
    let registry = DomainRegistry::heart_disease();

    for seed in 0..10 {
        let output = generator
            .generate(&reference, Seed::new(seed).expect("seed"))
            .expect("generate");
        for column in output.dataset.columns() {
            let domain = registry.domain(&column.name).expect("domain");
            for value in column.values.iter().filter(|value| !value.is_missing()) {
                assert!(domain.contains(value), "{} produced {value}", column.name);
            }
        }
    }
}

#[test]
fn sex_column_is_binary() {
    let reference = reference_fixture();
    let output = generator(MissingSampling::WithReplacement)
        .generate(&reference, Seed::default())
        .expect("generate");

    let sex = output.dataset.column("sex").expect("sex column");
    assert!(
        sex.values
            .iter()
            .all(|value| matches!(value, Value::Int(0) | Value::Int(1) | Value::Missing))
    );
}

#[test]
fn missing_counts_scale_with_row_count() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithReplacement);

    for seed in 0..25 {
        let output = generator
            .generate(&reference, Seed::new(seed).expect("seed"))
            .expect("generate");
        let rows = output.dataset.row_count();

        let chol = output.report.feature("chol").expect("chol report");
        assert_eq!(chol.reference_missing, 4);
        assert_eq!(chol.missing_requested, scale_missing(4, 300, rows));
        assert!(chol.missing_realized <= chol.missing_requested);
        assert_eq!(
            chol.missing_realized,
            output.dataset.column("chol").expect("chol").missing_count()
        );

        let ca = output.report.feature("ca").expect("ca report");
        assert_eq!(ca.missing_requested, scale_missing(6, 300, rows));
        assert!(ca.missing_realized <= ca.missing_requested);
    }
}

#[test]
fn sampling_without_replacement_is_exact() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithoutReplacement);

    for seed in 0..25 {
        let output = generator
            .generate(&reference, Seed::new(seed).expect("seed"))
            .expect("generate");
        for feature in &output.report.features {
            assert_eq!(feature.missing_realized, feature.missing_requested);
        }
        assert_eq!(output.report.collisions(), 0);
    }
}

#[test]
fn complete_features_are_not_widened() {
    let reference = reference_fixture();
    let output = generator(MissingSampling::WithReplacement)
        .generate(&reference, Seed::default())
        .expect("generate");

    let age = output.dataset.column("age").expect("age column");
    assert_eq!(age.kind, ColumnKind::Int);
    assert_eq!(age.missing_count(), 0);
    assert!(!output.report.feature("age").expect("age report").widened);

    let chol = output.dataset.column("chol").expect("chol column");
    assert_eq!(chol.kind, ColumnKind::Float);
    assert!(output.report.feature("chol").expect("chol report").widened);
    assert!(
        chol.values
            .iter()
            .all(|value| matches!(value, Value::Float(_) | Value::Missing))
    );
}

#[test]
fn many_missing_values_collide_under_replacement() {
    let rows = 4;
    let reference = Dataset::new(vec![Column::new(
        "flag",
        ColumnKind::Int,
        vec![Value::Missing, Value::Missing, Value::Missing, Value::Int(1)],
    )])
    .expect("reference");
    let mut registry = DomainRegistry::new();
    registry
        .register("flag", Domain::int_range(0, 2))
        .expect("register flag");
    let generator = MockDataGenerator::new(
        registry,
        GenerateOptions {
            min_rows: 200,
            max_rows: 201,
            sampling: MissingSampling::WithReplacement,
        },
    )
    .expect("generator");

    let output = generator
        .generate(&reference, Seed::new(9).expect("seed"))
        .expect("generate");
    let flag = output.report.feature("flag").expect("flag report");
    assert_eq!(flag.missing_requested, scale_missing(3, rows, 200));
    assert_eq!(flag.missing_requested, 150);
    assert!(flag.missing_realized < flag.missing_requested);
    assert!(output.report.collisions() > 0);
}

#[test]
fn unregistered_feature_is_a_configuration_error() {
    let reference = Dataset::new(vec![Column::new(
        "smoker",
        ColumnKind::Int,
        vec![Value::Int(0), Value::Int(1)],
    )])
    .expect("reference");

    let result = generator(MissingSampling::WithReplacement).generate(&reference, Seed::default());
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}

#[test]
fn invalid_row_bounds_are_validation_errors() {
    let result = MockDataGenerator::heart_disease(GenerateOptions {
        min_rows: 300,
        max_rows: 50,
        sampling: MissingSampling::WithReplacement,
    });
    assert!(matches!(result, Err(GenerationError::Validation(_))));

    let result = MockDataGenerator::heart_disease(GenerateOptions {
        min_rows: 0,
        max_rows: 50,
        sampling: MissingSampling::WithReplacement,
    });
    assert!(matches!(result, Err(GenerationError::Validation(_))));
}

#[test]
fn reference_without_columns_is_a_validation_error() {
    let empty = Dataset::new(Vec::new()).expect("empty dataset");
    let result = generator(MissingSampling::WithReplacement)
        .generate(&empty, Seed::new(12345).expect("seed"));
    assert!(matches!(result, Err(GenerationError::Validation(_))));
}

#[test]
fn caller_owned_generators_are_independent() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithReplacement);

    let mut rng_a = ChaCha8Rng::seed_from_u64(77);
    let mut rng_b = ChaCha8Rng::seed_from_u64(77);

    let a = generator
        .generate_with_rng(&reference, &mut rng_a)
        .expect("run a");
    let b = generator
        .generate_with_rng(&reference, &mut rng_b)
        .expect("run b");

    assert_eq!(a.dataset, b.dataset);
    assert_eq!(a.report.seed, None);
}

#[test]
fn concurrent_generation_matches_sequential() {
    let reference = reference_fixture();
    let generator = generator(MissingSampling::WithReplacement);
    let seeds: Vec<Seed> = (0..4).map(|seed| Seed::new(seed).expect("seed")).collect();

    let sequential: Vec<Dataset> = seeds
        .iter()
        .map(|seed| generator.generate(&reference, *seed).expect("generate").dataset)
        .collect();

    let concurrent: Vec<Dataset> = std::thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|seed| {
                let generator = &generator;
                let reference = &reference;
                scope.spawn(move || generator.generate(reference, *seed).expect("generate").dataset)
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("join"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn generate_mock_uses_heart_defaults() {
    let reference = reference_fixture();
    let seed = Seed::default();
    let dataset = generate_mock(&reference, seed).expect("generate");
    let again = generate_mock(&reference, seed).expect("generate again");
    assert_eq!(dataset, again);

    let distinct_positions: BTreeSet<usize> = dataset
        .column("chol")
        .expect("chol")
        .values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_missing())
        .map(|(index, _)| index)
        .collect();
    assert!(distinct_positions.len() <= scale_missing(4, 300, dataset.row_count()));
}
