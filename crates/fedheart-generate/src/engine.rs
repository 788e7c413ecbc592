use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use fedheart_core::{
    Column, ColumnKind, Dataset, Domain, DomainRegistry, Seed, Value, scale_missing,
    validate_coverage,
};

use crate::errors::GenerationError;
use crate::model::{FeatureReport, GenerateOptions, GenerationReport, MissingSampling};

/// Synthetic dataset plus the report describing how it was produced.
#[derive(Debug, Clone)]
pub struct MockOutput {
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for generating mock datasets from a reference dataset.
#[derive(Debug, Clone)]
pub struct MockDataGenerator {
    registry: DomainRegistry,
    options: GenerateOptions,
}

impl MockDataGenerator {
    pub fn new(
        registry: DomainRegistry,
        options: GenerateOptions,
    ) -> Result<Self, GenerationError> {
        registry.validate()?;
        options.validate()?;
        Ok(Self { registry, options })
    }

    /// Generator over the built-in heart-disease domains.
    pub fn heart_disease(options: GenerateOptions) -> Result<Self, GenerationError> {
        Self::new(DomainRegistry::heart_disease(), options)
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate a mock dataset with a generator seeded from `seed`.
    ///
    /// Identical reference data, seed and options always produce identical
    /// output.
    pub fn generate(&self, reference: &Dataset, seed: Seed) -> Result<MockOutput, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
        let mut output = self.generate_with_rng(reference, &mut rng)?;
        output.report.seed = Some(seed.value());
        Ok(output)
    }

    /// Generate a mock dataset drawing entropy from a caller-owned generator.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        reference: &Dataset,
        rng: &mut R,
    ) -> Result<MockOutput, GenerationError> {
        let start = Instant::now();
        if reference.columns().is_empty() {
            return Err(GenerationError::Validation(
                "reference dataset has no columns".to_string(),
            ));
        }
        validate_coverage(reference, &self.registry)?;

        let rows = rng.random_range(self.options.min_rows..self.options.max_rows);
        let reference_rows = reference.row_count();
        let mut report =
            GenerationReport::new(None, reference_rows, rows, self.options.sampling);

        info!(
            rows,
            reference_rows,
            features = reference.columns().len(),
            sampling = ?self.options.sampling,
            "mock generation started"
        );

        let mut columns = Vec::with_capacity(reference.columns().len());
        for reference_column in reference.columns() {
            let domain = self.registry.domain(&reference_column.name)?;
            let (column, feature_report) =
                self.generate_column(reference_column, domain, reference_rows, rows, rng)?;

            debug!(
                feature = %feature_report.feature,
                kind = feature_report.kind.as_str(),
                reference_missing = feature_report.reference_missing,
                missing_requested = feature_report.missing_requested,
                missing_realized = feature_report.missing_realized,
                "feature generated"
            );

            report.features.push(feature_report);
            columns.push(column);
        }

        let dataset = Dataset::new(columns)?;

        info!(
            rows,
            missing_requested = report.missing_requested_total(),
            missing_realized = report.missing_realized_total(),
            duration_ms = start.elapsed().as_millis() as u64,
            "mock generation completed"
        );

        Ok(MockOutput { dataset, report })
    }

    fn generate_column<R: Rng + ?Sized>(
        &self,
        reference: &Column,
        domain: &Domain,
        reference_rows: usize,
        rows: usize,
        rng: &mut R,
    ) -> Result<(Column, FeatureReport), GenerationError> {
        let mut values = Vec::with_capacity(rows);
        for _ in 0..rows {
            values.push(domain.sample(rng)?);
        }
        let mut column = Column::new(reference.name.clone(), domain.kind(), values);

        let reference_missing = reference.missing_count();
        let mut missing_requested = 0;
        let mut widened = false;

        if reference_missing > 0 {
            missing_requested = scale_missing(reference_missing, reference_rows, rows);
            let positions = missing_positions(self.options.sampling, rows, missing_requested, rng);

            widened = column.kind == ColumnKind::Int;
            column.widen();
            for position in positions {
                column.values[position] = Value::Missing;
            }
        }

        let feature_report = FeatureReport {
            feature: column.name.clone(),
            kind: column.kind,
            reference_missing,
            missing_requested,
            missing_realized: column.missing_count(),
            widened,
        };

        Ok((column, feature_report))
    }
}

/// Generate a mock dataset over the heart-disease domains with default
/// options.
pub fn generate_mock(reference: &Dataset, seed: Seed) -> Result<Dataset, GenerationError> {
    let generator = MockDataGenerator::heart_disease(GenerateOptions::default())?;
    Ok(generator.generate(reference, seed)?.dataset)
}

fn missing_positions<R: Rng + ?Sized>(
    sampling: MissingSampling,
    rows: usize,
    amount: usize,
    rng: &mut R,
) -> Vec<usize> {
    if rows == 0 || amount == 0 {
        return Vec::new();
    }
    match sampling {
        MissingSampling::WithReplacement => {
            (0..amount).map(|_| rng.random_range(0..rows)).collect()
        }
        MissingSampling::WithoutReplacement => {
            rand::seq::index::sample(rng, rows, amount.min(rows)).into_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn positions_without_replacement_are_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let positions = missing_positions(MissingSampling::WithoutReplacement, 20, 20, &mut rng);
        let distinct: BTreeSet<usize> = positions.iter().copied().collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn positions_with_replacement_keep_the_requested_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let positions = missing_positions(MissingSampling::WithReplacement, 5, 40, &mut rng);
        assert_eq!(positions.len(), 40);
        assert!(positions.iter().all(|position| *position < 5));
    }
}
