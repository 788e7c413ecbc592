//! Layout of the UCI heart-disease data files.

/// Public archive with the processed per-site data files.
pub const DATA_URL: &str = "https://archive.ics.uci.edu/static/public/45/heart+disease.zip";

/// Predictive features, in file column order.
pub const FEATURES: [&str; 13] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Diagnosis column following the features.
pub const TARGET: &str = "num";

/// All column names of a processed data file: the features then the target.
pub fn columns() -> Vec<&'static str> {
    FEATURES.iter().copied().chain(std::iter::once(TARGET)).collect()
}
