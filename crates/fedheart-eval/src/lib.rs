//! Evaluation of mock datasets against their domains and the reference
//! missingness profile.

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod report;

pub use engine::evaluate;
pub use errors::EvalError;
pub use metrics::{ColumnMetrics, METRICS_VERSION, MetricsReport, RowMetrics};
pub use model::{EvaluateOptions, Violation};
pub use report::render_report;
