//! Report generation.
//!
//! A report turns the records read from CSV files into a [`ReportTable`].
//! Reports only compute; rendering lives in [`crate::output`] and works
//! on any report's table.

pub mod registry;
pub mod rounding;
pub mod student_performance;
pub mod types;

pub use registry::{ReportConstructor, ReportRegistry, ReportRegistryBuilder};
pub use student_performance::StudentPerformanceReport;
pub use types::{Average, Cell, RankedRow, Record, ReportTable, StudentAggregate};

use crate::error::Result;

/// A report over a sequence of records.
pub trait Report {
    fn generate(&self, records: &[Record]) -> Result<ReportTable>;
}
