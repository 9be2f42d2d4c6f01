//! Results export for finished games
//!
//! A revealed session is captured as a [`ResultsReport`] and written by the
//! [`ResultsExporter`] into a timestamped directory holding a readable
//! report, a JSON copy of the same data and the similarity chart.

pub mod error;
pub mod exporter;
pub mod report;


pub use error::ExportError;
pub use error::Result;
pub use exporter::ResultsExporter;
pub use report::ResultsReport;
