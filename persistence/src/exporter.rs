//! Writes finished games to a results directory.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::error::ExportError;
use crate::error::Result;
use crate::report::ResultsReport;

pub const REPORT_FILE: &str = "results.txt";
pub const REPORT_JSON_FILE: &str = "results.json";
pub const PLOT_FILE: &str = "result_plot.png";

#[derive(Debug, Clone)]
pub struct ResultsExporter {
    base_dir: PathBuf,
}

impl ResultsExporter {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the report's directory under the base directory and write the
    /// text report, its JSON companion and the chart. Returns the directory.
    ///
    /// Exporting twice within the same second overwrites the earlier files.
    pub fn export(&self, report: &ResultsReport, plot_png: &[u8]) -> Result<PathBuf> {
        let dir = self.base_dir.join(report.directory_name());
        fs::create_dir_all(&dir).map_err(|source| ExportError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        fs::write(dir.join(REPORT_FILE), report.to_text())?;
        fs::write(dir.join(REPORT_JSON_FILE), serde_json::to_vec_pretty(report)?)?;
        fs::write(dir.join(PLOT_FILE), plot_png)?;

        info!(dir = %dir.display(), iterations = report.iterations, "results exported");
        Ok(dir)
    }
}
