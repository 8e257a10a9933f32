//! Result delivery to the external submission endpoint
//!
//! The endpoint is an HTTP-form-style collaborator accepting three named
//! fields: the results filename, a destination directory string, and the
//! full CSV content. Transport is a single POST; the response is not
//! inspected and delivery is never retried. A local copy of the CSV is
//! written under the root folder first so an unreachable endpoint cannot
//! lose a run.

use crate::session::RunReport;
use ranklab_common::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Client for the external submission endpoint
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    log_dir: String,
}

impl SubmissionClient {
    /// `endpoint` is the submission URL; `None` disables the POST entirely.
    /// `log_dir` is the destination directory field sent alongside the CSV.
    pub fn new(endpoint: Option<String>, log_dir: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            log_dir,
        }
    }

    /// Trigger delivery of a finished run. The contract ends at "delivery
    /// triggered": send errors are logged and swallowed.
    pub async fn deliver(&self, report: &RunReport) {
        let Some(endpoint) = &self.endpoint else {
            info!(
                "No submission endpoint configured, keeping only the local copy of {}",
                report.filename
            );
            return;
        };

        let form = [
            ("fname", report.filename.as_str()),
            ("to", self.log_dir.as_str()),
            ("csvData", report.csv.as_str()),
        ];

        match self.http.post(endpoint).form(&form).send().await {
            Ok(response) => {
                // Response body intentionally not inspected
                info!(
                    "Results {} delivered to {} (HTTP {})",
                    report.filename,
                    endpoint,
                    response.status()
                );
            }
            Err(e) => {
                warn!("Result delivery to {} failed: {}", endpoint, e);
            }
        }
    }
}

/// Write the local copy of the results CSV under `<root>/log/`
pub fn write_local_copy(local_log_dir: &Path, report: &RunReport) -> Result<PathBuf> {
    std::fs::create_dir_all(local_log_dir)?;
    let path = local_log_dir.join(&report.filename);
    std::fs::write(&path, &report.csv)
        .map_err(|e| Error::Submit(format!("writing {}: {}", path.display(), e)))?;
    info!("Local results copy written to {}", path.display());
    Ok(path)
}
