use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use docgen_logging::{docgen_debug, docgen_error, docgen_info};
use futures_util::{stream, TryStreamExt};

use crate::persist::{clear_directory, ensure_output_dir, AtomicFileWriter, PersistError};
use crate::route::route_to_relative_path;
use crate::{FetchError, Host};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Upper bound on fetches in flight against the host.
    pub concurrency: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub files_written: usize,
    pub bytes_written: u64,
    pub destination: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("fetching {path} failed with http status {status}")]
    FetchFailed { path: String, status: u16 },
    #[error("fetching {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: FetchError,
    },
    #[error("route {path:?} cannot be mapped to a file")]
    InvalidPath { path: String },
    #[error(transparent)]
    Io(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedFile {
    route: String,
    relative: PathBuf,
}

/// Mirrors a [`Host`] into a directory, replacing everything already there.
#[derive(Debug, Clone, Default)]
pub struct StaticExporter {
    options: ExportOptions,
}

impl StaticExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Fetch every route of `host` and write it under `destination`.
    ///
    /// The destination is created if missing and emptied before any route is
    /// fetched. The first failing route aborts the export; files written up to
    /// that point are left in place but the call returns the error.
    pub async fn export(
        &self,
        host: &dyn Host,
        destination: &Path,
    ) -> Result<ExportSummary, ExportError> {
        let plan = plan_routes(host.paths())?;
        docgen_info!(
            "Exporting {} routes into {:?}",
            plan.len(),
            destination
        );

        ensure_output_dir(destination)?;
        let removed = clear_directory(destination)?;
        docgen_debug!("Removed {} existing entries from {:?}", removed, destination);

        let writer = AtomicFileWriter::new(destination.to_path_buf());
        let bytes_written = AtomicU64::new(0);
        let writer = &writer;
        let total = &bytes_written;

        stream::iter(plan.iter().map(Ok::<_, ExportError>))
            .try_for_each_concurrent(self.options.concurrency.max(1), |file| async move {
                let written = mirror_route(host, writer, file).await?;
                total.fetch_add(written, Ordering::Relaxed);
                Ok(())
            })
            .await?;

        let summary = ExportSummary {
            files_written: plan.len(),
            bytes_written: bytes_written.load(Ordering::Relaxed),
            destination: writer.root().to_path_buf(),
        };
        docgen_info!(
            "Exported {} files ({} bytes) into {:?}",
            summary.files_written,
            summary.bytes_written,
            destination
        );
        Ok(summary)
    }
}

/// Export with default options.
pub async fn export(host: &dyn Host, destination: &Path) -> Result<ExportSummary, ExportError> {
    StaticExporter::default().export(host, destination).await
}

fn plan_routes(routes: Vec<String>) -> Result<Vec<PlannedFile>, ExportError> {
    let mut seen = HashSet::new();
    let mut plan = Vec::with_capacity(routes.len());
    for route in routes {
        let relative = route_to_relative_path(&route)
            .ok_or_else(|| ExportError::InvalidPath { path: route.clone() })?;
        if !seen.insert(relative.clone()) {
            docgen_debug!("Skipping {} (same file as an earlier route)", route);
            continue;
        }
        plan.push(PlannedFile { route, relative });
    }
    Ok(plan)
}

async fn mirror_route(
    host: &dyn Host,
    writer: &AtomicFileWriter,
    file: &PlannedFile,
) -> Result<u64, ExportError> {
    let response = host
        .fetch(&file.route)
        .await
        .map_err(|source| ExportError::Transport {
            path: file.route.clone(),
            source,
        })?;

    if !response.is_success() {
        docgen_error!("GET {} returned status {}", file.route, response.status);
        return Err(ExportError::FetchFailed {
            path: file.route.clone(),
            status: response.status,
        });
    }

    let target = writer.write(&file.relative, &response.body)?;
    docgen_debug!("Wrote {} ({} bytes)", target.display(), response.body.len());
    Ok(response.body.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_deduplicates_by_target_file() {
        let plan = plan_routes(vec!["/".into(), "".into(), "/a".into(), "a".into()]).unwrap();
        let routes: Vec<&str> = plan.iter().map(|f| f.route.as_str()).collect();
        assert_eq!(routes, vec!["/", "/a"]);
    }

    #[test]
    fn plan_rejects_escaping_route() {
        let err = plan_routes(vec!["/ok".into(), "/../x".into()]).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPath { path } if path == "/../x"));
    }
}
