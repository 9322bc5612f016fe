//! DocGen export: mirror every route of a live host into a static file tree.
mod export;
mod host;
mod http_host;
mod persist;
mod route;
mod types;

pub use export::{export, ExportError, ExportOptions, ExportSummary, StaticExporter};
pub use host::{Host, HostResponse};
pub use http_host::{HttpHost, HttpHostSettings};
pub use persist::{clear_directory, ensure_output_dir, AtomicFileWriter, PersistError};
pub use route::{route_to_relative_path, INDEX_FILE};
pub use types::{FailureKind, FetchError};
