use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use docgen_core::{assemble as assemble_manual, manual_routes, Manual, RESOURCES_DIR};
use docgen_export::{HttpHost, StaticExporter};
use docgen_logging::{docgen_info, docgen_warn};

use crate::config::AppConfig;

const DEFAULT_OUTPUT_DIR: &str = "output";

pub fn content_dir(arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match arg {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("failed to resolve the current directory"),
    }
}

pub fn default_destination(content: &Path) -> PathBuf {
    content.join(DEFAULT_OUTPUT_DIR)
}

pub fn assemble(content: &Path, json: bool) -> anyhow::Result<()> {
    let manual = load_manual(content)?;
    if json {
        let text = serde_json::to_string_pretty(&manual).context("failed to serialize manual")?;
        println!("{text}");
        return Ok(());
    }

    let cover = manual.coversheet();
    println!("Coversheet: {}", cover.model.as_deref().unwrap_or("(no model)"));
    println!("Sections: {}", manual.sections().len());
    for section in manual.sections() {
        println!("  [{:>4}] {}", section.order, section.source_path.display());
    }
    Ok(())
}

pub fn routes(content: &Path) -> anyhow::Result<()> {
    let routes = manual_routes(content)
        .with_context(|| format!("failed to list routes for {}", content.display()))?;
    for route in routes {
        println!("{route}");
    }
    Ok(())
}

/// Validate the content, then mirror the running host into `dest`.
pub fn generate(
    content: &Path,
    dest: &Path,
    host_url: &str,
    config: &AppConfig,
) -> anyhow::Result<()> {
    // A broken manual must fail before the destination is wiped.
    load_manual(content)?;
    guard_destination(content, dest)?;

    let mut paths = manual_routes(content)
        .with_context(|| format!("failed to list routes for {}", content.display()))?;
    paths.extend(config.extra_paths.iter().cloned());

    let host = HttpHost::new(host_url, paths, config.host_settings())
        .with_context(|| format!("invalid host url {host_url}"))?;
    docgen_info!("Exporting from {}", host.base_url());

    let runtime = tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
    let exporter = StaticExporter::new(config.export_options());
    let summary = runtime
        .block_on(exporter.export(&host, dest))
        .with_context(|| format!("export into {} failed", dest.display()))?;

    println!(
        "Wrote {} files ({} bytes) to {}",
        summary.files_written,
        summary.bytes_written,
        summary.destination.display()
    );
    Ok(())
}

fn load_manual(content: &Path) -> anyhow::Result<Manual> {
    assemble_manual(content)
        .with_context(|| format!("failed to assemble manual from {}", content.display()))
}

/// Refuse destinations whose clearing or population would touch the content:
/// the content directory, any of its ancestors, or anything under `resources/`.
fn guard_destination(content: &Path, dest: &Path) -> anyhow::Result<()> {
    let content = content
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", content.display()))?;
    let dest_abs = resolve(dest)?;
    let resources = content.join(RESOURCES_DIR);

    if content.starts_with(&dest_abs) {
        docgen_warn!("Refusing to export into {:?}", dest_abs);
        bail!(
            "destination {} contains the content directory {}",
            dest_abs.display(),
            content.display()
        );
    }
    if dest_abs.starts_with(&resources) {
        docgen_warn!("Refusing to export into {:?}", dest_abs);
        bail!(
            "destination {} is inside the resources directory {}",
            dest_abs.display(),
            resources.display()
        );
    }
    Ok(())
}

/// Canonicalize the deepest existing ancestor of `path` and re-append the rest.
fn resolve(path: &Path) -> anyhow::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to resolve the current directory")?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", existing.display()))?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}
