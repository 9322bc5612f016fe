use std::path::Path;

use walkdir::WalkDir;

use crate::error::AssembleError;

/// Directory under the content root whose files are served verbatim.
pub const RESOURCES_DIR: &str = "resources";

/// Routes a rendered manual exposes: `/` plus every file under `resources/`.
///
/// The result is sorted and uses `/` separators on every platform.
pub fn manual_routes(content_dir: &Path) -> Result<Vec<String>, AssembleError> {
    if !content_dir.is_dir() {
        return Err(AssembleError::DirectoryNotFound {
            path: content_dir.to_path_buf(),
        });
    }

    let mut routes = vec!["/".to_string()];
    let resources = content_dir.join(RESOURCES_DIR);
    if !resources.is_dir() {
        return Ok(routes);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&resources).follow_links(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(&resources).to_path_buf();
            AssembleError::io(path, err.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(resource_route(&resources, entry.path())?);
    }
    files.sort();
    routes.extend(files);
    Ok(routes)
}

fn resource_route(resources: &Path, file: &Path) -> Result<String, AssembleError> {
    let relative = file.strip_prefix(resources).unwrap_or(file);
    let mut route = format!("/{RESOURCES_DIR}");
    for component in relative.components() {
        let segment = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| AssembleError::NonUtf8Path {
                path: file.to_path_buf(),
            })?;
        route.push('/');
        route.push_str(segment);
    }
    Ok(route)
}
