use std::path::PathBuf;

/// File written for routes that name a directory, such as `/` or `/guide/`.
pub const INDEX_FILE: &str = "index.html";

/// Map a host route onto a path relative to the export destination.
///
/// Segments are joined with the platform separator. Returns `None` for routes
/// that could escape the destination or cannot name a file (`..`, `.`,
/// backslashes, NUL or other control characters).
pub fn route_to_relative_path(route: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in route.split('/').filter(|segment| !segment.is_empty()) {
        if segment == "." || segment == ".." || segment.chars().any(is_forbidden) {
            return None;
        }
        relative.push(segment);
    }

    if route.is_empty() || route.ends_with('/') || relative.as_os_str().is_empty() {
        relative.push(INDEX_FILE);
    }
    Some(relative)
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '\\' | '\0'..='\u{1F}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn root_maps_to_index() {
        assert_eq!(route_to_relative_path("/"), Some(PathBuf::from(INDEX_FILE)));
        assert_eq!(route_to_relative_path(""), Some(PathBuf::from(INDEX_FILE)));
    }

    #[test]
    fn trailing_slash_maps_to_nested_index() {
        assert_eq!(
            route_to_relative_path("/guide/"),
            Some(Path::new("guide").join(INDEX_FILE))
        );
    }

    #[test]
    fn plain_routes_map_segment_wise() {
        assert_eq!(route_to_relative_path("/404"), Some(PathBuf::from("404")));
        assert_eq!(
            route_to_relative_path("/resources/logo.png"),
            Some(Path::new("resources").join("logo.png"))
        );
        assert_eq!(
            route_to_relative_path("prince/output.pdf"),
            Some(Path::new("prince").join("output.pdf"))
        );
    }

    #[test]
    fn escaping_routes_are_rejected() {
        assert_eq!(route_to_relative_path("/../etc/passwd"), None);
        assert_eq!(route_to_relative_path("/a/./b"), None);
        assert_eq!(route_to_relative_path("/a\\..\\b"), None);
        assert_eq!(route_to_relative_path("/bad\nname"), None);
    }
}
