use docgen_core::{parse_front_matter, FrontMatterError};
use pretty_assertions::assert_eq;

fn init_logging() {
    docgen_logging::initialize_for_tests();
}

#[test]
fn parses_yaml_without_body() {
    init_logging();
    let document = "---\nNumber: 1.0\nTitle: Test title\nCategory: Test category\n---";

    let parsed = parse_front_matter(document).unwrap();
    let metadata = parsed.metadata.expect("metadata");

    assert_eq!(metadata.get_str("Number").unwrap().as_deref(), Some("1.0"));
    assert_eq!(metadata.get_str("Title").unwrap().as_deref(), Some("Test title"));
    assert_eq!(
        metadata.get_str("Category").unwrap().as_deref(),
        Some("Test category")
    );
    assert!(parsed.body.is_empty());
}

#[test]
fn document_without_front_matter_is_returned_verbatim() {
    init_logging();
    for input in [
        "Just some **markdown**...",
        "",
        "  \n\n# Heading\n\n",
        "---",
        "---\nnever closed\n",
        "text first\n---\na: 1\n---\n",
        "--- \na: 1\n---\n",
    ] {
        let parsed = parse_front_matter(input).unwrap();
        assert_eq!(parsed.metadata, None, "input {input:?}");
        assert_eq!(parsed.body, input);
    }
}

#[test]
fn body_follows_closing_delimiter_without_leading_newline() {
    init_logging();
    let parsed = parse_front_matter("---\nNumber: 1.0\n---\nBODY").unwrap();
    assert_eq!(
        parsed.metadata.unwrap().get_str("Number").unwrap().as_deref(),
        Some("1.0")
    );
    assert_eq!(parsed.body, "BODY");
}

#[test]
fn multi_line_body_is_kept_intact() {
    init_logging();
    let document = "---\nNumber: 1.0\nTitle: Test title\n---\n# User Need\nUser need content....\n# Validation Method\nValidation content...\n";

    let parsed = parse_front_matter(document).unwrap();

    assert_eq!(
        parsed.body,
        "# User Need\nUser need content....\n# Validation Method\nValidation content...\n"
    );
}

#[test]
fn strips_one_unix_line_ending_after_closing_delimiter() {
    init_logging();
    let parsed = parse_front_matter("---\nTitle: t\n---\nMarkdown content...").unwrap();
    assert_eq!(parsed.body, "Markdown content...");

    // Only the first terminator belongs to the delimiter line.
    let parsed = parse_front_matter("---\nTitle: t\n---\n\nMarkdown content...").unwrap();
    assert_eq!(parsed.body, "\nMarkdown content...");
}

#[test]
fn strips_one_windows_line_ending_after_closing_delimiter() {
    init_logging();
    let parsed = parse_front_matter("---\r\nTitle: t\r\n---\r\nMarkdown content...").unwrap();
    assert_eq!(parsed.body, "Markdown content...");

    let parsed = parse_front_matter("---\r\nTitle: t\r\n---\r\n\r\nMarkdown content...").unwrap();
    assert_eq!(parsed.body, "\r\nMarkdown content...");
}

#[test]
fn closing_line_ending_style_does_not_change_body() {
    init_logging();
    let unix = parse_front_matter("---\nTitle: t\n---\nSame body\n").unwrap();
    let windows = parse_front_matter("---\nTitle: t\n---\r\nSame body\n").unwrap();
    assert_eq!(unix, windows);
}

#[test]
fn empty_block_yields_empty_metadata_not_absent() {
    init_logging();
    let parsed = parse_front_matter("---\n---\nbody").unwrap();
    let metadata = parsed.metadata.expect("metadata present");
    assert!(metadata.is_empty());
    assert_eq!(parsed.body, "body");
}

#[test]
fn malformed_yaml_is_an_error() {
    init_logging();
    let err = parse_front_matter("---\nTitle: [unclosed\n---\nbody").unwrap_err();
    assert!(matches!(err, FrontMatterError::Yaml(_)));
}

#[test]
fn non_mapping_front_matter_is_an_error() {
    init_logging();
    let err = parse_front_matter("---\n- a\n- b\n---\nbody").unwrap_err();
    assert!(matches!(err, FrontMatterError::NotAMapping(_)));
}
