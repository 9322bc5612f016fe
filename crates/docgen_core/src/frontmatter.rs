use crate::metadata::Metadata;

/// Sentinel line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// A raw document split into its metadata block and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// `None` when the document has no delimiter pair.
    pub metadata: Option<Metadata>,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Split `raw` into front matter and body.
///
/// A document without an opening `---` on its first line, or without a closing
/// `---` line, is returned verbatim as body with no metadata. The line
/// terminator after the closing delimiter (`\n` or `\r\n`) is consumed once.
pub fn parse_front_matter(raw: &str) -> Result<ParsedDocument, FrontMatterError> {
    let Some((yaml, body)) = split_front_matter(raw) else {
        return Ok(ParsedDocument {
            metadata: None,
            body: raw.to_string(),
        });
    };

    let metadata = Metadata::from_yaml(yaml)?;
    Ok(ParsedDocument {
        metadata: Some(metadata),
        body: body.to_string(),
    })
}

/// Returns `(yaml, body)` when a delimiter pair is present.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = strip_opening_line(raw)?;

    let mut offset = 0;
    loop {
        let line_end = rest[offset..].find('\n').map(|idx| offset + idx);
        let line = match line_end {
            Some(end) => &rest[offset..end],
            None => &rest[offset..],
        };
        if trim_cr(line) == DELIMITER {
            let body = match line_end {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            return Some((&rest[..offset], body));
        }
        offset = line_end? + 1;
    }
}

fn strip_opening_line(raw: &str) -> Option<&str> {
    let end = raw.find('\n')?;
    if trim_cr(&raw[..end]) == DELIMITER {
        Some(&raw[end + 1..])
    } else {
        None
    }
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
