use std::fs;
use std::path::{Path, PathBuf};

use docgen_logging::{docgen_debug, docgen_info, docgen_warn};

use crate::error::AssembleError;
use crate::frontmatter::{parse_front_matter, ParsedDocument};
use crate::manual::{CoversheetConfig, Manual};
use crate::metadata::{FieldError, Metadata};
use crate::sections::SectionStore;

const MARKDOWN_EXTENSION: &str = "md";
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// How a document takes part in the manual, from its `Type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Coversheet,
    Content,
}

impl DocumentKind {
    /// Map a declared `Type`. A missing or empty value means `Content`.
    pub fn from_type(declared: Option<&str>) -> Option<Self> {
        match declared {
            None | Some("") | Some("Content") => Some(Self::Content),
            Some("Coversheet") => Some(Self::Coversheet),
            Some(_) => None,
        }
    }
}

/// Collects the coversheet and sections of one assembly run.
///
/// Owned by the caller for the duration of a build so that concurrent builds
/// never share state. Mutation goes through `&mut self`.
#[derive(Debug, Default)]
pub struct ManualBuilder {
    coversheet: Option<(CoversheetConfig, PathBuf)>,
    sections: SectionStore,
}

impl ManualBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a parsed document into the coversheet slot or the section store.
    pub fn add_document(
        &mut self,
        path: &Path,
        document: ParsedDocument,
    ) -> Result<DocumentKind, AssembleError> {
        let metadata = document.metadata.unwrap_or_default();
        let declared = metadata.get_str("Type").map_err(|err| invalid(path, err))?;
        let kind = DocumentKind::from_type(declared.as_deref()).ok_or_else(|| {
            AssembleError::UnknownContentType {
                path: path.to_path_buf(),
                content_type: declared.clone().unwrap_or_default(),
            }
        })?;
        docgen_debug!("Classified {:?} as {:?}", path, kind);

        match kind {
            DocumentKind::Coversheet => {
                let coversheet = read_coversheet(&metadata).map_err(|err| invalid(path, err))?;
                self.set_coversheet(path, coversheet)?;
            }
            DocumentKind::Content => {
                let order = metadata
                    .get_i64("Order")
                    .map_err(|err| invalid(path, err))?
                    .unwrap_or(0);
                self.sections.add(order, document.body, path);
            }
        }
        Ok(kind)
    }

    pub fn set_coversheet(
        &mut self,
        path: &Path,
        coversheet: CoversheetConfig,
    ) -> Result<(), AssembleError> {
        if let Some((_, first)) = &self.coversheet {
            return Err(AssembleError::DuplicateCoversheet {
                path: path.to_path_buf(),
                first: first.clone(),
            });
        }
        self.coversheet = Some((coversheet, path.to_path_buf()));
        Ok(())
    }

    pub fn add_section(&mut self, order: i64, body: impl Into<String>, path: &Path) {
        self.sections.add(order, body, path);
    }

    pub fn has_coversheet(&self) -> bool {
        self.coversheet.is_some()
    }

    /// Finish the run. Fails if no coversheet was supplied.
    pub fn build(self, directory: &Path) -> Result<Manual, AssembleError> {
        let Some((coversheet, _)) = self.coversheet else {
            return Err(AssembleError::MissingCoversheet {
                directory: directory.to_path_buf(),
            });
        };
        Ok(Manual::new(coversheet, self.sections.into_ordered()))
    }
}

/// Assemble every markdown file directly under `content_dir` into a [`Manual`].
pub fn assemble(content_dir: &Path) -> Result<Manual, AssembleError> {
    let files = markdown_files(content_dir)?;
    let mut builder = ManualBuilder::new();

    for path in &files {
        let raw = fs::read_to_string(path).map_err(|err| AssembleError::io(path, err))?;
        let text = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&raw);
        let document =
            parse_front_matter(text).map_err(|source| AssembleError::MalformedFrontMatter {
                path: path.clone(),
                source,
            })?;
        builder.add_document(path, document)?;
    }

    if !builder.has_coversheet() {
        docgen_warn!("No coversheet among {} files in {:?}", files.len(), content_dir);
    }
    let manual = builder.build(content_dir)?;
    docgen_info!(
        "Assembled manual from {:?}: {} sections",
        content_dir,
        manual.sections().len()
    );
    Ok(manual)
}

/// Markdown files directly under `dir` (non-recursive), sorted by file name.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, AssembleError> {
    if !dir.is_dir() {
        return Err(AssembleError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| AssembleError::io(dir, err))? {
        let entry = entry.map_err(|err| AssembleError::io(dir, err))?;
        let path = entry.path();
        // Follows symlinks so linked content files are included.
        if !path.is_file() || !is_markdown(&path) {
            continue;
        }
        files.push(path);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

fn read_coversheet(metadata: &Metadata) -> Result<CoversheetConfig, FieldError> {
    Ok(CoversheetConfig {
        product_image: metadata.get_str("ProductImage")?,
        product_logo: metadata.get_str("ProductLogo")?,
        model: metadata.get_str("Model")?,
        text: metadata.get_str("Text")?,
    })
}

fn invalid(path: &Path, err: FieldError) -> AssembleError {
    AssembleError::InvalidField {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
