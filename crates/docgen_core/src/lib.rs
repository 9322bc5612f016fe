//! DocGen core: front matter parsing, section ordering and manual assembly.
mod assemble;
mod error;
mod frontmatter;
mod manual;
mod metadata;
mod routes;
mod sections;

pub use assemble::{assemble, markdown_files, DocumentKind, ManualBuilder};
pub use error::AssembleError;
pub use frontmatter::{parse_front_matter, FrontMatterError, ParsedDocument, DELIMITER};
pub use manual::{CoversheetConfig, Manual};
pub use metadata::{FieldError, Metadata};
pub use routes::{manual_routes, RESOURCES_DIR};
pub use sections::{Section, SectionStore};
