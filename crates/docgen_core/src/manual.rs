use serde::Serialize;

use crate::sections::Section;

/// Cover page settings read from the single `Coversheet` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoversheetConfig {
    pub product_image: Option<String>,
    pub product_logo: Option<String>,
    pub model: Option<String>,
    pub text: Option<String>,
}

/// An assembled manual: one coversheet plus its sections in render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manual {
    coversheet: CoversheetConfig,
    sections: Vec<Section>,
}

impl Manual {
    pub(crate) fn new(coversheet: CoversheetConfig, sections: Vec<Section>) -> Self {
        Self {
            coversheet,
            sections,
        }
    }

    pub fn coversheet(&self) -> &CoversheetConfig {
        &self.coversheet
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}
