//! Identifier classification
//!
//! Maps a raw identifier string to its semantic category. The category is
//! advisory metadata consumed by higher layers to decide serialization
//! treatment; classification never blocks and never fails.

use crate::license::LicenseCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a reference into another document
pub const DOCUMENT_REF_PREFIX: &str = "DocumentRef-";

/// Prefix marking a document-local license definition
pub const LICENSE_REF_PREFIX: &str = "LicenseRef-";

/// Prefix marking a reference to a document element
pub const ELEMENT_ID_PREFIX: &str = "ElementRef-";

/// Reserved literal for an explicit "no value"
pub const NONE_LITERAL: &str = "NONE";

/// Reserved literal for "no assertion is made"
pub const NOASSERTION_LITERAL: &str = "NOASSERTION";

/// Semantic category of an identifier string
///
/// Derived from the identifier's shape, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    /// No recognized shape; a blank-node style identifier
    Anonymous,
    /// Reference into another document (`DocumentRef-` prefix)
    DocumentRef,
    /// Document-local license definition (`LicenseRef-` prefix)
    LicenseRef,
    /// Short identifier of a license in the listed-license registry
    ListedLicense,
    /// One of the reserved literals (`NONE`, `NOASSERTION`)
    Literal,
    /// Reference to a document element (`ElementRef-` prefix)
    ElementId,
}

impl IdKind {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            IdKind::Anonymous => "anonymous",
            IdKind::DocumentRef => "document-ref",
            IdKind::LicenseRef => "license-ref",
            IdKind::ListedLicense => "listed-license",
            IdKind::Literal => "literal",
            IdKind::ElementId => "element-id",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an identifier string
///
/// Pure, deterministic, total. Evaluated in precedence order, first match
/// wins: reserved literal, document-ref prefix, license-ref prefix, listed
/// license (looked up in `catalog`), element prefix, anonymous.
pub fn classify_id(id: &str, catalog: &dyn LicenseCatalog) -> IdKind {
    if id == NONE_LITERAL || id == NOASSERTION_LITERAL {
        IdKind::Literal
    } else if id.starts_with(DOCUMENT_REF_PREFIX) {
        IdKind::DocumentRef
    } else if id.starts_with(LICENSE_REF_PREFIX) {
        IdKind::LicenseRef
    } else if catalog.is_listed_license_id(id) {
        IdKind::ListedLicense
    } else if id.starts_with(ELEMENT_ID_PREFIX) {
        IdKind::ElementId
    } else {
        IdKind::Anonymous
    }
}

/// Classify an identifier by shape alone, without a license registry
///
/// Same precedence chain as [`classify_id`] minus the listed-license lookup.
/// Used where only a generation hint is needed (e.g. minting a fresh id for
/// a clone) and consulting a registry would be wasted work.
pub fn id_shape(id: &str) -> IdKind {
    if id == NONE_LITERAL || id == NOASSERTION_LITERAL {
        IdKind::Literal
    } else if id.starts_with(DOCUMENT_REF_PREFIX) {
        IdKind::DocumentRef
    } else if id.starts_with(LICENSE_REF_PREFIX) {
        IdKind::LicenseRef
    } else if id.starts_with(ELEMENT_ID_PREFIX) {
        IdKind::ElementId
    } else {
        IdKind::Anonymous
    }
}
