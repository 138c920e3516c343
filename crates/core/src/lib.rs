//! Core types for the Folio entity model
//!
//! This crate defines the foundational types used throughout the system:
//! - Value / ListValue: the closed set of property-value shapes
//! - EntityRef: (scope, identifier, type-name) descriptor for an entity
//! - IdKind: semantic category derived from an identifier string
//! - LicenseCatalog: the listed-license registry collaborator
//! - Error: error type hierarchy
//!
//! Everything here is storage-agnostic. The storage contract lives in
//! `folio-storage`, the entity facade in `folio-model`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ident;
pub mod license;
pub mod reference;
pub mod value;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use ident::{
    classify_id, id_shape, IdKind, DOCUMENT_REF_PREFIX, ELEMENT_ID_PREFIX, LICENSE_REF_PREFIX,
    NOASSERTION_LITERAL, NONE_LITERAL,
};
pub use license::{BuiltinCatalog, LicenseCatalog};
pub use reference::EntityRef;
pub use value::{ListValue, Value, ValueKind};
