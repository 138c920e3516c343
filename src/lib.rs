//! Folio - storage-agnostic entity model for structured document graphs
//!
//! Folio models documents whose schema is not fixed at compile time: each
//! entity is a (scope, identifier) pair carrying an open set of named
//! properties, and the same model code runs against any backing store that
//! implements the [`Store`] contract.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use folio::{Entity, MemoryStore, Store};
//!
//! # fn main() -> folio::Result<()> {
//! let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
//!
//! let package = Entity::create(store.clone(), "https://doc.example/a", "ElementRef-1", "Package")?;
//! package.set_value("name", "widget")?;
//! package.add_to_list("checksums", "sha256:abc123")?;
//!
//! assert_eq!(package.string_value("name")?.as_deref(), Some("widget"));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `folio-core`: value variant, entity references, identifier
//!   classification, error types
//! - `folio-storage`: the [`Store`] contract and the reference
//!   [`MemoryStore`] engine
//! - `folio-model`: the [`Entity`] facade, deferred updates, and the
//!   graph-aware operations (equivalence, clone, copy)

// Re-export the public API of the member crates
pub use folio_core::{
    classify_id, id_shape, BuiltinCatalog, EntityRef, Error, IdKind, LicenseCatalog, ListValue,
    Result, Value, ValueKind, DOCUMENT_REF_PREFIX, ELEMENT_ID_PREFIX, LICENSE_REF_PREFIX,
    NOASSERTION_LITERAL, NONE_LITERAL,
};
pub use folio_model::{Entity, PendingUpdate};
pub use folio_storage::{MemoryStore, Store};
