//! Entity reference triple
//!
//! An `EntityRef` identifies an entity without requiring the entity itself
//! to be loaded: (document-scope, identifier, type-name). It is produced by
//! projecting any entity facade and is the form in which references are
//! stored and compared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable descriptor identifying an entity
///
/// Two references are equal iff all three components are equal. Note that
/// reference equality says nothing about the referenced entities' contents;
/// structural comparison is the job of `Entity::equivalent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    scope: String,
    id: String,
    entity_type: String,
}

impl EntityRef {
    /// Create a reference from its three components
    pub fn new(
        scope: impl Into<String>,
        id: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        EntityRef {
            scope: scope.into(),
            id: id.into(),
            entity_type: entity_type.into(),
        }
    }

    /// The document scope the entity lives in
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The identifier, unique within the scope
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The entity's type name
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.scope, self.id)
    }
}
