//! Property value types
//!
//! This module defines the closed set of shapes a property value can take:
//! scalar string, boolean, ordered list, and entity reference.
//!
//! ## Type rules
//!
//! - Exactly four categories; every stored value belongs to exactly one
//! - No implicit coercions: a typed accessor on the wrong category is a
//!   `TypeMismatch` error, never a conversion
//! - Lists hold `ListValue` elements, which have no list variant, so nested
//!   lists are unrepresentable by construction
//! - Order is preserved for storage and round-trip read; equivalence
//!   comparisons treat lists as sets (see `folio-model`)

use crate::reference::EntityRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag for a property value
///
/// Used in type-mismatch errors to name the expected and actual shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Scalar UTF-8 string
    String,
    /// Scalar boolean
    Bool,
    /// Ordered list of non-list values
    List,
    /// Reference to another entity
    Ref,
}

impl ValueKind {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "boolean",
            ValueKind::List => "list",
            ValueKind::Ref => "entity reference",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value
///
/// The canonical value type for all property reads and writes. Every value
/// read back from a store is classified into exactly one variant before it
/// reaches a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Scalar UTF-8 string
    String(String),
    /// Scalar boolean
    Bool(bool),
    /// Ordered list; duplicates permitted, order preserved on round-trip
    List(Vec<ListValue>),
    /// Reference to another entity, by triple
    Ref(EntityRef),
}

/// An element of a list-valued property
///
/// Same shapes as `Value` minus the list variant: lists are not nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListValue {
    /// Scalar UTF-8 string
    String(String),
    /// Scalar boolean
    Bool(bool),
    /// Reference to another entity, by triple
    Ref(EntityRef),
}

impl Value {
    /// Build a list value from anything convertible to list elements
    pub fn list<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<ListValue>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Get the category of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Bool(_) => ValueKind::Bool,
            Value::List(_) => ValueKind::List,
            Value::Ref(_) => ValueKind::Ref,
        }
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is a boolean value
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if this is a list value
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Check if this is an entity-reference value
    pub fn is_ref(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as &[ListValue] if this is a List value
    pub fn as_list(&self) -> Option<&[ListValue]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as &EntityRef if this is a Ref value
    pub fn as_entity_ref(&self) -> Option<&EntityRef> {
        match self {
            Value::Ref(r) => Some(r),
            _ => None,
        }
    }
}

impl ListValue {
    /// Get the category of this list element
    pub fn kind(&self) -> ValueKind {
        match self {
            ListValue::String(_) => ValueKind::String,
            ListValue::Bool(_) => ValueKind::Bool,
            ListValue::Ref(_) => ValueKind::Ref,
        }
    }

    /// Get as &str if this is a String element
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ListValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool element
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ListValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as &EntityRef if this is a Ref element
    pub fn as_entity_ref(&self) -> Option<&EntityRef> {
        match self {
            ListValue::Ref(r) => Some(r),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<EntityRef> for Value {
    fn from(r: EntityRef) -> Self {
        Value::Ref(r)
    }
}

impl From<Vec<ListValue>> for Value {
    fn from(items: Vec<ListValue>) -> Self {
        Value::List(items)
    }
}

impl From<ListValue> for Value {
    fn from(item: ListValue) -> Self {
        match item {
            ListValue::String(s) => Value::String(s),
            ListValue::Bool(b) => Value::Bool(b),
            ListValue::Ref(r) => Value::Ref(r),
        }
    }
}

impl From<&str> for ListValue {
    fn from(s: &str) -> Self {
        ListValue::String(s.to_string())
    }
}

impl From<String> for ListValue {
    fn from(s: String) -> Self {
        ListValue::String(s)
    }
}

impl From<bool> for ListValue {
    fn from(b: bool) -> Self {
        ListValue::Bool(b)
    }
}

impl From<EntityRef> for ListValue {
    fn from(r: EntityRef) -> Self {
        ListValue::Ref(r)
    }
}
