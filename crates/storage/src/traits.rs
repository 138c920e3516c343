//! The storage contract consumed by the entity model
//!
//! This trait is the full surface the model layer needs from a backing
//! store. It deliberately stays small: per-property reads and writes, list
//! member operations, existence checks, and identifier generation. No
//! querying, no indexing, no multi-entity transactions; those are engine
//! concerns, not contract concerns.

use std::collections::BTreeSet;

use folio_core::{IdKind, ListValue, Result, Value};

/// Backing-store contract for the entity model
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). The store is the single
/// serialization point; each contract call is individually consistent but
/// the contract offers no atomicity across calls.
///
/// Error conventions:
/// - property operations against an unknown (scope, id) fail `NotFound`
/// - `create` for a bound identifier fails `AlreadyExists`
/// - list operations against a scalar-valued property fail `TypeMismatch`
/// - engine faults surface as `Store` errors, propagated uninterpreted
pub trait Store: Send + Sync {
    /// Create a new, empty entity under (scope, id)
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the identifier is already bound in the scope.
    fn create(&self, scope: &str, id: &str) -> Result<()>;

    /// Check whether an entity exists under (scope, id)
    fn exists(&self, scope: &str, id: &str) -> Result<bool>;

    /// Names of all properties currently set on the entity
    ///
    /// Empty set if the entity has no properties.
    fn property_names(&self, scope: &str, id: &str) -> Result<BTreeSet<String>>;

    /// Get the value bound to `name`, if any
    ///
    /// Returns `None` for a name never set (or removed). The value is
    /// returned exactly as stored; classification into a category happened
    /// at write time.
    fn get_property(&self, scope: &str, id: &str, name: &str) -> Result<Option<Value>>;

    /// Bind `name` to `value`, overwriting any prior value of any category
    fn set_property(&self, scope: &str, id: &str, name: &str, value: Value) -> Result<()>;

    /// Remove the property bound to `name`
    ///
    /// Removing an absent name is a no-op, not an error.
    fn remove_property(&self, scope: &str, id: &str, name: &str) -> Result<()>;

    /// Read the ordered list bound to `name`
    ///
    /// Returns an empty sequence for a name never set; storage order is
    /// preserved for round-trip reads.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is not a list.
    fn get_list(&self, scope: &str, id: &str, name: &str) -> Result<Vec<ListValue>>;

    /// Append one element to the list bound to `name`
    ///
    /// An unset name is implicitly bound to an empty list first. Existing
    /// order is preserved; duplicates are permitted.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is not a list.
    fn add_list_member(&self, scope: &str, id: &str, name: &str, value: ListValue) -> Result<()>;

    /// Remove the first occurrence equal to `value` from the list
    ///
    /// Removing a value not present is a no-op, as is removing from an
    /// unset name.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is not a list.
    fn remove_list_member(&self, scope: &str, id: &str, name: &str, value: &ListValue)
        -> Result<()>;

    /// Empty the list bound to `name`
    ///
    /// Subsequent reads return an empty sequence, never absent: clearing an
    /// unset name binds it to an empty list.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is not a list.
    fn clear_list(&self, scope: &str, id: &str, name: &str) -> Result<()>;

    /// Mint a fresh identifier, unique within `scope`, shaped per `hint`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for `Literal` and `ListedLicense` hints; those
    /// categories name fixed vocabularies and cannot be minted.
    fn generate_id(&self, scope: &str, hint: IdKind) -> Result<String>;
}
