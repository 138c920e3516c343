//! The entity facade
//!
//! ## Design
//!
//! `Entity` is a stateless facade over a backing store. It holds no
//! property data of its own: every read and write goes straight to the
//! store, so any other facade bound to the same (scope, identifier, store)
//! observes mutations immediately.
//!
//! ## Identity vs equivalence
//!
//! Two facades are *equal* iff their scope and identifier match; the store
//! instance does not participate. Structural comparison of property graphs
//! is a separate, explicit operation: [`Entity::equivalent`].

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use folio_core::{EntityRef, Error, IdKind, ListValue, Result, Value, ValueKind};
use folio_storage::Store;

use crate::graph;
use crate::update::{PendingUpdate, UpdateOp};

/// Bound handle to one stored entity
///
/// Constructed against an existing entity with [`Entity::attach`] or a new
/// one with [`Entity::create`] / [`Entity::create_anonymous`]. Cloning the
/// facade is cheap and yields another view of the same stored entity.
#[derive(Clone)]
pub struct Entity {
    store: Arc<dyn Store>,
    scope: String,
    id: String,
    entity_type: String,
}

impl Entity {
    /// Bind to an existing entity
    ///
    /// # Errors
    ///
    /// `NotFound` if no entity exists under (scope, id); `InvalidArgument`
    /// for an empty scope or identifier.
    pub fn attach(
        store: Arc<dyn Store>,
        scope: &str,
        id: &str,
        entity_type: &str,
    ) -> Result<Self> {
        require_identity(scope, id)?;
        if !store.exists(scope, id)? {
            return Err(Error::not_found(scope, id));
        }
        Ok(Entity {
            store,
            scope: scope.to_string(),
            id: id.to_string(),
            entity_type: entity_type.to_string(),
        })
    }

    /// Create a new, empty entity and bind to it
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the identifier is already bound in the scope;
    /// `InvalidArgument` for an empty scope or identifier.
    pub fn create(
        store: Arc<dyn Store>,
        scope: &str,
        id: &str,
        entity_type: &str,
    ) -> Result<Self> {
        require_identity(scope, id)?;
        store.create(scope, id)?;
        Ok(Entity {
            store,
            scope: scope.to_string(),
            id: id.to_string(),
            entity_type: entity_type.to_string(),
        })
    }

    /// Create a new entity under a freshly minted anonymous identifier
    pub fn create_anonymous(store: Arc<dyn Store>, scope: &str, entity_type: &str) -> Result<Self> {
        let id = store.generate_id(scope, IdKind::Anonymous)?;
        Entity::create(store, scope, &id, entity_type)
    }

    // ========== Identity ==========

    /// The document scope this entity lives in
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

    /// The backing store this facade is bound to
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Check whether `other` is bound to the same store instance
    pub fn same_store(&self, other: &Entity) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// Project this entity to its reference triple
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(&self.scope, &self.id, &self.entity_type)
    }

    // ========== Reads ==========

    /// Names of all properties currently set; empty if none
    pub fn property_names(&self) -> Result<BTreeSet<String>> {
        self.store.property_names(&self.scope, &self.id)
    }

    /// Get the value bound to `name`, if any
    pub fn value(&self, name: &str) -> Result<Option<Value>> {
        require_name(name)?;
        self.store.get_property(&self.scope, &self.id, name)
    }

    /// Get `name` as a string
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is of a different category.
    pub fn string_value(&self, name: &str) -> Result<Option<String>> {
        match self.value(name)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(Error::type_mismatch(name, ValueKind::String, other.kind())),
        }
    }

    /// Get `name` as a boolean
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is of a different category.
    pub fn bool_value(&self, name: &str) -> Result<Option<bool>> {
        match self.value(name)? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(other) => Err(Error::type_mismatch(name, ValueKind::Bool, other.kind())),
        }
    }

    /// Get `name` as an entity reference
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is of a different category.
    pub fn ref_value(&self, name: &str) -> Result<Option<EntityRef>> {
        match self.value(name)? {
            None => Ok(None),
            Some(Value::Ref(r)) => Ok(Some(r)),
            Some(other) => Err(Error::type_mismatch(name, ValueKind::Ref, other.kind())),
        }
    }

    /// Get `name` as an ordered list; empty for a name never set
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the stored value is a scalar or reference.
    pub fn list_value(&self, name: &str) -> Result<Vec<ListValue>> {
        require_name(name)?;
        self.store.get_list(&self.scope, &self.id, name)
    }

    /// Get `name` as a list of strings
    ///
    /// Empty for a name never set.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the property is not a list or any element is not
    /// a string.
    pub fn string_list(&self, name: &str) -> Result<Vec<String>> {
        self.list_value(name)?
            .into_iter()
            .map(|item| match item {
                ListValue::String(s) => Ok(s),
                other => Err(Error::type_mismatch(name, ValueKind::String, other.kind())),
            })
            .collect()
    }

    /// Get `name` as a list of booleans
    ///
    /// Empty for a name never set.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the property is not a list or any element is not
    /// a boolean.
    pub fn bool_list(&self, name: &str) -> Result<Vec<bool>> {
        self.list_value(name)?
            .into_iter()
            .map(|item| match item {
                ListValue::Bool(b) => Ok(b),
                other => Err(Error::type_mismatch(name, ValueKind::Bool, other.kind())),
            })
            .collect()
    }

    // ========== Immediate mutations ==========

    /// Bind `name` to `value`, overwriting any prior value of any category
    pub fn set_value(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        require_name(name)?;
        self.store.set_property(&self.scope, &self.id, name, value.into())
    }

    /// Append one element to the list bound to `name`
    ///
    /// An unset name is implicitly bound to an empty list first.
    pub fn add_to_list(&self, name: &str, value: impl Into<ListValue>) -> Result<()> {
        require_name(name)?;
        self.store
            .add_list_member(&self.scope, &self.id, name, value.into())
    }

    /// Remove the first occurrence equal to `value` from the list
    ///
    /// Removing a value not present is a no-op.
    pub fn remove_from_list(&self, name: &str, value: impl Into<ListValue>) -> Result<()> {
        require_name(name)?;
        self.store
            .remove_list_member(&self.scope, &self.id, name, &value.into())
    }

    /// Empty the list bound to `name`; subsequent reads see an empty list
    pub fn clear_list(&self, name: &str) -> Result<()> {
        require_name(name)?;
        self.store.clear_list(&self.scope, &self.id, name)
    }

    /// Remove the property bound to `name`; absent-name is a no-op
    pub fn remove_property(&self, name: &str) -> Result<()> {
        require_name(name)?;
        self.store.remove_property(&self.scope, &self.id, name)
    }

    // ========== Deferred updates ==========

    /// Prepare a deferred overwrite of `name` with `value`
    ///
    /// Validation happens now; the store is untouched until
    /// [`PendingUpdate::apply`].
    pub fn prepare_set(&self, name: &str, value: impl Into<Value>) -> Result<PendingUpdate> {
        PendingUpdate::prepare(
            self,
            UpdateOp::Set {
                name: name.to_string(),
                value: value.into(),
            },
        )
    }

    /// Prepare a deferred removal of the property bound to `name`
    pub fn prepare_remove(&self, name: &str) -> Result<PendingUpdate> {
        PendingUpdate::prepare(
            self,
            UpdateOp::Remove {
                name: name.to_string(),
            },
        )
    }

    /// Prepare a deferred clear of the list bound to `name`
    pub fn prepare_clear_list(&self, name: &str) -> Result<PendingUpdate> {
        PendingUpdate::prepare(
            self,
            UpdateOp::ClearList {
                name: name.to_string(),
            },
        )
    }

    /// Prepare a deferred append to the list bound to `name`
    pub fn prepare_append(&self, name: &str, value: impl Into<ListValue>) -> Result<PendingUpdate> {
        PendingUpdate::prepare(
            self,
            UpdateOp::Append {
                name: name.to_string(),
                value: value.into(),
            },
        )
    }

    /// Prepare a deferred first-occurrence removal from the list at `name`
    pub fn prepare_remove_member(
        &self,
        name: &str,
        value: impl Into<ListValue>,
    ) -> Result<PendingUpdate> {
        PendingUpdate::prepare(
            self,
            UpdateOp::RemoveMember {
                name: name.to_string(),
                value: value.into(),
            },
        )
    }

    // ========== Graph operations ==========

    /// Structural, store-independent comparison
    ///
    /// Scalars compare by value, lists as sets (order- and
    /// duplicate-insensitive), entity references by recursively comparing
    /// the referenced entities resolved through each side's own store.
    /// Reflexive and symmetric; cyclic reference graphs terminate.
    pub fn equivalent(&self, other: &Entity) -> Result<bool> {
        graph::equivalent(self, other)
    }

    /// Clone this entity's reachable property graph into `target`
    ///
    /// Keeps this identifier when `target` has no conflicting entity,
    /// otherwise mints a fresh one shaped like the original. Referenced
    /// entities absent from `target` are cloned recursively; a referenced
    /// entity met twice in one clone is cloned once and reused. Not atomic:
    /// a store failure partway leaves a partially populated target.
    pub fn clone_into(&self, target: &Arc<dyn Store>) -> Result<Entity> {
        graph::clone_into(self, target)
    }

    /// Overwrite this entity's property set with a copy of `source`'s
    ///
    /// References are kept by identity when both entities share a store
    /// instance; otherwise the referenced entities are first cloned into
    /// this entity's store. Not atomic: a store failure partway leaves a
    /// partially copied property set.
    pub fn copy_from(&self, source: &Entity) -> Result<()> {
        graph::copy_from(self, source)
    }
}

/// Identity equality: same scope and identifier, store-independent
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope.hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("scope", &self.scope)
            .field("id", &self.id)
            .field("entity_type", &self.entity_type)
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.scope, self.id)
    }
}

fn require_identity(scope: &str, id: &str) -> Result<()> {
    if scope.is_empty() {
        return Err(Error::invalid_argument("scope must not be empty"));
    }
    if id.is_empty() {
        return Err(Error::invalid_argument("identifier must not be empty"));
    }
    Ok(())
}

fn require_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("property name must not be empty"));
    }
    Ok(())
}
