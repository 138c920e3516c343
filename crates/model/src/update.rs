//! Deferred two-phase updates
//!
//! A [`PendingUpdate`] separates "decide and validate a mutation" from
//! "commit it". Construction (via the `Entity::prepare_*` methods) performs
//! all argument and category validation against the live store without
//! mutating anything; [`PendingUpdate::apply`] then commits exactly once.
//!
//! Between construction and apply the store is unchanged, so a caller can
//! prepare a batch of updates, surface every validation failure up front,
//! and only then let any of them take effect.
//!
//! `apply` takes the command by value: a second apply of the same update is
//! a compile error, not a runtime contract.

use std::fmt;
use std::sync::Arc;

use folio_core::{Error, ListValue, Result, Value, ValueKind};
use folio_storage::Store;

use crate::entity::Entity;

/// The captured operation of a pending update
#[derive(Debug, Clone)]
pub(crate) enum UpdateOp {
    /// Overwrite the property with a value of any category
    Set { name: String, value: Value },
    /// Remove the property; absent-name is a no-op at apply time
    Remove { name: String },
    /// Empty the list bound to the property
    ClearList { name: String },
    /// Append one element to the list
    Append { name: String, value: ListValue },
    /// Remove the first occurrence of the element from the list
    RemoveMember { name: String, value: ListValue },
}

impl UpdateOp {
    fn name(&self) -> &str {
        match self {
            UpdateOp::Set { name, .. }
            | UpdateOp::Remove { name }
            | UpdateOp::ClearList { name }
            | UpdateOp::Append { name, .. }
            | UpdateOp::RemoveMember { name, .. } => name,
        }
    }

    fn is_list_shaped(&self) -> bool {
        matches!(
            self,
            UpdateOp::ClearList { .. } | UpdateOp::Append { .. } | UpdateOp::RemoveMember { .. }
        )
    }
}

/// A validated, not-yet-committed mutation of one property
///
/// Holds the bound store and target identity by value; the originating
/// [`Entity`] facade may be dropped before the update is applied.
pub struct PendingUpdate {
    store: Arc<dyn Store>,
    scope: String,
    id: String,
    op: UpdateOp,
}

impl PendingUpdate {
    /// Validate `op` against `entity` and capture it
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty property name; `TypeMismatch` when a
    /// list-shaped operation targets a property currently bound to a
    /// scalar or reference. Nothing is mutated on failure.
    pub(crate) fn prepare(entity: &Entity, op: UpdateOp) -> Result<Self> {
        if op.name().is_empty() {
            return Err(Error::invalid_argument("property name must not be empty"));
        }
        if op.is_list_shaped() {
            if let Some(current) = entity.value(op.name())? {
                if !current.is_list() {
                    return Err(Error::type_mismatch(
                        op.name(),
                        ValueKind::List,
                        current.kind(),
                    ));
                }
            }
        }
        Ok(PendingUpdate {
            store: entity.store().clone(),
            scope: entity.scope().to_string(),
            id: entity.id().to_string(),
            op,
        })
    }

    /// Name of the property this update targets
    pub fn property_name(&self) -> &str {
        self.op.name()
    }

    /// Commit the captured mutation against the live store
    ///
    /// Consumes the command; the mutation runs exactly once.
    ///
    /// # Errors
    ///
    /// Store faults from the commit itself. Validation errors were already
    /// raised at construction and are never re-raised here — though a
    /// conflicting direct mutation between prepare and apply can still
    /// surface as a category error from the store.
    pub fn apply(self) -> Result<()> {
        let PendingUpdate {
            store,
            scope,
            id,
            op,
        } = self;
        match op {
            UpdateOp::Set { name, value } => store.set_property(&scope, &id, &name, value),
            UpdateOp::Remove { name } => store.remove_property(&scope, &id, &name),
            UpdateOp::ClearList { name } => store.clear_list(&scope, &id, &name),
            UpdateOp::Append { name, value } => store.add_list_member(&scope, &id, &name, value),
            UpdateOp::RemoveMember { name, value } => {
                store.remove_list_member(&scope, &id, &name, &value)
            }
        }
    }
}

impl fmt::Debug for PendingUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingUpdate")
            .field("scope", &self.scope)
            .field("id", &self.id)
            .field("op", &self.op)
            .finish()
    }
}
