//! MemoryStore: reference in-memory storage engine
//!
//! Implements the [`Store`] contract using:
//! - `BTreeMap<EntityKey, Properties>` for ordered entity storage
//! - `parking_lot::RwLock` for thread-safe access
//! - `AtomicU64` for minted-identifier counters
//!
//! # Design notes
//!
//! - Each contract call takes the lock once; there is no atomicity across
//!   calls (multi-step operations at the model layer are documented as
//!   non-isolated)
//! - Anonymous identifiers carry a uuid suffix so blank nodes minted by
//!   independent stores never collide when graphs are cloned across them
//! - Cleared lists stay bound as empty lists, so a clear is observable as
//!   "empty", never "absent"

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use folio_core::{
    Error, IdKind, ListValue, Result, Value, ValueKind, DOCUMENT_REF_PREFIX, ELEMENT_ID_PREFIX,
    LICENSE_REF_PREFIX,
};

use crate::traits::Store;

/// Prefix for minted blank-node identifiers
const ANON_ID_PREFIX: &str = "Anon-";

/// Composite key addressing one entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct EntityKey {
    scope: String,
    id: String,
}

impl EntityKey {
    fn new(scope: &str, id: &str) -> Self {
        EntityKey {
            scope: scope.to_string(),
            id: id.to_string(),
        }
    }
}

/// Property map of a single entity
type Properties = HashMap<String, Value>;

/// In-memory storage engine
///
/// The reference implementation of the [`Store`] contract. All state lives
/// behind one `RwLock`; suitable for tests, tooling, and as the template
/// for database-backed engines.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<EntityKey, Properties>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities currently stored, across all scopes
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check whether the store holds no entities
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Run `f` against the property map of an existing entity
    fn with_entity<R>(
        &self,
        scope: &str,
        id: &str,
        f: impl FnOnce(&Properties) -> Result<R>,
    ) -> Result<R> {
        let data = self.data.read();
        let props = data
            .get(&EntityKey::new(scope, id))
            .ok_or_else(|| Error::not_found(scope, id))?;
        f(props)
    }

    /// Run `f` against the mutable property map of an existing entity
    fn with_entity_mut<R>(
        &self,
        scope: &str,
        id: &str,
        f: impl FnOnce(&mut Properties) -> Result<R>,
    ) -> Result<R> {
        let mut data = self.data.write();
        let props = data
            .get_mut(&EntityKey::new(scope, id))
            .ok_or_else(|| Error::not_found(scope, id))?;
        f(props)
    }

    /// Allocate the next counter value for minted identifiers
    fn next_counter(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Store for MemoryStore {
    fn create(&self, scope: &str, id: &str) -> Result<()> {
        let mut data = self.data.write();
        let key = EntityKey::new(scope, id);
        if data.contains_key(&key) {
            return Err(Error::already_exists(scope, id));
        }
        data.insert(key, Properties::new());
        debug!(scope = %scope, id = %id, "created entity");
        Ok(())
    }

    fn exists(&self, scope: &str, id: &str) -> Result<bool> {
        Ok(self.data.read().contains_key(&EntityKey::new(scope, id)))
    }

    fn property_names(&self, scope: &str, id: &str) -> Result<BTreeSet<String>> {
        self.with_entity(scope, id, |props| Ok(props.keys().cloned().collect()))
    }

    fn get_property(&self, scope: &str, id: &str, name: &str) -> Result<Option<Value>> {
        self.with_entity(scope, id, |props| Ok(props.get(name).cloned()))
    }

    fn set_property(&self, scope: &str, id: &str, name: &str, value: Value) -> Result<()> {
        self.with_entity_mut(scope, id, |props| {
            props.insert(name.to_string(), value);
            Ok(())
        })
    }

    fn remove_property(&self, scope: &str, id: &str, name: &str) -> Result<()> {
        self.with_entity_mut(scope, id, |props| {
            props.remove(name);
            Ok(())
        })
    }

    fn get_list(&self, scope: &str, id: &str, name: &str) -> Result<Vec<ListValue>> {
        self.with_entity(scope, id, |props| match props.get(name) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => Ok(items.clone()),
            Some(other) => Err(Error::type_mismatch(name, ValueKind::List, other.kind())),
        })
    }

    fn add_list_member(&self, scope: &str, id: &str, name: &str, value: ListValue) -> Result<()> {
        self.with_entity_mut(scope, id, |props| {
            match props
                .entry(name.to_string())
                .or_insert_with(|| Value::List(Vec::new()))
            {
                Value::List(items) => {
                    items.push(value);
                    Ok(())
                }
                other => Err(Error::type_mismatch(name, ValueKind::List, other.kind())),
            }
        })
    }

    fn remove_list_member(
        &self,
        scope: &str,
        id: &str,
        name: &str,
        value: &ListValue,
    ) -> Result<()> {
        self.with_entity_mut(scope, id, |props| match props.get_mut(name) {
            None => Ok(()),
            Some(Value::List(items)) => {
                if let Some(pos) = items.iter().position(|item| item == value) {
                    items.remove(pos);
                }
                Ok(())
            }
            Some(other) => Err(Error::type_mismatch(name, ValueKind::List, other.kind())),
        })
    }

    fn clear_list(&self, scope: &str, id: &str, name: &str) -> Result<()> {
        self.with_entity_mut(scope, id, |props| {
            match props
                .entry(name.to_string())
                .or_insert_with(|| Value::List(Vec::new()))
            {
                Value::List(items) => {
                    items.clear();
                    Ok(())
                }
                other => Err(Error::type_mismatch(name, ValueKind::List, other.kind())),
            }
        })
    }

    fn generate_id(&self, scope: &str, hint: IdKind) -> Result<String> {
        let prefix = match hint {
            IdKind::DocumentRef => DOCUMENT_REF_PREFIX,
            IdKind::LicenseRef => LICENSE_REF_PREFIX,
            IdKind::ElementId => ELEMENT_ID_PREFIX,
            IdKind::Anonymous => ANON_ID_PREFIX,
            IdKind::Literal | IdKind::ListedLicense => {
                return Err(Error::invalid_argument(format!(
                    "cannot mint an identifier of category {hint}"
                )))
            }
        };
        loop {
            let candidate = if hint == IdKind::Anonymous {
                format!("{}{}", prefix, Uuid::new_v4().simple())
            } else {
                format!("{}{}", prefix, self.next_counter())
            };
            if !self.exists(scope, &candidate)? {
                debug!(scope = %scope, id = %candidate, "minted identifier");
                return Ok(candidate);
            }
        }
    }
}
