//! Graph traversals: equivalence, clone, copy
//!
//! These operations walk the reference graph reachable from an entity,
//! resolving entity-reference values through each facade's own store. All
//! traversals carry explicit bookkeeping (a visited-pair map for
//! equivalence, an identifier-remap table for clone/copy) so shared
//! sub-graphs are processed once and cyclic graphs terminate.
//!
//! Multi-step by nature, none of these operations are isolated against
//! concurrent mutation of the entities they visit; the store serializes
//! individual calls only.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use folio_core::{id_shape, EntityRef, Error, IdKind, ListValue, Result, Value};
use folio_storage::Store;

use crate::entity::Entity;

/// Traversal depth cap for pathological non-cyclic reference chains
///
/// Cycles terminate through the visited/remap tables; the cap only exists
/// so a degenerate chain fails with an error instead of a stack overflow.
const MAX_GRAPH_DEPTH: usize = 128;

/// (scope, id) of the left entity, (scope, id) of the right entity
type PairKey = (String, String, String, String);

/// Source (scope, id) → target (scope, id) for one clone/copy operation
type IdMap = HashMap<(String, String), (String, String)>;

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_GRAPH_DEPTH {
        return Err(Error::invalid_argument(
            "reference graph exceeds maximum traversal depth",
        ));
    }
    Ok(())
}

// ============================================================================
// Equivalence
// ============================================================================

pub(crate) fn equivalent(a: &Entity, b: &Entity) -> Result<bool> {
    let mut seen: HashMap<PairKey, Option<bool>> = HashMap::new();
    entities_equivalent(a, b, &mut seen, 0)
}

fn entities_equivalent(
    a: &Entity,
    b: &Entity,
    seen: &mut HashMap<PairKey, Option<bool>>,
    depth: usize,
) -> Result<bool> {
    check_depth(depth)?;

    // Same entity through the same store: no traversal needed
    if a.same_store(b) && a.scope() == b.scope() && a.id() == b.id() {
        return Ok(true);
    }

    let key: PairKey = (
        a.scope().to_string(),
        a.id().to_string(),
        b.scope().to_string(),
        b.id().to_string(),
    );
    match seen.get(&key) {
        // Pair fully compared before: reuse the verdict
        Some(Some(known)) => return Ok(*known),
        // Pair currently under comparison higher up the stack: a cycle.
        // Assume equal here; the outer comparison settles the verdict.
        Some(None) => return Ok(true),
        None => {}
    }
    seen.insert(key.clone(), None);

    let mut names = a.property_names()?;
    names.extend(b.property_names()?);

    let mut result = true;
    for name in &names {
        let va = a.value(name)?;
        let vb = b.value(name)?;
        if !values_equivalent(a, b, va, vb, seen, depth)? {
            result = false;
            break;
        }
    }
    seen.insert(key, Some(result));
    Ok(result)
}

fn values_equivalent(
    a: &Entity,
    b: &Entity,
    va: Option<Value>,
    vb: Option<Value>,
    seen: &mut HashMap<PairKey, Option<bool>>,
    depth: usize,
) -> Result<bool> {
    match (va, vb) {
        (None, None) => Ok(true),
        (Some(Value::String(x)), Some(Value::String(y))) => Ok(x == y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => Ok(x == y),
        (Some(Value::Ref(x)), Some(Value::Ref(y))) => {
            refs_equivalent(a.store(), b.store(), &x, &y, seen, depth)
        }
        (Some(Value::List(x)), Some(Value::List(y))) => {
            lists_equivalent(a.store(), b.store(), &x, &y, seen, depth)
        }
        // category mismatch, or set on one side only
        _ => Ok(false),
    }
}

fn refs_equivalent(
    sa: &Arc<dyn Store>,
    sb: &Arc<dyn Store>,
    x: &EntityRef,
    y: &EntityRef,
    seen: &mut HashMap<PairKey, Option<bool>>,
    depth: usize,
) -> Result<bool> {
    // Identical triples through the same store are the same entity
    if Arc::ptr_eq(sa, sb) && x == y {
        return Ok(true);
    }
    let ex = Entity::attach(sa.clone(), x.scope(), x.id(), x.entity_type())?;
    let ey = Entity::attach(sb.clone(), y.scope(), y.id(), y.entity_type())?;
    entities_equivalent(&ex, &ey, seen, depth + 1)
}

/// Set-equality over list members: order- and duplicate-insensitive
fn lists_equivalent(
    sa: &Arc<dyn Store>,
    sb: &Arc<dyn Store>,
    xs: &[ListValue],
    ys: &[ListValue],
    seen: &mut HashMap<PairKey, Option<bool>>,
    depth: usize,
) -> Result<bool> {
    for x in xs {
        if !any_member_equivalent(sa, sb, x, ys, seen, depth)? {
            return Ok(false);
        }
    }
    for y in ys {
        if !any_member_equivalent(sb, sa, y, xs, seen, depth)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_member_equivalent(
    sx: &Arc<dyn Store>,
    sy: &Arc<dyn Store>,
    item: &ListValue,
    others: &[ListValue],
    seen: &mut HashMap<PairKey, Option<bool>>,
    depth: usize,
) -> Result<bool> {
    for other in others {
        if members_equivalent(sx, sy, item, other, seen, depth)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn members_equivalent(
    sx: &Arc<dyn Store>,
    sy: &Arc<dyn Store>,
    x: &ListValue,
    y: &ListValue,
    seen: &mut HashMap<PairKey, Option<bool>>,
    depth: usize,
) -> Result<bool> {
    match (x, y) {
        (ListValue::String(a), ListValue::String(b)) => Ok(a == b),
        (ListValue::Bool(a), ListValue::Bool(b)) => Ok(a == b),
        (ListValue::Ref(a), ListValue::Ref(b)) => refs_equivalent(sx, sy, a, b, seen, depth),
        _ => Ok(false),
    }
}

// ============================================================================
// Clone / copy
// ============================================================================

pub(crate) fn clone_into(source: &Entity, target: &Arc<dyn Store>) -> Result<Entity> {
    let mut remap = IdMap::new();
    let cloned = clone_entity(source, target, &mut remap, 0)?;
    debug!(source = %source, cloned = %cloned, "cloned entity graph");
    Ok(cloned)
}

fn clone_entity(
    source: &Entity,
    target: &Arc<dyn Store>,
    remap: &mut IdMap,
    depth: usize,
) -> Result<Entity> {
    check_depth(depth)?;

    let key = (source.scope().to_string(), source.id().to_string());
    if let Some((scope, id)) = remap.get(&key) {
        // Already cloned in this operation: reuse, never duplicate
        return Entity::attach(target.clone(), scope, id, source.entity_type());
    }

    let id = if target.exists(source.scope(), source.id())? {
        target.generate_id(source.scope(), generation_hint(source.id()))?
    } else {
        source.id().to_string()
    };
    let cloned = Entity::create(target.clone(), source.scope(), &id, source.entity_type())?;
    // Register before copying properties so cyclic references resolve to
    // the clone instead of recursing forever
    remap.insert(key, (source.scope().to_string(), id));

    for name in source.property_names()? {
        if let Some(value) = source.value(&name)? {
            let rewritten = rewrite_value(source.store(), target, value, remap, depth)?;
            cloned.set_value(&name, rewritten)?;
        }
    }
    Ok(cloned)
}

/// Identifier-generation hint matching the shape of the conflicting id
fn generation_hint(id: &str) -> IdKind {
    match id_shape(id) {
        kind @ (IdKind::DocumentRef | IdKind::LicenseRef | IdKind::ElementId) => kind,
        _ => IdKind::Anonymous,
    }
}

fn rewrite_value(
    src: &Arc<dyn Store>,
    target: &Arc<dyn Store>,
    value: Value,
    remap: &mut IdMap,
    depth: usize,
) -> Result<Value> {
    Ok(match value {
        Value::String(_) | Value::Bool(_) => value,
        Value::Ref(r) => Value::Ref(rewrite_ref(src, target, r, remap, depth)?),
        Value::List(items) => Value::List(
            items
                .into_iter()
                .map(|item| {
                    Ok(match item {
                        ListValue::Ref(r) => {
                            ListValue::Ref(rewrite_ref(src, target, r, remap, depth)?)
                        }
                        other => other,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}

fn rewrite_ref(
    src: &Arc<dyn Store>,
    target: &Arc<dyn Store>,
    r: EntityRef,
    remap: &mut IdMap,
    depth: usize,
) -> Result<EntityRef> {
    if let Some((scope, id)) = remap.get(&(r.scope().to_string(), r.id().to_string())) {
        return Ok(EntityRef::new(scope.clone(), id.clone(), r.entity_type()));
    }
    // An entity already present in the target is reused, not re-cloned
    if target.exists(r.scope(), r.id())? {
        return Ok(r);
    }
    match Entity::attach(src.clone(), r.scope(), r.id(), r.entity_type()) {
        Ok(nested) => {
            let cloned = clone_entity(&nested, target, remap, depth + 1)?;
            Ok(cloned.to_ref())
        }
        // Dangling reference: nothing to resolve, copy the triple verbatim
        Err(Error::NotFound { .. }) => Ok(r),
        Err(e) => Err(e),
    }
}

pub(crate) fn copy_from(dest: &Entity, source: &Entity) -> Result<()> {
    // Copying an entity onto itself is a no-op
    if dest.same_store(source) && dest.scope() == source.scope() && dest.id() == source.id() {
        return Ok(());
    }

    for name in dest.property_names()? {
        dest.remove_property(&name)?;
    }

    let cross_store = !dest.same_store(source);
    let mut remap = IdMap::new();
    // References back to the source entity become references to dest
    remap.insert(
        (source.scope().to_string(), source.id().to_string()),
        (dest.scope().to_string(), dest.id().to_string()),
    );

    for name in source.property_names()? {
        if let Some(value) = source.value(&name)? {
            let rewritten = if cross_store {
                rewrite_value(source.store(), dest.store(), value, &mut remap, 0)?
            } else {
                // Same store: nested references are kept by identity
                value
            };
            dest.set_value(&name, rewritten)?;
        }
    }
    debug!(source = %source, dest = %dest, "copied entity properties");
    Ok(())
}
