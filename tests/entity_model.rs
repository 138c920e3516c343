//! End-to-end tests for the entity model over the reference store
//!
//! Exercises the full facade contract the way a document library would use
//! it: mixed property sets, deferred updates, and the graph operations
//! (equivalence, clone, copy) across independent store instances.

use std::sync::Arc;

use folio::{
    classify_id, BuiltinCatalog, Entity, IdKind, ListValue, MemoryStore, Store, Value,
};

const SCOPE: &str = "https://test.document.uri";

fn new_store() -> Arc<dyn Store> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Arc::new(MemoryStore::new())
}

/// Bind or create the entities referenced by the canonical fixture
fn ensure_target(store: &Arc<dyn Store>, id: &str, entity_type: &str) -> Entity {
    if store.exists(SCOPE, id).unwrap() {
        return Entity::attach(store.clone(), SCOPE, id, entity_type).unwrap();
    }
    let target = Entity::create(store.clone(), SCOPE, id, entity_type).unwrap();
    target.set_value("comment", format!("about {id}")).unwrap();
    target
}

/// Populate the canonical ten-property fixture:
/// 3 strings + 2 booleans + 3 lists + 2 entity references
fn populate(entity: &Entity) {
    let store = entity.store();

    entity.set_value("valueProp1", "value1").unwrap();
    entity.set_value("valueProp2", "value2").unwrap();
    entity.set_value("valueProp3", "value3").unwrap();

    entity.set_value("boolProp1", true).unwrap();
    entity.set_value("boolProp2", false).unwrap();

    let t1 = ensure_target(store, "typeId1", "License");
    let t2 = ensure_target(store, "typeId2", "Exception");

    entity
        .set_value("listProp1", Value::list(["ListItem1", "listItem2", "listItem3"]))
        .unwrap();
    entity
        .set_value(
            "listProp2",
            Value::List(vec![
                ListValue::Bool(true),
                ListValue::Bool(false),
                ListValue::Bool(true),
            ]),
        )
        .unwrap();
    entity
        .set_value(
            "listProp3",
            Value::List(vec![ListValue::Ref(t1.to_ref()), ListValue::Ref(t2.to_ref())]),
        )
        .unwrap();

    entity.set_value("typeProp1", t1.to_ref()).unwrap();
    entity.set_value("typeProp2", t2.to_ref()).unwrap();
}

fn populated_entity(store: &Arc<dyn Store>, id: &str) -> Entity {
    let entity = Entity::create(store.clone(), SCOPE, id, "Annotation").unwrap();
    populate(&entity);
    entity
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn attach_fails_without_existing_entity() {
    let store = new_store();
    let err = Entity::attach(store, SCOPE, "testId", "Annotation").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn create_then_attach_shares_state() {
    let store = new_store();
    let created = Entity::create(store.clone(), SCOPE, "testId", "Annotation").unwrap();
    created.set_value("property1", "value1").unwrap();

    let attached = Entity::attach(store, SCOPE, "testId", "Annotation").unwrap();
    assert_eq!(
        attached.string_value("property1").unwrap().as_deref(),
        Some("value1")
    );
}

#[test]
fn create_conflicting_identifier_fails() {
    let store = new_store();
    Entity::create(store.clone(), SCOPE, "testId", "Annotation").unwrap();
    let err = Entity::create(store, SCOPE, "testId", "Annotation").unwrap_err();
    assert!(err.is_already_exists());
}

// ============================================================================
// The ten-property scenario
// ============================================================================

#[test]
fn ten_properties_then_remove_one() {
    let store = new_store();
    let entity = populated_entity(&store, "testId");

    let names = entity.property_names().unwrap();
    assert_eq!(names.len(), 10);
    for expected in [
        "valueProp1",
        "valueProp2",
        "valueProp3",
        "boolProp1",
        "boolProp2",
        "listProp1",
        "listProp2",
        "listProp3",
        "typeProp1",
        "typeProp2",
    ] {
        assert!(names.contains(expected), "missing {expected}");
    }

    entity.remove_property("valueProp2").unwrap();
    assert_eq!(entity.property_names().unwrap().len(), 9);
    assert_eq!(entity.value("valueProp2").unwrap(), None);
}

#[test]
fn typed_accessors_round_trip() {
    let store = new_store();
    let entity = populated_entity(&store, "testId");

    assert_eq!(
        entity.string_value("valueProp1").unwrap().as_deref(),
        Some("value1")
    );
    assert_eq!(entity.bool_value("boolProp1").unwrap(), Some(true));
    assert_eq!(entity.bool_value("boolProp2").unwrap(), Some(false));
    assert_eq!(
        entity.string_list("listProp1").unwrap(),
        vec!["ListItem1", "listItem2", "listItem3"]
    );
    assert_eq!(entity.bool_list("listProp2").unwrap(), vec![true, false, true]);
    let r = entity.ref_value("typeProp1").unwrap().unwrap();
    assert_eq!(r.id(), "typeId1");
    assert_eq!(r.entity_type(), "License");
}

#[test]
fn mismatched_accessors_fail_without_coercion() {
    let store = new_store();
    let entity = populated_entity(&store, "testId");

    assert!(entity.string_value("boolProp1").unwrap_err().is_type_mismatch());
    assert!(entity.bool_value("valueProp1").unwrap_err().is_type_mismatch());
    assert!(entity.ref_value("listProp1").unwrap_err().is_type_mismatch());
    assert!(entity.list_value("valueProp1").unwrap_err().is_type_mismatch());
    assert!(entity.string_list("listProp2").unwrap_err().is_type_mismatch());
}

#[test]
fn unset_names_read_as_absent_or_empty() {
    let store = new_store();
    let entity = Entity::create(store, SCOPE, "testId", "Annotation").unwrap();

    assert_eq!(entity.value("never").unwrap(), None);
    assert_eq!(entity.string_value("never").unwrap(), None);
    assert!(entity.list_value("never").unwrap().is_empty());
    assert!(entity.string_list("never").unwrap().is_empty());
    assert!(entity.property_names().unwrap().is_empty());
}

// ============================================================================
// List mutation semantics
// ============================================================================

#[test]
fn list_append_remove_clear_replace() {
    let store = new_store();
    let entity = populated_entity(&store, "testId");

    entity.add_to_list("listProp1", "newValue").unwrap();
    assert_eq!(
        entity.string_list("listProp1").unwrap(),
        vec!["ListItem1", "listItem2", "listItem3", "newValue"]
    );

    entity.remove_from_list("listProp1", "listItem2").unwrap();
    assert_eq!(
        entity.string_list("listProp1").unwrap(),
        vec!["ListItem1", "listItem3", "newValue"]
    );

    // replace substitutes the whole sequence atomically
    entity
        .set_value("listProp1", Value::list(["newList1", "newList2"]))
        .unwrap();
    assert_eq!(entity.string_list("listProp1").unwrap(), vec!["newList1", "newList2"]);

    entity.clear_list("listProp1").unwrap();
    assert!(entity.list_value("listProp1").unwrap().is_empty());

    // untouched lists keep their contents
    assert_eq!(entity.bool_list("listProp2").unwrap(), vec![true, false, true]);
}

#[test]
fn duplicate_removal_takes_one_occurrence() {
    let store = new_store();
    let entity = Entity::create(store, SCOPE, "testId", "Annotation").unwrap();
    for item in ["x", "x", "y"] {
        entity.add_to_list("l", item).unwrap();
    }
    entity.remove_from_list("l", "x").unwrap();
    assert_eq!(entity.string_list("l").unwrap(), vec!["x", "y"]);
    // removing an absent value is a no-op
    entity.remove_from_list("l", "zzz").unwrap();
    assert_eq!(entity.string_list("l").unwrap(), vec!["x", "y"]);
}

#[test]
fn cleared_list_reads_empty_not_absent() {
    let store = new_store();
    let entity = Entity::create(store, SCOPE, "testId", "Annotation").unwrap();
    entity.add_to_list("l", "a").unwrap();
    entity.clear_list("l").unwrap();

    assert!(entity.list_value("l").unwrap().is_empty());
    assert!(entity.property_names().unwrap().contains("l"));
}

// ============================================================================
// Deferred updates
// ============================================================================

#[test]
fn deferred_batch_validates_up_front_and_applies_later() {
    let store = new_store();
    let entity = populated_entity(&store, "testId");

    let updates = vec![
        entity.prepare_set("valueProp1", "rewritten").unwrap(),
        entity.prepare_remove("boolProp2").unwrap(),
        entity.prepare_append("listProp1", "appended").unwrap(),
        entity.prepare_remove_member("listProp1", "ListItem1").unwrap(),
        entity.prepare_clear_list("listProp2").unwrap(),
    ];

    // a list-shaped update against a scalar fails at prepare time
    assert!(entity.prepare_append("valueProp1", "x").unwrap_err().is_type_mismatch());

    // nothing has changed yet
    assert_eq!(
        entity.string_value("valueProp1").unwrap().as_deref(),
        Some("value1")
    );
    assert_eq!(entity.bool_value("boolProp2").unwrap(), Some(false));
    assert_eq!(entity.string_list("listProp1").unwrap().len(), 3);

    for update in updates {
        update.apply().unwrap();
    }

    assert_eq!(
        entity.string_value("valueProp1").unwrap().as_deref(),
        Some("rewritten")
    );
    assert_eq!(entity.bool_value("boolProp2").unwrap(), None);
    assert_eq!(
        entity.string_list("listProp1").unwrap(),
        vec!["listItem2", "listItem3", "appended"]
    );
    assert!(entity.list_value("listProp2").unwrap().is_empty());
}

// ============================================================================
// Identity vs equivalence
// ============================================================================

#[test]
fn identity_equality_ignores_store_instance() {
    let store1 = new_store();
    let store2 = new_store();
    let a = populated_entity(&store1, "testId");
    let b = populated_entity(&store2, "testId");
    let c = populated_entity(&store1, "testId2");

    assert_eq!(a, b); // same (scope, id), different stores
    assert_ne!(a, c); // different id, same store
}

#[test]
fn equivalence_is_reflexive() {
    let store = new_store();
    let entity = populated_entity(&store, "testId");
    assert!(entity.equivalent(&entity).unwrap());
}

#[test]
fn equivalence_across_identifiers_and_stores() {
    let store1 = new_store();
    let a = populated_entity(&store1, "testId");

    // same store, different identifier
    let b = populated_entity(&store1, "testId2");
    assert!(a.equivalent(&b).unwrap());
    assert!(b.equivalent(&a).unwrap());

    // different store, same identifier
    let store2 = new_store();
    let c = populated_entity(&store2, "testId");
    assert!(a.equivalent(&c).unwrap());
    assert!(c.equivalent(&b).unwrap());
}

#[test]
fn equivalence_detects_differences() {
    let store1 = new_store();
    let store2 = new_store();
    let a = populated_entity(&store1, "testId");
    let b = populated_entity(&store2, "testId");

    b.set_value("valueProp1", "changed").unwrap();
    assert!(!a.equivalent(&b).unwrap());
    assert!(!b.equivalent(&a).unwrap());

    // a property present on one side only also breaks equivalence
    b.set_value("valueProp1", "value1").unwrap();
    b.set_value("extra", true).unwrap();
    assert!(!a.equivalent(&b).unwrap());
}

#[test]
fn equivalence_of_lists_is_order_insensitive() {
    let store1 = new_store();
    let store2 = new_store();
    let a = Entity::create(store1, SCOPE, "e", "Thing").unwrap();
    let b = Entity::create(store2, SCOPE, "e", "Thing").unwrap();

    a.set_value("l", Value::list(["x", "y", "z"])).unwrap();
    b.set_value("l", Value::list(["z", "x", "y"])).unwrap();
    assert!(a.equivalent(&b).unwrap());

    // membership still matters
    b.set_value("l", Value::list(["z", "x"])).unwrap();
    assert!(!a.equivalent(&b).unwrap());
}

#[test]
fn equivalence_resolves_references_through_each_sides_store() {
    let store1 = new_store();
    let store2 = new_store();
    let a = populated_entity(&store1, "testId");
    let b = populated_entity(&store2, "testId");
    assert!(a.equivalent(&b).unwrap());

    // changing a property of a *referenced* entity breaks equivalence of
    // the referencing entities
    let target = Entity::attach(store2, SCOPE, "typeId1", "License").unwrap();
    target.set_value("comment", "changed downstream").unwrap();
    assert!(!a.equivalent(&b).unwrap());
}

#[test]
fn equivalence_terminates_on_cycles() {
    fn cyclic_pair(store: &Arc<dyn Store>) -> Entity {
        let a = Entity::create(store.clone(), SCOPE, "cycleA", "Node").unwrap();
        let b = Entity::create(store.clone(), SCOPE, "cycleB", "Node").unwrap();
        a.set_value("next", b.to_ref()).unwrap();
        b.set_value("next", a.to_ref()).unwrap();
        a
    }

    let store1 = new_store();
    let store2 = new_store();
    let a = cyclic_pair(&store1);
    let b = cyclic_pair(&store2);
    assert!(a.equivalent(&b).unwrap());

    // break one arm of the second cycle
    let b_next = Entity::attach(store2, SCOPE, "cycleB", "Node").unwrap();
    b_next.set_value("label", "different").unwrap();
    assert!(!a.equivalent(&b).unwrap());
}

// ============================================================================
// Clone
// ============================================================================

#[test]
fn clone_into_fresh_store_keeps_identifier() {
    let store1 = new_store();
    let entity = populated_entity(&store1, "testId");

    let store2 = new_store();
    let cloned = entity.clone_into(&store2).unwrap();

    assert_eq!(cloned.id(), "testId");
    assert_eq!(cloned, entity); // identity equality: same (scope, id)
    assert!(cloned.equivalent(&entity).unwrap());
    assert!(cloned.same_store(&Entity::attach(store2, SCOPE, "testId", "Annotation").unwrap()));
}

#[test]
fn clone_with_conflicting_identifier_mints_fresh_one() {
    let store1 = new_store();
    let entity = populated_entity(&store1, "ElementRef-7");

    let store2 = new_store();
    // occupy the identifier in the target
    Entity::create(store2.clone(), SCOPE, "ElementRef-7", "Other").unwrap();

    let cloned = entity.clone_into(&store2).unwrap();
    assert_ne!(cloned.id(), "ElementRef-7");
    assert!(cloned.id().starts_with("ElementRef-"));
    assert!(cloned.equivalent(&entity).unwrap());
}

#[test]
fn clone_reuses_shared_subgraph() {
    let concrete = Arc::new(MemoryStore::new());
    let store1: Arc<dyn Store> = concrete;
    let shared = Entity::create(store1.clone(), SCOPE, "shared", "License").unwrap();
    shared.set_value("name", "Shared License").unwrap();

    let entity = Entity::create(store1, SCOPE, "root", "Package").unwrap();
    entity.set_value("declared", shared.to_ref()).unwrap();
    entity.set_value("concluded", shared.to_ref()).unwrap();

    let target_concrete = Arc::new(MemoryStore::new());
    let target: Arc<dyn Store> = target_concrete.clone();
    let cloned = entity.clone_into(&target).unwrap();

    // both properties resolve to the same cloned entity, cloned once
    let declared = cloned.ref_value("declared").unwrap().unwrap();
    let concluded = cloned.ref_value("concluded").unwrap().unwrap();
    assert_eq!(declared, concluded);
    assert_eq!(target_concrete.len(), 2); // root + one shared clone
}

#[test]
fn clone_terminates_on_cyclic_graphs() {
    let store1 = new_store();
    let a = Entity::create(store1.clone(), SCOPE, "cycleA", "Node").unwrap();
    let b = Entity::create(store1, SCOPE, "cycleB", "Node").unwrap();
    a.set_value("next", b.to_ref()).unwrap();
    b.set_value("next", a.to_ref()).unwrap();

    let store2 = new_store();
    let cloned_a = a.clone_into(&store2).unwrap();

    // the clone's cycle closes onto the clone, not the source
    let next = cloned_a.ref_value("next").unwrap().unwrap();
    let cloned_b = Entity::attach(store2.clone(), next.scope(), next.id(), next.entity_type()).unwrap();
    let back = cloned_b.ref_value("next").unwrap().unwrap();
    assert_eq!(back.id(), cloned_a.id());
    assert!(store2.exists(SCOPE, "cycleB").unwrap());
    assert!(cloned_a.equivalent(&a).unwrap());
}

// ============================================================================
// Copy
// ============================================================================

#[test]
fn copy_from_within_one_store() {
    let store = new_store();
    let source = populated_entity(&store, "testId");

    let dest = Entity::create(store, SCOPE, "id2", "Annotation").unwrap();
    dest.set_value("stale", "to be replaced").unwrap();
    dest.copy_from(&source).unwrap();

    assert!(source.equivalent(&dest).unwrap());
    // prior property set was overwritten wholesale
    assert_eq!(dest.value("stale").unwrap(), None);
    // same store: references copied by identity
    assert_eq!(
        dest.ref_value("typeProp1").unwrap(),
        source.ref_value("typeProp1").unwrap()
    );
}

#[test]
fn copy_from_across_stores_rehomes_references() {
    let store1 = new_store();
    let source = populated_entity(&store1, "testId");

    let store2 = new_store();
    let dest = Entity::create(store2.clone(), SCOPE, "testId", "Annotation").unwrap();
    dest.copy_from(&source).unwrap();

    assert!(source.equivalent(&dest).unwrap());
    // the referenced entities now exist in the destination store
    assert!(store2.exists(SCOPE, "typeId1").unwrap());
    assert!(store2.exists(SCOPE, "typeId2").unwrap());
}

// ============================================================================
// Identifier classification
// ============================================================================

#[test]
fn classification_precedence() {
    let catalog = BuiltinCatalog::default();

    assert_eq!(classify_id("NONE", &catalog), IdKind::Literal);
    assert_eq!(classify_id("NOASSERTION", &catalog), IdKind::Literal);
    assert_eq!(classify_id("DocumentRef-12", &catalog), IdKind::DocumentRef);
    assert_eq!(classify_id("LicenseRef-12", &catalog), IdKind::LicenseRef);
    assert_eq!(classify_id("Apache-2.0", &catalog), IdKind::ListedLicense);
    assert_eq!(classify_id("ElementRef-12", &catalog), IdKind::ElementId);
    assert_eq!(classify_id("anything", &catalog), IdKind::Anonymous);
}
