//! End-to-end suite for mapped host types against the in-memory backend.

use docmapper::bson::{Bson, doc};
use docmapper::memory::MemoryStore;
use docmapper::{document, prelude::*};
use futures::executor::block_on;

document! {
    /// Baseline host type with typed fields and an explicit collection.
    pub struct Person in "people" {
        name: String,
        age: Int,
    }
}

document! {
    pub struct Persona {
        name: String,
    }
}

document! {
    pub struct Strict {
        name: String { required: true },
    }
}

document! {
    pub struct OnPopulate {
        name: String,
        loaded: Bool,
    }

    impl {
        fn on_populate(&mut self) {
            self.record.set("loaded", true.into()).unwrap();
        }
    }
}

document! {
    pub struct BeforeSave {
        name: String,
    }

    impl {
        fn before_save(&mut self) -> MapperResult<()> {
            Err(MapperError::hook("rejected by before_save"))
        }
    }
}

document! {
    pub struct AfterSave {
        confirmed: Bool,
    }

    impl {
        fn after_save(&mut self) -> MapperResult<()> {
            self.record.set("confirmed", true.into())
        }
    }
}

fn store() -> DocumentStore<MemoryStore> {
    DocumentStore::new(MemoryStore::new())
}

#[test]
fn generates_field_accessors() {
    let mut person = Person::new();

    assert_eq!(person.name(), &Bson::Null);
    person.set_name("valor").unwrap();
    assert_eq!(person.name(), &Bson::from("valor"));
}

#[test]
fn accessors_enforce_declared_types() {
    let mut person = Person::new();
    person.set_age(25).unwrap();

    let err = person.set_age("old").unwrap_err();
    assert!(matches!(err, MapperError::FieldType { .. }));
    assert_eq!(person.age(), &Bson::Int32(25));
}

#[test]
fn required_fields_reject_nil() {
    let mut strict = Strict::new();

    let err = strict.set_name(Bson::Null).unwrap_err();
    assert!(matches!(err, MapperError::RequiredField(_)));

    // An optional field accepts nil freely.
    let mut person = Person::new();
    person.set_name(Bson::Null).unwrap();
}

#[test]
fn fields_lists_registration_order_with_id_first() {
    assert_eq!(Person::fields(), vec!["_id", "name", "age"]);
}

#[test]
fn explicit_collection_binding() {
    assert_eq!(Person::schema().collection(), "people");
}

#[test]
fn default_collection_is_pluralized_lower_first() {
    assert_eq!(Persona::schema().collection(), "personas");
}

#[test]
fn to_document_projects_all_fields_with_nils() {
    let mut person = Person::new();
    person.set_name("pepe").unwrap();
    person.set_age(25).unwrap();

    assert_eq!(
        person.to_document(),
        doc! { "_id": Bson::Null, "name": "pepe", "age": 25 }
    );
}

#[test]
fn save_assigns_identifier_and_persists() {
    let store = store();
    let mut person = Person::new();
    person.set_name("value").unwrap();

    let before = block_on(store.count::<Person>()).unwrap();
    block_on(store.save(&mut person)).unwrap();
    let after = block_on(store.count::<Person>()).unwrap();

    assert_eq!(after, before + 1);
    assert_ne!(person.id(), &Bson::Null);

    let results: Vec<Person> =
        block_on(store.find(Some(Filter::new().eq("_id", person.id().clone())))).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id(), person.id());
}

#[test]
fn saved_instances_get_distinct_identifiers() {
    let store = store();
    let mut a = Person::new();
    let mut b = Person::new();

    block_on(store.save(&mut a)).unwrap();
    block_on(store.save(&mut b)).unwrap();

    assert_ne!(a.id(), b.id());
}

#[test]
fn saving_a_persisted_instance_is_a_duplicate() {
    let store = store();
    let mut person = Person::new();
    block_on(store.save(&mut person)).unwrap();

    let err = block_on(store.save(&mut person)).unwrap_err();
    assert!(matches!(err, MapperError::DocumentAlreadyExists(..)));
}

#[test]
fn update_rewrites_fields_and_keeps_identifier() {
    let store = store();
    let mut person = Person::new();
    person.set_name("before").unwrap();
    block_on(store.save(&mut person)).unwrap();
    let id = person.id().clone();

    person.set_name("after").unwrap();
    block_on(store.update(&person)).unwrap();

    let results: Vec<Person> =
        block_on(store.find(Some(Filter::new().eq("_id", id.clone())))).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), &Bson::from("after"));
    assert_eq!(results[0].id(), &id);
}

#[test]
fn remove_deletes_and_clears_identifier() {
    let store = store();
    let mut person = Person::new();
    block_on(store.save(&mut person)).unwrap();
    let before = block_on(store.count::<Person>()).unwrap();

    block_on(store.remove(&mut person)).unwrap();

    assert_eq!(block_on(store.count::<Person>()).unwrap(), before - 1);
    assert_eq!(person.id(), &Bson::Null);
}

#[test]
fn removed_instances_can_be_saved_again_with_a_new_identifier() {
    let store = store();
    let mut person = Person::new();
    block_on(store.save(&mut person)).unwrap();
    let first_id = person.id().clone();

    block_on(store.remove(&mut person)).unwrap();
    block_on(store.save(&mut person)).unwrap();

    assert_ne!(person.id(), &Bson::Null);
    assert_ne!(person.id(), &first_id);
    assert_eq!(block_on(store.count::<Person>()).unwrap(), 1);
}

#[test]
fn find_without_filter_returns_every_instance() {
    let store = store();
    for i in 0..3 {
        let mut person = Person::new();
        person.set_age(i).unwrap();
        block_on(store.save(&mut person)).unwrap();
    }

    let results: Vec<Person> = block_on(store.find(None)).unwrap();
    assert_eq!(results.len(), 3);
}

#[test]
fn find_with_no_matches_is_an_empty_sequence() {
    let store = store();

    let results: Vec<Person> =
        block_on(store.find(Some(Filter::new().eq("name", "nobody")))).unwrap();
    assert!(results.is_empty());
}

#[test]
fn dynamic_finder_resolves_field_combinations() {
    let store = store();
    let mut person = Person::new();
    person.set_name("find me").unwrap();
    block_on(store.save(&mut person)).unwrap();

    let mut other = Person::new();
    other.set_name("not me").unwrap();
    block_on(store.save(&mut other)).unwrap();

    let results: Vec<Person> = block_on(store.find_by(
        "find_by_id_and_name",
        vec![person.id().clone(), Bson::from("find me")],
    ))
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id(), person.id());
}

#[test]
fn unknown_finder_fields_fall_through_to_unrecognized_selector() {
    let store = store();
    let mut person = Person::new();
    block_on(store.save(&mut person)).unwrap();

    let err = block_on(store.find_by::<Person>("find_by_unknownfield", vec![Bson::from(1)]))
        .unwrap_err();

    assert!(matches!(err, MapperError::UnrecognizedSelector(_)));
}

#[test]
fn populate_hook_runs_once_per_loaded_instance() {
    let store = store();
    for _ in 0..3 {
        let mut instance = OnPopulate::new();
        assert_eq!(instance.loaded(), &Bson::Null);
        block_on(store.save(&mut instance)).unwrap();
    }

    let results: Vec<OnPopulate> = block_on(store.find(None)).unwrap();
    assert_eq!(results.len(), 3);
    for instance in &results {
        assert_eq!(instance.loaded(), &Bson::Boolean(true));
    }
}

#[test]
fn failing_before_save_prevents_the_insert() {
    let store = store();
    let mut instance = BeforeSave::new();
    let before = block_on(store.count::<BeforeSave>()).unwrap();

    let err = block_on(store.save(&mut instance)).unwrap_err();

    assert!(matches!(err, MapperError::Hook(_)));
    assert_eq!(block_on(store.count::<BeforeSave>()).unwrap(), before);
    // The hook runs before identifier generation.
    assert_eq!(instance.id(), &Bson::Null);
}

#[test]
fn after_save_runs_once_the_insert_committed() {
    let store = store();
    let mut instance = AfterSave::new();
    assert_eq!(instance.confirmed(), &Bson::Null);

    let before = block_on(store.count::<AfterSave>()).unwrap();
    block_on(store.save(&mut instance)).unwrap();

    assert_eq!(block_on(store.count::<AfterSave>()).unwrap(), before + 1);
    assert_eq!(instance.confirmed(), &Bson::Boolean(true));
}

#[test]
fn loading_validates_stored_values() {
    let result: MapperResult<Person> =
        docmapper::codec::from_document(doc! { "name": 42 });

    assert!(matches!(result.unwrap_err(), MapperError::FieldType { .. }));
}

#[test]
fn loading_rejects_unknown_keys() {
    let result: MapperResult<Person> =
        docmapper::codec::from_document(doc! { "name": "pepe", "legacy": 1 });

    assert!(matches!(
        result.unwrap_err(),
        MapperError::UnknownField(key) if key == "legacy"
    ));
}
