use std::{cell::OnceCell, collections::BTreeMap};

use super::{Projector, project};
use crate::{
    Config, DefaultConfig, Descriptor, Error, Field, FieldDescriptor,
    KeepUntagged, Marshal, Node, Project, Projection, TagSet, Value,
};

// =============================================================================
// Hand-written implementation
// =============================================================================

/// Implements the traits without the derive macro.
struct Manual {
    id: u32,
    secret: String,
    note: Option<String>,
}

const MANUAL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("id", Some("public"), Some("ID")),
    FieldDescriptor::new("secret", Some("admin"), None),
    FieldDescriptor::new("note", None, None),
];

static MANUAL: Descriptor = Descriptor::new("Manual", MANUAL_FIELDS);

impl Project for Manual {
    fn descriptor(&self) -> &'static Descriptor { &MANUAL }

    fn field(&self, index: usize) -> Node<'_> {
        match index {
            0 => self.id.node(),
            1 => self.secret.node(),
            2 => self.note.node(),
            _ => Node::Nil,
        }
    }
}

impl Field for Manual {
    const STRUCT: bool = true;

    fn node(&self) -> Node<'_> { Node::Struct(self) }
}

fn manual() -> Manual {
    Manual {
        id: 7,
        secret: "hunter2".to_owned(),
        note: Some("hello".to_owned()),
    }
}

#[test]
fn manual_implementation_selects_by_tag() {
    let projection = project(&manual(), ["public"]).unwrap();

    assert_eq!(
        projection,
        Projection::from([("ID".to_owned(), Value::UInt(7))])
    );
}

#[test]
fn untagged_fields_follow_config() {
    let strict = project(&manual(), ["admin"]).unwrap();
    assert!(!strict.contains_key("note"));

    let keep = Projector::<KeepUntagged>::new(["admin"].into_iter().collect())
        .project(&manual())
        .unwrap();
    assert_eq!(keep["note"], Value::from("hello"));
    assert_eq!(keep["secret"], Value::from("hunter2"));
    assert!(!keep.contains_key("ID"));
}

// =============================================================================
// Root Validation
// =============================================================================

#[test]
fn empty_tags_are_rejected() {
    let error = project(&manual(), [""; 0]).unwrap_err();

    assert!(matches!(error, Error::NoTagsProvided));
}

#[test]
fn scalar_root_is_rejected() {
    let error = project(&42_u32, ["public"]).unwrap_err();

    assert!(matches!(
        error,
        Error::UnsupportedRootType { type_name: "u32" }
    ));
}

#[test]
fn nil_root_is_rejected() {
    let error = project(&None::<Manual>, ["public"]).unwrap_err();

    assert!(matches!(error, Error::UnsupportedRootType { .. }));
}

#[test]
fn references_to_structs_are_accepted() {
    let value = manual();
    let boxed = Box::new(&value);

    let projection = project(&Some(boxed), ["public"]).unwrap();

    assert_eq!(projection.len(), 1);
}

#[test]
fn projector_is_reusable() {
    let projector =
        Projector::<DefaultConfig>::new(TagSet::from_iter(["admin"]));

    let first = projector.project(&manual()).unwrap();
    let second = projector.project(&manual()).unwrap();

    assert_eq!(first, second);
    assert!(projector.tags().contains("admin"));
}

// =============================================================================
// Cycles and Depth
// =============================================================================

/// A node in a linked structure that can point back to itself.
struct Link<'a> {
    name: &'static str,
    next: OnceCell<&'a Link<'a>>,
}

const LINK_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("name", Some("a"), None),
    FieldDescriptor::new("next", Some("a"), None),
];

static LINK: Descriptor = Descriptor::new("Link", LINK_FIELDS);

impl Project for Link<'_> {
    fn descriptor(&self) -> &'static Descriptor { &LINK }

    fn field(&self, index: usize) -> Node<'_> {
        match index {
            0 => self.name.node(),
            1 => self.next.node(),
            _ => Node::Nil,
        }
    }
}

impl Field for Link<'_> {
    const STRUCT: bool = true;

    fn node(&self) -> Node<'_> { Node::Struct(self) }
}

#[test]
fn self_reference_is_a_cycle() {
    let link = Link { name: "loop", next: OnceCell::new() };
    assert!(link.next.set(&link).is_ok());

    let error = project(&link, ["a"]).unwrap_err();

    assert!(matches!(error, Error::CyclicStructure { .. }));
}

#[test]
fn chain_without_cycle_projects() {
    let tail = Link { name: "tail", next: OnceCell::new() };
    let head = Link { name: "head", next: OnceCell::from(&tail) };

    let projection = project(&head, ["a"]).unwrap();

    let next = projection["next"].as_object().unwrap();
    assert_eq!(next["name"], Value::from("tail"));
    assert!(!next.contains_key("next"));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Shallow;

impl Config for Shallow {
    fn max_depth() -> Option<usize> { Some(2) }
}

#[test]
fn depth_limit_is_enforced() {
    let third = Link { name: "third", next: OnceCell::new() };
    let second = Link { name: "second", next: OnceCell::from(&third) };
    let first = Link { name: "first", next: OnceCell::from(&second) };

    let projector = Projector::<Shallow>::new(TagSet::from_iter(["a"]));

    assert!(projector.project(&second).is_ok());
    assert!(matches!(
        projector.project(&first).unwrap_err(),
        Error::DepthLimitExceeded { limit: 2 }
    ));
}

// =============================================================================
// Containers
// =============================================================================

struct Inventory {
    counts: BTreeMap<&'static str, Option<u32>>,
    links: Vec<Link<'static>>,
}

const INVENTORY_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("counts", Some("a"), None),
    FieldDescriptor::new("links", Some("a"), None),
];

static INVENTORY: Descriptor = Descriptor::new("Inventory", INVENTORY_FIELDS);

impl Project for Inventory {
    fn descriptor(&self) -> &'static Descriptor { &INVENTORY }

    fn field(&self, index: usize) -> Node<'_> {
        match index {
            0 => self.counts.node(),
            1 => self.links.node(),
            _ => Node::Nil,
        }
    }
}

impl Field for Inventory {
    const STRUCT: bool = true;

    fn node(&self) -> Node<'_> { Node::Struct(self) }
}

#[test]
fn containers_keep_nil_entries_as_null() {
    let inventory = Inventory {
        counts: BTreeMap::from([("apples", Some(3)), ("pears", None)]),
        links: vec![Link { name: "only", next: OnceCell::new() }],
    };

    let projection = project(&inventory, ["a"]).unwrap();

    assert_eq!(
        projection["counts"],
        Value::Map(BTreeMap::from([
            ("apples".to_owned(), Value::UInt(3)),
            ("pears".to_owned(), Value::Null),
        ]))
    );
    assert_eq!(
        projection["links"],
        Value::Objects(vec![Projection::from([(
            "name".to_owned(),
            Value::from("only")
        )])])
    );
}

// =============================================================================
// Marshaled Structs
// =============================================================================

/// A struct that serializes itself as its number of seconds.
struct Stamp {
    seconds: Option<u64>,
}

const STAMP_FIELDS: &[FieldDescriptor] =
    &[FieldDescriptor::new("seconds", Some("hidden"), None)];

static STAMP: Descriptor = Descriptor::new("Stamp", STAMP_FIELDS);

impl Project for Stamp {
    fn descriptor(&self) -> &'static Descriptor { &STAMP }

    fn field(&self, index: usize) -> Node<'_> {
        match index {
            0 => self.seconds.node(),
            _ => Node::Nil,
        }
    }

    fn marshaled(&self) -> Option<&dyn Marshal> { Some(self) }
}

impl Marshal for Stamp {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.seconds)
    }

    fn is_nil(&self) -> bool { self.seconds.is_none() }
}

impl Field for Stamp {
    fn node(&self) -> Node<'_> { Node::Struct(self) }
}

struct Event {
    at: Box<Stamp>,
    history: Vec<Stamp>,
}

const EVENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("at", Some("a"), None),
    FieldDescriptor::new("history", Some("a"), None),
];

static EVENT: Descriptor = Descriptor::new("Event", EVENT_FIELDS);

impl Project for Event {
    fn descriptor(&self) -> &'static Descriptor { &EVENT }

    fn field(&self, index: usize) -> Node<'_> {
        match index {
            0 => self.at.node(),
            1 => self.history.node(),
            _ => Node::Nil,
        }
    }
}

impl Field for Event {
    const STRUCT: bool = true;

    fn node(&self) -> Node<'_> { Node::Struct(self) }
}

#[test]
fn marshaled_struct_is_stored_at_every_depth() {
    let event = Event {
        at: Box::new(Stamp { seconds: Some(5) }),
        history: vec![Stamp { seconds: Some(1) }, Stamp { seconds: None }],
    };

    let projection = project(&event, ["a"]).unwrap();

    assert_eq!(projection["at"], Value::Marshaled(5.into()));
    assert_eq!(
        projection["history"],
        Value::List(vec![Value::Marshaled(1.into()), Value::Null])
    );
}

#[test]
fn nil_marshaled_struct_is_skipped() {
    let event = Event { at: Box::new(Stamp { seconds: None }), history: vec![] };

    let projection = project(&event, ["a"]).unwrap();

    assert!(!projection.contains_key("at"));
    assert_eq!(projection["history"], Value::List(vec![]));
}

#[test]
fn marshaled_struct_at_the_root_is_filtered_by_tags() {
    let stamp = Stamp { seconds: Some(5) };

    assert!(project(&stamp, ["a"]).unwrap().is_empty());
    assert_eq!(
        project(&stamp, ["hidden"]).unwrap()["seconds"],
        Value::UInt(5)
    );
}
