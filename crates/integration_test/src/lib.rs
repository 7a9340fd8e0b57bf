//! Shared fixtures for the `tagview` integration tests.
//!
//! This crate provides the struct definitions projected by the tests in
//! `tests/`, together with small builders for deep and cyclic values.

#![allow(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]

use std::cell::OnceCell;

use serde::Serialize;
use tagview::{Marshal, Project, Serialized};

// ============================================================================
// Selector Matching
// ============================================================================

#[derive(Debug, Clone, Project)]
pub struct NestedExample {
    #[project(tags = "one,two", rename = "A")]
    pub a: String,
    #[project(tags = "two", rename = "B")]
    pub b: String,
}

impl NestedExample {
    pub fn new(a: &str, b: &str) -> Self {
        Self { a: a.to_owned(), b: b.to_owned() }
    }
}

/// A struct mixing untagged, tagged, renamed, nested and sequence fields.
#[derive(Debug, Clone, Project)]
pub struct Example {
    #[project(rename = "None")]
    pub none: String,
    #[project(tags = "one", rename = "One")]
    pub one: String,
    #[project(tags = "two", rename = "Two")]
    pub two: String,
    #[project(tags = "one,two", json = "tagged,omitempty")]
    pub tagged: String,

    #[project(tags = "one", rename = "NestedOne")]
    pub nested_one: NestedExample,
    #[project(tags = "two", rename = "NestedTwo")]
    pub nested_two: Option<Box<NestedExample>>,

    #[project(tags = "one", rename = "SliceOne")]
    pub slice_one: Vec<NestedExample>,
    #[project(tags = "two", rename = "SliceTwo")]
    pub slice_two: Vec<Box<NestedExample>>,
}

pub fn example() -> Example {
    Example {
        none: "a".to_owned(),
        one: "1".to_owned(),
        two: "2".to_owned(),
        tagged: "t".to_owned(),

        nested_one: NestedExample::new("a", "b"),
        nested_two: Some(Box::new(NestedExample::new("b", "a"))),

        slice_one: vec![
            NestedExample::new("ab", "ba"),
            NestedExample::new("b", "a"),
        ],
        slice_two: vec![
            Box::new(NestedExample::new("ab", "ba")),
            Box::new(NestedExample::new("b", "a")),
        ],
    }
}

// ============================================================================
// Emptiness
// ============================================================================

#[derive(Debug, Clone, Default, Project)]
pub struct Emptiness {
    #[project(tags = "a", json = "foo,omitempty")]
    pub foo: String,
    #[project(tags = "a", json = "bar,omitempty")]
    pub bar: Bar,
}

#[derive(Debug, Clone, Default, Project)]
pub struct Bar {
    #[project(tags = "a", json = "baz,omitempty")]
    pub baz: String,
}

/// One field per kind of emptiness, all marked `omitempty`.
#[derive(Debug, Clone, Default, Project)]
pub struct Kinds {
    #[project(tags = "a", omitempty)]
    pub flag: bool,
    #[project(tags = "a", omitempty)]
    pub signed: i64,
    #[project(tags = "a", omitempty)]
    pub unsigned: u16,
    #[project(tags = "a", omitempty)]
    pub float: f64,
    #[project(tags = "a", omitempty)]
    pub text: String,
    #[project(tags = "a", omitempty)]
    pub list: Vec<u8>,
    #[project(tags = "a", omitempty)]
    pub map: std::collections::BTreeMap<String, u8>,
    #[project(tags = "a", omitempty)]
    pub structs: Vec<Bar>,
    #[project(tags = "a", omitempty)]
    pub pointer: Option<Box<u8>>,
}

// ============================================================================
// Custom Serialization
// ============================================================================

/// An amount of money in cents, serialized as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cents(pub i64);

impl Marshal for Cents {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(format!("{}.{:02}", self.0 / 100, self.0 % 100))
    }
}

/// A value whose serialization always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Poisoned;

impl Marshal for Poisoned {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        Err(serde::ser::Error::custom("poisoned value"))
    }
}

/// A struct that serializes itself and is never filtered when nested.
#[derive(Debug, Clone, Serialize, Project)]
#[project(marshal)]
pub struct Opaque {
    #[project(tags = "hidden")]
    pub visible_through_marshal: u32,
}

impl Marshal for Opaque {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Opaque {
    pub fn new(value: u32) -> Self { Self { visible_through_marshal: value } }
}

/// Holds a value behind a type parameter.
#[derive(Debug, Clone, Project)]
pub struct Wrap<T> {
    #[project(tags = "public")]
    pub item: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Project)]
pub struct Invoice {
    #[project(tags = "public")]
    pub id: u64,
    #[project(tags = "public", omitempty)]
    pub total: Cents,
    #[project(tags = "public", omitempty)]
    pub discount: Option<Cents>,
    #[project(tags = "public")]
    pub opaque: Opaque,
    #[project(tags = "public")]
    pub location: Serialized<Geo>,
    #[project(tags = "public")]
    pub extra: serde_json::Value,
}

pub fn invoice() -> Invoice {
    Invoice {
        id: 9,
        total: Cents(0),
        discount: None,
        opaque: Opaque { visible_through_marshal: 5 },
        location: Serialized(Geo { lat: 1.5, lon: -2.0 }),
        extra: serde_json::Value::Null,
    }
}

#[derive(Debug, Clone, Project)]
pub struct Ledger {
    #[project(tags = "public")]
    pub name: String,
    #[project(tags = "public")]
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Project)]
pub struct Entry {
    #[project(tags = "public")]
    pub memo: String,
    #[project(tags = "private")]
    pub broken: Poisoned,
}

// ============================================================================
// Recursion
// ============================================================================

/// A singly linked chain of owned nodes.
#[derive(Debug, Clone, Project)]
pub struct Chain {
    #[project(tags = "a")]
    pub level: usize,
    #[project(tags = "a")]
    pub next: Option<Box<Chain>>,
}

/// Builds a chain of `len` nodes, numbered from the root.
pub fn chain(len: usize) -> Option<Box<Chain>> {
    (0..len)
        .rev()
        .fold(None, |next, level| Some(Box::new(Chain { level, next })))
}

/// A node that can point back at itself or an ancestor.
#[derive(Project)]
pub struct Link<'a> {
    #[project(tags = "a")]
    pub name: &'static str,
    #[project(tags = "a")]
    pub next: OnceCell<&'a Link<'a>>,
}

impl Link<'_> {
    pub fn new(name: &'static str) -> Self {
        Self { name, next: OnceCell::new() }
    }
}
