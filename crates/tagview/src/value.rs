//! The output model of a projection.
//!
//! A [`Projection`] maps output keys to [`Value`]s. Both implement
//! [`serde::Serialize`], so the result can be handed to any serde encoder:
//!
//! ```rust
//! use tagview::{Projection, Value};
//!
//! let mut projection = Projection::new();
//! projection.insert("id".to_owned(), Value::from(7u64));
//! projection.insert("name".to_owned(), Value::from("ada"));
//!
//! let json = serde_json::to_string(&projection).unwrap();
//! assert_eq!(json, r#"{"id":7,"name":"ada"}"#);
//! ```

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// A projected struct: output key to value.
///
/// Keys are unique; the sorted order of a `BTreeMap` keeps the output
/// deterministic, insertion order carries no meaning.
pub type Projection = BTreeMap<String, Value>;

/// A single value stored in a [`Projection`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// A nil reference or an absent element.
    #[default]
    Null,

    /// A boolean.
    Bool(bool),

    /// A signed integer.
    Int(i64),

    /// An unsigned integer.
    UInt(u64),

    /// A floating-point number.
    Float(f64),

    /// A string or character.
    String(String),

    /// A sequence whose elements are not structs.
    List(Vec<Value>),

    /// A map with stringified keys.
    Map(BTreeMap<String, Value>),

    /// A nested struct, projected with the same tags.
    Object(Projection),

    /// A sequence of structs, each projected with the same tags.
    Objects(Vec<Projection>),

    /// The custom serialized form produced by a
    /// [`Marshal`](crate::Marshal) implementation, stored verbatim.
    Marshaled(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is the empty value of its kind.
    ///
    /// Empty values are `Null`, `false`, zero numbers, the empty string, and
    /// zero-length lists, maps, struct sequences and nested projections.
    /// Marshaled values are opaque and never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(value) => !value,
            Self::Int(value) => *value == 0,
            Self::UInt(value) => *value == 0,
            Self::Float(value) => *value == 0.0,
            Self::String(value) => value.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(entries) | Self::Object(entries) => entries.is_empty(),
            Self::Objects(items) => items.is_empty(),
            Self::Marshaled(_) => false,
        }
    }

    /// Returns the string if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested projection if this is a [`Value::Object`].
    #[must_use]
    pub const fn as_object(&self) -> Option<&Projection> {
        match self {
            Self::Object(projection) => Some(projection),
            _ => None,
        }
    }

    /// Returns the projections if this is a [`Value::Objects`].
    #[must_use]
    pub fn as_objects(&self) -> Option<&[Projection]> {
        match self {
            Self::Objects(projections) => Some(projections),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(entries) | Self::Object(entries) => {
                serializer.collect_map(entries)
            }
            Self::Objects(items) => serializer.collect_seq(items),
            Self::Marshaled(value) => value.serialize(serializer),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident($target:ty): $($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from!(Bool(bool): bool);
impl_from!(Int(i64): i8, i16, i32, i64);
impl_from!(UInt(u64): u8, u16, u32, u64);
impl_from!(Float(f64): f32, f64);
impl_from!(String(String): String, &str, char);
impl_from!(List(Vec<Value>): Vec<Value>);
impl_from!(Object(Projection): Projection);
impl_from!(Objects(Vec<Projection>): Vec<Projection>);
impl_from!(Marshaled(serde_json::Value): serde_json::Value);
