//! Classification of field values for the projector.
//!
//! Every type that appears as a projected field implements [`Field`], which
//! tells the projector what shape the value has through a [`Node`]. The
//! implementations in this module cover the standard scalars, references and
//! smart pointers, `Option`, sequences and string-keyed maps.
//! `#[derive(Project)]` implements [`Field`] for the struct it is applied to.

use std::{
    borrow::Cow,
    cell::OnceCell,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt::Display,
    hash::BuildHasher,
    rc::Rc,
    sync::Arc,
};

use crate::{marshal::Marshal, project::Project, value::Value};

/// The shape of a field value, as seen by the projector.
pub enum Node<'a> {
    /// A nil reference; the field is skipped.
    Nil,

    /// A plain value stored as-is.
    Scalar(Value),

    /// A struct, projected recursively.
    Struct(&'a dyn Project),

    /// A sequence whose element type is a struct.
    Structs {
        /// Name of the element type, reported when an element is nil.
        element: &'static str,

        /// One node per element.
        items: Vec<Node<'a>>,
    },

    /// A sequence whose element type is not a struct.
    Seq(Vec<Node<'a>>),

    /// A map with stringified keys.
    Map(Vec<(String, Node<'a>)>),

    /// A value with a custom serialized form.
    Marshaled(&'a dyn Marshal),
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Self::Struct(value) => {
                f.debug_tuple("Struct").field(&value.type_name()).finish()
            }
            Self::Structs { element, items } => f
                .debug_struct("Structs")
                .field("element", element)
                .field("items", items)
                .finish(),
            Self::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Marshaled(_) => f.write_str("Marshaled(..)"),
        }
    }
}

/// A value that can appear as a projected field.
pub trait Field {
    /// Whether the type is a struct, or a reference-like wrapper of one.
    ///
    /// Sequences use this to decide between [`Node::Structs`] and
    /// [`Node::Seq`] without looking at their elements, so an empty sequence
    /// of structs still projects to an empty struct sequence.
    const STRUCT: bool = false;

    /// Classifies the value.
    fn node(&self) -> Node<'_>;
}

/// Builds the node of a sequence from its elements.
pub fn sequence<'a, T: Field + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> Node<'a> {
    let items = items.into_iter().map(Field::node).collect();

    if T::STRUCT {
        Node::Structs { element: std::any::type_name::<T>(), items }
    } else {
        Node::Seq(items)
    }
}

/// Builds the node of a map from its entries.
pub fn map<'a, K: Display + 'a, V: Field + 'a>(
    entries: impl IntoIterator<Item = (&'a K, &'a V)>,
) -> Node<'a> {
    Node::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.node()))
            .collect(),
    )
}

// =============================================================================
// Implementations for scalar types
// =============================================================================

macro_rules! impl_field_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Field for $ty {
                fn node(&self) -> Node<'_> {
                    Node::Scalar(Value::from(*self))
                }
            }
        )+
    };
}

impl_field_scalar!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, char
);

// pointer-sized integers are at most 64 bits wide on supported targets
impl Field for isize {
    fn node(&self) -> Node<'_> { Node::Scalar(Value::Int(*self as i64)) }
}

impl Field for usize {
    fn node(&self) -> Node<'_> { Node::Scalar(Value::UInt(*self as u64)) }
}

impl Field for str {
    fn node(&self) -> Node<'_> { Node::Scalar(Value::from(self)) }
}

impl Field for String {
    fn node(&self) -> Node<'_> { Node::Scalar(Value::from(self.as_str())) }
}

// =============================================================================
// Implementations for references and wrappers
// =============================================================================

impl<T: Field + ?Sized> Field for &T {
    const STRUCT: bool = T::STRUCT;

    fn node(&self) -> Node<'_> { (**self).node() }
}

impl<T: Field + ?Sized> Field for Box<T> {
    const STRUCT: bool = T::STRUCT;

    fn node(&self) -> Node<'_> { (**self).node() }
}

impl<T: Field + ?Sized> Field for Rc<T> {
    const STRUCT: bool = T::STRUCT;

    fn node(&self) -> Node<'_> { (**self).node() }
}

impl<T: Field + ?Sized> Field for Arc<T> {
    const STRUCT: bool = T::STRUCT;

    fn node(&self) -> Node<'_> { (**self).node() }
}

impl<T: Field + ToOwned + ?Sized> Field for Cow<'_, T> {
    const STRUCT: bool = T::STRUCT;

    fn node(&self) -> Node<'_> { (**self).node() }
}

impl<T: Field> Field for Option<T> {
    const STRUCT: bool = T::STRUCT;

    fn node(&self) -> Node<'_> { self.as_ref().map_or(Node::Nil, Field::node) }
}

impl<T: Field> Field for OnceCell<T> {
    const STRUCT: bool = T::STRUCT;

    fn node(&self) -> Node<'_> { self.get().map_or(Node::Nil, Field::node) }
}

// =============================================================================
// Implementations for collections
// =============================================================================

impl<T: Field> Field for [T] {
    fn node(&self) -> Node<'_> { sequence(self) }
}

impl<T: Field, const N: usize> Field for [T; N] {
    fn node(&self) -> Node<'_> { sequence(self) }
}

impl<T: Field> Field for Vec<T> {
    fn node(&self) -> Node<'_> { sequence(self) }
}

impl<T: Field> Field for VecDeque<T> {
    fn node(&self) -> Node<'_> { sequence(self) }
}

impl<T: Field> Field for BTreeSet<T> {
    fn node(&self) -> Node<'_> { sequence(self) }
}

impl<T: Field, S: BuildHasher> Field for HashSet<T, S> {
    fn node(&self) -> Node<'_> { sequence(self) }
}

impl<K: Display, V: Field> Field for BTreeMap<K, V> {
    fn node(&self) -> Node<'_> { map(self) }
}

impl<K: Display, V: Field, S: BuildHasher> Field for HashMap<K, V, S> {
    fn node(&self) -> Node<'_> { map(self) }
}
