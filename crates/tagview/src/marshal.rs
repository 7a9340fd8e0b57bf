//! The custom-serialization capability.
//!
//! A type implementing [`Marshal`] knows how to produce its own serialized
//! form. When a projected field's type implements it, the projector stores
//! that form verbatim instead of recursing into the value or applying
//! `omitempty`.
//!
//! Detection is structural: implementing the trait is enough, nothing has to
//! be registered. `#[derive(Project)]` checks every field's concrete type for
//! the capability before falling back to its [`Field`] implementation.
//!
//! ```rust
//! use tagview::{Marshal, Project};
//!
//! struct Celsius(f64);
//!
//! impl Marshal for Celsius {
//!     fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
//!         serde_json::to_value(format!("{:.1}°C", self.0))
//!     }
//! }
//!
//! #[derive(Project)]
//! struct Reading {
//!     #[project(tags = "public")]
//!     temperature: Celsius,
//! }
//!
//! let view = tagview::project(&Reading { temperature: Celsius(21.0) }, [
//!     "public",
//! ])
//! .unwrap();
//!
//! assert_eq!(
//!     view["temperature"],
//!     tagview::Value::Marshaled("21.0°C".into())
//! );
//! ```
//!
//! Types that should also be marshaled when they appear inside containers
//! (`Vec<T>`, `HashMap<K, T>`, ...) or behind a type parameter implement
//! [`Field`] by returning [`Node::Marshaled`]. A struct deriving `Project`
//! gets the same behavior from `#[project(marshal)]`.

use std::{rc::Rc, sync::Arc};

use serde::Serialize;

use crate::field::{Field, Node};

/// A value that produces its own serialized form.
pub trait Marshal {
    /// Produces the serialized form of the value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error>;

    /// Returns `true` for a nil reference, which the projector skips instead
    /// of marshaling.
    fn is_nil(&self) -> bool { false }
}

impl<T: Marshal + ?Sized> Marshal for &T {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        (**self).marshal()
    }

    fn is_nil(&self) -> bool { (**self).is_nil() }
}

impl<T: Marshal + ?Sized> Marshal for Box<T> {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        (**self).marshal()
    }

    fn is_nil(&self) -> bool { (**self).is_nil() }
}

impl<T: Marshal + ?Sized> Marshal for Rc<T> {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        (**self).marshal()
    }

    fn is_nil(&self) -> bool { (**self).is_nil() }
}

impl<T: Marshal + ?Sized> Marshal for Arc<T> {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        (**self).marshal()
    }

    fn is_nil(&self) -> bool { (**self).is_nil() }
}

impl<T: Marshal> Marshal for Option<T> {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.as_ref()
            .map_or(Ok(serde_json::Value::Null), Marshal::marshal)
    }

    fn is_nil(&self) -> bool { self.as_ref().is_none_or(Marshal::is_nil) }
}

impl<T: Marshal> Marshal for [T] {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.iter()
            .map(Marshal::marshal)
            .collect::<Result<_, _>>()
            .map(serde_json::Value::Array)
    }
}

impl<T: Marshal> Marshal for Vec<T> {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        self.as_slice().marshal()
    }
}

impl Marshal for serde_json::Value {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        Ok(self.clone())
    }
}

impl Field for serde_json::Value {
    fn node(&self) -> Node<'_> { Node::Marshaled(self) }
}

/// Marks a value to be projected through its [`Serialize`] implementation.
///
/// The wrapped value is stored as its serde representation, untouched by
/// selector tags, so the wrapper also opts a struct out of filtering.
///
/// ```rust
/// use serde::Serialize;
/// use tagview::{Project, Serialized, Value};
///
/// #[derive(Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// #[derive(Project)]
/// struct Shape {
///     #[project(tags = "geo")]
///     origin: Serialized<Point>,
/// }
///
/// let shape = Shape { origin: Serialized(Point { x: 1, y: 2 }) };
/// let view = tagview::project(&shape, ["geo"]).unwrap();
///
/// assert_eq!(
///     view["origin"],
///     Value::Marshaled(serde_json::json!({"x": 1, "y": 2}))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Serialized<T>(pub T);

impl<T: Serialize> Marshal for Serialized<T> {
    fn marshal(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.0)
    }
}

impl<T: Serialize> Field for Serialized<T> {
    fn node(&self) -> Node<'_> { Node::Marshaled(self) }
}
