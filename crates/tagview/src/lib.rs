//! Tag-driven struct projection.
//!
//! This crate turns a struct into a string-keyed [`Projection`] that contains
//! only the fields whose selector tags intersect a caller-supplied tag set.
//! The same value can therefore be rendered differently for different
//! audiences ("public", "admin", ...) without writing a view type per
//! audience.
//!
//! # Overview
//!
//! - [`Project`]: implemented by `#[derive(Project)]`; exposes a struct's
//!   fields and their annotations through a static [`Descriptor`].
//! - [`Field`]: classifies a field value (scalar, struct, sequence, map, nil).
//! - [`Marshal`]: lets a type supply its own serialized form, which is stored
//!   verbatim instead of being projected.
//! - [`Projector`]: runs the projection for a fixed [`TagSet`], configured
//!   through a [`Config`] type.
//!
//! # Derive Macro
//!
//! ```rust
//! use tagview::{Project, Value};
//!
//! #[derive(Project)]
//! struct Address {
//!     #[project(tags = "public")]
//!     city: String,
//!     #[project(tags = "private")]
//!     street: String,
//! }
//!
//! #[derive(Project)]
//! struct Person {
//!     #[project(tags = "public,private", json = "name")]
//!     full_name: String,
//!     #[project(tags = "private", json = ",omitempty")]
//!     phone: Option<String>,
//!     #[project(tags = "public,private")]
//!     address: Address,
//!     age: u32,
//! }
//!
//! let person = Person {
//!     full_name: "Grace".to_owned(),
//!     phone: None,
//!     address: Address {
//!         city: "Arlington".to_owned(),
//!         street: "Main St".to_owned(),
//!     },
//!     age: 85,
//! };
//!
//! let view = tagview::project(&person, ["public"]).unwrap();
//!
//! assert_eq!(view["name"], Value::from("Grace"));
//! assert_eq!(view["address"].as_object().unwrap().len(), 1);
//! assert!(!view.contains_key("phone"));
//! assert!(!view.contains_key("age"));
//! ```
//!
//! ## Field Attributes
//!
//! - `#[project(tags = "a,b")]`: the selector tags of the field.
//! - `#[project(json = "name,omitempty")]`: the naming annotation, an
//!   optional output key followed by comma-separated options.
//! - `#[project(rename = "name")]` and `#[project(omitempty)]`: the same
//!   naming annotation spelled as separate keys.
//!
//! Without a `project` naming key, `#[serde(rename = "name")]` is honored as
//! the output key.
//!
//! ## Container Attributes
//!
//! - `#[project_crate(path)]`: the path of this crate, for re-exports.
//! - `#[project(marshal)]`: the struct implements [`Marshal`] and is stored as
//!   its serialized form wherever it is reached below the root.
//!
//! # Structs Inside Containers
//!
//! Sequences whose element type is a struct (`Vec<S>`, `[S; N]`,
//! `Vec<Option<Box<S>>>`, ...) become [`Value::Objects`]. Structs found
//! anywhere else in a container, such as map values or the elements of nested
//! lists, are projected with the same tags as well and never stored raw: a
//! struct has no serialized form unless it implements [`Marshal`]. Wrap such
//! a value in [`Serialized`] or mark its type with `#[project(marshal)]` to
//! keep it unfiltered.
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use tagview::{Project, Value};
//!
//! #[derive(Project)]
//! struct Badge {
//!     #[project(tags = "public")]
//!     label: String,
//!     #[project(tags = "internal")]
//!     issuer: String,
//! }
//!
//! #[derive(Project)]
//! struct Profile {
//!     #[project(tags = "public")]
//!     badges: BTreeMap<String, Badge>,
//! }
//!
//! let profile = Profile {
//!     badges: BTreeMap::from([("gold".to_owned(), Badge {
//!         label: "Gold".to_owned(),
//!         issuer: "ops".to_owned(),
//!     })]),
//! };
//!
//! let view = tagview::project(&profile, ["public"]).unwrap();
//! let Value::Map(badges) = &view["badges"] else { unreachable!() };
//!
//! assert_eq!(badges["gold"].as_object().unwrap().len(), 1);
//! ```

// Allow derive macros to reference this crate as `tagview` internally
extern crate self as tagview;

pub mod config;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod marshal;
pub mod project;
pub mod projector;
pub(crate) mod session;
pub mod tag;
pub mod value;

pub use config::{
    Config, DEFAULT_MAX_DEPTH, DefaultConfig, KeepUntagged, Untagged,
};
pub use descriptor::{Descriptor, FieldDescriptor};
pub use error::Error;
pub use field::{Field, Node};
pub use marshal::{Marshal, Serialized};
#[doc(hidden)]
pub use project::__internal;
pub use project::Project;
pub use projector::{Projector, project};
pub use tag::{Naming, TagSet};
pub use value::{Projection, Value};
// Re-export derive macros
pub use tagview_derive::Project;
