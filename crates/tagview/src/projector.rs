//! The projection algorithm.
//!
//! [`Projector::project`] walks a struct once, in field declaration order:
//!
//! 1. A field takes part only if its selector intersects the caller's tags
//!    (untagged fields follow [`Config::untagged`]).
//! 2. Its output key is the naming override when non-empty, otherwise the
//!    identifier.
//! 3. A field whose type implements [`Marshal`](crate::Marshal) is stored as
//!    its serialized form, unless it is a nil reference. A struct that opts
//!    in through [`Project::marshaled`] is treated the same way at any depth
//!    below the root.
//! 4. Other fields are unwrapped; nil references are skipped, structs and
//!    struct sequences are projected recursively with the same tags, anything
//!    else is stored as a plain value.
//! 5. With `omitempty`, a field whose value is empty for its kind is dropped.
//!
//! Errors abort the whole call; no partial projection is returned.

use std::marker::PhantomData;

use crate::{
    config::{Config, DefaultConfig},
    error::Error,
    field::{Field, Node},
    marshal::Marshal,
    project::Project,
    session::{Identity, Refusal, Session},
    tag::TagSet,
    value::{Projection, Value},
};

/// Projects `value` with the [`DefaultConfig`].
///
/// # Example
///
/// ```rust
/// use tagview::{Project, Value};
///
/// #[derive(Project)]
/// struct User {
///     #[project(tags = "public,admin")]
///     name: String,
///     #[project(tags = "admin")]
///     email: String,
/// }
///
/// let user =
///     User { name: "ada".to_owned(), email: "ada@example.com".to_owned() };
///
/// let public = tagview::project(&user, ["public"]).unwrap();
/// assert_eq!(public.len(), 1);
/// assert_eq!(public["name"], Value::from("ada"));
///
/// let admin = tagview::project(&user, ["admin"]).unwrap();
/// assert_eq!(admin.len(), 2);
/// ```
///
/// # Errors
///
/// - [`Error::NoTagsProvided`] if `tags` is empty.
/// - [`Error::UnsupportedRootType`] if `value` is not a struct.
/// - Any error raised while projecting a nested value.
pub fn project<T, I>(value: &T, tags: I) -> Result<Projection, Error>
where
    T: Field + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Projector::<DefaultConfig>::new(tags.into_iter().collect()).project(value)
}

/// A reusable projector for a fixed set of selector tags.
///
/// The configuration is chosen at the type level; see [`Config`]. A projector
/// holds no per-call state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Projector<C: Config = DefaultConfig> {
    tags: TagSet,
    _config: PhantomData<C>,
}

impl<C: Config> Projector<C> {
    /// Creates a projector for `tags`.
    #[must_use]
    pub const fn new(tags: TagSet) -> Self {
        Self { tags, _config: PhantomData }
    }

    /// The selector tags this projector matches against.
    #[must_use]
    pub const fn tags(&self) -> &TagSet { &self.tags }

    /// Projects `value` into a [`Projection`].
    ///
    /// # Errors
    ///
    /// - [`Error::NoTagsProvided`] if the projector has no tags.
    /// - [`Error::UnsupportedRootType`] if `value` is not a struct, or is a
    ///   nil reference.
    /// - [`Error::CyclicStructure`] if a struct is reached again through its
    ///   own fields.
    /// - [`Error::DepthLimitExceeded`] if the nesting exceeds
    ///   [`Config::max_depth`].
    /// - [`Error::Marshal`] if a field's custom serialization fails.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(root = std::any::type_name::<T>())
    )]
    pub fn project<T: Field + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Projection, Error> {
        if self.tags.is_empty() {
            return Err(Error::NoTagsProvided);
        }

        let Node::Struct(root) = value.node() else {
            return Err(Error::UnsupportedRootType {
                type_name: std::any::type_name::<T>(),
            });
        };

        Walk::<C> {
            tags: &self.tags,
            session: Session::new(C::max_depth()),
            _config: PhantomData,
        }
        .project_struct(root)
    }
}

/// One traversal of a value graph.
struct Walk<'p, C> {
    tags: &'p TagSet,
    session: Session,
    _config: PhantomData<C>,
}

impl<C: Config> Walk<'_, C> {
    fn project_struct(
        &mut self,
        value: &dyn Project,
    ) -> Result<Projection, Error> {
        let identity = Identity::of(value);

        self.session.enter(identity).map_err(|refusal| {
            tracing::debug!(
                type_name = identity.type_name(),
                depth = self.session.depth(),
                ?refusal,
                "aborting projection"
            );

            match refusal {
                Refusal::Cycle => Error::CyclicStructure {
                    type_name: identity.type_name(),
                },
                Refusal::TooDeep(limit) => Error::DepthLimitExceeded { limit },
            }
        })?;

        let result = self.project_fields(value);
        self.session.leave(identity);

        result
    }

    fn project_fields(
        &mut self,
        value: &dyn Project,
    ) -> Result<Projection, Error> {
        let descriptor = value.descriptor();
        let mut projection = Projection::new();

        for (index, field) in descriptor.fields().iter().enumerate() {
            if !field.is_selected(self.tags, C::untagged()) {
                tracing::trace!(
                    type_name = descriptor.type_name(),
                    field = field.ident(),
                    "field not selected"
                );
                continue;
            }

            let key = field.key();

            let Some(projected) = self.value(key, value.field(index))? else {
                tracing::trace!(key, "skipping nil field");
                continue;
            };

            // marshaled values are opaque and never count as empty
            if field.parsed_naming().omit_empty() && projected.is_empty() {
                tracing::trace!(key, "suppressing empty field");
                continue;
            }

            projection.insert(key.to_owned(), projected);
        }

        Ok(projection)
    }

    /// Converts a node into a value; `None` for a nil reference.
    fn value(
        &mut self,
        key: &str,
        node: Node<'_>,
    ) -> Result<Option<Value>, Error> {
        let value = match node {
            Node::Nil => return Ok(None),

            Node::Marshaled(value) if value.is_nil() => return Ok(None),

            Node::Marshaled(value) => {
                Value::Marshaled(Self::marshal(key, value)?)
            }

            Node::Scalar(value) => value,

            Node::Struct(value) => match value.marshaled() {
                Some(value) if value.is_nil() => return Ok(None),
                Some(value) => Value::Marshaled(Self::marshal(key, value)?),
                None => Value::Object(self.project_struct(value)?),
            },

            Node::Structs { element, items } => Value::Objects(
                items
                    .into_iter()
                    .map(|item| match item {
                        Node::Struct(value) => self.project_struct(value),
                        _ => Err(Error::UnsupportedRootType {
                            type_name: element,
                        }),
                    })
                    .collect::<Result<_, _>>()?,
            ),

            Node::Seq(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| Ok(self.value(key, item)?.unwrap_or_default()))
                    .collect::<Result<_, Error>>()?,
            ),

            Node::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(entry, item)| {
                        Ok((entry, self.value(key, item)?.unwrap_or_default()))
                    })
                    .collect::<Result<_, Error>>()?,
            ),
        };

        Ok(Some(value))
    }

    fn marshal(
        key: &str,
        value: &dyn Marshal,
    ) -> Result<serde_json::Value, Error> {
        value
            .marshal()
            .map_err(|source| Error::Marshal { key: key.to_owned(), source })
    }
}

#[cfg(test)]
mod test;
