//! Defines the [`Project`] trait implemented by `#[derive(Project)]`.

use crate::{descriptor::Descriptor, field::Node, marshal::Marshal};

/// A struct whose fields can be selected by tag.
///
/// This trait is normally derived. The derive macro records each field's
/// annotations in a static [`Descriptor`] and generates [`Project::field`],
/// which hands the projector one field at a time. All selection logic lives
/// in the [`Projector`](crate::Projector); implementations only expose their
/// shape.
///
/// The trait is object safe: the projector walks nested structs as
/// `&dyn Project`.
///
/// # Example
///
/// ```rust
/// use tagview::Project;
///
/// #[derive(Project)]
/// struct Account {
///     #[project(tags = "public,admin", rename = "id")]
///     account_id: u64,
///     #[project(tags = "admin", omitempty)]
///     notes: String,
/// }
///
/// let account = Account { account_id: 7, notes: String::new() };
/// let descriptor = account.descriptor();
///
/// assert_eq!(descriptor.type_name(), "Account");
/// assert_eq!(descriptor.fields()[0].key(), "id");
/// assert_eq!(descriptor.fields()[1].naming(), Some(",omitempty"));
/// ```
pub trait Project {
    /// The static field table of this type.
    fn descriptor(&self) -> &'static Descriptor;

    /// Classifies the field at `index` of [`Descriptor::fields`].
    ///
    /// Indices outside the table yield [`Node::Nil`].
    fn field(&self, index: usize) -> Node<'_>;

    /// The fully qualified name of the concrete type.
    fn type_name(&self) -> &'static str { std::any::type_name::<Self>() }

    /// The custom serialized form of the value, if it has one.
    ///
    /// When this returns `Some`, the value is marshaled wherever it is
    /// reached below the root: as a field, behind a generic parameter, or
    /// inside a container. Only the root of a projection is always filtered
    /// by tags. `#[project(marshal)]` on the struct makes the derive return
    /// `Some(self)` and report `Field::STRUCT` as `false`.
    fn marshaled(&self) -> Option<&dyn Marshal> { None }
}

/// Support code for the derive macro. Not public API.
#[doc(hidden)]
pub mod __internal {
    use crate::{field::Field, field::Node, marshal::Marshal};

    /// Wraps a field reference for capability dispatch.
    ///
    /// Generated code calls `(&Probe(&self.field)).probe()`. Method
    /// resolution tries [`ViaMarshal`] on `&Probe<T>` first, which only
    /// applies when `T: Marshal`, and otherwise autorefs to `&&Probe<T>` and
    /// picks [`ViaField`].
    pub struct Probe<'a, T>(pub &'a T);

    /// Selected when the field's type has a custom serialized form.
    pub trait ViaMarshal<'a> {
        fn probe(&self) -> Node<'a>;
    }

    impl<'a, T: Marshal> ViaMarshal<'a> for Probe<'a, T> {
        fn probe(&self) -> Node<'a> {
            let value: &'a T = self.0;
            Node::Marshaled(value)
        }
    }

    /// Selected for every other field type.
    pub trait ViaField<'a> {
        fn probe(&self) -> Node<'a>;
    }

    impl<'a, T: Field> ViaField<'a> for &Probe<'a, T> {
        fn probe(&self) -> Node<'a> {
            let value: &'a T = self.0;
            value.node()
        }
    }
}
