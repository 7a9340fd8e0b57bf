//! Static field tables generated by `#[derive(Project)]`.

use crate::{
    config::Untagged,
    tag::{Naming, TagSet, split_selector},
};

/// The annotations of a single field, as written on the struct.
///
/// Descriptors store the raw annotation strings; interpretation happens at
/// projection time through [`TagSet::matches`] and [`Naming::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    ident: &'static str,
    selector: Option<&'static str>,
    naming: Option<&'static str>,
}

impl FieldDescriptor {
    /// Creates a descriptor from the field identifier and its raw selector and
    /// naming strings.
    #[must_use]
    pub const fn new(
        ident: &'static str,
        selector: Option<&'static str>,
        naming: Option<&'static str>,
    ) -> Self {
        Self { ident, selector, naming }
    }

    /// The field identifier; tuple fields use their index.
    #[must_use]
    pub const fn ident(&self) -> &'static str { self.ident }

    /// The raw selector string, if any.
    #[must_use]
    pub const fn selector(&self) -> Option<&'static str> { self.selector }

    /// The raw naming string, if any.
    #[must_use]
    pub const fn naming(&self) -> Option<&'static str> { self.naming }

    /// Returns `true` if the selector is absent or holds no tag tokens.
    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.selector
            .is_none_or(|selector| split_selector(selector).next().is_none())
    }

    /// Decides whether the field takes part in a projection for `tags`.
    #[must_use]
    pub fn is_selected(&self, tags: &TagSet, untagged: Untagged) -> bool {
        if self.is_untagged() {
            return untagged == Untagged::Include;
        }

        self.selector.is_some_and(|selector| tags.matches(selector))
    }

    /// The parsed naming string; an absent one parses as empty.
    #[must_use]
    pub fn parsed_naming(&self) -> Naming<'static> {
        Naming::parse(self.naming.unwrap_or_default())
    }

    /// The output key: the naming override when present and non-empty,
    /// otherwise the identifier.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.parsed_naming().name().unwrap_or(self.ident)
    }
}

/// The field table of one struct type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Descriptor {
    type_name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl Descriptor {
    /// Creates a descriptor for the struct named `type_name`.
    #[must_use]
    pub const fn new(
        type_name: &'static str,
        fields: &'static [FieldDescriptor],
    ) -> Self {
        Self { type_name, fields }
    }

    /// The struct's name as written in its definition.
    #[must_use]
    pub const fn type_name(&self) -> &'static str { self.type_name }

    /// The fields in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldDescriptor] { self.fields }

    /// Looks a field up by identifier.
    #[must_use]
    pub fn field(&self, ident: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.ident == ident)
    }
}
