//! Configuration module for customizing projection behavior.
//!
//! This module provides the [`Config`] trait for choosing how the
//! [`Projector`](crate::Projector) treats fields that carry no selector tags
//! and how deep it may recurse. The [`DefaultConfig`] implementation provides
//! the strict defaults, and [`KeepUntagged`] the permissive alternative.
//!
//! # Creating Custom Configurations
//!
//! To create a custom configuration, implement the `Config` trait on a marker
//! type and override the methods you care about:
//!
//! ```rust
//! use tagview::{Config, Untagged};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! struct Shallow;
//!
//! impl Config for Shallow {
//!     fn max_depth() -> Option<usize> { Some(4) }
//! }
//!
//! assert_eq!(Shallow::untagged(), Untagged::Exclude);
//! ```

use std::{fmt::Debug, hash::Hash};

/// The default limit on struct nesting, see [`Config::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How fields without any selector tag are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Untagged {
    /// Untagged fields never appear in a projection.
    #[default]
    Exclude,

    /// Untagged fields always appear in a projection, whatever the caller's
    /// selector tags are.
    Include,
}

/// Configuration trait for the projector.
///
/// Implementations are zero-sized marker types; all settings are provided as
/// associated functions so that they are resolved at compile time.
///
/// # Configurable Methods
///
/// - [`untagged()`](Config::untagged) - Treatment of untagged fields
/// - [`max_depth()`](Config::max_depth) - Struct nesting limit
pub trait Config:
    Debug + Default + Clone + Copy + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// Whether fields with an absent or empty selector are kept.
    ///
    /// # Default Value
    ///
    /// [`Untagged::Exclude`]: a field must name at least one of the caller's
    /// tags to be included.
    #[must_use]
    fn untagged() -> Untagged { Untagged::Exclude }

    /// The maximum number of nested structs a projection may descend into.
    ///
    /// `None` removes the limit. Cyclic inputs are still rejected, but a very
    /// deep acyclic input may then exhaust the stack.
    ///
    /// # Default Value
    ///
    /// [`DEFAULT_MAX_DEPTH`] levels.
    #[must_use]
    fn max_depth() -> Option<usize> { Some(DEFAULT_MAX_DEPTH) }
}

/// The default configuration: strict tag matching and a depth limit of
/// [`DEFAULT_MAX_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DefaultConfig;

impl Config for DefaultConfig {}

/// A configuration that keeps untagged fields in every projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KeepUntagged;

impl Config for KeepUntagged {
    fn untagged() -> Untagged { Untagged::Include }
}
