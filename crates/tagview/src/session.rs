//! Per-call state of a projection.
//!
//! A [`Session`] lives for exactly one top-level projection call. It tracks
//! the structs currently being projected so that a value reached again
//! through its own fields is reported as a cycle instead of recursing until
//! the stack overflows.
//!
//! # Identity
//!
//! A struct is identified by its address together with its concrete type
//! name. The type name is needed because a struct and its first field can
//! share an address; two distinct values of the same type on the active path
//! never do.
//!
//! Only the *active path* is tracked: a value that appears twice in sibling
//! positions (e.g. the same `Rc` in two fields) is projected twice and is not
//! a cycle.

use fxhash::FxHashSet;

use crate::project::Project;

/// The identity of a struct value during one projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    address: usize,
    type_name: &'static str,
}

impl Identity {
    /// Computes the identity of `value`.
    #[must_use]
    pub fn of(value: &dyn Project) -> Self {
        Self {
            address: std::ptr::from_ref(value).cast::<()>() as usize,
            type_name: value.type_name(),
        }
    }

    /// The concrete type name of the value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str { self.type_name }
}

/// Why a struct could not be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// The value is already on the active path.
    Cycle,

    /// Entering would exceed the depth limit.
    TooDeep(usize),
}

/// The state of one projection call.
#[derive(Debug, Default)]
pub struct Session {
    /// Structs currently being projected.
    active: FxHashSet<Identity>,

    /// Depth limit; `None` is unbounded.
    max_depth: Option<usize>,
}

impl Session {
    /// Creates a session with the given depth limit.
    #[must_use]
    pub fn new(max_depth: Option<usize>) -> Self {
        Self { active: FxHashSet::default(), max_depth }
    }

    /// The number of structs currently being projected.
    #[must_use]
    pub fn depth(&self) -> usize { self.active.len() }

    /// Marks `identity` as being projected.
    ///
    /// # Errors
    ///
    /// Refuses if the value is already active or the depth limit is reached.
    pub fn enter(&mut self, identity: Identity) -> Result<(), Refusal> {
        let depth = self.active.len();
        if let Some(limit) = self.max_depth.filter(|&limit| depth >= limit) {
            return Err(Refusal::TooDeep(limit));
        }

        if self.active.insert(identity) { Ok(()) } else { Err(Refusal::Cycle) }
    }

    /// Marks `identity` as finished.
    pub fn leave(&mut self, identity: Identity) {
        self.active.remove(&identity);
    }
}
