//! Defines the [`Error`] type returned by projection.

/// Errors that abort a projection.
///
/// Every error is terminal for the call that produced it: errors raised while
/// projecting a nested struct or sequence element propagate unchanged to the
/// top-level caller and no partial mapping is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied an empty selector-tag set.
    #[error("no selector tags provided")]
    NoTagsProvided,

    /// The value is not a struct (or a reference to one) after unwrapping,
    /// or it is a nil reference.
    #[error("`{type_name}` is not a struct or a reference to a struct")]
    UnsupportedRootType {
        /// Name of the offending type.
        type_name: &'static str,
    },

    /// A struct value was reached again while it was still being projected.
    #[error("cyclic structure detected at `{type_name}`")]
    CyclicStructure {
        /// Name of the struct type that closes the cycle.
        type_name: &'static str,
    },

    /// The projection nested deeper than the configured limit.
    #[error("projection exceeded the maximum depth of {limit}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// A field's custom serialized form could not be produced.
    #[error("failed to marshal field `{key}`")]
    Marshal {
        /// Output key of the field being marshaled.
        key: String,

        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
