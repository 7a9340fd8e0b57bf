//! Parsing helpers for the two field annotations.
//!
//! A *selector* is a comma-separated list of tag tokens, e.g. `"public,admin"`.
//! A *naming* string follows the conventional `name,option,option` layout of
//! serialization tags, e.g. `"user_id,omitempty"`: the first token overrides
//! the output key when non-empty, the rest are options.

use fxhash::FxHashSet;

/// The option that suppresses a field whose value is empty.
pub const OMIT_EMPTY: &str = "omitempty";

/// Splits a selector into its tag tokens.
///
/// Tokens are trimmed of surrounding whitespace and empty tokens are
/// dropped, so `"a, b,,c"` yields `a`, `b` and `c`.
pub fn split_selector(selector: &str) -> impl Iterator<Item = &str> {
    selector.split(',').map(str::trim).filter(|token| !token.is_empty())
}

/// The set of selector tags supplied by the caller for one projection.
///
/// Membership is exact string equality; order and duplicates are irrelevant.
///
/// # Example
///
/// ```rust
/// use tagview::TagSet;
///
/// let tags: TagSet = ["public", "admin"].into_iter().collect();
///
/// assert!(tags.matches("internal,admin"));
/// assert!(!tags.matches("internal"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: FxHashSet<String>,
}

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Adds a tag, returning `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Returns `true` if the set contains `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool { self.tags.contains(tag) }

    /// Returns `true` if at least one token of `selector` is in the set.
    ///
    /// An empty selector never matches.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        split_selector(selector).any(|token| self.contains(token))
    }

    /// Returns the number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize { self.tags.len() }

    /// Returns `true` if the set holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.tags.is_empty() }

    /// Iterates over the tags in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.tags.extend(iter.into_iter().map(|tag| tag.as_ref().to_owned()));
    }
}

/// A parsed `name,option,option` naming string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Naming<'a> {
    name: &'a str,
    options: Options<'a>,
}

impl<'a> Naming<'a> {
    /// Parses a raw naming string.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(',') {
            Some((name, options)) => Self { name, options: Options(options) },
            None => Self { name: raw, options: Options("") },
        }
    }

    /// The override name, or `None` when the first token is empty.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        (!self.name.is_empty()).then_some(self.name)
    }

    /// The options following the name.
    #[must_use]
    pub const fn options(&self) -> Options<'a> { self.options }

    /// Returns `true` if the `omitempty` option is present.
    #[must_use]
    pub fn omit_empty(&self) -> bool { self.options.contains(OMIT_EMPTY) }
}

/// The comma-separated options of a naming string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options<'a>(&'a str);

impl<'a> Options<'a> {
    /// Returns `true` if `option` is one of the options.
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.iter().any(|candidate| candidate == option)
    }

    /// Iterates over the options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.0.split(',').filter(|option| !option.is_empty())
    }
}
