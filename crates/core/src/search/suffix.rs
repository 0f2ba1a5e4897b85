//! Ordered suffix sets for candidate expansion.

/// Trailing form of a source script.
pub const SOURCE_SUFFIX: &str = ".rb";
/// Trailing form of a pre-compiled unit.
pub const COMPILED_SUFFIX: &str = ".class";
/// Trailing form of a loadable archive.
pub const ARCHIVE_SUFFIX: &str = ".jar";

/// An ordered sequence of suffixes tried when expanding a base name into
/// probeable full names. The order is a deliberate tie-break: when several
/// physical forms of the same base exist, the earliest suffix wins,
/// regardless of modification times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixSet {
    suffixes: Vec<String>,
}

impl SuffixSet {
    /// Build a set from suffixes in priority order. An empty sequence
    /// degenerates to the single empty suffix, so the bare base path is
    /// still probed.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut suffixes: Vec<String> = suffixes.into_iter().map(Into::into).collect();
        if suffixes.is_empty() {
            suffixes.push(String::new());
        }
        Self { suffixes }
    }

    /// Only the bare base path.
    pub fn bare() -> Self {
        Self::new([""])
    }

    /// Source scripts only.
    pub fn source() -> Self {
        Self::new([SOURCE_SUFFIX])
    }

    /// Compiled units and archives.
    pub fn binary() -> Self {
        Self::new([COMPILED_SUFFIX, ARCHIVE_SUFFIX])
    }

    /// Every form, bare path first.
    pub fn all() -> Self {
        Self::new(["", SOURCE_SUFFIX, COMPILED_SUFFIX, ARCHIVE_SUFFIX])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }

    /// Candidate full names for a base, in set order.
    pub fn candidates<'a>(&'a self, base: &'a str) -> impl Iterator<Item = String> + 'a {
        self.iter().map(move |suffix| format!("{base}{suffix}"))
    }
}
