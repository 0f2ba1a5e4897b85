//! Compound locator parsing.
//!
//! A compound locator names an entry inside an arbitrarily deep chain of
//! nested archives: `<base>!/<entry>!/<entry>...`. Segment 0 is the base
//! locator (a plain path or a `file:`-qualified one); every later segment is
//! an entry path inside the archive opened at the previous level.

use std::fmt;

/// Delimiter separating successive archive-entry segments.
pub const NESTING_DELIMITER: &str = "!/";

const FILE_SCHEME: &str = "file:";
const JAR_SCHEME: &str = "jar:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundLocator {
    segments: Vec<String>,
}

impl CompoundLocator {
    /// Split a raw locator on the nesting delimiter. An optional `jar:`
    /// wrapper on the base is dropped, and leading slashes on entry segments
    /// are normalized away, so `a.jar!//x` and `a.jar!/x` name the same
    /// entry.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix(JAR_SCHEME).unwrap_or(raw);
        let mut segments: Vec<String> = raw
            .split(NESTING_DELIMITER)
            .map(|s| s.to_string())
            .collect();
        for segment in segments.iter_mut().skip(1) {
            while segment.starts_with('/') {
                segment.remove(0);
            }
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The base locator; never contains the nesting delimiter.
    pub fn base(&self) -> &str {
        &self.segments[0]
    }

    /// The base as a filesystem path, with any `file:` scheme stripped.
    pub fn base_path(&self) -> &str {
        self.base().strip_prefix(FILE_SCHEME).unwrap_or(self.base())
    }

    pub fn is_compound(&self) -> bool {
        self.segments.len() > 1
    }

    /// True when the base denotes a local file we can open with random
    /// access: no embedded nesting marker, and either a `file:` scheme or no
    /// scheme at all.
    pub fn base_is_plain_file(&self) -> bool {
        let base = self.base();
        !base.contains('!') && (base.starts_with(FILE_SCHEME) || !base.contains(':'))
    }

    /// Cache key for the archive reached by opening segments `0..depth`:
    /// the segments re-joined with the delimiter.
    pub fn prefix(&self, depth: usize) -> String {
        self.segments[..depth].join(NESTING_DELIMITER)
    }
}

impl fmt::Display for CompoundLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(NESTING_DELIMITER))
    }
}
