//! Shape classification of requested names.

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional `scheme:` prefixes followed by a leading slash. Kept as the
/// historical pattern; `[^:]` deliberately admits slashes inside a scheme
/// component.
static ABSOLUTE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A([^:]+:)*/").expect("absolute shape pattern"));

/// Resolution strategy selected for a request name. Classification is pure
/// string-shape inspection; the strategies themselves live in the searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStrategy {
    /// `./name` — relative to the current context, load path not consulted.
    CurrentRelative,
    /// `../name` — as above, path used as-is.
    ParentRelative,
    /// `~/name` — expand against the environment's home directory.
    HomeRelative,
    /// Absolute or scheme-qualified path; resolved directly.
    Absolute,
    /// `file:name` — strip the prefix and probe directly; on a miss, fall
    /// through to the load-path scan. A compatibility carve-out scoped to
    /// this one prefix.
    FileScheme,
    /// Plain name, scanned across the load path in order.
    LoadPath,
}

/// Classify a request name. First match wins, in this exact order.
pub fn classify(name: &str) -> PathStrategy {
    if name.starts_with("./") {
        PathStrategy::CurrentRelative
    } else if name.starts_with("../") {
        PathStrategy::ParentRelative
    } else if name.starts_with("~/") {
        PathStrategy::HomeRelative
    } else if ABSOLUTE_SHAPE.is_match(name) {
        PathStrategy::Absolute
    } else if name.starts_with("file:") {
        PathStrategy::FileScheme
    } else {
        PathStrategy::LoadPath
    }
}
