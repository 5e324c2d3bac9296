//! Identifier synthesis
//!
//! Group ids are derived from (parent id, name) and story ids from
//! (kind, name). Both are deterministic, so the same logical path always
//! yields the same id and batches can be merged by identity.

use unicode_normalization::UnicodeNormalization;

/// Default marker between the kind part and the name part of a story id
pub const DEFAULT_KIND_SEPARATOR: &str = "--";

/// Id synthesis contract shared by the hierarchy builder and navigation.
///
/// `kind_prefix` must invert `story_id`: for any kind `k` and name `n`,
/// `kind_prefix(&story_id(k, n))` is `story_id`'s sanitized rendering of `k`,
/// and `story_id(kind_prefix(id), n) == story_id(k, n)`. Navigation relies on
/// this to select a sibling of the current leaf by name alone.
pub trait IdSynthesis: Send + Sync {
    /// Id of a group named `name` under `parent` (`None` for a top-level group)
    fn group_id(&self, parent: Option<&str>, name: &str) -> String;

    /// Id of a leaf named `name` in kind `kind`
    fn story_id(&self, kind: &str, name: &str) -> String;

    /// Kind portion of a story id, or the whole id if it has no kind marker
    fn kind_prefix<'a>(&self, id: &'a str) -> &'a str;
}

/// Restrict `text` to `[a-z0-9-]` with no leading, trailing or repeated dashes.
///
/// Idempotent: `sanitize(&sanitize(s)) == sanitize(s)`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.nfc().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Sanitizing id synthesis with a configurable kind marker
#[derive(Debug, Clone)]
pub struct SanitizedIds {
    kind_separator: String,
}

impl SanitizedIds {
    /// `kind_separator` should contain a run of dashes `sanitize` never emits
    /// (two or more) so that `kind_prefix` stays unambiguous.
    pub fn new(kind_separator: impl Into<String>) -> Self {
        Self {
            kind_separator: kind_separator.into(),
        }
    }

    pub fn kind_separator(&self) -> &str {
        &self.kind_separator
    }
}

impl Default for SanitizedIds {
    fn default() -> Self {
        Self::new(DEFAULT_KIND_SEPARATOR)
    }
}

impl IdSynthesis for SanitizedIds {
    fn group_id(&self, parent: Option<&str>, name: &str) -> String {
        match parent {
            Some(parent) => sanitize(&format!("{}-{}", parent, name)),
            None => sanitize(name),
        }
    }

    fn story_id(&self, kind: &str, name: &str) -> String {
        format!("{}{}{}", sanitize(kind), self.kind_separator, sanitize(name))
    }

    fn kind_prefix<'a>(&self, id: &'a str) -> &'a str {
        id.split_once(self.kind_separator.as_str())
            .map(|(kind, _)| kind)
            .unwrap_or(id)
    }
}
