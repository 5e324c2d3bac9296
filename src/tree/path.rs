//! Path splitting: raw story paths into an optional root and group names

use crate::error::CatalogError;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::fmt;

/// Prefix JSON channel serializers use for RegExp values: `_regexp_<flags>|<source>`
const SERIALIZED_REGEX_PREFIX: &str = "_regexp_";

/// A separator used to split story paths, either literal text or a regex.
#[derive(Debug, Clone)]
pub enum Separator {
    Literal(String),
    Pattern(Regex),
}

impl Separator {
    pub fn literal(text: impl Into<String>) -> Self {
        Separator::Literal(text.into())
    }

    /// Compile a regex separator
    pub fn pattern(source: &str) -> Result<Self, CatalogError> {
        Self::pattern_with_flags(source, "")
    }

    /// Compile a regex separator with JS-style flags. Only `i` changes matching.
    pub fn pattern_with_flags(source: &str, flags: &str) -> Result<Self, CatalogError> {
        RegexBuilder::new(source)
            .case_insensitive(flags.contains('i'))
            .build()
            .map(Separator::Pattern)
            .map_err(|e| CatalogError::InvalidSeparator {
                source_text: source.to_string(),
                reason: e.to_string(),
            })
    }

    /// Parse a separator from a leaf record parameter value.
    ///
    /// Accepts a plain string (literal), a serialized regex string
    /// (`_regexp_<flags>|<source>`) or an object `{ "pattern": "<regex>" }`.
    pub fn from_value(value: &Value) -> Result<Self, CatalogError> {
        match value {
            Value::String(text) => match text.strip_prefix(SERIALIZED_REGEX_PREFIX) {
                Some(rest) => {
                    let (flags, source) = rest.split_once('|').ok_or_else(|| {
                        CatalogError::InvalidSeparator {
                            source_text: text.clone(),
                            reason: "serialized regex is missing the '|' delimiter".to_string(),
                        }
                    })?;
                    Self::pattern_with_flags(source, flags)
                }
                None => Ok(Separator::literal(text.as_str())),
            },
            Value::Object(map) => match map.get("pattern") {
                Some(Value::String(source)) => {
                    let flags = map.get("flags").and_then(Value::as_str).unwrap_or("");
                    Self::pattern_with_flags(source, flags)
                }
                _ => Err(CatalogError::InvalidSeparator {
                    source_text: value.to_string(),
                    reason: "object separator needs a string 'pattern' field".to_string(),
                }),
            },
            other => Err(CatalogError::InvalidSeparator {
                source_text: other.to_string(),
                reason: "separator must be a string or a pattern object".to_string(),
            }),
        }
    }

    /// Source text of the separator (regex source for patterns)
    pub fn as_str(&self) -> &str {
        match self {
            Separator::Literal(text) => text,
            Separator::Pattern(regex) => regex.as_str(),
        }
    }

    /// Split `text` on every match. An empty literal never matches.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Separator::Literal(sep) if sep.is_empty() => vec![text],
            Separator::Literal(sep) => text.split(sep.as_str()).collect(),
            Separator::Pattern(regex) => regex.split(text).collect(),
        }
    }
}

impl PartialEq for Separator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Separator::Literal(a), Separator::Literal(b)) => a == b,
            (Separator::Pattern(a), Separator::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Literal(text) => write!(f, "{:?}", text),
            Separator::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// Result of splitting a story path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitPath {
    pub root: Option<String>,
    pub groups: Vec<String>,
}

impl SplitPath {
    /// Root (if any) followed by groups: the names of the whole chain
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.root
            .iter()
            .map(String::as_str)
            .chain(self.groups.iter().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.groups.is_empty()
    }
}

/// Split a raw path into an optional root and group names.
///
/// Only the first two pieces of the root split are considered. When the
/// second piece is missing or empty there is no root and the whole path is
/// split on `group_separator`. Empty segments are dropped. A non-empty path
/// made only of separators yields itself as the single group.
pub fn split_path(path: &str, root_separator: &Separator, group_separator: &Separator) -> SplitPath {
    let mut pieces = root_separator.split(path).into_iter().take(2);
    let first = pieces.next().unwrap_or("");
    let remainder = pieces.next().filter(|rest| !rest.is_empty());

    let (root, grouped) = match remainder {
        Some(rest) => (Some(first).filter(|r| !r.is_empty()), rest),
        None => (None, path),
    };

    let mut groups: Vec<String> = group_separator
        .split(grouped)
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    if groups.is_empty() && root.is_none() && !path.is_empty() {
        groups.push(path.to_string());
    }

    SplitPath {
        root: root.map(str::to_string),
        groups,
    }
}
