//! Segment matching logic.
//!
//! # Responsibilities
//! - Split paths into non-empty `/`-separated segments
//! - Classify pattern segments (literal, `:name`, `*.ext`)
//! - Decide whether a pattern segment admits a request segment
//!
//! # Design Decisions
//! - Literal matching is case-sensitive unless configured otherwise
//! - Parameters match exactly one segment, never an empty one
//! - Wildcards only match the final segment and compare the extension
//! - No regex; one pass per segment

use std::fmt;

/// Sentinel that starts a parameter segment (`:id`).
pub const PARAM_PREFIX: char = ':';

/// Sentinel that starts a wildcard segment (`*.css`).
pub const WILDCARD_PREFIX: char = '*';

/// Split a path into its non-empty segments.
///
/// Leading, trailing and repeated slashes are ignored, so `/`, `` and `//`
/// all produce no segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Extension of a segment: the text after its last `.`.
///
/// Returns `None` when the segment has no dot, or when the only dot is the
/// leading one of a dotfile (`.env`).
pub fn extension(segment: &str) -> Option<&str> {
    match segment.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&segment[idx + 1..]),
    }
}

/// Specificity class used when siblings are ordered by specificity.
///
/// Lower ranks are tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Literal = 0,
    Wildcard = 1,
    Param = 2,
}

/// One segment of a registered route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the request segment verbatim.
    Literal(String),
    /// Matches any single request segment and binds it to `name`.
    Param(String),
    /// Matches the final request segment when its extension equals
    /// `extension`. A bare `*` carries no extension and matches any
    /// final segment.
    Wildcard { extension: Option<String> },
}

impl Segment {
    /// Classify a raw pattern segment.
    ///
    /// Nothing is rejected: a lone `:` is a literal, and anything after
    /// `*` that is not `.ext` is folded into the extension as written.
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(PARAM_PREFIX) {
            if !name.is_empty() {
                return Segment::Param(name.to_string());
            }
        }

        if let Some(rest) = raw.strip_prefix(WILDCARD_PREFIX) {
            let ext = rest.strip_prefix('.').unwrap_or(rest);
            return Segment::Wildcard {
                extension: (!ext.is_empty()).then(|| ext.to_string()),
            };
        }

        Segment::Literal(raw.to_string())
    }

    pub fn rank(&self) -> Rank {
        match self {
            Segment::Literal(_) => Rank::Literal,
            Segment::Wildcard { .. } => Rank::Wildcard,
            Segment::Param(_) => Rank::Param,
        }
    }

    /// Whether two pattern segments address the same tree node.
    ///
    /// Parameters with different names are distinct nodes, as the
    /// segment text differs.
    pub fn same_key(&self, other: &Segment, case_sensitive: bool) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => eq(a, b, case_sensitive),
            (Segment::Param(a), Segment::Param(b)) => a == b,
            (Segment::Wildcard { extension: a }, Segment::Wildcard { extension: b }) => {
                match (a, b) {
                    (Some(a), Some(b)) => eq(a, b, case_sensitive),
                    (None, None) => true,
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Whether this pattern segment admits `segment` of a request path.
    ///
    /// `is_last` tells whether `segment` is the final one of the request;
    /// wildcards are only considered there.
    pub fn admits(&self, segment: &str, is_last: bool, case_sensitive: bool) -> bool {
        match self {
            Segment::Literal(text) => eq(text, segment, case_sensitive),
            Segment::Param(_) => true,
            Segment::Wildcard { extension: None } => is_last,
            Segment::Wildcard { extension: Some(wanted) } => {
                is_last
                    && extension(segment)
                        .map(|ext| eq(wanted, ext, case_sensitive))
                        .unwrap_or(false)
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, "{}{}", PARAM_PREFIX, name),
            Segment::Wildcard { extension: Some(ext) } => write!(f, "{}.{}", WILDCARD_PREFIX, ext),
            Segment::Wildcard { extension: None } => write!(f, "{}", WILDCARD_PREFIX),
        }
    }
}

fn eq(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}
