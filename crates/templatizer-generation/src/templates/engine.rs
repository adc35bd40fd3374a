//! Marker substitution over opaque template text
//!
//! A marker is a token name wrapped in [`MARKER_DELIMITER`] on both sides,
//! e.g. `%NAME-UPCASE%`. Text is never parsed beyond that: every byte that is
//! not part of a recognized marker is copied through unchanged and in order.
//!
//! Scanning is a single left-to-right pass:
//! - a delimiter pair whose inner text is a resolved token is replaced by its value
//!   and scanning resumes after the closing delimiter;
//! - otherwise only the opening delimiter is emitted and scanning resumes right
//!   after it, so in `%FOO%NAME%` the `%NAME%` marker is still found;
//! - a delimiter with no closing partner leaves the rest of the text as is.
//!
//! Markers whose names are not in the catalog are not errors.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    models::RenderResult,
    templates::catalog::{is_token_name, ResolvedCatalog},
};

/// Character that opens and closes a marker
pub const MARKER_DELIMITER: char = '%';

const DELIMITER_STR: &str = "%";
const DELIMITER_LEN: usize = DELIMITER_STR.len();

/// One piece of scanned template text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim
    Literal(&'a str),
    /// A recognized marker and the value replacing it
    Marker {
        /// Token name between the delimiters
        name: &'a str,
        /// Resolved value
        value: &'a str,
    },
    /// An opening delimiter that did not start a recognized marker
    ///
    /// Emits the delimiter itself; `candidate` is the text up to the next
    /// delimiter, which is scanned again as ordinary text.
    Stray {
        /// Text between this delimiter and the next one
        candidate: &'a str,
    },
}

impl Segment<'_> {
    /// Text this segment contributes to the output
    pub fn output(&self) -> &str {
        match self {
            Segment::Literal(text) => text,
            Segment::Marker { value, .. } => value,
            Segment::Stray { .. } => DELIMITER_STR,
        }
    }
}

/// Iterator over the [`Segment`]s of a template text
pub struct Scanner<'a> {
    text: &'a str,
    catalog: &'a ResolvedCatalog,
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Scan `text` against `catalog`
    pub fn new(text: &'a str, catalog: &'a ResolvedCatalog) -> Self {
        Self {
            text,
            catalog,
            position: 0,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.position..];
        if rest.is_empty() {
            return None;
        }

        match rest.find(MARKER_DELIMITER) {
            None => {
                self.position = self.text.len();
                Some(Segment::Literal(rest))
            }
            Some(0) => {
                let after = &rest[DELIMITER_LEN..];
                match after.find(MARKER_DELIMITER) {
                    Some(end) => {
                        let candidate = &after[..end];
                        if let Some(value) = self.catalog.get(candidate) {
                            self.position += DELIMITER_LEN + end + DELIMITER_LEN;
                            Some(Segment::Marker {
                                name: candidate,
                                value,
                            })
                        } else {
                            self.position += DELIMITER_LEN;
                            Some(Segment::Stray { candidate })
                        }
                    }
                    None => {
                        // Unterminated: the remainder is plain text
                        self.position = self.text.len();
                        Some(Segment::Literal(rest))
                    }
                }
            }
            Some(start) => {
                self.position += start;
                Some(Segment::Literal(&rest[..start]))
            }
        }
    }
}

/// Replace every recognized marker in `text` with its resolved value
pub fn substitute(text: &str, catalog: &ResolvedCatalog) -> String {
    let mut output = String::with_capacity(text.len());
    for segment in Scanner::new(text, catalog) {
        output.push_str(segment.output());
    }
    output
}

/// Substitute and report which tokens were used and which markers were unknown
pub fn render(text: &str, catalog: &ResolvedCatalog) -> RenderResult {
    let mut content = String::with_capacity(text.len());
    let mut used = FirstSeen::default();
    let mut unknown = FirstSeen::default();

    for segment in Scanner::new(text, catalog) {
        match segment {
            Segment::Marker { name, .. } => used.push(name),
            Segment::Stray { candidate } if is_token_name(candidate) => {
                debug!(marker = candidate, "leaving unknown marker verbatim");
                unknown.push(candidate);
            }
            _ => {}
        }
        content.push_str(segment.output());
    }

    RenderResult {
        content,
        placeholders_used: used.into_vec(),
        unknown_markers: unknown.into_vec(),
    }
}

/// Substitute many independent texts in parallel, preserving order
pub fn substitute_all<T>(texts: &[T], catalog: &ResolvedCatalog) -> Vec<String>
where
    T: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| substitute(text.as_ref(), catalog))
        .collect()
}

/// List every marker-shaped name in `text`, in first-seen order
///
/// Uses the same delimiter pairing as substitution but without a catalog, so
/// it reports candidates a template may expect rather than what a given
/// catalog would replace.
pub fn scan_markers(text: &str) -> Vec<String> {
    let empty = ResolvedCatalog::default();
    let mut seen = FirstSeen::default();
    for segment in Scanner::new(text, &empty) {
        if let Segment::Stray { candidate } = segment {
            if is_token_name(candidate) {
                seen.push(candidate);
            }
        }
    }
    seen.into_vec()
}

/// Distinct names in insertion order
#[derive(Default)]
struct FirstSeen {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl FirstSeen {
    fn push(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.order.push(name.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Template engine bound to one resolved catalog
///
/// Cheap to share across threads; the catalog is read-only.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    catalog: ResolvedCatalog,
}

impl TemplateEngine {
    /// Create an engine over a resolved catalog
    pub fn new(catalog: ResolvedCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog this engine substitutes from
    pub fn catalog(&self) -> &ResolvedCatalog {
        &self.catalog
    }

    /// See [`substitute`]
    pub fn substitute(&self, text: &str) -> String {
        substitute(text, &self.catalog)
    }

    /// See [`render`]
    pub fn render(&self, text: &str) -> RenderResult {
        render(text, &self.catalog)
    }

    /// See [`substitute_all`]
    pub fn substitute_all<T>(&self, texts: &[T]) -> Vec<String>
    where
        T: AsRef<str> + Sync,
    {
        substitute_all(texts, &self.catalog)
    }
}
