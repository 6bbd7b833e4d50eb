//! Derived views over a loaded manifest.
//!
//! Everything here is a pure function of the current [`ManifestDocument`]:
//! the sorted poem list, the tag frequency summary and the last-updated line.
//! [`DerivedViews`] memoizes them and recomputes only when a new document
//! arrives.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use feruca::Collator;
use serde::Serialize;

use crate::loader::LoadState;
use crate::manifest::{ManifestDocument, PoemMeta};

/// Number of tags kept in the frequency summary
pub const TOP_TAG_LIMIT: usize = 8;

/// Document extension stripped before comparing filenames
const DOCUMENT_EXTENSION: &str = ".md";

/// How many poems carry a given tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub tag: String,
    pub count: usize,
}

/// Sort key for a poem: filename without extension, case folded
pub fn sort_key(filename: &str) -> String {
    let folded = filename.to_lowercase();
    match folded.strip_suffix(DOCUMENT_EXTENSION) {
        Some(stem) => stem.to_string(),
        None => folded,
    }
}

/// Compare two strings the way a reader would alphabetize them.
///
/// Unicode collation with root-locale ordering: accented letters sort beside
/// their base letter, and strings that differ only in case put the lowercase
/// form first.
pub fn collate(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b)
}

/// Poems ordered by their sort key. Equal keys keep manifest order.
pub fn sorted_poems(poems: &[PoemMeta]) -> Vec<PoemMeta> {
    let mut keyed: Vec<(String, &PoemMeta)> =
        poems.iter().map(|p| (sort_key(&p.filename), p)).collect();

    // `sort_by` is stable
    let mut collator = Collator::default();
    keyed.sort_by(|(a, _), (b, _)| collate(&mut collator, a, b));

    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}

/// Most common tags across the given poems, highest count first.
///
/// Ties are broken alphabetically; only the top [`TOP_TAG_LIMIT`] are kept.
pub fn tag_frequency(poems: &[PoemMeta]) -> Vec<TagSummary> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for poem in poems {
        for tag in &poem.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    let mut collator = Collator::default();
    ranked.sort_by(|(tag_a, count_a), (tag_b, count_b)| {
        count_b
            .cmp(count_a)
            .then_with(|| collate(&mut collator, tag_a, tag_b))
    });
    ranked.truncate(TOP_TAG_LIMIT);

    ranked
        .into_iter()
        .map(|(tag, count)| TagSummary {
            tag: tag.to_string(),
            count,
        })
        .collect()
}

/// Poems carrying the given tag, in the order given
pub fn filter_by_tag<'a>(poems: &'a [PoemMeta], tag: &str) -> Vec<&'a PoemMeta> {
    poems
        .iter()
        .filter(|p| p.tags.iter().any(|t| t == tag))
        .collect()
}

/// Title shown for a poem: the filename without its document extension
pub fn display_title(filename: &str) -> &str {
    let len = filename.len();
    let ext = DOCUMENT_EXTENSION.len();
    if len > ext
        && filename.is_char_boundary(len - ext)
        && filename[len - ext..].eq_ignore_ascii_case(DOCUMENT_EXTENSION)
    {
        &filename[..len - ext]
    } else {
        filename
    }
}

/// Render a `lastUpdated` value for display.
///
/// RFC 3339 timestamps and plain `YYYY-MM-DD` dates become `March 1, 2025`;
/// anything else is shown as-is.
pub fn format_last_updated(raw: &str) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Memoized derived views
#[derive(Debug, Default)]
pub struct DerivedViews {
    source: Option<Arc<ManifestDocument>>,
    poems: Vec<PoemMeta>,
    tags: Vec<TagSummary>,
}

impl DerivedViews {
    /// Recompute if `data` is a different document than last time.
    /// Returns true when the views changed.
    pub fn refresh(&mut self, data: Option<&Arc<ManifestDocument>>) -> bool {
        let unchanged = match (&self.source, data) {
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.source = data.cloned();
        self.poems = data.map(|d| sorted_poems(&d.poems)).unwrap_or_default();
        self.tags = tag_frequency(&self.poems);
        true
    }

    pub fn poems(&self) -> &[PoemMeta] {
        &self.poems
    }

    pub fn tags(&self) -> &[TagSummary] {
        &self.tags
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.source.as_ref().and_then(|d| d.last_updated.as_deref())
    }
}

/// Everything a consumer needs to render the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemsView {
    pub poems: Vec<PoemMeta>,
    pub tags: Vec<TagSummary>,
    pub loading: bool,
    pub error: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<String>,
}

impl PoemsView {
    /// Build a view from a state snapshot, recomputing the derived lists
    pub fn from_state(state: &LoadState) -> Self {
        let mut derived = DerivedViews::default();
        derived.refresh(state.data.as_ref());
        Self::from_parts(state, &derived)
    }

    /// Build a view from a state snapshot and already-refreshed derived lists
    pub fn from_parts(state: &LoadState, derived: &DerivedViews) -> Self {
        Self {
            poems: derived.poems().to_vec(),
            tags: derived.tags().to_vec(),
            loading: state.loading,
            error: state.error.clone(),
            last_updated: derived.last_updated().map(str::to_string),
        }
    }
}
