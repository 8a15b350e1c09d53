//! Heuristic classification of link names against a concept vocabulary.
//!
//! A link name is normalised into tokens (digits dropped, split on `_`,
//! lowercased). Tokens are tried last-to-first and, for each token, concepts
//! in vocabulary order; the first concept whose lowercase name is a substring
//! of the token is assigned. `"kitchen_drawer_3_handle"` yields the tokens
//! `["kitchen", "drawer", "handle"]`, so a vocabulary containing both
//! `Drawer` and `Handle` classifies it as a `Handle`.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{Error, Result};

/// Concepts of the apartment model the exporter was first written for,
/// including the structural class names the builder reserves.
pub const DEFAULT_CONCEPTS: &[&str] = &[
    "Wardrobe",
    "Root",
    "Armchair",
    "Table",
    "Cabinet",
    "Drawer",
    "Door",
    "Handle",
    "Machine",
    "Countertop",
    "Cooktop",
    "Dishwasher",
    "Hotplate",
    "Oven",
    "Sink",
    "Sofa",
    "Tap",
    "Wall",
    "Link",
    "Joint",
    "RevoluteJoint",
    "PrismaticJoint",
    "FixedJoint",
    "FloatingJoint",
    "PlanarJoint",
    "ContinuousJoint",
];

/// Position of a concept in its [`Vocabulary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptId(usize);

impl ConceptId {
    /// Zero-based index into the vocabulary.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Concept {
    name: String,
    needle: String,
}

/// An ordered, case-insensitively unique list of concept names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    concepts: Vec<Concept>,
}

impl Vocabulary {
    /// Builds a vocabulary, keeping the caller's order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyConcept`] for an empty name (it would match every
    /// token) and [`Error::DuplicateConcept`] if two names differ only by case.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut concepts = Vec::new();
        let mut seen = HashSet::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(Error::EmptyConcept);
            }
            let needle = name.to_lowercase();
            if !seen.insert(needle.clone()) {
                return Err(Error::DuplicateConcept(name));
            }
            concepts.push(Concept { name, needle });
        }
        Ok(Self { concepts })
    }

    /// The built-in [`DEFAULT_CONCEPTS`] vocabulary.
    #[must_use]
    pub fn apartment() -> Self {
        Self {
            concepts: DEFAULT_CONCEPTS
                .iter()
                .map(|&name| Concept {
                    name: name.to_owned(),
                    needle: name.to_lowercase(),
                })
                .collect(),
        }
    }

    /// Concept name as supplied by the caller, or `None` if `id` came from
    /// a different, longer vocabulary.
    #[must_use]
    pub fn name(&self, id: ConceptId) -> Option<&str> {
        self.concepts.get(id.0).map(|c| c.name.as_str())
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ConceptId> {
        let needle = name.to_lowercase();
        self.concepts
            .iter()
            .position(|c| c.needle == needle)
            .map(ConceptId)
    }

    /// Concepts in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (ConceptId, &str)> {
        self.concepts
            .iter()
            .enumerate()
            .map(|(i, c)| (ConceptId(i), c.name.as_str()))
    }

    /// Number of concepts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Returns `true` if the vocabulary has no concepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

/// Numeric characters that do not stand for a single decimal digit: letter
/// numbers (Roman numerals, Suzhou numerals) and numerals with other values
/// (fractions, circled ten and above). Sorted, inclusive.
const NON_DIGIT_NUMERALS: &[(char, char)] = &[
    ('\u{00BC}', '\u{00BE}'),
    ('\u{09F4}', '\u{09F9}'),
    ('\u{0B72}', '\u{0B77}'),
    ('\u{0BF0}', '\u{0BF2}'),
    ('\u{0C78}', '\u{0C7E}'),
    ('\u{0D58}', '\u{0D5E}'),
    ('\u{0D70}', '\u{0D78}'),
    ('\u{0F2A}', '\u{0F33}'),
    ('\u{1372}', '\u{137C}'),
    ('\u{16EE}', '\u{16F0}'),
    ('\u{17F0}', '\u{17F9}'),
    ('\u{2150}', '\u{2182}'),
    ('\u{2185}', '\u{2189}'),
    ('\u{2469}', '\u{2473}'),
    ('\u{247D}', '\u{2487}'),
    ('\u{2491}', '\u{249B}'),
    ('\u{24EB}', '\u{24F4}'),
    ('\u{24FE}', '\u{24FE}'),
    ('\u{277F}', '\u{277F}'),
    ('\u{2789}', '\u{2789}'),
    ('\u{2793}', '\u{2793}'),
    ('\u{2CFD}', '\u{2CFD}'),
    ('\u{3007}', '\u{3007}'),
    ('\u{3021}', '\u{3029}'),
    ('\u{3038}', '\u{303A}'),
    ('\u{3192}', '\u{3195}'),
    ('\u{3220}', '\u{3229}'),
    ('\u{3248}', '\u{324F}'),
    ('\u{3251}', '\u{325F}'),
    ('\u{3280}', '\u{3289}'),
    ('\u{32B1}', '\u{32BF}'),
    ('\u{A6E6}', '\u{A6EF}'),
    ('\u{A830}', '\u{A835}'),
    ('\u{10140}', '\u{10174}'),
    ('\u{10341}', '\u{10341}'),
    ('\u{1034A}', '\u{1034A}'),
    ('\u{103D1}', '\u{103D5}'),
    ('\u{12400}', '\u{1246E}'),
];

/// Returns `true` for characters that stand for one digit 0-9 in any
/// script, including superscript and circled digits.
fn is_digit(c: char) -> bool {
    if c.is_ascii_digit() {
        return true;
    }
    c.is_numeric()
        && NON_DIGIT_NUMERALS
            .binary_search_by(|&(start, end)| {
                if end < c {
                    Ordering::Less
                } else if start > c {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_err()
}

/// Splits a link name into lowercase tokens: digits are removed first, then
/// the name is split on `_` and empty segments are dropped. Fractions and
/// Roman numerals are not digits and stay in the token.
#[must_use]
pub fn tokens(link: &str) -> Vec<String> {
    let stripped: String = link.chars().filter(|&c| !is_digit(c)).collect();
    stripped
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// The concept assigned to a single link name, if any.
#[must_use]
pub fn match_concept(link: &str, vocabulary: &Vocabulary) -> Option<ConceptId> {
    tokens(link).iter().rev().find_map(|token| {
        vocabulary
            .concepts
            .iter()
            .position(|c| token.contains(c.needle.as_str()))
            .map(ConceptId)
    })
}

/// One concept-or-nothing per link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    entries: Vec<(String, Option<ConceptId>)>,
}

impl Assignment {
    /// The concept assigned to `link`; `None` if unassigned or unknown.
    #[must_use]
    pub fn concept_of(&self, link: &str) -> Option<ConceptId> {
        self.entries
            .iter()
            .find(|(name, _)| name == link)
            .and_then(|&(_, concept)| concept)
    }

    /// `(link, concept)` pairs in link order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<ConceptId>)> {
        self.entries.iter().map(|(link, c)| (link.as_str(), *c))
    }

    /// Number of links that received a concept.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.entries.iter().filter(|(_, c)| c.is_some()).count()
    }

    /// Number of links covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no links were mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assigns at most one concept to every link name. Repeated link names get a
/// single entry.
#[must_use]
pub fn map_links_to_concepts<S: AsRef<str>>(links: &[S], vocabulary: &Vocabulary) -> Assignment {
    let mut seen = HashSet::new();
    let entries = links
        .iter()
        .map(AsRef::as_ref)
        .filter(|link| seen.insert(*link))
        .map(|link| (link.to_owned(), match_concept(link, vocabulary)))
        .collect();
    Assignment { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(names: &[&str]) -> Vocabulary {
        Vocabulary::new(names.iter().copied()).expect("valid vocabulary")
    }

    fn assigned<'v>(link: &str, vocabulary: &'v Vocabulary) -> Option<&'v str> {
        match_concept(link, vocabulary).and_then(|id| vocabulary.name(id))
    }

    #[test]
    fn digits_are_removed_before_splitting() {
        assert_eq!(tokens("table_2_top"), ["table", "top"]);
        assert_eq!(tokens("__Door12__Left_"), ["door", "left"]);
        assert!(tokens("_1_2_").is_empty());
    }

    #[test]
    fn only_single_digit_numerals_are_removed() {
        assert_eq!(tokens("oven\u{00B2}_door\u{0663}"), ["oven", "door"]);
        assert_eq!(tokens("shelf_\u{2460}"), ["shelf"]);
        assert_eq!(tokens("ta\u{00BD}ble"), ["ta\u{00BD}ble"]);
        assert_eq!(tokens("clock_\u{216B}"), ["clock", "\u{217B}"]);
        assert_eq!(tokens("step_\u{2469}"), ["step", "\u{2469}"]);
    }

    #[test]
    fn fraction_keeps_concept_unmatched() {
        let v = vocab(&["Table"]);
        assert_eq!(assigned("ta\u{00BD}ble", &v), None);
        assert_eq!(assigned("table\u{00B3}", &v), Some("Table"));
    }

    #[test]
    fn numeral_table_is_sorted() {
        assert!(NON_DIGIT_NUMERALS.windows(2).all(|w| w[0].1 < w[1].0));
        assert!(NON_DIGIT_NUMERALS.iter().all(|&(start, end)| start <= end));
    }

    #[test]
    fn foreign_concept_id_has_no_name() {
        let long = vocab(&["Drawer", "Handle", "Knob"]);
        let short = vocab(&["Drawer"]);
        let knob = long.find("knob").expect("present");
        assert_eq!(short.name(knob), None);
        assert_eq!(long.name(knob), Some("Knob"));
    }

    #[test]
    fn earlier_concept_wins_within_a_token() {
        let v = vocab(&["Table", "Tables"]);
        assert_eq!(assigned("dining_tables_1", &v), Some("Table"));
    }

    #[test]
    fn vocabulary_order_not_length_decides() {
        let v = vocab(&["Top", "Countertop"]);
        assert_eq!(assigned("kitchen_countertop", &v), Some("Top"));
        let v = vocab(&["Countertop", "Top"]);
        assert_eq!(assigned("kitchen_countertop", &v), Some("Countertop"));
    }

    #[test]
    fn last_token_is_tried_first() {
        let v = vocab(&["Drawer", "Handle"]);
        assert_eq!(assigned("drawer_3_handle", &v), Some("Handle"));
        assert_eq!(assigned("drawer_3_knob", &v), Some("Drawer"));
    }

    #[test]
    fn unmatched_name_is_unassigned() {
        let v = vocab(&["Wardrobe", "Sofa"]);
        assert_eq!(assigned("base_footprint", &v), None);
    }

    #[test]
    fn digit_stripping_exposes_concept() {
        let v = vocab(&["Shelf"]);
        assert_eq!(assigned("shelf2", &v), Some("Shelf"));
    }

    #[test]
    fn matching_ignores_case() {
        let v = vocab(&["oven"]);
        assert_eq!(assigned("Kitchen_OVEN", &v), Some("oven"));
    }

    #[test]
    fn tokens_do_not_span_underscores() {
        let v = vocab(&["Tabletop"]);
        assert_eq!(assigned("table_top", &v), None);
    }

    #[test]
    fn empty_vocabulary_assigns_nothing() {
        let v = Vocabulary::default();
        let a = map_links_to_concepts(&["sink", "oven_1"], &v);
        assert_eq!(a.len(), 2);
        assert_eq!(a.assigned_count(), 0);
    }

    #[test]
    fn mapping_is_idempotent() {
        let v = Vocabulary::apartment();
        let links = ["fridge_door", "sink_area", "handle_cab_3_top", "world"];
        assert_eq!(map_links_to_concepts(&links, &v), map_links_to_concepts(&links, &v));
    }

    #[test]
    fn one_entry_per_link() {
        let v = vocab(&["Drawer", "Handle"]);
        let a = map_links_to_concepts(&["base", "drawer_1", "handle_1", "drawer_1"], &v);
        let names: Vec<_> = a
            .iter()
            .map(|(link, c)| (link, c.and_then(|id| v.name(id))))
            .collect();
        assert_eq!(
            names,
            [
                ("base", None),
                ("drawer_1", Some("Drawer")),
                ("handle_1", Some("Handle")),
            ]
        );
        assert_eq!(a.concept_of("handle_1"), v.find("handle"));
        assert_eq!(a.concept_of("missing"), None);
    }

    #[test]
    fn rejects_case_insensitive_duplicates() {
        let err = Vocabulary::new(["Sink", "SINK"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateConcept(name) if name == "SINK"));
    }

    #[test]
    fn rejects_empty_concept() {
        assert!(matches!(Vocabulary::new(["Sink", ""]), Err(Error::EmptyConcept)));
    }

    #[test]
    fn apartment_vocabulary_is_valid() {
        let built = Vocabulary::new(DEFAULT_CONCEPTS.iter().copied()).expect("unique names");
        assert_eq!(built, Vocabulary::apartment());
    }
}
