//! Implementation version numbers.

use crate::dotted::DottedList;
use crate::error::{FormatError, Result};
use crate::part::VersionPart;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// A Zero Install implementation version number.
///
/// This is the syntax for valid version strings:
///
/// ```text
/// Version    := DottedList ("-" Modifier? DottedList?)*
/// DottedList := Integer ("." Integer)*
/// Modifier   := "pre" | "rc" | "post"
/// ```
///
/// Versions are immutable values with a total order: `1.0-pre` < `1.0` <
/// `1.0-rc1` < `1.0-post`. Ordering pads missing trailing segments with
/// the default [`VersionPart`], while equality requires identical segment
/// sequences; `1.0` and `1.0-` therefore compare as ordered-equal without
/// being `==`. This asymmetry is long-standing feed behavior and is kept
/// deliberately; avoid keying ordered maps by `Version` if inputs may
/// carry trailing `-` segments.
///
/// A string containing a template variable (a substring in curly
/// brackets, e.g. `1.0-{build}`) is stored verbatim instead of parsed.
/// Templates are only valid in feed templates, never in regular feeds;
/// they sort below every parsed version and compare among themselves by
/// their verbatim text.
///
/// # Examples
///
/// ```
/// use zi_version::Version;
///
/// let stable = Version::parse("1.2.3")?;
/// let candidate = Version::parse("1.2.3-rc1")?;
/// assert!(stable < candidate);
/// assert_eq!(candidate.to_string(), "1.2.3-rc1");
/// # Ok::<(), zi_version::FormatError>(())
/// ```
#[derive(Clone)]
pub struct Version {
    /// Leading dotted list; empty for template versions.
    first: DottedList,
    /// Suffix segments, in order of appearance.
    rest: SmallVec<[VersionPart; 2]>,
    /// Verbatim input for template versions, stored instead of parts.
    template: Option<Arc<str>>,
}

/// A template variable is a `{` with a `}` somewhere after it.
fn contains_template_variables(value: &str) -> bool {
    match value.find('{') {
        Some(open) => value[open..].contains('}'),
        None => false,
    }
}

impl Version {
    /// Builds a version directly from leading decimals, with no suffix
    /// segments.
    ///
    /// # Panics
    ///
    /// Panics if `decimals` yields no elements; a version must start with
    /// at least one decimal.
    #[must_use]
    pub fn new(decimals: impl IntoIterator<Item = u64>) -> Self {
        let first = DottedList::new(decimals);
        assert!(!first.is_empty(), "a version needs at least one decimal");
        Self {
            first,
            rest: SmallVec::new(),
            template: None,
        }
    }

    /// Parses a version string.
    ///
    /// The input is split on `-`; the leading token must be a dotted
    /// list, every following token is parsed as a [`VersionPart`]. Input
    /// containing a template variable is stored verbatim instead.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(FormatError::Empty);
        }

        if contains_template_variables(input) {
            return Ok(Self {
                first: DottedList::default(),
                rest: SmallVec::new(),
                template: Some(Arc::from(input)),
            });
        }

        let mut tokens = input.split('-');
        let first = match tokens.next() {
            Some(token) if DottedList::is_valid(token) => DottedList::parse(token)?,
            _ => return Err(FormatError::MustStartWithDottedList(input.to_string())),
        };
        let rest = tokens.map(VersionPart::parse).collect::<Result<_>>()?;

        Ok(Self {
            first,
            rest,
            template: None,
        })
    }

    /// The leading dotted list. Empty for template versions.
    #[must_use]
    #[inline]
    pub fn first_part(&self) -> &DottedList {
        &self.first
    }

    /// The suffix segments following the leading dotted list.
    #[must_use]
    #[inline]
    pub fn additional_parts(&self) -> &[VersionPart] {
        &self.rest
    }

    /// Whether this version holds a template variable and was stored
    /// verbatim rather than parsed.
    #[must_use]
    #[inline]
    pub fn is_template(&self) -> bool {
        self.template.is_some()
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Version").field(&self.to_string()).finish()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(template) = &self.template {
            return f.write_str(template);
        }
        write!(f, "{}", self.first)?;
        for part in &self.rest {
            write!(f, "-{part}")?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        match (&self.template, &other.template) {
            (Some(left), Some(right)) => left == right,
            (None, None) => self.first == other.first && self.rest == other.rest,
            _ => false,
        }
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(template) = &self.template {
            template.hash(state);
        } else {
            self.first.hash(state);
            self.rest.hash(state);
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Templates sort below every parsed version and by verbatim text
        // among themselves
        match (&self.template, &other.template) {
            (Some(left), Some(right)) => return left.cmp(right),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }

        match self.first.cmp(&other.first) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Missing trailing segments compare as the default part, so
        // `1.0` and `1.0-` are ordered equal (but not `==`)
        let default = VersionPart::default();
        let len = self.rest.len().max(other.rest.len());
        for i in 0..len {
            let left = self.rest.get(i).unwrap_or(&default);
            let right = other.rest.get(i).unwrap_or(&default);
            match left.cmp(right) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl FromStr for Version {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn version(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    mod parsing {
        use super::*;
        use crate::part::Modifier;
        use pretty_assertions::assert_eq;
        use test_case::test_case;

        #[test]
        fn leading_dotted_list_with_segments() {
            let v = version("1.2.3-pre1");
            assert_eq!(v.first_part().decimals(), &[1, 2, 3]);
            assert_eq!(v.additional_parts().len(), 1);

            let part = &v.additional_parts()[0];
            assert_eq!(part.modifier, Some(Modifier::Pre));
            assert_eq!(part.suffix.decimals(), &[1]);

            assert_eq!(v.to_string(), "1.2.3-pre1");
        }

        #[test]
        fn plain_dotted_list() {
            let v = version("0.54.4");
            assert_eq!(v.first_part().decimals(), &[0, 54, 4]);
            assert!(v.additional_parts().is_empty());
        }

        #[test]
        fn multiple_segments() {
            let v = version("1-rc2-post3.1-2");
            assert_eq!(v.first_part().decimals(), &[1]);
            assert_eq!(v.additional_parts().len(), 3);
            assert_eq!(v.additional_parts()[0].modifier, Some(Modifier::Rc));
            assert_eq!(v.additional_parts()[1].modifier, Some(Modifier::Post));
            assert_eq!(v.additional_parts()[2].modifier, None);
            assert_eq!(v.additional_parts()[2].suffix.decimals(), &[2]);
        }

        #[test]
        fn trailing_dash_yields_empty_segment() {
            let v = version("1.0-");
            assert_eq!(v.additional_parts().len(), 1);
            assert_eq!(v.additional_parts()[0], VersionPart::default());
        }

        #[test]
        fn empty_input() {
            assert_eq!(Version::parse(""), Err(FormatError::Empty));
        }

        #[test_case("pre" ; "modifier first")]
        #[test_case("-1" ; "leading dash")]
        #[test_case("a.b" ; "letters")]
        #[test_case("1x" ; "trailing letters")]
        #[test_case(".5" ; "leading dot")]
        fn must_start_with_dotted_list(input: &str) {
            assert_eq!(
                Version::parse(input),
                Err(FormatError::MustStartWithDottedList(input.to_string()))
            );
        }

        #[test]
        fn bad_segment_propagates() {
            assert_eq!(
                Version::parse("1.0-alpha"),
                Err(FormatError::InvalidVersionPart("alpha".to_string()))
            );
        }

        #[test]
        fn from_numeric() {
            let v = Version::new([1, 2]);
            assert_eq!(v, version("1.2"));
            assert!(v.additional_parts().is_empty());
        }

        #[test]
        #[should_panic(expected = "at least one decimal")]
        fn from_numeric_rejects_empty() {
            let _ = Version::new(std::iter::empty());
        }
    }

    mod ordering {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn modifier_tiers() {
            assert!(version("1.0-pre") < version("1.0"));
            assert!(version("1.0") < version("1.0-rc1"));
            assert!(version("1.0-rc1") < version("1.0-post"));
        }

        #[test]
        fn dotted_list_padding() {
            assert!(version("1.0") < version("1.0.0"));
            assert_ne!(version("1.0"), version("1.0.0"));
        }

        #[test]
        fn numeric_not_lexicographic() {
            assert!(version("2") < version("10"));
            assert!(version("1.9") < version("1.10"));
        }

        #[test]
        fn segment_suffixes() {
            assert!(version("1.0-rc1") < version("1.0-rc2"));
            assert!(version("1.0-rc") < version("1.0-rc0"));
            assert!(version("1.0-pre99") < version("1.0"));
        }

        #[test]
        fn later_segments_break_ties() {
            assert!(version("1.0-rc1-pre") < version("1.0-rc1"));
            assert!(version("1.0-rc1") < version("1.0-rc1-post"));
        }

        #[test]
        fn trailing_empty_segment_quirk() {
            // Ordered equal, but not equal: ordering pads with the
            // default part, equality compares exact sequences.
            let bare = version("1.0");
            let dashed = version("1.0-");
            assert_eq!(bare.cmp(&dashed), Ordering::Equal);
            assert_ne!(bare, dashed);
        }

        #[test]
        fn sorts_candidates() {
            let mut candidates = vec![
                version("1.0-post"),
                version("0.9"),
                version("1.0-pre1"),
                version("1.0"),
                version("1.0-rc2"),
            ];
            candidates.sort();
            let rendered: Vec<_> = candidates.iter().map(ToString::to_string).collect();
            assert_eq!(rendered, ["0.9", "1.0-pre1", "1.0", "1.0-rc2", "1.0-post"]);
        }
    }

    mod equality {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::collections::HashSet;

        #[test]
        fn structural() {
            assert_eq!(version("1.2.3-rc1"), version("1.2.3-rc1"));
            assert_ne!(version("1.2.3-rc1"), version("1.2.3-rc2"));
            assert_ne!(version("1.2.3"), version("1.2.3-rc1"));
        }

        #[test]
        fn hash_agrees_with_eq() {
            let mut set = HashSet::new();
            set.insert(version("1.0"));
            set.insert(version("1.0"));
            set.insert(version("1.0-"));
            set.insert(version("1.0.0"));
            assert_eq!(set.len(), 3);
        }
    }

    mod templates {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn stored_verbatim() {
            let v = version("1.0-{build}");
            assert!(v.is_template());
            assert_eq!(v.to_string(), "1.0-{build}");
        }

        #[test]
        fn detection_requires_closing_bracket() {
            assert!(version("{var}").is_template());
            // An unclosed bracket is not a template, and not a valid
            // version either
            assert!(Version::parse("1.0{").is_err());
            // Neither is a `}` that closes before the `{` opens
            assert!(Version::parse("1}2{3").is_err());
        }

        #[test]
        fn sort_below_parsed_versions() {
            assert!(version("{var}") < version("0"));
            assert!(version("1.0-{build}") < version("0.1"));
        }

        #[test]
        fn compare_by_verbatim_text() {
            assert!(version("{a}") < version("{b}"));
            assert_eq!(version("{a}"), version("{a}"));
            assert_ne!(version("{a}"), version("{b}"));
        }
    }

    mod serde_strings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn serializes_as_string() {
            let json = serde_json::to_string(&version("1.0-rc1")).unwrap();
            assert_eq!(json, "\"1.0-rc1\"");
        }

        #[test]
        fn deserializes_from_string() {
            let v: Version = serde_json::from_str("\"2.3-post\"").unwrap();
            assert_eq!(v, version("2.3-post"));
        }

        #[test]
        fn rejects_malformed() {
            let err = serde_json::from_str::<Version>("\"one.two\"").unwrap_err();
            assert!(err.to_string().contains("dotted list"));
        }
    }

    /// Strategy drawing versions across the whole grammar: multi-decimal
    /// leading lists plus zero or more modifier segments, with and
    /// without suffix lists. Small decimals keep leading-list ties
    /// frequent enough that the segment comparison actually runs.
    fn version_strategy() -> impl Strategy<Value = Version> {
        (
            prop::collection::vec(0u64..10, 1..3),
            prop::collection::vec(
                (prop::option::of(0usize..3), prop::collection::vec(0u64..10, 0..3)),
                0..3,
            ),
        )
            .prop_map(|(first, suffixes)| {
                let mut input = first
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(".");
                for (modifier, decimals) in &suffixes {
                    input.push('-');
                    if let Some(m) = modifier {
                        input.push_str(["pre", "rc", "post"][*m]);
                    }
                    input.push_str(
                        &decimals
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("."),
                    );
                }
                Version::parse(&input).unwrap()
            })
    }

    proptest! {
        /// Rendering a parsed version reproduces a string that reparses
        /// to an equal value.
        #[test]
        fn prop_display_round_trips(version in version_strategy()) {
            let reparsed = Version::parse(&version.to_string()).unwrap();
            prop_assert_eq!(version, reparsed);
        }

        /// The order is total: comparison never disagrees with itself
        /// when the operands are swapped.
        #[test]
        fn prop_order_antisymmetric(a in version_strategy(), b in version_strategy()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }

        /// The order is transitive.
        #[test]
        fn prop_order_transitive(
            a in version_strategy(),
            b in version_strategy(),
            c in version_strategy(),
        ) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
        }

        /// Arbitrary input either parses or reports an error, never
        /// panics.
        #[test]
        fn prop_parse_never_panics(input in ".*") {
            let _ = Version::parse(&input);
        }
    }
}
