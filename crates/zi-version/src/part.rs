//! Modifier segments: the `-`-separated suffixes of a version number.

use crate::dotted::DottedList;
use crate::error::{FormatError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Modifier keyword opening a version part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Pre-release, ranks below an unmodified part.
    Pre,
    /// Release candidate, ranks above an unmodified part.
    Rc,
    /// Post-release, ranks above everything else in its position.
    Post,
}

impl Modifier {
    /// Splits a leading modifier keyword off a version-part string.
    fn strip(input: &str) -> (Option<Self>, &str) {
        if let Some(rest) = input.strip_prefix("pre") {
            (Some(Self::Pre), rest)
        } else if let Some(rest) = input.strip_prefix("rc") {
            (Some(Self::Rc), rest)
        } else if let Some(rest) = input.strip_prefix("post") {
            (Some(Self::Post), rest)
        } else {
            (None, input)
        }
    }

    /// Keyword as written in version strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Rc => "rc",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One suffix segment of a version number, of the grammar
/// `("pre" | "rc" | "post")? DottedList?`.
///
/// Parts order by modifier tier first (`pre` < no modifier < `rc` <
/// `post`), then by suffix. [`VersionPart::default`] is the placeholder
/// for a segment missing from the version string entirely; its empty
/// suffix ranks below `0`, so `1.0-rc` sorts before `1.0-rc0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VersionPart {
    /// Modifier keyword, or `None` for the implicit release tier.
    pub modifier: Option<Modifier>,
    /// Dotted list following the keyword; empty when absent.
    pub suffix: DottedList,
}

impl VersionPart {
    /// Parses one suffix segment. The empty string is a valid segment
    /// (no modifier, no suffix) and equals [`VersionPart::default`].
    pub fn parse(input: &str) -> Result<Self> {
        let (modifier, rest) = Modifier::strip(input);
        let suffix = if rest.is_empty() {
            DottedList::default()
        } else {
            DottedList::parse(rest)
                .map_err(|_| FormatError::InvalidVersionPart(input.to_string()))?
        };
        Ok(Self { modifier, suffix })
    }

    /// Tier rank used for ordering.
    fn rank(&self) -> u8 {
        match self.modifier {
            Some(Modifier::Pre) => 0,
            None => 1,
            Some(Modifier::Rc) => 2,
            Some(Modifier::Post) => 3,
        }
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(modifier) = self.modifier {
            f.write_str(modifier.as_str())?;
        }
        write!(f, "{}", self.suffix)
    }
}

impl PartialOrd for VersionPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionPart {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}

impl FromStr for VersionPart {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("pre1", Some(Modifier::Pre), &[1] ; "pre with number")]
    #[test_case("rc", Some(Modifier::Rc), &[] ; "bare rc")]
    #[test_case("rc2.1", Some(Modifier::Rc), &[2, 1] ; "rc with dotted list")]
    #[test_case("post", Some(Modifier::Post), &[] ; "bare post")]
    #[test_case("post3", Some(Modifier::Post), &[3] ; "post with number")]
    #[test_case("5", None, &[5] ; "bare dotted list")]
    #[test_case("", None, &[] ; "empty segment")]
    fn parses_segments(input: &str, modifier: Option<Modifier>, suffix: &[u64]) {
        let part = VersionPart::parse(input).unwrap();
        assert_eq!(part.modifier, modifier);
        assert_eq!(part.suffix.decimals(), suffix);
    }

    #[test_case("alpha" ; "unknown keyword")]
    #[test_case("pre-" ; "dash after keyword")]
    #[test_case("rc.1" ; "dot after keyword")]
    #[test_case("post x" ; "space in suffix")]
    #[test_case("Pre1" ; "capitalized keyword")]
    fn rejects_malformed(input: &str) {
        assert_eq!(
            VersionPart::parse(input),
            Err(FormatError::InvalidVersionPart(input.to_string()))
        );
    }

    #[test]
    fn empty_segment_is_default() {
        assert_eq!(VersionPart::parse("").unwrap(), VersionPart::default());
    }

    mod ordering {
        use super::*;

        fn part(s: &str) -> VersionPart {
            VersionPart::parse(s).unwrap()
        }

        #[test]
        fn tiers() {
            assert!(part("pre") < part(""));
            assert!(part("") < part("rc"));
            assert!(part("rc") < part("post"));

            // Suffixes do not leak across tiers
            assert!(part("pre99") < part("rc1"));
            assert!(part("rc99") < part("post"));
        }

        #[test]
        fn suffix_breaks_ties_within_tier() {
            assert!(part("rc1") < part("rc2"));
            assert!(part("rc1.1") < part("rc1.2"));
            assert!(part("pre1") < part("pre10"));
        }

        #[test]
        fn absent_suffix_ranks_below_zero() {
            assert!(part("rc") < part("rc0"));
            assert!(part("") < part("0"));
            assert!(VersionPart::default() < part("0"));
        }

        #[test]
        fn default_ranks_below_higher_tiers() {
            assert!(VersionPart::default() < part("rc"));
            assert!(VersionPart::default() < part("post"));
            // but not below pre, which sits in a lower tier
            assert!(VersionPart::default() > part("pre"));
        }
    }

    #[test]
    fn display_round_trips() {
        for input in ["pre1", "rc", "rc2.1", "post", "7.0", ""] {
            let part = VersionPart::parse(input).unwrap();
            assert_eq!(part.to_string(), input);
            assert_eq!(VersionPart::parse(&part.to_string()).unwrap(), part);
        }
    }

    #[test]
    fn modifier_keywords() {
        assert_eq!(Modifier::Pre.as_str(), "pre");
        assert_eq!(Modifier::Rc.to_string(), "rc");
        assert_eq!(Modifier::Post.as_str(), "post");
    }
}
