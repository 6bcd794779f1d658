//! Possibly disjoint ranges of versions.

use crate::constraint::Constraint;
use crate::error::{FormatError, Result};
use crate::version::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::{SmallVec, smallvec};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// One non-disjoint piece of a [`VersionRange`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RangePart {
    /// `START..!END`: inclusive start, exclusive end, either bound may
    /// be omitted.
    Interval {
        start: Option<Version>,
        end: Option<Version>,
    },
    /// Matches exactly one version.
    Exact(Version),
    /// Matches every version except one.
    Exclude(Version),
}

impl RangePart {
    fn parse(input: &str) -> Result<Self> {
        if let Some((start, end)) = input.split_once("..") {
            let start = if start.is_empty() {
                None
            } else {
                Some(Version::parse(start)?)
            };
            let end = if end.is_empty() {
                None
            } else {
                let end = end
                    .strip_prefix('!')
                    .ok_or_else(|| FormatError::RangeEndNotExclusive(end.to_string()))?;
                Some(Version::parse(end)?)
            };
            Ok(Self::Interval { start, end })
        } else if let Some(excluded) = input.strip_prefix('!') {
            Ok(Self::Exclude(Version::parse(excluded)?))
        } else {
            Ok(Self::Exact(Version::parse(input)?))
        }
    }

    fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Interval { start, end } => {
                if let Some(start) = start {
                    if version < start {
                        return false;
                    }
                }
                if let Some(end) = end {
                    if version >= end {
                        return false;
                    }
                }
                true
            }
            // Exact matching uses equality, not ordering, so an exact
            // part for `1.0` does not match `1.0-`
            Self::Exact(exact) => version == exact,
            Self::Exclude(excluded) => version != excluded,
        }
    }

    /// Narrows this part against a constraint, or `None` when nothing
    /// remains of it.
    fn intersect(&self, constraint: &Constraint) -> Option<Self> {
        match self {
            Self::Interval { start, end } => {
                // Keep the higher lower bound, own bound on ties
                let start = match (start.as_ref(), constraint.not_before.as_ref()) {
                    (Some(own), Some(bound)) if bound > own => Some(bound),
                    (None, bound) => bound,
                    (own, _) => own,
                };
                // Keep the lower upper bound, own bound on ties
                let end = match (end.as_ref(), constraint.before.as_ref()) {
                    (Some(own), Some(bound)) if bound < own => Some(bound),
                    (None, bound) => bound,
                    (own, _) => own,
                };
                if let (Some(start), Some(end)) = (start, end) {
                    if start >= end {
                        return None;
                    }
                }
                Some(Self::Interval {
                    start: start.cloned(),
                    end: end.cloned(),
                })
            }
            // An exact version survives iff it lies within the constraint
            Self::Exact(exact) => constraint.matches(exact).then(|| self.clone()),
            // An exclusion inside the constraint cannot be expressed as a
            // single part and is dropped; outside it, the constraint's
            // own interval remains
            Self::Exclude(excluded) => {
                if constraint.matches(excluded) {
                    None
                } else {
                    Some(Self::Interval {
                        start: constraint.not_before.clone(),
                        end: constraint.before.clone(),
                    })
                }
            }
        }
    }
}

impl fmt::Display for RangePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval { start, end } => {
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                f.write_str("..")?;
                if let Some(end) = end {
                    write!(f, "!{end}")?;
                }
                Ok(())
            }
            Self::Exact(version) => write!(f, "{version}"),
            Self::Exclude(version) => write!(f, "!{version}"),
        }
    }
}

/// A (possibly disjoint) range of [`Version`]s.
///
/// Range parts are separated by pipes (`|`). Each part is either an
/// interval in the form `START..!END` matching versions where
/// `START <= version < END` (the start or end may be omitted), a single
/// version number matching only that version, or `!VERSION` matching
/// everything except that version. A range with no parts matches every
/// version.
///
/// # Examples
///
/// ```
/// use zi_version::{Version, VersionRange};
///
/// let range = VersionRange::parse("1.0..!2.0|3.1")?;
/// assert!(range.matches(&Version::parse("1.5")?));
/// assert!(range.matches(&Version::parse("3.1")?));
/// assert!(!range.matches(&Version::parse("2.0")?));
/// # Ok::<(), zi_version::FormatError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    parts: SmallVec<[RangePart; 2]>,
}

impl VersionRange {
    /// Range matching any version.
    #[must_use]
    pub fn any() -> Self {
        Self {
            parts: SmallVec::new(),
        }
    }

    /// The canonical impossible range: a zero-width interval matching no
    /// version.
    #[must_use]
    pub fn none() -> Self {
        let zero = Version::new([0]);
        Self {
            parts: smallvec![RangePart::Interval {
                start: Some(zero.clone()),
                end: Some(zero),
            }],
        }
    }

    /// Range matching exactly one version.
    #[must_use]
    pub fn exact(version: Version) -> Self {
        Self {
            parts: smallvec![RangePart::Exact(version)],
        }
    }

    /// Range matching everything except one version.
    #[must_use]
    pub fn exclude(version: Version) -> Self {
        Self {
            parts: smallvec![RangePart::Exclude(version)],
        }
    }

    /// Single-interval range with optional bounds: inclusive start,
    /// exclusive end.
    #[must_use]
    pub fn between(not_before: Option<Version>, before: Option<Version>) -> Self {
        Self {
            parts: smallvec![RangePart::Interval {
                start: not_before,
                end: before,
            }],
        }
    }

    /// Parses a range string: parts separated by `|`, surrounding
    /// whitespace per part ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let parts = input
            .split('|')
            .map(|part| RangePart::parse(part.trim()))
            .collect::<Result<_>>()?;
        Ok(Self { parts })
    }

    /// Checks whether a version lies within this range.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        if self.parts.is_empty() {
            return true;
        }
        self.parts.iter().any(|part| part.matches(version))
    }

    /// Intersects this range with a constraint.
    ///
    /// Every part is narrowed against the constraint independently;
    /// parts with nothing left are dropped. When no part survives the
    /// result is [`VersionRange::none`].
    #[must_use]
    pub fn intersect(&self, constraint: &Constraint) -> Self {
        if self.parts.is_empty() {
            return Self::between(constraint.not_before.clone(), constraint.before.clone());
        }

        let parts: SmallVec<[RangePart; 2]> = self
            .parts
            .iter()
            .filter_map(|part| part.intersect(constraint))
            .collect();

        if parts.is_empty() {
            trace!(range = %self, %constraint, "Intersection left no version range parts");
            return Self::none();
        }
        Self { parts }
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::any()
    }
}

impl From<Version> for VersionRange {
    /// Turns a version into a lower bound matching it and everything
    /// above.
    fn from(version: Version) -> Self {
        Self::between(Some(version), None)
    }
}

impl From<Constraint> for VersionRange {
    fn from(constraint: Constraint) -> Self {
        Self::between(constraint.not_before, constraint.before)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionRange {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for VersionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
