//! Version bounds attached to feed dependencies.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive-lower / exclusive-upper pair of version bounds.
///
/// Either bound may be absent, leaving that side unconstrained. A
/// version satisfies the constraint iff it is at least `not_before` and
/// strictly below `before`. The serialized field names match the feed
/// attributes `not-before` and `before`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    /// Inclusive lower bound; `None` leaves the lower side open.
    #[serde(rename = "not-before", skip_serializing_if = "Option::is_none")]
    pub not_before: Option<Version>,
    /// Exclusive upper bound; `None` leaves the upper side open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Version>,
}

impl Constraint {
    /// Builds a constraint from its two optional bounds.
    #[must_use]
    pub fn new(not_before: Option<Version>, before: Option<Version>) -> Self {
        Self { not_before, before }
    }

    /// Constraint with only a lower bound.
    #[must_use]
    pub fn not_before(version: Version) -> Self {
        Self {
            not_before: Some(version),
            before: None,
        }
    }

    /// Constraint with only an upper bound.
    #[must_use]
    pub fn before(version: Version) -> Self {
        Self {
            not_before: None,
            before: Some(version),
        }
    }

    /// Checks whether a version satisfies both bounds.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        if let Some(lower) = &self.not_before {
            if version < lower {
                return false;
            }
        }
        if let Some(upper) = &self.before {
            if version >= upper {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.not_before, &self.before) {
            (Some(lower), Some(upper)) => write!(f, "{lower} <= version < {upper}"),
            (Some(lower), None) => write!(f, "{lower} <= version"),
            (None, Some(upper)) => write!(f, "version < {upper}"),
            (None, None) => f.write_str("any version"),
        }
    }
}
