//! Dot-separated decimal sequences, the numeric backbone of every version.

use crate::error::{FormatError, Result};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A sequence of dot-separated non-negative integers, e.g. `1.2.3`.
///
/// Ordering is lexicographic over the decimals with missing trailing
/// components ranking below `0`, so `1.2` sorts strictly before `1.2.0`.
/// Two lists compare equal only when they are identical, so ordering and
/// equality agree at this level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DottedList {
    decimals: SmallVec<[u64; 4]>,
}

impl DottedList {
    /// Builds a dotted list directly from decimals.
    #[must_use]
    pub fn new(decimals: impl IntoIterator<Item = u64>) -> Self {
        Self {
            decimals: decimals.into_iter().collect(),
        }
    }

    /// Parses a string of the grammar `Integer ("." Integer)*`.
    ///
    /// Rejects empty input, empty tokens (`1..2`), non-digit characters,
    /// and decimals too large for `u64`.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(FormatError::InvalidDottedList(input.to_string()));
        }

        let mut decimals = SmallVec::new();
        for token in input.split('.') {
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FormatError::InvalidDottedList(input.to_string()));
            }
            let decimal = token
                .parse::<u64>()
                .map_err(|_| FormatError::InvalidDottedList(input.to_string()))?;
            decimals.push(decimal);
        }

        Ok(Self { decimals })
    }

    /// Checks whether a string matches the dotted-list grammar
    /// (`^\d+(\.\d+)*$`).
    ///
    /// This is a pure grammar check: a decimal too large for `u64` still
    /// passes here but fails [`DottedList::parse`].
    #[must_use]
    pub fn is_valid(input: &str) -> bool {
        !input.is_empty()
            && input
                .split('.')
                .all(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
    }

    /// The parsed decimals.
    #[must_use]
    #[inline]
    pub fn decimals(&self) -> &[u64] {
        &self.decimals
    }

    /// Number of decimals.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.decimals.len()
    }

    /// Whether the list holds no decimals at all. Only the placeholder
    /// value inside an absent version-part suffix is empty; parsing never
    /// produces an empty list.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decimals.is_empty()
    }
}

impl fmt::Display for DottedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, decimal) in self.decimals.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{decimal}")?;
        }
        Ok(())
    }
}

impl PartialOrd for DottedList {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DottedList {
    fn cmp(&self, other: &Self) -> Ordering {
        // A missing component ranks below 0 (None < Some(0))
        let len = self.decimals.len().max(other.decimals.len());
        for i in 0..len {
            let left = self.decimals.get(i);
            let right = other.decimals.get(i);
            match left.cmp(&right) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl FromStr for DottedList {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
