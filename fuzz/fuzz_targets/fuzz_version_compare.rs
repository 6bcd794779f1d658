#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::cmp::Ordering;
use zi_version::Version;

/// Arbitrary version components for structured fuzzing.
#[derive(Debug, Clone, Arbitrary)]
struct FuzzVersion {
    first: Vec<u32>,
    segments: Vec<(u8, Vec<u32>)>,
}

impl FuzzVersion {
    /// Renders the components as a version string of the feed grammar.
    fn render(&self) -> Option<String> {
        if self.first.is_empty() {
            return None;
        }

        let mut out = self
            .first
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");

        for (modifier, suffix) in &self.segments {
            out.push('-');
            out.push_str(match modifier % 4 {
                0 => "",
                1 => "pre",
                2 => "rc",
                _ => "post",
            });
            out.push_str(
                &suffix
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("."),
            );
        }

        Some(out)
    }
}

fuzz_target!(|input: (FuzzVersion, FuzzVersion)| {
    let (Some(a), Some(b)) = (input.0.render(), input.1.render()) else {
        return;
    };

    // Strings built from valid components must always parse
    let a = Version::parse(&a).expect("constructed version must parse");
    let b = Version::parse(&b).expect("constructed version must parse");

    // Comparison must be antisymmetric and consistent with equality
    match a.cmp(&b) {
        Ordering::Less => {
            assert_eq!(b.cmp(&a), Ordering::Greater);
            assert_ne!(a, b);
        }
        Ordering::Greater => {
            assert_eq!(b.cmp(&a), Ordering::Less);
            assert_ne!(a, b);
        }
        Ordering::Equal => {
            assert_eq!(b.cmp(&a), Ordering::Equal);
        }
    }

    // Equality agrees across clones and round-trips
    assert_eq!(a, a.clone());
    assert_eq!(Version::parse(&a.to_string()).unwrap(), a);
    assert_eq!(Version::parse(&b.to_string()).unwrap(), b);
});
