#![no_main]

use libfuzzer_sys::fuzz_target;
use zi_version::{Constraint, Version, VersionRange};

fuzz_target!(|data: &[u8]| {
    // Try to parse as UTF-8 string
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing must never panic, only return errors
        let Ok(range) = VersionRange::parse(s) else {
            return;
        };

        // Display output must reparse to an equal value
        let rendered = range.to_string();
        let reparsed = VersionRange::parse(&rendered).expect("rendered range must reparse");
        assert_eq!(reparsed, range, "round-trip changed the value: {s:?}");

        let samples: Vec<Version> = ["0", "0.9", "1.0", "1.0-pre", "1.5", "2.0", "99.99-post"]
            .iter()
            .map(|v| Version::parse(v).unwrap())
            .collect();

        // Membership checks must not panic
        for sample in &samples {
            let _ = range.matches(sample);
        }

        // Narrowing by a constraint only ever removes versions
        let constraints = [
            Constraint::default(),
            Constraint::not_before(Version::parse("1.0").unwrap()),
            Constraint::before(Version::parse("2.0").unwrap()),
            Constraint::new(
                Some(Version::parse("1.0").unwrap()),
                Some(Version::parse("2.0").unwrap()),
            ),
        ];
        for constraint in &constraints {
            let narrowed = range.intersect(constraint);
            for sample in &samples {
                if narrowed.matches(sample) {
                    assert!(
                        range.matches(sample) && constraint.matches(sample),
                        "narrowed range {narrowed} matched {sample} outside {range} / {constraint}"
                    );
                }
            }
        }

        // Test Clone and serde round-trip
        let cloned = range.clone();
        assert_eq!(cloned, range);

        let json = serde_json::to_string(&range).unwrap();
        let back: VersionRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }
});
