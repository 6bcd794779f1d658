#![no_main]

use libfuzzer_sys::fuzz_target;
use zi_version::Version;

fuzz_target!(|data: &[u8]| {
    // Try to parse as UTF-8 string
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing must never panic, only return errors
        let Ok(version) = Version::parse(s) else {
            return;
        };

        // Display output must reparse to an equal value
        let rendered = version.to_string();
        let reparsed = Version::parse(&rendered).expect("rendered version must reparse");
        assert_eq!(reparsed, version, "round-trip changed the value: {s:?}");

        // Comparison against fixed versions must not panic
        let anchors = ["0", "0.1", "1.0", "1.0-pre", "1.0-rc1", "1.0-post", "99.99"];
        for anchor in anchors {
            let anchor = Version::parse(anchor).unwrap();
            let _ = version.cmp(&anchor);
            let _ = version == anchor;
        }

        // Test Clone and self-comparison
        let cloned = version.clone();
        assert_eq!(cloned, version);
        assert_eq!(cloned.cmp(&version), std::cmp::Ordering::Equal);

        // Serde uses the same string representation
        let json = serde_json::to_string(&version).unwrap();
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, version);
    }
});
