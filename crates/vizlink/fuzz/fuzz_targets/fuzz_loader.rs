//! Fuzz target for JSON loading.
//!
//! This fuzzer tests that loading:
//! 1. Never panics on malformed or oddly shaped JSON
//! 2. Either fails cleanly or yields a non-empty record array

#![no_main]

use libfuzzer_sys::fuzz_target;
use vizlink::input::DataLoader;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let loader = DataLoader::new();
        if let Ok(loaded) = loader.load_str(text) {
            assert!(!loaded.records.is_empty());
            assert_eq!(loaded.source.record_count, loaded.records.len());
        }
    }
});
