//! Fuzz target for field classification.
//!
//! Any JSON that loads must classify without panicking, and the result must
//! keep the array/numerical exclusivity and slot-type invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vizlink::input::DataLoader;
use vizlink::{classify, recommend, FieldType};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(loaded) = DataLoader::new().load_str(text) else {
        return;
    };

    let schema = classify(&loaded.records).expect("loaded records are never empty");
    for field in schema.fields.values() {
        assert!(!(field.is_array && field.primary_type == FieldType::Numerical));
    }

    let rec = recommend(&schema);
    assert!(rec.validate(&schema).is_ok());
});
