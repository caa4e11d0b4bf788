#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Whatever deserializes is a validated invoice and must encode.
    if let Ok(invoice) = serde_json::from_slice::<ksef::Invoice>(data) {
        assert!(ksef::xml::to_fa1_xml(&invoice).is_ok());
    }
});
