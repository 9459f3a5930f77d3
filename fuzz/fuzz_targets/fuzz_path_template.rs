#![no_main]

use libfuzzer_sys::fuzz_target;
use perlin_core::{AccountIndex, PathTemplate};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let index = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) & 0x7FFF_FFFF;
    let Ok(s) = std::str::from_utf8(&data[4..]) else {
        return;
    };

    if let Ok(template) = PathTemplate::parse(s) {
        let index = AccountIndex::new(i64::from(index)).unwrap();
        let path = template.resolve(index);

        // The substituted segment is present with the slot's hardening
        assert!(path
            .components()
            .iter()
            .any(|c| c.index() == index.get() && c.is_hardened() == template.slot_is_hardened()));

        // Template text re-parses to the same resolution
        let again = PathTemplate::parse(template.as_str()).unwrap();
        assert_eq!(again.resolve(index), path);
    }
});
