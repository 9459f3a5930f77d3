#![no_main]

use libfuzzer_sys::fuzz_target;
use perlin_core::Mnemonic;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mnemonic) = Mnemonic::parse(s) {
            assert!(matches!(mnemonic.word_count(), 12 | 15 | 18 | 21 | 24));

            // Normalised phrase parses to the same mnemonic
            let again = Mnemonic::parse(mnemonic.phrase()).unwrap();
            assert_eq!(again, mnemonic);
        }
    }
});
