#![no_main]

use libfuzzer_sys::fuzz_target;
use perlin_core::DerivationPath;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(path) = s.parse::<DerivationPath>() {
            // Depth fits in the BIP-32 depth byte
            assert!(path.depth() <= 255);

            // Round-trip through the canonical form
            let canonical = path.to_string();
            let reparsed: DerivationPath = canonical.parse().unwrap();
            assert_eq!(path, reparsed);
        }
    }

    // Build from raw components: 4 bytes each, high bit selects hardened
    let components: Vec<_> = data
        .chunks_exact(4)
        .take(16)
        .map(|chunk| {
            let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let index = value & 0x7FFF_FFFF;
            if value & 0x8000_0000 != 0 {
                perlin_core::ChildNumber::hardened(index).unwrap()
            } else {
                perlin_core::ChildNumber::normal(index).unwrap()
            }
        })
        .collect();

    let path = DerivationPath::new(components).unwrap();
    assert_eq!(path.to_string().parse::<DerivationPath>().unwrap(), path);
});
