#![no_main]

use libfuzzer_sys::fuzz_target;
use perlin_core::Address;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(address) = s.parse::<Address>() {
            let checksummed = address.to_checksum();
            assert!(Address::is_checksum_valid(&checksummed));
            assert_eq!(checksummed.parse::<Address>().unwrap(), address);
        }
        let _ = Address::is_checksum_valid(s);
    }

    if data.len() >= 20 {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&data[..20]);
        let address = Address::new(bytes);
        assert_eq!(address.to_checksum().parse::<Address>().unwrap(), address);
    }
});
