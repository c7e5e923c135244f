#![no_main]

use agronomic_calculator::{io::read_json_from_bytes, Calculator, LimingTarget};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(samples) = read_json_from_bytes(data) {
        let entries = Calculator::default().batch(&samples, &LimingTarget::default());
        assert_eq!(entries.len(), samples.len());
    }
});
