#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = gstr1::convert::normalize_date(s);
        let _ = gstr1::convert::normalize_state_code(s);
        let _ = gstr1::core::amount::parse_number(s);
    }
});
