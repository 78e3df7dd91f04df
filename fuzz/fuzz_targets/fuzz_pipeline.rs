#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Shape errors are fine, panics are bugs.
        if let Ok(prepared) = gstr1::prepare(s) {
            let meta = gstr1::FilingMeta::new("27ABCDE1234F1Z5", "042024");
            let result = prepared.convert(&meta);
            let _ = gstr1::export::to_json_pretty(&result.document);
        }
    }
});
