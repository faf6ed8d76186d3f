#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are fine, panics are bugs. Validation must cope with
    // whatever partial invoice the reader returns.
    if let Ok(parsed) = einvoice::cii::read_cii(data) {
        let _ = einvoice::validate(&parsed.invoice);
    }
});
