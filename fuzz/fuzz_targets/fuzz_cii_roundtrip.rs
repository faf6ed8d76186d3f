#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Read, recalculate, write, read again: no step may panic.
    if let Ok(parsed) = einvoice::cii::from_cii_xml(s) {
        let mut invoice = parsed.invoice;
        let _ = einvoice::calculate(&mut invoice, None);
        if let Ok(xml) = einvoice::cii::to_cii_xml(&invoice) {
            let _ = einvoice::cii::from_cii_xml(&xml);
        }
    }
});
