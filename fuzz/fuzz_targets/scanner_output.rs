#![no_main]

use libfuzzer_sys::fuzz_target;
use pomsynth_generator::parse_scanner_output;

fuzz_target!(|data: &[u8]| {
    let _ = parse_scanner_output(data);
});
