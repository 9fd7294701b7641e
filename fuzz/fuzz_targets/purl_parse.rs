#![no_main]

use libfuzzer_sys::fuzz_target;
use pomsynth_generator::parse_maven_purl;

fuzz_target!(|data: &[u8]| {
    if let Ok(purl) = std::str::from_utf8(data) {
        if let Ok(coordinate) = parse_maven_purl(purl) {
            // 성공한 파싱은 빈 필드를 만들지 않는다
            assert!(!coordinate.group_id().is_empty());
            assert!(!coordinate.artifact_id().is_empty());
            assert!(!coordinate.version().is_empty());
        }
    }
});
