//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! generator는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `pomsynth_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(pomsynth_core::metrics::ARCHIVES_DISCOVERED_TOTAL).increment(1);
//! ```

/// 스킵 사유 레이블 키 (invalid_purl, scanner_failed, scanner_timeout, ...)
pub const LABEL_REASON: &str = "reason";

/// 탐색된 아카이브 수 (counter)
pub const ARCHIVES_DISCOVERED_TOTAL: &str = "pomsynth_archives_discovered_total";

/// 좌표를 얻지 못해 제외된 아카이브/레코드 수 (counter, label: reason)
pub const ARTIFACTS_SKIPPED_TOTAL: &str = "pomsynth_artifacts_skipped_total";

/// 중복으로 버려진 의존성 수 (counter)
pub const DEPENDENCIES_DUPLICATE_TOTAL: &str = "pomsynth_dependencies_duplicate_total";

/// descriptor에 기록된 의존성 수 (counter)
pub const DEPENDENCIES_WRITTEN_TOTAL: &str = "pomsynth_dependencies_written_total";

/// 외부 스캐너 호출 소요 시간 (histogram, 초)
pub const SCANNER_DURATION_SECONDS: &str = "pomsynth_scanner_duration_seconds";

/// 모든 메트릭의 설명을 등록합니다.
///
/// recorder 설치 후 한 번 호출합니다. recorder가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        ARCHIVES_DISCOVERED_TOTAL,
        "Total number of archives matched during the filesystem walk"
    );
    describe_counter!(
        ARTIFACTS_SKIPPED_TOTAL,
        "Archives or scanner records excluded because no coordinate could be extracted"
    );
    describe_counter!(
        DEPENDENCIES_DUPLICATE_TOTAL,
        "Dependencies discarded because their group:artifact key was already seen"
    );
    describe_counter!(
        DEPENDENCIES_WRITTEN_TOTAL,
        "Dependencies written to the generated descriptor"
    );
    describe_histogram!(
        SCANNER_DURATION_SECONDS,
        "Wall time of one external scanner invocation in seconds"
    );
}
