//! 스코프 분류 -- 경로 규칙으로 test / compile 결정

use std::path::Path;

use crate::types::Scope;

/// 테스트 디렉토리 세그먼트 이름
const TEST_SEGMENT: &str = "test";

/// 테스트 아카이브 파일명 접두사
const TEST_FILE_PREFIX: &str = "test-";

/// 경로를 스코프로 분류합니다.
///
/// 대소문자를 구분하지 않으며 `/`와 `\`를 모두 구분자로 취급합니다.
/// 디렉토리 세그먼트 중 하나가 `test`이거나 파일명이 `test-`로 시작하면
/// [`Scope::Test`]입니다.
pub fn classify(path: &Path) -> Scope {
    classify_str(&path.to_string_lossy())
}

/// 문자열 경로 버전의 [`classify`]
pub fn classify_str(path: &str) -> Scope {
    let normalized = path.to_lowercase().replace('\\', "/");
    let mut segments: Vec<&str> = normalized.split('/').collect();

    let file_name = segments.pop().unwrap_or_default();

    if segments.iter().any(|s| *s == TEST_SEGMENT) || file_name.starts_with(TEST_FILE_PREFIX) {
        Scope::Test
    } else {
        Scope::Compile
    }
}
