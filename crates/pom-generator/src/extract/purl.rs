//! Maven Package URL 파서
//!
//! `pkg:maven/<group>/<artifact>@<version>` 형식만 받아들입니다.
//! 형식에서 벗어나면 실패하며 자리표시 값으로 채우지 않습니다.

use super::CoordinateExtractor;
use crate::error::ExtractionError;
use crate::types::{ArtifactRecord, Coordinate, Identification};

/// Maven purl 접두사
pub const MAVEN_PURL_PREFIX: &str = "pkg:maven/";

/// 스캐너 purl 기반 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct PurlExtractor;

impl CoordinateExtractor for PurlExtractor {
    fn name(&self) -> &str {
        "purl"
    }

    fn extract(&self, record: &ArtifactRecord) -> Result<Coordinate, ExtractionError> {
        match &record.identification {
            Identification::Scanner(meta) => parse_maven_purl(&meta.purl),
            Identification::Filename => Err(ExtractionError::InvalidPurl {
                purl: String::new(),
                reason: "record carries no purl",
            }),
        }
    }
}

/// Maven purl을 좌표로 파싱합니다.
///
/// 규칙:
/// 1. 고정 접두사 `pkg:maven/` 제거
/// 2. 나머지를 첫 `@`에서 한 번 분할 (좌표 경로, 버전)
/// 3. 좌표 경로는 `/`로 정확히 두 개의 비어 있지 않은 세그먼트
///
/// 버전 뒤의 qualifier(`?type=jar`)와 subpath(`#...`)는 버립니다.
///
/// # Examples
///
/// ```
/// use pomsynth_generator::extract::purl::parse_maven_purl;
///
/// let coord = parse_maven_purl("pkg:maven/org.apache.commons/commons-lang3@3.12.0").unwrap();
/// assert_eq!(coord.to_string(), "org.apache.commons:commons-lang3:3.12.0");
///
/// assert!(parse_maven_purl("pkg:maven/org/apache/commons-lang3@3.12.0").is_err());
/// ```
pub fn parse_maven_purl(purl: &str) -> Result<Coordinate, ExtractionError> {
    let invalid = |reason: &'static str| ExtractionError::InvalidPurl {
        purl: purl.to_owned(),
        reason,
    };

    let rest = purl
        .strip_prefix(MAVEN_PURL_PREFIX)
        .ok_or_else(|| invalid("missing pkg:maven/ prefix"))?;

    let (path, version) = rest
        .split_once('@')
        .ok_or_else(|| invalid("missing '@' version separator"))?;

    let version = match version.find(['?', '#']) {
        Some(idx) => &version[..idx],
        None => version,
    };

    let mut segments = path.split('/');
    let (Some(group), Some(artifact), None) = (segments.next(), segments.next(), segments.next())
    else {
        return Err(invalid("coordinate path must be <group>/<artifact>"));
    };

    if group.is_empty() || artifact.is_empty() {
        return Err(invalid("empty coordinate segment"));
    }
    if version.is_empty() {
        return Err(invalid("empty version"));
    }

    Coordinate::new(group, artifact, version)
}
