//! 좌표 추출기 -- 식별 레코드에서 Maven 좌표를 유도
//!
//! [`CoordinateExtractor`] trait은 하나의 추출 계약을 공유하는 전략 인터페이스입니다.
//!
//! # 구현
//!
//! - [`PurlExtractor`]: 스캐너가 보고한 `pkg:maven/...` purl 파싱 (구조화 소스)
//! - [`FilenameExtractor`]: 파일명 + 자리표시 groupId/version (휴리스틱 소스)
//!
//! [`Extractors`]는 레코드의 [`Identification`] 태그를 보고 둘 중 하나를 고릅니다.
//! purl이 비어 있는 스캐너 레코드(부분적으로 채워진 결과)는 휴리스틱으로 보냅니다.

pub mod filename;
pub mod purl;

use crate::error::ExtractionError;
use crate::types::{ArtifactRecord, Coordinate, Identification};

pub use filename::FilenameExtractor;
pub use purl::PurlExtractor;

/// 좌표 추출 전략 trait
pub trait CoordinateExtractor: Send + Sync {
    /// 전략 이름 (로그용)
    fn name(&self) -> &str;

    /// 레코드 하나에서 좌표를 추출합니다.
    ///
    /// 실패는 해당 레코드에만 국한되며 호출자는 그 레코드를 건너뜁니다.
    fn extract(&self, record: &ArtifactRecord) -> Result<Coordinate, ExtractionError>;
}

/// 레코드 종류에 따라 추출 전략을 고르는 디스패처
#[derive(Debug, Clone, Default)]
pub struct Extractors {
    purl: PurlExtractor,
    filename: FilenameExtractor,
}

impl Extractors {
    pub fn new(filename: FilenameExtractor) -> Self {
        Self {
            purl: PurlExtractor,
            filename,
        }
    }

    /// 레코드에 적용될 전략을 반환합니다.
    pub fn select(&self, record: &ArtifactRecord) -> &dyn CoordinateExtractor {
        match &record.identification {
            Identification::Scanner(meta) if !meta.purl.is_empty() => &self.purl,
            Identification::Scanner(_) | Identification::Filename => &self.filename,
        }
    }

    /// 선택된 전략으로 좌표를 추출합니다.
    pub fn extract(&self, record: &ArtifactRecord) -> Result<Coordinate, ExtractionError> {
        self.select(record).extract(record)
    }
}
