//! 아티팩트 식별 -- 아카이브 하나를 식별 레코드로 변환
//!
//! [`ArtifactIdentifier`] trait은 식별 소스를 교체 가능하게 하는 경계입니다.
//!
//! # 구현
//!
//! - [`ScannerIdentifier`]: 외부 SBOM 스캐너(syft 호환)를 실행하여 레코드 생성
//! - [`FilenameIdentifier`]: 메타데이터 없이 경로만 담은 레코드 생성
//!
//! [`Identifier`]는 설정된 모드에 따라 두 구현 중 하나로 위임합니다.

pub mod syft;

use std::future::Future;
use std::path::Path;

use crate::config::{GeneratorConfig, IdentifierMode};
use crate::error::ExtractionError;
use crate::types::ArtifactRecord;

pub use syft::{ScannerIdentifier, parse_scanner_output};

/// 아카이브 식별 전략 trait
///
/// 하나의 아카이브에서 0개 이상의 레코드를 만듭니다. 스캐너는 fat jar 하나에서
/// 여러 아티팩트를 보고할 수 있습니다.
pub trait ArtifactIdentifier: Send + Sync {
    /// 식별 소스 이름 (로그 및 메트릭 레이블용)
    fn name(&self) -> &str;

    /// 아카이브를 식별합니다.
    ///
    /// 에러는 해당 아카이브에만 국한됩니다.
    fn identify(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Vec<ArtifactRecord>, ExtractionError>> + Send;
}

/// 경로만 담은 레코드를 만드는 식별기
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameIdentifier;

impl ArtifactIdentifier for FilenameIdentifier {
    fn name(&self) -> &str {
        "filename"
    }

    async fn identify(&self, path: &Path) -> Result<Vec<ArtifactRecord>, ExtractionError> {
        Ok(vec![ArtifactRecord::from_path(path)])
    }
}

/// 설정 모드에 따른 식별기
#[derive(Debug, Clone)]
pub enum Identifier {
    /// 외부 스캐너
    Scanner(ScannerIdentifier),
    /// 파일명 휴리스틱
    Filename(FilenameIdentifier),
}

impl Identifier {
    /// generator 설정에서 식별기를 생성합니다.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        match config.mode {
            IdentifierMode::Scanner => Self::Scanner(
                ScannerIdentifier::new(config.scanner_command.clone(), config.scanner_timeout())
                    .fallback_to_filename(config.fallback_to_filename),
            ),
            IdentifierMode::Filename => Self::Filename(FilenameIdentifier),
        }
    }
}

impl ArtifactIdentifier for Identifier {
    fn name(&self) -> &str {
        match self {
            Self::Scanner(inner) => inner.name(),
            Self::Filename(inner) => inner.name(),
        }
    }

    async fn identify(&self, path: &Path) -> Result<Vec<ArtifactRecord>, ExtractionError> {
        match self {
            Self::Scanner(inner) => inner.identify(path).await,
            Self::Filename(inner) => inner.identify(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfigBuilder;
    use crate::types::Identification;

    #[tokio::test]
    async fn filename_identifier_yields_single_record() {
        let records = FilenameIdentifier
            .identify(Path::new("libs/guava.jar"))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path(), Path::new("libs/guava.jar"));
        assert_eq!(records[0].identification, Identification::Filename);
    }

    #[test]
    fn identifier_follows_configured_mode() {
        let config = GeneratorConfigBuilder::new()
            .mode(IdentifierMode::Filename)
            .build()
            .unwrap();
        assert_eq!(Identifier::from_config(&config).name(), "filename");

        let config = GeneratorConfigBuilder::new()
            .mode(IdentifierMode::Scanner)
            .scanner_command("syft")
            .build()
            .unwrap();
        assert_eq!(Identifier::from_config(&config).name(), "syft");
    }
}
