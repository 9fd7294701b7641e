//! generator 에러 타입
//!
//! 두 계층으로 나뉩니다.
//!
//! - [`GeneratorError`]: 실행 전체를 중단시키는 에러 (스캔 루트, 설정, 출력 기록).
//!   `From<GeneratorError> for PomsynthError` 구현을 통해 `?`로 전파됩니다.
//! - [`ExtractionError`]: 아카이브 하나(또는 스캐너 레코드 하나)에 국한된 실패.
//!   해당 항목만 제외하고 실행은 계속됩니다. 상위로 전파되지 않습니다.

use std::time::Duration;

use pomsynth_core::error::{ConfigError, GenerateError, PomsynthError};

/// generator 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// 스캔 루트를 읽을 수 없음
    #[error("scan root error: {path}: {source}")]
    ScanRoot {
        /// 스캔 루트 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 스캔 루트가 디렉토리가 아님
    #[error("scan root is not a directory: {0}")]
    NotADirectory(String),

    /// 탐색 작업(blocking task) 실패
    #[error("discovery task failed: {0}")]
    Discovery(String),

    /// descriptor 직렬화 실패
    #[error("render error: {0}")]
    Render(String),

    /// 출력 파일 기록 실패
    #[error("output error: {path}: {source}")]
    Output {
        /// 출력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<GeneratorError> for PomsynthError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::ScanRoot { path, source } => {
                PomsynthError::Generate(GenerateError::ScanRoot(format!("{path}: {source}")))
            }
            GeneratorError::NotADirectory(path) => PomsynthError::Generate(
                GenerateError::ScanRoot(format!("{path}: not a directory")),
            ),
            GeneratorError::Discovery(msg) => {
                PomsynthError::Generate(GenerateError::ScanRoot(msg))
            }
            GeneratorError::Render(msg) => PomsynthError::Generate(GenerateError::Render(msg)),
            GeneratorError::Output { path, source } => {
                PomsynthError::Generate(GenerateError::Output(format!("{path}: {source}")))
            }
            GeneratorError::Config { field, reason } => {
                PomsynthError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}

/// 아카이브 단위 추출 실패
///
/// 진단 출력에서 파일과 사유를 구분할 수 있도록 각 변형이 사유를 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// `pkg:maven/<group>/<artifact>@<version>` 형식이 아님
    #[error("invalid maven purl '{purl}': {reason}")]
    InvalidPurl {
        /// 원본 purl 문자열
        purl: String,
        /// 실패 사유
        reason: &'static str,
    },

    /// 확장자를 제거한 파일명이 비어 있음
    #[error("cannot derive artifact id from file name '{0}'")]
    EmptyFileStem(String),

    /// 좌표 필드가 비어 있음
    #[error("coordinate field '{0}' is empty")]
    EmptyField(&'static str),

    /// 좌표 필드에 XML 1.0으로 표현할 수 없는 문자가 있음
    #[error("coordinate field '{field}' contains a character not allowed in XML: {value:?}")]
    InvalidCharacter {
        /// 필드 이름
        field: &'static str,
        /// 원본 값
        value: String,
    },

    /// 파일명이 UTF-8이 아님
    #[error("file name is not valid UTF-8: {0}")]
    NonUtf8FileName(String),

    /// 스캐너 프로세스 실행 실패 또는 비정상 종료
    #[error("scanner failed: {0}")]
    Scanner(String),

    /// 스캐너 제한 시간 초과
    #[error("scanner timed out after {0:?}")]
    ScannerTimeout(Duration),

    /// 스캐너 출력(JSON) 해석 실패
    #[error("scanner output error: {0}")]
    ScannerOutput(String),

    /// 스캐너가 아티팩트를 하나도 보고하지 않음
    #[error("scanner reported no artifacts")]
    NoArtifacts,
}

impl ExtractionError {
    /// 메트릭 레이블과 요약 출력에 쓰는 짧은 사유 코드
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidPurl { .. } => "invalid_purl",
            Self::EmptyFileStem(_) => "empty_file_stem",
            Self::EmptyField(_) => "empty_field",
            Self::InvalidCharacter { .. } => "invalid_character",
            Self::NonUtf8FileName(_) => "non_utf8_file_name",
            Self::Scanner(_) => "scanner_failed",
            Self::ScannerTimeout(_) => "scanner_timeout",
            Self::ScannerOutput(_) => "scanner_output",
            Self::NoArtifacts => "no_artifacts",
        }
    }

    /// 스캐너 호출 자체의 실패인지 (레코드 해석 실패가 아닌지) 반환합니다.
    pub fn is_scanner_failure(&self) -> bool {
        matches!(
            self,
            Self::Scanner(_) | Self::ScannerTimeout(_) | Self::ScannerOutput(_) | Self::NoArtifacts
        )
    }
}
