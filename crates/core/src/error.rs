//! 에러 타입 -- 도메인별 에러 정의

/// pomsynth 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PomsynthError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// descriptor 생성 에러
    #[error("generate error: {0}")]
    Generate(#[from] GenerateError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// descriptor 생성 에러
///
/// 실행 전체를 중단시키는 치명적 조건만 포함합니다.
/// 아카이브 단위 추출 실패는 여기로 올라오지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// 스캔 루트를 읽을 수 없음
    #[error("scan root unavailable: {0}")]
    ScanRoot(String),

    /// 문서 직렬화 실패
    #[error("render failed: {0}")]
    Render(String),

    /// 출력 파일 기록 실패
    #[error("output write failed: {0}")]
    Output(String),
}
