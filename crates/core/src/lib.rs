//! pomsynth 공통 크레이트
//!
//! 에러 타입, `pomsynth.toml` 설정, 메트릭 이름을 정의합니다.
//! 도메인 로직은 `pomsynth-generator`에 있습니다.

pub mod config;
pub mod error;
pub mod metrics;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, GenerateError, PomsynthError};

// 설정
pub use config::{
    GeneralConfig, HeuristicConfig, OutputConfig, PomsynthConfig, ScanConfig, ScannerConfig,
};
