//! 설정 관리 -- pomsynth.toml 파싱 및 런타임 설정
//!
//! [`PomsynthConfig`]는 모든 단계의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`POMSYNTH_SCANNER_MODE=filename` 형식)
//! 3. 설정 파일 (`pomsynth.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), pomsynth_core::error::PomsynthError> {
//! use pomsynth_core::config::PomsynthConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = PomsynthConfig::load("pomsynth.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PomsynthConfig::parse("[scanner]\nmode = \"filename\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, PomsynthError};

/// 외부 스캐너 호출 제한 시간 상한 (초)
const MAX_SCANNER_TIMEOUT_SECS: u64 = 3600;

/// pomsynth 통합 설정
///
/// `pomsynth.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PomsynthConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 아카이브 탐색 설정
    #[serde(default)]
    pub scan: ScanConfig,
    /// 외부 SBOM 스캐너 설정
    #[serde(default)]
    pub scanner: ScannerConfig,
    /// 파일명 휴리스틱 설정
    #[serde(default)]
    pub heuristic: HeuristicConfig,
    /// 출력 descriptor 설정
    #[serde(default)]
    pub output: OutputConfig,
}

impl PomsynthConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PomsynthError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 시작하는 [`load`](Self::load) 변형입니다.
    ///
    /// CLI가 명시적 경로 없이 기본 `pomsynth.toml`을 찾을 때 사용합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PomsynthError> {
        let mut config = match Self::from_file(path.as_ref()).await {
            Ok(config) => config,
            Err(PomsynthError::Config(ConfigError::FileNotFound { path })) => {
                tracing::debug!(path = %path, "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PomsynthError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PomsynthError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PomsynthError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PomsynthError> {
        toml::from_str(toml_str).map_err(|e| {
            PomsynthError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `POMSYNTH_{SECTION}_{FIELD}`
    /// 예: `POMSYNTH_SCANNER_TIMEOUT_SECS=30`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "POMSYNTH_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "POMSYNTH_GENERAL_LOG_FORMAT");

        // Scan
        override_string(&mut self.scan.root, "POMSYNTH_SCAN_ROOT");
        override_csv(&mut self.scan.extensions, "POMSYNTH_SCAN_EXTENSIONS");
        override_bool(
            &mut self.scan.follow_symlinks,
            "POMSYNTH_SCAN_FOLLOW_SYMLINKS",
        );
        override_opt_usize(&mut self.scan.max_depth, "POMSYNTH_SCAN_MAX_DEPTH");

        // Scanner
        override_string(&mut self.scanner.mode, "POMSYNTH_SCANNER_MODE");
        override_string(&mut self.scanner.command, "POMSYNTH_SCANNER_COMMAND");
        override_u64(
            &mut self.scanner.timeout_secs,
            "POMSYNTH_SCANNER_TIMEOUT_SECS",
        );
        override_bool(
            &mut self.scanner.fallback_to_filename,
            "POMSYNTH_SCANNER_FALLBACK_TO_FILENAME",
        );

        // Heuristic
        override_string(&mut self.heuristic.group_id, "POMSYNTH_HEURISTIC_GROUP_ID");
        override_string(&mut self.heuristic.version, "POMSYNTH_HEURISTIC_VERSION");

        // Output
        override_string(&mut self.output.path, "POMSYNTH_OUTPUT_PATH");
        override_string(&mut self.output.group_id, "POMSYNTH_OUTPUT_GROUP_ID");
        override_string(&mut self.output.artifact_id, "POMSYNTH_OUTPUT_ARTIFACT_ID");
        override_string(&mut self.output.version, "POMSYNTH_OUTPUT_VERSION");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PomsynthError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.scan.root.is_empty() {
            return Err(invalid("scan.root", "must not be empty".to_owned()));
        }

        if self.scan.extensions.is_empty() {
            return Err(invalid(
                "scan.extensions",
                "at least one archive extension required".to_owned(),
            ));
        }
        if self
            .scan
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(invalid(
                "scan.extensions",
                "extension must not be empty".to_owned(),
            ));
        }

        let valid_modes = ["syft", "filename"];
        if !valid_modes.contains(&self.scanner.mode.as_str()) {
            return Err(invalid(
                "scanner.mode",
                format!("must be one of: {}", valid_modes.join(", ")),
            ));
        }

        if self.scanner.mode == "syft" {
            if self.scanner.command.is_empty() {
                return Err(invalid(
                    "scanner.command",
                    "must not be empty when mode is syft".to_owned(),
                ));
            }
            if self.scanner.timeout_secs == 0
                || self.scanner.timeout_secs > MAX_SCANNER_TIMEOUT_SECS
            {
                return Err(invalid(
                    "scanner.timeout_secs",
                    format!("must be 1-{MAX_SCANNER_TIMEOUT_SECS}"),
                ));
            }
        }

        if self.heuristic.group_id.is_empty() {
            return Err(invalid("heuristic.group_id", "must not be empty".to_owned()));
        }
        if self.heuristic.version.is_empty() {
            return Err(invalid("heuristic.version", "must not be empty".to_owned()));
        }

        if self.output.path.is_empty() {
            return Err(invalid("output.path", "must not be empty".to_owned()));
        }
        if Path::new(&self.output.path)
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(invalid(
                "output.path",
                "contains path traversal pattern '..'".to_owned(),
            ));
        }

        for (field, value) in [
            ("output.group_id", &self.output.group_id),
            ("output.artifact_id", &self.output.artifact_id),
            ("output.version", &self.output.version),
        ] {
            if value.is_empty() {
                return Err(invalid(field, "must not be empty".to_owned()));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> PomsynthError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 아카이브 탐색 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 스캔 루트 디렉토리
    pub root: String,
    /// 대상 아카이브 확장자 (대소문자 무시, 선행 '.' 허용)
    pub extensions: Vec<String>,
    /// 심볼릭 링크 추적 여부
    pub follow_symlinks: bool,
    /// 최대 탐색 깊이 (없으면 무제한)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: ".".to_owned(),
            extensions: vec!["jar".to_owned(), "zip".to_owned()],
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

/// 외부 SBOM 스캐너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// 식별 방식 (syft, filename)
    pub mode: String,
    /// 스캐너 실행 파일
    pub command: String,
    /// 아카이브 하나당 스캐너 제한 시간 (초)
    pub timeout_secs: u64,
    /// 스캐너 실패 시 파일명 휴리스틱으로 대체할지 여부
    pub fallback_to_filename: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            mode: "syft".to_owned(),
            command: "syft".to_owned(),
            timeout_secs: 120,
            fallback_to_filename: false,
        }
    }
}

/// 파일명 휴리스틱 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// 자리표시 groupId
    pub group_id: String,
    /// 자리표시 version
    pub version: String,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            group_id: "local.generated".to_owned(),
            version: "1.0".to_owned(),
        }
    }
}

/// 출력 descriptor 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 출력 파일 경로
    pub path: String,
    /// 합성 프로젝트 groupId
    pub group_id: String,
    /// 합성 프로젝트 artifactId
    pub artifact_id: String,
    /// 합성 프로젝트 version
    pub version: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "generated-pom.xml".to_owned(),
            group_id: "org.example".to_owned(),
            artifact_id: "generated-pom".to_owned(),
            version: "1.0.0".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_opt_usize(target: &mut Option<usize>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val.split(',').map(|s| s.trim().to_owned()).collect();
    }
}
