//! generator 설정
//!
//! [`GeneratorConfig`]는 core의 [`PomsynthConfig`](pomsynth_core::PomsynthConfig)
//! 섹션들을 한 실행에 필요한 값으로 평탄화합니다.
//!
//! # 사용 예시
//!
//! ```
//! use pomsynth_generator::{GeneratorConfig, GeneratorConfigBuilder, IdentifierMode};
//!
//! // 기본값으로 생성
//! let config = GeneratorConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! let config = GeneratorConfigBuilder::new()
//!     .root("/srv/artifacts")
//!     .mode(IdentifierMode::Filename)
//!     .output_path("pom.xml")
//!     .build()
//!     .unwrap();
//! ```

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::types::ProjectIdentity;

/// 스캐너 제한 시간 상한 (초)
const MAX_SCANNER_TIMEOUT_SECS: u64 = 3600;

/// 아티팩트 식별 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierMode {
    /// 외부 SBOM 스캐너 (syft 호환)
    #[default]
    #[serde(rename = "syft")]
    Scanner,
    /// 파일명 휴리스틱
    Filename,
}

impl IdentifierMode {
    /// 설정 문자열에서 변환합니다 (대소문자 무시).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "syft" | "scanner" => Some(Self::Scanner),
            "filename" => Some(Self::Filename),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scanner => "syft",
            Self::Filename => "filename",
        }
    }
}

/// 한 번의 descriptor 생성에 필요한 설정
///
/// # 필드
///
/// - **root**: 스캔 루트 디렉토리
/// - **extensions**: 대상 아카이브 확장자
/// - **follow_symlinks** / **max_depth**: 순회 옵션
/// - **mode**: 식별 방식
/// - **scanner_command** / **scanner_timeout_secs** / **fallback_to_filename**: 외부 스캐너
/// - **placeholder_group** / **placeholder_version**: 파일명 휴리스틱 자리표시 값
/// - **output_path**: 출력 파일 경로
/// - **identity**: 합성 프로젝트 좌표
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub follow_symlinks: bool,
    pub max_depth: Option<usize>,
    pub mode: IdentifierMode,
    pub scanner_command: String,
    pub scanner_timeout_secs: u64,
    pub fallback_to_filename: bool,
    pub placeholder_group: String,
    pub placeholder_version: String,
    pub output_path: PathBuf,
    pub identity: ProjectIdentity,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: vec!["jar".to_owned(), "zip".to_owned()],
            follow_symlinks: false,
            max_depth: None,
            mode: IdentifierMode::Scanner,
            scanner_command: "syft".to_owned(),
            scanner_timeout_secs: 120,
            fallback_to_filename: false,
            placeholder_group: "local.generated".to_owned(),
            placeholder_version: "1.0".to_owned(),
            output_path: PathBuf::from("generated-pom.xml"),
            identity: ProjectIdentity::default(),
        }
    }
}

impl GeneratorConfig {
    /// core의 `PomsynthConfig`에서 generator 설정을 생성합니다.
    ///
    /// 알 수 없는 mode 문자열은 기본값(syft)으로 대체됩니다.
    pub fn from_core(core: &pomsynth_core::PomsynthConfig) -> Self {
        let mode = IdentifierMode::from_str_loose(&core.scanner.mode).unwrap_or_default();

        Self {
            root: PathBuf::from(&core.scan.root),
            extensions: core.scan.extensions.clone(),
            follow_symlinks: core.scan.follow_symlinks,
            max_depth: core.scan.max_depth,
            mode,
            scanner_command: core.scanner.command.clone(),
            scanner_timeout_secs: core.scanner.timeout_secs,
            fallback_to_filename: core.scanner.fallback_to_filename,
            placeholder_group: core.heuristic.group_id.clone(),
            placeholder_version: core.heuristic.version.clone(),
            output_path: PathBuf::from(&core.output.path),
            identity: ProjectIdentity {
                group_id: core.output.group_id.clone(),
                artifact_id: core.output.artifact_id.clone(),
                version: core.output.version.clone(),
            },
        }
    }

    /// 스캐너 호출당 제한 시간
    pub fn scanner_timeout(&self) -> Duration {
        Duration::from_secs(self.scanner_timeout_secs)
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `extensions`: 하나 이상, 빈 확장자 불가
    /// - `scanner_command`: syft 모드에서 비어 있으면 안 됨
    /// - `scanner_timeout_secs`: syft 모드에서 1-3600
    /// - `placeholder_group` / `placeholder_version`: 비어 있으면 안 됨
    /// - `output_path`: 파일명이 있어야 하며 `..` 불가
    /// - `identity`: 세 필드 모두 비어 있으면 안 됨
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.root.as_os_str().is_empty() {
            return Err(config_err("root", "scan root must not be empty"));
        }

        if self.extensions.is_empty() {
            return Err(config_err(
                "extensions",
                "at least one archive extension required",
            ));
        }
        if self
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(config_err("extensions", "extension must not be empty"));
        }

        if self.mode == IdentifierMode::Scanner {
            if self.scanner_command.is_empty() {
                return Err(config_err(
                    "scanner_command",
                    "must not be empty when mode is syft",
                ));
            }
            if self.scanner_timeout_secs == 0 || self.scanner_timeout_secs > MAX_SCANNER_TIMEOUT_SECS
            {
                return Err(config_err(
                    "scanner_timeout_secs",
                    &format!("must be 1-{MAX_SCANNER_TIMEOUT_SECS}"),
                ));
            }
        }

        if self.placeholder_group.is_empty() {
            return Err(config_err("placeholder_group", "must not be empty"));
        }
        if self.placeholder_version.is_empty() {
            return Err(config_err("placeholder_version", "must not be empty"));
        }

        if self.output_path.file_name().is_none() {
            return Err(config_err("output_path", "must name a file"));
        }
        if has_parent_component(&self.output_path) {
            return Err(config_err(
                "output_path",
                "contains path traversal pattern '..'",
            ));
        }

        for (field, value) in [
            ("identity.group_id", &self.identity.group_id),
            ("identity.artifact_id", &self.identity.artifact_id),
            ("identity.version", &self.identity.version),
        ] {
            if value.is_empty() {
                return Err(config_err(field, "must not be empty"));
            }
        }

        Ok(())
    }
}

fn has_parent_component(path: &Path) -> bool {
    path.components().any(|c| c == Component::ParentDir)
}

fn config_err(field: &str, reason: &str) -> GeneratorError {
    GeneratorError::Config {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

/// [`GeneratorConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 스캔 루트를 설정합니다.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// 대상 확장자 목록을 설정합니다.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// 심볼릭 링크 추적 여부를 설정합니다.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.follow_symlinks = follow;
        self
    }

    /// 최대 탐색 깊이를 설정합니다.
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// 식별 방식을 설정합니다.
    pub fn mode(mut self, mode: IdentifierMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// 외부 스캐너 명령을 설정합니다.
    pub fn scanner_command(mut self, command: impl Into<String>) -> Self {
        self.config.scanner_command = command.into();
        self
    }

    /// 스캐너 제한 시간(초)을 설정합니다.
    pub fn scanner_timeout_secs(mut self, secs: u64) -> Self {
        self.config.scanner_timeout_secs = secs;
        self
    }

    /// 스캐너 실패 시 파일명 대체 여부를 설정합니다.
    pub fn fallback_to_filename(mut self, enabled: bool) -> Self {
        self.config.fallback_to_filename = enabled;
        self
    }

    /// 파일명 휴리스틱 자리표시 groupId/version을 설정합니다.
    pub fn placeholders(mut self, group_id: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.placeholder_group = group_id.into();
        self.config.placeholder_version = version.into();
        self
    }

    /// 출력 파일 경로를 설정합니다.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// 합성 프로젝트 좌표를 설정합니다.
    pub fn identity(mut self, identity: ProjectIdentity) -> Self {
        self.config.identity = identity;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `GeneratorError::Config` 반환
    pub fn build(self) -> Result<GeneratorConfig, GeneratorError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
