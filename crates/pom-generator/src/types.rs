//! 도메인 타입 -- descriptor 생성 전용 데이터 구조
//!
//! 좌표, 스코프, 의존성, 아티팩트 레코드 등 핵심 타입을 정의합니다.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// 의존성 스코프
///
/// `Compile`이 기본값이며 descriptor에서는 생략됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// 빌드/런타임 의존성
    #[default]
    Compile,
    /// 테스트 전용 의존성
    Test,
}

impl Scope {
    /// descriptor에 기록되는 스코프 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maven 좌표 (groupId, artifactId, version)
///
/// 세 필드는 모두 비어 있지 않음이 생성 시점에 보장됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Coordinate {
    /// 좌표를 생성합니다.
    ///
    /// 빈 필드가 있거나 제어 문자처럼 descriptor에 쓸 수 없는 문자가 있으면 실패합니다.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        let version = version.into();

        if group_id.is_empty() {
            return Err(ExtractionError::EmptyField("groupId"));
        }
        if artifact_id.is_empty() {
            return Err(ExtractionError::EmptyField("artifactId"));
        }
        if version.is_empty() {
            return Err(ExtractionError::EmptyField("version"));
        }

        for (field, value) in [
            ("groupId", &group_id),
            ("artifactId", &artifact_id),
            ("version", &version),
        ] {
            if value.chars().any(is_forbidden_char) {
                return Err(ExtractionError::InvalidCharacter {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(Self {
            group_id,
            artifact_id,
            version,
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// 좌표 값으로 허용하지 않는 문자 (제어 문자, XML 비문자 U+FFFE/U+FFFF)
fn is_forbidden_char(c: char) -> bool {
    c.is_control() || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// descriptor에 기록될 의존성
///
/// 한 번 생성된 뒤에는 변경되지 않습니다. 동일성은 [`dedup_key`](Self::dedup_key)로
/// 판단하며 version은 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// 좌표
    pub coordinate: Coordinate,
    /// 스코프
    pub scope: Scope,
}

impl Dependency {
    pub fn new(coordinate: Coordinate, scope: Scope) -> Self {
        Self { coordinate, scope }
    }

    /// 중복 제거 키 (`groupId:artifactId`)
    pub fn dedup_key(&self) -> String {
        format!(
            "{}:{}",
            self.coordinate.group_id(),
            self.coordinate.artifact_id()
        )
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.coordinate, self.scope)
    }
}

/// 외부 스캐너가 보고한 아티팩트 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScannerMetadata {
    /// 패키지 이름
    #[serde(default)]
    pub name: String,
    /// 패키지 버전
    #[serde(default)]
    pub version: String,
    /// Package URL (예: `pkg:maven/org.slf4j/slf4j-api@2.0.9`)
    #[serde(default)]
    pub purl: String,
}

/// 아티팩트 식별 정보
///
/// 어떤 추출 전략을 적용할지 결정하는 태그입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identification {
    /// 외부 스캐너 결과 레코드
    Scanner(ScannerMetadata),
    /// 구조화된 메타데이터 없음 (파일명 휴리스틱)
    Filename,
}

/// 탐색된 아카이브 하나에 대한 식별 레코드
///
/// 파일마다 생성되어 곧바로 추출에 소비됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    /// 아카이브 파일 경로
    pub path: PathBuf,
    /// 식별 정보
    pub identification: Identification,
}

impl ArtifactRecord {
    /// 스캐너 메타데이터가 있는 레코드를 생성합니다.
    pub fn scanned(path: impl Into<PathBuf>, metadata: ScannerMetadata) -> Self {
        Self {
            path: path.into(),
            identification: Identification::Scanner(metadata),
        }
    }

    /// 파일명 휴리스틱용 레코드를 생성합니다.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            identification: Identification::Filename,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 합성 프로젝트 정체성 (descriptor의 루트 좌표)
///
/// 입력에서 유도하지 않고 설정으로 고정됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Default for ProjectIdentity {
    fn default() -> Self {
        Self {
            group_id: "org.example".to_owned(),
            artifact_id: "generated-pom".to_owned(),
            version: "1.0.0".to_owned(),
        }
    }
}
