//! descriptor 생성 오케스트레이터
//!
//! [`PomGenerator`]는 한 번의 실행을 순서대로 수행합니다.
//!
//! 1. 탐색: 스캔 루트 재귀 순회 (`spawn_blocking`)
//! 2. 식별: 아카이브마다 [`ArtifactIdentifier`] 호출
//! 3. 추출 + 분류: 레코드마다 좌표 추출, 경로로 스코프 결정
//! 4. 중복 제거: [`DependencySet`]
//! 5. 직렬화 + 기록: 스테이징 파일에 쓴 뒤 목적지로 rename
//!
//! 아카이브는 발견 순서대로 한 번에 하나씩 처리됩니다. 아카이브 단위 실패는
//! 경고 로그와 보고서 항목으로 남고 실행은 계속됩니다.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use metrics::counter;
use serde::Serialize;
use tracing::{debug, info, warn};

use pomsynth_core::metrics as m;

use crate::config::GeneratorConfig;
use crate::dedup::DependencySet;
use crate::discover::{ArchiveDetector, WalkOptions, discover_archives};
use crate::error::{ExtractionError, GeneratorError};
use crate::extract::{Extractors, FilenameExtractor};
use crate::identify::{ArtifactIdentifier, Identifier};
use crate::pom;
use crate::scope;
use crate::types::{Dependency, ProjectIdentity};

/// 스테이징 파일 접미사
const STAGING_SUFFIX: &str = ".tmp";

/// 좌표를 얻지 못해 제외된 항목
#[derive(Debug, Clone, Serialize)]
pub struct SkippedArtifact {
    /// 아카이브 경로
    pub path: PathBuf,
    /// 사유 코드 (`invalid_purl`, `scanner_timeout`, ...)
    pub reason: &'static str,
    /// 사람이 읽는 상세 메시지
    pub detail: String,
}

/// 실행 결과 종류
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// descriptor 기록 완료
    Written {
        /// 기록된 파일 경로
        path: PathBuf,
    },
    /// 대상 아카이브가 하나도 없음 (파일 미생성)
    NoArtifacts,
    /// 아카이브는 있으나 유효한 좌표가 없음 (파일 미생성)
    NoCoordinates,
}

/// 한 번의 실행 보고서
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// 결과 종류
    pub outcome: GenerationOutcome,
    /// 탐색된 아카이브 수
    pub discovered: usize,
    /// 기록된 고유 의존성 (발견 순서)
    pub dependencies: Vec<Dependency>,
    /// 중복으로 버려진 의존성 수
    pub duplicates: usize,
    /// 제외된 항목
    pub skipped: Vec<SkippedArtifact>,
}

impl GenerationReport {
    fn empty(outcome: GenerationOutcome, discovered: usize) -> Self {
        Self {
            outcome,
            discovered,
            dependencies: Vec::new(),
            duplicates: 0,
            skipped: Vec::new(),
        }
    }

    /// descriptor가 기록되었는지 여부
    pub fn is_written(&self) -> bool {
        matches!(self.outcome, GenerationOutcome::Written { .. })
    }
}

/// 수집 단계 결과 (기록 전)
#[derive(Debug, Default)]
pub struct Collection {
    /// 고유 의존성 집합
    pub dependencies: DependencySet,
    /// 중복 수
    pub duplicates: usize,
    /// 제외된 항목
    pub skipped: Vec<SkippedArtifact>,
}

/// descriptor 생성기
///
/// 식별기 타입은 기본적으로 설정 기반 [`Identifier`]이며
/// [`with_identifier`](Self::with_identifier)로 교체할 수 있습니다.
pub struct PomGenerator<I = Identifier> {
    config: GeneratorConfig,
    identifier: I,
    detector: ArchiveDetector,
    extractors: Extractors,
}

impl PomGenerator<Identifier> {
    /// 새 빌더를 생성합니다.
    pub fn builder() -> PomGeneratorBuilder {
        PomGeneratorBuilder::new()
    }
}

impl<I: ArtifactIdentifier> PomGenerator<I> {
    /// 식별기를 교체합니다.
    pub fn with_identifier<J: ArtifactIdentifier>(self, identifier: J) -> PomGenerator<J> {
        PomGenerator {
            config: self.config,
            identifier,
            detector: self.detector,
            extractors: self.extractors,
        }
    }

    /// 현재 설정을 반환합니다.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// 합성 프로젝트 좌표를 반환합니다.
    pub fn identity(&self) -> &ProjectIdentity {
        &self.config.identity
    }

    /// 스캔 루트에서 대상 아카이브를 발견 순서대로 찾습니다.
    pub async fn discover(&self) -> Result<Vec<PathBuf>, GeneratorError> {
        let root = self.config.root.clone();
        let detector = self.detector.clone();
        let options = WalkOptions {
            follow_symlinks: self.config.follow_symlinks,
            max_depth: self.config.max_depth,
        };

        let archives =
            tokio::task::spawn_blocking(move || discover_archives(&root, &detector, options))
                .await
                .map_err(|e| GeneratorError::Discovery(format!("spawn_blocking failed: {e}")))??;

        counter!(m::ARCHIVES_DISCOVERED_TOTAL).increment(archives.len() as u64);
        Ok(archives)
    }

    /// 아카이브 목록을 식별, 추출, 분류하여 고유 의존성 집합을 만듭니다.
    ///
    /// 입력 순서가 곧 발견 순서이며 같은 `groupId:artifactId`는 처음 것만 남습니다.
    pub async fn collect(&self, archives: &[PathBuf]) -> Collection {
        let mut collection = Collection::default();

        for path in archives {
            let records = match self.identifier.identify(path).await {
                Ok(records) => records,
                Err(e) => {
                    record_skip(&mut collection.skipped, path, &e);
                    continue;
                }
            };

            for record in records {
                let coordinate = match self.extractors.extract(&record) {
                    Ok(coordinate) => coordinate,
                    Err(e) => {
                        record_skip(&mut collection.skipped, record.path(), &e);
                        continue;
                    }
                };

                // 스캔 루트 위의 디렉토리는 스코프 판정에 쓰지 않는다
                let relative = record
                    .path()
                    .strip_prefix(&self.config.root)
                    .unwrap_or(record.path());
                let dependency = Dependency::new(coordinate, scope::classify(relative));
                let key = dependency.dedup_key();
                let version = dependency.coordinate.version().to_owned();
                if collection.dependencies.insert(dependency) {
                    debug!(path = %record.path().display(), key = %key, "dependency added");
                } else {
                    collection.duplicates += 1;
                    counter!(m::DEPENDENCIES_DUPLICATE_TOTAL).increment(1);
                    let kept = collection
                        .dependencies
                        .get(&key)
                        .map(|d| d.coordinate.version())
                        .unwrap_or_default();
                    debug!(
                        path = %record.path().display(),
                        key = %key,
                        version = %version,
                        kept_version = kept,
                        "duplicate dependency ignored"
                    );
                }
            }
        }

        collection
    }

    /// 전체 실행: 탐색부터 descriptor 기록까지
    ///
    /// 아카이브가 없거나 유효한 좌표가 없으면 파일을 만들지 않고
    /// 해당 [`GenerationOutcome`]을 반환합니다.
    pub async fn run(&self) -> Result<GenerationReport, GeneratorError> {
        info!(
            root = %self.config.root.display(),
            mode = self.config.mode.as_str(),
            identifier = self.identifier.name(),
            "starting descriptor generation"
        );

        let archives = self.discover().await?;
        let discovered = archives.len();

        if archives.is_empty() {
            info!(root = %self.config.root.display(), "no artifacts found");
            return Ok(GenerationReport::empty(GenerationOutcome::NoArtifacts, 0));
        }

        info!(archives = discovered, "archives discovered");

        let collection = self.collect(&archives).await;

        if collection.dependencies.is_empty() {
            warn!(
                archives = discovered,
                skipped = collection.skipped.len(),
                "no usable coordinates"
            );
            let mut report = GenerationReport::empty(GenerationOutcome::NoCoordinates, discovered);
            report.skipped = collection.skipped;
            report.duplicates = collection.duplicates;
            return Ok(report);
        }

        let xml = pom::render(collection.dependencies.iter(), &self.config.identity)?;
        write_staged(&self.config.output_path, &xml).await?;

        let written = collection.dependencies.len();
        counter!(m::DEPENDENCIES_WRITTEN_TOTAL).increment(written as u64);

        info!(
            path = %self.config.output_path.display(),
            dependencies = written,
            archives = discovered,
            skipped = collection.skipped.len(),
            duplicates = collection.duplicates,
            "descriptor written"
        );

        Ok(GenerationReport {
            outcome: GenerationOutcome::Written {
                path: self.config.output_path.clone(),
            },
            discovered,
            dependencies: collection.dependencies.into_vec(),
            duplicates: collection.duplicates,
            skipped: collection.skipped,
        })
    }
}

fn record_skip(skipped: &mut Vec<SkippedArtifact>, path: &Path, error: &ExtractionError) {
    warn!(
        path = %path.display(),
        reason = error.reason_code(),
        error = %error,
        "skipping artifact"
    );
    counter!(m::ARTIFACTS_SKIPPED_TOTAL, m::LABEL_REASON => error.reason_code()).increment(1);
    skipped.push(SkippedArtifact {
        path: path.to_path_buf(),
        reason: error.reason_code(),
        detail: error.to_string(),
    });
}

/// 출력 경로 옆의 스테이징 파일 경로 (`<name>.tmp`)
pub fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("pom.xml"));
    name.push(STAGING_SUFFIX);
    destination.with_file_name(name)
}

/// 스테이징 파일에 쓴 뒤 목적지로 rename합니다.
///
/// 실패하면 목적지는 이전 상태 그대로 남고 스테이징 파일은 제거됩니다.
async fn write_staged(destination: &Path, contents: &str) -> Result<(), GeneratorError> {
    let staging = staging_path(destination);

    if let Err(e) = tokio::fs::write(&staging, contents).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(GeneratorError::Output {
            path: staging.display().to_string(),
            source: e,
        });
    }

    if let Err(e) = tokio::fs::rename(&staging, destination).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(GeneratorError::Output {
            path: destination.display().to_string(),
            source: e,
        });
    }

    Ok(())
}

/// [`PomGenerator`] 빌더
#[derive(Default)]
pub struct PomGeneratorBuilder {
    config: GeneratorConfig,
}

impl PomGeneratorBuilder {
    /// 기본 설정을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// generator 설정을 지정합니다.
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// 설정을 검증하고 생성기를 빌드합니다.
    pub fn build(self) -> Result<PomGenerator, GeneratorError> {
        self.config.validate()?;

        let identifier = Identifier::from_config(&self.config);
        let detector = ArchiveDetector::new(&self.config.extensions);
        let extractors = Extractors::new(FilenameExtractor::new(
            self.config.placeholder_group.clone(),
            self.config.placeholder_version.clone(),
        ));

        Ok(PomGenerator {
            config: self.config,
            identifier,
            detector,
            extractors,
        })
    }
}
