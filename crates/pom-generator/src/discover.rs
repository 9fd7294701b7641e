//! 아카이브 탐색 -- 스캔 루트를 재귀 순회하여 대상 파일 수집
//!
//! 동기 I/O를 사용하므로 `tokio::task::spawn_blocking` 내에서 호출해야 합니다.
//! 디렉토리마다 파일명 순으로 정렬되어 실행 간 결과 순서가 같습니다.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::GeneratorError;

/// 확장자 기반 아카이브 탐지기
#[derive(Debug, Clone)]
pub struct ArchiveDetector {
    /// 소문자, 선행 `.` 제거된 확장자 목록
    extensions: Vec<String>,
}

impl ArchiveDetector {
    /// 확장자 목록으로 탐지기를 생성합니다.
    ///
    /// `.JAR`, `jar`는 같은 확장자로 취급됩니다.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// 경로의 확장자가 대상 목록에 있는지 확인합니다 (대소문자 무시).
    pub fn is_archive(&self, path: &Path) -> bool {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return false,
        };

        self.extensions.iter().any(|known| *known == ext)
    }
}

impl Default for ArchiveDetector {
    fn default() -> Self {
        Self::new(["jar", "zip"])
    }
}

/// 순회 옵션
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// 심볼릭 링크를 따라갈지 여부
    pub follow_symlinks: bool,
    /// 최대 탐색 깊이 (루트 = 0)
    pub max_depth: Option<usize>,
}

/// 스캔 루트 아래의 대상 아카이브를 발견 순서대로 반환합니다.
///
/// 루트를 읽을 수 없으면 실패합니다. 하위 항목의 읽기 실패는 경고 후 건너뜁니다.
pub fn discover_archives(
    root: &Path,
    detector: &ArchiveDetector,
    options: WalkOptions,
) -> Result<Vec<PathBuf>, GeneratorError> {
    let metadata = std::fs::metadata(root).map_err(|e| GeneratorError::ScanRoot {
        path: root.display().to_string(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(GeneratorError::NotADirectory(root.display().to_string()));
    }

    let mut walker = WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name();
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut archives = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let reason = e.to_string();
                return Err(GeneratorError::ScanRoot {
                    path: root.display().to_string(),
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other(reason)),
                });
            }
            Err(e) => {
                tracing::warn!(
                    path = %e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    error = %e,
                    "failed to read directory entry, skipping"
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if detector.is_archive(entry.path()) {
            tracing::debug!(path = %entry.path().display(), "archive discovered");
            archives.push(entry.into_path());
        }
    }

    Ok(archives)
}
