//! 외부 SBOM 스캐너 식별기 (syft 호환)
//!
//! `<command> <archive> -o json`을 실행하고 stdout의 JSON 문서
//! `{"artifacts": [{"name", "version", "purl"}]}`를 레코드로 변환합니다.
//! 호출마다 제한 시간이 적용되며 초과 시 자식 프로세스를 종료합니다.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::process::Command;

use pomsynth_core::metrics as m;

use super::ArtifactIdentifier;
use crate::error::ExtractionError;
use crate::types::{ArtifactRecord, ScannerMetadata};

/// stderr를 에러 메시지에 포함할 때의 최대 길이
const MAX_STDERR_IN_ERROR: usize = 512;

/// 스캐너 JSON 문서 최상위 구조
#[derive(Debug, Deserialize)]
struct ScanDocument {
    #[serde(default)]
    artifacts: Option<Vec<ScannerMetadata>>,
}

/// 스캐너 stdout을 아티팩트 메타데이터 목록으로 파싱합니다.
///
/// `artifacts`가 없거나 `null`이면 빈 목록입니다. 알 수 없는 필드는 무시합니다.
pub fn parse_scanner_output(stdout: &[u8]) -> Result<Vec<ScannerMetadata>, ExtractionError> {
    let document: ScanDocument = serde_json::from_slice(stdout)
        .map_err(|e| ExtractionError::ScannerOutput(e.to_string()))?;
    Ok(document.artifacts.unwrap_or_default())
}

/// 외부 스캐너 식별기
#[derive(Debug, Clone)]
pub struct ScannerIdentifier {
    command: String,
    timeout: Duration,
    fallback_to_filename: bool,
}

impl ScannerIdentifier {
    /// 스캐너 명령과 호출당 제한 시간으로 생성합니다.
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
            fallback_to_filename: false,
        }
    }

    /// 스캐너 실패 시 파일명 레코드로 대체할지 설정합니다.
    pub fn fallback_to_filename(mut self, enabled: bool) -> Self {
        self.fallback_to_filename = enabled;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn scan(&self, path: &Path) -> Result<Vec<ArtifactRecord>, ExtractionError> {
        let child = Command::new(&self.command)
            .arg(path)
            .args(["-o", "json"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExtractionError::Scanner(format!("failed to spawn '{}': {e}", self.command))
            })?;

        let started = Instant::now();

        // 시간 초과 시 future가 drop되면서 kill_on_drop으로 자식이 종료됨
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                ExtractionError::Scanner(format!("failed to collect scanner output: {e}"))
            })?,
            Err(_) => return Err(ExtractionError::ScannerTimeout(self.timeout)),
        };

        metrics::histogram!(m::SCANNER_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let stderr = match stderr.char_indices().nth(MAX_STDERR_IN_ERROR) {
                Some((idx, _)) => &stderr[..idx],
                None => stderr,
            };
            return Err(ExtractionError::Scanner(format!(
                "{} exited with {}: {stderr}",
                self.command, output.status
            )));
        }

        let artifacts = parse_scanner_output(&output.stdout)?;
        if artifacts.is_empty() {
            return Err(ExtractionError::NoArtifacts);
        }

        Ok(artifacts
            .into_iter()
            .map(|meta| ArtifactRecord::scanned(path, meta))
            .collect())
    }
}

impl ArtifactIdentifier for ScannerIdentifier {
    fn name(&self) -> &str {
        "syft"
    }

    async fn identify(&self, path: &Path) -> Result<Vec<ArtifactRecord>, ExtractionError> {
        match self.scan(path).await {
            Ok(records) => {
                tracing::debug!(
                    path = %path.display(),
                    records = records.len(),
                    "scanner identified archive"
                );
                Ok(records)
            }
            Err(e) if self.fallback_to_filename && e.is_scanner_failure() => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "scanner failed, falling back to file name"
                );
                Ok(vec![ArtifactRecord::from_path(path)])
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Identification;

    #[test]
    fn parses_artifact_list() {
        let json = br#"{
            "artifacts": [
                {"name": "commons-lang3", "version": "3.12.0",
                 "purl": "pkg:maven/org.apache.commons/commons-lang3@3.12.0",
                 "type": "java-archive", "locations": []},
                {"name": "partial"}
            ],
            "source": {"type": "file"}
        }"#;
        let artifacts = parse_scanner_output(json).unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "commons-lang3");
        assert_eq!(
            artifacts[0].purl,
            "pkg:maven/org.apache.commons/commons-lang3@3.12.0"
        );
        assert!(artifacts[1].purl.is_empty());
    }

    #[test]
    fn missing_or_null_artifacts_is_empty() {
        assert!(parse_scanner_output(b"{}").unwrap().is_empty());
        assert!(parse_scanner_output(br#"{"artifacts": null}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_output_error() {
        let err = parse_scanner_output(b"not json").unwrap_err();
        assert!(matches!(err, ExtractionError::ScannerOutput(_)));
        let err = parse_scanner_output(br#"{"artifacts": "x"}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::ScannerOutput(_)));
    }

    #[tokio::test]
    async fn spawn_failure_is_scanner_error() {
        let identifier =
            ScannerIdentifier::new("pomsynth-no-such-scanner", Duration::from_secs(5));
        let err = identifier
            .identify(Path::new("libs/a.jar"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Scanner(_)));
        assert!(err.to_string().contains("pomsynth-no-such-scanner"));
    }

    #[tokio::test]
    async fn fallback_yields_filename_record() {
        let identifier = ScannerIdentifier::new("pomsynth-no-such-scanner", Duration::from_secs(5))
            .fallback_to_filename(true);
        let records = identifier
            .identify(Path::new("libs/a.jar"))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identification, Identification::Filename);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn fallback_covers_unparseable_scanner_output() {
        // `true`는 성공 종료하지만 stdout이 비어 있음
        let identifier = ScannerIdentifier::new("true", Duration::from_secs(5));
        let err = identifier
            .identify(Path::new("libs/a.jar"))
            .await
            .unwrap_err();
        assert!(err.is_scanner_failure());

        let records = identifier
            .fallback_to_filename(true)
            .identify(Path::new("libs/a.jar"))
            .await
            .unwrap();
        assert_eq!(records[0].identification, Identification::Filename);
    }

    #[test]
    fn accessors() {
        let identifier = ScannerIdentifier::new("syft", Duration::from_secs(120));
        assert_eq!(identifier.command(), "syft");
        assert_eq!(identifier.timeout(), Duration::from_secs(120));
        assert_eq!(identifier.name(), "syft");
    }
}
