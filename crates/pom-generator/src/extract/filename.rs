//! 파일명 휴리스틱 추출기
//!
//! 파일명에서는 버전을 복원할 수 없으므로 groupId와 version은 설정된 자리표시
//! 값을 씁니다. artifactId는 마지막 확장자를 제거한 파일명입니다.

use super::CoordinateExtractor;
use crate::error::ExtractionError;
use crate::types::{ArtifactRecord, Coordinate};

/// 기본 자리표시 groupId
pub const DEFAULT_PLACEHOLDER_GROUP: &str = "local.generated";

/// 기본 자리표시 version
pub const DEFAULT_PLACEHOLDER_VERSION: &str = "1.0";

/// 파일명 기반 추출기
#[derive(Debug, Clone)]
pub struct FilenameExtractor {
    group_id: String,
    version: String,
}

impl FilenameExtractor {
    pub fn new(group_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            version: version.into(),
        }
    }
}

impl Default for FilenameExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_GROUP, DEFAULT_PLACEHOLDER_VERSION)
    }
}

impl CoordinateExtractor for FilenameExtractor {
    fn name(&self) -> &str {
        "filename"
    }

    fn extract(&self, record: &ArtifactRecord) -> Result<Coordinate, ExtractionError> {
        let file_name = match record.path().file_name() {
            Some(name) => name.to_str().ok_or_else(|| {
                ExtractionError::NonUtf8FileName(name.to_string_lossy().into_owned())
            })?,
            None => "",
        };

        let stem = match file_name.rfind('.') {
            Some(idx) => &file_name[..idx],
            None => file_name,
        };

        if stem.is_empty() {
            return Err(ExtractionError::EmptyFileStem(file_name.to_owned()));
        }

        Coordinate::new(self.group_id.as_str(), stem, self.version.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(path: &str) -> Result<Coordinate, ExtractionError> {
        FilenameExtractor::default().extract(&ArtifactRecord::from_path(path))
    }

    #[test]
    fn strips_extension_and_uses_placeholders() {
        let coord = extract("/opt/libs/guava-32.1.2-jre.jar").unwrap();
        assert_eq!(coord.group_id(), "local.generated");
        assert_eq!(coord.artifact_id(), "guava-32.1.2-jre");
        assert_eq!(coord.version(), "1.0");
    }

    #[test]
    fn strips_only_last_extension() {
        let coord = extract("dist/report.tar.zip").unwrap();
        assert_eq!(coord.artifact_id(), "report.tar");
    }

    #[test]
    fn name_without_extension_is_kept() {
        let coord = extract("bin/launcher").unwrap();
        assert_eq!(coord.artifact_id(), "launcher");
    }

    #[test]
    fn bare_extension_fails() {
        assert_eq!(
            extract("libs/.jar").unwrap_err(),
            ExtractionError::EmptyFileStem(".jar".to_owned())
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_fails() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = std::path::Path::new("libs").join(OsStr::from_bytes(b"lib\xff.jar"));
        let err = FilenameExtractor::default()
            .extract(&ArtifactRecord::from_path(path))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NonUtf8FileName(_)));
        assert_eq!(err.reason_code(), "non_utf8_file_name");
    }

    #[test]
    fn control_character_in_file_name_fails() {
        let err = extract("libs/lib\u{7}.jar").unwrap_err();
        assert_eq!(err.reason_code(), "invalid_character");
    }

    #[test]
    fn custom_placeholders() {
        let extractor = FilenameExtractor::new("unknown.group", "0.1");
        let coord = extractor
            .extract(&ArtifactRecord::from_path("a/b/c.zip"))
            .unwrap();
        assert_eq!(coord.to_string(), "unknown.group:c:0.1");
    }
}
