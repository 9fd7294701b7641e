//! Integration tests for the descriptor generator
//!
//! Tests the full run: discovery -> identification -> extraction -> dedup -> pom.xml

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pomsynth_generator::{
    ArtifactIdentifier, ArtifactRecord, ExtractionError, GenerationOutcome,
    GeneratorConfigBuilder, IdentifierMode, PomGenerator, ProjectIdentity, Scope,
    ScannerMetadata,
};

const POM_NS: &str = "http://maven.apache.org/POM/4.0.0";

/// 파일명 -> 스캐너 응답을 고정한 식별기
#[derive(Default)]
struct MockIdentifier {
    responses: HashMap<String, Result<Vec<ScannerMetadata>, ExtractionError>>,
}

impl MockIdentifier {
    fn artifact(mut self, file_name: &str, purl: &str) -> Self {
        self.responses.insert(
            file_name.to_owned(),
            Ok(vec![ScannerMetadata {
                name: file_name.to_owned(),
                version: String::new(),
                purl: purl.to_owned(),
            }]),
        );
        self
    }

    fn artifacts(mut self, file_name: &str, purls: &[&str]) -> Self {
        self.responses.insert(
            file_name.to_owned(),
            Ok(purls
                .iter()
                .map(|purl| ScannerMetadata {
                    purl: (*purl).to_owned(),
                    ..Default::default()
                })
                .collect()),
        );
        self
    }

    fn failure(mut self, file_name: &str, error: ExtractionError) -> Self {
        self.responses.insert(file_name.to_owned(), Err(error));
        self
    }
}

impl ArtifactIdentifier for MockIdentifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn identify(&self, path: &Path) -> Result<Vec<ArtifactRecord>, ExtractionError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.responses.get(&file_name) {
            Some(Ok(artifacts)) => Ok(artifacts
                .iter()
                .cloned()
                .map(|meta| ArtifactRecord::scanned(path, meta))
                .collect()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(ExtractionError::NoArtifacts),
        }
    }
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"PK\x03\x04").unwrap();
}

fn generator(root: &Path, output: &Path, mode: IdentifierMode) -> PomGenerator {
    let config = GeneratorConfigBuilder::new()
        .root(root)
        .mode(mode)
        .output_path(output)
        .build()
        .unwrap();
    PomGenerator::builder().config(config).build().unwrap()
}

/// (groupId, artifactId, version, scope) 목록
fn parse_dependencies(xml: &str) -> Vec<(String, String, String, Option<String>)> {
    let doc = roxmltree::Document::parse(xml).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().namespace(), Some(POM_NS));

    let text = |node: roxmltree::Node, name: &str| {
        node.children()
            .find(|n| n.has_tag_name(name))
            .and_then(|n| n.text())
            .map(str::to_owned)
    };

    root.descendants()
        .filter(|n| n.has_tag_name("dependency"))
        .map(|dep| {
            (
                text(dep, "groupId").unwrap(),
                text(dep, "artifactId").unwrap(),
                text(dep, "version").unwrap(),
                text(dep, "scope"),
            )
        })
        .collect()
}

/// libs/commons-lang3.jar + test/mockito-core.jar -> 두 의존성, 두 번째는 test 스코프
#[tokio::test]
async fn test_e2e_scanner_purls_to_pom() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("libs/commons-lang3.jar"));
    touch(&root.join("test/mockito-core.jar"));
    let output = dir.path().join("generated-pom.xml");

    let identifier = MockIdentifier::default()
        .artifact(
            "commons-lang3.jar",
            "pkg:maven/org.apache.commons/commons-lang3@3.12.0",
        )
        .artifact("mockito-core.jar", "pkg:maven/org.mockito/mockito-core@4.5.1");

    let report = generator(&root, &output, IdentifierMode::Scanner)
        .with_identifier(identifier)
        .run()
        .await
        .unwrap();

    assert_eq!(report.outcome, GenerationOutcome::Written { path: output.clone() });
    assert_eq!(report.discovered, 2);
    assert!(report.skipped.is_empty());

    let xml = std::fs::read_to_string(&output).unwrap();
    let deps = parse_dependencies(&xml);
    assert_eq!(
        deps,
        vec![
            (
                "org.apache.commons".to_owned(),
                "commons-lang3".to_owned(),
                "3.12.0".to_owned(),
                None
            ),
            (
                "org.mockito".to_owned(),
                "mockito-core".to_owned(),
                "4.5.1".to_owned(),
                Some("test".to_owned())
            ),
        ]
    );

    let doc = roxmltree::Document::parse(&xml).unwrap();
    let project = doc.root_element();
    let identity = ProjectIdentity::default();
    let child = |name: &str| {
        project
            .children()
            .find(|n| n.has_tag_name(name))
            .and_then(|n| n.text())
    };
    assert_eq!(child("modelVersion"), Some("4.0.0"));
    assert_eq!(child("groupId"), Some(identity.group_id.as_str()));
    assert_eq!(child("artifactId"), Some(identity.artifact_id.as_str()));
}

/// 대상 아카이브가 없으면 파일을 만들지 않음
#[tokio::test]
async fn test_zero_archives_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("README.md"));
    touch(&root.join("classes/App.class"));
    let output = dir.path().join("generated-pom.xml");

    let report = generator(&root, &output, IdentifierMode::Scanner)
        .with_identifier(MockIdentifier::default())
        .run()
        .await
        .unwrap();

    assert_eq!(report.outcome, GenerationOutcome::NoArtifacts);
    assert!(!output.exists());
}

/// 잘못된 purl과 스캐너 실패는 해당 아카이브만 제외
#[tokio::test]
async fn test_failures_skip_only_affected_archives() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("a-good.jar"));
    touch(&root.join("b-npm.jar"));
    touch(&root.join("c-timeout.jar"));
    touch(&root.join("d-nested.jar"));
    let output = dir.path().join("pom.xml");

    let identifier = MockIdentifier::default()
        .artifact("a-good.jar", "pkg:maven/org.slf4j/slf4j-api@2.0.9")
        .artifact("b-npm.jar", "pkg:npm/lodash@4.17.21")
        .failure(
            "c-timeout.jar",
            ExtractionError::ScannerTimeout(std::time::Duration::from_secs(120)),
        )
        .artifact("d-nested.jar", "pkg:maven/org/slf4j/slf4j-api@2.0.9");

    let report = generator(&root, &output, IdentifierMode::Scanner)
        .with_identifier(identifier)
        .run()
        .await
        .unwrap();

    assert!(report.is_written());
    assert_eq!(report.discovered, 4);
    assert_eq!(report.dependencies.len(), 1);

    let reasons: Vec<(&str, &str)> = report
        .skipped
        .iter()
        .map(|s| {
            (
                s.path.file_name().and_then(|n| n.to_str()).unwrap(),
                s.reason,
            )
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("b-npm.jar", "invalid_purl"),
            ("c-timeout.jar", "scanner_timeout"),
            ("d-nested.jar", "invalid_purl"),
        ]
    );

    let deps = parse_dependencies(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].1, "slf4j-api");
}

/// 같은 groupId:artifactId는 처음 발견된 version/scope가 유지됨
#[tokio::test]
async fn test_dedup_first_seen_wins() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("a/guava-31.jar"));
    touch(&root.join("b/test/guava-32.jar"));
    touch(&root.join("c/failureaccess.jar"));
    let output = dir.path().join("pom.xml");

    let identifier = MockIdentifier::default()
        .artifact("guava-31.jar", "pkg:maven/com.google.guava/guava@31.1-jre")
        .artifact("guava-32.jar", "pkg:maven/com.google.guava/guava@32.1.2-jre")
        .artifact(
            "failureaccess.jar",
            "pkg:maven/com.google.guava/failureaccess@1.0.1",
        );

    let report = generator(&root, &output, IdentifierMode::Scanner)
        .with_identifier(identifier)
        .run()
        .await
        .unwrap();

    assert_eq!(report.duplicates, 1);
    let deps = parse_dependencies(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(deps.len(), 2);
    assert_eq!(deps[0].1, "guava");
    assert_eq!(deps[0].2, "31.1-jre");
    assert_eq!(deps[0].3, None);
    assert_eq!(deps[1].1, "failureaccess");
}

/// fat jar 하나에서 스캐너가 여러 아티팩트를 보고하는 경우
#[tokio::test]
async fn test_multiple_records_per_archive() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("app-all.jar"));
    let output = dir.path().join("pom.xml");

    let identifier = MockIdentifier::default().artifacts(
        "app-all.jar",
        &[
            "pkg:maven/com.example/app@1.0.0",
            "pkg:maven/com.fasterxml.jackson.core/jackson-databind@2.15.2?type=jar",
            "pkg:maven/com.example/app@1.0.0",
        ],
    );

    let report = generator(&root, &output, IdentifierMode::Scanner)
        .with_identifier(identifier)
        .run()
        .await
        .unwrap();

    assert_eq!(report.discovered, 1);
    assert_eq!(report.duplicates, 1);
    let deps = parse_dependencies(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(deps.len(), 2);
    assert_eq!(deps[1].2, "2.15.2");
}

/// purl이 비어 있는 스캐너 레코드는 파일명 휴리스틱으로 처리
#[tokio::test]
async fn test_empty_purl_uses_filename_heuristic() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("vendor/internal-tool.jar"));
    let output = dir.path().join("pom.xml");

    let identifier = MockIdentifier::default().artifact("internal-tool.jar", "");

    let report = generator(&root, &output, IdentifierMode::Scanner)
        .with_identifier(identifier)
        .run()
        .await
        .unwrap();

    assert!(report.is_written());
    let deps = parse_dependencies(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(
        deps,
        vec![(
            "local.generated".to_owned(),
            "internal-tool".to_owned(),
            "1.0".to_owned(),
            None
        )]
    );
}

/// 아카이브는 있으나 모두 실패하면 파일을 만들지 않음
#[tokio::test]
async fn test_no_usable_coordinates_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("one.jar"));
    touch(&root.join("two.zip"));
    let output = dir.path().join("pom.xml");

    let report = generator(&root, &output, IdentifierMode::Scanner)
        .with_identifier(MockIdentifier::default())
        .run()
        .await
        .unwrap();

    assert_eq!(report.outcome, GenerationOutcome::NoCoordinates);
    assert_eq!(report.discovered, 2);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped.iter().all(|s| s.reason == "no_artifacts"));
    assert!(!output.exists());
}

/// 파일명 모드: zip 번들 트리를 자리표시 좌표로 변환
#[tokio::test]
async fn test_filename_mode_over_zip_bundles() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("bundles");
    touch(&root.join("core-runtime.zip"));
    touch(&root.join("fixtures/test-data.zip"));
    touch(&root.join("modules/test/harness.ZIP"));
    touch(&root.join("notes.txt"));
    let output = dir.path().join("generated-pom.xml");

    let config = GeneratorConfigBuilder::new()
        .root(&root)
        .extensions(["zip"])
        .mode(IdentifierMode::Filename)
        .identity(ProjectIdentity {
            group_id: "org.example".to_owned(),
            artifact_id: "zip-to-pom-project".to_owned(),
            version: "1.0.0".to_owned(),
        })
        .output_path(&output)
        .build()
        .unwrap();
    let report = PomGenerator::builder()
        .config(config)
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.discovered, 3);
    let scopes: Vec<Scope> = report.dependencies.iter().map(|d| d.scope).collect();
    assert_eq!(scopes, vec![Scope::Compile, Scope::Test, Scope::Test]);

    let deps = parse_dependencies(&std::fs::read_to_string(&output).unwrap());
    let artifacts: Vec<&str> = deps.iter().map(|d| d.1.as_str()).collect();
    assert_eq!(artifacts, vec!["core-runtime", "test-data", "harness"]);
    assert!(deps.iter().all(|d| d.0 == "local.generated" && d.2 == "1.0"));
}

/// 재실행은 이전 출력을 완전히 덮어씀
#[tokio::test]
async fn test_rerun_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("repo");
    touch(&root.join("first.jar"));
    let output: PathBuf = dir.path().join("pom.xml");

    generator(&root, &output, IdentifierMode::Filename)
        .run()
        .await
        .unwrap();
    std::fs::remove_file(root.join("first.jar")).unwrap();
    touch(&root.join("second.jar"));
    generator(&root, &output, IdentifierMode::Filename)
        .run()
        .await
        .unwrap();

    let deps = parse_dependencies(&std::fs::read_to_string(&output).unwrap());
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].1, "second");
}
